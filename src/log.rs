//! Optional logging
//!
//! With the `esp32-log` feature the [`log!`] macro forwards to
//! `esp_println::println!`. Without it the arguments are type-checked and
//! nothing is emitted.

#[cfg(feature = "esp32-log")]
macro_rules! log {
    ($($arg:tt)*) => {
        esp_println::println!($($arg)*)
    };
}

#[cfg(not(feature = "esp32-log"))]
macro_rules! log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub(crate) use log;
