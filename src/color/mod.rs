mod brightness;
mod hsb;
mod utils;

use smart_leds::RGB8;

pub use brightness::BrightnessRange;
pub use hsb::{BRT_MAX, HUE_MAX, Hsb, SAT_MAX};
pub use utils::{BLACK, blend256, halve, rgb_from_u32, scale_hex};

pub type Rgb = RGB8;
