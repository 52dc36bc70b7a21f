#![no_std]

pub mod color;
pub mod command;
pub mod compositor;
pub mod config;
pub mod device;
pub mod effect;
pub mod error;
pub mod intent;
mod log;
pub mod scheduler;
pub mod shared;
pub mod state;
pub mod status;
pub mod underglow;
pub mod work;

pub use color::{BrightnessRange, Hsb, Rgb};
pub use command::UnderglowCommand;
pub use compositor::{CRITICAL_BATTERY, Composition, Compositor, LOW_BATTERY};
pub use config::{AdjustSteps, UnderglowConfig};
pub use device::{
    ActivityState, BatterySource, ExtPower, HidIndicators, IndicatorSource, PeripheralBattery,
    ProfileStatus, SettingsBlob, SettingsStore, StripDriver, Transport, UnderglowEvent,
    UsbConnState,
};
pub use effect::{Effect, EffectFrame, EffectId};
pub use error::{IoError, StorageError, UnderglowError};
pub use intent::{
    IntentChannel, IntentProcessor, IntentReceiver, IntentSender, UnderglowIntent,
};
pub use scheduler::{PeriodicTimer, PollResult, SaveDebouncer, TICK_PERIOD};
pub use shared::SharedUnderglow;
pub use state::{SETTINGS_KEY, UnderglowState};
pub use status::{IndicatorLayout, PixelList, StatusOverlay, StatusPalette};
pub use underglow::Underglow;
pub use work::{Work, WorkQueue};

pub use embassy_time::{Duration, Instant};
