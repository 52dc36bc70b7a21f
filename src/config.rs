//! Runtime configuration
//!
//! Defaults follow the stock firmware settings for the underglow.

use embassy_time::Duration;

use crate::color::{BrightnessRange, Hsb};
use crate::effect::EffectId;
use crate::error::UnderglowError;
use crate::scheduler::DEFAULT_SAVE_DEBOUNCE;
use crate::state::{SPEED_MAX, SPEED_MIN};
use crate::status::IndicatorLayout;

/// Step sizes for the hue/saturation/brightness adjust commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustSteps {
    /// Degrees per hue step
    pub hue: u16,
    /// Percent per saturation step
    pub saturation: u8,
    /// Percent per brightness step
    pub brightness: u8,
}

impl Default for AdjustSteps {
    fn default() -> Self {
        Self {
            hue: 10,
            saturation: 10,
            brightness: 10,
        }
    }
}

/// Configuration for the underglow controller
#[derive(Debug, Clone)]
pub struct UnderglowConfig {
    /// Color at first boot
    pub color: Hsb,
    /// Animation speed at first boot (1-5)
    pub speed: u8,
    /// Effect at first boot
    pub effect: EffectId,
    /// Whether the underglow is on at first boot
    pub on: bool,
    /// Brightness window for the ambient effects and status colors
    pub brightness: BrightnessRange,
    pub steps: AdjustSteps,
    /// Quiet interval before a state change is written to storage
    pub save_debounce: Duration,
    /// Switch off while the keyboard is idle
    pub auto_off_idle: bool,
    /// Switch off while USB power is absent
    pub auto_off_usb: bool,
    /// Status overlay pixel mapping, `None` disables the overlay content
    pub indicators: Option<IndicatorLayout>,
}

impl Default for UnderglowConfig {
    fn default() -> Self {
        Self {
            color: Hsb::new(0, 100, 100),
            speed: 3,
            effect: EffectId::Solid,
            on: true,
            brightness: BrightnessRange::FULL,
            steps: AdjustSteps::default(),
            save_debounce: DEFAULT_SAVE_DEBOUNCE,
            auto_off_idle: false,
            auto_off_usb: false,
            indicators: None,
        }
    }
}

impl UnderglowConfig {
    /// Check the start values are within their ranges
    pub fn validate(&self) -> Result<(), UnderglowError> {
        if !self.color.is_valid() || !(SPEED_MIN..=SPEED_MAX).contains(&self.speed) {
            return Err(UnderglowError::InvalidArgument);
        }
        Ok(())
    }
}
