//! Hue/saturation/brightness color value
//!
//! Hue is in degrees (0-360), saturation and brightness are percentages.

use super::{BrightnessRange, Rgb};

pub const HUE_MAX: u16 = 360;
pub const SAT_MAX: u8 = 100;
pub const BRT_MAX: u8 = 100;

/// HSB color as stored in the underglow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsb {
    pub h: u16,
    pub s: u8,
    pub b: u8,
}

impl Hsb {
    pub const fn new(h: u16, s: u8, b: u8) -> Self {
        Self { h, s, b }
    }

    /// Check that every component is within its range (maximum inclusive)
    pub const fn is_valid(self) -> bool {
        self.h <= HUE_MAX && self.s <= SAT_MAX && self.b <= BRT_MAX
    }

    /// Remap brightness from 0-100 into `range`
    ///
    /// Used by the ambient effects so that the lowest setting still emits
    /// `range.min()`.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn scale_to_range(mut self, range: BrightnessRange) -> Self {
        let span = (range.max() - range.min()) as u16;
        let b = if self.b > BRT_MAX { BRT_MAX } else { self.b };
        self.b = range.min() + (span * b as u16 / BRT_MAX as u16) as u8;
        self
    }

    /// Remap brightness from 0-100 into `0..=range.max()`
    ///
    /// Breathing uses this so it can reach full darkness.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn scale_from_zero(mut self, range: BrightnessRange) -> Self {
        let b = if self.b > BRT_MAX { BRT_MAX } else { self.b };
        self.b = (b as u16 * range.max() as u16 / BRT_MAX as u16) as u8;
        self
    }

    /// Convert to an 8-bit RGB triple
    ///
    /// Components are clamped to their ranges first. Channels are truncated,
    /// not rounded.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::many_single_char_names
    )]
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.min(HUE_MAX);
        let sector = h / 60;

        let v = f32::from(self.b.min(BRT_MAX)) / f32::from(BRT_MAX);
        let s = f32::from(self.s.min(SAT_MAX)) / f32::from(SAT_MAX);
        let f = f32::from(h) / f32::from(HUE_MAX) * 6.0 - f32::from(sector);

        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match sector % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        // `as` saturates, so float noise around 0.0 and 1.0 stays in range
        Rgb {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
        }
    }
}
