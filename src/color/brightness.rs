use super::hsb::BRT_MAX;

/// Brightness window the ambient effects are mapped into.
///
/// Both ends are percentages (0-100), `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessRange {
    min: u8,
    max: u8,
}

impl BrightnessRange {
    /// Full 0-100 range
    pub const FULL: Self = Self {
        min: 0,
        max: BRT_MAX,
    };

    /// Create a new range, `None` if `min > max` or `max > 100`
    pub const fn new(min: u8, max: u8) -> Option<Self> {
        if min > max || max > BRT_MAX {
            return None;
        }
        Some(Self { min, max })
    }

    pub const fn min(self) -> u8 {
        self.min
    }

    pub const fn max(self) -> u8 {
        self.max
    }
}

impl Default for BrightnessRange {
    fn default() -> Self {
        Self::FULL
    }
}
