use crate::color::{Rgb, scale_hex};

const RED: u32 = 0xFF_00_00;
const YELLOW: u32 = 0xFF_FF_00;
const GREEN: u32 = 0x00_FF_00;
const DULL_GREEN: u32 = 0x00_FF_68;
const MAGENTA: u32 = 0xFF_00_FF;
const WHITE: u32 = 0xFF_FF_FF;
const LILAC: u32 = 0x6B_1F_CE;

/// Indicator colors, pre-scaled to the configured maximum brightness
#[derive(Debug, Clone, Copy)]
pub struct StatusPalette {
    pub red: Rgb,
    pub yellow: Rgb,
    pub green: Rgb,
    pub dull_green: Rgb,
    pub magenta: Rgb,
    pub white: Rgb,
    pub lilac: Rgb,
}

impl StatusPalette {
    pub const fn new(brightness_max: u8) -> Self {
        Self {
            red: scale_hex(RED, brightness_max),
            yellow: scale_hex(YELLOW, brightness_max),
            green: scale_hex(GREEN, brightness_max),
            dull_green: scale_hex(DULL_GREEN, brightness_max),
            magenta: scale_hex(MAGENTA, brightness_max),
            white: scale_hex(WHITE, brightness_max),
            lilac: scale_hex(LILAC, brightness_max),
        }
    }

    /// Battery gauge color for `level` percent
    pub const fn battery(&self, level: u8) -> Rgb {
        if level > 40 {
            self.green
        } else if level > 20 {
            self.yellow
        } else {
            self.red
        }
    }
}
