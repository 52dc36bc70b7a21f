use crate::color::Rgb;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Blend a status color over an ambient color
///
/// `amount_of_status` is in 0-256, where 256 yields `status` unchanged.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn blend256(ambient: Rgb, status: Rgb, amount_of_status: u16) -> Rgb {
    let amount = u32::from(amount_of_status.min(256));
    let mix = |a: u8, s: u8| ((u32::from(s) * amount + u32::from(a) * (256 - amount)) >> 8) as u8;
    Rgb {
        r: mix(ambient.r, status.r),
        g: mix(ambient.g, status.g),
        b: mix(ambient.b, status.b),
    }
}

/// Halve every channel
#[inline]
pub const fn halve(color: Rgb) -> Rgb {
    Rgb {
        r: color.r >> 1,
        g: color.g >> 1,
        b: color.b >> 1,
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Create an RGB color from 0xRRGGBB with every channel scaled by
/// `brightness / 255`
///
/// With a percentage brightness this keeps indicator colors dim.
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_hex(color: u32, brightness: u8) -> Rgb {
    let full = rgb_from_u32(color);
    Rgb {
        r: scale_channel(full.r, brightness),
        g: scale_channel(full.g, brightness),
        b: scale_channel(full.b, brightness),
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn scale_channel(channel: u8, brightness: u8) -> u8 {
    (brightness as u16 * channel as u16 / 0xFF) as u8
}
