//! Status overlay
//!
//! Builds a second frame from live keyboard state (battery, lock keys,
//! layers, connections) at the pixel addresses given by the board's
//! [`IndicatorLayout`]. The frame is blended over the ambient effect by the
//! compositor using the factor from [`blend_factor`].

mod blend;
mod palette;

pub use blend::{
    BLEND_MAX, FADE_IN, FADE_IN_TICKS, FADE_OUT, FADE_OUT_TICKS, HOLD_UNTIL, HOLD_UNTIL_TICKS,
    OVERLAY_DURATION, OVERLAY_TICKS, blend_factor, overlay_expired, ticks,
};
pub use palette::StatusPalette;

use heapless::Vec;

use crate::color::{BLACK, BrightnessRange, Rgb};
use crate::device::{
    BatterySource, IndicatorSource, PeripheralBattery, ProfileStatus, Transport, UsbConnState,
};

/// Maximum number of pixels in one indicator group
pub const MAX_INDICATOR_PIXELS: usize = 16;

/// Ordered list of strip pixel addresses
pub type PixelList = Vec<u8, MAX_INDICATOR_PIXELS>;

/// Where each indicator lives on the strip
///
/// Groups left empty (or `None`) are simply not drawn.
#[derive(Debug, Clone, Default)]
pub struct IndicatorLayout {
    /// Local battery gauge, lowest level first
    pub battery: PixelList,
    /// Peripheral battery gauge, lowest level first
    pub peripheral_battery: PixelList,
    /// One pixel per keymap layer, indexed by layer number
    pub layers: PixelList,
    /// One pixel per BLE profile slot
    pub profiles: PixelList,
    pub num_lock: Option<u8>,
    pub caps_lock: Option<u8>,
    pub scroll_lock: Option<u8>,
    /// Lit when the preferred output transport is not in use
    pub output_fallback: Option<u8>,
    pub usb: Option<u8>,
}

/// Status frame generator
pub struct StatusOverlay<const N: usize> {
    layout: Option<IndicatorLayout>,
    palette: StatusPalette,
    pixels: [Rgb; N],
}

impl<const N: usize> StatusOverlay<N> {
    /// Create a new overlay. Without a layout the overlay stays dark.
    pub fn new(layout: Option<IndicatorLayout>, brightness: BrightnessRange) -> Self {
        Self {
            layout,
            palette: StatusPalette::new(brightness.max()),
            pixels: [BLACK; N],
        }
    }

    /// Last rendered status frame
    pub const fn pixels(&self) -> &[Rgb; N] {
        &self.pixels
    }

    pub const fn palette(&self) -> &StatusPalette {
        &self.palette
    }

    /// Rebuild the status frame and return its blend factor for `step`
    pub fn render<S: BatterySource + IndicatorSource>(&mut self, source: &S, step: u16) -> u16 {
        let Some(layout) = &self.layout else {
            return 0;
        };
        let palette = &self.palette;
        let pixels = &mut self.pixels;
        pixels.fill(BLACK);

        battery_gauge(pixels, palette, source.state_of_charge(), &layout.battery);

        match source.peripheral_battery() {
            PeripheralBattery::Level(level) => {
                battery_gauge(pixels, palette, level, &layout.peripheral_battery);
            }
            PeripheralBattery::NotConnected => {
                fill(pixels, &layout.peripheral_battery, palette.red);
            }
            PeripheralBattery::Absent | PeripheralBattery::Unavailable => {}
        }

        let locks = source.hid_indicators();
        if locks.caps_lock() {
            paint_opt(pixels, layout.caps_lock, palette.red);
        }
        if locks.num_lock() {
            paint_opt(pixels, layout.num_lock, palette.red);
        }
        if locks.scroll_lock() {
            paint_opt(pixels, layout.scroll_lock, palette.red);
        }

        for (layer, &address) in (0..=u8::MAX).zip(layout.layers.iter()) {
            if source.layer_active(layer) {
                paint(pixels, address, palette.magenta);
            }
        }

        if !source.preferred_transport_active() {
            paint_opt(pixels, layout.output_fallback, palette.red);
        }

        let transport = source.selected_transport();
        let active_profile = source.active_profile();
        for (profile, &address) in (0..source.profile_count()).zip(layout.profiles.iter()) {
            let color = match source.profile_status(profile) {
                ProfileStatus::Connected
                    if transport == Transport::Ble && active_profile == profile =>
                {
                    palette.white
                }
                ProfileStatus::Connected => palette.dull_green,
                ProfileStatus::Paired => palette.red,
                ProfileStatus::Unused => palette.lilac,
            };
            paint(pixels, address, color);
        }

        let usb_color = match source.usb_state() {
            UsbConnState::Hid if transport == Transport::Usb => palette.white,
            UsbConnState::Hid => palette.dull_green,
            UsbConnState::Powered => palette.red,
            UsbConnState::None => palette.lilac,
        };
        paint_opt(pixels, layout.usb, usb_color);

        blend_factor(step)
    }
}

/// Light the gauge from the bottom: address `i` of `n` is lit once the level
/// reaches `i * 100 / (n - 1)`
fn battery_gauge(pixels: &mut [Rgb], palette: &StatusPalette, level: u8, addresses: &[u8]) {
    let color = palette.battery(level);
    let steps = addresses.len().saturating_sub(1).max(1);
    for (i, &address) in addresses.iter().enumerate() {
        let min_level = i * 100 / steps;
        if usize::from(level) >= min_level {
            paint(pixels, address, color);
        }
    }
}

fn fill(pixels: &mut [Rgb], addresses: &[u8], color: Rgb) {
    for &address in addresses {
        paint(pixels, address, color);
    }
}

fn paint_opt(pixels: &mut [Rgb], address: Option<u8>, color: Rgb) {
    if let Some(address) = address {
        paint(pixels, address, color);
    }
}

/// Addresses outside the strip are ignored
fn paint(pixels: &mut [Rgb], address: u8, color: Rgb) {
    if let Some(pixel) = pixels.get_mut(usize::from(address)) {
        *pixel = color;
    }
}
