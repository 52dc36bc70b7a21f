//! Frame compositor
//!
//! Combines the ambient frame with the status overlay and applies the
//! battery-based output limits. This is the last stage before the strip.

use crate::color::{BLACK, Rgb, blend256, halve};

/// Below this charge level every channel is halved
pub const LOW_BATTERY: u8 = 20;

/// Below this charge level the ambient frame is blanked
pub const CRITICAL_BATTERY: u8 = 10;

/// Result of compositing one frame
#[derive(Debug)]
pub struct Composition<'a> {
    /// Frame to hand to the strip driver
    pub frame: &'a [Rgb],
    /// The battery is below [`CRITICAL_BATTERY`]
    pub battery_critical: bool,
}

/// Frame compositor with its own output buffer
#[derive(Debug)]
pub struct Compositor<const N: usize> {
    output: [Rgb; N],
}

impl<const N: usize> Compositor<N> {
    pub const fn new() -> Self {
        Self {
            output: [BLACK; N],
        }
    }

    /// Compose one frame
    ///
    /// `blend` is the status weight (0-256), `battery` the charge level in
    /// percent. With no overlay and a healthy battery the ambient frame is
    /// passed through untouched. At critical charge the ambient frame itself
    /// is cleared, so only the overlay can still light up.
    pub fn compose<'a>(
        &'a mut self,
        ambient: &'a mut [Rgb; N],
        status: &[Rgb; N],
        blend: u16,
        battery: u8,
    ) -> Composition<'a> {
        if blend == 0 && battery >= LOW_BATTERY {
            return Composition {
                frame: ambient,
                battery_critical: false,
            };
        }

        let battery_critical = battery < CRITICAL_BATTERY;
        if battery_critical {
            ambient.fill(BLACK);
        }

        for ((out, base), over) in self.output.iter_mut().zip(ambient.iter()).zip(status) {
            *out = blend256(*base, *over, blend);
        }

        if battery < LOW_BATTERY {
            for out in &mut self.output {
                *out = halve(*out);
            }
        }

        Composition {
            frame: &self.output,
            battery_critical,
        }
    }
}

impl<const N: usize> Default for Compositor<N> {
    fn default() -> Self {
        Self::new()
    }
}
