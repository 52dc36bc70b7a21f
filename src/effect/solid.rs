//! Solid color fill

use super::{Effect, EffectFrame};
use crate::color::Rgb;

/// Fills every LED with the base color
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidEffect;

impl Effect for SolidEffect {
    fn render(&self, frame: &EffectFrame, leds: &mut [Rgb]) {
        let color = frame.color.scale_to_range(frame.brightness).to_rgb();
        leds.fill(color);
    }
}
