//! Spectrum cycle: the whole strip walks the hue circle in lockstep.

use super::{Effect, EffectFrame};
use crate::color::{HUE_MAX, Rgb};

#[derive(Debug, Clone, Copy, Default)]
pub struct SpectrumEffect;

impl Effect for SpectrumEffect {
    fn render(&self, frame: &EffectFrame, leds: &mut [Rgb]) {
        let mut hsb = frame.color;
        hsb.h = frame.phase % HUE_MAX;
        let color = hsb.scale_to_range(frame.brightness).to_rgb();
        leds.fill(color);
    }

    fn advance(&self, frame: &EffectFrame) -> u16 {
        (frame.phase % HUE_MAX + u16::from(frame.speed)) % HUE_MAX
    }
}
