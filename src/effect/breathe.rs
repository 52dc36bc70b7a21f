//! Breathing effect
//!
//! Brightness follows a triangle wave over the phase counter: full at the
//! ends of the period, dark in the middle.

use super::{Effect, EffectFrame};
use crate::color::{BRT_MAX, Rgb};

/// Phase at which the breathing cycle restarts
pub const BREATHE_PERIOD: u16 = 2400;

const MIDPOINT: u16 = BREATHE_PERIOD / 2;
const PHASE_PER_BRIGHTNESS: u16 = MIDPOINT / BRT_MAX as u16;
const STEP_PER_SPEED: u16 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct BreatheEffect;

impl Effect for BreatheEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: &EffectFrame, leds: &mut [Rgb]) {
        let level = (frame.phase.abs_diff(MIDPOINT) / PHASE_PER_BRIGHTNESS).min(u16::from(BRT_MAX));

        let mut hsb = frame.color;
        hsb.b = level as u8;
        let color = hsb.scale_from_zero(frame.brightness).to_rgb();
        leds.fill(color);
    }

    fn advance(&self, frame: &EffectFrame) -> u16 {
        let next = frame
            .phase
            .saturating_add(u16::from(frame.speed) * STEP_PER_SPEED);
        if next >= BREATHE_PERIOD { 0 } else { next }
    }
}
