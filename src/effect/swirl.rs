//! Swirl: the hue circle is spread over the strip and rotates.

use super::{Effect, EffectFrame};
use crate::color::{HUE_MAX, Rgb};

const STEP_PER_SPEED: u16 = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct SwirlEffect;

impl Effect for SwirlEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: &EffectFrame, leds: &mut [Rgb]) {
        if leds.is_empty() {
            return;
        }

        let hue_max = usize::from(HUE_MAX);
        let spread = hue_max / leds.len();
        let phase = usize::from(frame.phase);

        for (i, led) in leds.iter_mut().enumerate() {
            let mut hsb = frame.color;
            hsb.h = ((spread * i + phase) % hue_max) as u16;
            *led = hsb.scale_to_range(frame.brightness).to_rgb();
        }
    }

    fn advance(&self, frame: &EffectFrame) -> u16 {
        (frame.phase % HUE_MAX + u16::from(frame.speed) * STEP_PER_SPEED) % HUE_MAX
    }
}
