//! Ambient effects
//!
//! Effects are stateless: everything that moves lives in the phase counter
//! owned by the underglow state. Each effect renders a frame from the current
//! color, speed and phase, and reports the phase for the next frame.

mod breathe;
mod solid;
mod spectrum;
mod swirl;

pub use breathe::{BREATHE_PERIOD, BreatheEffect};
pub use solid::SolidEffect;
pub use spectrum::SpectrumEffect;
pub use swirl::SwirlEffect;

use crate::color::{BrightnessRange, Hsb, Rgb};

const EFFECT_NAME_SOLID: &str = "solid";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_SPECTRUM: &str = "spectrum";
const EFFECT_NAME_SWIRL: &str = "swirl";

const EFFECT_ID_SOLID: u8 = 0;
const EFFECT_ID_BREATHE: u8 = 1;
const EFFECT_ID_SPECTRUM: u8 = 2;
const EFFECT_ID_SWIRL: u8 = 3;

/// Inputs shared by every effect for one frame
#[derive(Debug, Clone, Copy)]
pub struct EffectFrame {
    /// Base color
    pub color: Hsb,
    /// Animation speed (1-5)
    pub speed: u8,
    /// Current phase counter
    pub phase: u16,
    /// Brightness window for the ambient output
    pub brightness: BrightnessRange,
}

pub trait Effect {
    /// Render a single frame
    fn render(&self, frame: &EffectFrame, leds: &mut [Rgb]);

    /// Phase counter after rendering `frame`
    fn advance(&self, frame: &EffectFrame) -> u16 {
        frame.phase
    }
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EffectId {
    #[default]
    Solid = EFFECT_ID_SOLID,
    Breathe = EFFECT_ID_BREATHE,
    Spectrum = EFFECT_ID_SPECTRUM,
    Swirl = EFFECT_ID_SWIRL,
}

impl EffectId {
    /// Number of known effects
    pub const COUNT: u8 = 4;

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_SOLID => Self::Solid,
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_SPECTRUM => Self::Spectrum,
            EFFECT_ID_SWIRL => Self::Swirl,
            _ => return None,
        })
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => EFFECT_NAME_SOLID,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Spectrum => EFFECT_NAME_SPECTRUM,
            Self::Swirl => EFFECT_NAME_SWIRL,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_SOLID => Some(Self::Solid),
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_SPECTRUM => Some(Self::Spectrum),
            EFFECT_NAME_SWIRL => Some(Self::Swirl),
            _ => None,
        }
    }

    /// Effect `direction` steps away, wrapping in both directions
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cycle(self, direction: i8) -> Self {
        let count = i16::from(Self::COUNT);
        let raw = (i16::from(self.raw()) + i16::from(direction)).rem_euclid(count);
        Self::from_raw(raw as u8).unwrap_or_default()
    }

    /// Render the effect into `leds` and return the next phase
    pub fn render(self, frame: &EffectFrame, leds: &mut [Rgb]) -> u16 {
        match self {
            Self::Solid => run(&SolidEffect, frame, leds),
            Self::Breathe => run(&BreatheEffect, frame, leds),
            Self::Spectrum => run(&SpectrumEffect, frame, leds),
            Self::Swirl => run(&SwirlEffect, frame, leds),
        }
    }
}

fn run<E: Effect>(effect: &E, frame: &EffectFrame, leds: &mut [Rgb]) -> u16 {
    effect.render(frame, leds);
    effect.advance(frame)
}
