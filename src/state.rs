//! Persisted underglow state
//!
//! The state is stored as one fixed-size little-endian record:
//!
//! | offset | field            | type |
//! |--------|------------------|------|
//! | 0      | hue              | u16  |
//! | 2      | saturation       | u8   |
//! | 3      | brightness       | u8   |
//! | 4      | speed            | u8   |
//! | 5      | effect           | u8   |
//! | 6      | animation phase  | u16  |
//! | 8      | on               | u8   |
//! | 9      | overlay active   | u8   |
//! | 10     | overlay phase    | u16  |

use crate::color::Hsb;
use crate::config::UnderglowConfig;
use crate::effect::EffectId;
use crate::error::StorageError;

/// Settings key the state is stored under
pub const SETTINGS_KEY: &str = "rgb/underglow/state";

/// Size of the encoded state record
pub const STATE_SIZE: usize = 12;

pub const SPEED_MIN: u8 = 1;
pub const SPEED_MAX: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnderglowState {
    pub color: Hsb,
    pub speed: u8,
    pub effect: EffectId,
    /// Ambient animation phase
    pub phase: u16,
    pub on: bool,
    pub status_active: bool,
    /// Ticks since the status overlay was activated
    pub status_phase: u16,
}

impl UnderglowState {
    /// Initial state from configuration defaults
    pub fn from_config(config: &UnderglowConfig) -> Self {
        Self {
            color: config.color,
            speed: config.speed,
            effect: config.effect,
            phase: 0,
            on: config.on,
            status_active: false,
            status_phase: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; STATE_SIZE] {
        let mut bytes = [0; STATE_SIZE];
        bytes[0..2].copy_from_slice(&self.color.h.to_le_bytes());
        bytes[2] = self.color.s;
        bytes[3] = self.color.b;
        bytes[4] = self.speed;
        bytes[5] = self.effect.raw();
        bytes[6..8].copy_from_slice(&self.phase.to_le_bytes());
        bytes[8] = u8::from(self.on);
        bytes[9] = u8::from(self.status_active);
        bytes[10..12].copy_from_slice(&self.status_phase.to_le_bytes());
        bytes
    }

    /// Decode a stored record
    ///
    /// Blobs of any other size are rejected outright, never partially read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        let bytes: &[u8; STATE_SIZE] =
            bytes.try_into().map_err(|_| StorageError::SizeMismatch {
                expected: STATE_SIZE,
                actual: bytes.len(),
            })?;

        let color = Hsb::new(u16::from_le_bytes([bytes[0], bytes[1]]), bytes[2], bytes[3]);
        let speed = bytes[4];
        let effect = EffectId::from_raw(bytes[5]).ok_or(StorageError::Malformed)?;
        if !color.is_valid() || !(SPEED_MIN..=SPEED_MAX).contains(&speed) {
            return Err(StorageError::Malformed);
        }

        Ok(Self {
            color,
            speed,
            effect,
            phase: u16::from_le_bytes([bytes[6], bytes[7]]),
            on: decode_flag(bytes[8])?,
            status_active: decode_flag(bytes[9])?,
            status_phase: u16::from_le_bytes([bytes[10], bytes[11]]),
        })
    }
}

fn decode_flag(byte: u8) -> Result<bool, StorageError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(StorageError::Malformed),
    }
}
