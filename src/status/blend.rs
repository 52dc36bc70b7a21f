//! Fade timeline of the status overlay
//!
//! The overlay phase counts ticks since activation. The blend factor ramps
//! up over [`FADE_IN`], holds until [`HOLD_UNTIL`], then ramps down over
//! [`FADE_OUT`]. After [`OVERLAY_DURATION`] the overlay switches itself off.

use embassy_time::Duration;

use crate::scheduler::TICK_PERIOD;

/// Blend factor at which only the status buffer is visible
pub const BLEND_MAX: u16 = 256;

pub const FADE_IN: Duration = Duration::from_millis(500);
pub const HOLD_UNTIL: Duration = Duration::from_millis(8000);
pub const FADE_OUT: Duration = Duration::from_millis(2000);
pub const OVERLAY_DURATION: Duration = Duration::from_millis(10_000);

pub const FADE_IN_TICKS: u16 = ticks(FADE_IN);
pub const HOLD_UNTIL_TICKS: u16 = ticks(HOLD_UNTIL);
pub const FADE_OUT_TICKS: u16 = ticks(FADE_OUT);
pub const OVERLAY_TICKS: u16 = ticks(OVERLAY_DURATION);

/// Number of whole ticks in `duration`
#[allow(clippy::cast_possible_truncation)]
pub const fn ticks(duration: Duration) -> u16 {
    (duration.as_millis() / TICK_PERIOD.as_millis()) as u16
}

/// Status buffer weight (0-256) at overlay phase `step`
#[allow(clippy::cast_possible_truncation)]
pub const fn blend_factor(step: u16) -> u16 {
    let max = BLEND_MAX as u32;
    if step < FADE_IN_TICKS {
        return (step as u32 * max / FADE_IN_TICKS as u32) as u16;
    }
    if step > HOLD_UNTIL_TICKS {
        let faded = (step - HOLD_UNTIL_TICKS) as u32 * max / FADE_OUT_TICKS as u32;
        if faded >= max {
            return 0;
        }
        return (max - faded) as u16;
    }
    BLEND_MAX
}

/// Whether the overlay has run its full course at phase `step`
pub const fn overlay_expired(step: u16) -> bool {
    step > OVERLAY_TICKS
}
