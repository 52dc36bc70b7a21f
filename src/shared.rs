//! Controller shared between execution contexts.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::device::{BatterySource, ExtPower, IndicatorSource, SettingsStore, StripDriver};
use crate::underglow::Underglow;

/// Underglow controller behind a critical-section mutex
///
/// Suitable for a `static`: the controller is installed once at init and
/// every access runs with interrupts masked.
pub struct SharedUnderglow<S, P, St, Src, const N: usize>
where
    S: StripDriver,
    P: ExtPower,
    St: SettingsStore,
    Src: BatterySource + IndicatorSource,
{
    inner: Mutex<RefCell<Option<Underglow<S, P, St, Src, N>>>>,
}

impl<S, P, St, Src, const N: usize> SharedUnderglow<S, P, St, Src, N>
where
    S: StripDriver,
    P: ExtPower,
    St: SettingsStore,
    Src: BatterySource + IndicatorSource,
{
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Install the controller, returning the previous one
    pub fn init(
        &self,
        underglow: Underglow<S, P, St, Src, N>,
    ) -> Option<Underglow<S, P, St, Src, N>> {
        critical_section::with(|cs| self.inner.borrow(cs).replace(Some(underglow)))
    }

    /// Run `f` with exclusive access to the controller
    ///
    /// Returns `None` if no controller is installed yet.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Underglow<S, P, St, Src, N>) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut underglow = self.inner.borrow(cs).borrow_mut();
            underglow.as_mut().map(f)
        })
    }
}

impl<S, P, St, Src, const N: usize> Default for SharedUnderglow<S, P, St, Src, N>
where
    S: StripDriver,
    P: ExtPower,
    St: SettingsStore,
    Src: BatterySource + IndicatorSource,
{
    fn default() -> Self {
        Self::new()
    }
}
