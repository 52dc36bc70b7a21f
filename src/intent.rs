//! Intent queue for commands and events from other contexts.
//!
//! Interrupt handlers and other tasks push into the [`IntentChannel`]; the
//! context that owns the controller drains it with [`IntentProcessor`].

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

use crate::command::UnderglowCommand;
use crate::device::{
    BatterySource, ExtPower, IndicatorSource, SettingsStore, StripDriver, UnderglowEvent,
};
use crate::log::log;
use crate::underglow::Underglow;

/// Something the controller should act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderglowIntent {
    Command(UnderglowCommand),
    Event(UnderglowEvent),
}

impl From<UnderglowCommand> for UnderglowIntent {
    fn from(command: UnderglowCommand) -> Self {
        Self::Command(command)
    }
}

impl From<UnderglowEvent> for UnderglowIntent {
    fn from(event: UnderglowEvent) -> Self {
        Self::Event(event)
    }
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError(pub UnderglowIntent);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, interrupt safe intent queue.
///
/// Backed by a fixed-size `heapless::Deque` behind a critical section.
pub struct IntentChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<UnderglowIntent, SIZE>>>,
}

impl<const SIZE: usize> IntentChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle. Multiple senders can coexist.
    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { channel: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { channel: self }
    }

    /// Try to queue an intent.
    ///
    /// Returns the intent back if the channel is full.
    pub fn try_send(&self, intent: UnderglowIntent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<UnderglowIntent, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const SIZE: usize> Default for IntentChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    pub fn try_send(&self, intent: impl Into<UnderglowIntent>) -> Result<(), TrySendError> {
        self.channel.try_send(intent.into())
    }
}

/// Receiving half of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<UnderglowIntent, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Applies queued intents to the controller
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply all pending intents (non-blocking)
    ///
    /// A failing intent is logged and skipped. Returns the number of intents
    /// taken from the channel.
    pub fn process_pending<S, P, St, Src, const N: usize>(
        &mut self,
        underglow: &mut Underglow<S, P, St, Src, N>,
        now: Instant,
    ) -> usize
    where
        S: StripDriver,
        P: ExtPower,
        St: SettingsStore,
        Src: BatterySource + IndicatorSource,
    {
        let mut processed = 0;

        while let Ok(intent) = self.intents.try_receive() {
            processed += 1;
            let result = match intent {
                UnderglowIntent::Command(command) => underglow.execute(command, now),
                UnderglowIntent::Event(event) => underglow.handle_event(event, now),
            };
            if let Err(err) = result {
                log!("[IntentProcessor.process_pending] dropped {:?}: {}", intent, err);
            }
        }

        processed
    }
}
