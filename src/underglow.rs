use embassy_time::Instant;

use crate::color::{BLACK, BRT_MAX, HUE_MAX, Hsb, Rgb, SAT_MAX};
use crate::command::UnderglowCommand;
use crate::compositor::{CRITICAL_BATTERY, Compositor};
use crate::config::UnderglowConfig;
use crate::device::{
    ActivityState, BatterySource, ExtPower, IndicatorSource, SettingsStore, StripDriver,
    UnderglowEvent,
};
use crate::effect::{EffectFrame, EffectId};
use crate::error::{StorageError, UnderglowError};
use crate::log::log;
use crate::scheduler::{PeriodicTimer, PollResult, SaveDebouncer, TICK_PERIOD};
use crate::state::{SETTINGS_KEY, SPEED_MAX, SPEED_MIN, UnderglowState};
use crate::status::{FADE_IN_TICKS, StatusOverlay, overlay_expired};
use crate::work::{Work, WorkQueue};

/// Which automatic switch-off a transition comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoOff {
    Idle,
    Usb,
}

/// Underglow controller - owns the state and drives the frame pipeline
///
/// All mutation goes through `&mut self`: the periodic work runs inside
/// [`Underglow::poll`] and commands run synchronously on the caller. Wrap the
/// controller in [`crate::SharedUnderglow`] when several contexts need it.
pub struct Underglow<S, P, St, Src, const N: usize>
where
    S: StripDriver,
    P: ExtPower,
    St: SettingsStore,
    Src: BatterySource + IndicatorSource,
{
    // External dependencies and configuration
    strip: Option<S>,
    ext_power: Option<P>,
    settings: St,
    source: Src,
    config: UnderglowConfig,

    // Internal state
    state: UnderglowState,
    ambient: [Rgb; N],
    tick_timer: PeriodicTimer,
    status_timer: PeriodicTimer,
    saver: SaveDebouncer,
    work: WorkQueue<2>,
    idle_prev_on: bool,
    usb_prev_on: bool,

    // Internal dependencies
    overlay: StatusOverlay<N>,
    compositor: Compositor<N>,
}

impl<S, P, St, Src, const N: usize> Underglow<S, P, St, Src, N>
where
    S: StripDriver,
    P: ExtPower,
    St: SettingsStore,
    Src: BatterySource + IndicatorSource,
{
    /// Create a new controller
    ///
    /// `strip` is `None` on boards without an underglow strip; every command
    /// then fails with [`UnderglowError::DeviceUnavailable`]. `ext_power` is
    /// `None` when the strip is always powered.
    pub fn new(
        mut config: UnderglowConfig,
        strip: Option<S>,
        ext_power: Option<P>,
        settings: St,
        source: Src,
    ) -> Result<Self, UnderglowError> {
        config.validate()?;

        let overlay = StatusOverlay::new(config.indicators.take(), config.brightness);
        Ok(Self {
            strip,
            ext_power,
            settings,
            source,
            state: UnderglowState::from_config(&config),
            ambient: [BLACK; N],
            tick_timer: PeriodicTimer::new(TICK_PERIOD),
            status_timer: PeriodicTimer::new(TICK_PERIOD),
            saver: SaveDebouncer::new(config.save_debounce),
            work: WorkQueue::new(),
            idle_prev_on: false,
            usb_prev_on: false,
            overlay,
            compositor: Compositor::new(),
            config,
        })
    }

    /// Load persisted state and start animating if on
    ///
    /// A missing or unusable stored state is logged and the configured
    /// defaults are kept.
    pub fn start(&mut self, now: Instant) {
        if let Err(err) = self.load_settings() {
            log!("[Underglow.start] keeping default state: {}", err);
        }

        if self.config.auto_off_usb {
            self.state.on = self.source.usb_state().is_powered();
        }

        if self.state.on && self.strip.is_some() {
            self.tick_timer.start(now);
        }
        self.sync_ext_power();
    }

    /// Replace the state with the stored record
    ///
    /// On error the current state is left untouched. The status overlay is
    /// transient and never restored.
    pub fn load_settings(&mut self) -> Result<(), StorageError> {
        let blob = self
            .settings
            .load(SETTINGS_KEY)
            .ok_or(StorageError::Missing)?;
        let mut state = UnderglowState::from_bytes(&blob)?;
        state.status_active = false;
        state.status_phase = 0;
        self.state = state;
        Ok(())
    }

    /// Run all work that is due at `now`
    ///
    /// Call this at least every [`TICK_PERIOD`] while anything is running;
    /// the result tells when the next deadline is.
    pub fn poll(&mut self, now: Instant) -> PollResult {
        if self.tick_timer.poll(now) && self.state.on {
            self.work.submit(Work::Tick);
        }
        if self.status_timer.poll(now) {
            self.status_update();
        }

        while let Some(work) = self.work.pop() {
            match work {
                Work::Tick => self.tick(),
                Work::StatusFrame => {
                    self.write_pixels();
                    if !self.state.status_active {
                        self.sync_ext_power();
                    }
                }
            }
        }

        if self.saver.poll(now) {
            self.persist();
        }

        PollResult::new(
            now,
            &[
                self.tick_timer.deadline(),
                self.status_timer.deadline(),
                self.saver.deadline(),
            ],
        )
    }

    /// Execute a keymap command
    pub fn execute(
        &mut self,
        command: UnderglowCommand,
        now: Instant,
    ) -> Result<(), UnderglowError> {
        match command {
            UnderglowCommand::On => self.turn_on(now),
            UnderglowCommand::Off => self.turn_off(now),
            UnderglowCommand::Toggle => self.toggle(now),
            UnderglowCommand::SelectEffect(effect) => self.select_effect(effect, now),
            UnderglowCommand::CycleEffect(direction) => self.cycle_effect(direction, now),
            UnderglowCommand::SetColor(color) => self.set_color(color),
            UnderglowCommand::ChangeHue(direction) => self.change_hue(direction, now),
            UnderglowCommand::ChangeSat(direction) => self.change_sat(direction, now),
            UnderglowCommand::ChangeBrt(direction) => self.change_brt(direction, now),
            UnderglowCommand::ChangeSpeed(direction) => self.change_speed(direction, now),
            UnderglowCommand::ShowStatus => self.show_status(now),
        }
    }

    /// React to an activity or USB transition
    ///
    /// Transitions for a disabled auto-off source are ignored.
    pub fn handle_event(
        &mut self,
        event: UnderglowEvent,
        now: Instant,
    ) -> Result<(), UnderglowError> {
        match event {
            UnderglowEvent::Activity(activity) if self.config.auto_off_idle => {
                self.auto_state(AutoOff::Idle, activity == ActivityState::Active, now)
            }
            UnderglowEvent::UsbConnChanged(usb) if self.config.auto_off_usb => {
                self.auto_state(AutoOff::Usb, usb.is_powered(), now)
            }
            UnderglowEvent::Activity(_) | UnderglowEvent::UsbConnChanged(_) => Ok(()),
        }
    }

    pub fn get_on_off_state(&self) -> Result<bool, UnderglowError> {
        self.require_strip()?;
        Ok(self.state.on)
    }

    pub fn turn_on(&mut self, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;

        self.state.on = true;
        self.sync_ext_power();

        self.state.phase = 0;
        self.tick_timer.start(now);

        self.save_state(now);
        Ok(())
    }

    pub fn turn_off(&mut self, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;

        self.tick_timer.stop();
        self.state.on = false;

        self.ambient.fill(BLACK);
        self.write_pixels();
        self.sync_ext_power();

        self.save_state(now);
        Ok(())
    }

    pub fn toggle(&mut self, now: Instant) -> Result<(), UnderglowError> {
        if self.state.on {
            self.turn_off(now)
        } else {
            self.turn_on(now)
        }
    }

    /// Effect `direction` steps from the current one
    pub fn calc_effect(&self, direction: i8) -> EffectId {
        self.state.effect.cycle(direction)
    }

    /// Select an effect by raw id
    pub fn select_effect(&mut self, effect: u8, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;
        let effect = EffectId::from_raw(effect).ok_or(UnderglowError::InvalidArgument)?;

        self.state.effect = effect;
        self.state.phase = 0;

        self.save_state(now);
        Ok(())
    }

    pub fn cycle_effect(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.select_effect(self.calc_effect(direction).raw(), now)
    }

    /// Adopt a new base color
    ///
    /// Each component may equal but not exceed its maximum. Not persisted
    /// by itself.
    pub fn set_color(&mut self, color: Hsb) -> Result<(), UnderglowError> {
        self.require_strip()?;
        if !color.is_valid() {
            return Err(UnderglowError::InvalidArgument);
        }

        self.state.color = color;
        Ok(())
    }

    /// Color with the hue moved `direction` steps, wrapping around the circle
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn calc_hue(&self, direction: i8) -> Hsb {
        let mut color = self.state.color;
        let step = i32::from(direction) * i32::from(self.config.steps.hue);
        color.h = (i32::from(color.h) + step).rem_euclid(i32::from(HUE_MAX)) as u16;
        color
    }

    /// Color with the saturation moved `direction` steps, clamped to 0-100
    pub fn calc_sat(&self, direction: i8) -> Hsb {
        let mut color = self.state.color;
        color.s = step_percent(color.s, direction, self.config.steps.saturation, SAT_MAX);
        color
    }

    /// Color with the brightness moved `direction` steps, clamped to 0-100
    pub fn calc_brt(&self, direction: i8) -> Hsb {
        let mut color = self.state.color;
        color.b = step_percent(color.b, direction, self.config.steps.brightness, BRT_MAX);
        color
    }

    pub fn change_hue(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;
        self.state.color = self.calc_hue(direction);
        self.save_state(now);
        Ok(())
    }

    pub fn change_sat(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;
        self.state.color = self.calc_sat(direction);
        self.save_state(now);
        Ok(())
    }

    pub fn change_brt(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;
        self.state.color = self.calc_brt(direction);
        self.save_state(now);
        Ok(())
    }

    /// Move the animation speed, clamped to 1-5
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn change_speed(&mut self, direction: i8, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;

        if self.state.speed == SPEED_MIN && direction < 0 {
            return Ok(());
        }

        let speed = i16::from(self.state.speed) + i16::from(direction);
        self.state.speed = speed.clamp(i16::from(SPEED_MIN), i16::from(SPEED_MAX)) as u8;

        self.save_state(now);
        Ok(())
    }

    /// Show the status overlay
    ///
    /// A repeated trigger during the overlay keeps it fully visible: the
    /// phase is rewound to the end of the fade-in, never back to zero.
    pub fn show_status(&mut self, now: Instant) -> Result<(), UnderglowError> {
        self.require_strip()?;

        if !self.state.status_active {
            self.state.status_phase = 0;
        } else if self.state.status_phase > FADE_IN_TICKS {
            self.state.status_phase = FADE_IN_TICKS;
        }
        self.state.status_active = true;

        self.sync_ext_power();
        self.write_pixels();

        self.status_timer.start(now);
        Ok(())
    }

    pub const fn state(&self) -> &UnderglowState {
        &self.state
    }

    pub const fn config(&self) -> &UnderglowConfig {
        &self.config
    }

    /// Last ambient frame
    pub const fn ambient(&self) -> &[Rgb; N] {
        &self.ambient
    }

    pub const fn overlay(&self) -> &StatusOverlay<N> {
        &self.overlay
    }

    pub const fn strip(&self) -> Option<&S> {
        self.strip.as_ref()
    }

    pub fn strip_mut(&mut self) -> Option<&mut S> {
        self.strip.as_mut()
    }

    pub const fn ext_power(&self) -> Option<&P> {
        self.ext_power.as_ref()
    }

    pub const fn settings(&self) -> &St {
        &self.settings
    }

    pub const fn source(&self) -> &Src {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.source
    }

    /// Whether a settings write is pending
    pub const fn is_save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    fn require_strip(&self) -> Result<(), UnderglowError> {
        if self.strip.is_none() {
            return Err(UnderglowError::DeviceUnavailable);
        }
        Ok(())
    }

    fn save_state(&mut self, now: Instant) {
        self.saver.schedule(now);
    }

    fn persist(&mut self) {
        let bytes = self.state.to_bytes();
        if let Err(err) = self.settings.save(SETTINGS_KEY, &bytes) {
            log!("[Underglow.persist] failed to save state: {}", err);
        }
    }

    fn auto_state(
        &mut self,
        source: AutoOff,
        active: bool,
        now: Instant,
    ) -> Result<(), UnderglowError> {
        if self.state.on == active {
            return Ok(());
        }

        let prev_on = match source {
            AutoOff::Idle => &mut self.idle_prev_on,
            AutoOff::Usb => &mut self.usb_prev_on,
        };

        if active {
            if core::mem::take(prev_on) {
                return self.turn_on(now);
            }
            Ok(())
        } else {
            *prev_on = true;
            self.turn_off(now)
        }
    }

    fn status_update(&mut self) {
        if !self.state.status_active {
            self.status_timer.stop();
            return;
        }

        self.state.status_phase = self.state.status_phase.saturating_add(1);
        if overlay_expired(self.state.status_phase) {
            self.state.status_active = false;
            self.status_timer.stop();
        }

        self.work.submit(Work::StatusFrame);
    }

    fn tick(&mut self) {
        let frame = EffectFrame {
            color: self.state.color,
            speed: self.state.speed,
            phase: self.state.phase,
            brightness: self.config.brightness,
        };
        self.state.phase = self.state.effect.render(&frame, &mut self.ambient);

        self.write_pixels();
    }

    /// Compose and transmit one frame
    ///
    /// A failed transmission only loses this frame.
    fn write_pixels(&mut self) {
        let battery = self.source.state_of_charge();
        let blend = if self.state.status_active {
            self.overlay.render(&self.source, self.state.status_phase)
        } else {
            0
        };

        let composition =
            self.compositor
                .compose(&mut self.ambient, self.overlay.pixels(), blend, battery);
        let battery_critical = composition.battery_critical;

        if let Some(strip) = self.strip.as_mut() {
            if let Err(err) = strip.write(composition.frame) {
                log!("[Underglow.write_pixels] failed to update the strip: {}", err);
            }
        }

        if battery_critical {
            self.battery_cutoff();
        }
    }

    /// Switch off when the battery is critical and nothing but the ambient
    /// effect keeps the strip powered
    ///
    /// Clearing `on` is the latch: the cutoff cannot fire again until an
    /// explicit `turn_on`. A rail that cannot be read counts as powered here.
    fn battery_cutoff(&mut self) {
        if !self.state.on || self.state.status_active {
            return;
        }
        if !self.ext_power_enabled().unwrap_or(true) {
            return;
        }

        log!("[Underglow.battery_cutoff] battery critical, switching off");
        self.state.on = false;
        self.tick_timer.stop();
        self.sync_ext_power();
    }

    /// Current rail state, `None` if it cannot be read
    ///
    /// A strip without a power switch is always powered.
    fn ext_power_enabled(&self) -> Option<bool> {
        let Some(power) = self.ext_power.as_ref() else {
            return Some(true);
        };
        match power.get() {
            Ok(enabled) => Some(enabled),
            Err(err) => {
                log!("[Underglow.ext_power_enabled] unable to read ext power: {}", err);
                None
            }
        }
    }

    /// Enable or disable the external power rail to match the state
    ///
    /// The rail is left alone on boards without a strip. A rail that cannot
    /// be read counts as off.
    fn sync_ext_power(&mut self) {
        if self.ext_power.is_none() || self.strip.is_none() {
            return;
        }

        let mut desired = self.state.on || self.state.status_active;
        if self.state.on
            && !self.state.status_active
            && self.source.state_of_charge() < CRITICAL_BATTERY
        {
            desired = false;
        }
        let current = self.ext_power_enabled().unwrap_or(false);

        let Some(power) = self.ext_power.as_mut() else {
            return;
        };
        if desired && !current {
            if let Err(err) = power.enable() {
                log!("[Underglow.sync_ext_power] unable to enable ext power: {}", err);
            }
        } else if !desired && current {
            if let Err(err) = power.disable() {
                log!("[Underglow.sync_ext_power] unable to disable ext power: {}", err);
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_percent(value: u8, direction: i8, step: u8, max: u8) -> u8 {
    let value = i16::from(value) + i16::from(direction) * i16::from(step);
    value.clamp(0, i16::from(max)) as u8
}
