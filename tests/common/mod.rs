#![allow(dead_code)]

use embassy_time::Instant;
use underglow_composer::{
    BatterySource, ExtPower, HidIndicators, IndicatorSource, IoError, PeripheralBattery,
    ProfileStatus, Rgb, SettingsBlob, SettingsStore, StorageError, StripDriver, Transport,
    Underglow, UnderglowConfig, UsbConnState,
};

pub const LEDS: usize = 8;

pub type TestUnderglow = Underglow<MockStrip, MockExtPower, MockSettings, MockSource, LEDS>;

pub fn at(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

pub fn underglow(config: UnderglowConfig) -> TestUnderglow {
    underglow_with(config, MockSettings::default(), MockSource::default())
}

pub fn underglow_with(
    config: UnderglowConfig,
    settings: MockSettings,
    source: MockSource,
) -> TestUnderglow {
    Underglow::new(
        config,
        Some(MockStrip::default()),
        Some(MockExtPower::default()),
        settings,
        source,
    )
    .expect("valid config")
}

pub fn frames(underglow: &TestUnderglow) -> &[Vec<Rgb>] {
    &underglow.strip().expect("strip").frames
}

pub fn last_frame(underglow: &TestUnderglow) -> &[Rgb] {
    frames(underglow).last().expect("at least one frame")
}

pub fn power(underglow: &TestUnderglow) -> &MockExtPower {
    underglow.ext_power().expect("ext power")
}

/// Records every frame it is asked to write
#[derive(Debug, Default)]
pub struct MockStrip {
    pub frames: Vec<Vec<Rgb>>,
    pub fail: bool,
}

impl StripDriver for MockStrip {
    fn write(&mut self, colors: &[Rgb]) -> Result<(), IoError> {
        if self.fail {
            return Err(IoError(-5));
        }
        self.frames.push(colors.to_vec());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockExtPower {
    pub enabled: bool,
    pub enables: u32,
    pub disables: u32,
    pub fail_get: bool,
}

impl ExtPower for MockExtPower {
    fn get(&self) -> Result<bool, IoError> {
        if self.fail_get {
            return Err(IoError(-19));
        }
        Ok(self.enabled)
    }

    fn enable(&mut self) -> Result<(), IoError> {
        self.enabled = true;
        self.enables += 1;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), IoError> {
        self.enabled = false;
        self.disables += 1;
        Ok(())
    }
}

/// Single-slot store that remembers the last key and bytes written
#[derive(Debug, Default)]
pub struct MockSettings {
    pub stored: Option<(String, Vec<u8>)>,
    pub saves: u32,
    pub fail: bool,
}

impl MockSettings {
    pub fn with_blob(key: &str, bytes: &[u8]) -> Self {
        Self {
            stored: Some((key.to_string(), bytes.to_vec())),
            ..Self::default()
        }
    }
}

impl SettingsStore for MockSettings {
    fn load(&mut self, key: &str) -> Option<SettingsBlob> {
        let (stored_key, bytes) = self.stored.as_ref()?;
        if stored_key != key {
            return None;
        }
        SettingsBlob::from_slice(bytes).ok()
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::WriteFailed);
        }
        self.stored = Some((key.to_string(), bytes.to_vec()));
        self.saves += 1;
        Ok(())
    }
}

/// Keyboard state as seen by the overlay
#[derive(Debug, Clone)]
pub struct MockSource {
    pub battery: u8,
    pub peripheral: PeripheralBattery,
    pub hid: HidIndicators,
    /// Bit per active layer
    pub layers: u32,
    pub transport: Transport,
    pub preferred_active: bool,
    pub active_profile: u8,
    pub profiles: Vec<ProfileStatus>,
    pub usb: UsbConnState,
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            battery: 100,
            peripheral: PeripheralBattery::Absent,
            hid: HidIndicators::default(),
            layers: 0,
            transport: Transport::Usb,
            preferred_active: true,
            active_profile: 0,
            profiles: Vec::new(),
            usb: UsbConnState::Hid,
        }
    }
}

impl BatterySource for MockSource {
    fn state_of_charge(&self) -> u8 {
        self.battery
    }

    fn peripheral_battery(&self) -> PeripheralBattery {
        self.peripheral
    }
}

impl IndicatorSource for MockSource {
    fn hid_indicators(&self) -> HidIndicators {
        self.hid
    }

    fn layer_active(&self, layer: u8) -> bool {
        layer < 32 && self.layers & (1 << layer) != 0
    }

    fn selected_transport(&self) -> Transport {
        self.transport
    }

    fn preferred_transport_active(&self) -> bool {
        self.preferred_active
    }

    fn active_profile(&self) -> u8 {
        self.active_profile
    }

    #[allow(clippy::cast_possible_truncation)]
    fn profile_count(&self) -> u8 {
        self.profiles.len() as u8
    }

    fn profile_status(&self, profile: u8) -> ProfileStatus {
        self.profiles
            .get(usize::from(profile))
            .copied()
            .unwrap_or(ProfileStatus::Unused)
    }

    fn usb_state(&self) -> UsbConnState {
        self.usb
    }
}
