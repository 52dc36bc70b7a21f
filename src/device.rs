//! Interfaces to the hardware and firmware services around the underglow.
//!
//! Implement these traits to support different boards. The controller is
//! generic over all of them.

use heapless::Vec;

use crate::color::Rgb;
use crate::error::{IoError, StorageError};

/// Largest settings blob a store may hand back
///
/// Larger than the state record so that a mismatched blob can still be
/// reported with its real size.
pub const SETTINGS_BLOB_CAPACITY: usize = 32;

/// Raw bytes loaded from a settings store
pub type SettingsBlob = Vec<u8, SETTINGS_BLOB_CAPACITY>;

/// Abstract LED strip driver
pub trait StripDriver {
    /// Transmit one frame to the strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), IoError>;
}

/// Switch for the strip's external power rail
pub trait ExtPower {
    /// Whether the rail is currently enabled
    fn get(&self) -> Result<bool, IoError>;

    fn enable(&mut self) -> Result<(), IoError>;

    fn disable(&mut self) -> Result<(), IoError>;
}

/// Persistent key/value settings storage
pub trait SettingsStore {
    /// Load the blob stored under `key`
    fn load(&mut self, key: &str) -> Option<SettingsBlob>;

    /// Store `bytes` under `key`
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Battery level of a split keyboard's peripheral half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralBattery {
    /// The board has no peripheral link
    Absent,
    /// Level in percent
    Level(u8),
    /// The peripheral is not connected
    NotConnected,
    /// Reading failed for another reason
    Unavailable,
}

/// Fuel gauge readings
pub trait BatterySource {
    /// Local state of charge in percent (0-100)
    fn state_of_charge(&self) -> u8;

    fn peripheral_battery(&self) -> PeripheralBattery {
        PeripheralBattery::Absent
    }
}

/// Host keyboard lock LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidIndicators(pub u8);

impl HidIndicators {
    pub const NUM_LOCK: u8 = 1 << 0;
    pub const CAPS_LOCK: u8 = 1 << 1;
    pub const SCROLL_LOCK: u8 = 1 << 2;

    pub const fn num_lock(self) -> bool {
        self.0 & Self::NUM_LOCK != 0
    }

    pub const fn caps_lock(self) -> bool {
        self.0 & Self::CAPS_LOCK != 0
    }

    pub const fn scroll_lock(self) -> bool {
        self.0 & Self::SCROLL_LOCK != 0
    }
}

/// Output transport the keyboard sends reports over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transport {
    Usb,
    Ble,
}

/// Connection status of a BLE profile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileStatus {
    Unused,
    Paired,
    Connected,
}

/// USB connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbConnState {
    /// Cable not present
    None,
    /// Powered, but not enumerated as HID
    Powered,
    /// Enumerated as HID device
    Hid,
}

impl UsbConnState {
    pub const fn is_powered(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Live readings the status overlay is built from
pub trait IndicatorSource {
    fn hid_indicators(&self) -> HidIndicators;

    /// Whether keymap layer `layer` is active
    fn layer_active(&self, layer: u8) -> bool;

    /// Transport currently selected for output
    fn selected_transport(&self) -> Transport;

    /// Whether the preferred transport is the one in use
    fn preferred_transport_active(&self) -> bool;

    /// Index of the active BLE profile
    fn active_profile(&self) -> u8;

    /// Number of BLE profile slots
    fn profile_count(&self) -> u8;

    fn profile_status(&self, profile: u8) -> ProfileStatus;

    fn usb_state(&self) -> UsbConnState;
}

/// Device activity reported by the input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityState {
    Active,
    Idle,
    Sleep,
}

/// Notifications the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderglowEvent {
    /// Activity state transition
    Activity(ActivityState),
    /// USB connection state transition
    UsbConnChanged(UsbConnState),
}
