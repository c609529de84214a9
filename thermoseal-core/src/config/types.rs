//! Configuration type definitions
//!
//! These types describe what gets committed, where, and how the commit is
//! triggered. Defaults are the factory calibration constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::record::{CalibrationRecord, FieldOverflow};
use crate::writer::DEFAULT_READY_POLL_LIMIT;

/// nRF52 UICR `CUSTOMER[0]` register
pub const UICR_CUSTOMER_0: u32 = 0x1000_1080;

/// Calibration values to commit
///
/// Field types bound the values to their storage type only; bit widths are
/// enforced when the record is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationParams {
    /// Temperature offset (8 bits)
    pub offset: u8,
    /// Operating mode (2 bits)
    pub mode: u8,
    /// Sensor status (2 bits)
    pub status: u8,
    /// Temperature setpoint (10 bits)
    pub setpoint: u16,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            offset: 0x0A,
            mode: 0x01,
            status: 0x00,
            setpoint: 0x2EE,
        }
    }
}

impl CalibrationParams {
    /// Build the record these parameters describe
    pub fn record(&self) -> Result<CalibrationRecord, FieldOverflow> {
        CalibrationRecord::new(self.offset, self.mode, self.status, self.setpoint)
    }
}

/// Target location inside the protected region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionConfig {
    /// Word address of the calibration record
    pub address: u32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            address: UICR_CUSTOMER_0,
        }
    }
}

/// Erase/program sequence tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WriterConfig {
    /// Maximum ready polls per phase before `HardwareTimeout`
    pub ready_poll_limit: u32,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            ready_poll_limit: DEFAULT_READY_POLL_LIMIT,
        }
    }
}

/// Commit button configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriggerConfig {
    /// Button reads low when pressed
    pub active_low: bool,
    /// Delay between button samples (ms)
    pub poll_interval_ms: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            active_low: true,
            poll_interval_ms: 10,
        }
    }
}

/// Startup LED greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GreetingConfig {
    /// Number of on/off cycles
    pub blinks: u8,
    /// Duration of each on and each off phase (ms)
    pub period_ms: u32,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            blinks: 2,
            period_ms: 200,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommitConfig {
    pub calibration: CalibrationParams,
    pub region: RegionConfig,
    pub writer: WriterConfig,
    pub trigger: TriggerConfig,
    pub greeting: GreetingConfig,
}
