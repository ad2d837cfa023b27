//! Heater / humidifier control.
//!
//! [`Setpoints`] are the operator targets; [`thermostat::evaluate`] turns a
//! reading into a [`ControlState`] each cycle.

pub mod thermostat;

use serde::{Deserialize, Serialize};

pub use thermostat::evaluate;

/// Target temperature used when no setpoints are stored (°C).
pub const DEFAULT_TARGET_TEMPERATURE: f64 = 25.0;
/// Target humidity used when no setpoints are stored (%).
pub const DEFAULT_TARGET_HUMIDITY: f64 = 55.0;

/// Operator targets for the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setpoints {
    /// Target temperature (°C).
    pub temperature: f64,
    /// Target relative humidity (%).
    pub humidity: f64,
}

impl Default for Setpoints {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TARGET_TEMPERATURE,
            humidity: DEFAULT_TARGET_HUMIDITY,
        }
    }
}

impl Setpoints {
    pub const fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite()
    }
}

/// Desired actuator outputs for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub heater: bool,
    pub humidifier: bool,
}

impl ControlState {
    /// Both actuators off.
    pub fn all_off() -> Self {
        Self::default()
    }
}
