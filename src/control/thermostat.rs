//! Bang-bang thermostat / humidistat.
//!
//! Each actuator is on while its measurement is strictly below target.
//! There is no hysteresis band, so a reading hovering at the setpoint
//! toggles the actuator from cycle to cycle.

use super::{ControlState, Setpoints};
use crate::sensors::Reading;

/// Compute actuator states for one reading.
pub fn evaluate(target: &Setpoints, reading: &Reading) -> ControlState {
    ControlState {
        heater: reading.temperature < target.temperature,
        humidifier: reading.humidity < target.humidity,
    }
}
