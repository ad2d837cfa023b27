//! Heater / humidifier relay adapter.
//!
//! The reference hardware has no relay board; the actuators are virtual
//! and their state changes are reported through the log.  A GPIO-backed
//! adapter would implement the same [`ActuatorPort`].

use log::info;

use crate::app::ports::ActuatorPort;
use crate::control::ControlState;

/// Actuator adapter that tracks state and logs every transition.
#[derive(Debug, Default)]
pub struct LoggedActuators {
    state: ControlState,
}

impl LoggedActuators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current output state.
    pub fn state(&self) -> ControlState {
        self.state
    }
}

impl ActuatorPort for LoggedActuators {
    fn set_heater(&mut self, on: bool) {
        if self.state.heater != on {
            info!("HEATER | {} -> {}", on_off(self.state.heater), on_off(on));
        }
        self.state.heater = on;
    }

    fn set_humidifier(&mut self, on: bool) {
        if self.state.humidifier != on {
            info!("HUMIDIFIER | {} -> {}", on_off(self.state.humidifier), on_off(on));
        }
        self.state.humidifier = on;
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
