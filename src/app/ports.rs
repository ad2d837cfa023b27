//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, files, console) implement these
//! traits.  The [`ControllerService`](super::service::ControllerService)
//! consumes them via generics, so the domain core never touches hardware
//! or the filesystem directly.

use chrono::{DateTime, Local};

use crate::control::{ControlState, Setpoints};
use crate::error::SensorError;
use crate::sensors::Reading;

use super::events::{ControllerEvent, CycleReport};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A driver that can measure each quantity on demand.
pub trait EnvironmentSensor {
    /// Temperature in °C.
    fn temperature(&mut self) -> Result<f64, SensorError>;

    /// Relative humidity in %.
    fn humidity(&mut self) -> Result<f64, SensorError>;

    /// Barometric pressure in mbar.
    fn pressure(&mut self) -> Result<f64, SensorError>;
}

/// Read-side port: the domain calls this once per cycle.
pub trait ReadingSource {
    /// Take one timestamped sample of every quantity.
    fn sample(&mut self) -> Result<Reading, SensorError>;
}

impl<T: ReadingSource + ?Sized> ReadingSource for Box<T> {
    fn sample(&mut self) -> Result<Reading, SensorError> {
        (**self).sample()
    }
}

/// Wall-clock time source.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the actuators.
pub trait ActuatorPort {
    fn set_heater(&mut self, on: bool);

    fn set_humidifier(&mut self, on: bool);

    /// Apply a full control decision.
    fn apply(&mut self, state: &ControlState) {
        self.set_heater(state.heater);
        self.set_humidifier(state.humidifier);
    }

    /// Switch every actuator off for a safe shutdown.
    fn all_off(&mut self) {
        self.apply(&ControlState::all_off());
    }
}

// ───────────────────────────────────────────────────────────────
// Storage ports (driven adapter: domain ↔ files)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the operator setpoints.
pub trait SetpointPort {
    /// Stored setpoints, or the compiled-in defaults when nothing usable
    /// is stored.  Never fails.
    fn load(&self) -> Setpoints;

    /// Overwrite the stored setpoints in full.
    fn save(&self, setpoints: &Setpoints) -> Result<(), StorageError>;
}

/// Append-only reading log.
pub trait DataLogPort {
    /// Append one record.  The underlying handle is not held across calls.
    fn append(&mut self, reading: &Reading) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Presentation ports (driven adapter: domain → console / LEDs / logs)
// ───────────────────────────────────────────────────────────────

/// Renders the per-cycle report (console text, LED matrix, …).
pub trait DisplayPort {
    fn render(&mut self, report: &CycleReport);
}

/// The domain emits structured [`ControllerEvent`]s through this port.
/// Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &ControllerEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SetpointPort`] and [`DataLogPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The file does not exist.
    NotFound,
    /// Generic I/O error from the filesystem.
    Io(std::io::ErrorKind),
    /// Stored bytes failed the format / integrity check.
    Corrupted,
    /// A value was refused before being written.
    /// The `&'static str` describes which field and why.
    Rejected(&'static str),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            kind => Self::Io(kind),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "file not found"),
            Self::Io(kind) => write!(f, "I/O error ({})", kind),
            Self::Corrupted => write!(f, "record corrupted"),
            Self::Rejected(msg) => write!(f, "rejected: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}
