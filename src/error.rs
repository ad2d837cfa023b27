//! Unified error types for the greenhouse controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! driver loop's error handling uniform.  All variants are `Copy` so they
//! can be handed to the event sink and logged without allocation.

use core::fmt;
use std::io::ErrorKind;

use crate::app::ports::StorageError;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// The setpoint store or data log could not be accessed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// The measured quantity a sensor error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Temperature,
    Humidity,
    Pressure,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Humidity => write!(f, "humidity"),
            Self::Pressure => write!(f, "pressure"),
        }
    }
}

/// Sensor failures.  Never coerced into a zero reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The channel does not exist on this host (driver not bound).
    Unavailable { channel: Channel },
    /// The channel exists but reading it failed.
    Io { channel: Channel, kind: ErrorKind },
    /// The channel returned text that is not a finite number.
    Malformed { channel: Channel },
}

impl SensorError {
    /// The quantity that failed.
    pub fn channel(&self) -> Channel {
        match self {
            Self::Unavailable { channel }
            | Self::Io { channel, .. }
            | Self::Malformed { channel } => *channel,
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { channel } => write!(f, "{channel} channel unavailable"),
            Self::Io { channel, kind } => write!(f, "{channel} read failed ({kind})"),
            Self::Malformed { channel } => write!(f, "{channel} value malformed"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors (type lives with the port traits)
// ---------------------------------------------------------------------------

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(ErrorKind),
    /// The config file is not valid JSON for [`ControllerConfig`](crate::config::ControllerConfig).
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "config file unreadable ({kind})"),
            Self::Parse => write!(f, "config file is not valid JSON"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
