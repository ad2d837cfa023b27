//! Controller configuration parameters
//!
//! All tunable parameters for the greenhouse controller.  Defaults mirror
//! the compiled-in constants of the reference controller; any field can be
//! overridden from a JSON file named by `GREENHOUSE_CONFIG`.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::alarms::AlarmLimits;
use crate::error::ConfigError;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "GREENHOUSE_CONFIG";

/// Half-open integer range `[low, high)` used by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRange {
    pub low: i32,
    pub high: i32,
}

impl SimRange {
    pub const fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Number of distinct integer values in the range.  Widened so any
    /// pair of `i32` bounds is representable.
    pub fn span(&self) -> i64 {
        i64::from(self.high) - i64::from(self.low)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= f64::from(self.low) && value < f64::from(self.high)
    }
}

/// Simulation bounds for each measured quantity.  Also used as the
/// full-scale range of the LED-matrix bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationBounds {
    /// Temperature (°C).
    pub temperature: SimRange,
    /// Relative humidity (%).
    pub humidity: SimRange,
    /// Barometric pressure (mbar).
    pub pressure: SimRange,
}

impl Default for SimulationBounds {
    fn default() -> Self {
        Self {
            temperature: SimRange::new(-10, 50),
            humidity: SimRange::new(0, 100),
            pressure: SimRange::new(975, 1016),
        }
    }
}

/// Linux IIO device directories for the sensor-backed reading source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Humidity + temperature chip (HTS221).
    pub humidity_device: PathBuf,
    /// Pressure chip (LPS25H).
    pub pressure_device: PathBuf,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            humidity_device: PathBuf::from("/sys/bus/iio/devices/iio:device0"),
            pressure_device: PathBuf::from("/sys/bus/iio/devices/iio:device1"),
        }
    }
}

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Name shown in the console header.
    pub operator_name: String,

    // --- Files ---
    /// Binary setpoint record.
    pub setpoint_path: PathBuf,
    /// Append-only reading log.
    pub log_path: PathBuf,

    // --- Timing ---
    /// Delay between cycles (milliseconds).
    pub update_interval_ms: u64,

    // --- Reading source ---
    /// Use the pseudo-random simulator instead of real sensors.  Defaults
    /// to `true` so the controller runs on hosts without a Sense HAT; set
    /// it to `false` on the Pi to read the IIO devices in `sensor`.
    pub simulate: bool,
    pub simulation: SimulationBounds,
    pub sensor: SensorConfig,

    // --- Alarms ---
    pub alarm_limits: AlarmLimits,

    // --- Presentation ---
    /// Draw the LED-matrix frame as ASCII after each console report.
    pub render_matrix: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            operator_name: String::from("Greenhouse"),

            setpoint_path: PathBuf::from("setpoints.dat"),
            log_path: PathBuf::from("ghdata.txt"),

            update_interval_ms: 2000,

            simulate: true,
            simulation: SimulationBounds::default(),
            sensor: SensorConfig::default(),

            alarm_limits: AlarmLimits::default(),

            render_matrix: true,
        }
    }
}

impl ControllerConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.operator_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "operator_name must not be empty",
            ));
        }
        if !(100..=3_600_000).contains(&self.update_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "update_interval_ms must be 100–3600000",
            ));
        }
        let bounds = &self.simulation;
        if bounds.temperature.span() <= 0 {
            return Err(ConfigError::ValidationFailed(
                "simulation.temperature high must be > low",
            ));
        }
        if bounds.humidity.span() <= 0 {
            return Err(ConfigError::ValidationFailed(
                "simulation.humidity high must be > low",
            ));
        }
        if bounds.pressure.span() <= 0 {
            return Err(ConfigError::ValidationFailed(
                "simulation.pressure high must be > low",
            ));
        }
        if !self.alarm_limits.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "alarm_limits must all be finite",
            ));
        }
        Ok(())
    }
}

/// Load and validate the config from `path`, or return defaults when
/// `path` is `None`.
pub fn load(path: Option<&Path>) -> Result<ControllerConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.kind()))?;
            let cfg: ControllerConfig =
                serde_json::from_str(&text).map_err(|_| ConfigError::Parse)?;
            info!("Config loaded from {}", path.display());
            cfg
        }
        None => {
            info!("No {CONFIG_ENV} set, using built-in defaults");
            ControllerConfig::default()
        }
    };

    config.validate()?;
    if config.alarm_limits.is_inverted() {
        warn!("Alarm limits are inverted (high < low); both alarms may fire at once");
    }
    Ok(config)
}

/// Load the config named by [`CONFIG_ENV`], if any.
pub fn load_from_env() -> Result<ControllerConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load(path.as_deref())
}
