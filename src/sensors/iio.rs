//! Linux IIO (sysfs) environment sensor.
//!
//! The Sense HAT's HTS221 (humidity + temperature) and LPS25H (pressure)
//! are exposed by the kernel under `/sys/bus/iio/devices/iio:deviceN`.
//! Each channel is either a processed `<chan>_input` attribute or a
//! `<chan>_raw` value with optional `_offset` and `_scale`:
//!
//! ```text
//! value = (raw + offset) * scale
//! ```
//!
//! IIO units are m°C for temperature, m%RH for humidity and kPa for
//! pressure; they are converted to °C, %RH and mbar.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::app::ports::EnvironmentSensor;
use crate::config::SensorConfig;
use crate::error::{Channel, SensorError};

const TEMP_CHANNEL: &str = "in_temp";
const HUMIDITY_CHANNEL: &str = "in_humidityrelative";
const PRESSURE_CHANNEL: &str = "in_pressure";

const MILLI: f64 = 1000.0;
const KPA_TO_MBAR: f64 = 10.0;

pub struct IioSensor {
    humidity_dev: PathBuf,
    pressure_dev: PathBuf,
}

impl IioSensor {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            humidity_dev: config.humidity_device.clone(),
            pressure_dev: config.pressure_device.clone(),
        }
    }

    /// Read every channel once.  Used at startup so a missing driver is a
    /// startup fault rather than a failure on every cycle.
    pub fn probe(&mut self) -> Result<(), SensorError> {
        let t = self.temperature()?;
        let h = self.humidity()?;
        let p = self.pressure()?;
        info!(
            "IIO sensors ready: T={:.1}C H={:.1}% P={:.1}mB",
            t, h, p
        );
        Ok(())
    }
}

impl EnvironmentSensor for IioSensor {
    fn temperature(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.humidity_dev, TEMP_CHANNEL, Channel::Temperature).map(|v| v / MILLI)
    }

    fn humidity(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.humidity_dev, HUMIDITY_CHANNEL, Channel::Humidity).map(|v| v / MILLI)
    }

    fn pressure(&mut self) -> Result<f64, SensorError> {
        read_channel(&self.pressure_dev, PRESSURE_CHANNEL, Channel::Pressure)
            .map(|v| v * KPA_TO_MBAR)
    }
}

/// Read one channel in IIO units, preferring the processed attribute.
fn read_channel(dir: &Path, prefix: &str, channel: Channel) -> Result<f64, SensorError> {
    if let Some(value) = read_attr(dir, &format!("{prefix}_input"), channel)? {
        return Ok(value);
    }

    let raw = read_attr(dir, &format!("{prefix}_raw"), channel)?
        .ok_or(SensorError::Unavailable { channel })?;
    let offset = read_attr(dir, &format!("{prefix}_offset"), channel)?.unwrap_or(0.0);
    let scale = read_attr(dir, &format!("{prefix}_scale"), channel)?.unwrap_or(1.0);

    debug!("IIO {prefix}: raw={raw} offset={offset} scale={scale}");
    Ok((raw + offset) * scale)
}

/// `Ok(None)` when the attribute does not exist.
fn read_attr(dir: &Path, name: &str, channel: Channel) -> Result<Option<f64>, SensorError> {
    match std::fs::read_to_string(dir.join(name)) {
        Ok(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(SensorError::Malformed { channel }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SensorError::Io {
            channel,
            kind: e.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "greenhouse-iio-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("hts221")).unwrap();
        std::fs::create_dir_all(dir.join("lps25h")).unwrap();
        dir
    }

    fn sensor_at(dir: &Path) -> IioSensor {
        IioSensor::new(&SensorConfig {
            humidity_device: dir.join("hts221"),
            pressure_device: dir.join("lps25h"),
        })
    }

    fn put(dir: &Path, dev: &str, attr: &str, value: &str) {
        std::fs::write(dir.join(dev).join(attr), value).unwrap();
    }

    #[test]
    fn raw_offset_scale_conversion() {
        let dir = scratch("raw");
        put(&dir, "hts221", "in_temp_raw", "-1200\n");
        put(&dir, "hts221", "in_temp_offset", "12000");
        put(&dir, "hts221", "in_temp_scale", "2.0");
        put(&dir, "hts221", "in_humidityrelative_raw", "5000");
        put(&dir, "hts221", "in_humidityrelative_scale", "10.0");
        put(&dir, "lps25h", "in_pressure_raw", "4100000");
        put(&dir, "lps25h", "in_pressure_scale", "0.000024414");

        let mut s = sensor_at(&dir);
        assert!((s.temperature().unwrap() - 21.6).abs() < 1e-9);
        assert!((s.humidity().unwrap() - 50.0).abs() < 1e-9);
        assert!((s.pressure().unwrap() - 1000.97).abs() < 0.01);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn processed_input_wins_over_raw() {
        let dir = scratch("input");
        put(&dir, "hts221", "in_temp_input", "23450");
        put(&dir, "hts221", "in_temp_raw", "garbage");
        let mut s = sensor_at(&dir);
        assert!((s.temperature().unwrap() - 23.45).abs() < 1e-9);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_channel_is_unavailable_not_zero() {
        let dir = scratch("missing");
        let mut s = sensor_at(&dir);
        assert_eq!(
            s.pressure(),
            Err(SensorError::Unavailable {
                channel: Channel::Pressure
            })
        );
        assert!(s.probe().is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_value_is_reported() {
        let dir = scratch("malformed");
        put(&dir, "hts221", "in_humidityrelative_raw", "n/a");
        let mut s = sensor_at(&dir);
        assert_eq!(
            s.humidity(),
            Err(SensorError::Malformed {
                channel: Channel::Humidity
            })
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
