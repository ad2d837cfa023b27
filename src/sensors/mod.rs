//! Sensor subsystem: drivers and the timestamping [`ReadingSampler`].
//!
//! A driver implements [`EnvironmentSensor`] (one call per quantity); the
//! sampler pairs it with a [`Clock`] and produces one [`Reading`] per cycle.

pub mod iio;
pub mod simulated;

use chrono::{DateTime, Local};
use log::debug;

use crate::app::ports::{Clock, EnvironmentSensor, ReadingSource};
use crate::error::SensorError;

/// One timestamped sample of every measured quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Wall-clock time the sample was taken.
    pub timestamp: DateTime<Local>,
    /// Air temperature (°C).
    pub temperature: f64,
    /// Relative humidity (%).
    pub humidity: f64,
    /// Barometric pressure (mbar).
    pub pressure: f64,
}

/// Reads a sensor driver and stamps each sample with wall-clock time.
///
/// Timestamps never go backwards: if the clock steps back (NTP slew,
/// manual change) the previous timestamp is reused.
pub struct ReadingSampler<S, C> {
    sensor: S,
    clock: C,
    last: Option<DateTime<Local>>,
}

impl<S, C> ReadingSampler<S, C> {
    pub fn new(sensor: S, clock: C) -> Self {
        Self {
            sensor,
            clock,
            last: None,
        }
    }
}

impl<S: EnvironmentSensor, C: Clock> ReadingSource for ReadingSampler<S, C> {
    fn sample(&mut self) -> Result<Reading, SensorError> {
        let now = self.clock.now();
        let timestamp = match self.last {
            Some(prev) if now < prev => {
                debug!("Clock stepped back ({now} < {prev}); reusing previous timestamp");
                prev
            }
            _ => now,
        };

        let temperature = self.sensor.temperature()?;
        let humidity = self.sensor.humidity()?;
        let pressure = self.sensor.pressure()?;

        self.last = Some(timestamp);
        Ok(Reading {
            timestamp,
            temperature,
            humidity,
            pressure,
        })
    }
}
