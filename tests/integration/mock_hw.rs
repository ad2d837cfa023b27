//! Mock adapters for integration tests.
//!
//! Records every actuator call and controller event so tests can assert
//! on the full history without touching real relays or files.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use greenhouse::app::events::ControllerEvent;
use greenhouse::app::ports::{ActuatorPort, DataLogPort, EventSink, ReadingSource, StorageError};
use greenhouse::error::SensorError;
use greenhouse::sensors::Reading;

/// Fixed instant used by scripted readings.
pub fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2021, 4, 10, hour, minute, second).unwrap()
}

pub fn reading(temperature: f64, humidity: f64, pressure: f64) -> Reading {
    Reading {
        timestamp: at(8, 15, 3),
        temperature,
        humidity,
        pressure,
    }
}

/// Fresh per-test scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "greenhouse-it-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ── Scripted reading source ───────────────────────────────────

/// Replays a queue of results; an empty queue reports the temperature
/// channel as unavailable.
pub struct ScriptedSource {
    pub queue: VecDeque<Result<Reading, SensorError>>,
}

impl ScriptedSource {
    pub fn new(items: impl IntoIterator<Item = Result<Reading, SensorError>>) -> Self {
        Self {
            queue: items.into_iter().collect(),
        }
    }
}

impl ReadingSource for ScriptedSource {
    fn sample(&mut self) -> Result<Reading, SensorError> {
        self.queue.pop_front().unwrap_or(Err(SensorError::Unavailable {
            channel: greenhouse::error::Channel::Temperature,
        }))
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Heater(bool),
    Humidifier(bool),
}

#[derive(Default)]
pub struct MockActuators {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heater_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Heater(on) => Some(*on),
                ActuatorCall::Humidifier(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn humidifier_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Humidifier(on) => Some(*on),
                ActuatorCall::Heater(_) => None,
            })
            .unwrap_or(false)
    }
}

impl ActuatorPort for MockActuators {
    fn set_heater(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Heater(on));
    }

    fn set_humidifier(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Humidifier(on));
    }
}

// ── Data log ──────────────────────────────────────────────────

/// In-memory log; `fail` makes every append report an I/O error.
#[derive(Default)]
pub struct MemoryLog {
    pub records: Vec<Reading>,
    pub fail: bool,
}

impl DataLogPort for MemoryLog {
    fn append(&mut self, reading: &Reading) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Io(std::io::ErrorKind::PermissionDenied));
        }
        self.records.push(*reading);
        Ok(())
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ControllerEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&ControllerEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ControllerEvent) {
        self.events.push(event.clone());
    }
}
