//! Alarm evaluation.
//!
//! [`evaluate`] runs **every cycle after the reading is taken** and
//! produces a fresh [`AlarmSet`]: one slot per [`AlarmKind`], filled when
//! the reading is at or beyond the matching limit.
//!
//! ## Alarm lifecycle
//!
//! There is none beyond a single cycle.  Every call starts from an empty
//! set, so an alarm is active exactly while the latest reading is out of
//! range; no latching, hysteresis, or acknowledgement.
//!
//! High and low checks for the same quantity are independent.  With
//! inverted limits (`high < low`) both slots can fire for one reading;
//! keeping the limits ordered is the caller's responsibility.

use core::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::sensors::Reading;

/// Static alarm thresholds.  All comparisons are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmLimits {
    /// Alarm when temperature (°C) is at or above this.
    pub high_temperature: f64,
    /// Alarm when temperature (°C) is at or below this.
    pub low_temperature: f64,
    /// Alarm when humidity (%) is at or above this.
    pub high_humidity: f64,
    /// Alarm when humidity (%) is at or below this.
    pub low_humidity: f64,
    /// Alarm when pressure (mbar) is at or above this.
    pub high_pressure: f64,
    /// Alarm when pressure (mbar) is at or below this.
    pub low_pressure: f64,
}

impl Default for AlarmLimits {
    fn default() -> Self {
        Self {
            high_temperature: 30.0,
            low_temperature: 10.0,
            high_humidity: 70.0,
            low_humidity: 25.0,
            high_pressure: 1016.0,
            low_pressure: 985.0,
        }
    }
}

impl AlarmLimits {
    pub fn is_finite(&self) -> bool {
        [
            self.high_temperature,
            self.low_temperature,
            self.high_humidity,
            self.low_humidity,
            self.high_pressure,
            self.low_pressure,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// True if any high limit sits below its low limit.
    pub fn is_inverted(&self) -> bool {
        self.high_temperature < self.low_temperature
            || self.high_humidity < self.low_humidity
            || self.high_pressure < self.low_pressure
    }
}

/// The six alarm conditions.  Discriminants are slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmKind {
    HighTemperature = 0,
    LowTemperature = 1,
    HighHumidity = 2,
    LowHumidity = 3,
    HighPressure = 4,
    LowPressure = 5,
}

impl AlarmKind {
    pub const COUNT: usize = 6;

    /// Every kind, in slot order.
    pub const ALL: [AlarmKind; Self::COUNT] = [
        Self::HighTemperature,
        Self::LowTemperature,
        Self::HighHumidity,
        Self::LowHumidity,
        Self::HighPressure,
        Self::LowPressure,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Operator-facing name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighTemperature => "High Temperature",
            Self::LowTemperature => "Low Temperature",
            Self::HighHumidity => "High Humidity",
            Self::LowHumidity => "Low Humidity",
            Self::HighPressure => "High Pressure",
            Self::LowPressure => "Low Pressure",
        }
    }
}

impl fmt::Display for AlarmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One active alarm: which limit, when, and the offending value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmEvent {
    pub kind: AlarmKind,
    pub timestamp: DateTime<Local>,
    pub value: f64,
}

/// Fixed-size alarm container keyed by [`AlarmKind`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlarmSet {
    slots: [Option<AlarmEvent>; AlarmKind::COUNT],
}

impl AlarmSet {
    /// All slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: AlarmKind) -> Option<&AlarmEvent> {
        self.slots[kind.index()].as_ref()
    }

    pub fn is_active(&self, kind: AlarmKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Active alarms in slot order.
    pub fn active(&self) -> impl Iterator<Item = &AlarmEvent> {
        self.slots.iter().flatten()
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True when no alarm is active.
    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn raise(&mut self, kind: AlarmKind, reading: &Reading, value: f64) {
        self.slots[kind.index()] = Some(AlarmEvent {
            kind,
            timestamp: reading.timestamp,
            value,
        });
    }
}

/// Evaluate every limit against one reading.
pub fn evaluate(limits: &AlarmLimits, reading: &Reading) -> AlarmSet {
    let mut set = AlarmSet::new();

    // ── Temperature ───────────────────────────────────────────
    if reading.temperature >= limits.high_temperature {
        set.raise(AlarmKind::HighTemperature, reading, reading.temperature);
    }
    if reading.temperature <= limits.low_temperature {
        set.raise(AlarmKind::LowTemperature, reading, reading.temperature);
    }

    // ── Humidity ──────────────────────────────────────────────
    if reading.humidity >= limits.high_humidity {
        set.raise(AlarmKind::HighHumidity, reading, reading.humidity);
    }
    if reading.humidity <= limits.low_humidity {
        set.raise(AlarmKind::LowHumidity, reading, reading.humidity);
    }

    // ── Pressure ──────────────────────────────────────────────
    if reading.pressure >= limits.high_pressure {
        set.raise(AlarmKind::HighPressure, reading, reading.pressure);
    }
    if reading.pressure <= limits.low_pressure {
        set.raise(AlarmKind::LowPressure, reading, reading.pressure);
    }

    set
}
