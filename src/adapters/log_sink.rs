//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! `log` facade (stderr through `env_logger` in the binary).  A future
//! MQTT adapter would implement the same trait.

use log::{debug, info, warn};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::Started(setpoints) => {
                info!(
                    "START | targets T={:.1}\u{00b0}C H={:.1}%",
                    setpoints.temperature, setpoints.humidity
                );
            }
            ControllerEvent::CycleCompleted(report) => {
                debug!(
                    "CYCLE | #{} | T={:.1}\u{00b0}C H={:.1}% P={:.1}mB | heater={} humidifier={} | \
                     alarms={} logged={}",
                    report.cycle,
                    report.reading.temperature,
                    report.reading.humidity,
                    report.reading.pressure,
                    u8::from(report.controls.heater),
                    u8::from(report.controls.humidifier),
                    report.alarms.active_count(),
                    report.logged,
                );
            }
            ControllerEvent::AlarmActive(alarm) => {
                warn!("ALARM | {} = {:.1}", alarm.kind, alarm.value);
            }
            ControllerEvent::LogWriteFailed(e) => {
                warn!("DATALOG | append failed: {}", e);
            }
            ControllerEvent::SensorFault(e) => {
                warn!("SENSOR | {}; cycle skipped, actuators off", e);
            }
            ControllerEvent::Stopped { cycles } => {
                info!("STOP | after {} cycles, actuators off", cycles);
            }
        }
    }
}
