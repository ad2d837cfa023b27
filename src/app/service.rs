//! Controller service: the hexagonal core.
//!
//! [`ControllerService`] owns the setpoints and alarm limits loaded at
//! startup and runs one full cycle per [`tick`](ControllerService::tick).
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  ReadingSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!    DataLogPort ◀── │    ControllerService     │
//!   ActuatorPort ◀── │  thermostat · alarms     │ ──▶ CycleReport
//!                    └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::alarms::{self, AlarmLimits};
use crate::control::{self, Setpoints};
use crate::error::Result;

use super::events::{ControllerEvent, CycleReport};
use super::ports::{ActuatorPort, DataLogPort, EventSink, ReadingSource};

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

/// Per-cycle orchestration of read → log → control → alarms.
pub struct ControllerService {
    setpoints: Setpoints,
    limits: AlarmLimits,
    cycle_count: u64,
}

impl ControllerService {
    /// Construct the service.  Setpoints and limits are fixed for the
    /// lifetime of the service.
    pub fn new(setpoints: Setpoints, limits: AlarmLimits) -> Self {
        Self {
            setpoints,
            limits,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&ControllerEvent::Started(self.setpoints));
        info!(
            "ControllerService started (targets T={:.1}C H={:.1}%)",
            self.setpoints.temperature, self.setpoints.humidity
        );
    }

    /// Switch every actuator off and announce the stop.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&ControllerEvent::Stopped {
            cycles: self.cycle_count,
        });
        info!("ControllerService stopped after {} cycles", self.cycle_count);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: read → log → control → actuators → alarms.
    ///
    /// A failed log append is reported and the cycle carries on.  A sensor
    /// failure skips the cycle: actuators are switched off (no decision can
    /// be made without a reading) and the error is returned.
    pub fn tick(
        &mut self,
        source: &mut impl ReadingSource,
        log: &mut impl DataLogPort,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<CycleReport> {
        self.cycle_count += 1;

        // 1. Sample
        let reading = match source.sample() {
            Ok(r) => r,
            Err(e) => {
                warn!("Cycle {} skipped: {e}", self.cycle_count);
                hw.all_off();
                sink.emit(&ControllerEvent::SensorFault(e));
                return Err(e.into());
            }
        };

        // 2. Log
        let logged = match log.append(&reading) {
            Ok(()) => true,
            Err(e) => {
                warn!("Data log append failed: {e}");
                sink.emit(&ControllerEvent::LogWriteFailed(e));
                false
            }
        };

        // 3. Control
        let controls = control::evaluate(&self.setpoints, &reading);
        hw.apply(&controls);

        // 4. Alarms
        let alarms = alarms::evaluate(&self.limits, &reading);
        for event in alarms.active() {
            sink.emit(&ControllerEvent::AlarmActive(*event));
        }

        let report = CycleReport {
            cycle: self.cycle_count,
            reading,
            setpoints: self.setpoints,
            controls,
            alarms,
            logged,
        };
        sink.emit(&ControllerEvent::CycleCompleted(report));
        Ok(report)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn setpoints(&self) -> Setpoints {
        self.setpoints
    }

    pub fn limits(&self) -> AlarmLimits {
        self.limits
    }

    /// Cycles attempted since startup, including skipped ones.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
