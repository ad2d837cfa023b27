//! Outbound controller events and the per-cycle report.
//!
//! The [`ControllerService`](super::service::ControllerService) emits
//! [`ControllerEvent`]s through the [`EventSink`](super::ports::EventSink)
//! port and hands a [`CycleReport`] to the display after every cycle.

use crate::alarms::{AlarmEvent, AlarmSet};
use crate::control::{ControlState, Setpoints};
use crate::error::SensorError;
use crate::app::ports::StorageError;
use crate::sensors::Reading;

/// Everything the presentation layer needs for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle counter.
    pub cycle: u64,
    pub reading: Reading,
    pub setpoints: Setpoints,
    pub controls: ControlState,
    pub alarms: AlarmSet,
    /// Whether the reading reached the data log.
    pub logged: bool,
}

/// Structured events emitted by the controller core.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The service has started (carries the effective setpoints).
    Started(Setpoints),

    /// A cycle finished.
    CycleCompleted(CycleReport),

    /// An alarm slot is filled for this cycle.
    AlarmActive(AlarmEvent),

    /// The data log could not be appended to.
    LogWriteFailed(StorageError),

    /// The reading source failed; the cycle was skipped.
    SensorFault(SensorError),

    /// The service switched everything off and stopped.
    Stopped { cycles: u64 },
}
