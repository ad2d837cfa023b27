//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the control and alarm evaluators into a per-cycle
//! service.  All interaction with sensors, actuators and files happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
