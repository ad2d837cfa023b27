//! Greenhouse controller library.
//!
//! Exposes the domain core and its adapters for the binary, integration
//! tests and fuzz targets.  The control loop itself lives in `main.rs`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarms;
pub mod app;
pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod sensors;
