//! Greenhouse Controller: Main Entry Point
//!
//! Hexagonal architecture with a single sequential control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ReadingSampler    DataLogFile    SetpointFile   SystemClock   │
//! │  (Sim / IIO)       (DataLog)      (Setpoints)    (Clock)       │
//! │  LoggedActuators   LogEventSink   ConsoleDisplay               │
//! │  (Actuators)       (EventSink)    (Display)                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ControllerService (pure logic)               │    │
//! │  │  Thermostat · Alarms                                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  tokio current-thread loop · SIGINT / SIGTERM shutdown         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{error, info, warn};
use tokio::signal::unix::{SignalKind, signal};

use greenhouse::adapters::actuators::LoggedActuators;
use greenhouse::adapters::clock::SystemClock;
use greenhouse::adapters::console::ConsoleDisplay;
use greenhouse::adapters::data_log::DataLogFile;
use greenhouse::adapters::device_id::{self, CPUINFO_PATH};
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::setpoint_file::SetpointFile;
use greenhouse::app::commands::{AppCommand, USAGE};
use greenhouse::app::ports::{DisplayPort, ReadingSource, SetpointPort};
use greenhouse::app::service::ControllerService;
use greenhouse::config::{self, ControllerConfig};
use greenhouse::sensors::iio::IioSensor;
use greenhouse::sensors::simulated::SimulatedSensor;
use greenhouse::sensors::ReadingSampler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ── 2. Arguments + config ─────────────────────────────────
    let command = match AppCommand::parse(std::env::args().skip(1)) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{USAGE}");
            bail!("{e}");
        }
    };
    let config = config::load_from_env().context("invalid configuration")?;
    let store = SetpointFile::new(&config.setpoint_path);

    match command {
        AppCommand::SetTargets(setpoints) => {
            store
                .save(&setpoints)
                .with_context(|| format!("cannot write {}", store.path().display()))?;
            println!(
                "Targets saved: T={:.1}C H={:.1}%",
                setpoints.temperature, setpoints.humidity
            );
            Ok(())
        }
        AppCommand::ShowTargets => {
            let setpoints = store.load();
            println!(
                "Targets\t\tT:{:5.0}C\tH:{:5.0}%",
                setpoints.temperature, setpoints.humidity
            );
            Ok(())
        }
        AppCommand::Run => run(&config, &store).await,
    }
}

/// Build the reading source the config asks for.
fn reading_source(config: &ControllerConfig) -> Result<Box<dyn ReadingSource>> {
    if config.simulate {
        info!("Reading source: simulator");
        let sensor = SimulatedSensor::seeded_from_clock(config.simulation);
        Ok(Box::new(ReadingSampler::new(sensor, SystemClock::new())))
    } else {
        info!(
            "Reading source: IIO ({}, {})",
            config.sensor.humidity_device.display(),
            config.sensor.pressure_device.display()
        );
        let mut sensor = IioSensor::new(&config.sensor);
        sensor.probe().context("sensor probe failed")?;
        Ok(Box::new(ReadingSampler::new(sensor, SystemClock::new())))
    }
}

async fn run(config: &ControllerConfig, store: &SetpointFile) -> Result<()> {
    info!("Greenhouse controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 3. Console header + device identity ───────────────────
    let mut display = ConsoleDisplay::new(std::io::stdout(), config.simulation, config.render_matrix);
    display.render_header(&config.operator_name);

    match device_id::read_serial(Path::new(CPUINFO_PATH)) {
        Ok(serial) => info!("Device serial: {}", serial),
        Err(e) => warn!("Device serial unavailable: {}", e),
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let setpoints = store.load();
    let mut source = reading_source(config)?;
    let mut data_log = DataLogFile::new(&config.log_path);
    let mut actuators = LoggedActuators::new();
    let mut sink = LogEventSink::new();

    let mut service = ControllerService::new(setpoints, config.alarm_limits);
    service.start(&mut sink);

    // ── 5. Shutdown signals ───────────────────────────────────
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut sigterm = signal(SignalKind::terminate()).context("cannot install SIGTERM handler")?;

    let interval = Duration::from_millis(config.update_interval_ms);
    info!("System ready. Entering control loop ({} ms).", config.update_interval_ms);

    // ── 6. Control loop ───────────────────────────────────────
    let exit_reason: &str;
    loop {
        match service.tick(&mut source, &mut data_log, &mut actuators, &mut sink) {
            Ok(report) => display.render(&report),
            Err(e) => error!("Cycle {} failed: {}", service.cycle_count(), e),
        }

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!("SIGINT listener failed: {}", e);
                }
                exit_reason = "SIGINT";
                break;
            }
            _ = sigterm.recv() => {
                exit_reason = "SIGTERM";
                break;
            }
        }
    }

    // ── 7. Safe shutdown ──────────────────────────────────────
    info!("{} received, switching actuators off", exit_reason);
    service.shutdown(&mut actuators, &mut sink);
    Ok(())
}
