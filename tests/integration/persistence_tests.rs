//! File-backed adapter tests: setpoint record and data log on disk.

use greenhouse::adapters::data_log::DataLogFile;
use greenhouse::adapters::setpoint_file::{RECORD_LEN, SetpointFile};
use greenhouse::alarms::AlarmLimits;
use greenhouse::app::ports::SetpointPort;
use greenhouse::app::service::ControllerService;
use greenhouse::control::Setpoints;

use crate::mock_hw::{MockActuators, RecordingSink, ScriptedSource, reading, scratch_dir};

#[test]
fn setpoints_survive_a_restart() {
    let path = scratch_dir("restart").join("setpoints.dat");

    SetpointFile::new(&path).save(&Setpoints::new(19.5, 65.0)).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), RECORD_LEN as u64);

    let reloaded = SetpointFile::new(&path).load();
    assert_eq!(reloaded, Setpoints::new(19.5, 65.0));
}

#[test]
fn zero_temperature_record_loads_defaults() {
    let store = SetpointFile::new(scratch_dir("zero").join("setpoints.dat"));
    store.save(&Setpoints::new(0.0, 5.0)).unwrap();
    assert_eq!(store.load(), Setpoints::new(25.0, 55.0));
}

#[test]
fn service_cycles_append_to_log_file() {
    let path = scratch_dir("cycles").join("ghdata.txt");
    let mut log = DataLogFile::new(&path);
    let mut svc = ControllerService::new(Setpoints::default(), AlarmLimits::default());
    let mut source = ScriptedSource::new([
        Ok(reading(21.55, 60.02, 1001.3)),
        Ok(reading(-5.0, 5.0, 985.0)),
    ]);
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Sat,Apr,10,08:15:03,2021, 21.6, 60.0,1001.3",
            "Sat,Apr,10,08:15:03,2021, -5.0,  5.0, 985.0",
        ]
    );
}

#[test]
fn missing_log_directory_does_not_stop_the_cycle() {
    let path = scratch_dir("nolog").join("missing").join("ghdata.txt");
    let mut log = DataLogFile::new(&path);
    let mut svc = ControllerService::new(Setpoints::default(), AlarmLimits::default());
    let mut source = ScriptedSource::new([Ok(reading(18.0, 40.0, 1000.0))]);
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    let report = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    assert!(!report.logged);
    assert!(hw.heater_on());
}
