//! End-to-end cycle tests for `ControllerService` against mock adapters.

use greenhouse::alarms::{AlarmKind, AlarmLimits};
use greenhouse::app::events::ControllerEvent;
use greenhouse::app::service::ControllerService;
use greenhouse::control::Setpoints;
use greenhouse::error::{Channel, Error, SensorError};

use crate::mock_hw::{
    ActuatorCall, MemoryLog, MockActuators, RecordingSink, ScriptedSource, reading,
};

fn service() -> ControllerService {
    ControllerService::new(Setpoints::default(), AlarmLimits::default())
}

#[test]
fn reading_at_target_turns_both_actuators_off() {
    let mut svc = service();
    let mut source = ScriptedSource::new([Ok(reading(25.0, 55.0, 1000.0))]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    let report = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();

    assert!(!report.controls.heater);
    assert!(!report.controls.humidifier);
    assert_eq!(
        hw.calls,
        vec![ActuatorCall::Heater(false), ActuatorCall::Humidifier(false)]
    );
    assert!(report.alarms.is_clear());
}

#[test]
fn cold_dry_reading_drives_heater_and_humidifier() {
    let mut svc = service();
    let mut source = ScriptedSource::new([Ok(reading(18.0, 40.0, 1000.0))]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();

    assert!(hw.heater_on());
    assert!(hw.humidifier_on());
}

#[test]
fn every_reading_is_logged_in_order() {
    let mut svc = service();
    let readings = [
        reading(20.0, 50.0, 1000.0),
        reading(21.0, 51.0, 1001.0),
        reading(22.0, 52.0, 1002.0),
    ];
    let mut source = ScriptedSource::new(readings.map(Ok));
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    for _ in 0..3 {
        let report = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
        assert!(report.logged);
    }
    assert_eq!(log.records, readings.to_vec());
    assert_eq!(svc.cycle_count(), 3);
}

#[test]
fn high_temperature_alarm_at_limit() {
    let mut svc = service();
    let mut source = ScriptedSource::new([Ok(reading(30.0, 50.0, 1000.0))]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    let report = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();

    assert_eq!(report.alarms.active_count(), 1);
    let alarm = report.alarms.get(AlarmKind::HighTemperature).unwrap();
    assert_eq!(alarm.value, 30.0);
    assert_eq!(
        sink.count(|e| matches!(e, ControllerEvent::AlarmActive(a) if a.kind == AlarmKind::HighTemperature)),
        1
    );
}

#[test]
fn alarms_clear_on_next_nominal_cycle() {
    let mut svc = service();
    let mut source = ScriptedSource::new([
        Ok(reading(35.0, 80.0, 1020.0)),
        Ok(reading(20.0, 50.0, 1000.0)),
    ]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    let first = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    assert_eq!(first.alarms.active_count(), 3);

    let second = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    assert!(second.alarms.is_clear());
    assert_eq!(sink.count(|e| matches!(e, ControllerEvent::AlarmActive(_))), 3);
}

#[test]
fn log_failure_is_reported_and_control_continues() {
    let mut svc = service();
    let mut source = ScriptedSource::new([Ok(reading(10.0, 30.0, 1000.0))]);
    let mut log = MemoryLog {
        fail: true,
        ..Default::default()
    };
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    let report = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();

    assert!(!report.logged);
    assert!(hw.heater_on());
    assert_eq!(sink.count(|e| matches!(e, ControllerEvent::LogWriteFailed(_))), 1);
    assert_eq!(sink.count(|e| matches!(e, ControllerEvent::CycleCompleted(_))), 1);
}

#[test]
fn sensor_fault_skips_cycle_then_recovers() {
    let fault = SensorError::Malformed {
        channel: Channel::Pressure,
    };
    let mut svc = service();
    let mut source = ScriptedSource::new([
        Ok(reading(18.0, 40.0, 1000.0)),
        Err(fault),
        Ok(reading(18.0, 40.0, 1000.0)),
    ]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    assert!(hw.heater_on());

    let err = svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap_err();
    assert_eq!(err, Error::Sensor(fault));
    assert!(!hw.heater_on());
    assert!(!hw.humidifier_on());
    assert_eq!(log.records.len(), 1);

    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    assert!(hw.heater_on());
    assert_eq!(svc.cycle_count(), 3);
    assert_eq!(log.records.len(), 2);
}

#[test]
fn start_and_shutdown_bracket_the_run() {
    let mut svc = ControllerService::new(Setpoints::new(22.0, 60.0), AlarmLimits::default());
    let mut source = ScriptedSource::new([Ok(reading(18.0, 40.0, 1000.0))]);
    let mut log = MemoryLog::default();
    let mut hw = MockActuators::new();
    let mut sink = RecordingSink::default();

    assert_eq!(svc.setpoints(), Setpoints::new(22.0, 60.0));
    assert_eq!(svc.limits(), AlarmLimits::default());

    svc.start(&mut sink);
    svc.tick(&mut source, &mut log, &mut hw, &mut sink).unwrap();
    svc.shutdown(&mut hw, &mut sink);

    assert!(matches!(
        sink.events.first(),
        Some(ControllerEvent::Started(s)) if *s == Setpoints::new(22.0, 60.0)
    ));
    assert!(matches!(
        sink.events.last(),
        Some(ControllerEvent::Stopped { cycles: 1 })
    ));
    assert!(!hw.heater_on());
    assert!(!hw.humidifier_on());
}
