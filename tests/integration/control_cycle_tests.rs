//! Integration tests for the sensor → ladder → fans pipeline and its
//! fail-safe branch.
//!
//! These run entirely against the recording mocks in `mock_hw`.

use fancontrol::app::events::{CycleEvent, Readings};
use fancontrol::app::service::{ControlCycle, CycleOutcome, FallbackStatus};
use fancontrol::control::profile::{ProfileLevel, ProfileTable};
use fancontrol::error::{ActuatorError, CycleError, SensorError};

use crate::mock_hw::{FanCall, MockFans, MockSensor, RecordingSink, SensorCall};

fn make_cycle() -> ControlCycle {
    ControlCycle::new(ProfileTable::new([40, 50, 60, 70, 75, 80, 85, 90]))
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn applies_level_from_system_temperature_to_every_fan() {
    let cycle = make_cycle();
    let mut sensor = MockSensor::reading(65, 88);
    let mut fans = MockFans::new(3);
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut sensor, &mut fans, &mut sink);

    let report = outcome.into_result().expect("cycle should apply");
    assert_eq!(report.level.get(), 3, "cpu temp must not drive the decision");
    assert_eq!(report.readings, Readings { cpu_c: 88, system_c: 65 });
    assert_eq!(report.rpms, Some(vec![1100, 1200, 1300]));
    assert_eq!(fans.sets(), vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(sensor.calls, vec![SensorCall::System, SensorCall::Cpu]);
}

#[test]
fn reports_profile_then_fan_speeds() {
    let cycle = make_cycle();
    let mut sink = RecordingSink::new();

    cycle.run(&mut MockSensor::reading(30, 41), &mut MockFans::new(2), &mut sink);

    assert_eq!(
        sink.events,
        vec![
            CycleEvent::ProfileApplied {
                readings: Readings { cpu_c: 41, system_c: 30 },
                level: ProfileLevel::MIN,
            },
            CycleEvent::FanSpeeds(vec![1100, 1200]),
        ]
    );
}

#[test]
fn hot_system_saturates_at_maximum() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    let outcome = cycle.run(&mut MockSensor::reading(200, 60), &mut fans, &mut RecordingSink::new());
    assert_eq!(outcome.level(), Some(ProfileLevel::MAX));
    assert_eq!(fans.sets(), vec![(1, 7), (2, 7)]);
}

#[test]
fn rpm_readout_failure_does_not_invalidate_the_cycle() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    fans.fail_rpm = true;
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut MockSensor::reading(55, 60), &mut fans, &mut sink);

    let report = outcome.into_result().expect("telemetry is best effort");
    assert_eq!(report.level.get(), 2);
    assert_eq!(report.rpms, None);
    assert_eq!(fans.sets(), vec![(1, 2), (2, 2)], "no fail-safe for telemetry");
    assert_eq!(sink.fail_safe_activations(), 0);
}

// ── Fail-safe path ────────────────────────────────────────────

#[test]
fn system_sensor_failure_forces_maximum_exactly_once() {
    let cycle = make_cycle();
    let mut sensor = MockSensor::failing_system();
    let mut fans = MockFans::new(3);
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut sensor, &mut fans, &mut sink);

    let failure = outcome.into_result().expect_err("cycle must fail");
    assert!(matches!(
        failure.error,
        CycleError::Sensor(SensorError::Unavailable { zone: "system", .. })
    ));
    assert_eq!(failure.fallback, FallbackStatus::Applied);
    // One apply_all(7): a single count query followed by one set per fan.
    assert_eq!(
        fans.calls,
        vec![
            FanCall::Count,
            FanCall::Set { fan: 1, level: 7 },
            FanCall::Set { fan: 2, level: 7 },
            FanCall::Set { fan: 3, level: 7 },
        ]
    );
    assert_eq!(sink.fail_safe_activations(), 1);
}

#[test]
fn cpu_sensor_failure_also_triggers_fail_safe() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut MockSensor::failing_cpu(45), &mut fans, &mut sink);

    let failure = outcome.into_result().expect_err("cpu read is part of the cycle");
    assert!(matches!(
        failure.error,
        CycleError::Sensor(SensorError::Unparsable { zone: "cpu", .. })
    ));
    assert_eq!(fans.sets(), vec![(1, 7), (2, 7)]);
}

#[test]
fn partial_apply_failure_reapplies_maximum_to_all_fans() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(3);
    fans.fail_set = Some((2, 3));
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut MockSensor::reading(65, 70), &mut fans, &mut sink);

    let failure = outcome.into_result().expect_err("fan 2 failed");
    assert!(matches!(
        failure.error,
        CycleError::Actuator(ActuatorError::SetLevel { fan: 2, level: 3, .. })
    ));
    assert_eq!(failure.fallback, FallbackStatus::Applied);
    assert_eq!(
        fans.sets(),
        vec![(1, 3), (2, 3), (1, 7), (2, 7), (3, 7)],
        "fan 1 set once at 3, fan 2 aborts, fail-safe covers 1..3"
    );
    assert_eq!(fans.final_levels(), vec![Some(7), Some(7), Some(7)]);
}

#[test]
fn failed_recovery_is_surfaced_not_swallowed() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    fans.fail_every_set = true;
    let mut sink = RecordingSink::new();

    let outcome = cycle.run(&mut MockSensor::reading(65, 70), &mut fans, &mut sink);

    let CycleOutcome::Failed(failure) = outcome else {
        panic!("expected failure");
    };
    assert!(failure.is_terminal());
    assert!(matches!(
        failure.error,
        CycleError::Actuator(ActuatorError::SetLevel { fan: 1, level: 3, .. })
    ));
    assert!(matches!(
        failure.fallback,
        FallbackStatus::Failed(ActuatorError::SetLevel { fan: 1, level: 7, .. })
    ));
    // No second recovery attempt.
    assert_eq!(fans.sets(), vec![(1, 3), (1, 7)]);
    assert!(matches!(
        sink.events.as_slice(),
        [
            CycleEvent::FailSafeActivated { .. },
            CycleEvent::FailSafeFailed { .. },
        ]
    ));
}

#[test]
fn count_failure_during_recovery_is_terminal() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    fans.fail_count = true;

    let outcome = cycle.run(&mut MockSensor::failing_system(), &mut fans, &mut RecordingSink::new());

    let CycleOutcome::Failed(failure) = outcome else {
        panic!("expected failure");
    };
    assert!(matches!(
        failure.fallback,
        FallbackStatus::Failed(ActuatorError::FanCount(_))
    ));
    assert!(failure.is_terminal());
    assert_eq!(CycleOutcome::Failed(failure).level(), None);
}

// ── Independence between cycles ───────────────────────────────

#[test]
fn cycles_carry_no_state_forward() {
    let cycle = make_cycle();
    let mut fans = MockFans::new(2);
    let mut sink = RecordingSink::new();

    let first = cycle.run(&mut MockSensor::failing_system(), &mut fans, &mut sink);
    assert!(!first.is_applied());

    let second = cycle.run(&mut MockSensor::reading(45, 50), &mut fans, &mut sink);
    assert_eq!(second.level().map(ProfileLevel::get), Some(1));
    assert_eq!(fans.final_levels(), vec![Some(1), Some(1)]);
}
