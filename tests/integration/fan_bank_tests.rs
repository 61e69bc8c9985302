//! FanBank against the recording mock: call counts, ordering, error stop.

use fancontrol::control::fans::FanBank;
use fancontrol::control::profile::ProfileLevel;
use fancontrol::error::ActuatorError;

use crate::mock_hw::{FanCall, MockFans};

fn level(l: u8) -> ProfileLevel {
    ProfileLevel::new(l).unwrap()
}

#[test]
fn apply_all_sets_each_fan_once_in_ascending_order() {
    let mut fans = MockFans::new(4);
    FanBank::new(&mut fans).apply_all(level(5)).unwrap();

    assert_eq!(fans.count_queries(), 1);
    assert_eq!(fans.sets(), vec![(1, 5), (2, 5), (3, 5), (4, 5)]);
}

#[test]
fn apply_all_with_no_fans_only_queries_the_count() {
    let mut fans = MockFans::new(0);
    FanBank::new(&mut fans).apply_all(level(2)).unwrap();
    assert_eq!(fans.calls, vec![FanCall::Count]);
}

#[test]
fn apply_all_stops_at_first_failure_without_rollback() {
    let mut fans = MockFans::new(4);
    fans.fail_set = Some((2, 3));

    let err = FanBank::new(&mut fans).apply_all(level(3)).unwrap_err();

    assert!(matches!(err, ActuatorError::SetLevel { fan: 2, level: 3, .. }));
    assert_eq!(fans.sets(), vec![(1, 3), (2, 3)]);
    // Fan 1 keeps its new level; fans 3 and 4 were never touched.
    assert_eq!(fans.final_levels(), vec![Some(3), Some(3), None, None]);
}

#[test]
fn apply_all_propagates_count_failure() {
    let mut fans = MockFans::new(3);
    fans.fail_count = true;
    let err = FanBank::new(&mut fans).apply_all(level(1)).unwrap_err();
    assert!(matches!(err, ActuatorError::FanCount(_)));
    assert!(fans.sets().is_empty());
}

#[test]
fn count_is_queried_live_every_time() {
    let mut fans = MockFans::new(2);
    {
        let mut bank = FanBank::new(&mut fans);
        assert_eq!(bank.count().unwrap(), 2);
    }
    fans.count = 3; // hot-plugged
    let mut bank = FanBank::new(&mut fans);
    assert_eq!(bank.count().unwrap(), 3);
    bank.apply_all(level(0)).unwrap();
    assert_eq!(fans.sets(), vec![(1, 0), (2, 0), (3, 0)]);
}

#[test]
fn read_all_rpm_returns_one_value_per_fan_in_order() {
    let mut fans = MockFans::new(3);
    let rpms = FanBank::new(&mut fans).read_all_rpm().unwrap();

    assert_eq!(rpms, vec![1100, 1200, 1300]);
    assert_eq!(
        fans.calls,
        vec![
            FanCall::Count,
            FanCall::ReadRpm { fan: 1 },
            FanCall::ReadRpm { fan: 2 },
            FanCall::ReadRpm { fan: 3 },
        ]
    );
}

#[test]
fn read_all_rpm_propagates_failure() {
    let mut fans = MockFans::new(2);
    fans.fail_rpm = true;
    let err = FanBank::new(&mut fans).read_all_rpm().unwrap_err();
    assert!(matches!(err, ActuatorError::ReadRpm { fan: 1, .. }));
}
