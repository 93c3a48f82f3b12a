use std::time::Duration;

use cane_hardware::error::HwError;
use cane_hardware::util::wait_for_level;
use rstest::rstest;

#[rstest]
#[case(true)]
#[case(false)]
fn returns_immediately_when_level_already_matches(#[case] target: bool) {
    let r = wait_for_level(
        move || target,
        target,
        Duration::from_millis(5),
        Duration::from_micros(100),
    );
    assert!(r.is_ok());
}

#[test]
fn reaches_target_after_some_polls() {
    let mut n = 0;
    let r = wait_for_level(
        move || {
            n += 1;
            n >= 3
        },
        true,
        Duration::from_millis(100),
        Duration::from_micros(50),
    );
    assert!(r.is_ok());
}

#[test]
fn times_out_when_level_never_changes() {
    let r = wait_for_level(
        || false,
        true,
        Duration::from_millis(5),
        Duration::from_micros(100),
    );
    assert!(matches!(r, Err(HwError::EchoTimeout)));
}
