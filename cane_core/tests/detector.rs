mod common;

use std::time::Duration;

use cane_core::config::DetectorCfg;
use cane_core::detector::{FallDetector, FallPoll, FallState};
use cane_core::motion::{AccelSample, MotionSampler};
use common::{ManualClock, ScriptButton, SeqAccel, SpyHaptic};

fn sample(x: f32, y: f32, z: f32) -> AccelSample {
    AccelSample { x, y, z }
}

#[test]
fn baseline_is_always_the_previous_sample() {
    let mut det = FallDetector::new(DetectorCfg::default());
    let seq = [
        sample(0.0, 0.0, 1.0),
        sample(1.0, 1.0, 1.0),
        sample(0.5, -0.5, 2.0),
        sample(0.0, 0.0, 0.0),
    ];
    for s in &seq {
        det.observe(s);
        assert_eq!(det.prev_magnitude(), s.magnitude());
    }
}

#[test]
fn baseline_updates_even_when_threshold_crossed() {
    let mut det = FallDetector::new(DetectorCfg::default());
    // First sample crosses (delta vs the 0.0 initial baseline).
    assert!(det.observe(&sample(0.0, 0.0, 2.0)));
    assert_eq!(det.prev_magnitude(), 2.0);
    // Second identical sample: delta 0, baseline unchanged in value.
    assert!(!det.observe(&sample(0.0, 0.0, 2.0)));
    assert_eq!(det.prev_magnitude(), 2.0);
}

#[test]
fn trigger_is_strictly_greater_than_threshold() {
    let cfg = DetectorCfg {
        delta_threshold_g: 2.0,
        ..DetectorCfg::default()
    };
    let mut det = FallDetector::new(cfg.clone());
    // Exactly 2.0 from the 0.0 baseline: not a trigger.
    assert!(!det.observe(&sample(0.0, 0.0, 2.0)));

    let mut det = FallDetector::new(DetectorCfg {
        delta_threshold_g: 1.9999,
        ..cfg
    });
    assert!(det.observe(&sample(0.0, 0.0, 2.0)));
}

#[test]
fn spike_on_one_axis_crosses_from_steady_rest() {
    let mut det = FallDetector::new(DetectorCfg::default());
    det.observe(&sample(1.0, 1.0, 1.0)); // settle the baseline
    assert!(!det.observe(&sample(1.0, 1.0, 1.0)));
    // sqrt(11) - sqrt(3) ~ 1.58 > 1.2
    assert!(det.observe(&sample(1.0, 1.0, 3.0)));
    assert_eq!(det.prev_magnitude(), sample(1.0, 1.0, 3.0).magnitude());
}

#[test]
fn window_elapses_into_confirmed() {
    let clock = ManualClock::new();
    let mut det = FallDetector::new(DetectorCfg::default());
    let mut sampler = MotionSampler::new(SeqAccel::new([
        Some([0, 0, 16384]),
        Some([32767, 32767, 0]),
    ]));
    let mut haptic = SpyHaptic::new();
    let events = haptic.events_handle();
    let mut button = ScriptButton::released();

    // At rest: no trigger.
    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Quiet
    );
    // Spike: ack pulse, full window, confirmation.
    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Confirmed
    );
    assert_eq!(det.state(), FallState::Confirmed);
    // One acknowledgment pulse only.
    assert_eq!(events.borrow().as_slice(), &[true, false]);
    // 1 s ack + 100 x 0.1 s window.
    assert_eq!(clock.elapsed(), Duration::from_millis(11_000));
}

#[test]
fn cancel_mid_window_halts_immediately() {
    let clock = ManualClock::new();
    let mut det = FallDetector::new(DetectorCfg::default());
    let mut sampler = MotionSampler::new(SeqAccel::new([Some([32767, 32767, 0])]));
    let mut haptic = SpyHaptic::new();
    let events = haptic.events_handle();
    // Pressed at sub-interval 37 of 100 (index 36).
    let mut button = ScriptButton::pressed_from(36);

    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Canceled
    );
    assert_eq!(det.state(), FallState::Canceled);
    // Ack pulse plus the double-pulse cancellation acknowledgment.
    assert_eq!(
        events.borrow().as_slice(),
        &[true, false, true, false, true, false]
    );
    // 1 s ack + 36 x 0.1 s polls + (0.2 + 0.1 + 0.2) s double pulse.
    assert_eq!(clock.elapsed(), Duration::from_millis(1_000 + 3_600 + 500));
}

#[test]
fn cancel_at_first_sub_interval_skips_all_waiting() {
    let clock = ManualClock::new();
    let mut det = FallDetector::new(DetectorCfg::default());
    let mut sampler = MotionSampler::new(SeqAccel::new([Some([32767, 32767, 0])]));
    let mut haptic = SpyHaptic::new();
    let mut button = ScriptButton::new([true]);

    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Canceled
    );
    // No window sleeps at all: ack + double pulse only.
    assert_eq!(clock.elapsed(), Duration::from_millis(1_000 + 500));
}

#[test]
fn sensor_error_means_no_transition_and_stale_free_baseline() {
    let clock = ManualClock::new();
    let mut det = FallDetector::new(DetectorCfg::default());
    let mut sampler = MotionSampler::new(SeqAccel::new([
        Some([0, 0, 16384]),
        None, // injected read failure
        Some([0, 0, 16384]),
    ]));
    let mut haptic = SpyHaptic::new();
    let events = haptic.events_handle();
    let mut button = ScriptButton::released();

    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Quiet
    );
    let baseline = det.prev_magnitude();

    // Failed cycle: state unchanged, baseline untouched.
    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Quiet
    );
    assert_eq!(det.state(), FallState::Idle);
    assert_eq!(det.prev_magnitude(), baseline);

    // Recovery: identical sample, delta 0, still quiet.
    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Quiet
    );
    assert!(events.borrow().is_empty());
    assert_eq!(clock.elapsed(), Duration::ZERO);
}

#[test]
fn unreadable_cancel_button_cannot_cancel() {
    struct BrokenButton;
    impl cane_traits::Button for BrokenButton {
        fn is_pressed(
            &mut self,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Err("gpio glitch".into())
        }
    }

    let clock = ManualClock::new();
    let mut det = FallDetector::new(DetectorCfg::default());
    let mut sampler = MotionSampler::new(SeqAccel::new([Some([32767, 32767, 0])]));
    let mut haptic = SpyHaptic::new();
    let mut button = BrokenButton;

    assert_eq!(
        det.poll(&mut sampler, &mut haptic, &mut button, &clock),
        FallPoll::Confirmed
    );
}
