//! Edge case tests for filters, coordinate mapping, and the controller

mod test_helpers;

use casual_touch::{
    actions::{Action, ScreenSize},
    filters::create_filter,
    gesture::{GestureConfig, GestureController, GestureKind},
    landmarks::{FingerState, Landmark, Point},
    utils::{interp, safe_cast::f64_to_pixel_clamp},
};
use std::time::{Duration, Instant};
use test_helpers::{hand, pose};

#[test]
fn test_filter_extreme_values() {
    for name in ["none", "exponential"] {
        let mut filter = create_filter(name, 4.0).unwrap();

        let extreme_values = vec![
            (f64::INFINITY, f64::NEG_INFINITY),
            (f64::MAX, f64::MIN),
            (1e100, -1e100),
            (0.0, 0.0),
        ];

        // Must not panic; NaN/inf are allowed to propagate
        for (x, y) in extreme_values {
            let _ = filter.apply(x, y);
        }

        filter.reset();
        assert_eq!(filter.current(), (0.0, 0.0), "{name}");
    }
}

#[test]
fn test_smoothing_factor_one_follows_target() {
    let mut filter = create_filter("exponential", 1.0).unwrap();
    assert_eq!(filter.apply(123.0, -45.0), (123.0, -45.0));
    assert_eq!(filter.apply(7.0, 8.0), (7.0, 8.0));
}

#[test]
fn test_tip_outside_active_region_goes_off_screen() {
    let config = GestureConfig {
        cursor_filter: "none".to_string(),
        mirror_x: false,
        ..GestureConfig::default()
    };
    let mut ctrl = GestureController::new(config, ScreenSize::new(1920, 1080)).unwrap();
    let t0 = Instant::now();
    let fingers = FingerState::from_bits([0, 1, 0, 0, 0]);

    ctrl.process_gesture(fingers, Point::new(20, 20), Point::new(0, 0), t0);
    let actions = ctrl.process_gesture(fingers, Point::new(20, 20), Point::new(0, 0), t0 + Duration::from_secs(1));
    match actions.as_slice() {
        [Action::MoveCursor { x, y }] => {
            assert!(*x < 0.0 && *y < 0.0);
            // The X11 sink clamps onto the screen
            assert_eq!(f64_to_pixel_clamp(*x, 1920), 0);
            assert_eq!(f64_to_pixel_clamp(*y, 1080), 0);
        }
        other => panic!("expected one move, got {other:?}"),
    }
}

#[test]
fn test_interp_degenerate_range() {
    assert_eq!(interp(5.0, (3.0, 3.0), (0.0, 100.0)), 0.0);
}

#[test]
fn test_screen_resize_applies_to_next_move() {
    let config = GestureConfig {
        cursor_filter: "none".to_string(),
        mirror_x: false,
        ..GestureConfig::default()
    };
    let mut ctrl = GestureController::new(config, ScreenSize::new(1920, 1080)).unwrap();
    ctrl.set_screen_size(ScreenSize::new(1280, 720));

    let t0 = Instant::now();
    let fingers = FingerState::from_bits([0, 1, 0, 0, 0]);
    ctrl.process_gesture(fingers, Point::new(320, 240), Point::new(0, 0), t0);
    let actions = ctrl.process_gesture(fingers, Point::new(320, 240), Point::new(0, 0), t0 + Duration::from_secs(1));
    assert_eq!(actions, vec![Action::MoveCursor { x: 640.0, y: 360.0 }]);
}

#[test]
fn test_duplicate_landmark_ids() {
    let mut ctrl = GestureController::new(GestureConfig::default(), ScreenSize::new(1920, 1080)).unwrap();
    let t0 = Instant::now();

    // 21 entries but id 12 is missing: treated as no hand
    let mut landmarks = pose([0, 1, 1, 1, 1]);
    landmarks[12] = Landmark::new(11, 0, 0);
    assert!(ctrl.process_frame(&landmarks, t0).is_empty());
    assert!(GestureKind::ALL.iter().all(|kind| !ctrl.record(*kind).is_active()));
}

#[test]
fn test_time_going_backwards_does_not_fire() {
    let mut ctrl = GestureController::new(GestureConfig::default(), ScreenSize::new(1920, 1080)).unwrap();
    let t0 = Instant::now() + Duration::from_secs(10);

    ctrl.process_frame(&pose([0, 1, 1, 1, 1]), t0);
    assert!(ctrl.process_frame(&pose([0, 1, 1, 1, 1]), t0 - Duration::from_secs(5)).is_empty());
    assert!(ctrl.record(GestureKind::RightClick).is_active());
}

#[test]
fn test_identical_tips_click() {
    let mut ctrl = GestureController::new(GestureConfig::default(), ScreenSize::new(1920, 1080)).unwrap();
    let t0 = Instant::now();
    let landmarks = hand([0, 1, 1, 0, 0], (300, 200), (300, 200));

    assert!(ctrl.process_frame(&landmarks, t0).is_empty());
    assert_eq!(ctrl.process_frame(&landmarks, t0 + Duration::from_millis(500)), vec![Action::Click]);
}

#[test]
fn test_reset_leaves_dead_time() {
    let mut ctrl = GestureController::new(GestureConfig::default(), ScreenSize::new(1920, 1080)).unwrap();
    let t0 = Instant::now();

    ctrl.process_frame(&pose([1, 0, 0, 0, 1]), t0);
    ctrl.process_frame(&pose([1, 0, 0, 0, 1]), t0 + Duration::from_millis(800));
    assert!(ctrl.in_dead_time(t0 + Duration::from_millis(900)));

    ctrl.reset();
    assert!(!ctrl.in_dead_time(t0 + Duration::from_millis(900)));
}
