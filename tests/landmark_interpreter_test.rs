//! Finger classification and landmark geometry on synthetic hands

mod test_helpers;

use casual_touch::{
    constants::{INDEX_TIP, MIDDLE_TIP, THUMB_TIP},
    landmarks::{classify_fingers, classify_fingers_for, distance, FingerState, Handedness, Landmark, Point},
    Error,
};
use test_helpers::{hand, pose};

#[test]
fn test_every_finger_vector_round_trips_through_landmarks() {
    for fingers in FingerState::all() {
        let bits = fingers.0.map(u8::from);
        assert_eq!(classify_fingers(&pose(bits)), fingers, "pose {fingers}");
    }
}

#[test]
fn test_left_hand_reverses_thumb() {
    let right_thumb_up = pose([1, 0, 0, 0, 1]);
    assert_eq!(
        classify_fingers_for(&right_thumb_up, Handedness::Left),
        FingerState::from_bits([0, 0, 0, 0, 1])
    );

    let right_thumb_down = pose([0, 1, 1, 0, 0]);
    assert_eq!(
        classify_fingers_for(&right_thumb_down, Handedness::Left),
        FingerState::from_bits([1, 1, 1, 0, 0])
    );
}

#[test]
fn test_tip_level_with_joint_is_curled() {
    let mut landmarks = pose([0, 1, 0, 0, 0]);
    let joint_y = landmarks[INDEX_TIP - 2].y;
    landmarks[INDEX_TIP].y = joint_y;
    assert!(!classify_fingers(&landmarks).0[1]);

    let mut landmarks = pose([1, 0, 0, 0, 0]);
    let joint_x = landmarks[THUMB_TIP - 1].x;
    landmarks[THUMB_TIP].x = joint_x;
    assert!(!classify_fingers(&landmarks).0[0]);
}

#[test]
fn test_landmark_order_does_not_matter() {
    let mut landmarks = pose([0, 1, 0, 0, 1]);
    landmarks.reverse();
    assert_eq!(classify_fingers(&landmarks), FingerState::from_bits([0, 1, 0, 0, 1]));
}

#[test]
fn test_wrong_landmark_count_reads_as_no_hand() {
    let mut landmarks = pose([1, 1, 1, 1, 1]);
    landmarks.push(Landmark::new(21, 0, 0));
    assert_eq!(classify_fingers(&landmarks), FingerState::NONE);

    landmarks.truncate(10);
    assert_eq!(classify_fingers(&landmarks), FingerState::NONE);
}

#[test]
fn test_pinch_distance_between_tips() {
    let landmarks = hand([0, 1, 1, 0, 0], (300, 100), (300, 160));
    let pinch = distance(INDEX_TIP, MIDDLE_TIP, &landmarks).unwrap();
    assert!((pinch.length - 60.0).abs() < 1e-9);
    assert_eq!(pinch.from, Point::new(300, 100));
    assert_eq!(pinch.to, Point::new(300, 160));
    assert_eq!(pinch.midpoint, Point::new(300, 130));
}

#[test]
fn test_midpoint_rounds_down() {
    let landmarks = vec![Landmark::new(8, 1, -1), Landmark::new(12, 2, -2)];
    let pinch = distance(8, 12, &landmarks).unwrap();
    assert_eq!(pinch.midpoint, Point::new(1, -2));
}

#[test]
fn test_distance_to_self_is_zero() {
    let landmarks = pose([0, 1, 0, 0, 0]);
    let pinch = distance(INDEX_TIP, INDEX_TIP, &landmarks).unwrap();
    assert_eq!(pinch.length, 0.0);
    assert_eq!(pinch.midpoint, pinch.from);
}

#[test]
fn test_distance_with_unknown_id() {
    let landmarks = pose([0, 1, 0, 0, 0]);
    assert!(matches!(distance(INDEX_TIP, 42, &landmarks), Err(Error::MissingLandmark(42))));
}
