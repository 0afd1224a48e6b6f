//! Helper functions and utilities for tests
#![allow(dead_code)]

use casual_touch::{
    constants::{FINGER_TIPS, HAND_LANDMARK_COUNT, WRIST},
    landmarks::Landmark,
    source::LandmarkFrame,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Default fingertip positions (thumb, index, middle, ring, pinky)
const DEFAULT_TIPS: [(i32, i32); 5] = [(250, 300), (300, 200), (340, 190), (370, 210), (400, 240)];

/// Vertical gap between a fingertip and the joint it is compared against
const JOINT_GAP: i32 = 40;

/// Build a right hand whose fingers classify as `fingers` (0/1 notation),
/// with the index and middle tips at the given pixels.
pub fn hand(fingers: [u8; 5], index_tip: (i32, i32), middle_tip: (i32, i32)) -> Vec<Landmark> {
    let mut tips = DEFAULT_TIPS;
    tips[1] = index_tip;
    tips[2] = middle_tip;

    let mut points = [(0, 0); HAND_LANDMARK_COUNT];
    points[WRIST] = (320, 450);
    for (finger, &tip_id) in FINGER_TIPS.iter().enumerate() {
        let (tx, ty) = tips[finger];
        let up = fingers[finger] != 0;

        for segment in 0..4 {
            points[tip_id - segment] = (tx, ty + 15 * i32::try_from(segment).unwrap());
        }

        if finger == 0 {
            points[tip_id - 1] = (if up { tx - 20 } else { tx + 20 }, ty + 15);
        } else {
            points[tip_id - 2] = (tx, if up { ty + JOINT_GAP } else { ty - JOINT_GAP });
        }
    }

    points
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| Landmark::new(id, x, y))
        .collect()
}

/// Hand with default fingertip positions
pub fn pose(fingers: [u8; 5]) -> Vec<Landmark> {
    hand(fingers, DEFAULT_TIPS[1], DEFAULT_TIPS[2])
}

/// Frame at `millis` carrying `landmarks`
pub fn frame_at(millis: u64, landmarks: Vec<Landmark>) -> LandmarkFrame {
    LandmarkFrame::new(Duration::from_millis(millis), landmarks)
}

/// Render frames in the replay CSV format
pub fn to_csv(frames: &[LandmarkFrame]) -> String {
    let mut csv = String::from("frame,timestamp_ms,id,x,y\n");
    for (index, frame) in frames.iter().enumerate() {
        let millis = frame.timestamp.as_millis();
        if frame.landmarks.is_empty() {
            writeln!(csv, "{index},{millis},,,").unwrap();
        }
        for lm in &frame.landmarks {
            writeln!(csv, "{index},{millis},{},{},{}", lm.id, lm.x, lm.y).unwrap();
        }
    }
    csv
}
