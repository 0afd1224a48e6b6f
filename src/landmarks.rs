//! Landmark interpretation for a single tracked hand.
//!
//! The pose estimator reports 21 points per hand in image-pixel space. This
//! module turns one frame's points into a [`FingerState`] (which fingers are
//! extended) and measures distances between named landmarks. Every function
//! here is stateless: it only looks at the frame it is given.

use crate::{
    constants::{FINGER_JOINT_OFFSET, FINGER_TIPS, HAND_LANDMARK_COUNT, THUMB_JOINT_OFFSET},
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pixel coordinate in the camera frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal pixel position
    pub x: i32,
    /// Vertical pixel position (grows downwards)
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// One tracked anatomical point of a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    /// Landmark id in the 21-point hand topology
    pub id: usize,
    /// Horizontal pixel position
    pub x: i32,
    /// Vertical pixel position
    pub y: i32,
}

impl Landmark {
    /// Create a new landmark
    #[must_use]
    pub const fn new(id: usize, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    /// Position of the landmark without its id
    #[must_use]
    pub const fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Which hand the landmarks belong to, as seen by the camera.
///
/// Only the thumb classification depends on it: the thumb folds sideways,
/// so its extension is judged on the x axis and flips with the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Thumb extended when its tip lies right of the IP joint
    #[default]
    Right,
    /// Thumb extended when its tip lies left of the IP joint
    Left,
}

/// Finger index into a [`FingerState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

/// Extended/curled flags for the five fingers of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    /// No finger extended; also what a missing or malformed hand reads as
    pub const NONE: Self = Self([false; 5]);

    /// Build from the 0/1 notation (`[0, 1, 0, 0, 0]` is index only)
    #[must_use]
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// Whether `finger` is extended
    #[must_use]
    pub const fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    /// Every finger vector, used for exhaustive checks
    pub fn all() -> impl Iterator<Item = Self> {
        (0u8..32).map(|mask| Self(std::array::from_fn(|i| mask & (1 << i) != 0)))
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, up) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", u8::from(*up))?;
        }
        write!(f, "]")
    }
}

/// Result of measuring the distance between two landmarks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pinch {
    /// Euclidean distance in pixels
    pub length: f64,
    /// First landmark position
    pub from: Point,
    /// Second landmark position
    pub to: Point,
    /// Integer midpoint between the two landmarks
    pub midpoint: Point,
}

/// Whether a landmark set describes a fully tracked hand
#[must_use]
pub fn is_complete(landmarks: &[Landmark]) -> bool {
    landmarks.len() == HAND_LANDMARK_COUNT
}

/// Find a landmark by id
#[must_use]
pub fn find(landmarks: &[Landmark], id: usize) -> Option<&Landmark> {
    landmarks.iter().find(|lm| lm.id == id)
}

/// Classify a right hand's fingers. See [`classify_fingers_for`].
#[must_use]
pub fn classify_fingers(landmarks: &[Landmark]) -> FingerState {
    classify_fingers_for(landmarks, Handedness::Right)
}

/// Classify which fingers are extended.
///
/// A set that does not hold exactly 21 landmarks returns [`FingerState::NONE`]:
/// no hand was confidently tracked, which is not an error.
#[must_use]
pub fn classify_fingers_for(landmarks: &[Landmark], handedness: Handedness) -> FingerState {
    if !is_complete(landmarks) {
        return FingerState::NONE;
    }

    let position = |id: usize| find(landmarks, id).map(Landmark::point);
    let mut fingers = [false; 5];

    let thumb_tip = FINGER_TIPS[0];
    if let (Some(tip), Some(joint)) = (position(thumb_tip), position(thumb_tip - THUMB_JOINT_OFFSET)) {
        fingers[0] = match handedness {
            Handedness::Right => tip.x > joint.x,
            Handedness::Left => tip.x < joint.x,
        };
    }

    for (slot, &tip_id) in FINGER_TIPS.iter().enumerate().skip(1) {
        if let (Some(tip), Some(joint)) = (position(tip_id), position(tip_id - FINGER_JOINT_OFFSET)) {
            // image y grows downwards
            fingers[slot] = tip.y < joint.y;
        }
    }

    FingerState(fingers)
}

/// Distance and midpoint between two landmarks.
///
/// # Errors
///
/// Returns [`Error::MissingLandmark`] if either id is absent from the frame.
pub fn distance(p1: usize, p2: usize, landmarks: &[Landmark]) -> Result<Pinch> {
    let from = find(landmarks, p1).ok_or(Error::MissingLandmark(p1))?.point();
    let to = find(landmarks, p2).ok_or(Error::MissingLandmark(p2))?.point();

    Ok(Pinch {
        length: from.distance_to(&to),
        from,
        to,
        midpoint: Point::new(midpoint(from.x, to.x), midpoint(from.y, to.y)),
    })
}

/// Floor of the mean of two coordinates; never overflows
fn midpoint(a: i32, b: i32) -> i32 {
    let mean = (i64::from(a) + i64::from(b)).div_euclid(2);
    // the mean of two i32 values is always an i32
    i32::try_from(mean).unwrap_or(if mean < 0 { i32::MIN } else { i32::MAX })
}
