//! Constants used throughout the application

/// Number of landmarks reported for a tracked hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Wrist landmark id
pub const WRIST: usize = 0;

/// Thumb tip landmark id
pub const THUMB_TIP: usize = 4;
/// Index finger tip landmark id
pub const INDEX_TIP: usize = 8;
/// Middle finger tip landmark id
pub const MIDDLE_TIP: usize = 12;
/// Ring finger tip landmark id
pub const RING_TIP: usize = 16;
/// Pinky tip landmark id
pub const PINKY_TIP: usize = 20;

/// Tip ids in finger order (thumb, index, middle, ring, pinky)
pub const FINGER_TIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Offset from the thumb tip to the joint it is compared against (IP joint)
pub const THUMB_JOINT_OFFSET: usize = 1;

/// Offset from a finger tip to the joint it is compared against (PIP joint)
pub const FINGER_JOINT_OFFSET: usize = 2;

/// Default capture resolution
pub const DEFAULT_CAPTURE_WIDTH: u32 = 640;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 480;

/// Screen size used when the sink cannot report one
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Margin of the camera frame excluded from the active region (pixels)
pub const DEFAULT_ACTIVE_REGION_MARGIN: u32 = 100;

/// Cursor smoothing divisor
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 4.0;

/// Pinch distance below which index and middle tips count as touching (pixels)
pub const DEFAULT_CLICK_THRESHOLD: f64 = 30.0;

/// Pinch distance at or above which the pinch pose scrolls (pixels)
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 40.0;

/// Minimum time between two clicks (seconds)
pub const DEFAULT_CLICK_COOLDOWN_SECS: f64 = 1.0;

/// Time the pinch must be held before it clicks (seconds)
pub const DEFAULT_CLICK_HOLD_SECS: f64 = 0.5;

/// Time a pose must be held before its gesture fires (seconds)
pub const DEFAULT_GESTURE_HOLD_SECS: f64 = 0.8;

/// Divisor turning the tip height difference into scroll units
pub const DEFAULT_SCROLL_SPEED: f64 = 10.0;

/// Pause after a right-click or swipe during which no gesture is evaluated (seconds)
pub const DEFAULT_ACTION_DEAD_TIME_SECS: f64 = 1.0;
