//! Gesture state machine.
//!
//! [`GestureController`] turns the per-frame finger classification into
//! debounced input actions. Each [`GestureKind`] owns an [`ActivationRecord`]
//! with two states:
//!
//! - **Idle**: the pose is not present.
//! - **Armed**: the pose has been present continuously since `start_time`.
//!
//! The first frame a pose appears only arms the record. Once the pose has
//! been held for the hold time the gesture fires and the timer re-arms, so a
//! pose held indefinitely produces one fire per hold window. Losing the pose
//! for a single frame returns the record to Idle and discards the
//! accumulated time.
//!
//! Clicks and scrolls share the pinch pose (index and middle up) and are
//! told apart by the distance between the two fingertips, with a dead zone
//! between the click and scroll thresholds. Right-click and the swipe
//! shortcuts start a dead time during which no frame is evaluated, giving
//! the user time to release the pose.

use crate::{
    actions::{Action, ScreenSize},
    constants::{
        DEFAULT_ACTION_DEAD_TIME_SECS, DEFAULT_ACTIVE_REGION_MARGIN, DEFAULT_CAPTURE_HEIGHT,
        DEFAULT_CAPTURE_WIDTH, DEFAULT_CLICK_COOLDOWN_SECS, DEFAULT_CLICK_HOLD_SECS,
        DEFAULT_CLICK_THRESHOLD, DEFAULT_GESTURE_HOLD_SECS, DEFAULT_SCROLL_SPEED,
        DEFAULT_SCROLL_THRESHOLD, DEFAULT_SMOOTHING_FACTOR, INDEX_TIP, MIDDLE_TIP,
    },
    error::{Error, Result},
    filters::{create_filter, CursorFilter},
    landmarks::{self, Finger, FingerState, Handedness, Landmark, Point},
    utils::{interp, mirror, safe_cast::f64_round_to_i32},
};
use log::{debug, info, trace, warn};
use std::fmt;
use std::time::{Duration, Instant};

/// Gesture kinds tracked by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Index finger pointing: drives the cursor
    Move = 0,
    /// Pinch with the tips touching
    Click = 1,
    /// Pinch with the tips apart
    Scroll = 2,
    /// Four fingers up
    RightClick = 3,
    /// Index and pinky up: navigate back
    SwipeLeft = 4,
    /// Thumb and pinky up: navigate forward
    SwipeRight = 5,
}

impl GestureKind {
    /// Number of gesture kinds
    pub const COUNT: usize = 6;

    /// All kinds in evaluation order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Move,
        Self::Click,
        Self::Scroll,
        Self::RightClick,
        Self::SwipeLeft,
        Self::SwipeRight,
    ];

    /// Slot in the controller's record table
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Hand pose that triggers the gesture
    #[must_use]
    pub const fn pose(self) -> Pose {
        match self {
            Self::Move => Pose::Point,
            Self::Click | Self::Scroll => Pose::Pinch,
            Self::RightClick => Pose::FourFingers,
            Self::SwipeLeft => Pose::IndexPinky,
            Self::SwipeRight => Pose::ThumbPinky,
        }
    }

    /// Whether the finger vector satisfies this gesture's pose
    #[must_use]
    pub fn condition(self, fingers: &FingerState) -> bool {
        self.pose().matches(fingers)
    }

    /// Short name for logging
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::RightClick => "right-click",
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical hand poses. No finger vector matches more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    /// Index up; middle, ring and pinky down. Thumb free.
    Point,
    /// Index and middle up, ring and pinky not both up. Thumb free.
    Pinch,
    /// Index, middle, ring and pinky up. Thumb free.
    FourFingers,
    /// Index and pinky up; thumb, middle and ring down.
    IndexPinky,
    /// Thumb and pinky up; index, middle and ring down.
    ThumbPinky,
}

impl Pose {
    /// All poses
    pub const ALL: [Self; 5] = [
        Self::Point,
        Self::Pinch,
        Self::FourFingers,
        Self::IndexPinky,
        Self::ThumbPinky,
    ];

    /// Whether the finger vector shows this pose
    #[must_use]
    pub fn matches(self, fingers: &FingerState) -> bool {
        let up = |finger| fingers.is_up(finger);
        match self {
            Self::Point => up(Finger::Index) && !up(Finger::Middle) && !up(Finger::Ring) && !up(Finger::Pinky),
            Self::Pinch => up(Finger::Index) && up(Finger::Middle) && !(up(Finger::Ring) && up(Finger::Pinky)),
            Self::FourFingers => up(Finger::Index) && up(Finger::Middle) && up(Finger::Ring) && up(Finger::Pinky),
            Self::IndexPinky => {
                up(Finger::Index) && up(Finger::Pinky) && !up(Finger::Thumb) && !up(Finger::Middle) && !up(Finger::Ring)
            }
            Self::ThumbPinky => {
                up(Finger::Thumb) && up(Finger::Pinky) && !up(Finger::Index) && !up(Finger::Middle) && !up(Finger::Ring)
            }
        }
    }
}

/// Timed activation state of one gesture kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivationRecord {
    active: bool,
    start_time: Option<Instant>,
}

impl ActivationRecord {
    /// Whether the gesture's pose is currently held
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// When the current hold window started; `None` while idle
    #[must_use]
    pub const fn start_time(&self) -> Option<Instant> {
        if self.active {
            self.start_time
        } else {
            None
        }
    }

    /// Time held in the current window; `None` while idle
    #[must_use]
    pub fn held_for(&self, now: Instant) -> Option<Duration> {
        self.start_time().map(|start| now.saturating_duration_since(start))
    }

    fn arm(&mut self, now: Instant) {
        self.active = true;
        self.start_time = Some(now);
    }

    fn release(&mut self) {
        self.active = false;
        self.start_time = None;
    }
}

/// Runtime configuration of the gesture controller
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Camera frame width in pixels
    pub capture_width: u32,
    /// Camera frame height in pixels
    pub capture_height: u32,
    /// Border of the frame excluded from the active region
    pub active_region_margin: u32,
    /// Cursor filter name (`exponential` or `none`)
    pub cursor_filter: String,
    /// Cursor smoothing divisor, at least 1
    pub smoothing_factor: f64,
    /// Pinch distance below which the tips count as touching
    pub click_threshold: f64,
    /// Pinch distance at or above which the pinch pose scrolls
    pub scroll_threshold: f64,
    /// Minimum time between clicks
    pub click_cooldown: Duration,
    /// Time the pinch must be held before clicking
    pub click_hold_time: Duration,
    /// Time any other pose must be held before firing
    pub gesture_hold_time: Duration,
    /// Divisor from tip height difference to scroll units
    pub scroll_speed: f64,
    /// Pause after right-click and swipes
    pub action_dead_time: Duration,
    /// Mirror the cursor horizontally (camera image is mirrored)
    pub mirror_x: bool,
    /// Which hand is tracked
    pub handedness: Handedness,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            capture_width: DEFAULT_CAPTURE_WIDTH,
            capture_height: DEFAULT_CAPTURE_HEIGHT,
            active_region_margin: DEFAULT_ACTIVE_REGION_MARGIN,
            cursor_filter: "exponential".to_string(),
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            click_cooldown: Duration::from_secs_f64(DEFAULT_CLICK_COOLDOWN_SECS),
            click_hold_time: Duration::from_secs_f64(DEFAULT_CLICK_HOLD_SECS),
            gesture_hold_time: Duration::from_secs_f64(DEFAULT_GESTURE_HOLD_SECS),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            action_dead_time: Duration::from_secs_f64(DEFAULT_ACTION_DEAD_TIME_SECS),
            mirror_x: true,
            handedness: Handedness::Right,
        }
    }
}

impl GestureConfig {
    /// Validate thresholds and geometry
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.capture_width == 0 || self.capture_height == 0 {
            return Err(Error::ConfigError("Capture size must be non-zero".to_string()));
        }
        if u64::from(self.active_region_margin) * 2 >= u64::from(self.capture_width.min(self.capture_height)) {
            return Err(Error::ConfigError(format!(
                "Active region margin {} leaves no active region in a {}x{} frame",
                self.active_region_margin, self.capture_width, self.capture_height
            )));
        }
        if !(self.smoothing_factor >= 1.0) {
            return Err(Error::ConfigError("Smoothing factor must be >= 1".to_string()));
        }
        if !(self.click_threshold > 0.0) {
            return Err(Error::ConfigError("Click threshold must be positive".to_string()));
        }
        if !(self.scroll_threshold >= self.click_threshold) {
            return Err(Error::ConfigError(
                "Scroll threshold must not be below the click threshold".to_string(),
            ));
        }
        if !(self.scroll_speed > 0.0) {
            return Err(Error::ConfigError("Scroll speed must be positive".to_string()));
        }
        Ok(())
    }
}

/// Per-frame gesture controller
pub struct GestureController {
    config: GestureConfig,
    screen: ScreenSize,
    records: [ActivationRecord; GestureKind::COUNT],
    filter: Box<dyn CursorFilter>,
    last_click_time: Option<Instant>,
    dead_until: Option<Instant>,
}

impl GestureController {
    /// Create a controller for the given screen
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or names an unknown
    /// cursor filter.
    pub fn new(config: GestureConfig, screen: ScreenSize) -> Result<Self> {
        config.validate()?;
        let filter = create_filter(&config.cursor_filter, config.smoothing_factor)?;

        info!(
            "Gesture controller ready: {}x{} capture, screen {}, {} filter, {:?} hand",
            config.capture_width,
            config.capture_height,
            screen,
            filter.name(),
            config.handedness
        );

        Ok(Self {
            config,
            screen,
            records: [ActivationRecord::default(); GestureKind::COUNT],
            filter,
            last_click_time: None,
            dead_until: None,
        })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Screen the cursor is mapped onto
    #[must_use]
    pub const fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    /// Change the screen the cursor is mapped onto
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        info!("Screen size set to {}", screen);
        self.screen = screen;
    }

    /// Activation record of a gesture kind
    #[must_use]
    pub const fn record(&self, kind: GestureKind) -> ActivationRecord {
        self.records[kind.index()]
    }

    /// Last filtered cursor position, before mirroring
    #[must_use]
    pub fn cursor_position(&self) -> (f64, f64) {
        self.filter.current()
    }

    /// When the last click fired
    #[must_use]
    pub const fn last_click_time(&self) -> Option<Instant> {
        self.last_click_time
    }

    /// Whether frames are currently being ignored after a right-click or swipe
    #[must_use]
    pub fn in_dead_time(&self, now: Instant) -> bool {
        self.dead_until.is_some_and(|until| now < until)
    }

    /// Return every record, timer and the cursor filter to the initial state
    pub fn reset(&mut self) {
        self.release_all();
        self.filter.reset();
        self.last_click_time = None;
        self.dead_until = None;
    }

    /// Advance the hold-time state machine of one gesture kind.
    ///
    /// Returns `true` when the gesture fires: the condition has been true
    /// for at least the gesture hold time since the record was armed or last
    /// fired. The first frame of a condition never fires.
    pub fn update_gesture_state(&mut self, kind: GestureKind, condition: bool, now: Instant) -> bool {
        let hold_time = self.config.gesture_hold_time;
        let record = &mut self.records[kind.index()];

        if !condition {
            record.release();
            return false;
        }

        match record.held_for(now) {
            None => {
                record.arm(now);
                false
            }
            Some(held) if held >= hold_time => {
                record.arm(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Arm or release a record without firing it
    fn track(&mut self, kind: GestureKind, condition: bool, now: Instant) {
        let record = &mut self.records[kind.index()];
        if !condition {
            record.release();
        } else if !record.is_active() {
            record.arm(now);
        }
    }

    fn release_all(&mut self) {
        for record in &mut self.records {
            record.release();
        }
    }

    /// Process one frame of landmarks.
    ///
    /// A set without exactly 21 landmarks (or without both fingertips) means
    /// no hand is tracked: every record is released and nothing fires.
    pub fn process_frame(&mut self, hand: &[Landmark], now: Instant) -> Vec<Action> {
        if self.in_dead_time(now) {
            return Vec::new();
        }

        if !landmarks::is_complete(hand) {
            trace!("No complete hand in frame ({} landmarks)", hand.len());
            self.release_all();
            return Vec::new();
        }

        let tips = match landmarks::distance(INDEX_TIP, MIDDLE_TIP, hand) {
            Ok(pinch) => pinch,
            Err(e) => {
                warn!("Discarding frame: {e}");
                self.release_all();
                return Vec::new();
            }
        };

        let fingers = landmarks::classify_fingers_for(hand, self.config.handedness);
        self.process_gesture(fingers, tips.from, tips.to, now)
    }

    /// Evaluate every gesture for one frame's finger vector and fingertips.
    pub fn process_gesture(&mut self, fingers: FingerState, index_tip: Point, middle_tip: Point, now: Instant) -> Vec<Action> {
        if self.in_dead_time(now) {
            return Vec::new();
        }

        trace!("Fingers {} index {:?} middle {:?}", fingers, index_tip, middle_tip);
        let mut actions = Vec::new();

        if self.update_gesture_state(GestureKind::Move, GestureKind::Move.condition(&fingers), now) {
            actions.push(self.move_cursor(index_tip));
        }

        let pinch_pose = Pose::Pinch.matches(&fingers);
        let pinch_distance = index_tip.distance_to(&middle_tip);
        self.track(
            GestureKind::Click,
            pinch_pose && pinch_distance < self.config.click_threshold,
            now,
        );
        self.track(
            GestureKind::Scroll,
            pinch_pose && pinch_distance >= self.config.scroll_threshold,
            now,
        );
        if pinch_pose {
            if let Some(action) = self.click_or_scroll(pinch_distance, index_tip, middle_tip, now) {
                actions.push(action);
            }
        }

        let shortcuts = [
            (GestureKind::RightClick, Action::RightClick),
            (GestureKind::SwipeLeft, Action::NAVIGATE_BACK),
            (GestureKind::SwipeRight, Action::NAVIGATE_FORWARD),
        ];
        for (kind, action) in shortcuts {
            if self.update_gesture_state(kind, kind.condition(&fingers), now) {
                debug!("{} fired: {}", kind, action);
                actions.push(action);
                self.dead_until = Some(now + self.config.action_dead_time);
            }
        }

        actions
    }

    /// Map the index tip onto the screen and smooth it
    fn move_cursor(&mut self, index_tip: Point) -> Action {
        let margin = f64::from(self.config.active_region_margin);
        let screen_width = f64::from(self.screen.width);
        let target_x = interp(
            f64::from(index_tip.x),
            (margin, f64::from(self.config.capture_width) - margin),
            (0.0, screen_width),
        );
        let target_y = interp(
            f64::from(index_tip.y),
            (margin, f64::from(self.config.capture_height) - margin),
            (0.0, f64::from(self.screen.height)),
        );

        let (x, y) = self.filter.apply(target_x, target_y);
        let x = if self.config.mirror_x { mirror(x, screen_width) } else { x };

        debug!("move fired: target ({:.0}, {:.0}) -> ({:.0}, {:.0})", target_x, target_y, x, y);
        Action::MoveCursor { x, y }
    }

    /// Click when the tips touch, scroll when they are apart.
    ///
    /// Firing a click only advances the cooldown timestamp; the click
    /// record keeps its start time, so a held pinch clicks again once the
    /// cooldown has passed.
    fn click_or_scroll(&mut self, pinch_distance: f64, index_tip: Point, middle_tip: Point, now: Instant) -> Option<Action> {
        if pinch_distance < self.config.click_threshold {
            let cooled_down = self
                .last_click_time
                .map_or(true, |last| now.saturating_duration_since(last) > self.config.click_cooldown);
            let held = self
                .record(GestureKind::Click)
                .held_for(now)
                .is_some_and(|held| held >= self.config.click_hold_time);

            if cooled_down && held {
                debug!("click fired: pinch {:.1}px", pinch_distance);
                self.last_click_time = Some(now);
                return Some(Action::Click);
            }
        } else if pinch_distance >= self.config.scroll_threshold {
            let delta = (f64::from(index_tip.y) - f64::from(middle_tip.y)) / self.config.scroll_speed;
            match f64_round_to_i32(delta) {
                Ok(0) => {}
                Ok(amount) => {
                    debug!("scroll fired: {}", amount);
                    return Some(Action::Scroll(amount));
                }
                Err(e) => warn!("Ignoring scroll: {e}"),
            }
        }
        None
    }
}

impl fmt::Debug for GestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureController")
            .field("config", &self.config)
            .field("screen", &self.screen)
            .field("records", &self.records)
            .field("filter", &self.filter.name())
            .field("last_click_time", &self.last_click_time)
            .field("dead_until", &self.dead_until)
            .finish()
    }
}
