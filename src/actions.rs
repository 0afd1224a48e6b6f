//! Abstract input actions and the sinks that deliver them.
//!
//! The gesture controller never talks to the operating system directly. It
//! returns [`Action`]s, and the application loop hands each one to an
//! [`ActionSink`]. Sinks are expected to be fail-soft: an error from
//! [`ActionSink::perform`] is logged by the caller and the loop moves on.

use crate::error::Result;
use log::info;
use std::fmt;

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Modifier held during a key combo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Control,
    Alt,
    Shift,
    Super,
}

/// Key pressed during a key combo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

/// A discrete or continuous input action produced by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move the pointer to an absolute screen position (may be off-screen)
    MoveCursor { x: f64, y: f64 },
    /// Primary button click
    Click,
    /// Secondary button click
    RightClick,
    /// Scroll by a signed number of units, positive scrolls up
    Scroll(i32),
    /// Press `Key` while holding `Modifier`
    KeyCombo(Modifier, Key),
}

impl Action {
    /// Navigate back (previous page / word)
    pub const NAVIGATE_BACK: Self = Self::KeyCombo(Modifier::Control, Key::Left);

    /// Navigate forward (next page / word)
    pub const NAVIGATE_FORWARD: Self = Self::KeyCombo(Modifier::Control, Key::Right);

    /// Whether the action is a discrete event rather than pointer motion
    #[must_use]
    pub const fn is_discrete(&self) -> bool {
        !matches!(self, Self::MoveCursor { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveCursor { x, y } => write!(f, "move({x:.0}, {y:.0})"),
            Self::Click => write!(f, "click"),
            Self::RightClick => write!(f, "right-click"),
            Self::Scroll(amount) => write!(f, "scroll({amount})"),
            Self::KeyCombo(modifier, key) => write!(f, "{modifier:?}+{key:?}"),
        }
    }
}

/// Destination for actions, usually the host input layer
pub trait ActionSink {
    /// Deliver one action
    ///
    /// # Errors
    ///
    /// Returns an error if the input layer rejected the action. Callers log
    /// it and continue.
    fn perform(&mut self, action: &Action) -> Result<()>;

    /// Screen size if the sink knows it
    fn screen_size(&self) -> Option<ScreenSize> {
        None
    }

    /// Sink name for logging
    fn name(&self) -> &str;
}

/// Sink that only logs what it would do (dry run)
#[derive(Debug, Default)]
pub struct LoggingSink {
    performed: usize,
}

impl LoggingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of discrete actions seen so far
    #[must_use]
    pub const fn performed(&self) -> usize {
        self.performed
    }
}

impl ActionSink for LoggingSink {
    fn perform(&mut self, action: &Action) -> Result<()> {
        if action.is_discrete() {
            self.performed += 1;
            info!("Action: {action}");
        } else {
            log::trace!("Action: {action}");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Sink that keeps every action in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Vec<Action>,
    screen: Option<ScreenSize>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a fixed screen size to the caller
    #[must_use]
    pub const fn with_screen(screen: ScreenSize) -> Self {
        Self {
            actions: Vec::new(),
            screen: Some(screen),
        }
    }

    /// Actions received so far
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Discrete actions received so far
    pub fn discrete(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.is_discrete())
    }
}

impl ActionSink for RecordingSink {
    fn perform(&mut self, action: &Action) -> Result<()> {
        self.actions.push(*action);
        Ok(())
    }

    fn screen_size(&self) -> Option<ScreenSize> {
        self.screen
    }

    fn name(&self) -> &str {
        "recording"
    }
}
