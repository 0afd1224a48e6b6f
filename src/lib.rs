//! Hand-gesture control library for touchless cursor and shortcut input.
//!
//! An external hand-pose estimator reports 21 landmarks per frame. This
//! library turns that noisy ~30 Hz stream into stable input actions:
//! - Finger classification (which fingers are extended) per frame
//! - A hold-time gated state machine per gesture, with click cooldown and
//!   a dead time after shortcut gestures
//! - Exponential smoothing of the cursor target
//! - Action sinks for X11 (XTEST) or plain logging
//!
//! The pipeline:
//! 1. A [`source::LandmarkSource`] yields the landmarks of one frame
//! 2. [`landmarks`] classifies the fingers and measures the pinch distance
//! 3. [`gesture::GestureController`] decides which actions fire
//! 4. An [`actions::ActionSink`] delivers them to the host
//!
//! # Examples
//!
//! ## Driving the controller directly
//!
//! ```
//! use casual_touch::{
//!     actions::{Action, ScreenSize},
//!     gesture::{GestureConfig, GestureController},
//!     landmarks::{FingerState, Point},
//! };
//! use std::time::{Duration, Instant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = GestureController::new(GestureConfig::default(), ScreenSize::new(1920, 1080))?;
//!
//! // Index and middle finger up, tips 60 px apart vertically: scroll
//! let pinch = FingerState::from_bits([0, 1, 1, 0, 0]);
//! let t0 = Instant::now();
//! let actions = controller.process_gesture(pinch, Point::new(300, 100), Point::new(300, 200), t0);
//! assert_eq!(actions, vec![Action::Scroll(-10)]);
//!
//! // Four fingers held past the hold time: right-click
//! let palm = FingerState::from_bits([0, 1, 1, 1, 1]);
//! controller.process_gesture(palm, Point::new(0, 0), Point::new(0, 0), t0);
//! let actions = controller.process_gesture(palm, Point::new(0, 0), Point::new(0, 0), t0 + Duration::from_secs(1));
//! assert_eq!(actions, vec![Action::RightClick]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying a recording
//!
//! ```no_run
//! use casual_touch::{
//!     actions::LoggingSink,
//!     app::{AppConfig, GestureApp},
//!     config::Config,
//!     source::CsvReplaySource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let app_config = AppConfig {
//!     gesture: config.gesture_config()?,
//!     fallback_screen: config.screen_size(),
//!     realtime: false,
//! };
//! let source = CsvReplaySource::from_path("recording.csv")?;
//! let mut app = GestureApp::new(app_config, source, LoggingSink::new())?;
//! let stats = app.run()?;
//! println!("{} frames, {} actions", stats.frames, stats.actions);
//! # Ok(())
//! # }
//! ```

/// Abstract input actions and sinks
pub mod actions;

/// Main application loop
pub mod app;

/// Command line arguments
pub mod cli;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// X11 action sink
pub mod cursor_control;

/// Error types and result handling
pub mod error;

/// Cursor smoothing filters
pub mod filters;

/// Gesture state machine
pub mod gesture;

/// Finger classification and landmark geometry
pub mod landmarks;

/// Landmark frame sources
pub mod source;

/// Coordinate mapping and safe casts
pub mod utils;

pub use error::{Error, Result};
