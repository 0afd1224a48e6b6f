//! Configuration management for the gesture controller

use crate::{
    actions::ScreenSize,
    constants::{
        DEFAULT_ACTION_DEAD_TIME_SECS, DEFAULT_ACTIVE_REGION_MARGIN, DEFAULT_CAPTURE_HEIGHT,
        DEFAULT_CAPTURE_WIDTH, DEFAULT_CLICK_COOLDOWN_SECS, DEFAULT_CLICK_HOLD_SECS,
        DEFAULT_CLICK_THRESHOLD, DEFAULT_GESTURE_HOLD_SECS, DEFAULT_SCREEN_HEIGHT,
        DEFAULT_SCREEN_WIDTH, DEFAULT_SCROLL_SPEED, DEFAULT_SCROLL_THRESHOLD,
        DEFAULT_SMOOTHING_FACTOR,
    },
    gesture::GestureConfig,
    landmarks::Handedness,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera capture configuration
    pub capture: CaptureConfig,

    /// Screen used when the sink cannot report one
    pub screen: ScreenConfig,

    /// Gesture thresholds and timings
    pub gesture: GestureSettings,

    /// Tracked hand
    pub hand: HandConfig,

    /// Action output
    pub output: OutputConfig,
}

/// Camera capture resolution the landmarks are expressed in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,
}

/// Fallback screen size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen width in pixels
    pub width: u32,

    /// Screen height in pixels
    pub height: u32,
}

/// Gesture thresholds; times are in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Frame border excluded from the active region (pixels)
    pub active_region_margin: u32,

    /// Cursor filter (`exponential` or `none`)
    pub cursor_filter: String,

    /// Cursor smoothing divisor (>= 1)
    pub smoothing_factor: f64,

    /// Pinch distance below which the tips touch (pixels)
    pub click_threshold: f64,

    /// Pinch distance at or above which the pinch pose scrolls (pixels)
    pub scroll_threshold: f64,

    /// Minimum time between clicks
    pub click_cooldown: f64,

    /// Pinch hold time before a click
    pub click_hold_time: f64,

    /// Hold time for move, right-click and swipes
    pub gesture_hold_time: f64,

    /// Divisor from fingertip height difference to scroll units
    pub scroll_speed: f64,

    /// Pause after right-click and swipes
    pub action_dead_time: f64,
}

/// Tracked hand configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandConfig {
    /// `right` or `left`
    pub handedness: Handedness,
}

/// Action output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Sink name (`x11` or `log`)
    pub sink: String,

    /// Mirror cursor motion horizontally
    pub mirror_x: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CAPTURE_WIDTH,
            height: DEFAULT_CAPTURE_HEIGHT,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            active_region_margin: DEFAULT_ACTIVE_REGION_MARGIN,
            cursor_filter: "exponential".to_string(),
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            click_cooldown: DEFAULT_CLICK_COOLDOWN_SECS,
            click_hold_time: DEFAULT_CLICK_HOLD_SECS,
            gesture_hold_time: DEFAULT_GESTURE_HOLD_SECS,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            action_dead_time: DEFAULT_ACTION_DEAD_TIME_SECS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sink: "x11".to_string(),
            mirror_x: true,
        }
    }
}

/// Convert a configured number of seconds to a `Duration`
fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| Error::ConfigError(format!("{name} must be a non-negative number of seconds, got {value}")))
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;

        Ok(())
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Fallback screen size
    #[must_use]
    pub const fn screen_size(&self) -> ScreenSize {
        ScreenSize::new(self.screen.width, self.screen.height)
    }

    /// Build the runtime gesture configuration
    pub fn gesture_config(&self) -> Result<GestureConfig> {
        let g = &self.gesture;
        Ok(GestureConfig {
            capture_width: self.capture.width,
            capture_height: self.capture.height,
            active_region_margin: g.active_region_margin,
            cursor_filter: g.cursor_filter.clone(),
            smoothing_factor: g.smoothing_factor,
            click_threshold: g.click_threshold,
            scroll_threshold: g.scroll_threshold,
            click_cooldown: seconds("click_cooldown", g.click_cooldown)?,
            click_hold_time: seconds("click_hold_time", g.click_hold_time)?,
            gesture_hold_time: seconds("gesture_hold_time", g.gesture_hold_time)?,
            scroll_speed: g.scroll_speed,
            action_dead_time: seconds("action_dead_time", g.action_dead_time)?,
            mirror_x: self.output.mirror_x,
            handedness: self.hand.handedness,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(Error::ConfigError("Screen size must be non-zero".to_string()));
        }

        match self.output.sink.as_str() {
            "x11" | "log" => {}
            other => {
                return Err(Error::ConfigError(format!(
                    "Unknown sink '{other}', expected 'x11' or 'log'"
                )))
            }
        }

        self.gesture_config()?.validate()
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Casual Touch configuration

# Resolution the landmark coordinates are expressed in
capture:
  width: 640
  height: 480

# Used when the output sink cannot report the screen size
screen:
  width: 1920
  height: 1080

# Gesture thresholds (pixels) and timings (seconds)
gesture:
  active_region_margin: 100
  cursor_filter: "exponential"
  smoothing_factor: 4.0
  click_threshold: 30.0
  scroll_threshold: 40.0
  click_cooldown: 1.0
  click_hold_time: 0.5
  gesture_hold_time: 0.8
  scroll_speed: 10.0
  action_dead_time: 1.0

# Tracked hand (right or left)
hand:
  handedness: right

# Action output (x11 or log)
output:
  sink: "x11"
  mirror_x: true
"#;
