//! Main application module: the frame loop.

use crate::{
    actions::{Action, ActionSink},
    error::Result,
    gesture::{GestureConfig, GestureController},
    source::LandmarkSource,
};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gesture controller configuration
    pub gesture: GestureConfig,
    /// Screen size used when the sink cannot report one
    pub fallback_screen: crate::actions::ScreenSize,
    /// Pace frames by their timestamps instead of replaying as fast as possible
    pub realtime: bool,
}

/// Counters collected while the loop runs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames processed
    pub frames: u64,
    /// Frames that carried a hand
    pub frames_with_hand: u64,
    /// Actions produced by the controller
    pub actions: u64,
    /// Actions the sink rejected
    pub sink_failures: u64,
    /// Frames per second over the stream's own timeline
    pub fps: f64,
}

/// Main application struct
pub struct GestureApp<S: LandmarkSource, K: ActionSink> {
    config: AppConfig,
    source: S,
    sink: K,
    controller: GestureController,
    stats: FrameStats,
}

impl<S: LandmarkSource, K: ActionSink> GestureApp<S, K> {
    /// Create a new gesture control application
    pub fn new(config: AppConfig, source: S, sink: K) -> Result<Self> {
        info!("Initializing gesture control application");

        let screen = sink.screen_size().unwrap_or_else(|| {
            info!(
                "Sink '{}' does not report a screen size, using {}",
                sink.name(),
                config.fallback_screen
            );
            config.fallback_screen
        });

        let controller = GestureController::new(config.gesture.clone(), screen)?;

        Ok(Self {
            config,
            source,
            sink,
            controller,
            stats: FrameStats::default(),
        })
    }

    /// Gesture controller driven by the loop
    pub const fn controller(&self) -> &GestureController {
        &self.controller
    }

    /// Action sink fed by the loop
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Counters so far
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Run the main application loop until the source is exhausted
    pub fn run(&mut self) -> Result<FrameStats> {
        info!("Starting main application loop");

        let start_time = Instant::now();
        let mut first_timestamp: Option<Duration> = None;
        let mut last_timestamp = Duration::ZERO;

        while let Some(frame) = self.source.next_frame()? {
            let offset = frame.timestamp.saturating_sub(*first_timestamp.get_or_insert(frame.timestamp));
            let now = start_time + offset;

            if self.config.realtime {
                let wait = now.saturating_duration_since(Instant::now());
                if !wait.is_zero() {
                    std::thread::sleep(wait);
                }
            }

            self.stats.frames += 1;
            if !frame.landmarks.is_empty() {
                self.stats.frames_with_hand += 1;
            }
            last_timestamp = offset;

            let actions = self.controller.process_frame(&frame.landmarks, now);
            self.dispatch(&actions);
        }

        if self.stats.frames > 1 && !last_timestamp.is_zero() {
            self.stats.fps = (self.stats.frames - 1) as f64 / last_timestamp.as_secs_f64();
        }

        info!(
            "Stream ended: {} frames ({} with a hand, {:.1} fps), {} actions, {} sink failures",
            self.stats.frames,
            self.stats.frames_with_hand,
            self.stats.fps,
            self.stats.actions,
            self.stats.sink_failures
        );

        Ok(self.stats)
    }

    /// Hand actions to the sink; failures are logged and skipped
    fn dispatch(&mut self, actions: &[Action]) {
        for action in actions {
            self.stats.actions += 1;
            debug!("Performing {action} via {}", self.sink.name());
            if let Err(e) = self.sink.perform(action) {
                self.stats.sink_failures += 1;
                warn!("Sink '{}' failed to perform {action}: {e}", self.sink.name());
            }
        }
    }
}
