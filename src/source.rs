//! Landmark sources feeding the gesture controller.
//!
//! The hand-pose model runs outside this crate. A [`LandmarkSource`] hands
//! over its output one frame at a time: either the 21 landmarks of a single
//! hand or nothing when no hand was detected.
//!
//! [`CsvReplaySource`] replays a recording with one landmark per row:
//!
//! ```text
//! frame,timestamp_ms,id,x,y
//! 0,0,0,320,400
//! 0,0,1,340,390
//! ...
//! 1,33,,,
//! ```
//!
//! A frame whose only row leaves `id`, `x` and `y` empty holds no hand.

use crate::error::{Error, Result};
use crate::landmarks::Landmark;
use log::info;
use serde::Deserialize;
use std::collections::VecDeque;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Landmarks of one captured frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkFrame {
    /// Capture time relative to the start of the stream
    pub timestamp: Duration,
    /// Landmarks of the tracked hand; empty when no hand was detected
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    /// A frame with a detected hand
    #[must_use]
    pub fn new(timestamp: Duration, landmarks: Vec<Landmark>) -> Self {
        Self { timestamp, landmarks }
    }

    /// A frame without a hand
    #[must_use]
    pub fn empty(timestamp: Duration) -> Self {
        Self {
            timestamp,
            landmarks: Vec::new(),
        }
    }
}

/// Producer of landmark frames
pub trait LandmarkSource {
    /// Next frame, or `None` once the stream has ended
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying stream failed.
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// In-memory source serving a fixed list of frames
#[derive(Debug, Default)]
pub struct VecSource {
    frames: VecDeque<LandmarkFrame>,
}

impl VecSource {
    #[must_use]
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self { frames: frames.into() }
    }

    /// Frames not yet served
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for VecSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        Ok(self.frames.pop_front())
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    frame: u64,
    timestamp_ms: u64,
    id: Option<usize>,
    x: Option<i32>,
    y: Option<i32>,
}

/// Replays a CSV landmark recording
#[derive(Debug)]
pub struct CsvReplaySource {
    inner: VecSource,
}

impl CsvReplaySource {
    /// Load a recording from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading landmark recording from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a recording from any reader
    ///
    /// # Errors
    ///
    /// Returns an error on CSV syntax errors, rows with a partial landmark,
    /// or frame numbers that go backwards.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut frames: Vec<LandmarkFrame> = Vec::new();
        let mut current: Option<u64> = None;

        for (line, result) in csv_reader.deserialize::<Row>().enumerate() {
            let row = result?;
            let line = line + 2; // 1-based, after the header

            match current {
                Some(frame) if row.frame < frame => {
                    return Err(Error::Replay(format!(
                        "Line {line}: frame {} follows frame {frame}",
                        row.frame
                    )));
                }
                Some(frame) if row.frame == frame => {}
                _ => {
                    frames.push(LandmarkFrame::empty(Duration::from_millis(row.timestamp_ms)));
                    current = Some(row.frame);
                }
            }

            let landmark = match (row.id, row.x, row.y) {
                (Some(id), Some(x), Some(y)) => Landmark::new(id, x, y),
                (None, None, None) => continue,
                _ => {
                    return Err(Error::Replay(format!(
                        "Line {line}: landmark needs id, x and y"
                    )))
                }
            };

            if let Some(frame) = frames.last_mut() {
                frame.landmarks.push(landmark);
            }
        }

        info!("Loaded {} frames", frames.len());
        Ok(Self {
            inner: VecSource::new(frames),
        })
    }

    /// Frames not yet replayed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl LandmarkSource for CsvReplaySource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        self.inner.next_frame()
    }
}
