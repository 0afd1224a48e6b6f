//! Error types for the gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Landmark recording could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Delivering an action to the input layer failed
    #[error("Input sink error: {0}")]
    InputSink(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A landmark id was not present in the current frame
    #[error("Landmark {0} not present in frame")]
    MissingLandmark(usize),

    /// Filter initialization error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Landmark replay stream is malformed
    #[error("Replay error: {0}")]
    Replay(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
