//! Error types for the face anchor library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Landmark detector failed for the current frame
    #[error("Detector error: {0}")]
    Detector(String),

    /// Pose estimator failed for the current frame
    #[error("Estimator error: {0}")]
    Estimator(String),

    /// Frame scheduling primitive failed
    #[error("Scheduling error: {0}")]
    Scheduling(String),

    /// An anchor transform was requested while no stabilized face is cached
    #[error("No stabilized face estimate available")]
    NoActiveFace,

    /// A landmark index beyond the canonical landmark count was requested
    #[error("Landmark index {index} out of range (count: {count})")]
    LandmarkOutOfRange {
        /// Requested landmark index
        index: usize,
        /// Number of landmarks in the stabilized estimate
        count: usize,
    },
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
