//! Error types for the gesture control library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required body landmark was missing from the pose frame
    #[error("Missing landmark: {0}")]
    MissingLandmark(String),

    /// Landmark data was present but unusable (NaN coordinates, etc.)
    #[error("Malformed landmark data: {0}")]
    MalformedLandmark(String),

    /// Pose frame decoding error (replay stream)
    #[error("Frame decode error: {0}")]
    FrameDecode(String),

    /// Action dispatch to the OS failed
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
