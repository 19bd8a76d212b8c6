//! Error types for depthviz.
//!
//! A single error enum covers colormap construction, colorization,
//! configuration and the file-backed sinks.

use thiserror::Error;

/// The main error type for depthviz operations.
#[derive(Error, Debug)]
pub enum DepthvizError {
    /// Malformed control-point table passed to colormap construction
    #[error("Invalid control points: {message}")]
    InvalidControlPoints { message: String },

    /// Sample count or query domain that cannot produce a colormap
    #[error("Invalid resolution: {message}")]
    InvalidResolution { message: String },

    /// Lookup of a colormap name that was never registered
    #[error("Unknown colormap: {name}")]
    UnknownColormap { name: String },

    /// Array shape not matching any supported layout
    #[error("Shape mismatch: expected {expected}, got {actual:?}")]
    ShapeMismatch { expected: String, actual: Vec<usize> },

    /// Normalization maximum resolved to zero or a non-finite value
    #[error("Degenerate normalization: {message}")]
    DegenerateNormalization { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Convenience type alias for Results with DepthvizError
pub type Result<T> = std::result::Result<T, DepthvizError>;

impl DepthvizError {
    /// Build a `ShapeMismatch` from a description of the accepted layout
    pub fn shape_mismatch(expected: &str, actual: &[usize]) -> Self {
        DepthvizError::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_vec(),
        }
    }
}
