//! Error types for cave generation.

use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Error, Debug)]
pub enum CaveError {
    /// Map dimensions too small to hold a border and an interior.
    #[error("invalid dimensions {width}x{height}: both must be at least 3")]
    InvalidDimension { width: usize, height: usize },

    /// Fill percentage outside 0..=100.
    #[error("invalid fill percent {0}: must be within 0..=100")]
    InvalidFillPercent(u8),

    /// Every floor region was pruned, so there is no main room to connect to.
    #[error("no rooms survived region filtering")]
    EmptyRoomSet,

    /// A square produced a case index outside the 16-entry table.
    #[error("invalid marching squares configuration {0}")]
    InvalidConfiguration(u8),

    /// Mesh square size must be a positive finite number.
    #[error("invalid square size {0}: must be finite and greater than zero")]
    InvalidSquareSize(f32),

    /// JSON config could not be parsed, or an export could not be serialized.
    #[error("json error: {0}")]
    Json(String),

    /// ASCII grid text was malformed.
    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("image export failed: {0}")]
    Image(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CaveError {
    fn from(err: serde_json::Error) -> Self {
        CaveError::Json(err.to_string())
    }
}

impl From<image::ImageError> for CaveError {
    fn from(err: image::ImageError) -> Self {
        CaveError::Image(err.to_string())
    }
}

/// Result type for cave generation.
pub type Result<T> = std::result::Result<T, CaveError>;
