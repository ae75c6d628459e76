//! Error types for grid configuration and surface management.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected grid configuration or surface request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Spacing is non-finite or smaller than [`crate::constants::MIN_GRID_SPACING`].
    #[error("grid spacing must be finite and at least {min}, got {0}", min = crate::constants::MIN_GRID_SPACING)]
    InvalidSpacing(f64),
    /// The major interval must be at least one minor cell.
    #[error("major interval must be at least 1, got {0}")]
    InvalidMajorInterval(u32),
    /// Line widths must be finite and positive.
    #[error("line width must be finite and positive, got {0}")]
    InvalidLineWidth(f64),
    /// Grid scale must be finite and positive.
    #[error("grid scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    /// The content layer cannot be smaller than the visible bounds.
    #[error("oversize factor must be finite and at least 1, got {0}")]
    InvalidOversizeFactor(f64),
    /// Auto-pan speed must be finite and positive.
    #[error("auto-pan speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),
    /// Auto-pan step must be finite.
    #[error("auto-pan step must be finite, got {0}")]
    InvalidStep(f64),
    /// Auto-pan interval of zero would never fire.
    #[error("auto-pan interval must be at least 1 ms")]
    InvalidInterval,
    /// Viewport offsets must be finite.
    #[error("viewport offset must be finite, got ({x}, {y})")]
    NonFiniteOffset {
        /// Requested horizontal offset
        x: f64,
        /// Requested vertical offset
        y: f64,
    },
    /// Color strings are `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color {0:?}, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
    /// Requested surface exceeds [`crate::constants::MAX_SURFACE_DIMENSION`] on a side.
    #[error("surface {width}x{height} exceeds the maximum side of {max} pixels", max = crate::constants::MAX_SURFACE_DIMENSION)]
    SurfaceTooLarge {
        /// Requested width in device pixels
        width: u32,
        /// Requested height in device pixels
        height: u32,
    },
}

/// Failure to load a [`crate::GridEditConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The config parsed but holds values the grid rejects.
    #[error("invalid config: {0}")]
    Invalid(#[from] GridError),
}
