//! Error types for the gamut engine.
//!
//! Numeric conversions and mixing never fail. Errors are limited to invalid
//! configuration, queries against a gamut that has not been built and
//! settings that cannot be read.

use thiserror::Error;

/// Gamut engine error.
#[derive(Debug, Error)]
pub enum Error {
    /// Mixing ratios need at least two steps between pure pigments.
    #[error("step count must be at least 2, got {0}")]
    InvalidStepCount(usize),

    /// A control lattice needs at least two points per axis.
    #[error("lattice size must be at least 2, got {0}")]
    InvalidLatticeSize(usize),

    /// The occupancy grid needs at least one cell per axis.
    #[error("occupancy grid resolution must be at least 1, got {0}")]
    InvalidResolution(usize),

    /// The occupancy tolerance must be a finite, non-negative distance.
    #[error("occupancy tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    /// Transition durations must be finite and non-negative.
    #[error("transition duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),

    /// The ordinal does not name a color space.
    #[error("unknown color space ordinal {0}")]
    UnknownColorSpace(u8),

    /// The name does not match any palette preset.
    #[error("unknown palette preset '{0}'")]
    UnknownPreset(String),

    /// A query was made while the gamut is waiting for a rebuild.
    #[error("gamut is stale and must be rebuilt before it can be queried")]
    Stale,

    /// Settings could not be parsed or written.
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for gamut engine operations.
pub type Result<T> = std::result::Result<T, Error>;
