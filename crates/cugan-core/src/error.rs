//! Typed error hierarchy for the adapter.
//!
//! Every construction failure ends up as one `FilterError` surfaced through
//! the host's error-value mechanism; there is no retry or partial-failure
//! recovery. Parameter messages carry the exact user-facing text.

use std::path::PathBuf;

/// All errors originating from the filter adapter.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Argument outside its documented range or enumeration.
    #[error("{0}")]
    Parameter(String),

    /// Input clip format the engine cannot consume.
    #[error("{0}")]
    Format(String),

    /// GPU instance creation or device enumeration failure.
    #[error("{0}")]
    Gpu(String),

    /// Model weight files missing on disk.
    #[error("failed to load model: {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// Failure reported by the external inference engine.
    #[error("{0}")]
    Engine(String),

    /// Engine output did not match the advertised output geometry.
    #[error("engine output geometry mismatch: expected {expected:?}, got {actual:?}")]
    FrameGeometry {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Frame buffer shorter than its geometry requires.
    #[error("frame buffer too small: need {need} bytes, have {have}")]
    BufferTooSmall { need: usize, have: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the adapter crates.
pub type Result<T> = std::result::Result<T, FilterError>;
