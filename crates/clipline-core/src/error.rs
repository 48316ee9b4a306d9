//! Error types for Clipline.

use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised by clip and split point editing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    #[error("Invalid video duration: {duration}s (must be > 0)")]
    InvalidDuration { duration: f64 },

    #[error("Split time {time}s is outside the open range (0, {duration}s)")]
    OutOfRange { time: f64, duration: f64 },

    #[error("Split time {time}s duplicates existing split at {existing}s")]
    DuplicateSplit { time: f64, existing: f64 },

    #[error("Clip index {index} out of range (clip count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Split point not found: {id}")]
    SplitNotFound { id: Uuid },
}

/// Failure reported by the playback engine for an issued seek.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeekError {
    #[error("Seek to {target_time}s failed ({consecutive_failures} consecutive failures)")]
    Failed {
        target_time: f64,
        consecutive_failures: u32,
    },
}

/// Errors loading or validating an engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type alias for clip editing operations.
pub type Result<T> = std::result::Result<T, ClipError>;
