//! Clipline Core - Foundation types for the timeline engine
//!
//! This crate provides the framework-agnostic pieces shared by the
//! timeline crate:
//! - Error types for clip editing, seeking and configuration
//! - Engine configuration (policy constants)
//! - Pixel/time coordinate conversion
//! - Change notification channels

pub mod config;
pub mod coordinate;
pub mod error;
pub mod notify;

pub use config::EngineConfig;
pub use coordinate::TimelineCoordinate;
pub use error::{ClipError, ConfigError, Result, SeekError};
pub use notify::ChangeNotifier;

/// Default policy values used by [`EngineConfig::default`].
pub mod defaults {
    /// Minimum interval between two issued seeks (~30 seeks per second).
    pub const SEEK_DEBOUNCE_MS: u64 = 33;

    /// Two split points closer than this (seconds) are duplicates.
    pub const SPLIT_EPSILON: f64 = 0.001;

    /// Leading padding before time zero, in pixels.
    pub const BASE_OFFSET: f64 = 500.0;

    /// Padding after the last frame, in pixels.
    pub const TRAILING_PADDING: f64 = 500.0;

    /// Placeholder width for an unloaded timeline, in pixels.
    pub const MIN_CONTENT_WIDTH: f64 = 400.0;

    /// Discrete zoom ladder in pixels per second.
    pub const ZOOM_LEVELS: [f64; 6] = [10.0, 25.0, 50.0, 100.0, 150.0, 200.0];

    /// Initial zoom in pixels per second.
    pub const DEFAULT_ZOOM: f64 = 50.0;
}
