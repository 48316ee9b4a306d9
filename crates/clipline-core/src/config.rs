//! Engine configuration.
//!
//! Every tuning constant the engine relies on lives here so callers can
//! override it (e.g. from a JSON settings file) instead of patching code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::defaults;
use crate::error::ConfigError;

/// Policy constants for the timeline engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum interval between issued seeks, in milliseconds.
    pub seek_debounce_ms: u64,
    /// Duplicate split tolerance, in seconds.
    pub split_epsilon: f64,
    /// Leading padding before time zero, in pixels.
    pub base_offset: f64,
    /// Padding appended after the video end, in pixels.
    pub trailing_padding: f64,
    /// Content width used when no video is loaded.
    pub min_content_width: f64,
    /// Ascending zoom ladder in pixels per second.
    pub zoom_levels: Vec<f64>,
    /// Zoom applied on construction and reset.
    pub default_zoom: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seek_debounce_ms: defaults::SEEK_DEBOUNCE_MS,
            split_epsilon: defaults::SPLIT_EPSILON,
            base_offset: defaults::BASE_OFFSET,
            trailing_padding: defaults::TRAILING_PADDING,
            min_content_width: defaults::MIN_CONTENT_WIDTH,
            zoom_levels: defaults::ZOOM_LEVELS.to_vec(),
            default_zoom: defaults::DEFAULT_ZOOM,
        }
    }
}

impl EngineConfig {
    /// Seek debounce interval as a [`Duration`].
    pub fn seek_debounce(&self) -> Duration {
        Duration::from_millis(self.seek_debounce_ms)
    }

    /// Lowest zoom level.
    pub fn min_zoom(&self) -> f64 {
        self.zoom_levels
            .first()
            .copied()
            .unwrap_or(defaults::ZOOM_LEVELS[0])
    }

    /// Highest zoom level.
    pub fn max_zoom(&self) -> f64 {
        self.zoom_levels
            .last()
            .copied()
            .unwrap_or(defaults::ZOOM_LEVELS[defaults::ZOOM_LEVELS.len() - 1])
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zoom_levels.is_empty() {
            return Err(ConfigError::Invalid("zoom ladder is empty".into()));
        }
        if self.zoom_levels.iter().any(|z| !z.is_finite() || *z <= 0.0) {
            return Err(ConfigError::Invalid(
                "zoom levels must be finite and positive".into(),
            ));
        }
        if self.zoom_levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Invalid(
                "zoom levels must be strictly ascending".into(),
            ));
        }
        if !(self.min_zoom()..=self.max_zoom()).contains(&self.default_zoom) {
            return Err(ConfigError::Invalid(format!(
                "default zoom {} outside [{}, {}]",
                self.default_zoom,
                self.min_zoom(),
                self.max_zoom()
            )));
        }
        if self.split_epsilon.is_nan() || self.split_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "split epsilon must be non-negative, got {}",
                self.split_epsilon
            )));
        }
        if self.min_content_width < 0.0 || self.trailing_padding < 0.0 {
            return Err(ConfigError::Invalid("widths must be non-negative".into()));
        }
        Ok(())
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Deserialize and validate from JSON bytes. Missing fields take defaults.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| ConfigError::Parse(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
