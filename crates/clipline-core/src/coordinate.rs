//! Pixel/time conversion for the horizontal timeline.
//!
//! All positions are in content space: pixel `0` is the left edge of the
//! scrollable content, time zero sits `base_offset` pixels to the right of
//! it, and the content is translated by a scroll offset inside a viewport.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::defaults;

/// Stateless conversion between seconds and content pixels at one zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineCoordinate {
    /// Zoom factor. Must be positive.
    pub pixels_per_second: f64,
    /// Padding before time zero, in pixels.
    pub base_offset: f64,
    /// Width reported for an empty timeline.
    pub min_content_width: f64,
}

impl TimelineCoordinate {
    /// Create a converter with the default offsets.
    pub fn new(pixels_per_second: f64) -> Self {
        debug_assert!(pixels_per_second > 0.0);
        Self {
            pixels_per_second,
            base_offset: defaults::BASE_OFFSET,
            min_content_width: defaults::MIN_CONTENT_WIDTH,
        }
    }

    /// Create a converter using the offsets from `config`.
    pub fn from_config(config: &EngineConfig, pixels_per_second: f64) -> Self {
        debug_assert!(pixels_per_second > 0.0);
        Self {
            pixels_per_second,
            base_offset: config.base_offset,
            min_content_width: config.min_content_width,
        }
    }

    /// Same converter with a different leading offset.
    pub fn with_base_offset(mut self, base_offset: f64) -> Self {
        self.base_offset = base_offset;
        self
    }

    #[inline]
    pub fn time_to_pixel(&self, time: f64) -> f64 {
        time * self.pixels_per_second + self.base_offset
    }

    #[inline]
    pub fn pixel_to_time(&self, pixel: f64) -> f64 {
        (pixel - self.base_offset) / self.pixels_per_second
    }

    /// Width in pixels of a pixel span covering `seconds`.
    #[inline]
    pub fn duration_to_width(&self, seconds: f64) -> f64 {
        seconds * self.pixels_per_second
    }

    /// Total scrollable width for a video of `duration` seconds.
    ///
    /// Falls back to `min_content_width` for an unloaded (`duration <= 0`)
    /// timeline so a placeholder still renders.
    pub fn content_width(&self, duration: f64, extra_padding: f64) -> f64 {
        if duration <= 0.0 {
            return self.min_content_width;
        }
        duration * self.pixels_per_second + extra_padding
    }

    /// Scroll offset that puts `time` at the horizontal center of the viewport.
    #[inline]
    pub fn offset_to_center(&self, time: f64, viewport_width: f64) -> f64 {
        viewport_width / 2.0 - self.time_to_pixel(time)
    }

    /// Time under the viewport center for a given scroll offset.
    /// Inverse of [`offset_to_center`](Self::offset_to_center).
    #[inline]
    pub fn time_at_viewport_center(&self, viewport_width: f64, content_offset: f64) -> f64 {
        self.pixel_to_time(viewport_width / 2.0 - content_offset)
    }

    /// Viewport-space x position of `time` for a given scroll offset.
    #[inline]
    pub fn time_to_viewport_x(&self, time: f64, content_offset: f64) -> f64 {
        self.time_to_pixel(time) + content_offset
    }
}

impl Default for TimelineCoordinate {
    fn default() -> Self {
        Self::new(defaults::DEFAULT_ZOOM)
    }
}
