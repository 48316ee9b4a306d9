//! Split points and the clip partition derived from them.
//!
//! Clips are never stored independently: they are recomputed from the
//! video duration and the split points on every change, which keeps the
//! partition gap-free by construction.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// A user-chosen position dividing the video into two clips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitPoint {
    /// Unique split ID
    pub id: Uuid,
    /// Position in seconds, strictly inside the video
    pub time: f64,
}

impl SplitPoint {
    /// Create a split point with a fresh ID.
    pub fn new(time: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
        }
    }
}

/// A contiguous range of the video between two consecutive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Start time in seconds (inclusive)
    pub start_time: f64,
    /// End time in seconds (exclusive, except for the last clip)
    pub end_time: f64,
    /// Position in the ordered sequence
    pub index: usize,
    /// Is clip selected
    pub is_selected: bool,
}

impl Clip {
    /// Length of the clip in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Check if `time` falls in `[start_time, end_time)`.
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }

    /// Midpoint of the clip in seconds.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.start_time + self.end_time) / 2.0
    }
}

/// Derive the ordered clip partition of `[0, duration)`.
///
/// Expects deduplicated, strictly interior split times; they are sorted
/// here, so the result does not depend on insertion order. A non-positive
/// duration yields no clips.
pub fn compute_clips(duration: f64, split_points: &[SplitPoint]) -> Vec<Clip> {
    if duration <= 0.0 {
        return Vec::new();
    }

    let mut boundaries: SmallVec<[f64; 16]> = SmallVec::with_capacity(split_points.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(split_points.iter().map(|sp| sp.time));
    boundaries[1..].sort_by(f64::total_cmp);
    boundaries.push(duration);

    boundaries
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Clip {
            start_time: pair[0],
            end_time: pair[1],
            index,
            is_selected: false,
        })
        .collect()
}

/// Find the clip under `time`. The very end of the video maps to the last clip.
pub fn clip_containing(time: f64, clips: &[Clip]) -> Option<&Clip> {
    if let Some(clip) = clips.iter().find(|clip| clip.contains(time)) {
        return Some(clip);
    }
    clips.last().filter(|last| time == last.end_time)
}

/// Check that `clips` exactly tiles `[0, duration)` with indexed,
/// non-empty clips and at most one selection.
pub fn validate_partition(duration: f64, clips: &[Clip]) -> bool {
    let (Some(first), Some(last)) = (clips.first(), clips.last()) else {
        return false;
    };
    if first.start_time != 0.0 || last.end_time != duration {
        return false;
    }
    if clips
        .iter()
        .enumerate()
        .any(|(i, clip)| clip.index != i || clip.start_time >= clip.end_time)
    {
        return false;
    }
    if clips.windows(2).any(|w| w[0].end_time != w[1].start_time) {
        return false;
    }
    clips.iter().filter(|clip| clip.is_selected).count() <= 1
}
