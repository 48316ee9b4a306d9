//! Authoritative split point set and selection for one loaded video.

use clipline_core::{ChangeNotifier, ClipError, ConfigError, EngineConfig, Result};
use crossbeam_channel::Receiver;
use smallvec::SmallVec;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clip::{clip_containing, compute_clips, validate_partition, Clip, SplitPoint};
use crate::events::TimelineEvent;

/// Owns split points and selection; the clip list is always derived.
#[derive(Debug)]
pub struct ClipManager {
    split_epsilon: f64,
    duration: f64,
    /// Sorted ascending by time, times unique within `split_epsilon`
    split_points: SmallVec<[SplitPoint; 16]>,
    selected: Option<usize>,
    clips: Vec<Clip>,
    notifier: ChangeNotifier<TimelineEvent>,
}

impl ClipManager {
    /// Create an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::from_validated(&EngineConfig::default())
    }

    /// Create an empty manager. No clips exist until a video is loaded.
    pub fn with_config(config: &EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: &EngineConfig) -> Self {
        Self {
            split_epsilon: config.split_epsilon,
            duration: 0.0,
            split_points: SmallVec::new(),
            selected: None,
            clips: Vec::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Subscribe to clip and selection changes.
    pub fn subscribe(&mut self) -> Receiver<TimelineEvent> {
        self.notifier.subscribe()
    }

    /// Start editing a new video, discarding all splits and selection.
    pub fn load_video(&mut self, duration: f64) -> Result<&[Clip]> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ClipError::InvalidDuration { duration });
        }

        info!("Loading video ({:.3}s)", duration);
        self.duration = duration;
        self.split_points.clear();
        self.selected = None;
        self.recompute();

        self.notifier.notify(TimelineEvent::VideoLoaded { duration });
        self.notifier.notify(TimelineEvent::ClipsChanged {
            count: self.clips.len(),
        });
        Ok(&self.clips)
    }

    /// Return to the unloaded state.
    pub fn clear(&mut self) {
        self.duration = 0.0;
        self.split_points.clear();
        self.selected = None;
        self.clips.clear();
        self.notifier.notify(TimelineEvent::Reset);
    }

    /// Insert a split at `time` and recompute the partition.
    ///
    /// Splitting ends any selection. Out-of-range times are rejected, never
    /// clamped.
    pub fn add_split_point(&mut self, time: f64) -> Result<&[Clip]> {
        if time.is_nan() || time <= 0.0 || time >= self.duration {
            return Err(ClipError::OutOfRange {
                time,
                duration: self.duration,
            });
        }
        if let Some(existing) = self
            .split_points
            .iter()
            .find(|sp| (sp.time - time).abs() <= self.split_epsilon)
        {
            return Err(ClipError::DuplicateSplit {
                time,
                existing: existing.time,
            });
        }

        let position = self.split_points.partition_point(|sp| sp.time < time);
        self.split_points.insert(position, SplitPoint::new(time));
        info!(
            "Split at {:.3}s ({} splits)",
            time,
            self.split_points.len()
        );

        self.after_split_change();
        Ok(&self.clips)
    }

    /// Remove the split with `id`, merging its two neighbouring clips.
    pub fn remove_split_point(&mut self, id: Uuid) -> Result<&[Clip]> {
        let position = self
            .split_points
            .iter()
            .position(|sp| sp.id == id)
            .ok_or(ClipError::SplitNotFound { id })?;

        let removed = self.split_points.remove(position);
        info!("Removed split at {:.3}s", removed.time);

        self.after_split_change();
        Ok(&self.clips)
    }

    /// Select the clip at `index`, deselecting any other.
    pub fn select_clip(&mut self, index: usize) -> Result<&Clip> {
        if index >= self.clips.len() {
            return Err(ClipError::IndexOutOfRange {
                index,
                len: self.clips.len(),
            });
        }

        let changed = self.selected != Some(index);
        self.selected = Some(index);
        self.apply_selection();
        if changed {
            debug!("Selected clip {}", index);
            self.notifier.notify(TimelineEvent::SelectionChanged {
                index: Some(index),
            });
        }
        Ok(&self.clips[index])
    }

    /// Deselect. Calling with nothing selected is a no-op.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.apply_selection();
            self.notifier
                .notify(TimelineEvent::SelectionChanged { index: None });
        }
    }

    /// Current clip partition.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Split points in ascending time order.
    pub fn split_points(&self) -> &[SplitPoint] {
        &self.split_points
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_loaded(&self) -> bool {
        self.duration > 0.0
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selected.and_then(|index| self.clips.get(index))
    }

    /// Clip under `time`, if any.
    pub fn clip_at_time(&self, time: f64) -> Option<&Clip> {
        clip_containing(time, &self.clips)
    }

    fn after_split_change(&mut self) {
        let had_selection = self.selected.take().is_some();
        self.recompute();
        self.notifier.notify(TimelineEvent::ClipsChanged {
            count: self.clips.len(),
        });
        if had_selection {
            self.notifier
                .notify(TimelineEvent::SelectionChanged { index: None });
        }
    }

    fn recompute(&mut self) {
        self.clips = compute_clips(self.duration, &self.split_points);
        self.apply_selection();
        debug_assert!(validate_partition(self.duration, &self.clips));
    }

    fn apply_selection(&mut self) {
        for clip in &mut self.clips {
            clip.is_selected = Some(clip.index) == self.selected;
        }
    }
}

impl Default for ClipManager {
    fn default() -> Self {
        Self::new()
    }
}
