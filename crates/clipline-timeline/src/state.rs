//! Timeline interaction state: zoom, scroll, drag gestures and seeking.
//!
//! All methods run on the control (UI) thread. Seek completions coming from
//! the playback engine are picked up by [`TimelineState::poll_seek_completions`].

use std::time::Instant;

use clipline_core::{
    ChangeNotifier, ConfigError, EngineConfig, Result, SeekError, TimelineCoordinate,
};
use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::clip::Clip;
use crate::events::TimelineEvent;
use crate::manager::ClipManager;
use crate::seek::{PlaybackEngine, SeekRequest, SeekTracker};

/// Drag/scrub gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
}

/// Per-session timeline state, composed with the session's clip manager.
#[derive(Debug)]
pub struct TimelineState {
    config: EngineConfig,
    pixels_per_second: f64,
    content_offset: f64,
    gesture: GesturePhase,
    is_actively_scrubbing: bool,
    drag_velocity: f64,
    seek: SeekTracker,
    clips: ClipManager,
    notifier: ChangeNotifier<TimelineEvent>,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::from_validated(EngineConfig::default())
    }

    /// Create a session state from `config`, rejecting inconsistent values.
    pub fn with_config(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        let pixels_per_second = snap_to_ladder(&config, config.default_zoom);
        Self {
            pixels_per_second,
            content_offset: 0.0,
            gesture: GesturePhase::Idle,
            is_actively_scrubbing: false,
            drag_velocity: 0.0,
            seek: SeekTracker::new(config.seek_debounce()),
            clips: ClipManager::from_validated(&config),
            notifier: ChangeNotifier::new(),
            config,
        }
    }

    /// Subscribe to zoom, scroll, gesture and seek changes.
    /// Clip changes are published by [`ClipManager::subscribe`].
    pub fn subscribe(&mut self) -> Receiver<TimelineEvent> {
        self.notifier.subscribe()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clips(&self) -> &ClipManager {
        &self.clips
    }

    pub fn clips_mut(&mut self) -> &mut ClipManager {
        &mut self.clips
    }

    /// Load a new video: replaces the clip partition, then resets view and
    /// gesture state and the seek failure counter. A seek still in flight
    /// stays in flight. An invalid duration leaves everything untouched.
    pub fn load_video(&mut self, duration: f64) -> Result<&[Clip]> {
        self.clips.load_video(duration)?;
        self.reset_view();
        self.seek.reset_failure_tracking();
        self.notifier.notify(TimelineEvent::Reset);
        Ok(self.clips.clips())
    }

    /// Restore every field to its default without dropping subscribers.
    pub fn reset(&mut self) {
        self.reset_view();
        self.seek.reset();
        self.clips.clear();
        self.notifier.notify(TimelineEvent::Reset);
    }

    fn reset_view(&mut self) {
        self.pixels_per_second = snap_to_ladder(&self.config, self.config.default_zoom);
        self.content_offset = 0.0;
        self.gesture = GesturePhase::Idle;
        self.is_actively_scrubbing = false;
        self.drag_velocity = 0.0;
        debug!("Timeline view reset");
    }

    // ── Coordinates ────────────────────────────────────────────

    /// Converter for the current zoom.
    pub fn coordinate(&self) -> TimelineCoordinate {
        TimelineCoordinate::from_config(&self.config, self.pixels_per_second)
    }

    /// Scrollable content width for the loaded video.
    pub fn content_width(&self) -> f64 {
        self.coordinate()
            .content_width(self.clips.duration(), self.config.trailing_padding)
    }

    /// Time under the playhead (viewport center).
    pub fn time_at_center(&self, viewport_width: f64) -> f64 {
        self.coordinate()
            .time_at_viewport_center(viewport_width, self.content_offset)
    }

    // ── Zoom ───────────────────────────────────────────────────

    pub fn pixels_per_second(&self) -> f64 {
        self.pixels_per_second
    }

    /// Step to the next ladder level above the current zoom.
    pub fn zoom_in(&mut self) {
        let next = self
            .config
            .zoom_levels
            .iter()
            .copied()
            .find(|level| *level > self.pixels_per_second)
            .unwrap_or_else(|| self.config.max_zoom());
        self.apply_zoom(next);
    }

    /// Step to the next ladder level below the current zoom.
    pub fn zoom_out(&mut self) {
        let next = self
            .config
            .zoom_levels
            .iter()
            .rev()
            .copied()
            .find(|level| *level < self.pixels_per_second)
            .unwrap_or_else(|| self.config.min_zoom());
        self.apply_zoom(next);
    }

    /// Set an arbitrary zoom, clamped into the ladder's range and snapped to
    /// the nearest ladder level. Does not touch the scroll offset.
    pub fn set_zoom(&mut self, pixels_per_second: f64) {
        if pixels_per_second.is_nan() {
            return;
        }
        self.apply_zoom(snap_to_ladder(&self.config, pixels_per_second));
    }

    /// Set the zoom and re-center so the time under the playhead stays put.
    pub fn set_zoom_keeping_center(&mut self, pixels_per_second: f64, viewport_width: f64) {
        let centered = self.time_at_center(viewport_width);
        self.set_zoom(pixels_per_second);
        self.center_on(centered, viewport_width);
    }

    fn apply_zoom(&mut self, pixels_per_second: f64) {
        let clamped = pixels_per_second.clamp(self.config.min_zoom(), self.config.max_zoom());
        if clamped == self.pixels_per_second {
            return;
        }
        self.pixels_per_second = clamped;
        debug!("Zoom {} px/s", clamped);
        self.notifier.notify(TimelineEvent::ZoomChanged {
            pixels_per_second: clamped,
        });
    }

    // ── Scroll ─────────────────────────────────────────────────

    pub fn content_offset(&self) -> f64 {
        self.content_offset
    }

    pub fn scroll_to(&mut self, content_offset: f64) {
        if content_offset == self.content_offset || content_offset.is_nan() {
            return;
        }
        self.content_offset = content_offset;
        self.notifier
            .notify(TimelineEvent::OffsetChanged { content_offset });
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.content_offset + delta);
    }

    /// Scroll so `time` sits under the playhead.
    pub fn center_on(&mut self, time: f64, viewport_width: f64) {
        let offset = self.coordinate().offset_to_center(time, viewport_width);
        self.scroll_to(offset);
    }

    // ── Drag gesture ───────────────────────────────────────────

    pub fn gesture(&self) -> GesturePhase {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture == GesturePhase::Dragging
    }

    pub fn is_actively_scrubbing(&self) -> bool {
        self.is_actively_scrubbing
    }

    pub fn drag_velocity(&self) -> f64 {
        self.drag_velocity
    }

    pub fn start_drag_gesture(&mut self) {
        self.gesture = GesturePhase::Dragging;
        self.is_actively_scrubbing = true;
        self.drag_velocity = 0.0;
        self.notifier.notify(TimelineEvent::DragStarted);
    }

    /// End the drag. Callers issue one final unconditional seek afterwards.
    pub fn end_drag_gesture(&mut self) {
        self.gesture = GesturePhase::Idle;
        self.is_actively_scrubbing = false;
        self.drag_velocity = 0.0;
        self.notifier.notify(TimelineEvent::DragEnded);
    }

    /// Best-effort UI hint; accepted outside a drag too.
    pub fn update_drag_velocity(&mut self, velocity: f64) {
        self.drag_velocity = velocity;
    }

    // ── Seeking ────────────────────────────────────────────────

    pub fn is_seeking(&self) -> bool {
        self.seek.is_seeking()
    }

    pub fn last_seek_time(&self) -> Option<Instant> {
        self.seek.last_seek_time()
    }

    pub fn last_successful_seek_time(&self) -> f64 {
        self.seek.last_successful_seek_time()
    }

    pub fn consecutive_seek_failures(&self) -> u32 {
        self.seek.consecutive_failures()
    }

    pub fn should_perform_seek(&self, now: Instant) -> bool {
        self.seek.should_perform_seek(now)
    }

    /// Issue a seek unless one is already in flight.
    pub fn perform_seek(
        &mut self,
        target_time: f64,
        now: Instant,
        engine: &mut dyn PlaybackEngine,
    ) -> SeekRequest {
        let request = self.seek.perform_seek(target_time, now, engine);
        if request.is_issued() {
            self.notifier
                .notify(TimelineEvent::SeekStarted { target_time });
        }
        request
    }

    /// Seek to the playhead time if the debounce window allows it.
    /// Returns `None` when throttled.
    pub fn scrub(
        &mut self,
        viewport_width: f64,
        now: Instant,
        engine: &mut dyn PlaybackEngine,
    ) -> Option<SeekRequest> {
        if !self.should_perform_seek(now) {
            return None;
        }
        let target = self.time_at_center(viewport_width);
        Some(self.perform_seek(target, now, engine))
    }

    /// Apply seek completions posted by the engine, in order.
    pub fn poll_seek_completions(&mut self) -> Vec<std::result::Result<f64, SeekError>> {
        let results = self.seek.poll();
        for result in &results {
            let event = match result {
                Ok(target_time) => TimelineEvent::SeekCompleted {
                    target_time: *target_time,
                },
                Err(SeekError::Failed {
                    target_time,
                    consecutive_failures,
                }) => TimelineEvent::SeekFailed {
                    target_time: *target_time,
                    consecutive_failures: *consecutive_failures,
                },
            };
            self.notifier.notify(event);
        }
        results
    }

    pub fn reset_seek_failure_tracking(&mut self) {
        self.seek.reset_failure_tracking();
    }

    /// Keep the playhead on the engine's position while idle.
    /// Returns false when a drag or seek owns the offset.
    pub fn follow_playback(&mut self, engine: &dyn PlaybackEngine, viewport_width: f64) -> bool {
        if self.is_dragging() || self.is_seeking() {
            return false;
        }
        self.center_on(engine.current_position(), viewport_width);
        true
    }

    // ── Editing ────────────────────────────────────────────────

    /// Split at the playhead and close the selection.
    pub fn split_at_center(&mut self, viewport_width: f64) -> Result<&[Clip]> {
        let time = self.time_at_center(viewport_width);
        self.clips.add_split_point(time)?;
        self.clips.clear_selection();
        info!("Split at playhead {:.3}s", time);
        Ok(self.clips.clips())
    }
}

/// Nearest ladder level to `pixels_per_second`; ties resolve to the lower level.
fn snap_to_ladder(config: &EngineConfig, pixels_per_second: f64) -> f64 {
    let clamped = pixels_per_second.clamp(config.min_zoom(), config.max_zoom());
    config
        .zoom_levels
        .iter()
        .copied()
        .min_by(|a, b| (a - clamped).abs().total_cmp(&(b - clamped).abs()))
        .unwrap_or(clamped)
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new()
    }
}
