//! Change events published by the clip manager and timeline state.

/// Something observable changed; renderers re-read the relevant snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    VideoLoaded {
        duration: f64,
    },
    /// The clip partition was recomputed.
    ClipsChanged {
        count: usize,
    },
    SelectionChanged {
        index: Option<usize>,
    },
    ZoomChanged {
        pixels_per_second: f64,
    },
    OffsetChanged {
        content_offset: f64,
    },
    DragStarted,
    DragEnded,
    SeekStarted {
        target_time: f64,
    },
    SeekCompleted {
        target_time: f64,
    },
    SeekFailed {
        target_time: f64,
        consecutive_failures: u32,
    },
    /// State was restored to defaults.
    Reset,
}
