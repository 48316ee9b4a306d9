//! Clipline Timeline - Clip partition and timeline interaction state
//!
//! Implements the editing core of a single-track video trimmer:
//! - Split points and the derived, gap-free clip partition
//! - Clip selection and the context menu anchor
//! - Zoom ladder, scroll offset and drag gestures
//! - Debounced, single-flight seeking of an external playback engine

pub mod clip;
pub mod events;
pub mod manager;
pub mod menu;
pub mod seek;
pub mod state;

pub use clip::{clip_containing, compute_clips, validate_partition, Clip, SplitPoint};
pub use events::TimelineEvent;
pub use manager::ClipManager;
pub use menu::MenuState;
pub use seek::{PlaybackEngine, SeekCompletion, SeekPhase, SeekRequest, SeekTracker};
pub use state::{GesturePhase, TimelineState};
