//! Context menu anchor for the selected clip.

use clipline_core::TimelineCoordinate;

use crate::clip::Clip;
use crate::events::TimelineEvent;
use crate::manager::ClipManager;

/// Cached on-screen position of the clip context menu.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuState {
    pub is_visible: bool,
    /// Clip the menu is attached to
    pub anchor_clip: Option<usize>,
    /// Viewport x of the clip's horizontal center
    pub anchor_x: f64,
    /// On-screen width of the anchored clip
    pub anchor_width: f64,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the menu above `clip`.
    pub fn show_for(&mut self, clip: &Clip, coordinate: &TimelineCoordinate, content_offset: f64) {
        self.is_visible = true;
        self.anchor_clip = Some(clip.index);
        self.anchor_x = coordinate.time_to_viewport_x(clip.midpoint(), content_offset);
        self.anchor_width = coordinate.duration_to_width(clip.duration());
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }

    /// Follow the manager's selection; re-anchors after zoom or scroll.
    pub fn sync(
        &mut self,
        clips: &ClipManager,
        coordinate: &TimelineCoordinate,
        content_offset: f64,
    ) {
        match clips.selected_clip() {
            Some(clip) => self.show_for(clip, coordinate, content_offset),
            None => self.hide(),
        }
    }

    /// React to a clip manager event. Returns true when the anchor needs a
    /// [`sync`](Self::sync) because a clip was newly selected.
    pub fn handle(&mut self, event: &TimelineEvent) -> bool {
        match event {
            TimelineEvent::SelectionChanged { index: Some(_) } => true,
            TimelineEvent::SelectionChanged { index: None }
            | TimelineEvent::ClipsChanged { .. }
            | TimelineEvent::VideoLoaded { .. }
            | TimelineEvent::Reset => {
                self.hide();
                false
            }
            TimelineEvent::ZoomChanged { .. } | TimelineEvent::OffsetChanged { .. } => {
                self.is_visible
            }
            _ => false,
        }
    }
}
