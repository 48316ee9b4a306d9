//! Integration tests for split editing and selection.
//!
//! Exercises clipline-core errors and coordinates together with the clip
//! manager, timeline state and menu.

use clipline_core::{ClipError, EngineConfig};
use clipline_timeline::{validate_partition, ClipManager, MenuState, TimelineEvent, TimelineState};

use crate::init_logging;

// ── Helpers ────────────────────────────────────────────────────

const VIEWPORT: f64 = 390.0;

fn ranges(manager: &ClipManager) -> Vec<(f64, f64)> {
    manager
        .clips()
        .iter()
        .map(|c| (c.start_time, c.end_time))
        .collect()
}

fn selected_count(manager: &ClipManager) -> usize {
    manager.clips().iter().filter(|c| c.is_selected).count()
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn split_then_select_then_split_again() {
    init_logging();
    let mut manager = ClipManager::new();
    manager.load_video(120.0).unwrap();

    manager.add_split_point(40.0).unwrap();
    manager.add_split_point(90.0).unwrap();
    assert_eq!(
        ranges(&manager),
        vec![(0.0, 40.0), (40.0, 90.0), (90.0, 120.0)]
    );

    manager.select_clip(1).unwrap();
    assert_eq!(selected_count(&manager), 1);

    manager.add_split_point(60.0).unwrap();
    assert_eq!(
        ranges(&manager),
        vec![(0.0, 40.0), (40.0, 60.0), (60.0, 90.0), (90.0, 120.0)]
    );
    assert_eq!(manager.selected_index(), None);
    assert_eq!(selected_count(&manager), 0);
    assert!(validate_partition(120.0, manager.clips()));
}

#[test]
fn splits_at_video_edges_are_rejected() {
    init_logging();
    let mut manager = ClipManager::new();
    manager.load_video(10.0).unwrap();

    assert_eq!(
        manager.add_split_point(0.0).unwrap_err(),
        ClipError::OutOfRange {
            time: 0.0,
            duration: 10.0
        }
    );
    assert_eq!(
        manager.add_split_point(10.0).unwrap_err(),
        ClipError::OutOfRange {
            time: 10.0,
            duration: 10.0
        }
    );
    assert_eq!(ranges(&manager), vec![(0.0, 10.0)]);
}

#[test]
fn out_of_range_for_many_durations() {
    let mut manager = ClipManager::new();
    for duration in [0.5, 1.0, 33.3, 7200.0] {
        manager.load_video(duration).unwrap();
        for t in [-1.0, 0.0, duration, duration + 0.001] {
            assert!(matches!(
                manager.add_split_point(t),
                Err(ClipError::OutOfRange { .. })
            ));
        }
        assert_eq!(manager.clips().len(), 1);
    }
}

#[test]
fn selection_stays_exclusive_across_mixed_operations() {
    let mut manager = ClipManager::new();
    manager.load_video(50.0).unwrap();

    enum Op {
        Split(f64),
        Select(usize),
        Clear,
    }
    let ops = [
        Op::Split(10.0),
        Op::Select(1),
        Op::Select(0),
        Op::Split(30.0),
        Op::Select(2),
        Op::Clear,
        Op::Select(1),
        Op::Select(9),
    ];

    for op in ops {
        match op {
            Op::Split(t) => {
                manager.add_split_point(t).unwrap();
            }
            Op::Select(index) => {
                let _ = manager.select_clip(index);
            }
            Op::Clear => manager.clear_selection(),
        }
        assert!(selected_count(&manager) <= 1);
        assert!(validate_partition(50.0, manager.clips()));
    }
    assert_eq!(manager.selected_index(), Some(1));
}

#[test]
fn menu_split_action_through_timeline_state() {
    init_logging();
    let mut state = TimelineState::new();
    let clip_events = state.clips_mut().subscribe();
    state.load_video(30.0).unwrap();
    state.clips_mut().select_clip(0).unwrap();

    let mut menu = MenuState::new();
    let coord = state.coordinate();
    for event in clip_events.try_iter() {
        if menu.handle(&event) {
            menu.sync(state.clips(), &coord, state.content_offset());
        }
    }
    assert!(menu.is_visible);
    assert_eq!(menu.anchor_clip, Some(0));

    state.center_on(12.0, VIEWPORT);
    let clips = state.split_at_center(VIEWPORT).unwrap();
    assert_eq!(clips.len(), 2);

    let received: Vec<TimelineEvent> = clip_events.try_iter().collect();
    for event in &received {
        menu.handle(event);
    }
    assert!(!menu.is_visible);
    assert!(received.contains(&TimelineEvent::SelectionChanged { index: None }));
}

#[test]
fn duplicate_split_keeps_partition() {
    let config = EngineConfig::from_json(br#"{ "split_epsilon": 0.001 }"#).unwrap();
    let mut manager = ClipManager::with_config(&config).unwrap();
    manager.load_video(10.0).unwrap();
    manager.add_split_point(2.5).unwrap();

    let before = manager.clips().to_vec();
    assert!(matches!(
        manager.add_split_point(2.5009),
        Err(ClipError::DuplicateSplit { .. })
    ));
    assert_eq!(manager.clips(), before.as_slice());
}

#[test]
fn new_video_replaces_session() {
    let mut state = TimelineState::new();
    state.load_video(30.0).unwrap();
    state.clips_mut().add_split_point(10.0).unwrap();
    state.zoom_in();

    state.load_video(45.0).unwrap();
    assert_eq!(ranges(state.clips()), vec![(0.0, 45.0)]);
    assert_eq!(state.pixels_per_second(), state.config().default_zoom);
}
