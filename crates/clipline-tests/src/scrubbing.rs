//! Integration tests for drag scrubbing against a playback engine.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clipline_core::SeekError;
use clipline_timeline::{PlaybackEngine, SeekCompletion, SeekRequest, TimelineState};

use crate::init_logging;

const VIEWPORT: f64 = 400.0;

/// Engine that finishes seeks on a worker thread, like a real media stack.
struct ThreadedEngine {
    position: f64,
    outcomes: Vec<bool>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl ThreadedEngine {
    fn new(outcomes: Vec<bool>) -> Self {
        Self {
            position: 0.0,
            outcomes,
            workers: Vec::new(),
        }
    }

    fn join(&mut self) {
        for worker in self.workers.drain(..) {
            worker.join().unwrap();
        }
    }
}

impl PlaybackEngine for ThreadedEngine {
    fn current_position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, to: f64, completion: SeekCompletion) {
        let success = if self.outcomes.is_empty() {
            true
        } else {
            self.outcomes.remove(0)
        };
        if success {
            self.position = to;
        }
        self.workers
            .push(thread::spawn(move || completion.complete(success)));
    }
}

/// Engine whose completions are released by the test.
struct GatedEngine {
    gate: mpsc::Sender<SeekCompletion>,
}

impl PlaybackEngine for GatedEngine {
    fn current_position(&self) -> f64 {
        0.0
    }

    fn seek(&mut self, _to: f64, completion: SeekCompletion) {
        self.gate.send(completion).unwrap();
    }
}

#[test]
fn drag_issues_bounded_seeks_and_final_seek() {
    init_logging();
    let mut state = TimelineState::new();
    state.load_video(60.0).unwrap();
    let mut engine = ThreadedEngine::new(Vec::new());
    let t0 = Instant::now();
    state.center_on(0.0, VIEWPORT);

    state.start_drag_gesture();
    let mut issued = 0;
    // 100 drag callbacks at 4ms intervals (400ms total).
    for step in 0..100u64 {
        state.scroll_by(-2.0);
        state.update_drag_velocity(-500.0);
        let now = t0 + Duration::from_millis(step * 4);
        if let Some(SeekRequest::Issued { .. }) = state.scrub(VIEWPORT, now, &mut engine) {
            issued += 1;
        }
        engine.join();
        state.poll_seek_completions();
    }
    assert!(issued >= 2);
    assert!(issued <= 400 / 33 + 1);

    state.end_drag_gesture();
    let final_time = state.time_at_center(VIEWPORT);
    let request = state.perform_seek(final_time, t0 + Duration::from_millis(400), &mut engine);
    assert!(request.is_issued());
    engine.join();
    assert_eq!(state.poll_seek_completions(), vec![Ok(final_time)]);
    assert_eq!(state.last_successful_seek_time(), final_time);
    assert!((engine.current_position() - final_time).abs() < 1e-9);
}

#[test]
fn in_flight_seek_rejects_overlapping_requests() {
    let mut state = TimelineState::new();
    state.load_video(60.0).unwrap();
    let (tx, rx) = mpsc::channel();
    let mut engine = GatedEngine { gate: tx };
    let t0 = Instant::now();

    assert!(state.perform_seek(5.0, t0, &mut engine).is_issued());
    let later = t0 + Duration::from_secs(1);
    assert_eq!(
        state.perform_seek(6.0, later, &mut engine),
        SeekRequest::Rejected
    );
    assert_eq!(state.last_seek_time(), Some(t0));
    assert!(state.is_seeking());

    // Nothing completes until the engine releases the seek.
    assert!(state.poll_seek_completions().is_empty());
    let completion = rx.recv().unwrap();
    assert!(rx.try_recv().is_err());
    completion.complete(true);

    assert_eq!(state.poll_seek_completions(), vec![Ok(5.0)]);
    assert!(!state.is_seeking());
}

#[test]
fn failures_escalate_then_recover() {
    init_logging();
    let mut state = TimelineState::new();
    state.load_video(60.0).unwrap();
    let mut engine = ThreadedEngine::new(vec![true, false, false, false, true]);
    let t0 = Instant::now();

    let targets = [1.0, 2.0, 3.0, 4.0, 5.0];
    let mut failures = Vec::new();
    for (i, target) in targets.iter().enumerate() {
        state.perform_seek(*target, t0 + Duration::from_millis(i as u64 * 50), &mut engine);
        engine.join();
        for result in state.poll_seek_completions() {
            if let Err(SeekError::Failed {
                consecutive_failures,
                ..
            }) = result
            {
                failures.push(consecutive_failures);
                // Fallback position while the engine keeps failing.
                assert_eq!(state.last_successful_seek_time(), 1.0);
            }
        }
    }

    assert_eq!(failures, vec![1, 2, 3]);
    assert_eq!(state.consecutive_seek_failures(), 0);
    assert_eq!(state.last_successful_seek_time(), 5.0);
}

#[test]
fn reset_tracking_on_new_video() {
    let mut state = TimelineState::new();
    state.load_video(60.0).unwrap();
    let mut engine = ThreadedEngine::new(vec![false, false]);

    for target in [1.0, 2.0] {
        state.perform_seek(target, Instant::now(), &mut engine);
        engine.join();
        state.poll_seek_completions();
    }
    assert_eq!(state.consecutive_seek_failures(), 2);

    state.load_video(15.0).unwrap();
    assert_eq!(state.consecutive_seek_failures(), 0);
    assert!(!state.is_seeking());
}
