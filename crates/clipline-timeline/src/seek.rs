//! Debounced, single-flight seeking of an external playback engine.
//!
//! The engine reports completion through a [`SeekCompletion`] handle that
//! may be fired from any thread. Results are queued on a channel and only
//! applied when the control thread calls [`SeekTracker::poll`], so the
//! tracker's fields are never touched concurrently.

use std::time::{Duration, Instant};

use clipline_core::SeekError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

/// Playback engine driven exclusively by the timeline while it is active.
pub trait PlaybackEngine {
    /// Current playback position in seconds.
    fn current_position(&self) -> f64;

    /// Start a seek to `to` seconds. `completion` must eventually be
    /// completed or dropped; dropping it counts as a failed seek.
    fn seek(&mut self, to: f64, completion: SeekCompletion);
}

#[derive(Debug, Clone, Copy)]
struct PostedResult {
    ticket: u64,
    target_time: f64,
    success: bool,
}

/// One-shot completion handle for an issued seek.
#[derive(Debug)]
pub struct SeekCompletion {
    ticket: u64,
    target_time: f64,
    tx: Option<Sender<PostedResult>>,
}

impl SeekCompletion {
    /// Target time of the seek this handle belongs to.
    pub fn target_time(&self) -> f64 {
        self.target_time
    }

    /// Report the engine's outcome.
    pub fn complete(mut self, success: bool) {
        self.post(success);
    }

    fn post(&mut self, success: bool) {
        if let Some(tx) = self.tx.take() {
            // The tracker may already be gone; nothing to report to then.
            let _ = tx.send(PostedResult {
                ticket: self.ticket,
                target_time: self.target_time,
                success,
            });
        }
    }
}

impl Drop for SeekCompletion {
    fn drop(&mut self) {
        self.post(false);
    }
}

/// Whether a seek is outstanding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekPhase {
    Idle,
    Seeking { ticket: u64, target_time: f64 },
}

/// Result of asking for a seek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekRequest {
    /// Handed to the engine; a completion will follow.
    Issued { ticket: u64 },
    /// Another seek is in flight. Not an error, and no completion follows.
    Rejected,
}

impl SeekRequest {
    pub fn is_issued(&self) -> bool {
        matches!(self, SeekRequest::Issued { .. })
    }
}

/// Seek state machine: `Idle -> Seeking -> Idle`.
#[derive(Debug)]
pub struct SeekTracker {
    phase: SeekPhase,
    debounce: Duration,
    last_seek_time: Option<Instant>,
    last_successful_seek_time: f64,
    consecutive_failures: u32,
    next_ticket: u64,
    tx: Sender<PostedResult>,
    rx: Receiver<PostedResult>,
}

impl SeekTracker {
    pub fn new(debounce: Duration) -> Self {
        let (tx, rx) = unbounded();
        Self {
            phase: SeekPhase::Idle,
            debounce,
            last_seek_time: None,
            last_successful_seek_time: 0.0,
            consecutive_failures: 0,
            next_ticket: 0,
            tx,
            rx,
        }
    }

    pub fn phase(&self) -> SeekPhase {
        self.phase
    }

    pub fn is_seeking(&self) -> bool {
        matches!(self.phase, SeekPhase::Seeking { .. })
    }

    pub fn last_seek_time(&self) -> Option<Instant> {
        self.last_seek_time
    }

    /// Target of the most recent successful seek; the fallback position.
    pub fn last_successful_seek_time(&self) -> f64 {
        self.last_successful_seek_time
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// True when more than the debounce interval has passed since the last
    /// issued seek.
    pub fn should_perform_seek(&self, now: Instant) -> bool {
        match self.last_seek_time {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.debounce,
        }
    }

    /// Issue a seek unless one is already in flight.
    pub fn perform_seek(
        &mut self,
        target_time: f64,
        now: Instant,
        engine: &mut dyn PlaybackEngine,
    ) -> SeekRequest {
        if self.is_seeking() {
            debug!("Seek to {:.3}s rejected, another seek in flight", target_time);
            return SeekRequest::Rejected;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = SeekPhase::Seeking {
            ticket,
            target_time,
        };
        self.last_seek_time = Some(now);
        debug!("Seek #{} to {:.3}s", ticket, target_time);

        engine.seek(
            target_time,
            SeekCompletion {
                ticket,
                target_time,
                tx: Some(self.tx.clone()),
            },
        );
        SeekRequest::Issued { ticket }
    }

    /// Apply completions posted since the last poll, in arrival order.
    ///
    /// Must be called on the control thread. Each entry is the completed
    /// target time or the failure. Completions of seeks abandoned by
    /// [`reset`](Self::reset) are discarded.
    pub fn poll(&mut self) -> Vec<Result<f64, SeekError>> {
        let posted: Vec<PostedResult> = self.rx.try_iter().collect();
        posted
            .into_iter()
            .filter_map(|result| self.apply(result))
            .collect()
    }

    fn apply(&mut self, result: PostedResult) -> Option<Result<f64, SeekError>> {
        match self.phase {
            SeekPhase::Seeking { ticket, .. } if ticket == result.ticket => {}
            _ => {
                debug!("Discarding stale completion for seek #{}", result.ticket);
                return None;
            }
        }
        self.phase = SeekPhase::Idle;

        if result.success {
            self.consecutive_failures = 0;
            self.last_successful_seek_time = result.target_time;
            Some(Ok(result.target_time))
        } else {
            self.consecutive_failures += 1;
            warn!(
                "Seek to {:.3}s failed ({} consecutive)",
                result.target_time, self.consecutive_failures
            );
            Some(Err(SeekError::Failed {
                target_time: result.target_time,
                consecutive_failures: self.consecutive_failures,
            }))
        }
    }

    /// Clear the failure counter, leaving the phase untouched.
    pub fn reset_failure_tracking(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Back to `Idle` with fresh counters. An in-flight completion is ignored.
    pub fn reset(&mut self) {
        self.phase = SeekPhase::Idle;
        self.last_seek_time = None;
        self.last_successful_seek_time = 0.0;
        self.consecutive_failures = 0;
    }
}
