//! Change notification for downstream renderers.
//!
//! A minimal broadcast over `crossbeam-channel`: each subscriber owns an
//! unbounded receiver; senders whose receiver was dropped are pruned on the
//! next notification.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Broadcasts cloned events to every live subscriber.
#[derive(Debug)]
pub struct ChangeNotifier<E> {
    subscribers: Vec<Sender<E>>,
}

impl<E: Clone> ChangeNotifier<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Receiver<E> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Send `event` to all subscribers.
    pub fn notify(&mut self, event: E) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers (as of the last notification).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E: Clone> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}
