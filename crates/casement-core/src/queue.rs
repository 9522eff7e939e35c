//! Single-consumer input event queue.
//!
//! A windowing host usually delivers input on its own callback thread. The
//! control tree, however, is owned by exactly one thread (see the crate
//! docs), so raw events are pushed into an [`EventQueue`] and drained by the
//! GUI thread at the top of each tick. Draining preserves arrival order,
//! which the router's hover/drag state machine depends on.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use crate::error::CoreError;
use crate::logging::targets;

/// The producing half of an event queue.
///
/// Cheap to clone; hand one to each host callback that produces input.
#[derive(Debug, Clone)]
pub struct QueueSender<T> {
    tx: Sender<T>,
}

impl<T> QueueSender<T> {
    /// Push an event onto the queue.
    ///
    /// Fails only if the consuming [`EventQueue`] was dropped.
    pub fn push(&self, event: T) -> Result<(), CoreError> {
        self.tx.send(event).map_err(|_| CoreError::QueueDisconnected)
    }
}

/// The consuming half: owned by the GUI thread.
#[derive(Debug)]
pub struct EventQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    /// Create a new empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Create a sender for host-side producers.
    pub fn sender(&self) -> QueueSender<T> {
        QueueSender { tx: self.tx.clone() }
    }

    /// Push an event from the GUI thread itself.
    pub fn push(&self, event: T) {
        // Sending on a channel we hold the receiver of cannot fail.
        let _ = self.tx.send(event);
    }

    /// Pop the next pending event, if any.
    pub fn pop(&self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Unreachable while `self.tx` is alive.
                tracing::warn!(target: targets::QUEUE, "event queue disconnected");
                None
            }
        }
    }

    /// Drain every pending event in arrival order.
    pub fn drain(&self) -> Vec<T> {
        let mut events = Vec::new();
        while let Some(event) = self.pop() {
            events.push(event);
        }
        events
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order() {
        let queue = EventQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(queue.drain(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn sender_feeds_consumer() {
        let queue = EventQueue::new();
        let sender = queue.sender();

        sender.push("press").unwrap();
        sender.push("release").unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some("press"));
        assert_eq!(queue.pop(), Some("release"));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn cross_thread_producers() {
        let queue = EventQueue::new();
        let sender = queue.sender();

        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                sender.push(i).unwrap();
            }
        });
        handle.join().unwrap();

        let drained = queue.drain();
        assert_eq!(drained.len(), 100);
        // One producer: order is preserved end to end.
        assert!(drained.windows(2).all(|w| w[0] < w[1]));
    }
}
