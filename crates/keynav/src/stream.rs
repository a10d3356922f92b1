#![forbid(unsafe_code)]

//! Synchronous event streams with RAII subscriptions.
//!
//! # Design
//!
//! [`EventStream<T>`] holds its subscribers as weak references; the strong
//! side lives in the [`Subscription`] guard returned by
//! [`subscribe`](EventStream::subscribe), so dropping the guard
//! unsubscribes. Dead entries are pruned lazily on the next emit.
//!
//! # Invariants
//!
//! 1. Subscribers are invoked in registration order.
//! 2. The interior borrow is released before callbacks run, so a callback
//!    may subscribe to the same stream.
//! 3. Every emit reaches every live subscriber: the stream performs no
//!    deduplication. Callers that need change-only semantics dedup before
//!    emitting.
//!
//! # Failure Modes
//!
//! - A `Subscription` stored indefinitely keeps its callback alive. Dropped
//!   guards leave a dead weak reference behind until the next emit prunes
//!   it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[cfg(feature = "tracing")]
use web_time::Instant;

/// A subscriber callback stored as a strong `Rc` internally, handed out
/// as `Weak` to the stream.
type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// A single-threaded, synchronous event source.
///
/// Cloning an `EventStream` creates a new handle to the **same** subscriber
/// list.
pub struct EventStream<T> {
    subscribers: Rc<RefCell<Vec<CallbackWeak<T>>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: 'static> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<T: 'static> EventStream<T> {
    /// Create a stream with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a callback invoked with every emitted value.
    ///
    /// Returns a [`Subscription`] guard. Dropping the guard unsubscribes
    /// the callback (it will not be called after drop, though its slot
    /// stays in the subscriber list until the next emit prunes it).
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of registered subscribers, including dead ones not yet
    /// pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Deliver `value` to all live subscribers and prune dead ones.
    pub(crate) fn emit(&self, value: &T) {
        // Collect live callbacks first so the borrow is released before
        // any callback runs.
        let callbacks: Vec<CallbackRc<T>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        if callbacks.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        let delivery_start = Instant::now();

        for callback in &callbacks {
            callback(value);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "keynav.emit",
            subscribers = callbacks.len(),
            duration_us = delivery_start.elapsed().as_micros() as u64
        );
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the strong reference to the callback,
/// so the weak entry in the stream's subscriber list stops resolving.
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
