//! Coalesced next-tick work.
//!
//! A [`TickQueue`] holds at most one pending unit of work per key. Requests
//! made within the same turn collapse into a single execution at the next
//! flush. Re-registering a pending key moves it to the back of the queue, so
//! execution order always follows the most recent registration.

use std::collections::VecDeque;
use std::fmt::Debug;

use crate::logging::targets;

/// Queue of named, coalesced units of deferred work.
#[derive(Debug, Clone)]
pub struct TickQueue<K> {
    /// Pending keys in execution order.
    pending: VecDeque<K>,
}

impl<K: Copy + Eq + Debug> TickQueue<K> {
    /// Create an empty tick queue.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Request that `key` runs on the next flush.
    ///
    /// Returns `true` if the key was not already pending.
    pub fn register(&mut self, key: K) -> bool {
        let fresh = !self.cancel(key);
        self.pending.push_back(key);
        tracing::trace!(target: targets::TICK, ?key, fresh, "tick registered");
        fresh
    }

    /// Drop a pending request.
    ///
    /// Returns `true` if the key was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        if let Some(pos) = self.pending.iter().position(|k| *k == key) {
            self.pending.remove(pos);
            true
        } else {
            false
        }
    }

    /// Take the next key to run.
    ///
    /// Keys registered while a flush is draining the queue run in the same
    /// flush, after everything that was already pending.
    pub fn take_next(&mut self) -> Option<K> {
        self.pending.pop_front()
    }

    /// Drop every pending request.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<K: Copy + Eq + Debug> Default for TickQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
