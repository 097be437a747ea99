//! Timer system for Horizon Tabstrip.
//!
//! Provides one-shot and repeating timers over a virtual clock. The clock is
//! a monotonically increasing [`Duration`] since the manager was created and
//! only moves when the owner fires timers or advances it explicitly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Repeating timers never fire faster than this.
const MIN_REPEAT_INTERVAL: Duration = Duration::from_micros(100);

/// How a timer reschedules after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Duration,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, FIFO on ties).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages all timers of one owner.
#[derive(Debug)]
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Current clock reading.
    now: Duration,
    /// Insertion counter used to order timers due at the same instant.
    seq: u64,
}

impl TimerManager {
    /// Create a new timer manager with its clock at zero.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            now: Duration::ZERO,
            seq: 0,
        }
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a one-shot timer that fires after the specified duration.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.insert(duration, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires at the specified interval.
    ///
    /// The first fire occurs after `interval` duration.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.insert(interval.max(MIN_REPEAT_INTERVAL), TimerKind::Repeating)
    }

    fn insert(&mut self, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = self.now + interval;
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.push_entry(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?kind, ?interval, "timer started");
        id
    }

    fn push_entry(&mut self, id: TimerId, fire_time: Duration) {
        self.seq += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            seq: self.seq,
        });
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer was not found (already fired or stopped).
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Stop every timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    /// The instant the next active timer fires, if any.
    pub fn next_fire_time(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.fire_time)
    }

    /// Get the duration until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        let now = self.now;
        self.next_fire_time()
            .map(|fire_time| fire_time.saturating_sub(now))
    }

    fn is_stale(&self, entry: &TimerQueueEntry) -> bool {
        self.timers
            .get(entry.id)
            .is_none_or(|t| t.next_fire != entry.fire_time)
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.is_stale(entry) {
                self.queue.pop();
            } else {
                break;
            }
        }
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's fire time. One-shot timers are removed;
    /// repeating timers are rescheduled one interval later. Returns `None`
    /// when nothing is due, leaving the clock untouched.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<TimerId> {
        self.discard_stale();
        let entry = *self.queue.peek()?;
        if entry.fire_time > deadline {
            return None;
        }
        self.queue.pop();

        self.now = self.now.max(entry.fire_time);
        let id = entry.id;
        tracing::trace!(target: targets::TIMER, ?id, now = ?self.now, "timer fired");

        let kind = self.timers.get(id)?.kind;
        match kind {
            TimerKind::OneShot => {
                self.timers.remove(id);
            }
            TimerKind::Repeating => {
                let timer = self.timers.get_mut(id)?;
                timer.next_fire = entry.fire_time + timer.interval;
                let next = timer.next_fire;
                self.push_entry(id, next);
            }
        }

        Some(id)
    }

    /// Move the clock forward to `instant` without firing anything.
    ///
    /// Callers normally drain [`fire_next`](Self::fire_next) up to the same
    /// instant first.
    pub fn advance_to(&mut self, instant: Duration) -> Result<()> {
        if instant < self.now {
            return Err(TimerError::ClockRewind {
                now: self.now,
                requested: instant,
            }
            .into());
        }
        self.now = instant;
        Ok(())
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}
