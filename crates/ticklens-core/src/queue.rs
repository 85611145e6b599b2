//! Bounded concurrent event queues and the single pending-value slot.
//!
//! Host callbacks push from any thread; the tick thread is the only
//! consumer. Backpressure is lossy and non-blocking: a push over
//! capacity evicts the oldest entry, so producers never wait and never
//! fail. Evicted entries are gone -- there is no redelivery.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

/// Payloads that carry their creation time, so the consumer can drain
/// by age window.
pub trait Timestamped {
    /// Wall-clock time the payload was created on the producer side.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Fixed-capacity, drop-oldest, concurrency-safe FIFO buffer.
///
/// `push` may be called from any thread; `drain_all`, `drain_window`,
/// and `len` are intended for the tick thread only. The lock is held
/// for O(1) work per push and O(n) per drain; nothing inside ever
/// blocks beyond the mutex itself.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    entries: Mutex<VecDeque<T>>,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` entries. A zero
    /// capacity is clamped to 1 so a push always retains the newest
    /// entry.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn locked<R>(&self, f: impl FnOnce(&mut VecDeque<T>) -> R) -> R {
        // A poisoned lock means a producer panicked mid-push; the queue
        // contents remain structurally sound, so keep serving.
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Append an event, evicting the oldest entry when full.
    ///
    /// Producer side; never blocks, never fails.
    pub fn push(&self, event: T) {
        self.locked(|q| {
            while q.len() >= self.capacity {
                let _ = q.pop_front();
            }
            q.push_back(event);
        });
    }

    /// Remove and return every queued entry, oldest first.
    pub fn drain_all(&self) -> Vec<T> {
        self.locked(|q| q.drain(..).collect())
    }

    /// Current queue depth.
    pub fn len(&self) -> usize {
        self.locked(|q| q.len())
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Timestamped> BoundedQueue<T> {
    /// Remove and return entries no older than `max_age_ms`, oldest
    /// first. Entries outside the window are discarded in the same
    /// pass -- retention is an intent, not a delivery guarantee.
    pub fn drain_window(&self, max_age_ms: i64, now: DateTime<Utc>) -> Vec<T> {
        let cutoff = now
            .checked_sub_signed(TimeDelta::milliseconds(max_age_ms))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.locked(|q| q.drain(..).filter(|e| e.timestamp() >= cutoff).collect())
    }
}

/// Single-value cell holding the latest unconsumed payload.
///
/// Producers replace whatever is present ("newest wins"); the consumer
/// takes the value at most once. Used for the pending click context,
/// which must reach exactly one snapshot.
#[derive(Debug, Default)]
pub struct PendingSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T> PendingSlot<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Store a value, replacing any unconsumed previous one.
    pub fn set(&self, value: T) {
        let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(value);
    }

    /// Take the pending value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    /// Whether a value is currently pending.
    pub fn is_set(&self) -> bool {
        let guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
        guard.is_some()
    }
}
