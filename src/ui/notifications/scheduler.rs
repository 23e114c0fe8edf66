// SPDX-License-Identifier: MPL-2.0
//! Named timers.
//!
//! Every suspension point in the engine is a fire-once named timer: the
//! dismissal delay, the exit-transition delay, the settle delay before
//! eviction, the admission retry backoff, and the shift-transition release.
//! Arming an already-armed key replaces it (that is how stacking re-arms the
//! dismissal timer) and cancelling invalidates it; stale heap entries are
//! skipped by generation number instead of being dug out of the heap.

use super::notification::NotificationId;
use crate::surface::Position;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tokio::time::{Duration, Instant};

/// One timer slot. At most one timer per key is armed at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKey {
    /// Auto-dismiss delay for a non-pinned active entity.
    Dismiss(NotificationId),
    /// Exit transition finished; close the gap.
    ExitDone(NotificationId),
    /// Post-collapse settle delay before eviction.
    Settle(NotificationId),
    /// Backoff before re-attempting a deferred admission.
    AdmissionRetry(NotificationId),
    /// Shift transition finished; write resting offsets, release the lock.
    ShiftRelease(Position),
}

#[derive(Debug, Default)]
pub struct Scheduler {
    heap: BinaryHeap<Reverse<(Instant, u64, TimerKey)>>,
    armed: HashMap<TimerKey, u64>,
    next_seq: u64,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire after `delay`, replacing any previous arming.
    pub fn arm(&mut self, key: TimerKey, delay: Duration) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.armed.insert(key, seq);
        self.heap.push(Reverse((Instant::now() + delay, seq, key)));
    }

    /// Disarms `key`. Returns whether it was armed.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.armed.remove(&key).is_some()
    }

    #[must_use]
    pub fn is_armed(&self, key: TimerKey) -> bool {
        self.armed.contains_key(&key)
    }

    /// Earliest live deadline, pruning stale heap entries on the way.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        while let Some(Reverse((due, seq, key))) = self.heap.peek().copied() {
            if self.armed.get(&key) == Some(&seq) {
                return Some(due);
            }
            self.heap.pop();
        }
        None
    }

    /// Pops the next timer due at or before `now`, disarming it.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerKey> {
        while let Some(Reverse((due, seq, key))) = self.heap.peek().copied() {
            if self.armed.get(&key) != Some(&seq) {
                self.heap.pop();
                continue;
            }
            if due > now {
                return None;
            }
            self.heap.pop();
            self.armed.remove(&key);
            return Some(key);
        }
        None
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn timers_fire_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        let late = NotificationId::new();
        let early = NotificationId::new();
        scheduler.arm(TimerKey::Dismiss(late), Duration::from_millis(500));
        scheduler.arm(TimerKey::Dismiss(early), Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(600)).await;
        let now = Instant::now();
        assert_eq!(scheduler.pop_due(now), Some(TimerKey::Dismiss(early)));
        assert_eq!(scheduler.pop_due(now), Some(TimerKey::Dismiss(late)));
        assert_eq!(scheduler.pop_due(now), None);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_its_deadline() {
        let mut scheduler = Scheduler::new();
        let id = NotificationId::new();
        scheduler.arm(TimerKey::Dismiss(id), Duration::from_millis(250));

        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(scheduler.pop_due(Instant::now()), None);
        assert!(scheduler.is_armed(TimerKey::Dismiss(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timers_never_fire() {
        let mut scheduler = Scheduler::new();
        let id = NotificationId::new();
        scheduler.arm(TimerKey::Dismiss(id), Duration::from_millis(100));
        assert!(scheduler.cancel(TimerKey::Dismiss(id)));

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(scheduler.pop_due(Instant::now()), None);
        assert!(scheduler.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_deadline() {
        let mut scheduler = Scheduler::new();
        let id = NotificationId::new();
        scheduler.arm(TimerKey::Dismiss(id), Duration::from_millis(100));
        scheduler.arm(TimerKey::Dismiss(id), Duration::from_millis(500));

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(scheduler.pop_due(Instant::now()), None, "old deadline is stale");

        tokio::time::advance(Duration::from_millis(400)).await;
        assert_eq!(scheduler.pop_due(Instant::now()), Some(TimerKey::Dismiss(id)));
    }

    #[tokio::test(start_paused = true)]
    async fn next_deadline_skips_stale_entries() {
        let mut scheduler = Scheduler::new();
        let cancelled = NotificationId::new();
        let live = NotificationId::new();
        scheduler.arm(TimerKey::Dismiss(cancelled), Duration::from_millis(50));
        scheduler.arm(TimerKey::Dismiss(live), Duration::from_millis(300));
        scheduler.cancel(TimerKey::Dismiss(cancelled));

        let deadline = scheduler.next_deadline().expect("one live timer");
        assert_eq!(deadline, Instant::now() + Duration::from_millis(300));
    }
}
