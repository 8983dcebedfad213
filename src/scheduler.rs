//! Deadline queue keyed by caller-chosen handles.
//!
//! Nothing here owns a clock: callers pass `now` into [`Scheduler::pop_due`]
//! and act on whatever came due. Cancelling a key makes sure it never fires.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Instant;

pub struct Scheduler<K> {
    queue: BTreeMap<(Instant, u64), K>,
    slots: HashMap<K, (Instant, u64)>,
    seq: u64,
}

impl<K: Clone + Eq + Hash> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            queue: BTreeMap::new(),
            slots: HashMap::new(),
            seq: 0,
        }
    }

    /// Schedules `key` at `at`, replacing any pending deadline for the same key.
    pub fn schedule(&mut self, key: K, at: Instant) {
        self.cancel(&key);
        let slot = (at, self.seq);
        self.seq += 1;
        self.queue.insert(slot, key.clone());
        self.slots.insert(key, slot);
    }

    /// Returns whether a pending deadline was removed.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(slot) => {
                self.queue.remove(&slot);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.slots.clear();
    }

    /// Removes and returns every key due at or before `now`, earliest first,
    /// along with the deadline it was scheduled for.
    pub fn pop_due(&mut self, now: Instant) -> Vec<(K, Instant)> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            let (at, _) = *entry.key();
            if at > now {
                break;
            }
            let key = entry.remove();
            self.slots.remove(&key);
            due.push((key, at));
        }
        due
    }

    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.slots.get(key).map(|(at, _)| *at)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule("late", t0 + Duration::from_millis(30));
        s.schedule("early", t0 + Duration::from_millis(10));
        s.schedule("tie", t0 + Duration::from_millis(10));

        assert!(s.pop_due(t0).is_empty());
        let due: Vec<_> = s
            .pop_due(t0 + Duration::from_millis(20))
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(due, vec!["early", "tie"]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_millis(30)));
    }

    #[test]
    fn rescheduling_replaces_the_old_deadline() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(1, t0 + Duration::from_millis(10));
        s.schedule(1, t0 + Duration::from_millis(50));
        assert_eq!(s.len(), 1);
        assert!(s.pop_due(t0 + Duration::from_millis(20)).is_empty());
        assert_eq!(s.pop_due(t0 + Duration::from_millis(50)).len(), 1);
    }

    #[test]
    fn cancelled_keys_never_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.schedule(1, t0);
        s.schedule(2, t0);
        assert!(s.cancel(&1));
        assert!(!s.cancel(&1));
        assert_eq!(s.pop_due(t0), vec![(2, t0)]);

        s.schedule(3, t0);
        s.cancel_all();
        assert!(s.is_empty());
        assert!(s.pop_due(t0 + Duration::from_secs(1)).is_empty());
    }
}
