use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::models::{PopupDescriptor, PopupId};
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKind {
    Expiry,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TimerKey {
    id: PopupId,
    kind: TimerKind,
}

/// A popup currently on screen.
#[derive(Debug, Clone)]
pub struct LivePopup {
    pub descriptor: PopupDescriptor,
    pub shown_at: Instant,
    /// Remaining share of the lifetime in `[0, 1]`, as of the last progress poll.
    pub remaining: f64,
}

/// Owns the visible popups and the timers that expire them.
///
/// Every popup gets a one-shot expiry timer and a repeating progress timer,
/// both kept in one [`Scheduler`]. Removing a popup by any route cancels both,
/// so a late timer can never act on a popup that is already gone.
pub struct PopupLifecycle {
    visible: Vec<LivePopup>,
    timers: Scheduler<TimerKey>,
    progress_poll: Duration,
}

impl PopupLifecycle {
    pub fn new(progress_poll: Duration) -> Self {
        Self {
            visible: Vec::new(),
            timers: Scheduler::new(),
            progress_poll,
        }
    }

    /// Shows `descriptor` from `now`. An id that is already visible is ignored.
    pub fn add(&mut self, descriptor: PopupDescriptor, now: Instant) {
        let id = descriptor.id;
        if self.position(&id).is_some() {
            warn!("{id} is already visible, ignoring duplicate");
            return;
        }
        self.timers.schedule(
            TimerKey { id, kind: TimerKind::Expiry },
            now + descriptor.lifetime,
        );
        self.timers.schedule(
            TimerKey { id, kind: TimerKind::Progress },
            now + self.progress_poll,
        );
        debug!("{id} shown for {:?}", descriptor.lifetime);
        self.visible.push(LivePopup {
            descriptor,
            shown_at: now,
            remaining: 1.0,
        });
    }

    /// Removes the popup and its timers. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &PopupId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.visible.remove(index);
        self.timers.cancel(&TimerKey { id: *id, kind: TimerKind::Expiry });
        self.timers.cancel(&TimerKey { id: *id, kind: TimerKind::Progress });
        true
    }

    /// Force-expires every visible popup. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.visible.len();
        self.visible.clear();
        self.timers.cancel_all();
        removed
    }

    /// Fires every timer due at `now` and returns the ids that expired.
    pub fn tick(&mut self, now: Instant) -> Vec<PopupId> {
        let mut expired = Vec::new();
        for (key, at) in self.timers.pop_due(now) {
            match key.kind {
                TimerKind::Expiry => {
                    if self.remove(&key.id) {
                        debug!("{} expired", key.id);
                        expired.push(key.id);
                    }
                }
                TimerKind::Progress => {
                    let poll = self.progress_poll;
                    let Some(index) = self.position(&key.id) else {
                        continue;
                    };
                    let popup = &mut self.visible[index];
                    popup.remaining = remaining_fraction(popup, now);
                    // Next poll is relative to the missed deadline, but never in the past.
                    let mut next = at + poll;
                    if next <= now {
                        next = now + poll;
                    }
                    self.timers.schedule(key, next);
                }
            }
        }
        expired
    }

    pub fn progress(&self, id: &PopupId) -> Option<f64> {
        self.position(id).map(|i| self.visible[i].remaining)
    }

    /// Visible popups in insertion order.
    pub fn visible(&self) -> &[LivePopup] {
        &self.visible
    }

    pub fn contains(&self, id: &PopupId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn position(&self, id: &PopupId) -> Option<usize> {
        self.visible.iter().position(|p| p.descriptor.id == *id)
    }
}

fn remaining_fraction(popup: &LivePopup, now: Instant) -> f64 {
    let lifetime = popup.descriptor.lifetime.as_secs_f64();
    if lifetime <= 0.0 {
        return 0.0;
    }
    let elapsed = now.saturating_duration_since(popup.shown_at).as_secs_f64();
    ((lifetime - elapsed) / lifetime).clamp(0.0, 1.0)
}
