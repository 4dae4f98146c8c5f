// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounce windows and the virtual timer queue.
//!
//! All deferred work goes through a [`TimerQueue`] driven by a virtual clock, so every
//! interleaving of timers and events is reproducible. Timers fire in due-time order;
//! timers due at the same instant fire in the order they were scheduled.

/// Delay before a pointer-out closes the open panel.
pub const HOVER_CLOSE_MS: u64 = 250;
/// Delay before a focus-out closes the open panel.
pub const FOCUS_CLOSE_MS: u64 = 300;
/// Delay before focus returns to the trigger after Escape or an external collapse.
pub const RESTORE_FOCUS_MS: u64 = 99;
/// Delay after a mousedown before pending closes are cancelled.
pub const MOUSEDOWN_CLEAR_MS: u64 = 1;
/// Typeahead buffer lifetime after the last keystroke.
pub const TYPEAHEAD_RESET_MS: u64 = 1000;
/// Delay before the screen-reader cursor is polled after a focus-out.
pub const SCREEN_READER_POLL_MS: u64 = 25;
/// Remaining close delay once the poll finds the cursor outside the item.
pub const SCREEN_READER_CLOSE_MS: u64 = 275;

/// Handle to a scheduled timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    id: TimerId,
    due: u64,
    payload: T,
}

/// Timers keyed by virtual milliseconds.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: u64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    /// An empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `payload` after `delay_ms`.
    pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay_ms,
            payload,
        });
        id
    }

    /// Drop a pending timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// True while `id` has neither fired nor been cancelled.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest timer due at or before `until`, advancing the clock to it.
    ///
    /// Callers loop on this so that timers scheduled by a firing timer are seen too.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        let p = self.pending.remove(idx);
        self.now = self.now.max(p.due);
        Some((p.id, p.payload))
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_by_due_time_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(300, "focus");
        q.schedule(250, "hover");
        q.schedule(250, "hover-2");
        let mut fired = Vec::new();
        while let Some((_, p)) = q.pop_due(1000) {
            fired.push((q.now(), p));
        }
        assert_eq!(fired, vec![(250, "hover"), (250, "hover-2"), (300, "focus")]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, 1);
        let b = q.schedule(20, 2);
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert!(q.is_pending(b));
        assert_eq!(q.pop_due(15), None);
        assert_eq!(q.pop_due(20), Some((b, 2)));
        assert!(q.is_empty());
    }

    #[test]
    fn delays_are_relative_to_the_current_time() {
        let mut q = TimerQueue::new();
        q.set_now(100);
        q.schedule(1, ());
        assert_eq!(q.pop_due(100), None);
        assert!(q.pop_due(101).is_some());
        assert_eq!(q.now(), 101);
    }
}
