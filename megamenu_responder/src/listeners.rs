// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: which handlers run at which node, in which phase, in what order.
//!
//! ## Ordering
//!
//! Handlers registered on the same node for the same event run in attachment order.
//! Removing a listener never reorders the others.
//!
//! ## Namespaces
//!
//! Every listener carries a namespace string so that a component can detach
//! exactly what it attached (`off` by node and namespace, or `off_namespace`
//! for everything it owns) without knowing listener ids.
//!
//! ## Handlers are data
//!
//! `H` is usually a small `Copy` enum naming the handler, not a closure.
//! The component that owns the state matches on it when the dispatcher reaches the step,
//! which keeps re-entrant dispatch (focus moved from inside a handler) borrow-friendly.
//!
//! ```
//! use megamenu_responder::listeners::Listeners;
//! use megamenu_responder::types::Phase;
//!
//! #[derive(Copy, Clone, Debug, PartialEq)]
//! enum Handler { Log, Close }
//!
//! let mut l: Listeners<u32, &str, Handler> = Listeners::new();
//! l.on(1, "click", false, "menu", Handler::Log);
//! l.on(1, "click", false, "menu", Handler::Close);
//! assert_eq!(l.handlers_for(1, "click", Phase::Bubble), vec![Handler::Log, Handler::Close]);
//! l.off_namespace("menu");
//! assert!(l.is_empty());
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::types::Phase;

/// Handle to a registered listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

#[derive(Clone, Debug)]
struct Entry<K, E, H> {
    id: ListenerId,
    node: K,
    event: E,
    capture: bool,
    namespace: String,
    handler: H,
}

/// Ordered listener registry keyed by node and event type.
#[derive(Clone, Debug)]
pub struct Listeners<K, E, H> {
    entries: Vec<Entry<K, E, H>>,
    next_id: u64,
}

impl<K, E, H> Default for Listeners<K, E, H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq, E: Copy + Eq, H: Clone> Listeners<K, E, H> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` for `event` at `node`.
    ///
    /// `capture` selects the capture phase instead of the bubble phase; both run at the target.
    pub fn on(&mut self, node: K, event: E, capture: bool, namespace: &str, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            node,
            event,
            capture,
            namespace: namespace.to_string(),
            handler,
        });
        id
    }

    /// Detach a single listener. Returns whether it was attached.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Detach every listener for `event` at `node` in `namespace`. Returns how many were removed.
    pub fn off(&mut self, node: K, event: E, namespace: &str) -> usize {
        self.retain(|e| !(e.node == node && e.event == event && e.namespace == namespace))
    }

    /// Detach every listener in `namespace`. Returns how many were removed.
    pub fn off_namespace(&mut self, namespace: &str) -> usize {
        self.retain(|e| e.namespace != namespace)
    }

    /// Detach every listener whose handler matches `pred`. Returns how many were removed.
    pub fn off_where(&mut self, mut pred: impl FnMut(&H) -> bool) -> usize {
        self.retain(|e| !pred(&e.handler))
    }

    /// Handlers to run at `node` for `event` in `phase`, in attachment order.
    pub fn handlers_for(&self, node: K, event: E, phase: Phase) -> Vec<H> {
        self.entries
            .iter()
            .filter(|e| e.node == node && e.event == event && phase.admits(e.capture))
            .map(|e| e.handler.clone())
            .collect()
    }

    /// Number of listeners for `event` at `node`, across phases and namespaces.
    pub fn count_for(&self, node: K, event: E) -> usize {
        self.entries
            .iter()
            .filter(|e| e.node == node && e.event == event)
            .count()
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn retain(&mut self, mut keep: impl FnMut(&Entry<K, E, H>) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e));
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    enum Ev {
        Click,
        Key,
    }

    #[test]
    fn attachment_order_is_preserved() {
        let mut l: Listeners<u32, Ev, u8> = Listeners::new();
        l.on(1, Ev::Click, false, "a", 1);
        l.on(2, Ev::Click, false, "a", 9);
        l.on(1, Ev::Click, false, "b", 2);
        l.on(1, Ev::Click, false, "a", 3);
        assert_eq!(l.handlers_for(1, Ev::Click, Phase::Target), vec![1, 2, 3]);
    }

    #[test]
    fn phases_filter_capture_and_bubble() {
        let mut l: Listeners<u32, Ev, &str> = Listeners::new();
        l.on(1, Ev::Key, true, "ns", "capture");
        l.on(1, Ev::Key, false, "ns", "bubble");
        assert_eq!(l.handlers_for(1, Ev::Key, Phase::Capture), vec!["capture"]);
        assert_eq!(l.handlers_for(1, Ev::Key, Phase::Bubble), vec!["bubble"]);
        assert_eq!(
            l.handlers_for(1, Ev::Key, Phase::Target),
            vec!["capture", "bubble"]
        );
    }

    #[test]
    fn off_is_scoped_to_node_event_and_namespace() {
        let mut l: Listeners<u32, Ev, u8> = Listeners::new();
        l.on(1, Ev::Click, false, "menu", 1);
        l.on(1, Ev::Key, false, "menu", 2);
        l.on(1, Ev::Click, false, "other", 3);
        assert_eq!(l.off(1, Ev::Click, "menu"), 1);
        assert_eq!(l.handlers_for(1, Ev::Click, Phase::Target), vec![3]);
        assert_eq!(l.count_for(1, Ev::Key), 1);
        assert_eq!(l.off_namespace("menu"), 1);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn remove_and_off_where() {
        let mut l: Listeners<u32, Ev, u8> = Listeners::new();
        let id = l.on(1, Ev::Click, false, "a", 1);
        l.on(2, Ev::Click, false, "a", 2);
        l.on(3, Ev::Click, false, "a", 20);
        assert!(l.remove(id));
        assert!(!l.remove(id), "second removal is a no-op");
        assert_eq!(l.off_where(|h| *h >= 10), 1);
        assert_eq!(l.len(), 1);
    }
}
