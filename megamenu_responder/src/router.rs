// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Reconstructs the root→target path and emits dispatch steps in DOM order:
//! capture (root → parent), target, then bubble (parent → root).
//!
//! ## Targets
//!
//! The router does not pick targets; the caller already knows where the event
//! happened (the focused element, the element under the pointer, the element whose
//! attribute changed). Pointer capture and hit ranking are out of scope.
//!
//! ## See Also
//!
//! [`listeners`](crate::listeners) to find the handlers for each step and
//! [`dispatcher`](crate::dispatcher) to walk the steps.

use alloc::vec::Vec;

use crate::types::{Dispatch, NoParent, ParentLookup};

/// Deterministic propagation router.
///
/// ## Usage
///
/// - Construct with [`Router::with_parent`] over your tree's [`ParentLookup`].
///   [`Router::new`] uses [`NoParent`], so every path is a singleton.
/// - Call [`Router::route`] for each event to get its propagation steps.
pub struct Router<K, P: ParentLookup<K> = NoParent> {
    parent: P,
    _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, P: ParentLookup<K>> core::fmt::Debug for Router<K, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Router<K, P> {
    /// Create a router with a default parent lookup.
    pub fn new() -> Self {
        Self {
            parent: P::default(),
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<K: Copy + Eq, P: ParentLookup<K> + Default> Default for Router<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq, P: ParentLookup<K>> Router<K, P> {
    /// Create a router with an explicit parent lookup provider.
    pub fn with_parent(parent: P) -> Self {
        Self {
            parent,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Root→target path for `target` (inclusive).
    pub fn path_for(&self, target: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut cur = target;
        // Collect to root; caller ensures acyclic ancestry.
        loop {
            out.push(cur);
            match self.parent.parent_of(&cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Propagation steps for an event at `target`.
    ///
    /// Non-bubbling events (`bubbles == false`) stop after the target step.
    pub fn route(&self, target: K, bubbles: bool) -> Vec<Dispatch<K>> {
        let path = self.path_for(target);
        let Some((&target, ancestors)) = path.split_last() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(ancestors.len() * 2 + 1);
        // Capture: root→parent
        out.extend(ancestors.iter().map(|&n| Dispatch::capture(n)));
        out.push(Dispatch::target(target));
        // Bubble: parent→root
        if bubbles {
            out.extend(ancestors.iter().rev().map(|&n| Dispatch::bubble(n)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    struct Node(u32);

    struct Parents;
    impl ParentLookup<Node> for Parents {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
    }

    #[test]
    fn bubbling_route_visits_capture_target_bubble() {
        let router: Router<Node, Parents> = Router::with_parent(Parents);
        let out = router.route(Node(3), true);
        let phases: Vec<(Phase, u32)> = out.iter().map(|d| (d.phase, d.node.0)).collect();
        assert_eq!(
            phases,
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn non_bubbling_route_ends_at_target() {
        let router: Router<Node, Parents> = Router::with_parent(Parents);
        let out = router.route(Node(2), false);
        assert_eq!(out, vec![Dispatch::capture(Node(1)), Dispatch::target(Node(2))]);
    }

    #[test]
    fn fallback_singleton_path_without_parent() {
        let router: Router<Node, NoParent> = Router::new();
        let out = router.route(Node(9), true);
        assert_eq!(out, vec![Dispatch::target(Node(9))]);
        assert_eq!(router.path_for(Node(9)), vec![Node(9)]);
    }
}
