// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: phases, outcomes, parent lookups, and dispatch steps.
//!
//! ## Overview
//!
//! These types describe the propagation protocol.
//! They are produced by the [`router`](crate::router), matched against the
//! [`listeners`](crate::listeners) registry, and consumed by the [`dispatcher`](crate::dispatcher).

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] step produced by
/// [`Router::route`](crate::router::Router::route).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-parent traversal, before the target.
    Capture,
    /// The target node itself.
    Target,
    /// Parent-to-root traversal, after the target.
    Bubble,
}

impl Phase {
    /// True when a listener registered with `capture` should run in this phase.
    ///
    /// Capture listeners run during [`Capture`](Self::Capture) and [`Target`](Self::Target);
    /// bubble listeners during [`Target`](Self::Target) and [`Bubble`](Self::Bubble).
    pub fn admits(self, capture: bool) -> bool {
        match self {
            Self::Capture => capture,
            Self::Target => true,
            Self::Bubble => !capture,
        }
    }
}

/// Handler outcome controlling propagation.
///
/// Outcomes are ordered: a node whose listeners return several outcomes
/// reports the strongest one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagation once the current node's listeners have run.
    Stop,
    /// Stop propagation and prevent the default action.
    StopAndConsume,
}

/// Look up the parent of a node to build a root→target path for propagation.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider; every node is its own root.
///
/// Used by [`Router::new`](crate::router::Router::new).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single propagation step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Node whose listeners run at this step (the "current target").
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A capture-phase step.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// The target step.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble-phase step.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_admission() {
        assert!(Phase::Capture.admits(true));
        assert!(!Phase::Capture.admits(false));
        assert!(Phase::Target.admits(true));
        assert!(Phase::Target.admits(false));
        assert!(Phase::Bubble.admits(false));
        assert!(!Phase::Bubble.admits(true));
    }

    #[test]
    fn outcome_strength() {
        assert!(Outcome::StopAndConsume > Outcome::Stop);
        assert!(Outcome::Stop > Outcome::Continue);
        assert_eq!(
            [Outcome::Continue, Outcome::StopAndConsume, Outcome::Stop]
                .into_iter()
                .max(),
            Some(Outcome::StopAndConsume)
        );
    }
}
