// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Megamenu Responder: deterministic, `no_std` DOM-style event propagation.
//!
//! ## Overview
//!
//! Given the node an event happened at, this crate produces the propagation sequence
//! (capture → target → bubble), finds the listeners for each step in attachment order,
//! and walks the sequence honoring stop rules.
//! It does not perform hit testing and does not own any widget state.
//!
//! ## Pieces
//!
//! - [`Router`](crate::router::Router) rebuilds the root→target path with a
//!   [`ParentLookup`](crate::types::ParentLookup) and emits [`Dispatch`](crate::types::Dispatch) steps.
//! - [`Listeners`](crate::listeners::Listeners) stores `(node, event, phase, namespace, handler)`
//!   entries in attachment order and answers "who runs here?".
//! - [`dispatcher::run`](crate::dispatcher::run) walks the steps and stops on
//!   [`Outcome::Stop`](crate::types::Outcome::Stop) or
//!   [`Outcome::StopAndConsume`](crate::types::Outcome::StopAndConsume).
//!
//! ## Ordering guarantees
//!
//! - Capture steps run root → parent, then the target, then bubble steps parent → root.
//! - Capture listeners run in the capture and target phases; bubble listeners in the target and bubble phases.
//! - Listeners at one node run in attachment order, and all of them run even when one stops propagation.
//!
//! ## Workflow
//!
//! ```
//! use megamenu_responder::dispatcher;
//! use megamenu_responder::listeners::Listeners;
//! use megamenu_responder::router::Router;
//! use megamenu_responder::types::{Outcome, ParentLookup};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, n: &u32) -> Option<u32> { (*n > 1).then(|| n - 1) }
//! }
//!
//! let mut listeners: Listeners<u32, &str, &str> = Listeners::new();
//! listeners.on(1, "keydown", false, "menu", "menu-keys");
//! listeners.on(3, "keydown", false, "menu", "link-keys");
//!
//! let seq = Router::with_parent(Parents).route(3, true);
//! let mut ran = Vec::new();
//! let result = dispatcher::run(&seq, &mut ran, |step, ran| {
//!     ran.extend(listeners.handlers_for(step.node, "keydown", step.phase));
//!     Outcome::Continue
//! });
//! assert_eq!(ran, vec!["link-keys", "menu-keys"]);
//! assert!(!result.consumed);
//! ```
//!
//! ## Adapters
//!
//! The [`adapters`] module provides integration with `megamenu_dom`
//! (`dom_adapter` feature): a borrowed document is a parent lookup.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod listeners;
pub mod router;
pub mod types;
