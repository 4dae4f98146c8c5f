// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for `megamenu_dom`.
//!
//! ## Feature
//!
//! Enable with `dom_adapter`.
//!
//! ## Notes
//!
//! A borrowed [`Document`] is a [`ParentLookup`], so a router can be built per event
//! without cloning the tree. Stale ids route as singleton paths.

use alloc::vec::Vec;

use megamenu_dom::{Document, ElementId};

use crate::router::Router;
use crate::types::{Dispatch, ParentLookup};

impl ParentLookup<ElementId> for &Document {
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        self.parent(*node)
    }
}

/// Propagation steps for an event at `target` within `doc`.
pub fn route_in(doc: &Document, target: ElementId, bubbles: bool) -> Vec<Dispatch<ElementId>> {
    Router::with_parent(doc).route(target, bubbles)
}
