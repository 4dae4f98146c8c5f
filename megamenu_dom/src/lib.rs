// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Megamenu DOM: a small, `no_std` element tree for headless widgets.
//!
//! The tree stands in for a browser document so that widget logic can be written and
//! tested without one.
//!
//! - Represents a hierarchy of elements with tag names, attributes, class lists, and text.
//! - Tracks the element that holds focus.
//! - Models just enough styling to answer "is this rendered?" through [`ElementFlags`] and
//!   class-conditional [`StyleRule`]s.
//! - Provides the focusability predicates widgets need in the [`focus`] module.
//!
//! ## Not a browser
//!
//! There is no parser, no layout, and no event loop here.
//! Event propagation lives in `megamenu_responder`; the widget that consumes both lives in `megamenu`.
//!
//! ## API overview
//!
//! - [`Document`]: container owning elements, focus, and style rules.
//! - [`ElementData`]: per-element data used on insert.
//! - [`ElementId`]: generational handle of an element.
//! - [`ElementFlags`]: display and visibility bits.
//! - [`StyleRule`]: class-conditional hide rules, e.g. `.panel:not(.open) { display: none }`.
//!
//! ### Minimal usage
//!
//! ```
//! use megamenu_dom::{Document, ElementData, StyleRule, focus};
//!
//! let mut doc = Document::new();
//! let li = doc.insert(doc.root(), ElementData::new("li"));
//! let trigger = doc.insert(li, ElementData::new("a").attr("href", "?movie").text("Movies"));
//! let panel = doc.insert(li, ElementData::new("div").class("sub-nav"));
//! let inner = doc.insert(panel, ElementData::new("a").attr("href", "?movie&genre=0"));
//!
//! doc.add_style_rule(StyleRule::hidden_unless("sub-nav", "open"));
//! assert_eq!(focus::tabbable_descendants(&doc, li), vec![trigger]);
//!
//! doc.add_class(panel, "open");
//! assert_eq!(focus::tabbable_descendants(&doc, li), vec![trigger, inner]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod focus;
mod tree;
mod types;

pub use tree::{Ancestors, Document};
pub use types::{ElementData, ElementFlags, ElementId, StyleEffect, StyleRule};
