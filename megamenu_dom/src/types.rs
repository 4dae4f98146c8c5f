// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, flags, element data, and style rules.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Identifier for an element in the [`Document`](crate::Document).
///
/// This is a small, copyable handle that stays stable for the life of the element
/// but becomes invalid when the element is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Use [`Document::is_alive`](crate::Document::is_alive) to check whether an `ElementId` still
/// refers to a live element. Stale ids never alias a different live element because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags mirroring the two computed-style properties focusability depends on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element takes part in layout (`display` is not `none`).
        const DISPLAYED = 0b0000_0001;
        /// Element is painted (`visibility` is not `hidden`).
        const VISIBLE   = 0b0000_0010;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::DISPLAYED | Self::VISIBLE
    }
}

/// Data carried by a single element.
///
/// Build one with [`ElementData::new`] and the chaining helpers:
///
/// ```
/// use megamenu_dom::ElementData;
///
/// let link = ElementData::new("a").attr("href", "?movie").text("Movies");
/// assert_eq!(link.tag, "a");
/// assert_eq!(link.attributes.get("href").map(String::as_str), Some("?movie"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes by name.
    pub attributes: BTreeMap<String, String>,
    /// Class list, in insertion order and without duplicates.
    pub classes: Vec<String>,
    /// The element's own text, excluding descendants.
    pub text: String,
    /// Computed display/visibility flags.
    pub flags: ElementFlags,
}

impl ElementData {
    /// Create element data for the given tag name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Add a class.
    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    /// Set the element's own text.
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Replace the flags.
    pub fn flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Effect applied by a [`StyleRule`] when it matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleEffect {
    /// Equivalent to `display: none`.
    DisplayNone,
    /// Equivalent to `visibility: hidden`.
    VisibilityHidden,
}

/// A class-conditional rule standing in for host styling.
///
/// Matches elements carrying `class` and, when `unless_class` is set, not carrying it.
/// `StyleRule::hidden_unless("panel", "open")` reads as
/// `.panel:not(.open) { display: none }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Class the element must carry.
    pub class: String,
    /// Class that suppresses the rule when present.
    pub unless_class: Option<String>,
    /// What the rule does.
    pub effect: StyleEffect,
}

impl StyleRule {
    /// `.class:not(.unless) { display: none }`.
    pub fn hidden_unless(class: &str, unless: &str) -> Self {
        Self {
            class: class.to_string(),
            unless_class: Some(unless.to_string()),
            effect: StyleEffect::DisplayNone,
        }
    }

    /// `.class { <effect> }`.
    pub fn always(class: &str, effect: StyleEffect) -> Self {
        Self {
            class: class.to_string(),
            unless_class: None,
            effect,
        }
    }

    pub(crate) fn matches(&self, classes: &[String]) -> bool {
        let has = |c: &str| classes.iter().any(|x| x == c);
        has(&self.class) && self.unless_class.as_deref().is_none_or(|u| !has(u))
    }
}
