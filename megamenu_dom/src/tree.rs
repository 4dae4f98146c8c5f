// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: structure, attributes, classes, styling, and focus.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::types::{ElementData, ElementFlags, ElementId, StyleEffect, StyleRule};

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// An element tree rooted at a single `html` element.
pub struct Document {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: ElementId,
    active: Option<ElementId>,
    rules: Vec<StyleRule>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Document")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("active", &self.active)
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    data: ElementData,
}

impl Node {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl Document {
    /// Create a document containing only the `html` root element.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: ElementId::new(0, 1),
            active: None,
            rules: Vec::new(),
        };
        doc.root = doc.alloc(ElementData::new("html"));
        doc
    }

    /// The `html` root element. Document-level listeners attach here.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Insert a new element as the last child of `parent`.
    ///
    /// Panics if `parent` is stale.
    pub fn insert(&mut self, parent: ElementId, data: ElementData) -> ElementId {
        let id = self.alloc(data);
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
        id
    }

    /// Remove an element (and its subtree). Clears focus if it was inside.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) || id == self.root {
            return;
        }
        if let Some(active) = self.active
            && (active == id || self.contains(id, active))
        {
            self.active = None;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        self.free_subtree(id);
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    // --- structure ---

    /// Parent of `id`, or `None` for the root or a stale id.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in document order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// All descendants of `id` (excluding `id`) in document (pre-)order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Ancestors of `id` from its parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// True when `node` is a strict descendant of `ancestor`.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// True when `node` is `ancestor` or one of its descendants.
    pub fn contains_or_is(&self, ancestor: ElementId, node: ElementId) -> bool {
        ancestor == node || self.contains(ancestor, node)
    }

    /// First of `id` and its ancestors that satisfies `pred`.
    pub fn closest(
        &self,
        id: ElementId,
        mut pred: impl FnMut(&Self, ElementId) -> bool,
    ) -> Option<ElementId> {
        if !self.is_alive(id) {
            return None;
        }
        core::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| pred(self, n))
    }

    /// Root→`id` path (inclusive). Empty for stale ids.
    pub fn path_to_root(&self, id: ElementId) -> Vec<ElementId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        let mut out: Vec<ElementId> = core::iter::once(id).chain(self.ancestors(id)).collect();
        out.reverse();
        out
    }

    /// Position of `id` in a document-order walk from the root.
    pub fn position(&self, id: ElementId) -> Option<usize> {
        if id == self.root {
            return Some(0);
        }
        self.descendants(self.root)
            .iter()
            .position(|&n| n == id)
            .map(|p| p + 1)
    }

    // --- element data ---

    /// Lowercase tag name; empty for stale ids.
    pub fn tag(&self, id: ElementId) -> &str {
        self.node_opt(id).map_or("", |n| n.data.tag.as_str())
    }

    /// Read an attribute.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.node_opt(id)?.data.attributes.get(name).map(String::as_str)
    }

    /// True when the attribute is present, whatever its value.
    pub fn has_attr(&self, id: ElementId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Write an attribute.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    /// Write an attribute only when it is absent. Returns the effective value.
    pub fn set_attr_if_absent(&mut self, id: ElementId, name: &str, value: &str) -> Option<String> {
        if !self.has_attr(id, name) {
            self.set_attr(id, name, value);
        }
        self.attr(id, name).map(ToString::to_string)
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.attributes.remove(name);
        }
    }

    /// Class list of `id`.
    pub fn classes(&self, id: ElementId) -> &[String] {
        self.node_opt(id).map_or(&[], |n| n.data.classes.as_slice())
    }

    /// True when `id` carries `class`.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes(id).iter().any(|c| c == class)
    }

    /// Add a class (no-op if present).
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_opt_mut(id)
            && !n.data.classes.iter().any(|c| c == class)
        {
            n.data.classes.push(class.to_string());
        }
    }

    /// Remove a class (no-op if absent).
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.classes.retain(|c| c != class);
        }
    }

    /// Add or remove a class.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// The element's own text.
    pub fn own_text(&self, id: ElementId) -> &str {
        self.node_opt(id).map_or("", |n| n.data.text.as_str())
    }

    /// Replace the element's own text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.text = text.to_string();
        }
    }

    /// Concatenated text of `id` and its descendants in document order.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::from(self.own_text(id));
        for d in self.descendants(id) {
            out.push_str(self.own_text(d));
        }
        out
    }

    /// Flags of `id`; empty for stale ids.
    pub fn flags(&self, id: ElementId) -> ElementFlags {
        self.node_opt(id)
            .map_or(ElementFlags::empty(), |n| n.data.flags)
    }

    /// Replace the flags of `id`.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.flags = flags;
        }
    }

    // --- styling ---

    /// Append a style rule. Rules are evaluated on every visibility query.
    pub fn add_style_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Effective flags of `id` alone, after style rules.
    pub fn computed_flags(&self, id: ElementId) -> ElementFlags {
        let Some(node) = self.node_opt(id) else {
            return ElementFlags::empty();
        };
        let mut flags = node.data.flags;
        for rule in self.rules.iter().filter(|r| r.matches(&node.data.classes)) {
            match rule.effect {
                StyleEffect::DisplayNone => flags.remove(ElementFlags::DISPLAYED),
                StyleEffect::VisibilityHidden => flags.remove(ElementFlags::VISIBLE),
            }
        }
        flags
    }

    /// True when `id` and every ancestor are displayed and visible.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.is_alive(id)
            && core::iter::once(id)
                .chain(self.ancestors(id))
                .all(|n| self.computed_flags(n).contains(ElementFlags::all()))
    }

    // --- focus ---

    /// The element holding focus, if any.
    pub fn active_element(&self) -> Option<ElementId> {
        self.active.filter(|&a| self.is_alive(a))
    }

    /// Record the element holding focus.
    ///
    /// This does not fire any events; hosts that model focus events call it from
    /// their own focus routine.
    pub fn set_active(&mut self, id: Option<ElementId>) {
        self.active = id.filter(|&a| self.is_alive(a));
    }

    // --- internals ---

    fn alloc(&mut self, data: ElementData) -> ElementId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            (idx, generation)
        } else {
            self.nodes.push(Some(Node::new(1, data)));
            self.generations.push(1);
            (self.nodes.len() - 1, 1)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        ElementId::new(idx as u32, generation)
    }

    fn free_subtree(&mut self, id: ElementId) {
        let children = self.node(id).children.clone();
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn node(&self, id: ElementId) -> &Node {
        self.node_opt(id).expect("dangling ElementId")
    }

    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}

/// Iterator over the ancestors of an element, innermost first.
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<ElementId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let cur = self.next?;
        self.next = self.doc.parent(cur);
        Some(cur)
    }
}
