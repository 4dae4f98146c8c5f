// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focusability predicates.
//!
//! ## Rules
//!
//! An element is *focusable* when it is rendered (see [`Document::is_rendered`]) and either:
//! - it is a form control (`input`, `select`, `textarea`, `button`, `object`) without `disabled`, or
//! - it is a link (`a`, `area`) with an `href`, or
//! - it carries a `tabindex` attribute that parses as an integer (any sign).
//!
//! An element is *tabbable* when it is focusable and its tab index is absent or non-negative.
//! An unparseable `tabindex` counts as absent.
//!
//! Form controls with a `tabindex` are still bound by `disabled`.

use alloc::vec::Vec;

use crate::tree::Document;
use crate::types::ElementId;

const FORM_CONTROLS: [&str; 5] = ["input", "select", "textarea", "button", "object"];

/// Parsed `tabindex` of `id`, if present and well-formed.
pub fn tab_index(doc: &Document, id: ElementId) -> Option<i32> {
    doc.attr(id, "tabindex")?.trim().parse().ok()
}

/// True for `input`, `select`, `textarea`, `button`, and `object`.
pub fn is_form_control(doc: &Document, id: ElementId) -> bool {
    FORM_CONTROLS.contains(&doc.tag(id))
}

/// True when `id` can receive focus.
pub fn is_focusable(doc: &Document, id: ElementId) -> bool {
    let explicit = tab_index(doc, id).is_some();
    let eligible = match doc.tag(id) {
        tag if FORM_CONTROLS.contains(&tag) => !doc.has_attr(id, "disabled"),
        "a" | "area" => doc.has_attr(id, "href") || explicit,
        _ => explicit,
    };
    eligible && doc.is_rendered(id)
}

/// True when `id` takes part in sequential (Tab) navigation.
pub fn is_tabbable(doc: &Document, id: ElementId) -> bool {
    tab_index(doc, id).is_none_or(|t| t >= 0) && is_focusable(doc, id)
}

/// Tabbable descendants of `root` (excluding `root`) in document order.
pub fn tabbable_descendants(doc: &Document, root: ElementId) -> Vec<ElementId> {
    doc.descendants(root)
        .into_iter()
        .filter(|&n| is_tabbable(doc, n))
        .collect()
}

/// Tabbable elements among `root` and its descendants, in document order.
pub fn tabbable_within(doc: &Document, root: ElementId) -> Vec<ElementId> {
    let mut out = Vec::new();
    if is_tabbable(doc, root) {
        out.push(root);
    }
    out.extend(tabbable_descendants(doc, root));
    out
}

/// First tabbable among `root` and its descendants.
pub fn first_tabbable(doc: &Document, root: ElementId) -> Option<ElementId> {
    tabbable_within(doc, root).first().copied()
}

/// Last tabbable among `root` and its descendants.
pub fn last_tabbable(doc: &Document, root: ElementId) -> Option<ElementId> {
    tabbable_within(doc, root).last().copied()
}

/// Closest focusable element among `id` and its ancestors.
pub fn focusable_ancestor_or_self(doc: &Document, id: ElementId) -> Option<ElementId> {
    doc.closest(id, is_focusable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementData, ElementFlags, StyleRule};
    use alloc::vec;

    #[test]
    fn links_need_href_or_tabindex() {
        let mut doc = Document::new();
        let bare = doc.insert(doc.root(), ElementData::new("a"));
        let href = doc.insert(doc.root(), ElementData::new("a").attr("href", "#"));
        let indexed = doc.insert(doc.root(), ElementData::new("a").attr("tabindex", "0"));
        assert!(!is_focusable(&doc, bare));
        assert!(is_focusable(&doc, href));
        assert!(is_focusable(&doc, indexed));
    }

    #[test]
    fn disabled_controls_are_skipped() {
        let mut doc = Document::new();
        let on = doc.insert(doc.root(), ElementData::new("button"));
        let off = doc.insert(
            doc.root(),
            ElementData::new("input")
                .attr("disabled", "")
                .attr("tabindex", "0"),
        );
        assert!(is_tabbable(&doc, on));
        assert!(!is_focusable(&doc, off), "disabled wins over tabindex");
    }

    #[test]
    fn negative_tabindex_is_focusable_not_tabbable() {
        let mut doc = Document::new();
        let div = doc.insert(doc.root(), ElementData::new("div").attr("tabindex", "-1"));
        let junk = doc.insert(doc.root(), ElementData::new("div").attr("tabindex", "abc"));
        assert!(is_focusable(&doc, div));
        assert!(!is_tabbable(&doc, div));
        assert!(!is_focusable(&doc, junk), "unparseable tabindex counts as absent");
    }

    #[test]
    fn hidden_subtrees_are_not_focusable() {
        let mut doc = Document::new();
        let wrap = doc.insert(doc.root(), ElementData::new("div").class("panel"));
        let link = doc.insert(wrap, ElementData::new("a").attr("href", "#"));
        doc.add_style_rule(StyleRule::hidden_unless("panel", "open"));
        assert!(!is_tabbable(&doc, link));
        doc.add_class(wrap, "open");
        assert!(is_tabbable(&doc, link));
        doc.set_flags(wrap, ElementFlags::DISPLAYED);
        assert!(!is_focusable(&doc, link), "visibility: hidden on an ancestor");
    }

    #[test]
    fn tabbables_in_document_order() {
        let mut doc = Document::new();
        let ul = doc.insert(doc.root(), ElementData::new("ul"));
        let li1 = doc.insert(ul, ElementData::new("li"));
        let a1 = doc.insert(li1, ElementData::new("a").attr("href", "#1"));
        let li2 = doc.insert(ul, ElementData::new("li").attr("tabindex", "0"));
        let a2 = doc.insert(li2, ElementData::new("a").attr("href", "#2"));
        assert_eq!(tabbable_descendants(&doc, ul), vec![a1, li2, a2]);
        assert_eq!(tabbable_within(&doc, li2), vec![li2, a2]);
        assert_eq!(first_tabbable(&doc, li1), Some(a1));
        assert_eq!(last_tabbable(&doc, ul), Some(a2));
        let span = doc.insert(a1, ElementData::new("span"));
        assert_eq!(focusable_ancestor_or_self(&doc, span), Some(a1));
    }
}
