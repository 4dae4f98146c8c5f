// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree basics.
//!
//! Build a small tree, hide part of it with a style rule, and watch the tab order change.
//!
//! Run:
//! - `cargo run -p megamenu_demos --example dom_basics`

use megamenu_dom::{Document, ElementData, ElementFlags, StyleRule, focus};

fn main() {
    let mut doc = Document::new();
    let root = doc.root();
    let nav = doc.insert(root, ElementData::new("nav"));
    let trigger = doc.insert(nav, ElementData::new("a").attr("href", "?movie").text("Movies"));
    let panel = doc.insert(nav, ElementData::new("div").class("sub-nav"));
    let inner = doc.insert(panel, ElementData::new("a").attr("href", "?movie&genre=0").text("Action"));
    let skipped = doc.insert(panel, ElementData::new("span").attr("tabindex", "-1").text("Skipped"));

    doc.add_style_rule(StyleRule::hidden_unless("sub-nav", "open"));
    println!("closed: {:?}", focus::tabbable_descendants(&doc, nav));

    doc.add_class(panel, "open");
    println!("open:   {:?}", focus::tabbable_descendants(&doc, nav));
    assert_eq!(focus::tabbable_descendants(&doc, nav), vec![trigger, inner]);

    // Focusable but not tabbable.
    assert!(focus::is_focusable(&doc, skipped));
    assert!(!focus::is_tabbable(&doc, skipped));

    // Hiding an ancestor hides everything below it.
    doc.set_flags(nav, ElementFlags::DISPLAYED);
    assert!(!focus::is_focusable(&doc, inner));
    println!("text of panel: {:?}", doc.text_content(panel));
}
