// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made menu document for demos and tests.
//!
//! ```text
//! html
//! ├── a "Skip to content"
//! ├── nav
//! │   └── ul
//! │       ├── li  a "Movies"  div.sub-nav  (two groups)
//! │       ├── li  a "Music"   div.sub-nav  (two groups)
//! │       ├── li  a "Reading" div.sub-nav  (two groups around an hr)
//! │       └── li  a "About"
//! └── a "Footer"
//! ```
//!
//! Panels are `div.sub-nav`, hidden by a style rule unless they carry `open`.
//! Groups carry the default panel-group class.

use megamenu_dom::{Document, ElementData, ElementId, StyleRule};

use crate::options::MenuOptions;

/// Labels of the panel links, per item and group.
pub const GENRES: [[[&str; 3]; 2]; 3] = [
    [["Action", "Drama", "Documentary"], ["Comedy", "Dreams", "Thriller"]],
    [["Jazz", "Blues", "Rock"], ["Classical", "Country", "Folk"]],
    [["Fiction", "Fantasy", "History"], ["Poetry", "Plays", "Biography"]],
];

const TOP_LEVEL: [(&str, &str); 4] = [
    ("Movies", "?movie"),
    ("Music", "?music"),
    ("Reading", "?reading"),
    ("About", "?about"),
];

/// Handles into a document built by [`movie_menu`].
#[derive(Clone, Debug)]
pub struct Fixture {
    /// Link before the menu.
    pub before: ElementId,
    /// The menu container.
    pub nav: ElementId,
    /// The menu root.
    pub menu: ElementId,
    /// Top-level items.
    pub items: Vec<ElementId>,
    /// Trigger links, one per item.
    pub triggers: Vec<ElementId>,
    /// Panels of the first three items.
    pub panels: Vec<ElementId>,
    /// Groups per panel.
    pub groups: Vec<Vec<ElementId>>,
    /// Links per panel, in document order.
    pub panel_links: Vec<Vec<ElementId>>,
    /// The separator inside the third panel.
    pub separator: ElementId,
    /// Link after the menu.
    pub after: ElementId,
}

/// Build the sample menu under the document root.
pub fn movie_menu(doc: &mut Document) -> Fixture {
    let root = doc.root();
    let group_class = MenuOptions::default().panel_group_class;
    doc.add_style_rule(StyleRule::hidden_unless("sub-nav", "open"));

    let before = doc.insert(
        root,
        ElementData::new("a").attr("href", "#main").text("Skip to content"),
    );
    let nav = doc.insert(root, ElementData::new("nav"));
    let menu = doc.insert(nav, ElementData::new("ul").class("nav-menu"));

    let mut fx = Fixture {
        before,
        nav,
        menu,
        items: Vec::new(),
        triggers: Vec::new(),
        panels: Vec::new(),
        groups: Vec::new(),
        panel_links: Vec::new(),
        separator: root,
        after: root,
    };

    for (i, (label, href)) in TOP_LEVEL.into_iter().enumerate() {
        let item = doc.insert(menu, ElementData::new("li").class("nav-item"));
        let trigger = doc.insert(item, ElementData::new("a").attr("href", href).text(label));
        fx.items.push(item);
        fx.triggers.push(trigger);
        let Some(groups) = GENRES.get(i) else {
            continue;
        };

        let panel = doc.insert(item, ElementData::new("div").class("sub-nav"));
        let mut group_ids = Vec::new();
        let mut links = Vec::new();
        for (g, genres) in groups.iter().enumerate() {
            if g == 1 && i == 2 {
                fx.separator = doc.insert(panel, ElementData::new("hr"));
            }
            let group = doc.insert(
                panel,
                ElementData::new("ul").class("sub-nav-group").class(&group_class),
            );
            group_ids.push(group);
            for (n, genre) in genres.iter().enumerate() {
                let li = doc.insert(group, ElementData::new("li"));
                let href = format!("{href}&genre={}", g * genres.len() + n);
                links.push(doc.insert(li, ElementData::new("a").attr("href", &href).text(genre)));
            }
        }
        fx.panels.push(panel);
        fx.groups.push(group_ids);
        fx.panel_links.push(links);
    }

    fx.after = doc.insert(root, ElementData::new("a").attr("href", "#footer").text("Footer"));
    fx
}
