// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel state machine.
//!
//! Every item is `CLOSED` or `OPEN`, and the state lives in the document only: the
//! trigger's and panel's `aria-expanded`, the open class, and the panel's `aria-hidden`.
//! [`MenuController::set_item_open`] writes that triad for one item in a single step, and
//! opening always resets every sibling first, so at most one item is open.
//!
//! After each transition the outside-interaction and mutation listeners are re-synced
//! with whatever is open.

use megamenu_dom::{ElementId, focus};
use tracing::debug;

use super::{Deferred, Handler, MenuController, Scope};
use crate::event::{EventSnapshot, EventType, Key};
use crate::host::Host;
use crate::timing::RESTORE_FOCUS_MS;

const OUTSIDE_EVENTS: [EventType; 3] = [EventType::MouseUp, EventType::TouchEnd, EventType::PointerUp];

impl MenuController {
    /// Open the item containing `event.target`, closing its siblings first.
    pub(crate) fn open(&mut self, host: &mut Host, event: &EventSnapshot) {
        let target = event.target;
        let item = self.top_item_of(&host.doc, target);
        host.cancel(&mut self.state.focus_close);
        if let Some(item) = item {
            self.open_top_item(host, item, event.kind);
            let doc = &host.doc;
            let in_panel = self.panel_of(doc, target).is_some();
            let active = doc.active_element();
            let focus_in_menu = active.is_some_and(|a| self.menu_contains(doc, a));
            let focus_in_panel = active.is_some_and(|a| self.panel_of(doc, a).is_some());
            if event.kind == EventType::MouseOver
                && !in_panel
                && focus_in_menu
                && !focus_in_panel
                && focus::is_tabbable(&host.doc, target)
            {
                self.move_focus(host, target);
                self.state.just_focused = false;
            }
        }
        self.sync_monitors(host);
    }

    /// Open `item` after resetting every sibling.
    pub(crate) fn open_top_item(&mut self, host: &mut Host, item: ElementId, cause: EventType) {
        let siblings: Vec<ElementId> = match host.doc.parent(item) {
            Some(parent) => host.doc.children(parent).to_vec(),
            None => Vec::new(),
        };
        for sibling in siblings.into_iter().filter(|&s| s != item) {
            self.set_item_open(host, sibling, false);
        }
        if !self.is_open(&host.doc, item) {
            debug!(?item, ?cause, "panel opened");
        }
        self.set_item_open(host, item, true);
    }

    /// Close the open item, honoring the containment guards.
    pub(crate) fn close(&mut self, host: &mut Host, event: &EventSnapshot) {
        match self.resolve_open_item(host) {
            Some(item) => {
                let doc = &host.doc;
                if event.related_target.is_some_and(|r| doc.contains_or_is(item, r)) {
                    self.sync_monitors(host);
                    return;
                }
                let passive = matches!(event.kind, EventType::MouseOut | EventType::FocusOut);
                if passive && doc.active_element().is_some_and(|a| doc.contains(item, a)) {
                    self.sync_monitors(host);
                    return;
                }
                debug!(?item, cause = ?event.kind, "panel closed");
                self.set_item_open(host, item, false);
                if event.is_key(Key::Escape) || event.kind == EventType::AttrModified {
                    let restore = focus::tabbable_descendants(&host.doc, item).first().copied();
                    host.cancel(&mut self.state.restore_focus);
                    self.state.restore_focus =
                        Some(host.schedule(RESTORE_FOCUS_MS, Deferred::RestoreFocus(restore)));
                }
            }
            None => self.close_all(host),
        }
        self.sync_monitors(host);
    }

    /// Reset every item that still reports itself expanded.
    fn close_all(&mut self, host: &mut Host) {
        let items: Vec<ElementId> = self.items.iter().map(|i| i.element).collect();
        for item in items {
            if self.is_open(&host.doc, item) {
                debug!(?item, "panel closed");
                self.set_item_open(host, item, false);
            }
        }
    }

    /// Top-level item of the first open element in the menu.
    fn resolve_open_item(&self, host: &Host) -> Option<ElementId> {
        let doc = &host.doc;
        let menu = self.menu?;
        doc.descendants(menu)
            .into_iter()
            .filter(|&n| doc.has_class(n, &self.options.open_class))
            .find_map(|n| {
                doc.ancestors(n)
                    .find(|&a| doc.has_class(a, &self.options.top_nav_item_class))
            })
    }

    /// Write the open triad of `item`'s descendants.
    pub(crate) fn set_item_open(&self, host: &mut Host, item: ElementId, open: bool) {
        let doc = &mut host.doc;
        let expanded = if open { "true" } else { "false" };
        let hidden = if open { "false" } else { "true" };
        for el in doc.descendants(item) {
            if !doc.has_attr(el, "aria-expanded") {
                continue;
            }
            doc.set_attr(el, "aria-expanded", expanded);
            doc.toggle_class(el, &self.options.open_class, open);
            if doc.has_class(el, &self.options.panel_class) {
                doc.set_attr(el, "aria-hidden", hidden);
            }
        }
    }

    /// Attach the outside-interaction listeners and the mutation listeners of open
    /// panels when something is open; detach them otherwise.
    pub(crate) fn sync_monitors(&self, host: &mut Host) {
        let outside = self.namespace(Scope::Outside);
        let expanded = self.namespace(Scope::Expanded);
        host.listeners.off_namespace(&outside);
        host.listeners.off_namespace(&expanded);

        let open_panels: Vec<ElementId> = self
            .panels
            .iter()
            .copied()
            .filter(|&p| host.doc.is_alive(p) && host.doc.attr(p, "aria-expanded") == Some("true"))
            .collect();
        if open_panels.is_empty() {
            return;
        }
        let root = host.doc.root();
        for kind in OUTSIDE_EVENTS {
            host.listeners.on(root, kind, false, &outside, Handler::Outside);
        }
        for panel in open_panels {
            host.listeners
                .on(panel, EventType::AttrModified, false, &expanded, Handler::Collapse);
        }
        tracing::trace!("outside and mutation monitors attached");
    }

    /// Move focus back after an explicit close.
    ///
    /// Mutation listeners are re-synced first, which drops those of the closed panel.
    pub(crate) fn restore_focus(&mut self, host: &mut Host, target: Option<ElementId>) {
        self.sync_monitors(host);
        if let Some(target) = target {
            self.move_focus(host, target);
        }
        self.state.just_focused = false;
    }
}

#[cfg(test)]
mod tests {
    use megamenu_dom::Document;

    use crate::event::{EventSnapshot, EventType};
    use crate::host::Host;
    use crate::options::MenuOptions;
    use crate::sample::{self, Fixture};
    use crate::MenuController;

    fn setup() -> (Host, Fixture, MenuController) {
        let mut doc = Document::new();
        let fx = sample::movie_menu(&mut doc);
        let mut host = Host::new(doc);
        host.set_id_seed(1);
        let menu = MenuController::new(&mut host, fx.nav, MenuOptions::default()).unwrap();
        (host, fx, menu)
    }

    fn over(target: megamenu_dom::ElementId) -> EventSnapshot {
        EventSnapshot {
            kind: EventType::MouseOver,
            target,
            related_target: None,
            key: None,
        }
    }

    #[test]
    fn opening_resets_siblings_first() {
        let (mut host, fx, mut menu) = setup();
        menu.open(&mut host, &over(fx.triggers[0]));
        assert_eq!(menu.open_item(&host.doc), Some(fx.items[0]));
        menu.open(&mut host, &over(fx.triggers[1]));
        assert_eq!(menu.open_item(&host.doc), Some(fx.items[1]));
        let doc = &host.doc;
        assert_eq!(doc.attr(fx.triggers[0], "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(fx.panels[0], "aria-hidden"), Some("true"));
        assert!(!doc.has_class(fx.panels[0], "open"));
        assert_eq!(doc.attr(fx.panels[1], "aria-hidden"), Some("false"));
        assert!(doc.has_class(fx.triggers[1], "open"));
    }

    #[test]
    fn monitors_follow_open_state() {
        let (mut host, fx, mut menu) = setup();
        let root = host.doc.root();
        assert_eq!(host.listener_count(root, EventType::MouseUp), 0);
        menu.open(&mut host, &over(fx.triggers[0]));
        assert_eq!(host.listener_count(root, EventType::MouseUp), 1);
        assert_eq!(host.listener_count(root, EventType::TouchEnd), 1);
        assert_eq!(host.listener_count(root, EventType::PointerUp), 1);
        assert_eq!(host.listener_count(fx.panels[0], EventType::AttrModified), 1);
        menu.open(&mut host, &over(fx.triggers[1]));
        assert_eq!(host.listener_count(root, EventType::MouseUp), 1);
        assert_eq!(host.listener_count(fx.panels[0], EventType::AttrModified), 0);
        assert_eq!(host.listener_count(fx.panels[1], EventType::AttrModified), 1);

        let leave = EventSnapshot {
            kind: EventType::MouseOut,
            ..over(fx.triggers[1])
        };
        menu.close(&mut host, &leave);
        assert_eq!(menu.open_item(&host.doc), None);
        assert_eq!(host.listener_count(root, EventType::MouseUp), 0);
        assert_eq!(host.listener_count(fx.panels[1], EventType::AttrModified), 0);
    }

    #[test]
    fn close_is_suppressed_when_the_related_target_stays_inside() {
        let (mut host, fx, mut menu) = setup();
        menu.open(&mut host, &over(fx.triggers[0]));
        let into_panel = EventSnapshot {
            kind: EventType::MouseOut,
            target: fx.triggers[0],
            related_target: Some(fx.panel_links[0][0]),
            key: None,
        };
        menu.close(&mut host, &into_panel);
        assert_eq!(menu.open_item(&host.doc), Some(fx.items[0]));
        assert_eq!(host.listener_count(host.doc.root(), EventType::MouseUp), 1);
    }
}
