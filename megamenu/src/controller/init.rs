// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Initialization: structure discovery, ids, ARIA wiring, listener attachment.
//!
//! Expected shape: container → one menu root → top-level items. Within an item the
//! trigger is the first tabbable descendant and the panel is the last child that is not
//! tabbable and does not hold the trigger. Anything missing is skipped, not reported.
//!
//! Re-running is safe: attributes and ids already present are kept, and the menu's
//! listeners are detached before being attached again.

use megamenu_dom::{ElementId, focus};
use tracing::{debug, trace, warn};

use super::{Handler, MenuController, MenuItem, Scope};
use crate::event::{DomEvent, EventType};
use crate::host::Host;

const MENU_EVENTS: [(EventType, Handler); 6] = [
    (EventType::FocusIn, Handler::FocusIn),
    (EventType::FocusOut, Handler::FocusOut),
    (EventType::KeyDown, Handler::KeyDown),
    (EventType::MouseOver, Handler::MouseOver),
    (EventType::MouseOut, Handler::MouseOut),
    (EventType::MouseDown, Handler::MouseDown),
];

impl MenuController {
    /// Discover items and panels, wire ids and ARIA, and (re)attach listeners.
    pub fn init(&mut self, host: &mut Host) {
        host.listeners.off_namespace(&self.namespace(Scope::Menu));

        let container = self.container;
        host.doc.set_attr_if_absent(container, "role", "navigation");
        let Some(menu) = host.doc.children(container).first().copied() else {
            warn!(?container, "menu container has no menu root");
            self.menu = None;
            self.items.clear();
            self.panels.clear();
            return;
        };
        self.menu = Some(menu);
        host.doc.add_class(menu, &self.options.menu_class);

        let elements = host.doc.children(menu).to_vec();
        self.items = elements
            .into_iter()
            .enumerate()
            .map(|(position, element)| self.wire_item(host, element, position))
            .collect();

        let doc = &mut host.doc;
        self.panels = doc
            .descendants(menu)
            .into_iter()
            .filter(|&p| doc.has_class(p, &self.options.panel_class))
            .collect();
        for hr in doc.descendants(menu) {
            if doc.tag(hr) == "hr" {
                doc.set_attr_if_absent(hr, "role", "separator");
            }
        }

        self.attach_listeners(host, menu);
        debug!(
            ?menu,
            items = self.items.len(),
            panels = self.panels.len(),
            "menu initialized"
        );

        if let Some(active) = host.doc.active_element()
            && host.doc.contains_or_is(menu, active)
        {
            let mut replay = DomEvent::new(EventType::FocusIn, active);
            self.dispatch(host, &mut replay);
        }
    }

    fn wire_item(&self, host: &mut Host, element: ElementId, position: usize) -> MenuItem {
        let o = &self.options;
        host.doc.add_class(element, &o.top_nav_item_class);
        let trigger = focus::tabbable_descendants(&host.doc, element).first().copied();
        let Some(trigger) = trigger else {
            trace!(?element, "top-level item without a trigger");
            return MenuItem {
                element,
                trigger: None,
                panel: None,
                position,
            };
        };
        let trigger_id = self.ensure_id(host, trigger);

        let doc = &host.doc;
        let panel = doc
            .children(element)
            .iter()
            .rev()
            .copied()
            .find(|&c| !focus::is_tabbable(doc, c) && !doc.contains_or_is(c, trigger));
        let Some(panel) = panel else {
            return MenuItem {
                element,
                trigger: Some(trigger),
                panel: None,
                position,
            };
        };
        let panel_id = self.ensure_id(host, panel);

        let doc = &mut host.doc;
        doc.set_attr_if_absent(trigger, "aria-haspopup", "true");
        doc.set_attr_if_absent(trigger, "aria-controls", &panel_id);
        doc.set_attr_if_absent(trigger, "aria-expanded", "false");
        doc.set_attr_if_absent(panel, "role", "group");
        doc.set_attr_if_absent(panel, "aria-expanded", "false");
        doc.set_attr_if_absent(panel, "aria-hidden", "true");
        doc.set_attr_if_absent(panel, "aria-labelledby", &trigger_id);
        doc.add_class(panel, &o.panel_class);
        trace!(?trigger, ?panel, "item wired");

        MenuItem {
            element,
            trigger: Some(trigger),
            panel: Some(panel),
            position,
        }
    }

    /// The element's id, assigning a fresh one when it has none.
    fn ensure_id(&self, host: &mut Host, el: ElementId) -> String {
        if let Some(id) = host.doc.attr(el, "id").filter(|id| !id.is_empty()) {
            return id.to_owned();
        }
        let id = host.ids.next_id(&self.options.uuid_prefix);
        host.doc.set_attr(el, "id", &id);
        id
    }

    fn attach_listeners(&self, host: &mut Host, menu: ElementId) {
        let ns = self.namespace(Scope::Menu);
        for (kind, handler) in MENU_EVENTS {
            host.listeners.on(menu, kind, false, &ns, handler);
        }
        if host.touch {
            host.listeners
                .on(menu, EventType::TouchStart, false, &ns, Handler::TouchStart);
        }
        trace!(?menu, listeners = host.listeners.len(), "listeners attached");
    }
}
