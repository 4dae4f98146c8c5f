// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, click and touch routines.

use megamenu_dom::{ElementId, focus};
use megamenu_responder::types::Outcome;
use tracing::trace;

use super::{Deferred, Handler, MenuController, Scope};
use crate::event::{DomEvent, EventSnapshot, EventType};
use crate::host::Host;
use crate::timing::{HOVER_CLOSE_MS, MOUSEDOWN_CLEAR_MS};

impl MenuController {
    pub(super) fn on_mouse_over(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let target = event.target;
        host.cancel(&mut self.state.hover_close);
        host.doc.add_class(target, &self.options.hover_class);
        self.open(host, &event.snapshot());
        if focus::is_tabbable(&host.doc, target) {
            let root = host.doc.root();
            let ns = self.namespace(Scope::Hover);
            host.listeners.off(root, EventType::KeyDown, &ns);
            host.listeners
                .on(root, EventType::KeyDown, false, &ns, Handler::HoverKeyDown(target));
        }
        Outcome::Continue
    }

    pub(super) fn on_mouse_out(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let target = event.target;
        host.doc.remove_class(target, &self.options.hover_class);
        host.cancel(&mut self.state.hover_close);
        self.state.hover_close =
            Some(host.schedule(HOVER_CLOSE_MS, Deferred::Close(event.snapshot())));
        if focus::is_tabbable(&host.doc, target) {
            let root = host.doc.root();
            host.listeners
                .off(root, EventType::KeyDown, &self.namespace(Scope::Hover));
        }
        Outcome::Continue
    }

    pub(super) fn on_mouse_down(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let target = event.target;
        let doc = &host.doc;
        if doc.has_class(target, &self.options.panel_class)
            || focus::focusable_ancestor_or_self(doc, target).is_some()
        {
            self.state.mouse_focused = true;
        }
        host.cancel(&mut self.state.clear_pending);
        self.state.clear_pending =
            Some(host.schedule(MOUSEDOWN_CLEAR_MS, Deferred::ClearPendingCloses));
        Outcome::Continue
    }

    /// Touch input runs the click routine on the touched trigger before any emulated
    /// mouse events; consuming the touch suppresses them.
    pub(super) fn on_touch_start(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        match focus::focusable_ancestor_or_self(&host.doc, event.target) {
            Some(trigger) if self.menu_contains(&host.doc, trigger) => {
                self.on_click(host, trigger, event.snapshot())
            }
            _ => Outcome::Continue,
        }
    }

    /// Click on the element holding focus, or a tap on a trigger.
    ///
    /// Only top-level triggers of items with exactly one panel react.
    pub(super) fn on_click(
        &mut self,
        host: &mut Host,
        target: ElementId,
        event: EventSnapshot,
    ) -> Outcome {
        let doc = &host.doc;
        let Some(item) = self.top_item_of(doc, target) else {
            return Outcome::Continue;
        };
        if self.panel_of(doc, target).is_some() {
            return Outcome::Continue;
        }
        let panel_count = doc
            .descendants(item)
            .into_iter()
            .filter(|&d| doc.has_class(d, &self.options.panel_class))
            .count();
        if panel_count != 1 {
            return Outcome::Continue;
        }
        let snapshot = EventSnapshot { target, ..event };
        if !doc.has_class(target, &self.options.open_class) {
            self.open(host, &snapshot);
            self.state.just_focused = false;
            Outcome::StopAndConsume
        } else if self.state.just_focused {
            trace!(?target, "click swallowed after focus");
            self.state.just_focused = false;
            Outcome::StopAndConsume
        } else if host.touch {
            self.close(host, &snapshot);
            Outcome::StopAndConsume
        } else {
            Outcome::Continue
        }
    }
}
