// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus routines.

use megamenu_dom::{ElementId, focus};
use megamenu_responder::types::Outcome;

use super::{Deferred, Handler, MenuController, Scope};
use crate::event::{DomEvent, EventSnapshot, EventType};
use crate::host::Host;
use crate::timing::{FOCUS_CLOSE_MS, SCREEN_READER_CLOSE_MS, SCREEN_READER_POLL_MS};

impl MenuController {
    /// Whether focus events at `el` concern the menu: focusable elements and panels.
    ///
    /// Elements still carrying the focus class are admitted too, so a link whose panel
    /// was hidden under it still gets its focusout.
    fn tracks_focus(&self, host: &Host, el: ElementId) -> bool {
        let doc = &host.doc;
        focus::is_focusable(doc, el)
            || doc.has_class(el, &self.options.panel_class)
            || doc.has_class(el, &self.options.focus_class)
    }

    pub(super) fn on_focus_in(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let target = event.target;
        if !self.tracks_focus(host, target) {
            return Outcome::Continue;
        }
        host.cancel(&mut self.state.focus_close);
        host.doc.add_class(target, &self.options.focus_class);

        let scoped = self.namespace(Scope::Focused);
        host.listeners.off(target, EventType::Click, &scoped);
        host.listeners
            .on(target, EventType::Click, false, &scoped, Handler::Click);

        self.state.just_focused = !self.state.mouse_focused;
        self.state.mouse_focused = false;

        let own_panel = self.panel_of(&host.doc, target);
        let other_open = self.panels.iter().any(|&p| {
            Some(p) != own_panel && host.doc.has_class(p, &self.options.open_class)
        });
        if other_open {
            self.open(host, &event.snapshot());
        }
        Outcome::Continue
    }

    pub(super) fn on_focus_out(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let target = event.target;
        if !self.tracks_focus(host, target) {
            return Outcome::Continue;
        }
        self.state.just_focused = false;
        host.doc.remove_class(target, &self.options.focus_class);
        host.listeners
            .off(target, EventType::Click, &self.namespace(Scope::Focused));

        let snapshot = event.snapshot();
        host.cancel(&mut self.state.focus_close);
        let (delay, work) = if host.screen_reader.is_some() {
            let item = self.top_item_of(&host.doc, target);
            (SCREEN_READER_POLL_MS, Deferred::ScreenReaderPoll { event: snapshot, item })
        } else {
            (FOCUS_CLOSE_MS, Deferred::Close(snapshot))
        };
        self.state.focus_close = Some(host.schedule(delay, work));
        Outcome::Continue
    }

    /// Keep the panel open while the screen-reader cursor is still inside `item`.
    pub(super) fn poll_screen_reader(
        &mut self,
        host: &mut Host,
        event: EventSnapshot,
        item: Option<ElementId>,
    ) {
        let cursor = host.screen_reader_node();
        let inside = matches!((item, cursor), (Some(item), Some(node)) if host.doc.contains_or_is(item, node));
        if inside {
            tracing::trace!(?item, ?cursor, "screen reader still inside item");
            return;
        }
        self.state.focus_close = Some(host.schedule(SCREEN_READER_CLOSE_MS, Deferred::Close(event)));
    }
}
