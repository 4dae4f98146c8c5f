// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted browser page.
//!
//! [`Page`] plays the part of the browser around a mounted [`MenuController`]: it turns
//! user gestures into the native event sequences (with their default actions) and runs
//! timers on a virtual clock. Everything is synchronous and deterministic.
//!
//! ```
//! use megamenu::page::Page;
//! use megamenu::{MenuOptions, sample};
//! use megamenu_dom::Document;
//!
//! let mut doc = Document::new();
//! let fx = sample::movie_menu(&mut doc);
//! let mut page = Page::new(doc).with_id_seed(7);
//! page.mount(fx.nav, MenuOptions::default()).unwrap();
//!
//! page.mouse_over(fx.triggers[1]);
//! assert_eq!(page.open_item(), Some(fx.items[1]));
//!
//! page.mouse_leave();
//! page.advance(250);
//! assert_eq!(page.open_item(), None);
//! ```

use megamenu_dom::{Document, ElementId, focus};
use tracing::trace;

use crate::controller::MenuController;
use crate::error::Result;
use crate::event::{DomEvent, EventType, Key, Modifiers};
use crate::host::{Host, ScreenReaderCursor};
use crate::options::MenuOptions;

/// A document with at most one mounted menu, driven by simulated input.
#[derive(Debug)]
pub struct Page {
    host: Host,
    menu: Option<MenuController>,
    hovered: Option<ElementId>,
}

impl Page {
    /// A mouse-only page over `doc`.
    pub fn new(doc: Document) -> Self {
        Self {
            host: Host::new(doc),
            menu: None,
            hovered: None,
        }
    }

    /// Report touch capability. Must be set before [`mount`](Self::mount).
    pub fn with_touch(mut self, touch: bool) -> Self {
        self.host.set_touch(touch);
        self
    }

    /// Install a screen-reader cursor hook.
    pub fn with_screen_reader(mut self, hook: impl ScreenReaderCursor + 'static) -> Self {
        self.host.set_screen_reader(Box::new(hook));
        self
    }

    /// Use a fixed seed for generated ids.
    pub fn with_id_seed(mut self, seed: u64) -> Self {
        self.host.set_id_seed(seed);
        self
    }

    /// Mount a menu over `container`, replacing any previous one.
    pub fn mount(&mut self, container: ElementId, options: MenuOptions) -> Result<()> {
        self.menu = Some(MenuController::new(&mut self.host, container, options)?);
        Ok(())
    }

    /// The mounted menu.
    pub fn menu(&self) -> Option<&MenuController> {
        self.menu.as_ref()
    }

    /// The host environment.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.host.doc
    }

    /// The document, for edits between gestures.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.host.doc
    }

    /// The element holding focus.
    pub fn active_element(&self) -> Option<ElementId> {
        self.host.doc.active_element()
    }

    /// The open top-level item, if a menu is mounted.
    pub fn open_item(&self) -> Option<ElementId> {
        self.menu.as_ref()?.open_item(&self.host.doc)
    }

    /// Current virtual time.
    pub fn now(&self) -> u64 {
        self.host.now()
    }

    /// Links whose default navigation ran.
    pub fn navigations(&self) -> &[ElementId] {
        self.host.navigations()
    }

    /// Read one option of the mounted menu.
    pub fn option(&self, name: &str) -> Option<Result<&str>> {
        self.menu.as_ref().map(|m| m.option(name))
    }

    /// Write one option of the mounted menu. Does nothing without a menu.
    pub fn set_option(&mut self, name: &str, value: &str, reinitialize: bool) -> Result<()> {
        match &mut self.menu {
            Some(menu) => menu.set_option(&mut self.host, name, value, reinitialize),
            None => Ok(()),
        }
    }

    /// Re-run initialization of the mounted menu.
    pub fn reinitialize(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.init(&mut self.host);
        }
    }

    /// Dispatch `event` and return it with its final default-prevented state.
    pub fn dispatch(&mut self, mut event: DomEvent) -> DomEvent {
        if let Some(menu) = &mut self.menu {
            menu.dispatch(&mut self.host, &mut event);
        }
        event
    }

    /// Move focus to `el` if it can take focus. Returns whether focus is on `el` afterwards.
    pub fn focus(&mut self, el: ElementId) -> bool {
        match &mut self.menu {
            Some(menu) => menu.move_focus(&mut self.host, el),
            None => {
                let ok = focus::is_focusable(&self.host.doc, el);
                if ok {
                    self.host.doc.set_active(Some(el));
                }
                ok
            }
        }
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        match &mut self.menu {
            Some(menu) => menu.blur(&mut self.host),
            None => self.host.doc.set_active(None),
        }
    }

    /// Move the pointer onto `el`.
    pub fn mouse_over(&mut self, el: ElementId) {
        if self.hovered == Some(el) {
            return;
        }
        let previous = self.hovered.replace(el);
        if let Some(prev) = previous.filter(|&p| self.host.doc.is_alive(p)) {
            self.dispatch(DomEvent::new(EventType::MouseOut, prev).with_related(Some(el)));
        }
        self.dispatch(DomEvent::new(EventType::MouseOver, el).with_related(previous));
    }

    /// Move the pointer off the page.
    pub fn mouse_leave(&mut self) {
        if let Some(prev) = self.hovered.take() {
            self.dispatch(DomEvent::new(EventType::MouseOut, prev));
        }
    }

    /// Press the primary button on `el`; unless prevented, focus follows.
    pub fn mouse_down(&mut self, el: ElementId) {
        let ev = self.dispatch(DomEvent::new(EventType::MouseDown, el));
        if ev.default_prevented {
            return;
        }
        match focus::focusable_ancestor_or_self(&self.host.doc, el) {
            Some(target) => {
                self.focus(target);
            }
            None => self.blur(),
        }
    }

    /// Release the primary button on `el`.
    pub fn mouse_up(&mut self, el: ElementId) {
        self.dispatch(DomEvent::new(EventType::MouseUp, el));
        self.dispatch(DomEvent::new(EventType::PointerUp, el));
    }

    /// A full mouse click: mousedown, focus, mouseup, click.
    pub fn click(&mut self, el: ElementId) {
        self.mouse_down(el);
        self.mouse_up(el);
        self.activate(el);
    }

    /// A tap: touchstart, touchend, then the emulated mouse click unless the touch was consumed.
    pub fn tap(&mut self, el: ElementId) {
        let start = self.dispatch(DomEvent::new(EventType::TouchStart, el));
        self.dispatch(DomEvent::new(EventType::TouchEnd, el));
        if !start.default_prevented {
            self.click(el);
        }
    }

    /// Press `key` on the focused element. Returns whether the default action was prevented.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let target = self
            .host
            .doc
            .active_element()
            .unwrap_or_else(|| self.host.doc.root());
        let ev = self.dispatch(DomEvent::key_down(target, key, modifiers));
        if ev.default_prevented {
            return true;
        }
        self.key_default(target, key, modifiers);
        false
    }

    /// Press `key` without modifiers.
    pub fn press(&mut self, key: Key) -> bool {
        self.key_down(key, Modifiers::empty())
    }

    /// Type each character of `text` as its own keydown.
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(Key::Character(c));
        }
    }

    /// Write an attribute the way assistive technology does, notifying observers.
    pub fn assistive_set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        self.host.doc.set_attr(el, name, value);
        self.dispatch(DomEvent::attr_modified(el, name, Some(value)));
    }

    /// Advance the virtual clock by `ms`, firing due timers in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.host.now() + ms;
        while let Some((id, deferred)) = self.host.timers.pop_due(until) {
            if let Some(menu) = &mut self.menu {
                menu.fire(&mut self.host, id, deferred);
            }
        }
        self.host.timers.set_now(until);
    }

    fn activate(&mut self, el: ElementId) {
        let ev = self.dispatch(DomEvent::new(EventType::Click, el));
        if ev.default_prevented {
            return;
        }
        let doc = &self.host.doc;
        if let Some(link) = doc.closest(el, |d, n| d.tag(n) == "a" && d.has_attr(n, "href")) {
            trace!(?link, "navigation");
            self.host.navigations.push(link);
        }
    }

    fn key_default(&mut self, target: ElementId, key: Key, modifiers: Modifiers) {
        let doc = &self.host.doc;
        match key {
            Key::Tab => {
                let order = focus::tabbable_descendants(doc, doc.root());
                let next = match order.iter().position(|&e| e == target) {
                    Some(i) if modifiers.contains(Modifiers::SHIFT) => i.checked_sub(1).map(|p| order[p]),
                    Some(i) => order.get(i + 1).copied(),
                    None if modifiers.contains(Modifiers::SHIFT) => order.last().copied(),
                    None => order.first().copied(),
                };
                match next {
                    Some(next) => {
                        self.focus(next);
                    }
                    None => self.blur(),
                }
            }
            Key::Enter if doc.tag(target) == "button" || (doc.tag(target) == "a" && doc.has_attr(target, "href")) => {
                self.activate(target);
            }
            Key::Space if doc.tag(target) == "button" => self.activate(target),
            _ => {}
        }
    }
}
