// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu controller.
//!
//! ## Overview
//!
//! [`MenuController`] owns the interaction state of one menu and reacts to events
//! dispatched through its [`Host`]. Listener entries carry a [`Handler`] tag; when the
//! dispatcher reaches a step, the controller matches on the tag and runs the routine.
//! Moving focus from inside a routine dispatches the resulting focus events
//! synchronously, so handlers re-enter exactly as they would under native focus.
//!
//! ## Layout
//!
//! - `init`: discovers items and panels, wires ids and ARIA, attaches listeners.
//! - `panel`: the open/close state machine and the listeners it toggles.
//! - `pointer`, `focus`: pointer, click and focus routines.
//! - `keyboard`, `typeahead`: the navigator.
//! - `monitor`: outside interaction and external `aria-expanded` writes.

mod focus;
mod init;
mod keyboard;
mod monitor;
mod panel;
mod pointer;
mod typeahead;

use megamenu_dom::{Document, ElementId, focus as dom_focus};
use megamenu_responder::adapters::dom::route_in;
use megamenu_responder::dispatcher;
use megamenu_responder::types::Outcome;
use tracing::trace;

use crate::error::{MenuError, Result};
use crate::event::{DomEvent, EventSnapshot, EventType};
use crate::host::Host;
use crate::options::{MenuOptions, OptionKey};
use crate::timing::TimerId;

pub(crate) use typeahead::Typeahead;

/// Routine a listener entry runs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Handler {
    FocusIn,
    FocusOut,
    KeyDown,
    MouseOver,
    MouseOut,
    MouseDown,
    TouchStart,
    /// Scoped to the element holding focus.
    Click,
    /// Document-level keydown armed while the bound element is hovered.
    HoverKeyDown(ElementId),
    Outside,
    Collapse,
}

/// Work a timer performs when it fires.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Deferred {
    Close(EventSnapshot),
    ScreenReaderPoll {
        event: EventSnapshot,
        item: Option<ElementId>,
    },
    ClearPendingCloses,
    RestoreFocus(Option<ElementId>),
    ResetTypeahead,
}

/// Listener groups, each detached as a unit.
#[derive(Copy, Clone, Debug)]
enum Scope {
    Menu,
    Focused,
    Hover,
    Outside,
    Expanded,
}

/// A top-level item discovered at initialization.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MenuItem {
    /// The item element, a direct child of the menu root.
    pub element: ElementId,
    /// Its first tabbable descendant.
    pub trigger: Option<ElementId>,
    /// The disclosure region it controls, if any.
    pub panel: Option<ElementId>,
    /// Position among the menu root's children.
    pub position: usize,
}

#[derive(Debug, Default)]
pub(crate) struct InteractionState {
    /// Set by a mousedown on something focusable, consumed by the next focusin.
    pub(crate) mouse_focused: bool,
    /// Focus arrived without a pointer; the next click on the trigger must not toggle.
    pub(crate) just_focused: bool,
    pub(crate) hover_close: Option<TimerId>,
    pub(crate) focus_close: Option<TimerId>,
    pub(crate) clear_pending: Option<TimerId>,
    pub(crate) restore_focus: Option<TimerId>,
    pub(crate) typeahead: Typeahead,
}

/// Accessible mega menu over one container element.
#[derive(Debug)]
pub struct MenuController {
    container: ElementId,
    options: MenuOptions,
    namespace: String,
    menu: Option<ElementId>,
    items: Vec<MenuItem>,
    panels: Vec<ElementId>,
    state: InteractionState,
}

impl MenuController {
    /// Take control of `container` and run initialization.
    pub fn new(host: &mut Host, container: ElementId, options: MenuOptions) -> Result<Self> {
        if !host.doc.is_alive(container) {
            return Err(MenuError::InvalidContainer(container));
        }
        let namespace = format!("megamenu-{}", host.next_instance());
        let mut this = Self {
            container,
            options,
            namespace,
            menu: None,
            items: Vec::new(),
            panels: Vec::new(),
            state: InteractionState::default(),
        };
        this.init(host);
        Ok(this)
    }

    /// The default configuration.
    pub fn defaults() -> MenuOptions {
        MenuOptions::default()
    }

    /// Effective value of one option, by camelCase or field name.
    pub fn option(&self, name: &str) -> Result<&str> {
        Ok(self.options.get(name.parse::<OptionKey>()?))
    }

    /// Effective configuration.
    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Change one option, optionally re-running initialization afterwards.
    pub fn set_option(
        &mut self,
        host: &mut Host,
        name: &str,
        value: &str,
        reinitialize: bool,
    ) -> Result<()> {
        let key = name.parse::<OptionKey>()?;
        self.options.set(key, value);
        trace!(option = key.name(), value, reinitialize, "option set");
        if reinitialize {
            self.init(host);
        }
        Ok(())
    }

    /// The container element.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The menu root, if the container has a child.
    pub fn menu(&self) -> Option<ElementId> {
        self.menu
    }

    /// Top-level items in document order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Panels found at initialization.
    pub fn panels(&self) -> &[ElementId] {
        &self.panels
    }

    /// The top-level item whose panel is open, read from the document.
    pub fn open_item(&self, doc: &Document) -> Option<ElementId> {
        self.items
            .iter()
            .find(|item| self.is_open(doc, item.element))
            .map(|item| item.element)
    }

    /// True when some descendant of `item` reports `aria-expanded="true"`.
    pub fn is_open(&self, doc: &Document, item: ElementId) -> bool {
        doc.descendants(item)
            .into_iter()
            .any(|d| doc.attr(d, "aria-expanded") == Some("true"))
    }

    /// True while focus arrived without a pointer and no click has consumed it yet.
    pub fn is_just_focused(&self) -> bool {
        self.state.just_focused
    }

    /// Dispatch `event` through the document, running this controller's listeners.
    pub fn dispatch(&mut self, host: &mut Host, event: &mut DomEvent) {
        if !host.doc.is_alive(event.target) {
            return;
        }
        let seq = route_in(&host.doc, event.target, event.kind.bubbles());
        let result = dispatcher::run(&seq, event, |step, event| {
            let handlers = host
                .listeners
                .handlers_for(step.node, event.kind, step.phase);
            event.current_target = step.node;
            let mut outcome = Outcome::Continue;
            for handler in handlers {
                outcome = outcome.max(self.handle(host, handler, event));
            }
            outcome
        });
        if result.consumed {
            event.prevent_default();
        }
    }

    /// Run the work of a fired timer.
    pub(crate) fn fire(&mut self, host: &mut Host, id: TimerId, deferred: Deferred) {
        trace!(?id, ?deferred, "timer fired");
        let state = &mut self.state;
        for slot in [
            &mut state.hover_close,
            &mut state.focus_close,
            &mut state.clear_pending,
            &mut state.restore_focus,
            &mut state.typeahead.reset,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        match deferred {
            Deferred::Close(event) => self.close(host, &event),
            Deferred::ScreenReaderPoll { event, item } => self.poll_screen_reader(host, event, item),
            Deferred::ClearPendingCloses => {
                host.cancel(&mut self.state.focus_close);
                host.cancel(&mut self.state.hover_close);
            }
            Deferred::RestoreFocus(target) => self.restore_focus(host, target),
            Deferred::ResetTypeahead => self.state.typeahead.clear(),
        }
    }

    /// Move focus to `target`, dispatching blur/focusout then focus/focusin.
    ///
    /// Returns false when `target` cannot take focus.
    pub fn move_focus(&mut self, host: &mut Host, target: ElementId) -> bool {
        if !host.doc.is_alive(target) || !dom_focus::is_focusable(&host.doc, target) {
            return false;
        }
        let old = host.doc.active_element();
        if old == Some(target) {
            return true;
        }
        trace!(from = ?old, to = ?target, "focus moved");
        host.doc.set_active(None);
        if let Some(old) = old {
            self.fire_focus_pair(host, EventType::Blur, EventType::FocusOut, old, Some(target));
        }
        host.doc.set_active(Some(target));
        self.fire_focus_pair(host, EventType::Focus, EventType::FocusIn, target, old);
        true
    }

    /// Drop focus from the active element, if any.
    pub fn blur(&mut self, host: &mut Host) {
        if let Some(old) = host.doc.active_element() {
            host.doc.set_active(None);
            self.fire_focus_pair(host, EventType::Blur, EventType::FocusOut, old, None);
        }
    }

    fn fire_focus_pair(
        &mut self,
        host: &mut Host,
        plain: EventType,
        bubbling: EventType,
        target: ElementId,
        related: Option<ElementId>,
    ) {
        for kind in [plain, bubbling] {
            let mut ev = DomEvent::new(kind, target).with_related(related);
            self.dispatch(host, &mut ev);
        }
    }

    fn handle(&mut self, host: &mut Host, handler: Handler, event: &mut DomEvent) -> Outcome {
        trace!(?handler, kind = ?event.kind, element = ?event.target, "handler");
        match handler {
            Handler::FocusIn => self.on_focus_in(host, event),
            Handler::FocusOut => self.on_focus_out(host, event),
            Handler::KeyDown => self.on_key_down(host, event, None),
            Handler::HoverKeyDown(bound) => self.on_key_down(host, event, Some(bound)),
            Handler::MouseOver => self.on_mouse_over(host, event),
            Handler::MouseOut => self.on_mouse_out(host, event),
            Handler::MouseDown => self.on_mouse_down(host, event),
            Handler::TouchStart => self.on_touch_start(host, event),
            Handler::Click => self.on_click(host, event.current_target, event.snapshot()),
            Handler::Outside => self.on_outside(host, event),
            Handler::Collapse => self.on_collapse(host, event),
        }
    }

    fn namespace(&self, scope: Scope) -> String {
        let suffix = match scope {
            Scope::Menu => "",
            Scope::Focused => ".focused",
            Scope::Hover => ".hover",
            Scope::Outside => ".outside",
            Scope::Expanded => ".expanded",
        };
        format!("{}{suffix}", self.namespace)
    }

    /// Closest top-level item containing `el`.
    fn top_item_of(&self, doc: &Document, el: ElementId) -> Option<ElementId> {
        let class = &self.options.top_nav_item_class;
        doc.closest(el, |d, n| d.has_class(n, class))
    }

    /// Closest panel containing `el`.
    fn panel_of(&self, doc: &Document, el: ElementId) -> Option<ElementId> {
        let class = &self.options.panel_class;
        doc.closest(el, |d, n| d.has_class(n, class))
    }

    /// The panel that is a direct child of `item`.
    fn panel_child(&self, doc: &Document, item: ElementId) -> Option<ElementId> {
        doc.children(item)
            .iter()
            .copied()
            .find(|&c| doc.has_class(c, &self.options.panel_class))
    }

    fn menu_contains(&self, doc: &Document, el: ElementId) -> bool {
        self.menu.is_some_and(|m| doc.contains(m, el))
    }
}
