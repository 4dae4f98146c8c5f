// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM events as seen by the controller.

use bitflags::bitflags;
use megamenu_dom::ElementId;

/// Event types the controller listens for or the host dispatches.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// Element gained focus. Does not bubble.
    Focus,
    /// Element lost focus. Does not bubble.
    Blur,
    /// Bubbling counterpart of [`Focus`](Self::Focus).
    FocusIn,
    /// Bubbling counterpart of [`Blur`](Self::Blur).
    FocusOut,
    /// Key pressed.
    KeyDown,
    /// Pointer entered an element.
    MouseOver,
    /// Pointer left an element.
    MouseOut,
    /// Primary button pressed.
    MouseDown,
    /// Primary button released.
    MouseUp,
    /// Activation.
    Click,
    /// Touch began.
    TouchStart,
    /// Touch ended.
    TouchEnd,
    /// Pointer released.
    PointerUp,
    /// An attribute changed outside the controller's own writes.
    AttrModified,
}

impl EventType {
    /// Whether the event propagates past its target.
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }
}

/// Keys the navigator distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Esc.
    Escape,
    /// Return.
    Enter,
    /// Spacebar.
    Space,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any key producing a character.
    Character(char),
}

impl Key {
    /// The lowercase character this key contributes to a typeahead search, if any.
    ///
    /// Letters, digits and `.` search; everything else does not.
    pub fn typeahead_char(self) -> Option<char> {
        match self {
            Self::Character(c) if c.is_ascii_alphanumeric() || c == '.' => {
                Some(c.to_ascii_lowercase())
            }
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key or pointer event.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

/// The attribute write carried by an [`EventType::AttrModified`] event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttrChange {
    /// Attribute name.
    pub name: String,
    /// New value, or `None` when removed.
    pub new_value: Option<String>,
}

/// A dispatched event.
#[derive(Clone, Debug)]
pub struct DomEvent {
    /// Event type.
    pub kind: EventType,
    /// Element the event happened at.
    pub target: ElementId,
    /// Element whose listeners are running. Updated at each propagation step.
    pub current_target: ElementId,
    /// For focus and pointer transitions, the element on the other side.
    pub related_target: Option<ElementId>,
    /// Key for [`EventType::KeyDown`].
    pub key: Option<Key>,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Attribute write for [`EventType::AttrModified`].
    pub attr_change: Option<AttrChange>,
    /// Set when a listener prevented the default action.
    pub default_prevented: bool,
}

impl DomEvent {
    /// An event of `kind` at `target`.
    pub fn new(kind: EventType, target: ElementId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            related_target: None,
            key: None,
            modifiers: Modifiers::empty(),
            attr_change: None,
            default_prevented: false,
        }
    }

    /// A keydown at `target`.
    pub fn key_down(target: ElementId, key: Key, modifiers: Modifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// An attribute change at `target`.
    pub fn attr_modified(target: ElementId, name: &str, new_value: Option<&str>) -> Self {
        Self {
            attr_change: Some(AttrChange {
                name: name.to_owned(),
                new_value: new_value.map(str::to_owned),
            }),
            ..Self::new(EventType::AttrModified, target)
        }
    }

    /// Set the related target.
    pub fn with_related(mut self, related: Option<ElementId>) -> Self {
        self.related_target = related;
        self
    }

    /// Prevent the default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True when Shift was held.
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// The parts of this event a deferred transition needs.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            kind: self.kind,
            target: self.target,
            related_target: self.related_target,
            key: self.key,
        }
    }
}

/// A copyable summary of an event, kept by deferred closes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EventSnapshot {
    /// Event type.
    pub kind: EventType,
    /// Event target.
    pub target: ElementId,
    /// Related target, if any.
    pub related_target: Option<ElementId>,
    /// Key, for keydowns.
    pub key: Option<Key>,
}

impl EventSnapshot {
    /// True for a keydown of `key`.
    pub fn is_key(&self, key: Key) -> bool {
        self.kind == EventType::KeyDown && self.key == Some(key)
    }
}
