// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The environment a controller runs in.
//!
//! A [`Host`] bundles what a browser would otherwise provide: the document, the
//! listener table, a timer queue on a virtual clock, the id generator, and the optional
//! assistive-technology hook. One controller is mounted per host.

use core::fmt;

use megamenu_dom::{Document, ElementId};
use megamenu_responder::listeners::Listeners;

use crate::controller::{Deferred, Handler};
use crate::event::EventType;
use crate::ids::IdGenerator;
use crate::timing::{TimerId, TimerQueue};

/// Screen-reader cursor query consulted when focus leaves a menu item.
///
/// Closures `Fn(&Document) -> Option<ElementId>` implement it.
pub trait ScreenReaderCursor {
    /// The element the screen reader is positioned on, if known.
    fn current_node(&self, doc: &Document) -> Option<ElementId>;
}

impl<F> ScreenReaderCursor for F
where
    F: Fn(&Document) -> Option<ElementId>,
{
    fn current_node(&self, doc: &Document) -> Option<ElementId> {
        self(doc)
    }
}

/// Document, listeners, timers and environment capabilities for one controller.
pub struct Host {
    pub(crate) doc: Document,
    pub(crate) listeners: Listeners<ElementId, EventType, Handler>,
    pub(crate) timers: TimerQueue<Deferred>,
    pub(crate) ids: IdGenerator,
    pub(crate) touch: bool,
    pub(crate) screen_reader: Option<Box<dyn ScreenReaderCursor>>,
    pub(crate) navigations: Vec<ElementId>,
    next_instance: u32,
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("now", &self.timers.now())
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers.len())
            .field("touch", &self.touch)
            .field("screen_reader", &self.screen_reader.is_some())
            .finish_non_exhaustive()
    }
}

impl Host {
    /// A host over `doc` with a mouse-only environment and no screen reader.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            listeners: Listeners::new(),
            timers: TimerQueue::new(),
            ids: IdGenerator::new(),
            touch: false,
            screen_reader: None,
            navigations: Vec::new(),
            next_instance: 0,
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The document, for edits the host makes between events.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Whether the environment reports touch input.
    pub fn is_touch(&self) -> bool {
        self.touch
    }

    /// Listeners attached at `node` for `kind`.
    pub fn listener_count(&self, node: ElementId, kind: EventType) -> usize {
        self.listeners.count_for(node, kind)
    }

    /// All attached listeners.
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Links whose default navigation ran, oldest first.
    pub fn navigations(&self) -> &[ElementId] {
        &self.navigations
    }

    pub(crate) fn set_touch(&mut self, touch: bool) {
        self.touch = touch;
    }

    pub(crate) fn set_screen_reader(&mut self, hook: Box<dyn ScreenReaderCursor>) {
        self.screen_reader = Some(hook);
    }

    pub(crate) fn set_id_seed(&mut self, seed: u64) {
        self.ids = IdGenerator::with_seed(seed);
    }

    pub(crate) fn next_instance(&mut self) -> u32 {
        self.next_instance += 1;
        self.next_instance
    }

    pub(crate) fn schedule(&mut self, delay_ms: u64, deferred: Deferred) -> TimerId {
        let id = self.timers.schedule(delay_ms, deferred);
        tracing::trace!(?id, delay_ms, "timer scheduled");
        id
    }

    /// Cancel the timer held in `slot`, leaving it empty.
    pub(crate) fn cancel(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take()
            && self.timers.cancel(id)
        {
            tracing::trace!(?id, "timer cancelled");
        }
    }

    pub(crate) fn screen_reader_node(&self) -> Option<ElementId> {
        self.screen_reader
            .as_ref()
            .and_then(|hook| hook.current_node(&self.doc))
    }
}
