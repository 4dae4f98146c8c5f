// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigator.
//!
//! Arrow keys move between top-level triggers, into and out of panels, and across panel
//! groups; Tab follows the menu's tab order with one special case for Shift+Tab on an
//! open trigger; printable keys run the typeahead search. Default actions are prevented
//! only where the navigator takes over.

use megamenu_dom::{Document, ElementId, focus};
use megamenu_responder::types::Outcome;
use tracing::trace;

use super::typeahead::find_match;
use super::{Deferred, MenuController, Scope};
use crate::event::{DomEvent, EventSnapshot, EventType, Key};
use crate::host::Host;
use crate::timing::TYPEAHEAD_RESET_MS;

/// Controls that keep their own key handling while focused.
const EDITABLE: [&str; 4] = ["input", "select", "textarea", "button"];

/// Where the key was pressed, resolved once per keydown.
#[derive(Copy, Clone, Debug)]
struct KeyContext {
    target: ElementId,
    item: Option<ElementId>,
    panel: Option<ElementId>,
}

impl KeyContext {
    /// A trigger outside any panel.
    fn is_top(&self) -> bool {
        self.item.is_some() && self.panel.is_none()
    }
}

fn next_after(list: &[ElementId], el: ElementId) -> Option<ElementId> {
    let i = list.iter().position(|&e| e == el)?;
    list.get(i + 1).copied()
}

fn prev_before(list: &[ElementId], el: ElementId) -> Option<ElementId> {
    let i = list.iter().position(|&e| e == el)?;
    i.checked_sub(1).map(|p| list[p])
}

impl MenuController {
    pub(super) fn on_key_down(
        &mut self,
        host: &mut Host,
        event: &mut DomEvent,
        bound: Option<ElementId>,
    ) -> Outcome {
        let target = match bound {
            // The menu's own listener has already seen keys pressed inside it.
            Some(_) if self.menu_contains(&host.doc, event.target) => return Outcome::Continue,
            Some(bound) => {
                let doc = &host.doc;
                if !doc.is_alive(bound)
                    || !doc.has_class(bound, &self.options.hover_class)
                    || !focus::is_tabbable(doc, bound)
                {
                    return Outcome::Continue;
                }
                bound
            }
            None => event.target,
        };
        let doc = &host.doc;
        if EDITABLE.contains(&doc.tag(target)) && doc.active_element() == Some(target) {
            return Outcome::Continue;
        }
        if bound.is_some() {
            let root = doc.root();
            host.listeners
                .off(root, EventType::KeyDown, &self.namespace(Scope::Hover));
        }
        let Some(key) = event.key else {
            return Outcome::Continue;
        };
        let cx = KeyContext {
            target,
            item: self.top_item_of(&host.doc, target),
            panel: self.panel_of(&host.doc, target),
        };
        let snapshot = EventSnapshot {
            target,
            ..event.snapshot()
        };

        match key {
            Key::Escape => self.close(host, &snapshot),
            Key::ArrowDown => {
                event.prevent_default();
                self.arrow_down(host, &cx, &snapshot);
            }
            Key::ArrowUp => {
                event.prevent_default();
                self.arrow_up(host, &cx, &snapshot);
            }
            Key::ArrowRight | Key::ArrowLeft => {
                event.prevent_default();
                self.arrow_across(host, &cx, key == Key::ArrowRight);
            }
            Key::Tab => {
                if self.tab(host, &cx, &snapshot, event.shift()) {
                    event.prevent_default();
                }
            }
            Key::Space => {
                if !cx.is_top() {
                    return Outcome::Continue;
                }
                event.prevent_default();
                self.on_click(host, target, snapshot);
            }
            Key::Enter => return Outcome::Continue,
            _ => match key.typeahead_char() {
                Some(ch) => self.typeahead(host, &cx, ch, event.shift()),
                None => return Outcome::Continue,
            },
        }
        self.state.just_focused = false;
        Outcome::Continue
    }

    fn menu_tabbables(&self, doc: &Document) -> Vec<ElementId> {
        self.menu
            .map(|m| focus::tabbable_descendants(doc, m))
            .unwrap_or_default()
    }

    fn focus_first_of(&mut self, host: &mut Host, candidates: Option<ElementId>) -> bool {
        match candidates {
            Some(el) => {
                trace!(to = ?el, "keyboard move");
                self.move_focus(host, el)
            }
            None => false,
        }
    }

    fn arrow_down(&mut self, host: &mut Host, cx: &KeyContext, snapshot: &EventSnapshot) {
        if let Some(item) = cx.item.filter(|_| cx.is_top()) {
            self.open(host, snapshot);
            let first = self.first_in_panels(&host.doc, item);
            self.focus_first_of(host, first);
        } else {
            let next = next_after(&self.menu_tabbables(&host.doc), cx.target);
            self.focus_first_of(host, next);
        }
    }

    fn arrow_up(&mut self, host: &mut Host, cx: &KeyContext, snapshot: &EventSnapshot) {
        if cx.is_top() {
            if host.doc.has_class(cx.target, &self.options.open_class) {
                self.close(host, snapshot);
                self.open_previous_item(host, cx);
            }
        } else {
            let prev = prev_before(&self.menu_tabbables(&host.doc), cx.target);
            self.focus_first_of(host, prev);
        }
    }

    fn arrow_across(&mut self, host: &mut Host, cx: &KeyContext, forward: bool) {
        let Some(item) = cx.item else {
            return;
        };
        if cx.is_top() {
            let items: Vec<ElementId> = self.items.iter().map(|i| i.element).collect();
            let neighbor = if forward {
                next_after(&items, item)
            } else {
                prev_before(&items, item)
            };
            let first = neighbor.and_then(|n| focus::tabbable_descendants(&host.doc, n).first().copied());
            self.focus_first_of(host, first);
            return;
        }
        let doc = &host.doc;
        let group_class = &self.options.panel_group_class;
        let groups: Vec<ElementId> = cx
            .panel
            .map(|p| {
                doc.descendants(p)
                    .into_iter()
                    .filter(|&g| doc.has_class(g, group_class))
                    .collect()
            })
            .unwrap_or_default();
        let current = doc.closest(cx.target, |d, n| d.has_class(n, group_class));
        let in_group = current.and_then(|g| {
            let neighbor = if forward {
                next_after(&groups, g)
            } else {
                prev_before(&groups, g)
            };
            neighbor.and_then(|n| focus::tabbable_descendants(doc, n).first().copied())
        });
        let fallback = || focus::tabbable_descendants(doc, item).first().copied();
        let target = in_group.or_else(fallback);
        self.focus_first_of(host, target);
    }

    /// Returns whether focus moved.
    fn tab(&mut self, host: &mut Host, cx: &KeyContext, snapshot: &EventSnapshot, shift: bool) -> bool {
        if shift && cx.is_top() && host.doc.has_class(cx.target, &self.options.open_class) {
            self.close(host, snapshot);
            return self.open_previous_item(host, cx);
        }
        let tabbables = self.menu_tabbables(&host.doc);
        let to = if shift {
            prev_before(&tabbables, cx.target)
        } else {
            next_after(&tabbables, cx.target)
        };
        self.focus_first_of(host, to)
    }

    /// Open the item before `cx.item` and focus the last tabbable in its panel.
    fn open_previous_item(&mut self, host: &mut Host, cx: &KeyContext) -> bool {
        let Some(item) = cx.item else {
            return false;
        };
        let items: Vec<ElementId> = self.items.iter().map(|i| i.element).collect();
        let Some(prev) = prev_before(&items, item) else {
            return false;
        };
        let Some(panel) = self.panel_child(&host.doc, prev) else {
            return false;
        };
        self.open_top_item(host, prev, EventType::KeyDown);
        self.sync_monitors(host);
        let last = focus::tabbable_descendants(&host.doc, panel).last().copied();
        self.focus_first_of(host, last)
    }

    /// First tabbable inside any panel of `item`.
    fn first_in_panels(&self, doc: &Document, item: ElementId) -> Option<ElementId> {
        focus::tabbable_descendants(doc, item)
            .into_iter()
            .find(|&el| self.panel_of(doc, el).is_some())
    }

    fn typeahead(&mut self, host: &mut Host, cx: &KeyContext, ch: char, reverse: bool) {
        host.cancel(&mut self.state.typeahead.reset);
        self.state.typeahead.push(ch);
        self.state.typeahead.reset = Some(host.schedule(TYPEAHEAD_RESET_MS, Deferred::ResetTypeahead));

        let doc = &host.doc;
        let mut candidates: Vec<ElementId> =
            if cx.is_top() && !doc.has_class(cx.target, &self.options.open_class) {
                self.menu_tabbables(doc)
                    .into_iter()
                    .filter(|&el| self.panel_of(doc, el).is_none())
                    .collect()
            } else {
                cx.item
                    .map(|item| focus::tabbable_descendants(doc, item))
                    .unwrap_or_default()
            };
        if reverse {
            candidates.reverse();
        }
        let Some(current) = candidates.iter().position(|&el| el == cx.target) else {
            return;
        };
        let labels: Vec<String> = candidates.iter().map(|&el| doc.text_content(el)).collect();

        let mut found = find_match(&labels, current, self.state.typeahead.buffer());
        if found.is_none() && self.state.typeahead.buffer().chars().count() > 1 {
            let query = self.state.typeahead.restart(ch);
            found = find_match(&labels, current, query);
        }
        trace!(buffer = self.state.typeahead.buffer(), ?found, "typeahead");
        if let Some(i) = found {
            self.move_focus(host, candidates[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<ElementId> {
        let mut doc = Document::new();
        let root = doc.root();
        (0..n)
            .map(|_| doc.insert(root, megamenu_dom::ElementData::new("a")))
            .collect()
    }

    #[test]
    fn neighbors_stop_at_the_ends() {
        let list = ids(3);
        assert_eq!(next_after(&list, list[0]), Some(list[1]));
        assert_eq!(next_after(&list, list[2]), None);
        assert_eq!(prev_before(&list, list[0]), None);
        assert_eq!(prev_before(&list, list[2]), Some(list[1]));
    }

    #[test]
    fn neighbors_of_unlisted_elements_are_none() {
        let list = ids(3);
        let other = ids(5)[4];
        assert_eq!(next_after(&list[..2], other), None);
        assert_eq!(prev_before(&list[..2], other), None);
    }
}
