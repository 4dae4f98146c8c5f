// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Megamenu: an accessible mega menu controller.
//!
//! A horizontal menu whose top-level items reveal dropdown panels, operable by mouse,
//! touch and keyboard, and exposed to assistive technology through ARIA.
//!
//! - [`MenuController`] annotates an existing element tree (ids, roles, `aria-*`) and
//!   keeps at most one panel open as pointer, focus, keyboard and external attribute
//!   events arrive.
//! - Deferred closes, focus restoration and the typeahead expiry run on a virtual clock
//!   ([`timing`]), so every interleaving of events and timers is reproducible.
//! - [`page::Page`] plays the browser: gestures become native event sequences with
//!   default actions, dispatched through `megamenu_responder`.
//!
//! ## Structure contract
//!
//! container → one menu root → top-level items. Each item holds a trigger (its first
//! tabbable descendant) and optionally a panel (its last non-tabbable child). Panels
//! may be split into groups for Left/Right navigation.
//!
//! ## Example
//!
//! ```
//! use megamenu::event::Key;
//! use megamenu::page::Page;
//! use megamenu::{MenuOptions, sample};
//! use megamenu_dom::Document;
//!
//! let mut doc = Document::new();
//! let fx = sample::movie_menu(&mut doc);
//! let mut page = Page::new(doc).with_id_seed(1);
//! page.mount(fx.nav, MenuOptions::default()).unwrap();
//!
//! // Wiring.
//! let d = page.document();
//! let panel_id = d.attr(fx.panels[0], "id").unwrap();
//! assert_eq!(d.attr(fx.triggers[0], "aria-controls"), Some(panel_id));
//! assert_eq!(d.attr(fx.panels[0], "role"), Some("group"));
//!
//! // Keyboard: focus the trigger, open with ArrowDown.
//! page.focus(fx.triggers[0]);
//! page.press(Key::ArrowDown);
//! assert_eq!(page.open_item(), Some(fx.items[0]));
//! assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));
//!
//! // Escape closes, and focus returns to the trigger shortly after.
//! page.press(Key::Escape);
//! assert_eq!(page.open_item(), None);
//! page.advance(99);
//! assert_eq!(page.active_element(), Some(fx.triggers[0]));
//! ```
//!
//! ## Logging
//!
//! Transitions are logged with `tracing` at `debug`, wiring and timers at `trace`.
//! No subscriber is installed by the library.

mod controller;
pub mod error;
pub mod event;
pub mod host;
pub mod ids;
pub mod options;
pub mod page;
pub mod sample;
pub mod timing;

pub use controller::{MenuController, MenuItem};
pub use error::MenuError;
pub use options::{MenuOptions, OptionKey};
