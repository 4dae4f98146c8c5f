// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard walk through the sample menu.
//!
//! Arrow into a panel, hop across groups, search by typing, then Escape and wait for
//! focus to come back to the trigger.
//!
//! Run:
//! - `RUST_LOG=megamenu=debug cargo run -p megamenu_demos --example menu_keyboard`

use megamenu::event::Key;
use megamenu::page::Page;
use megamenu::{MenuError, MenuOptions, sample};
use megamenu_dom::{Document, ElementId};
use tracing_subscriber::EnvFilter;

fn label(page: &Page, el: Option<ElementId>) -> String {
    el.map(|el| page.document().text_content(el))
        .unwrap_or_else(|| "<nothing>".to_owned())
}

fn main() -> Result<(), MenuError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let mut page = Page::new(doc);
    page.mount(fx.nav, MenuOptions::default())?;

    page.focus(fx.triggers[0]);
    for key in [
        Key::ArrowDown,
        Key::ArrowRight,
        Key::Character('d'),
        Key::ArrowUp,
        Key::Escape,
    ] {
        let prevented = page.press(key);
        let name = format!("{key:?}");
        println!(
            "{name:<16} focus={:<14} open={:?} prevented={prevented}",
            label(&page, page.active_element()),
            page.open_item().map(|i| label(&page, Some(i))),
        );
    }

    page.advance(99);
    println!("after 99ms focus={}", label(&page, page.active_element()));
    assert_eq!(page.active_element(), Some(fx.triggers[0]));
    Ok(())
}
