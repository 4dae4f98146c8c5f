// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, click and tap.
//!
//! Hover opens and the hover-out timer closes; on a touch page the first tap opens
//! and the second closes, while a tap elsewhere collapses the menu.
//!
//! Run:
//! - `RUST_LOG=megamenu=trace cargo run -p megamenu_demos --example menu_pointer`

use megamenu::page::Page;
use megamenu::{MenuError, MenuOptions, sample};
use megamenu_dom::Document;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MenuError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Mouse.
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let mut page = Page::new(doc);
    page.mount(fx.nav, MenuOptions::default())?;

    page.mouse_over(fx.triggers[1]);
    page.mouse_over(fx.panel_links[1][0]);
    println!("hovering into the panel: open={:?}", page.open_item());
    page.mouse_leave();
    page.advance(250);
    println!("250ms after leaving:     open={:?}", page.open_item());

    // Touch.
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let mut page = Page::new(doc).with_touch(true);
    page.mount(fx.nav, MenuOptions::default())?;

    page.tap(fx.triggers[0]);
    println!("first tap:     open={:?}", page.open_item());
    page.tap(fx.triggers[0]);
    println!("second tap:    open={:?}", page.open_item());
    page.tap(fx.triggers[2]);
    page.tap(fx.after);
    println!("tap outside:   open={:?} navigations={:?}", page.open_item(), page.navigations());
    Ok(())
}
