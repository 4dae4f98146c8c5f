// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end interaction scenarios on the sample menu.

use std::cell::Cell;
use std::rc::Rc;

use megamenu::event::{EventType, Key, Modifiers};
use megamenu::page::Page;
use megamenu::sample::{self, Fixture};
use megamenu::{MenuError, MenuOptions};
use megamenu_dom::{Document, ElementData, ElementId};

fn page_with(touch: bool) -> (Page, Fixture) {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let mut page = Page::new(doc).with_touch(touch).with_id_seed(7);
    page.mount(fx.nav, MenuOptions::default()).unwrap();
    (page, fx)
}

fn attr(page: &Page, el: ElementId, name: &str) -> Option<String> {
    page.document().attr(el, name).map(str::to_owned)
}

#[test]
fn init_wires_roles_ids_and_aria() {
    let (page, fx) = page_with(false);
    let doc = page.document();

    assert_eq!(doc.attr(fx.nav, "role"), Some("navigation"));
    assert!(doc.has_class(fx.menu, "accessible-megamenu"));
    assert!(fx.items.iter().all(|&i| doc.has_class(i, "accessible-megamenu-top-nav-item")));

    assert_eq!(doc.attr(fx.triggers[0], "id"), Some("accessible-megamenu-7-1"));
    assert_eq!(doc.attr(fx.panels[0], "id"), Some("accessible-megamenu-7-2"));
    assert_eq!(doc.attr(fx.triggers[0], "aria-haspopup"), Some("true"));
    assert_eq!(doc.attr(fx.triggers[0], "aria-controls"), Some("accessible-megamenu-7-2"));
    assert_eq!(doc.attr(fx.triggers[0], "aria-expanded"), Some("false"));

    for &panel in &fx.panels {
        assert_eq!(doc.attr(panel, "role"), Some("group"));
        assert_eq!(doc.attr(panel, "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(panel, "aria-hidden"), Some("true"));
        assert!(doc.has_class(panel, "accessible-megamenu-panel"));
    }
    assert_eq!(doc.attr(fx.panels[1], "aria-labelledby"), doc.attr(fx.triggers[1], "id"));

    // An item without a panel only gets an id.
    assert!(doc.attr(fx.triggers[3], "id").is_some());
    assert_eq!(doc.attr(fx.triggers[3], "aria-haspopup"), None);
    assert_eq!(doc.attr(fx.separator, "role"), Some("separator"));

    let menu = page.menu().unwrap();
    assert_eq!(menu.items().len(), 4);
    assert_eq!(menu.items()[3].panel, None);
    assert_eq!(menu.items()[2].position, 2);
    assert_eq!(menu.panels(), fx.panels.as_slice());
}

#[test]
fn existing_ids_and_attributes_are_kept() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    doc.set_attr(fx.triggers[0], "id", "movies");
    doc.set_attr(fx.panels[0], "aria-labelledby", "custom-label");
    let mut page = Page::new(doc).with_id_seed(7);
    page.mount(fx.nav, MenuOptions::default()).unwrap();

    assert_eq!(attr(&page, fx.triggers[0], "id").as_deref(), Some("movies"));
    assert_eq!(attr(&page, fx.panels[0], "aria-labelledby").as_deref(), Some("custom-label"));
    assert_eq!(attr(&page, fx.panels[0], "id").as_deref(), Some("accessible-megamenu-7-1"));
}

#[test]
fn escape_closes_and_restores_focus_after_the_delay() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[0]);
    assert!(page.press(Key::ArrowDown));
    assert_eq!(page.open_item(), Some(fx.items[0]));
    assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));

    assert!(!page.press(Key::Escape), "escape keeps its default action");
    assert_eq!(page.open_item(), None);
    assert_eq!(attr(&page, fx.panels[0], "aria-hidden").as_deref(), Some("true"));

    page.advance(98);
    assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));
    page.advance(1);
    assert_eq!(page.active_element(), Some(fx.triggers[0]));
    page.advance(1000);
    assert_eq!(page.open_item(), None);
}

#[test]
fn typeahead_searches_the_open_panel() {
    let (mut page, fx) = page_with(false);
    let links = &fx.panel_links[0];
    page.focus(fx.triggers[0]);
    page.press(Key::ArrowDown);
    assert_eq!(page.active_element(), Some(links[0]), "Action");

    page.type_text("dr");
    assert_eq!(page.active_element(), Some(links[1]), "Drama");

    page.advance(1000);
    page.press(Key::Character('d'));
    assert_eq!(page.active_element(), Some(links[2]), "Documentary");
    page.press(Key::Character('d'));
    assert_eq!(page.active_element(), Some(links[4]), "Dreams");
    page.press(Key::Character('D'));
    assert_eq!(page.active_element(), Some(links[1]), "wraps to Drama");
    assert_eq!(page.open_item(), Some(fx.items[0]));
}

#[test]
fn typeahead_on_a_closed_trigger_searches_top_level_items() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[0]);

    page.press(Key::Character('r'));
    assert_eq!(page.active_element(), Some(fx.triggers[2]), "Reading");

    page.advance(1000);
    page.type_text("ab");
    assert_eq!(page.active_element(), Some(fx.triggers[3]), "About");

    page.advance(1000);
    page.key_down(Key::Character('m'), Modifiers::SHIFT);
    assert_eq!(page.active_element(), Some(fx.triggers[1]), "shift scans backwards");

    page.advance(1000);
    page.focus(fx.triggers[0]);
    page.type_text("mr");
    assert_eq!(
        page.active_element(),
        Some(fx.triggers[2]),
        "an unmatched buffer restarts from the last key"
    );
    assert_eq!(page.open_item(), None);
}

#[test]
fn click_after_keyboard_focus_is_swallowed_once_then_toggles_on_touch() {
    let (mut page, fx) = page_with(true);
    page.mouse_over(fx.triggers[0]);
    page.mouse_leave();
    assert_eq!(page.open_item(), Some(fx.items[0]));

    page.focus(fx.before);
    page.press(Key::Tab);
    assert_eq!(page.active_element(), Some(fx.triggers[0]));
    assert!(page.menu().unwrap().is_just_focused());

    page.click(fx.triggers[0]);
    assert_eq!(page.open_item(), Some(fx.items[0]), "first click is swallowed");
    assert!(!page.menu().unwrap().is_just_focused());

    page.click(fx.triggers[0]);
    assert_eq!(page.open_item(), None, "second click toggles closed");
    assert!(page.navigations().is_empty());
}

#[test]
fn mouse_clicks_open_then_follow_the_link() {
    let (mut page, fx) = page_with(false);
    page.click(fx.triggers[0]);
    assert_eq!(page.open_item(), Some(fx.items[0]));
    assert!(!page.menu().unwrap().is_just_focused(), "pointer focus");
    assert!(page.navigations().is_empty());

    page.click(fx.triggers[0]);
    assert_eq!(page.open_item(), Some(fx.items[0]));
    assert_eq!(page.navigations(), &[fx.triggers[0]]);
}

#[test]
fn taps_toggle_without_moving_focus() {
    let (mut page, fx) = page_with(true);
    page.tap(fx.triggers[1]);
    assert_eq!(page.open_item(), Some(fx.items[1]));
    assert_eq!(page.active_element(), None);

    page.tap(fx.triggers[1]);
    assert_eq!(page.open_item(), None);

    page.tap(fx.triggers[1]);
    page.tap(fx.after);
    assert_eq!(page.open_item(), None, "touchend outside closes");
    assert_eq!(page.navigations(), &[fx.after]);
}

#[test]
fn reinitializing_keeps_ids_and_does_not_duplicate_listeners() {
    let (mut page, fx) = page_with(false);
    let ids = |page: &Page| -> Vec<Option<String>> {
        fx.triggers
            .iter()
            .chain(&fx.panels)
            .map(|&el| attr(page, el, "id"))
            .collect()
    };
    let before = ids(&page);
    let listeners = page.host().total_listeners();

    page.set_option("hoverClass", "is-hovered", true).unwrap();
    page.reinitialize();
    assert_eq!(ids(&page), before);
    assert_eq!(page.host().total_listeners(), listeners);
    assert_eq!(page.option("hoverClass").unwrap().unwrap(), "is-hovered");
    assert_eq!(page.option("hover_class").unwrap().unwrap(), "is-hovered");

    page.focus(fx.triggers[0]);
    page.reinitialize();
    assert_eq!(page.host().listener_count(fx.triggers[0], EventType::Click), 1);

    page.mouse_over(fx.triggers[1]);
    assert!(page.document().has_class(fx.triggers[1], "is-hovered"));

    assert!(matches!(
        page.set_option("hoverklass", "x", false),
        Err(MenuError::UnknownOption(name)) if name == "hoverklass"
    ));
}

#[test]
fn moving_from_trigger_into_its_panel_never_closes() {
    let (mut page, fx) = page_with(false);
    page.mouse_over(fx.triggers[0]);
    page.mouse_over(fx.panel_links[0][2]);
    page.advance(1000);
    assert_eq!(page.open_item(), Some(fx.items[0]));

    page.mouse_leave();
    page.advance(249);
    assert_eq!(page.open_item(), Some(fx.items[0]));
    page.advance(1);
    assert_eq!(page.open_item(), None);

    page.focus(fx.triggers[1]);
    page.press(Key::ArrowDown);
    page.advance(1000);
    assert_eq!(page.open_item(), Some(fx.items[1]));

    page.focus(fx.after);
    page.advance(299);
    assert_eq!(page.open_item(), Some(fx.items[1]));
    page.advance(1);
    assert_eq!(page.open_item(), None);
}

#[test]
fn releasing_the_pointer_outside_closes() {
    let (mut page, fx) = page_with(false);
    let root = page.document().root();
    page.mouse_over(fx.triggers[0]);
    assert_eq!(page.host().listener_count(root, EventType::MouseUp), 1);

    page.click(fx.panel_links[0][0]);
    assert_eq!(page.open_item(), Some(fx.items[0]), "inside the menu");

    page.click(fx.after);
    assert_eq!(page.open_item(), None);
    assert_eq!(page.host().listener_count(root, EventType::MouseUp), 0);
    assert_eq!(page.host().listener_count(root, EventType::PointerUp), 0);
}

#[test]
fn external_collapse_runs_a_full_close() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[1]);
    page.press(Key::ArrowDown);
    assert_eq!(page.host().listener_count(fx.panels[1], EventType::AttrModified), 1);

    page.assistive_set_attribute(fx.panels[1], "aria-expanded", "false");
    let doc = page.document();
    assert_eq!(doc.attr(fx.triggers[1], "aria-expanded"), Some("false"));
    assert_eq!(doc.attr(fx.panels[1], "aria-hidden"), Some("true"));
    assert!(!doc.has_class(fx.panels[1], "open"));
    assert_eq!(page.host().listener_count(fx.panels[1], EventType::AttrModified), 0);

    page.advance(99);
    assert_eq!(page.active_element(), Some(fx.triggers[1]));
}

#[test]
fn screen_reader_cursor_inside_the_item_keeps_it_open() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let cursor = Rc::new(Cell::new(None));
    let hook = {
        let cursor = Rc::clone(&cursor);
        move |_: &Document| cursor.get()
    };
    let mut page = Page::new(doc).with_screen_reader(hook);
    page.mount(fx.nav, MenuOptions::default()).unwrap();

    page.focus(fx.triggers[0]);
    page.press(Key::ArrowDown);
    cursor.set(Some(fx.panel_links[0][0]));
    page.blur();
    page.advance(1000);
    assert_eq!(page.open_item(), Some(fx.items[0]));

    cursor.set(Some(fx.after));
    page.focus(fx.panel_links[0][1]);
    page.blur();
    page.advance(25 + 274);
    assert_eq!(page.open_item(), Some(fx.items[0]));
    page.advance(1);
    assert_eq!(page.open_item(), None);
}

#[test]
fn arrows_move_between_items_groups_and_panels() {
    let (mut page, fx) = page_with(false);
    let links = &fx.panel_links[0];
    page.focus(fx.triggers[0]);

    page.press(Key::ArrowRight);
    assert_eq!(page.active_element(), Some(fx.triggers[1]));
    assert_eq!(page.open_item(), None);
    page.press(Key::ArrowLeft);
    assert_eq!(page.active_element(), Some(fx.triggers[0]));

    page.press(Key::ArrowDown);
    assert_eq!(page.active_element(), Some(links[0]));
    page.press(Key::ArrowRight);
    assert_eq!(page.active_element(), Some(links[3]), "next group");
    page.press(Key::ArrowRight);
    assert_eq!(page.active_element(), Some(fx.triggers[0]), "falls back to the trigger");
    assert_eq!(page.open_item(), Some(fx.items[0]));

    page.press(Key::ArrowDown);
    page.press(Key::ArrowDown);
    assert_eq!(page.active_element(), Some(links[1]));
    page.press(Key::ArrowUp);
    page.press(Key::ArrowUp);
    assert_eq!(page.active_element(), Some(fx.triggers[0]));
}

#[test]
fn up_and_shift_tab_on_an_open_trigger_open_the_previous_item() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[1]);
    page.press(Key::ArrowDown);
    page.press(Key::ArrowUp);
    assert_eq!(page.active_element(), Some(fx.triggers[1]));
    assert_eq!(page.open_item(), Some(fx.items[1]));

    page.press(Key::ArrowUp);
    assert_eq!(page.open_item(), Some(fx.items[0]));
    assert_eq!(page.active_element(), Some(fx.panel_links[0][5]), "Thriller");

    page.focus(fx.triggers[2]);
    page.press(Key::ArrowDown);
    page.press(Key::ArrowUp);
    assert!(page.key_down(Key::Tab, Modifiers::SHIFT));
    assert_eq!(page.open_item(), Some(fx.items[1]));
    assert_eq!(page.active_element(), Some(fx.panel_links[1][5]), "Folk");
}

#[test]
fn tab_follows_menu_order_and_leaves_at_the_end() {
    let (mut page, fx) = page_with(false);
    assert!(!page.focus(fx.panel_links[1][5]), "hidden links cannot take focus");
    page.focus(fx.triggers[1]);
    page.press(Key::ArrowDown);
    assert!(page.focus(fx.panel_links[1][5]));
    assert!(page.press(Key::Tab));
    assert_eq!(page.active_element(), Some(fx.triggers[2]));
    assert_eq!(page.open_item(), Some(fx.items[2]), "focus opens the newly focused item");

    page.focus(fx.triggers[3]);
    assert_eq!(page.open_item(), None);
    assert!(!page.press(Key::Tab), "browser default");
    assert_eq!(page.active_element(), Some(fx.after));
}

#[test]
fn space_opens_and_enter_activates() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[2]);
    assert!(page.press(Key::Space));
    assert_eq!(page.open_item(), Some(fx.items[2]));
    assert_eq!(page.active_element(), Some(fx.triggers[2]));
    assert!(page.navigations().is_empty());

    assert!(!page.press(Key::Enter));
    assert_eq!(page.navigations(), &[fx.triggers[2]]);
    assert_eq!(page.open_item(), Some(fx.items[2]));
}

#[test]
fn focused_form_controls_keep_their_keys() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let button = doc.insert(fx.groups[0][0], ElementData::new("button").text("Go"));
    let mut page = Page::new(doc);
    page.mount(fx.nav, MenuOptions::default()).unwrap();

    page.focus(fx.triggers[0]);
    page.press(Key::ArrowDown);
    assert!(page.focus(button));
    assert!(!page.press(Key::ArrowDown));
    assert_eq!(page.active_element(), Some(button));
}

#[test]
fn init_replays_focus_already_inside_the_menu() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let mut page = Page::new(doc);
    assert!(page.focus(fx.triggers[0]));
    page.mount(fx.nav, MenuOptions::default()).unwrap();

    assert!(page.document().has_class(fx.triggers[0], "focus"));
    assert_eq!(page.host().listener_count(fx.triggers[0], EventType::Click), 1);
    assert!(page.menu().unwrap().is_just_focused());
}

#[test]
fn json_options_rename_classes_and_prefix() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    let options =
        MenuOptions::from_json(r#"{"openClass":"is-open","hoverClass":"is-hover","uuidPrefix":"nav"}"#)
            .unwrap();
    let mut page = Page::new(doc).with_id_seed(3);
    page.mount(fx.nav, options).unwrap();

    page.mouse_over(fx.triggers[0]);
    let doc = page.document();
    assert!(doc.has_class(fx.triggers[0], "is-open"));
    assert!(doc.has_class(fx.triggers[0], "is-hover"));
    assert!(!doc.has_class(fx.triggers[0], "open"));
    assert_eq!(doc.attr(fx.triggers[0], "id"), Some("nav-3-1"));
}

#[test]
fn hovering_arms_the_keyboard_for_the_hovered_trigger() {
    let (mut page, fx) = page_with(false);
    let root = page.document().root();
    page.focus(fx.before);
    page.mouse_over(fx.triggers[0]);
    assert_eq!(page.active_element(), Some(fx.before), "focus outside the menu stays put");
    assert_eq!(page.host().listener_count(root, EventType::KeyDown), 1);

    assert!(page.press(Key::ArrowDown));
    assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));
    assert_eq!(page.host().listener_count(root, EventType::KeyDown), 0);
}

#[test]
fn hovering_a_trigger_takes_focus_when_the_menu_has_it() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[0]);
    page.mouse_over(fx.triggers[2]);
    assert_eq!(page.active_element(), Some(fx.triggers[2]));
    assert_eq!(page.open_item(), Some(fx.items[2]));
    assert!(!page.menu().unwrap().is_just_focused());
}

#[test]
fn hovering_a_trigger_leaves_focus_inside_a_panel_alone() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[0]);
    assert!(page.press(Key::ArrowDown));
    assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));

    page.mouse_over(fx.triggers[1]);
    assert_eq!(page.open_item(), Some(fx.items[1]));
    assert_eq!(page.active_element(), Some(fx.panel_links[0][0]));
}

#[test]
fn leaving_a_hovered_trigger_disarms_the_keyboard() {
    let (mut page, fx) = page_with(false);
    let root = page.document().root();
    page.mouse_over(fx.triggers[0]);
    assert_eq!(page.host().listener_count(root, EventType::KeyDown), 1);

    page.mouse_leave();
    assert_eq!(page.host().listener_count(root, EventType::KeyDown), 0);
    assert!(!page.press(Key::ArrowDown));
    assert_eq!(page.active_element(), None);
}

#[test]
fn keys_outside_the_navigator_pass_through() {
    let (mut page, fx) = page_with(false);
    page.focus(fx.triggers[0]);
    assert!(!page.press(Key::Character('!')));
    assert_eq!(page.active_element(), Some(fx.triggers[0]));
    assert_eq!(page.open_item(), None);
}

#[test]
fn mousedown_inside_a_panel_cancels_the_pending_focus_close() {
    let (mut page, fx) = page_with(false);
    page.mouse_over(fx.triggers[0]);
    page.focus(fx.panel_links[0][0]);

    page.click(fx.groups[0][0]);
    assert_eq!(page.active_element(), None);
    page.advance(1000);
    assert_eq!(page.open_item(), Some(fx.items[0]));
}

#[test]
fn a_container_that_is_not_live_is_rejected() {
    let mut doc = Document::new();
    let fx = sample::movie_menu(&mut doc);
    doc.remove(fx.nav);
    let mut page = Page::new(doc);
    assert!(matches!(
        page.mount(fx.nav, MenuOptions::default()),
        Err(MenuError::InvalidContainer(id)) if id == fx.nav
    ));
}
