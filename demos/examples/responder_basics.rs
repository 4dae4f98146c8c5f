// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router basics.
//!
//! Route an event through a document, run the listeners attached along the path in
//! capture → target → bubble order, and stop propagation halfway.
//!
//! Run:
//! - `cargo run -p megamenu_demos --example responder_basics`

use megamenu_dom::{Document, ElementData};
use megamenu_responder::adapters::dom::route_in;
use megamenu_responder::dispatcher;
use megamenu_responder::listeners::Listeners;
use megamenu_responder::types::{Outcome, Phase};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Handler {
    Log(&'static str),
    Swallow,
}

fn main() {
    let mut doc = Document::new();
    let root = doc.root();
    let list = doc.insert(root, ElementData::new("ul"));
    let item = doc.insert(list, ElementData::new("li"));
    let link = doc.insert(item, ElementData::new("a").attr("href", "#"));

    let mut listeners: Listeners<_, &str, Handler> = Listeners::new();
    listeners.on(root, "click", true, "demo", Handler::Log("root capture"));
    listeners.on(link, "click", false, "demo", Handler::Log("link"));
    listeners.on(item, "click", false, "demo", Handler::Swallow);
    listeners.on(root, "click", false, "demo", Handler::Log("root bubble (never runs)"));

    let seq = route_in(&doc, link, true);
    println!("== Dispatch (capture → target → bubble) ==");
    let mut log = Vec::new();
    let result = dispatcher::run(&seq, &mut log, |step, log| {
        let mut outcome = Outcome::Continue;
        for handler in listeners.handlers_for(step.node, "click", step.phase) {
            println!("  {:?}  node={:?}  handler={:?}", step.phase, step.node, handler);
            match handler {
                Handler::Log(name) => log.push(name),
                Handler::Swallow => outcome = outcome.max(Outcome::StopAndConsume),
            }
        }
        outcome
    });

    assert_eq!(log, vec!["root capture", "link"]);
    assert!(result.consumed);
    assert_eq!(seq[result.stopped_at.unwrap()].phase, Phase::Bubble);
    println!("stopped at step {:?}, default prevented: {}", result.stopped_at, result.consumed);
}
