// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction and external-mutation monitors.
//!
//! Both listeners exist only while a panel is open; see
//! [`sync_monitors`](MenuController::sync_monitors).

use megamenu_responder::types::Outcome;

use super::MenuController;
use crate::event::DomEvent;
use crate::host::Host;

impl MenuController {
    /// A pointer or touch release anywhere outside the menu closes the open panel.
    pub(super) fn on_outside(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let Some(menu) = self.menu else {
            return Outcome::Continue;
        };
        if host.doc.contains_or_is(menu, event.target) {
            return Outcome::Continue;
        }
        tracing::trace!(element = ?event.target, "interaction outside the menu");
        self.close(host, &event.snapshot());
        Outcome::StopAndConsume
    }

    /// Someone else set an open panel's `aria-expanded` to `false`: run a full close.
    pub(super) fn on_collapse(&mut self, host: &mut Host, event: &mut DomEvent) -> Outcome {
        let collapsed = event
            .attr_change
            .as_ref()
            .is_some_and(|c| c.name == "aria-expanded" && c.new_value.as_deref() == Some("false"));
        if !collapsed || !host.doc.has_class(event.target, &self.options.open_class) {
            return Outcome::Continue;
        }
        tracing::debug!(panel = ?event.target, "panel collapsed externally");
        self.close(host, &event.snapshot());
        Outcome::StopAndConsume
    }
}
