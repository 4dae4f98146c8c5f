// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu configuration.
//!
//! [`MenuOptions`] mirrors the options object hosts have always passed to the widget:
//! the same camelCase keys, the same literal defaults. Missing keys keep their defaults.
//!
//! ```
//! use megamenu::MenuOptions;
//!
//! let opts = MenuOptions::from_json(r#"{ "openClass": "is-open" }"#).unwrap();
//! assert_eq!(opts.open_class, "is-open");
//! assert_eq!(opts.hover_class, "hover");
//! ```

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};

/// Identifier prefix and CSS class names used by a menu instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuOptions {
    /// Prefix for generated element ids.
    pub uuid_prefix: String,
    /// Class added to the menu root.
    pub menu_class: String,
    /// Class added to each top-level item.
    pub top_nav_item_class: String,
    /// Class added to each panel.
    pub panel_class: String,
    /// Class identifying groups inside a panel.
    pub panel_group_class: String,
    /// Class added while the pointer is over an element.
    pub hover_class: String,
    /// Class added while an element holds focus.
    pub focus_class: String,
    /// Class added to open triggers and panels.
    pub open_class: String,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            uuid_prefix: "accessible-megamenu".into(),
            menu_class: "accessible-megamenu".into(),
            top_nav_item_class: "accessible-megamenu-top-nav-item".into(),
            panel_class: "accessible-megamenu-panel".into(),
            panel_group_class: "accessible-megamenu-panel-group".into(),
            hover_class: "hover".into(),
            focus_class: "focus".into(),
            open_class: "open".into(),
        }
    }
}

impl MenuOptions {
    /// Parse an options object. Keys that are absent keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Value of a single option.
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::UuidPrefix => &self.uuid_prefix,
            OptionKey::MenuClass => &self.menu_class,
            OptionKey::TopNavItemClass => &self.top_nav_item_class,
            OptionKey::PanelClass => &self.panel_class,
            OptionKey::PanelGroupClass => &self.panel_group_class,
            OptionKey::HoverClass => &self.hover_class,
            OptionKey::FocusClass => &self.focus_class,
            OptionKey::OpenClass => &self.open_class,
        }
    }

    /// Replace a single option. Values are applied as given.
    pub fn set(&mut self, key: OptionKey, value: &str) {
        let slot = match key {
            OptionKey::UuidPrefix => &mut self.uuid_prefix,
            OptionKey::MenuClass => &mut self.menu_class,
            OptionKey::TopNavItemClass => &mut self.top_nav_item_class,
            OptionKey::PanelClass => &mut self.panel_class,
            OptionKey::PanelGroupClass => &mut self.panel_group_class,
            OptionKey::HoverClass => &mut self.hover_class,
            OptionKey::FocusClass => &mut self.focus_class,
            OptionKey::OpenClass => &mut self.open_class,
        };
        value.clone_into(slot);
    }

    /// Every option as `(camelCase name, value)` pairs, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        OptionKey::ALL.iter().map(|&k| (k.name(), self.get(k)))
    }
}

/// Name of a configurable option.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum OptionKey {
    /// `uuidPrefix`
    UuidPrefix,
    /// `menuClass`
    MenuClass,
    /// `topNavItemClass`
    TopNavItemClass,
    /// `panelClass`
    PanelClass,
    /// `panelGroupClass`
    PanelGroupClass,
    /// `hoverClass`
    HoverClass,
    /// `focusClass`
    FocusClass,
    /// `openClass`
    OpenClass,
}

impl OptionKey {
    /// All keys in declaration order.
    pub const ALL: [Self; 8] = [
        Self::UuidPrefix,
        Self::MenuClass,
        Self::TopNavItemClass,
        Self::PanelClass,
        Self::PanelGroupClass,
        Self::HoverClass,
        Self::FocusClass,
        Self::OpenClass,
    ];

    /// The camelCase name used in options objects.
    pub fn name(self) -> &'static str {
        match self {
            Self::UuidPrefix => "uuidPrefix",
            Self::MenuClass => "menuClass",
            Self::TopNavItemClass => "topNavItemClass",
            Self::PanelClass => "panelClass",
            Self::PanelGroupClass => "panelGroupClass",
            Self::HoverClass => "hoverClass",
            Self::FocusClass => "focusClass",
            Self::OpenClass => "openClass",
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            Self::UuidPrefix => "uuid_prefix",
            Self::MenuClass => "menu_class",
            Self::TopNavItemClass => "top_nav_item_class",
            Self::PanelClass => "panel_class",
            Self::PanelGroupClass => "panel_group_class",
            Self::HoverClass => "hover_class",
            Self::FocusClass => "focus_class",
            Self::OpenClass => "open_class",
        }
    }
}

impl FromStr for OptionKey {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s || k.field_name() == s)
            .ok_or_else(|| MenuError::UnknownOption(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_documented_literals() {
        let o = MenuOptions::default();
        assert_eq!(o.uuid_prefix, "accessible-megamenu");
        assert_eq!(o.menu_class, "accessible-megamenu");
        assert_eq!(o.top_nav_item_class, "accessible-megamenu-top-nav-item");
        assert_eq!(o.panel_class, "accessible-megamenu-panel");
        assert_eq!(o.panel_group_class, "accessible-megamenu-panel-group");
        assert_eq!(o.hover_class, "hover");
        assert_eq!(o.focus_class, "focus");
        assert_eq!(o.open_class, "open");
    }

    #[test]
    fn keys_parse_from_both_spellings() {
        assert_eq!("panelGroupClass".parse::<OptionKey>().unwrap(), OptionKey::PanelGroupClass);
        assert_eq!("panel_group_class".parse::<OptionKey>().unwrap(), OptionKey::PanelGroupClass);
        let err = "panelgroupclass".parse::<OptionKey>().unwrap_err();
        assert!(matches!(err, MenuError::UnknownOption(ref k) if k == "panelgroupclass"));
    }

    #[test]
    fn json_uses_camel_case_and_fills_defaults() {
        let o = MenuOptions::from_json(r#"{"uuidPrefix":"nav","panelClass":"sub-nav"}"#).unwrap();
        assert_eq!(o.uuid_prefix, "nav");
        assert_eq!(o.panel_class, "sub-nav");
        assert_eq!(o.open_class, "open");

        let back = serde_json::to_value(&o).unwrap();
        assert_eq!(back["topNavItemClass"], "accessible-megamenu-top-nav-item");
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        assert!(matches!(
            MenuOptions::from_json("{ not json"),
            Err(MenuError::Options(_))
        ));
    }

    #[test]
    fn set_and_entries() {
        let mut o = MenuOptions::default();
        o.set(OptionKey::HoverClass, "");
        assert_eq!(o.get(OptionKey::HoverClass), "", "values are not validated");
        let names: Vec<_> = o.entries().map(|(k, _)| k).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "uuidPrefix");
    }
}
