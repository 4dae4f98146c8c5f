// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the menu controller.
//!
//! Structural gaps in the document (an item without a panel, a panel without groups,
//! a key with nowhere to move) are not errors. Only misuse of the public API is.

use megamenu_dom::ElementId;

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, MenuError>;

/// Errors surfaced by the controller's public API.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// The option name is neither a known camelCase key nor a field name.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// The container handle does not refer to a live element.
    #[error("container {0:?} is not a live element")]
    InvalidContainer(ElementId),

    /// An options object could not be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}
