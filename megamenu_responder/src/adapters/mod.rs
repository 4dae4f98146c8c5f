// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other megamenu crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "dom_adapter")]
pub mod dom;
