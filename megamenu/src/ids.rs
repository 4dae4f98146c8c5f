// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unique element ids.

use std::time::{SystemTime, UNIX_EPOCH};

/// Generates `{prefix}-{seed}-{n}` ids for triggers and panels that lack one.
///
/// The seed is taken once (wall-clock milliseconds, or fixed via [`IdGenerator::with_seed`]);
/// `n` counts up per document.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: u64,
    counter: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Seed from the current time.
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self::with_seed(seed)
    }

    /// Fixed seed, for reproducible ids.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Next id for `prefix`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}-{}", self.seed, self.counter)
    }

    /// Restart the counter. Ids already handed out stay on their elements.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
