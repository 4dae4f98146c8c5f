// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead buffer and label matching.

use crate::timing::TimerId;

/// Rolling search buffer with its expiry timer.
#[derive(Debug, Default)]
pub(crate) struct Typeahead {
    buffer: String,
    pub(crate) reset: Option<TimerId>,
}

impl Typeahead {
    /// Add `ch` to the buffer.
    ///
    /// Typing the character the buffer already consists of leaves it alone, so the same
    /// key pressed again cycles through labels sharing that initial.
    pub(crate) fn push(&mut self, ch: char) -> &str {
        let mut utf8 = [0; 4];
        if self.buffer != *ch.encode_utf8(&mut utf8) {
            self.buffer.push(ch);
        }
        &self.buffer
    }

    /// Start over from `ch`.
    pub(crate) fn restart(&mut self, ch: char) -> &str {
        self.buffer.clear();
        self.buffer.push(ch);
        &self.buffer
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }

    pub(crate) fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// Index of the first label, scanning from `current` and wrapping, whose trimmed text
/// starts with `query` (already lowercase).
///
/// A single-character query starts one past `current` so repeated presses move on.
pub(crate) fn find_match<S: AsRef<str>>(labels: &[S], current: usize, query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let step = usize::from(query.chars().count() == 1);
    let start = (current + step).min(labels.len());
    (start..labels.len())
        .chain(0..start)
        .find(|&i| labels[i].as_ref().trim().to_lowercase().starts_with(query))
}
