// Copyright 2025 the Megamenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk a propagation sequence and honor stop rules.
//!
//! The `deliver` callback runs once per step and returns the strongest [`Outcome`]
//! among the listeners at that node. Listeners on the same node always finish;
//! [`Outcome::Stop`] and [`Outcome::StopAndConsume`] prevent later steps.
//!
//! ```
//! use megamenu_responder::dispatcher;
//! use megamenu_responder::types::{Dispatch, Outcome, Phase};
//!
//! let seq = [Dispatch::capture(1_u32), Dispatch::target(2), Dispatch::bubble(1)];
//! let mut seen = Vec::new();
//! let result = dispatcher::run(&seq, &mut seen, |d, seen| {
//!     seen.push(d.node);
//!     if d.phase == Phase::Target { Outcome::StopAndConsume } else { Outcome::Continue }
//! });
//! assert_eq!(seen, vec![1, 2]);
//! assert_eq!(result.stopped_at, Some(1));
//! assert!(result.consumed);
//! ```

use crate::types::{Dispatch, Outcome};

/// What happened while walking a sequence.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RunResult {
    /// Index of the step that stopped propagation, if any.
    pub stopped_at: Option<usize>,
    /// True when a step returned [`Outcome::StopAndConsume`].
    pub consumed: bool,
}

/// Deliver each step of `seq` in order until a step stops propagation.
pub fn run<K, S>(
    seq: &[Dispatch<K>],
    state: &mut S,
    mut deliver: impl FnMut(&Dispatch<K>, &mut S) -> Outcome,
) -> RunResult {
    let mut result = RunResult::default();
    for (i, step) in seq.iter().enumerate() {
        match deliver(step, state) {
            Outcome::Continue => {}
            Outcome::Stop => {
                result.stopped_at = Some(i);
                break;
            }
            Outcome::StopAndConsume => {
                result.stopped_at = Some(i);
                result.consumed = true;
                break;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn continue_visits_every_step() {
        let seq = [
            Dispatch::capture(1_u32),
            Dispatch::target(2),
            Dispatch::bubble(1),
        ];
        let mut seen = Vec::new();
        let r = run(&seq, &mut seen, |d, s| {
            s.push(d.node);
            Outcome::Continue
        });
        assert_eq!(seen, vec![1, 2, 1]);
        assert_eq!(r, RunResult::default());
    }

    #[test]
    fn stop_skips_remaining_steps_without_consuming() {
        let seq = [
            Dispatch::capture(1_u32),
            Dispatch::target(2),
            Dispatch::bubble(1),
        ];
        let mut count = 0;
        let r = run(&seq, &mut count, |d, c| {
            *c += 1;
            if d.node == 1 {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert_eq!(count, 1);
        assert_eq!(r.stopped_at, Some(0));
        assert!(!r.consumed);
    }

    #[test]
    fn empty_sequence_is_a_no_op() {
        let seq: [Dispatch<u32>; 0] = [];
        let r = run(&seq, &mut (), |_, _| Outcome::StopAndConsume);
        assert_eq!(r, RunResult::default());
    }
}
