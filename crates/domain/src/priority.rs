// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Priority assignment and dense renumbering.
//!
//! Non-terminal-cancelled applications for a date always hold priorities
//! forming the exact sequence 1..=N. Arrival assignment appends to the
//! sequence; renumbering compacts it after a removal or reinstatement.

use crate::types::ApplicationId;

/// Returns the arrival priority for a new submission.
///
/// The new application slots in behind the `active_count` applications
/// already holding priorities for the date.
#[must_use]
pub fn arrival_priority(active_count: usize) -> u32 {
    u32::try_from(active_count + 1).unwrap_or(u32::MAX)
}

/// Reassigns dense priorities 1..=N over an already-ordered active set.
#[must_use]
pub fn renumber(ordered: &[ApplicationId]) -> Vec<(ApplicationId, u32)> {
    ordered
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, u32::try_from(index + 1).unwrap_or(u32::MAX)))
        .collect()
}

/// Returns true if the priorities form the exact sequence 1..=N in any
/// order (no gaps, no duplicates).
#[must_use]
pub fn is_dense(priorities: &[u32]) -> bool {
    let mut sorted: Vec<u32> = priorities.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(index, priority)| usize::try_from(*priority) == Ok(index + 1))
}
