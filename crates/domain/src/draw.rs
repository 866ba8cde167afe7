// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Randomized lottery ranking.
//!
//! Candidates partition into four tiers: Level 1, Level 2, Level 3 inside
//! the lottery window, and Level 3 outside the window. The first three
//! tiers are shuffled independently with an unbiased permutation; the
//! outside-window tier is never randomized and keeps strict arrival order.
//! Tier blocks concatenate in that order and receive dense priorities
//! 1..=N.
//!
//! The random source is an injected `Rng`, so draws are reproducible in
//! tests via a seeded generator.

use crate::types::{ApplicationId, Level};
use rand::Rng;
use rand::seq::SliceRandom;
use time::OffsetDateTime;

/// The ranking-relevant slice of an application entering the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCandidate {
    /// The application being ranked.
    pub application_id: ApplicationId,
    /// The application's priority tier.
    pub level: Level,
    /// The window flag snapshotted at submission.
    pub is_within_lottery_period: bool,
    /// Submission timestamp; orders the outside-window tier.
    pub applied_at: OffsetDateTime,
}

/// A priority assignment produced by the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPosition {
    /// The ranked application.
    pub application_id: ApplicationId,
    /// The dense 1-based priority.
    pub priority: u32,
}

/// Ranks draw candidates into dense priorities 1..=N.
///
/// Level 1, Level 2, and within-window Level 3 candidates are each
/// shuffled uniformly; outside-window Level 3 candidates keep ascending
/// `applied_at` order (ties broken by application ID so the result is a
/// total order). Applicants outside the window get no randomized luck,
/// only their place in line.
pub fn rank_candidates<R: Rng + ?Sized>(
    candidates: &[DrawCandidate],
    rng: &mut R,
) -> Vec<DrawPosition> {
    let mut level1: Vec<&DrawCandidate> = Vec::new();
    let mut level2: Vec<&DrawCandidate> = Vec::new();
    let mut level3_within: Vec<&DrawCandidate> = Vec::new();
    let mut level3_outside: Vec<&DrawCandidate> = Vec::new();

    for candidate in candidates {
        match (candidate.level, candidate.is_within_lottery_period) {
            (Level::One, _) => level1.push(candidate),
            (Level::Two, _) => level2.push(candidate),
            (Level::Three, true) => level3_within.push(candidate),
            (Level::Three, false) => level3_outside.push(candidate),
        }
    }

    level1.shuffle(rng);
    level2.shuffle(rng);
    level3_within.shuffle(rng);
    level3_outside.sort_by(|a, b| {
        a.applied_at
            .cmp(&b.applied_at)
            .then_with(|| a.application_id.cmp(&b.application_id))
    });

    level1
        .into_iter()
        .chain(level2)
        .chain(level3_within)
        .chain(level3_outside)
        .enumerate()
        .map(|(index, candidate)| DrawPosition {
            application_id: candidate.application_id,
            priority: u32::try_from(index + 1).unwrap_or(u32::MAX),
        })
        .collect()
}
