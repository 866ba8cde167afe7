// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Priority renumbering after a slot is vacated.

use crate::clock::Clock;
use crate::engine::LeaveEngine;
use crate::store::LeaveStore;
use leave_draw_domain::{ApplicationId, renumber};
use rand::Rng;
use time::Date;

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Renumbers a date's active applications back to the dense sequence
    /// 1..=N, preserving their relative order.
    ///
    /// Active applications sort by current priority (unranked ones last),
    /// then by submission time. The batch is written atomically.
    /// Cancellation paths invoke this automatically; callers that edit
    /// application rows directly can invoke it to heal the sequence.
    ///
    /// Best-effort: the mutation that vacated the slot has already
    /// committed, so a renumbering failure is logged rather than surfaced.
    pub fn recalculate_priorities(&mut self, date: Date) {
        if let Err(err) = self.try_recalculate_priorities(date) {
            tracing::warn!(%date, error = %err, "Priority renumbering failed");
        }
    }

    fn try_recalculate_priorities(&mut self, date: Date) -> Result<(), crate::store::StoreError> {
        let mut active: Vec<_> = self
            .store
            .applications_for_date(date)?
            .into_iter()
            .filter(leave_draw_domain::Application::is_active)
            .collect();
        active.sort_by_key(|a| (a.priority.unwrap_or(u32::MAX), a.applied_at, a.id));

        let ordered: Vec<ApplicationId> = active.iter().map(|a| a.id).collect();
        self.store.apply_priorities(date, &renumber(&ordered))
    }
}
