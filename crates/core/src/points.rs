// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Annual point budget queries.

use crate::clock::Clock;
use crate::engine::LeaveEngine;
use crate::error::EngineError;
use crate::store::LeaveStore;
use leave_draw_domain::{
    FiscalYear, Level, Period, Points, PointsAvailability, PointsSummary, StaffId, availability,
    consumed_points, personal_budget,
};
use rand::Rng;

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Computes a staff member's consumed points for a fiscal year,
    /// broken down by level.
    ///
    /// Only applications whose status still counts against the budget
    /// contribute; `cancelled_after_lottery` rows keep consuming points.
    /// Any fiscal year can be queried, not just the configured one, so
    /// prior-year breakdowns stay reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn calculate_annual_leave_points(
        &mut self,
        staff_id: StaffId,
        fiscal_year: FiscalYear,
    ) -> Result<PointsSummary, EngineError> {
        let applications = self.store.applications_for_staff_between(
            staff_id,
            fiscal_year.start(),
            fiscal_year.end(),
        )?;
        Ok(consumed_points(&applications, &self.settings, fiscal_year))
    }

    /// Checks whether a prospective application fits a staff member's
    /// annual point budget.
    ///
    /// The budget is the organization-wide ceiling scaled by the staff
    /// member's retention rate, truncated to whole points. Exact
    /// exhaustion is permitted.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the staff member has no retention rate
    /// on record, or an error if the store fails.
    pub fn check_annual_leave_points_available(
        &mut self,
        staff_id: StaffId,
        level: Level,
        period: Period,
    ) -> Result<PointsAvailability, EngineError> {
        self.annual_points_availability(staff_id, level, period)
    }

    pub(crate) fn annual_points_availability(
        &mut self,
        staff_id: StaffId,
        level: Level,
        period: Period,
    ) -> Result<PointsAvailability, EngineError> {
        let rate = self
            .store
            .retention_rate(staff_id)?
            .ok_or_else(|| EngineError::NotFound {
                resource: "Staff retention rate",
                message: format!("no retention rate recorded for staff {staff_id}"),
            })?;
        let budget = self.personal_budget_for_rate(rate)?;
        let consumed = self
            .calculate_annual_leave_points(staff_id, self.settings.fiscal_year())?
            .total;
        Ok(availability(budget, consumed, &self.settings, level, period))
    }

    fn personal_budget_for_rate(&self, rate: u32) -> Result<Points, EngineError> {
        Ok(personal_budget(self.settings.max_annual_points(), rate)?)
    }
}
