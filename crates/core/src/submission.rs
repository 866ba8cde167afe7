// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application submission.

use crate::clock::Clock;
use crate::engine::LeaveEngine;
use crate::error::EngineError;
use crate::store::{LeaveStore, NewApplication};
use leave_draw_domain::{
    Application, ApplicationStatus, Level, Period, StaffId, arrival_priority, lottery_window,
};
use rand::Rng;
use time::Date;

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Submits a new leave application.
    ///
    /// Level 1 and 2 submissions are accepted only while the vacation
    /// date's lottery window is open; Level 3 is accepted anytime. The
    /// window flag is snapshotted onto the stored row and never
    /// re-evaluated. The new application receives arrival priority N+1
    /// behind the date's N active applications.
    ///
    /// # Arguments
    ///
    /// * `staff_id` - The submitting staff member
    /// * `vacation_date` - The requested leave date
    /// * `period` - Full day, AM, or PM
    /// * `level` - The priority tier
    /// * `remarks` - Optional free-form remarks
    ///
    /// # Errors
    ///
    /// Returns a validation error if the window is closed for a Level 1/2
    /// submission, if the staff member already holds an active application
    /// for the date, or if the submission would exceed their annual point
    /// budget. Returns a not-found error if the staff member has no
    /// retention rate on record.
    pub fn submit_application(
        &mut self,
        staff_id: StaffId,
        vacation_date: Date,
        period: Period,
        level: Level,
        remarks: Option<String>,
    ) -> Result<Application, EngineError> {
        let window = lottery_window(&self.settings, vacation_date)?;
        let is_within = window.contains(self.clock.today());

        if !is_within && level != Level::Three {
            return Err(EngineError::Validation {
                message: format!(
                    "level {} applications are only accepted during the lottery window \
                     ({} through {})",
                    level.number(),
                    window.opens,
                    window.closes
                ),
            });
        }

        let existing = self.store.applications_for_date(vacation_date)?;
        if existing
            .iter()
            .any(|a| a.staff_id == staff_id && a.is_active())
        {
            return Err(EngineError::Validation {
                message: format!(
                    "staff {staff_id} already has an active application for {vacation_date}"
                ),
            });
        }

        let availability = self.annual_points_availability(staff_id, level, period)?;
        if !availability.can_apply {
            return Err(EngineError::Validation {
                message: format!(
                    "application would exceed the annual point budget \
                     (budget {}, consumed {}, cost {})",
                    availability.budget, availability.consumed, availability.new_cost
                ),
            });
        }

        let active_count = existing.iter().filter(|a| a.is_active()).count();
        let application = self.store.insert_application(&NewApplication {
            staff_id,
            vacation_date,
            period,
            level,
            is_within_lottery_period: is_within,
            status: ApplicationStatus::BeforeLottery,
            priority: Some(arrival_priority(active_count)),
            applied_at: self.clock.now(),
            remarks,
        })?;

        tracing::info!(
            application_id = application.id.value(),
            staff_id = staff_id.value(),
            %vacation_date,
            level = level.number(),
            period = period.as_str(),
            "Application submitted"
        );

        Ok(application)
    }
}
