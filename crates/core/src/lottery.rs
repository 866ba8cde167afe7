// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lottery execution.

use crate::clock::Clock;
use crate::engine::{LeaveEngine, MonthlySummary};
use crate::error::EngineError;
use crate::store::LeaveStore;
use leave_draw_domain::{
    ApplicationStatus, CalendarStatus, DrawCandidate, DrawPosition, rank_candidates,
};
use rand::Rng;
use time::{Date, Month, Weekday};

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Runs the lottery for one vacation date.
    ///
    /// Every `before_lottery` application for the date enters the draw and
    /// receives a dense priority; the ranked applications move to
    /// `after_lottery` and the date's calendar row follows, all in one
    /// store transaction. Dates whose capacity confirmation already
    /// completed are rejected.
    ///
    /// # Errors
    ///
    /// Returns an invalid-state error if confirmation has already
    /// completed for the date, or an error if the store fails.
    pub fn perform_lottery_for_date(
        &mut self,
        date: Date,
    ) -> Result<Vec<DrawPosition>, EngineError> {
        if let Some(day) = self.store.calendar_day(date)?
            && day.status == CalendarStatus::ConfirmationCompleted
        {
            return Err(EngineError::InvalidState {
                message: format!("confirmation has already completed for {date}"),
            });
        }

        let candidates: Vec<DrawCandidate> = self
            .store
            .applications_for_date(date)?
            .iter()
            .filter(|a| a.status == ApplicationStatus::BeforeLottery)
            .map(|a| DrawCandidate {
                application_id: a.id,
                level: a.level,
                is_within_lottery_period: a.is_within_lottery_period,
                applied_at: a.applied_at,
            })
            .collect();

        let positions = rank_candidates(&candidates, &mut self.rng);
        self.store.apply_draw(date, &positions)?;

        tracing::info!(%date, ranked = positions.len(), "Lottery executed");
        Ok(positions)
    }

    /// Runs the lottery for every working date in a month.
    ///
    /// Sundays, holidays, and conference dates are skipped. Each date is
    /// processed independently: a failure is logged and counted without
    /// aborting the remaining dates.
    ///
    /// # Errors
    ///
    /// Returns an error only if the month's working dates cannot be
    /// determined; per-date failures are reported in the summary.
    pub fn perform_lottery(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<MonthlySummary, EngineError> {
        let mut summary = MonthlySummary::default();

        for date in working_dates(&mut self.store, year, month)? {
            match self.perform_lottery_for_date(date) {
                Ok(_) => summary.processed += 1,
                Err(err) => {
                    tracing::warn!(%date, error = %err, "Lottery failed for date, skipping");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            year,
            month = u8::from(month),
            processed = summary.processed,
            failed = summary.failed,
            "Monthly lottery completed"
        );
        Ok(summary)
    }
}

/// Enumerates the working dates of a month: every day except Sundays,
/// holidays, and conference dates.
fn working_dates<S: LeaveStore>(
    store: &mut S,
    year: i32,
    month: Month,
) -> Result<Vec<Date>, EngineError> {
    let non_working = store.non_working_dates_in_month(year, month)?;
    let mut dates = Vec::new();

    for day in 1..=time::util::days_in_month(month, year) {
        let Ok(date) = Date::from_calendar_date(year, month, day) else {
            continue;
        };
        if date.weekday() == Weekday::Sunday || non_working.contains(&date) {
            continue;
        }
        dates.push(date);
    }

    Ok(dates)
}
