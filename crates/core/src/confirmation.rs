// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity confirmation.
//!
//! After the lottery, each date's ranked applications meet the date's
//! configured capacity: the top `max_people` priorities are confirmed and
//! the rest are withdrawn. Withdrawal recovers points (the application
//! stops counting against the budget), so losing the capacity cut is
//! never a point penalty.

use crate::clock::Clock;
use crate::engine::{LeaveEngine, MonthlySummary};
use crate::error::EngineError;
use crate::store::LeaveStore;
use leave_draw_domain::{ApplicationId, ApplicationStatus, CalendarStatus};
use rand::Rng;
use time::{Date, Month};

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Confirms a date's ranked applications against its capacity.
    ///
    /// `after_lottery` applications are taken in ascending priority order;
    /// the first `max_people` become `confirmed`, the remainder become
    /// `withdrawn`, and the calendar row moves to `confirmation_completed`,
    /// all in one store transaction. Returns the confirmed and withdrawn
    /// application IDs.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the date has no capacity set, or
    /// an error if the store fails.
    pub fn confirm_applications(
        &mut self,
        date: Date,
    ) -> Result<(Vec<ApplicationId>, Vec<ApplicationId>), EngineError> {
        let max_people = self.capacity_for(date)?;

        let mut ranked: Vec<_> = self
            .store
            .applications_for_date(date)?
            .into_iter()
            .filter(|a| a.status == ApplicationStatus::AfterLottery)
            .collect();
        ranked.sort_by_key(|a| (a.priority.unwrap_or(u32::MAX), a.id));

        let cut = usize::try_from(max_people)
            .unwrap_or(usize::MAX)
            .min(ranked.len());
        let confirmed: Vec<ApplicationId> = ranked[..cut].iter().map(|a| a.id).collect();
        let withdrawn: Vec<ApplicationId> = ranked[cut..].iter().map(|a| a.id).collect();

        self.store.apply_confirmation(date, &confirmed, &withdrawn)?;

        tracing::info!(
            %date,
            confirmed = confirmed.len(),
            withdrawn = withdrawn.len(),
            max_people,
            "Capacity confirmation applied"
        );
        Ok((confirmed, withdrawn))
    }

    /// Runs capacity confirmation for every date in a month that has a
    /// capacity configured.
    ///
    /// Dates without a capacity are skipped silently; each remaining date
    /// is processed independently, with failures logged and counted.
    ///
    /// # Errors
    ///
    /// Returns an error only if the month's calendar rows cannot be
    /// fetched; per-date failures are reported in the summary.
    pub fn confirm_all_applications_for_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<MonthlySummary, EngineError> {
        let days = self.store.calendar_days_in_month(year, month)?;
        let mut summary = MonthlySummary::default();

        for day in days {
            if day.max_people.is_none() {
                continue;
            }
            match self.confirm_applications(day.vacation_date) {
                Ok(_) => summary.processed += 1,
                Err(err) => {
                    tracing::warn!(
                        date = %day.vacation_date,
                        error = %err,
                        "Confirmation failed for date, skipping"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            year,
            month = u8::from(month),
            processed = summary.processed,
            failed = summary.failed,
            "Monthly confirmation completed"
        );
        Ok(summary)
    }

    /// Confirms one ranked application if its date still has capacity.
    ///
    /// The capacity check and the status update run as one atomic store
    /// operation so concurrent admissions cannot overbook the date.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the application does not exist, an
    /// invalid-state error if it is not `after_lottery`, a configuration
    /// error if the date has no capacity set, or a validation error if the
    /// date is already full.
    pub fn confirm_single_application(&mut self, id: ApplicationId) -> Result<(), EngineError> {
        let application = self.require_application(id)?;
        if application.status != ApplicationStatus::AfterLottery {
            return Err(EngineError::InvalidState {
                message: format!(
                    "application {id} is {}, only after_lottery applications can be confirmed",
                    application.status.as_str()
                ),
            });
        }

        let max_people = self.capacity_for(application.vacation_date)?;
        let admitted = self
            .store
            .confirm_if_capacity(id, application.vacation_date, max_people)?;
        if !admitted {
            return Err(EngineError::Validation {
                message: format!(
                    "capacity {max_people} for {} is already filled",
                    application.vacation_date
                ),
            });
        }

        tracing::info!(application_id = id.value(), "Application confirmed");
        Ok(())
    }

    /// Revokes one application's confirmation, returning it to
    /// `after_lottery` with its priority intact.
    ///
    /// If no confirmed applications remain for the date afterwards, the
    /// calendar row reverts from `confirmation_completed` to
    /// `after_lottery` so the date can be confirmed again.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the application does not exist, an
    /// invalid-state error if it is not `confirmed`, or an error if the
    /// store fails.
    pub fn cancel_confirmation(&mut self, id: ApplicationId) -> Result<(), EngineError> {
        let application = self.require_application(id)?;
        if application.status != ApplicationStatus::Confirmed {
            return Err(EngineError::InvalidState {
                message: format!(
                    "application {id} is {}, only confirmed applications can be reverted",
                    application.status.as_str()
                ),
            });
        }

        self.store
            .set_application_state(id, ApplicationStatus::AfterLottery, application.priority)?;

        let any_confirmed = self
            .store
            .applications_for_date(application.vacation_date)?
            .iter()
            .any(|a| a.status == ApplicationStatus::Confirmed);
        if !any_confirmed
            && let Some(day) = self.store.calendar_day(application.vacation_date)?
            && day.status == CalendarStatus::ConfirmationCompleted
        {
            self.store
                .set_calendar_status(application.vacation_date, CalendarStatus::AfterLottery)?;
        }

        tracing::info!(application_id = id.value(), "Confirmation revoked");
        Ok(())
    }

    pub(crate) fn require_application(
        &mut self,
        id: ApplicationId,
    ) -> Result<leave_draw_domain::Application, EngineError> {
        self.store
            .application(id)?
            .ok_or_else(|| EngineError::NotFound {
                resource: "Application",
                message: format!("no application with ID {id}"),
            })
    }

    fn capacity_for(&mut self, date: Date) -> Result<u32, EngineError> {
        self.store
            .calendar_day(date)?
            .and_then(|day| day.max_people)
            .ok_or_else(|| EngineError::Configuration {
                message: format!("no capacity configured for {date}"),
            })
    }
}
