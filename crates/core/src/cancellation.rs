// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellation paths and deferred request review.
//!
//! Which path a cancellation takes depends on where today falls relative
//! to the vacation date's lottery window and on the application's status.
//! Inside the window every cancellation is immediate and refunded.
//! Outside the window a `before_lottery` application defers to admin
//! review, while an `after_lottery` application cancels immediately
//! without a refund.

use crate::clock::Clock;
use crate::engine::LeaveEngine;
use crate::error::EngineError;
use crate::store::LeaveStore;
use leave_draw_domain::{
    ApplicationId, ApplicationStatus, CancellationPath, CancellationRequestId,
    CancellationRequestStatus, StaffId, cancellation_path, lottery_window,
};
use rand::Rng;

/// What a cancellation request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationOutcome {
    /// True if the cancellation was deferred to admin approval.
    pub requires_approval: bool,
    /// True if the consumed points recover (immediately, or upon
    /// approval for a deferred request).
    pub points_will_recover: bool,
}

impl<S: LeaveStore, R: Rng, C: Clock> LeaveEngine<S, R, C> {
    /// Requests cancellation of an application.
    ///
    /// The path is decided from the application's status and today's
    /// position relative to the vacation date's lottery window:
    ///
    /// * inside the window: immediate `cancelled_before_lottery`, points
    ///   recovered;
    /// * outside the window, still `before_lottery`: the application
    ///   becomes `pending_cancellation` and a pending request is recorded
    ///   for admin review;
    /// * outside the window, `after_lottery`: immediate
    ///   `cancelled_after_lottery`, no refund.
    ///
    /// Immediate cancellation clears the priority and renumbers the
    /// date's remaining active applications.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the application does not exist, or an
    /// invalid-state error if its status does not permit cancellation
    /// (`confirmed` applications go through confirmation revocation).
    pub fn request_cancellation(
        &mut self,
        id: ApplicationId,
    ) -> Result<CancellationOutcome, EngineError> {
        let application = self.require_application(id)?;
        let window = lottery_window(&self.settings, application.vacation_date)?;
        let position = window.position_of(self.clock.today());

        match cancellation_path(application.status, position)? {
            CancellationPath::Immediate {
                new_status,
                points_recovered,
            } => {
                self.store.set_application_state(id, new_status, None)?;
                self.recalculate_priorities(application.vacation_date);

                tracing::info!(
                    application_id = id.value(),
                    new_status = new_status.as_str(),
                    points_recovered,
                    "Application cancelled"
                );
                Ok(CancellationOutcome {
                    requires_approval: false,
                    points_will_recover: points_recovered,
                })
            }
            CancellationPath::Deferred => {
                self.store.set_application_state(
                    id,
                    ApplicationStatus::PendingCancellation,
                    application.priority,
                )?;
                let request = self
                    .store
                    .insert_cancellation_request(id, self.clock.now())?;

                tracing::info!(
                    application_id = id.value(),
                    request_id = request.id.value(),
                    "Cancellation deferred to admin review"
                );
                Ok(CancellationOutcome {
                    requires_approval: true,
                    points_will_recover: true,
                })
            }
        }
    }

    /// Approves a pending cancellation request.
    ///
    /// The application becomes `cancelled_before_lottery` (points
    /// recovered), its priority is cleared, and the date's remaining
    /// active applications are renumbered.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the request does not exist, or an
    /// invalid-state error if the request is not pending or the
    /// application is no longer `pending_cancellation`.
    pub fn approve_cancellation(
        &mut self,
        request_id: CancellationRequestId,
        reviewer: StaffId,
    ) -> Result<(), EngineError> {
        let request = self.require_pending_request(request_id)?;
        let application = self.require_pending_application(request.application_id)?;

        self.store.set_application_state(
            application.id,
            ApplicationStatus::CancelledBeforeLottery,
            None,
        )?;
        self.recalculate_priorities(application.vacation_date);
        self.store.resolve_cancellation_request(
            request_id,
            CancellationRequestStatus::Approved,
            reviewer,
            None,
            self.clock.now(),
        )?;

        tracing::info!(
            request_id = request_id.value(),
            application_id = application.id.value(),
            reviewer = reviewer.value(),
            "Cancellation request approved"
        );
        Ok(())
    }

    /// Rejects a pending cancellation request.
    ///
    /// The application is restored to `before_lottery` with its priority
    /// intact; no renumbering is needed since the slot was never vacated.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the request does not exist, or an
    /// invalid-state error if the request is not pending or the
    /// application is no longer `pending_cancellation`.
    pub fn reject_cancellation(
        &mut self,
        request_id: CancellationRequestId,
        reviewer: StaffId,
        comment: Option<String>,
    ) -> Result<(), EngineError> {
        let request = self.require_pending_request(request_id)?;
        let application = self.require_pending_application(request.application_id)?;

        self.store.set_application_state(
            application.id,
            ApplicationStatus::BeforeLottery,
            application.priority,
        )?;
        self.store.resolve_cancellation_request(
            request_id,
            CancellationRequestStatus::Rejected,
            reviewer,
            comment,
            self.clock.now(),
        )?;

        tracing::info!(
            request_id = request_id.value(),
            application_id = application.id.value(),
            reviewer = reviewer.value(),
            "Cancellation request rejected"
        );
        Ok(())
    }

    fn require_pending_request(
        &mut self,
        id: CancellationRequestId,
    ) -> Result<leave_draw_domain::CancellationRequest, EngineError> {
        let request =
            self.store
                .cancellation_request(id)?
                .ok_or_else(|| EngineError::NotFound {
                    resource: "Cancellation request",
                    message: format!("no cancellation request with ID {id}"),
                })?;
        if request.status != CancellationRequestStatus::Pending {
            return Err(EngineError::InvalidState {
                message: format!(
                    "cancellation request {id} is already {}",
                    request.status.as_str()
                ),
            });
        }
        Ok(request)
    }

    fn require_pending_application(
        &mut self,
        id: ApplicationId,
    ) -> Result<leave_draw_domain::Application, EngineError> {
        let application = self.require_application(id)?;
        if application.status != ApplicationStatus::PendingCancellation {
            return Err(EngineError::InvalidState {
                message: format!(
                    "application {id} is {}, expected pending_cancellation",
                    application.status.as_str()
                ),
            });
        }
        Ok(application)
    }
}
