// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository abstraction over the relational store.
//!
//! The engine never issues queries directly; it goes through typed
//! per-entity accessors on this trait. Mutation methods that touch
//! several rows are contractually atomic: an implementation must apply
//! them inside one transaction so a failure leaves no partial effect.

use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CalendarDay, CalendarStatus,
    CancellationRequest, CancellationRequestId, CancellationRequestStatus, DrawPosition, Level,
    Period, StaffId,
};
use time::{Date, Month, OffsetDateTime};

/// Errors produced by a `LeaveStore` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend failed to execute the operation.
    Backend(String),
    /// Stored data could not be interpreted as valid domain values.
    Corrupted(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "Store backend error: {msg}"),
            Self::Corrupted(msg) => write!(f, "Corrupted store data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Field set for inserting a new application row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    /// The submitting staff member.
    pub staff_id: StaffId,
    /// The requested leave date.
    pub vacation_date: Date,
    /// The portion of the day requested.
    pub period: Period,
    /// The priority tier.
    pub level: Level,
    /// Window flag snapshotted at submission.
    pub is_within_lottery_period: bool,
    /// Initial status (`before_lottery` for ordinary submissions).
    pub status: ApplicationStatus,
    /// Arrival priority.
    pub priority: Option<u32>,
    /// Submission timestamp.
    pub applied_at: OffsetDateTime,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

/// Typed repository interface consumed by the engine.
pub trait LeaveStore {
    /// Fetches one application by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError>;

    /// Fetches every application row for a vacation date, including
    /// terminal-cancelled ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn applications_for_date(&mut self, date: Date) -> Result<Vec<Application>, StoreError>;

    /// Fetches a staff member's applications dated within `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn applications_for_staff_between(
        &mut self,
        staff_id: StaffId,
        from: Date,
        to: Date,
    ) -> Result<Vec<Application>, StoreError>;

    /// Inserts a new application and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or a uniqueness constraint
    /// is violated.
    fn insert_application(
        &mut self,
        application: &NewApplication,
    ) -> Result<Application, StoreError>;

    /// Applies a lottery draw for a date: sets each listed application's
    /// priority and moves it to `after_lottery`, and upserts the date's
    /// calendar row to `after_lottery`. Atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; no partial effect remains.
    fn apply_draw(&mut self, date: Date, positions: &[DrawPosition]) -> Result<(), StoreError>;

    /// Applies a capacity confirmation for a date: listed applications
    /// become `confirmed` or `withdrawn`, and the calendar row is upserted
    /// to `confirmation_completed`. Atomic.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; no partial effect remains.
    fn apply_confirmation(
        &mut self,
        date: Date,
        confirmed: &[ApplicationId],
        withdrawn: &[ApplicationId],
    ) -> Result<(), StoreError>;

    /// Updates one application's status and priority.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn set_application_state(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
        priority: Option<u32>,
    ) -> Result<(), StoreError>;

    /// Writes a dense priority sequence for a date in one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; no partial effect remains.
    fn apply_priorities(
        &mut self,
        date: Date,
        assignments: &[(ApplicationId, u32)],
    ) -> Result<(), StoreError>;

    /// Atomically admits one application if the date's confirmed count is
    /// still below `max_people`. Returns whether admission happened.
    ///
    /// The count-compare-update sequence must execute as one transaction
    /// so concurrent admissions cannot overbook the date.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn confirm_if_capacity(
        &mut self,
        id: ApplicationId,
        date: Date,
        max_people: u32,
    ) -> Result<bool, StoreError>;

    /// Fetches the calendar row for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn calendar_day(&mut self, date: Date) -> Result<Option<CalendarDay>, StoreError>;

    /// Fetches every calendar row dated within the given month.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn calendar_days_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<CalendarDay>, StoreError>;

    /// Upserts the calendar row for a date with the given status,
    /// preserving any configured capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn set_calendar_status(&mut self, date: Date, status: CalendarStatus)
    -> Result<(), StoreError>;

    /// Creates a pending cancellation request for an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert_cancellation_request(
        &mut self,
        application_id: ApplicationId,
        requested_at: OffsetDateTime,
    ) -> Result<CancellationRequest, StoreError>;

    /// Fetches one cancellation request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn cancellation_request(
        &mut self,
        id: CancellationRequestId,
    ) -> Result<Option<CancellationRequest>, StoreError>;

    /// Records the terminal decision on a cancellation request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn resolve_cancellation_request(
        &mut self,
        id: CancellationRequestId,
        status: CancellationRequestStatus,
        reviewer: StaffId,
        comment: Option<String>,
        resolved_at: OffsetDateTime,
    ) -> Result<(), StoreError>;

    /// Fetches a staff member's point retention rate percentage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn retention_rate(&mut self, staff_id: StaffId) -> Result<Option<u32>, StoreError>;

    /// Fetches the holiday and conference dates falling in the given
    /// month. Used only to skip non-working dates in month batches.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn non_working_dates_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<Date>, StoreError>;
}
