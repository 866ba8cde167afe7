// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence layer for the leave allocation engine.
//!
//! This crate stores applications, calendar days, cancellation requests,
//! staff point settings, and non-working dates in `SQLite` via Diesel,
//! and implements the engine's `LeaveStore` trait on top of them.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory databases back unit and integration tests
//! - File-based databases (with WAL mode) back deployments
//!
//! Schema management uses embedded Diesel migrations; foreign key
//! enforcement is verified at startup.
//!
//! ## Atomicity
//!
//! The `LeaveStore` batch mutations (draws, confirmations, priority
//! renumbering, capacity-checked admission) run inside immediate
//! transactions so a failure leaves no partial effect and competing
//! writers serialize on the write lock.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use leave_draw::{LeaveStore, NewApplication, StoreError};
use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CalendarDay, CalendarStatus,
    CancellationRequest, CancellationRequestId, CancellationRequestStatus, DrawPosition, StaffId,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, Month, OffsetDateTime};

pub mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// SQLite-backed store for the leave allocation engine.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store over an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store over a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Sets or clears the confirmable capacity for a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_calendar_capacity(
        &mut self,
        date: Date,
        max_people: Option<u32>,
    ) -> Result<(), PersistenceError> {
        mutations::set_calendar_capacity(&mut self.conn, date, max_people)
    }

    /// Upserts a staff member's point retention rate percentage.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_retention_rate(
        &mut self,
        staff_id: StaffId,
        rate: u32,
    ) -> Result<(), PersistenceError> {
        mutations::set_retention_rate(&mut self.conn, staff_id, rate)
    }

    /// Records a holiday date, skipped by month-scoped batch operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_holiday(&mut self, date: Date, name: Option<&str>) -> Result<(), PersistenceError> {
        mutations::insert_holiday(&mut self.conn, date, name)
    }

    /// Records a conference date, skipped by month-scoped batch
    /// operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_conference(
        &mut self,
        date: Date,
        title: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::insert_conference(&mut self.conn, date, title)
    }
}

impl LeaveStore for Persistence {
    fn application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(queries::application_by_id(&mut self.conn, id)?)
    }

    fn applications_for_date(&mut self, date: Date) -> Result<Vec<Application>, StoreError> {
        Ok(queries::applications_for_date(&mut self.conn, date)?)
    }

    fn applications_for_staff_between(
        &mut self,
        staff_id: StaffId,
        from: Date,
        to: Date,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(queries::applications_for_staff_between(
            &mut self.conn,
            staff_id,
            from,
            to,
        )?)
    }

    fn insert_application(
        &mut self,
        application: &NewApplication,
    ) -> Result<Application, StoreError> {
        Ok(mutations::insert_application(&mut self.conn, application)?)
    }

    fn apply_draw(&mut self, date: Date, positions: &[DrawPosition]) -> Result<(), StoreError> {
        Ok(mutations::apply_draw(&mut self.conn, date, positions)?)
    }

    fn apply_confirmation(
        &mut self,
        date: Date,
        confirmed: &[ApplicationId],
        withdrawn: &[ApplicationId],
    ) -> Result<(), StoreError> {
        Ok(mutations::apply_confirmation(
            &mut self.conn,
            date,
            confirmed,
            withdrawn,
        )?)
    }

    fn set_application_state(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
        priority: Option<u32>,
    ) -> Result<(), StoreError> {
        Ok(mutations::set_application_state(
            &mut self.conn,
            id,
            status,
            priority,
        )?)
    }

    fn apply_priorities(
        &mut self,
        _date: Date,
        assignments: &[(ApplicationId, u32)],
    ) -> Result<(), StoreError> {
        Ok(mutations::apply_priorities(&mut self.conn, assignments)?)
    }

    fn confirm_if_capacity(
        &mut self,
        id: ApplicationId,
        date: Date,
        max_people: u32,
    ) -> Result<bool, StoreError> {
        Ok(mutations::confirm_if_capacity(
            &mut self.conn,
            id,
            date,
            max_people,
        )?)
    }

    fn calendar_day(&mut self, date: Date) -> Result<Option<CalendarDay>, StoreError> {
        Ok(queries::calendar_day(&mut self.conn, date)?)
    }

    fn calendar_days_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<CalendarDay>, StoreError> {
        Ok(queries::calendar_days_in_month(&mut self.conn, year, month)?)
    }

    fn set_calendar_status(
        &mut self,
        date: Date,
        status: CalendarStatus,
    ) -> Result<(), StoreError> {
        Ok(mutations::set_calendar_status(&mut self.conn, date, status)?)
    }

    fn insert_cancellation_request(
        &mut self,
        application_id: ApplicationId,
        requested_at: OffsetDateTime,
    ) -> Result<CancellationRequest, StoreError> {
        Ok(mutations::insert_cancellation_request(
            &mut self.conn,
            application_id,
            requested_at,
        )?)
    }

    fn cancellation_request(
        &mut self,
        id: CancellationRequestId,
    ) -> Result<Option<CancellationRequest>, StoreError> {
        Ok(queries::cancellation_request_by_id(&mut self.conn, id)?)
    }

    fn resolve_cancellation_request(
        &mut self,
        id: CancellationRequestId,
        status: CancellationRequestStatus,
        reviewer: StaffId,
        comment: Option<String>,
        resolved_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        Ok(mutations::resolve_cancellation_request(
            &mut self.conn,
            id,
            status,
            reviewer,
            comment,
            resolved_at,
        )?)
    }

    fn retention_rate(&mut self, staff_id: StaffId) -> Result<Option<u32>, StoreError> {
        Ok(queries::retention_rate(&mut self.conn, staff_id)?)
    }

    fn non_working_dates_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<Date>, StoreError> {
        Ok(queries::non_working_dates_in_month(
            &mut self.conn,
            year,
            month,
        )?)
    }
}
