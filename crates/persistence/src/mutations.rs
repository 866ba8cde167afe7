// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutations.
//!
//! Multi-row mutations run inside `immediate_transaction` so a failure
//! rolls back every row: a draw or confirmation either lands whole or
//! not at all. The immediate transaction mode also takes the write lock
//! up front, serializing competing batch writers.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{
    NewApplicationRow, NewCancellationRequestRow, format_date, format_timestamp,
};
use crate::diesel_schema::{applications, calendar_days, cancellation_requests};
use crate::error::PersistenceError;
use crate::queries;
use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_draw::NewApplication;
use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CalendarStatus, CancellationRequest,
    CancellationRequestId, CancellationRequestStatus, DrawPosition, StaffId,
};
use time::{Date, OffsetDateTime};

fn priority_column(priority: Option<u32>) -> Option<i32> {
    priority.map(|p| i32::try_from(p).unwrap_or(i32::MAX))
}

/// Upserts the calendar row for a date, touching only the status so a
/// configured capacity survives.
fn upsert_calendar_status(
    conn: &mut SqliteConnection,
    date: Date,
    status: CalendarStatus,
) -> Result<(), PersistenceError> {
    diesel::insert_into(calendar_days::table)
        .values((
            calendar_days::vacation_date.eq(format_date(date)?),
            calendar_days::status.eq(status.as_str()),
        ))
        .on_conflict(calendar_days::vacation_date)
        .do_update()
        .set(calendar_days::status.eq(status.as_str()))
        .execute(conn)?;
    Ok(())
}

/// Inserts a new application and returns the stored row.
///
/// # Errors
///
/// Returns an error if the insert fails, including a uniqueness
/// violation when the staff member already holds an active row for the
/// date.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: &NewApplication,
) -> Result<Application, PersistenceError> {
    let row = NewApplicationRow::from_domain(application)?;
    diesel::insert_into(applications::table)
        .values(&row)
        .execute(conn)?;
    let id = ApplicationId::new(get_last_insert_rowid(conn)?);

    queries::application_by_id(conn, id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("application {id} vanished after insert"))
    })
}

/// Applies a lottery draw for a date in one transaction.
///
/// # Errors
///
/// Returns an error if any update fails; the transaction rolls back.
pub fn apply_draw(
    conn: &mut SqliteConnection,
    date: Date,
    positions: &[DrawPosition],
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        for position in positions {
            diesel::update(
                applications::table
                    .filter(applications::application_id.eq(position.application_id.value())),
            )
            .set((
                applications::status.eq(ApplicationStatus::AfterLottery.as_str()),
                applications::priority.eq(priority_column(Some(position.priority))),
            ))
            .execute(conn)?;
        }
        upsert_calendar_status(conn, date, CalendarStatus::AfterLottery)
    })
}

/// Applies a capacity confirmation for a date in one transaction.
///
/// # Errors
///
/// Returns an error if any update fails; the transaction rolls back.
pub fn apply_confirmation(
    conn: &mut SqliteConnection,
    date: Date,
    confirmed: &[ApplicationId],
    withdrawn: &[ApplicationId],
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        for id in confirmed {
            diesel::update(
                applications::table.filter(applications::application_id.eq(id.value())),
            )
            .set(applications::status.eq(ApplicationStatus::Confirmed.as_str()))
            .execute(conn)?;
        }
        for id in withdrawn {
            diesel::update(
                applications::table.filter(applications::application_id.eq(id.value())),
            )
            .set((
                applications::status.eq(ApplicationStatus::Withdrawn.as_str()),
                applications::priority.eq(None::<i32>),
            ))
            .execute(conn)?;
        }
        upsert_calendar_status(conn, date, CalendarStatus::ConfirmationCompleted)
    })
}

/// Updates one application's status and priority.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_application_state(
    conn: &mut SqliteConnection,
    id: ApplicationId,
    status: ApplicationStatus,
    priority: Option<u32>,
) -> Result<(), PersistenceError> {
    diesel::update(applications::table.filter(applications::application_id.eq(id.value())))
        .set((
            applications::status.eq(status.as_str()),
            applications::priority.eq(priority_column(priority)),
        ))
        .execute(conn)?;
    Ok(())
}

/// Writes a dense priority sequence in one transaction.
///
/// # Errors
///
/// Returns an error if any update fails; the transaction rolls back.
pub fn apply_priorities(
    conn: &mut SqliteConnection,
    assignments: &[(ApplicationId, u32)],
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        for (id, priority) in assignments {
            diesel::update(
                applications::table.filter(applications::application_id.eq(id.value())),
            )
            .set(applications::priority.eq(priority_column(Some(*priority))))
            .execute(conn)?;
        }
        Ok(())
    })
}

/// Atomically admits one application if the date's confirmed count is
/// still below `max_people`.
///
/// The count and the conditional update share one immediate transaction,
/// so two competing admissions for the last slot cannot both succeed.
///
/// # Errors
///
/// Returns an error if the queries fail.
pub fn confirm_if_capacity(
    conn: &mut SqliteConnection,
    id: ApplicationId,
    date: Date,
    max_people: u32,
) -> Result<bool, PersistenceError> {
    let date_text = format_date(date)?;
    conn.immediate_transaction(|conn| {
        let confirmed: i64 = applications::table
            .filter(applications::vacation_date.eq(&date_text))
            .filter(applications::status.eq(ApplicationStatus::Confirmed.as_str()))
            .count()
            .get_result(conn)?;
        if confirmed >= i64::from(max_people) {
            return Ok(false);
        }

        diesel::update(applications::table.filter(applications::application_id.eq(id.value())))
            .set(applications::status.eq(ApplicationStatus::Confirmed.as_str()))
            .execute(conn)?;
        Ok(true)
    })
}

/// Upserts the calendar row for a date with the given status.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_calendar_status(
    conn: &mut SqliteConnection,
    date: Date,
    status: CalendarStatus,
) -> Result<(), PersistenceError> {
    upsert_calendar_status(conn, date, status)
}

/// Sets or clears the capacity for a date, creating the row if needed.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_calendar_capacity(
    conn: &mut SqliteConnection,
    date: Date,
    max_people: Option<u32>,
) -> Result<(), PersistenceError> {
    let capacity = max_people.map(|m| i32::try_from(m).unwrap_or(i32::MAX));
    diesel::insert_into(calendar_days::table)
        .values((
            calendar_days::vacation_date.eq(format_date(date)?),
            calendar_days::max_people.eq(capacity),
            calendar_days::status.eq(CalendarStatus::BeforeLottery.as_str()),
        ))
        .on_conflict(calendar_days::vacation_date)
        .do_update()
        .set(calendar_days::max_people.eq(capacity))
        .execute(conn)?;
    Ok(())
}

/// Creates a pending cancellation request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_cancellation_request(
    conn: &mut SqliteConnection,
    application_id: ApplicationId,
    requested_at: OffsetDateTime,
) -> Result<CancellationRequest, PersistenceError> {
    let row = NewCancellationRequestRow {
        application_id: application_id.value(),
        status: CancellationRequestStatus::Pending.as_str().to_string(),
        requested_at: format_timestamp(requested_at)?,
    };
    diesel::insert_into(cancellation_requests::table)
        .values(&row)
        .execute(conn)?;
    let id = CancellationRequestId::new(get_last_insert_rowid(conn)?);

    queries::cancellation_request_by_id(conn, id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("cancellation request {id} vanished after insert"))
    })
}

/// Records the terminal decision on a cancellation request.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn resolve_cancellation_request(
    conn: &mut SqliteConnection,
    id: CancellationRequestId,
    status: CancellationRequestStatus,
    reviewer: StaffId,
    comment: Option<String>,
    resolved_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(
        cancellation_requests::table.filter(cancellation_requests::request_id.eq(id.value())),
    )
    .set((
        cancellation_requests::status.eq(status.as_str()),
        cancellation_requests::reviewer_staff_id.eq(Some(reviewer.value())),
        cancellation_requests::comment.eq(comment),
        cancellation_requests::resolved_at.eq(Some(format_timestamp(resolved_at)?)),
    ))
    .execute(conn)?;
    Ok(())
}

/// Upserts a staff member's retention rate.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn set_retention_rate(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    rate: u32,
) -> Result<(), PersistenceError> {
    use crate::diesel_schema::staff_points;

    let rate = i32::try_from(rate).unwrap_or(i32::MAX);
    diesel::insert_into(staff_points::table)
        .values((
            staff_points::staff_id.eq(staff_id.value()),
            staff_points::retention_rate.eq(rate),
        ))
        .on_conflict(staff_points::staff_id)
        .do_update()
        .set(staff_points::retention_rate.eq(rate))
        .execute(conn)?;
    Ok(())
}

/// Records a holiday date.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_holiday(
    conn: &mut SqliteConnection,
    date: Date,
    name: Option<&str>,
) -> Result<(), PersistenceError> {
    use crate::diesel_schema::holidays;

    diesel::insert_into(holidays::table)
        .values((
            holidays::holiday_date.eq(format_date(date)?),
            holidays::name.eq(name),
        ))
        .on_conflict(holidays::holiday_date)
        .do_nothing()
        .execute(conn)?;
    Ok(())
}

/// Records a conference date.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_conference(
    conn: &mut SqliteConnection,
    date: Date,
    title: Option<&str>,
) -> Result<(), PersistenceError> {
    use crate::diesel_schema::conferences;

    diesel::insert_into(conferences::table)
        .values((
            conferences::conference_date.eq(format_date(date)?),
            conferences::title.eq(title),
        ))
        .on_conflict(conferences::conference_date)
        .do_nothing()
        .execute(conn)?;
    Ok(())
}
