// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.
//!
//! All functions use Diesel DSL exclusively and convert rows into domain
//! values at the boundary.

use crate::data_models::{
    ApplicationRow, CalendarDayRow, CancellationRequestRow, format_date, parse_date,
};
use crate::diesel_schema::{
    applications, calendar_days, cancellation_requests, conferences, holidays, staff_points,
};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_draw_domain::{
    Application, ApplicationId, CalendarDay, CancellationRequest, CancellationRequestId, StaffId,
};
use time::{Date, Month};

/// `YYYY-MM-%` pattern matching every date text in the given month.
fn month_pattern(year: i32, month: Month) -> String {
    format!("{year:04}-{:02}-%", u8::from(month))
}

/// Fetches one application by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn application_by_id(
    conn: &mut SqliteConnection,
    id: ApplicationId,
) -> Result<Option<Application>, PersistenceError> {
    applications::table
        .filter(applications::application_id.eq(id.value()))
        .first::<ApplicationRow>(conn)
        .optional()?
        .map(Application::try_from)
        .transpose()
}

/// Fetches every application row for a vacation date.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn applications_for_date(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Vec<Application>, PersistenceError> {
    applications::table
        .filter(applications::vacation_date.eq(format_date(date)?))
        .order(applications::application_id.asc())
        .load::<ApplicationRow>(conn)?
        .into_iter()
        .map(Application::try_from)
        .collect()
}

/// Fetches a staff member's applications dated within `from..=to`.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn applications_for_staff_between(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
    from: Date,
    to: Date,
) -> Result<Vec<Application>, PersistenceError> {
    applications::table
        .filter(applications::staff_id.eq(staff_id.value()))
        .filter(applications::vacation_date.ge(format_date(from)?))
        .filter(applications::vacation_date.le(format_date(to)?))
        .order(applications::vacation_date.asc())
        .load::<ApplicationRow>(conn)?
        .into_iter()
        .map(Application::try_from)
        .collect()
}

/// Fetches the calendar row for a date.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn calendar_day(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Option<CalendarDay>, PersistenceError> {
    calendar_days::table
        .filter(calendar_days::vacation_date.eq(format_date(date)?))
        .first::<CalendarDayRow>(conn)
        .optional()?
        .map(CalendarDay::try_from)
        .transpose()
}

/// Fetches every calendar row dated within the given month.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn calendar_days_in_month(
    conn: &mut SqliteConnection,
    year: i32,
    month: Month,
) -> Result<Vec<CalendarDay>, PersistenceError> {
    calendar_days::table
        .filter(calendar_days::vacation_date.like(month_pattern(year, month)))
        .order(calendar_days::vacation_date.asc())
        .load::<CalendarDayRow>(conn)?
        .into_iter()
        .map(CalendarDay::try_from)
        .collect()
}

/// Fetches one cancellation request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn cancellation_request_by_id(
    conn: &mut SqliteConnection,
    id: CancellationRequestId,
) -> Result<Option<CancellationRequest>, PersistenceError> {
    cancellation_requests::table
        .filter(cancellation_requests::request_id.eq(id.value()))
        .first::<CancellationRequestRow>(conn)
        .optional()?
        .map(CancellationRequest::try_from)
        .transpose()
}

/// Fetches a staff member's retention rate percentage.
///
/// # Errors
///
/// Returns an error if the query fails or the stored rate is negative.
pub fn retention_rate(
    conn: &mut SqliteConnection,
    staff_id: StaffId,
) -> Result<Option<u32>, PersistenceError> {
    staff_points::table
        .filter(staff_points::staff_id.eq(staff_id.value()))
        .select(staff_points::retention_rate)
        .first::<i32>(conn)
        .optional()?
        .map(|rate| {
            u32::try_from(rate).map_err(|_| {
                PersistenceError::SerializationError(format!("invalid retention rate {rate}"))
            })
        })
        .transpose()
}

/// Fetches holiday and conference dates falling in the given month.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is corrupt.
pub fn non_working_dates_in_month(
    conn: &mut SqliteConnection,
    year: i32,
    month: Month,
) -> Result<Vec<Date>, PersistenceError> {
    let pattern = month_pattern(year, month);

    let mut dates: Vec<Date> = holidays::table
        .filter(holidays::holiday_date.like(pattern.clone()))
        .select(holidays::holiday_date)
        .load::<String>(conn)?
        .iter()
        .map(|text| parse_date(text))
        .collect::<Result<_, _>>()?;

    let conference_dates: Vec<Date> = conferences::table
        .filter(conferences::conference_date.like(pattern))
        .select(conferences::conference_date)
        .load::<String>(conn)?
        .iter()
        .map(|text| parse_date(text))
        .collect::<Result<_, _>>()?;

    dates.extend(conference_dates);
    dates.sort_unstable();
    dates.dedup();
    Ok(dates)
}
