// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between stored text and domain values.
//!
//! Dates are stored as ISO-8601 `YYYY-MM-DD` text and timestamps as
//! RFC 3339 text. Status columns hold the closed string vocabularies of
//! the domain enums; a row that fails to parse surfaces as a
//! serialization error rather than a silent default.

use crate::diesel_schema::{applications, calendar_days, cancellation_requests};
use crate::error::PersistenceError;
use diesel::prelude::*;
use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CalendarDay, CalendarStatus,
    CancellationRequest, CancellationRequestId, CancellationRequestStatus, Level, Period, StaffId,
};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a date as ISO-8601 `YYYY-MM-DD` text.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("formatting date: {e}")))
}

/// Parses ISO-8601 `YYYY-MM-DD` text into a date.
pub fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, &DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid date '{text}': {e}")))
}

/// Formats a timestamp as RFC 3339 text.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("formatting timestamp: {e}")))
}

/// Parses RFC 3339 text into a timestamp.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("invalid timestamp '{text}': {e}"))
    })
}

fn parse_status(text: &str) -> Result<ApplicationStatus, PersistenceError> {
    ApplicationStatus::from_str(text)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// An `applications` row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct ApplicationRow {
    pub application_id: i64,
    pub staff_id: i64,
    pub vacation_date: String,
    pub period: String,
    pub level: i32,
    pub is_within_lottery_period: i32,
    pub status: String,
    pub priority: Option<i32>,
    pub applied_at: String,
    pub remarks: Option<String>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let level = u8::try_from(row.level)
            .ok()
            .and_then(|n| Level::from_number(n).ok())
            .ok_or_else(|| {
                PersistenceError::SerializationError(format!("invalid level {}", row.level))
            })?;
        let period = Period::from_str(&row.period)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let priority = row
            .priority
            .map(|p| {
                u32::try_from(p).map_err(|_| {
                    PersistenceError::SerializationError(format!("invalid priority {p}"))
                })
            })
            .transpose()?;

        Ok(Self {
            id: ApplicationId::new(row.application_id),
            staff_id: StaffId::new(row.staff_id),
            vacation_date: parse_date(&row.vacation_date)?,
            period,
            level,
            is_within_lottery_period: row.is_within_lottery_period != 0,
            status: parse_status(&row.status)?,
            priority,
            applied_at: parse_timestamp(&row.applied_at)?,
            remarks: row.remarks,
        })
    }
}

/// Field set for inserting an `applications` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    pub staff_id: i64,
    pub vacation_date: String,
    pub period: String,
    pub level: i32,
    pub is_within_lottery_period: i32,
    pub status: String,
    pub priority: Option<i32>,
    pub applied_at: String,
    pub remarks: Option<String>,
}

impl NewApplicationRow {
    /// Builds an insertable row from the engine's new-application fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or timestamp cannot be formatted.
    pub fn from_domain(application: &leave_draw::NewApplication) -> Result<Self, PersistenceError> {
        Ok(Self {
            staff_id: application.staff_id.value(),
            vacation_date: format_date(application.vacation_date)?,
            period: application.period.as_str().to_string(),
            level: i32::from(application.level.number()),
            is_within_lottery_period: i32::from(application.is_within_lottery_period),
            status: application.status.as_str().to_string(),
            priority: application.priority.map(|p| i32::try_from(p).unwrap_or(i32::MAX)),
            applied_at: format_timestamp(application.applied_at)?,
            remarks: application.remarks.clone(),
        })
    }
}

/// A `calendar_days` row as stored.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = calendar_days)]
pub struct CalendarDayRow {
    pub vacation_date: String,
    pub max_people: Option<i32>,
    pub status: String,
}

impl TryFrom<CalendarDayRow> for CalendarDay {
    type Error = PersistenceError;

    fn try_from(row: CalendarDayRow) -> Result<Self, Self::Error> {
        let max_people = row
            .max_people
            .map(|m| {
                u32::try_from(m).map_err(|_| {
                    PersistenceError::SerializationError(format!("invalid capacity {m}"))
                })
            })
            .transpose()?;
        let status = CalendarStatus::from_str(&row.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(Self {
            vacation_date: parse_date(&row.vacation_date)?,
            max_people,
            status,
        })
    }
}

/// A `cancellation_requests` row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct CancellationRequestRow {
    pub request_id: i64,
    pub application_id: i64,
    pub status: String,
    pub reviewer_staff_id: Option<i64>,
    pub comment: Option<String>,
    pub requested_at: String,
    pub resolved_at: Option<String>,
}

impl TryFrom<CancellationRequestRow> for CancellationRequest {
    type Error = PersistenceError;

    fn try_from(row: CancellationRequestRow) -> Result<Self, Self::Error> {
        let status = CancellationRequestStatus::from_str(&row.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let resolved_at = row.resolved_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(Self {
            id: CancellationRequestId::new(row.request_id),
            application_id: ApplicationId::new(row.application_id),
            status,
            reviewer: row.reviewer_staff_id.map(StaffId::new),
            comment: row.comment,
            requested_at: parse_timestamp(&row.requested_at)?,
            resolved_at,
        })
    }
}

/// Field set for inserting a `cancellation_requests` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cancellation_requests)]
pub struct NewCancellationRequestRow {
    pub application_id: i64,
    pub status: String,
    pub requested_at: String,
}
