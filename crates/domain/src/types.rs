// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core entity types for the leave allocation engine.

use crate::error::DomainError;
use crate::status::{ApplicationStatus, CalendarStatus, CancellationRequestStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Opaque identifier for a leave application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Creates an application ID from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a staff member.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StaffId(i64);

impl StaffId {
    /// Creates a staff ID from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a cancellation request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CancellationRequestId(i64);

impl CancellationRequestId {
    /// Creates a cancellation request ID from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CancellationRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority tier of a leave application.
///
/// Levels 1 and 2 are only submittable inside the lottery window; Level 3
/// is submittable anytime. Higher tiers (lower numbers) always rank ahead
/// of lower tiers in the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Level 1: highest priority tier.
    One,
    /// Level 2: middle priority tier.
    Two,
    /// Level 3: lowest priority tier, submittable outside the window.
    Three,
}

impl Level {
    /// Returns the numeric level value (1, 2, or 3).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Parses a level from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLevel` if the value is not 1, 2, or 3.
    pub const fn from_number(level: u8) -> Result<Self, DomainError> {
        match level {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(DomainError::InvalidLevel { level }),
        }
    }
}

/// Portion of the day a leave application covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// A full day of leave (weight 1.0).
    FullDay,
    /// Morning only (weight 0.5).
    Am,
    /// Afternoon only (weight 0.5).
    Pm,
}

impl Period {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullDay => "full_day",
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }

    /// Returns the budget weight of this period in half-point units.
    ///
    /// A full day weighs 1.0 (two half-units); AM and PM each weigh 0.5.
    #[must_use]
    pub const fn weight_half_units(self) -> u32 {
        match self {
            Self::FullDay => 2,
            Self::Am | Self::Pm => 1,
        }
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_day" => Ok(Self::FullDay),
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(DomainError::InvalidPeriod {
                period: s.to_string(),
            }),
        }
    }
}

/// A single leave request.
///
/// Applications are never physically deleted: cancelled and withdrawn rows
/// persist for audit and point-history accuracy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// The staff member who submitted the request.
    pub staff_id: StaffId,
    /// The requested leave date.
    pub vacation_date: Date,
    /// The portion of the day requested.
    pub period: Period,
    /// The priority tier.
    pub level: Level,
    /// Whether submission occurred inside the date's lottery window.
    /// Snapshotted at submission time and never re-evaluated.
    pub is_within_lottery_period: bool,
    /// Current lifecycle status.
    pub status: ApplicationStatus,
    /// Dense per-date priority (1-based); cleared on cancellation.
    pub priority: Option<u32>,
    /// Submission timestamp.
    pub applied_at: OffsetDateTime,
    /// Free-form remarks.
    pub remarks: Option<String>,
}

impl Application {
    /// Returns true if this application still occupies a slot in its
    /// date's dense priority sequence.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.status.is_terminal_cancelled()
    }
}

/// Per-date processing state for the allocation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The leave date this row tracks.
    pub vacation_date: Date,
    /// Maximum number of staff that may be confirmed for this date.
    /// `None` until an administrator sets the capacity.
    pub max_people: Option<u32>,
    /// Processing status of this date.
    pub status: CalendarStatus,
}

/// Audit/approval record for a deferred cancellation.
///
/// Created only when a cancellation falls outside the lottery window while
/// the application is still `before_lottery`, deferring the decision (and
/// the point recovery) to an administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRequest {
    /// Unique request identifier.
    pub id: CancellationRequestId,
    /// The application this request concerns.
    pub application_id: ApplicationId,
    /// Current review status.
    pub status: CancellationRequestStatus,
    /// The administrator who resolved the request, if resolved.
    pub reviewer: Option<StaffId>,
    /// Reviewer comment, populated on rejection.
    pub comment: Option<String>,
    /// When the cancellation was requested.
    pub requested_at: OffsetDateTime,
    /// When the request was approved or rejected.
    pub resolved_at: Option<OffsetDateTime>,
}
