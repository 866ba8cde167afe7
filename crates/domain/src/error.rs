// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Application status string is not a known status.
    InvalidApplicationStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Calendar status string is not a known status.
    InvalidCalendarStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Cancellation request status string is not a known status.
    InvalidCancellationRequestStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Level value is outside 1..=3.
    InvalidLevel {
        /// The invalid level value.
        level: u8,
    },
    /// Period string is not a known period.
    InvalidPeriod {
        /// The unrecognized period string.
        period: String,
    },
    /// A cancellation was requested for an application whose status forbids it.
    CancellationNotAllowed {
        /// The application's current status.
        status: String,
        /// Why the cancellation is not allowed.
        reason: String,
    },
    /// Lottery window geometry in settings is invalid.
    InvalidWindowGeometry {
        /// Description of the geometry violation.
        reason: String,
    },
    /// Retention rate percentage is outside 0..=100.
    InvalidRetentionRate {
        /// The invalid rate value.
        rate: u32,
    },
    /// A per-level point cost is zero.
    InvalidPointCost {
        /// The level with the zero cost.
        level: u8,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidApplicationStatus { status } => {
                write!(f, "Invalid application status: '{status}'")
            }
            Self::InvalidCalendarStatus { status } => {
                write!(f, "Invalid calendar status: '{status}'")
            }
            Self::InvalidCancellationRequestStatus { status } => {
                write!(f, "Invalid cancellation request status: '{status}'")
            }
            Self::InvalidLevel { level } => {
                write!(f, "Invalid level: {level}. Must be 1, 2, or 3")
            }
            Self::InvalidPeriod { period } => write!(f, "Invalid period: '{period}'"),
            Self::CancellationNotAllowed { status, reason } => {
                write!(f, "Cancellation not allowed from status '{status}': {reason}")
            }
            Self::InvalidWindowGeometry { reason } => {
                write!(f, "Invalid lottery window geometry: {reason}")
            }
            Self::InvalidRetentionRate { rate } => {
                write!(f, "Invalid retention rate: {rate}. Must be between 0 and 100")
            }
            Self::InvalidPointCost { level } => {
                write!(f, "Point cost for level {level} must be greater than 0")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
