// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status enums and the cancellation decision logic.
//!
//! Application status is a closed tagged union: illegal transitions are
//! rejected at evaluation time rather than discovered as stray strings in
//! storage. The cancellation path decision is a pure function of the
//! current status and the wall-clock position relative to the date's
//! lottery window.

use crate::error::DomainError;
use crate::window::WindowPosition;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted; the lottery has not ranked this application yet.
    BeforeLottery,
    /// Ranked by the lottery; awaiting capacity confirmation.
    AfterLottery,
    /// Admitted within the date's capacity.
    Confirmed,
    /// Awaiting an external approval step before entering the pipeline.
    PendingApproval,
    /// A cancellation request is awaiting an admin decision.
    PendingCancellation,
    /// Lost the capacity cut after the lottery.
    Withdrawn,
    /// Cancelled (legacy generic terminal status).
    Cancelled,
    /// Cancelled while the date's lottery window was still open;
    /// points were recovered.
    CancelledBeforeLottery,
    /// Cancelled after the window closed; points were not recovered.
    CancelledAfterLottery,
}

impl ApplicationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeLottery => "before_lottery",
            Self::AfterLottery => "after_lottery",
            Self::Confirmed => "confirmed",
            Self::PendingApproval => "pending_approval",
            Self::PendingCancellation => "pending_cancellation",
            Self::Withdrawn => "withdrawn",
            Self::Cancelled => "cancelled",
            Self::CancelledBeforeLottery => "cancelled_before_lottery",
            Self::CancelledAfterLottery => "cancelled_after_lottery",
        }
    }

    /// Returns true for statuses that permanently removed the application
    /// from its date's active set.
    ///
    /// Terminal-cancelled applications are excluded from the dense priority
    /// sequence and can never be cancelled again.
    #[must_use]
    pub const fn is_terminal_cancelled(self) -> bool {
        matches!(
            self,
            Self::Withdrawn
                | Self::Cancelled
                | Self::CancelledBeforeLottery
                | Self::CancelledAfterLottery
        )
    }

    /// Returns true if an application in this status still consumes the
    /// staff member's annual point budget.
    ///
    /// `cancelled_after_lottery` deliberately keeps consuming points: there
    /// is no refund once the draw window has closed.
    #[must_use]
    pub const fn counts_against_budget(self) -> bool {
        matches!(
            self,
            Self::BeforeLottery
                | Self::AfterLottery
                | Self::Confirmed
                | Self::PendingApproval
                | Self::PendingCancellation
                | Self::CancelledAfterLottery
        )
    }

    /// Returns true if a cancellation may be requested from this status.
    #[must_use]
    pub const fn may_request_cancellation(self) -> bool {
        matches!(self, Self::BeforeLottery | Self::AfterLottery)
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before_lottery" => Ok(Self::BeforeLottery),
            "after_lottery" => Ok(Self::AfterLottery),
            "confirmed" => Ok(Self::Confirmed),
            "pending_approval" => Ok(Self::PendingApproval),
            "pending_cancellation" => Ok(Self::PendingCancellation),
            "withdrawn" => Ok(Self::Withdrawn),
            "cancelled" => Ok(Self::Cancelled),
            "cancelled_before_lottery" => Ok(Self::CancelledBeforeLottery),
            "cancelled_after_lottery" => Ok(Self::CancelledAfterLottery),
            _ => Err(DomainError::InvalidApplicationStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Processing status of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarStatus {
    /// The lottery has not run for this date.
    BeforeLottery,
    /// The lottery has run; confirmation is pending.
    AfterLottery,
    /// Capacity confirmation has completed for this date.
    ConfirmationCompleted,
}

impl CalendarStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforeLottery => "before_lottery",
            Self::AfterLottery => "after_lottery",
            Self::ConfirmationCompleted => "confirmation_completed",
        }
    }
}

impl FromStr for CalendarStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before_lottery" => Ok(Self::BeforeLottery),
            "after_lottery" => Ok(Self::AfterLottery),
            "confirmation_completed" => Ok(Self::ConfirmationCompleted),
            _ => Err(DomainError::InvalidCalendarStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Review status of a deferred cancellation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationRequestStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved: the application was cancelled and points recovered.
    Approved,
    /// Rejected: the application was restored.
    Rejected,
}

impl CancellationRequestStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for CancellationRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidCancellationRequestStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// The path a permitted cancellation must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationPath {
    /// Cancel immediately with the given terminal status.
    Immediate {
        /// The terminal status to apply.
        new_status: ApplicationStatus,
        /// Whether the consumed points are recovered.
        points_recovered: bool,
    },
    /// Defer to admin approval: the application becomes
    /// `pending_cancellation` and a pending request is recorded.
    Deferred,
}

/// Decides how a cancellation request must be handled.
///
/// The decision depends on the application's current status and on whether
/// the *current* wall-clock date falls inside the vacation date's lottery
/// window. The window position is evaluated dynamically per date and is
/// independent of whether the lottery has actually executed.
///
/// # Errors
///
/// Returns `DomainError::CancellationNotAllowed` if the status is
/// `confirmed` (confirmed applications must go through confirmation
/// revocation) or already cancelled, withdrawn, or in flight.
pub fn cancellation_path(
    status: ApplicationStatus,
    position: WindowPosition,
) -> Result<CancellationPath, DomainError> {
    if status == ApplicationStatus::Confirmed {
        return Err(DomainError::CancellationNotAllowed {
            status: status.as_str().to_string(),
            reason: String::from("cannot cancel a confirmed application through this path"),
        });
    }

    if !status.may_request_cancellation() {
        return Err(DomainError::CancellationNotAllowed {
            status: status.as_str().to_string(),
            reason: String::from("application is already cancelled or a cancellation is in flight"),
        });
    }

    if position == WindowPosition::Within {
        // Inside the window every cancellation is immediate and refunded.
        return Ok(CancellationPath::Immediate {
            new_status: ApplicationStatus::CancelledBeforeLottery,
            points_recovered: true,
        });
    }

    match status {
        ApplicationStatus::BeforeLottery => Ok(CancellationPath::Deferred),
        ApplicationStatus::AfterLottery => Ok(CancellationPath::Immediate {
            new_status: ApplicationStatus::CancelledAfterLottery,
            points_recovered: false,
        }),
        // Unreachable: may_request_cancellation() admits only the two
        // statuses above.
        _ => Err(DomainError::CancellationNotAllowed {
            status: status.as_str().to_string(),
            reason: String::from("status does not permit cancellation"),
        }),
    }
}
