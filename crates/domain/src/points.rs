// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Points ledger calculations.
//!
//! Annual point consumption is a pure aggregation over a staff member's
//! applications: each application weighs 1.0 (full day) or 0.5 (half day)
//! times its level's whole-point cost. All arithmetic uses exact
//! half-point fixed-point units so boundary checks never depend on
//! floating-point comparison.

use crate::error::DomainError;
use crate::fiscal::FiscalYear;
use crate::settings::LotterySettings;
use crate::types::{Application, Level, Period};
use serde::{Deserialize, Serialize};

/// A non-negative point quantity in half-point fixed-point units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Points(u32);

impl Points {
    /// Zero points.
    pub const ZERO: Self = Self(0);

    /// Creates a quantity from whole points.
    #[must_use]
    pub const fn from_whole(points: u32) -> Self {
        Self(points.saturating_mul(2))
    }

    /// Creates a quantity from half-point units.
    #[must_use]
    pub const fn from_half_units(half_units: u32) -> Self {
        Self(half_units)
    }

    /// Returns the quantity in half-point units.
    #[must_use]
    pub const fn half_units(self) -> u32 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fraction = if self.0 % 2 == 0 { "0" } else { "5" };
        write!(f, "{}.{fraction}", self.0 / 2)
    }
}

/// Consumption attributed to one level in a points breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPoints {
    /// The level this entry covers.
    pub level: Level,
    /// Weighted application count in half-day units
    /// (a full-day application contributes 2, a half-day 1).
    pub weighted_half_days: u32,
    /// Whole-point cost of one full-day application at this level.
    pub cost_per_day: u32,
    /// Points consumed by this level.
    pub subtotal: Points,
}

/// Per-level breakdown and total of consumed points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsSummary {
    /// One entry per level, in level order, including zero-count levels.
    pub by_level: Vec<LevelPoints>,
    /// Total points consumed.
    pub total: Points,
}

/// Result of an availability check for a prospective application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsAvailability {
    /// The staff member's personal annual budget.
    pub budget: Points,
    /// Points already consumed this fiscal year.
    pub consumed: Points,
    /// Remaining balance in half-point units; negative when overdrawn.
    pub remaining_half_units: i64,
    /// Cost of the prospective application.
    pub new_cost: Points,
    /// Whether the prospective application fits the budget.
    /// Exact exhaustion is permitted: `consumed + new_cost == budget`
    /// still applies.
    pub can_apply: bool,
}

/// Returns the cost of one application at the given level and period.
#[must_use]
pub(crate) const fn application_cost(
    settings: &LotterySettings,
    level: Level,
    period: Period,
) -> Points {
    Points::from_half_units(period.weight_half_units().saturating_mul(settings.cost_for(level)))
}

/// Computes points consumed within a fiscal year.
///
/// Only applications dated inside the fiscal year whose status still
/// counts against the budget contribute. Cancelled-with-recovery and
/// withdrawn applications are excluded; `cancelled_after_lottery` is not.
#[must_use]
pub fn consumed_points(
    applications: &[Application],
    settings: &LotterySettings,
    fiscal_year: FiscalYear,
) -> PointsSummary {
    let mut weighted = [0_u32; 3];

    for application in applications {
        if !fiscal_year.contains(application.vacation_date) {
            continue;
        }
        if !application.status.counts_against_budget() {
            continue;
        }
        let index = (application.level.number() - 1) as usize;
        weighted[index] = weighted[index].saturating_add(application.period.weight_half_units());
    }

    let mut by_level = Vec::with_capacity(3);
    let mut total = Points::ZERO;
    for level in [Level::One, Level::Two, Level::Three] {
        let weighted_half_days = weighted[(level.number() - 1) as usize];
        let cost_per_day = settings.cost_for(level);
        let subtotal = Points::from_half_units(weighted_half_days.saturating_mul(cost_per_day));
        total = total.saturating_add(subtotal);
        by_level.push(LevelPoints {
            level,
            weighted_half_days,
            cost_per_day,
            subtotal,
        });
    }

    PointsSummary { by_level, total }
}

/// Computes a staff member's personal annual budget.
///
/// The organization-wide ceiling is scaled by the staff member's retention
/// rate percentage, truncating to whole points.
///
/// # Errors
///
/// Returns `DomainError::InvalidRetentionRate` if the rate exceeds 100.
pub fn personal_budget(
    max_annual_points: u32,
    retention_rate: u32,
) -> Result<Points, DomainError> {
    if retention_rate > 100 {
        return Err(DomainError::InvalidRetentionRate {
            rate: retention_rate,
        });
    }
    let whole = u64::from(max_annual_points) * u64::from(retention_rate) / 100;
    Ok(Points::from_whole(u32::try_from(whole).unwrap_or(u32::MAX)))
}

/// Checks whether a prospective application fits a staff member's budget.
#[must_use]
pub fn availability(
    budget: Points,
    consumed: Points,
    settings: &LotterySettings,
    level: Level,
    period: Period,
) -> PointsAvailability {
    let new_cost = application_cost(settings, level, period);
    let projected = u64::from(consumed.half_units()) + u64::from(new_cost.half_units());
    let can_apply = projected <= u64::from(budget.half_units());
    let remaining_half_units = i64::from(budget.half_units()) - i64::from(consumed.half_units());

    PointsAvailability {
        budget,
        consumed,
        remaining_half_units,
        new_cost,
        can_apply,
    }
}
