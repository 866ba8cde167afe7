// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organization-wide lottery settings.
//!
//! Settings are validated once at construction and injected into the
//! engine as an immutable value. The engine never re-fetches them mid
//! operation, so every decision within one request sees one consistent
//! configuration.

use crate::error::DomainError;
use crate::fiscal::FiscalYear;
use crate::types::Level;
use serde::{Deserialize, Serialize};

/// Immutable organization-wide configuration for the allocation engine.
///
/// The window geometry fields describe, for any vacation date, the span of
/// days during which lottery-eligible submission and refundable
/// cancellation are possible: the window lives `months_before` months
/// before the vacation date's month and runs from `start_day` through
/// `end_day` of that month (inclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotterySettings {
    months_before: u32,
    start_day: u8,
    end_day: u8,
    level1_cost: u32,
    level2_cost: u32,
    level3_cost: u32,
    max_annual_points: u32,
    fiscal_year: FiscalYear,
}

impl LotterySettings {
    /// Creates validated lottery settings.
    ///
    /// # Arguments
    ///
    /// * `months_before` - How many months before a vacation date's month
    ///   its window opens
    /// * `start_day` / `end_day` - Day-of-month span of the window
    /// * `level_costs` - Whole-point cost per level `[level1, level2, level3]`
    /// * `max_annual_points` - Organization-wide annual point ceiling
    /// * `fiscal_year` - The fiscal year currently in effect
    ///
    /// # Errors
    ///
    /// Returns an error if the day span is empty or out of range, or if any
    /// level cost is zero.
    pub fn new(
        months_before: u32,
        start_day: u8,
        end_day: u8,
        level_costs: [u32; 3],
        max_annual_points: u32,
        fiscal_year: FiscalYear,
    ) -> Result<Self, DomainError> {
        if start_day == 0 || end_day > 31 {
            return Err(DomainError::InvalidWindowGeometry {
                reason: format!("day span {start_day}..={end_day} must lie within 1..=31"),
            });
        }
        if start_day > end_day {
            return Err(DomainError::InvalidWindowGeometry {
                reason: format!("start day {start_day} is after end day {end_day}"),
            });
        }
        for (index, cost) in level_costs.iter().enumerate() {
            if *cost == 0 {
                #[allow(clippy::cast_possible_truncation)]
                return Err(DomainError::InvalidPointCost {
                    level: index as u8 + 1,
                });
            }
        }

        Ok(Self {
            months_before,
            start_day,
            end_day,
            level1_cost: level_costs[0],
            level2_cost: level_costs[1],
            level3_cost: level_costs[2],
            max_annual_points,
            fiscal_year,
        })
    }

    /// Months between a vacation date's month and its window month.
    #[must_use]
    pub const fn months_before(&self) -> u32 {
        self.months_before
    }

    /// First day-of-month of the window.
    #[must_use]
    pub const fn start_day(&self) -> u8 {
        self.start_day
    }

    /// Last day-of-month of the window (inclusive).
    #[must_use]
    pub const fn end_day(&self) -> u8 {
        self.end_day
    }

    /// Whole-point cost of one full-day application at the given level.
    #[must_use]
    pub const fn cost_for(&self, level: Level) -> u32 {
        match level {
            Level::One => self.level1_cost,
            Level::Two => self.level2_cost,
            Level::Three => self.level3_cost,
        }
    }

    /// Organization-wide annual point ceiling before retention scaling.
    #[must_use]
    pub const fn max_annual_points(&self) -> u32 {
        self.max_annual_points
    }

    /// The fiscal year currently in effect.
    #[must_use]
    pub const fn fiscal_year(&self) -> FiscalYear {
        self.fiscal_year
    }
}
