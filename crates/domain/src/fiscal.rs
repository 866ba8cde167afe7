// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fiscal year arithmetic.
//!
//! Point budgets accrue and reset over the April 1 – March 31 fiscal year.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// A fiscal year, labeled by the calendar year in which it starts.
///
/// Fiscal year 2026 spans 2026-04-01 through 2027-03-31.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FiscalYear(i32);

impl FiscalYear {
    /// Creates a fiscal year labeled by its starting calendar year.
    #[must_use]
    pub const fn new(starting_year: i32) -> Self {
        Self(starting_year)
    }

    /// Returns the fiscal year containing the given date.
    #[must_use]
    pub const fn containing(date: Date) -> Self {
        let year = date.year();
        match date.month() {
            Month::January | Month::February | Month::March => Self(year - 1),
            _ => Self(year),
        }
    }

    /// Returns the starting calendar year label.
    #[must_use]
    pub const fn starting_year(self) -> i32 {
        self.0
    }

    /// Returns the first day of the fiscal year (April 1).
    ///
    /// # Panics
    ///
    /// Does not panic: April 1 exists in every calendar year.
    #[must_use]
    pub fn start(self) -> Date {
        Date::from_calendar_date(self.0, Month::April, 1)
            .unwrap_or(Date::MIN)
    }

    /// Returns the last day of the fiscal year (March 31 of the next year).
    #[must_use]
    pub fn end(self) -> Date {
        Date::from_calendar_date(self.0 + 1, Month::March, 31)
            .unwrap_or(Date::MAX)
    }

    /// Returns true if the date falls inside this fiscal year.
    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        date >= self.start() && date <= self.end()
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.0)
    }
}
