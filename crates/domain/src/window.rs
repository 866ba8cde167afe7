// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lottery window computation.
//!
//! Every vacation date has its own window: the span of days during which
//! Level 1/2 submissions are accepted and cancellations recover points.
//! The window lives `months_before` months before the vacation date's
//! month and runs from `start_day` through `end_day` of that month,
//! inclusive. Both days clamp to the target month's length, so a
//! `start_day`/`end_day` of 30/31 still yields a valid window in February.

use crate::error::DomainError;
use crate::settings::LotterySettings;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// A computed lottery window for one vacation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryWindow {
    /// First day of the window (inclusive).
    pub opens: Date,
    /// Last day of the window (inclusive).
    pub closes: Date,
}

impl LotteryWindow {
    /// Returns true if the probe date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.opens && date <= self.closes
    }

    /// Classifies a probe date relative to the window.
    #[must_use]
    pub fn position_of(&self, date: Date) -> WindowPosition {
        if date < self.opens {
            WindowPosition::Before
        } else if date > self.closes {
            WindowPosition::After
        } else {
            WindowPosition::Within
        }
    }
}

/// Position of a probe date relative to a lottery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// The window has not opened yet.
    Before,
    /// Inside the window.
    Within,
    /// The window has closed.
    After,
}

/// Description of the lottery period active around a reference date.
///
/// Reports which vacation month is currently biddable and the bounds of
/// its window within the reference date's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryPeriodInfo {
    /// The window bounds within the reference date's month.
    pub window: LotteryWindow,
    /// Whether the reference date falls inside that window.
    pub is_open: bool,
    /// Calendar year of the vacation month this window serves.
    pub target_year: i32,
    /// Vacation month this window serves.
    pub target_month: Month,
}

/// Computes the lottery window for a vacation date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the shifted month falls
/// outside the supported calendar range.
pub fn lottery_window(
    settings: &LotterySettings,
    vacation_date: Date,
) -> Result<LotteryWindow, DomainError> {
    let (year, month) = shift_months(
        vacation_date.year(),
        vacation_date.month(),
        -i64::from(settings.months_before()),
    )?;

    Ok(LotteryWindow {
        opens: clamped_date(year, month, settings.start_day())?,
        closes: clamped_date(year, month, settings.end_day())?,
    })
}

/// Computes the lottery period active around a reference date.
///
/// The inverse view of [`lottery_window`]: given "today", reports the
/// vacation month whose window overlaps the current month and whether the
/// window is open right now.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the shifted month falls
/// outside the supported calendar range.
pub fn current_period_info(
    settings: &LotterySettings,
    today: Date,
) -> Result<LotteryPeriodInfo, DomainError> {
    let window = LotteryWindow {
        opens: clamped_date(today.year(), today.month(), settings.start_day())?,
        closes: clamped_date(today.year(), today.month(), settings.end_day())?,
    };
    let (target_year, target_month) = shift_months(
        today.year(),
        today.month(),
        i64::from(settings.months_before()),
    )?;

    Ok(LotteryPeriodInfo {
        window,
        is_open: window.contains(today),
        target_year,
        target_month,
    })
}

/// Shifts a (year, month) pair by a signed number of months.
fn shift_months(year: i32, month: Month, delta: i64) -> Result<(i32, Month), DomainError> {
    let zero_based = i64::from(year) * 12 + i64::from(u8::from(month)) - 1 + delta;
    let shifted_year = i32::try_from(zero_based.div_euclid(12)).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("shifting {year}-{month:?} by {delta} months"),
        }
    })?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let month_number = (zero_based.rem_euclid(12) + 1) as u8;
    let shifted_month =
        Month::try_from(month_number).map_err(|_| DomainError::DateArithmeticOverflow {
            operation: format!("shifting {year}-{month:?} by {delta} months"),
        })?;
    Ok((shifted_year, shifted_month))
}

/// Builds a date from year/month and a day clamped to the month's length.
fn clamped_date(year: i32, month: Month, day: u8) -> Result<Date, DomainError> {
    let clamped = day.min(time::util::days_in_month(month, year));
    Date::from_calendar_date(year, month, clamped).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("constructing date {year}-{month:?}-{clamped}"),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fiscal::FiscalYear;

    fn date(year: i32, month: Month, day: u8) -> Date {
        Date::from_calendar_date(year, month, day).unwrap()
    }

    fn settings(months_before: u32, start_day: u8, end_day: u8) -> LotterySettings {
        LotterySettings::new(
            months_before,
            start_day,
            end_day,
            [3, 2, 1],
            20,
            FiscalYear::new(2026),
        )
        .unwrap()
    }

    #[test]
    fn test_window_two_months_before() {
        let s = settings(2, 1, 10);
        let window = lottery_window(&s, date(2026, Month::August, 15)).unwrap();
        assert_eq!(window.opens, date(2026, Month::June, 1));
        assert_eq!(window.closes, date(2026, Month::June, 10));
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let s = settings(3, 5, 20);
        let window = lottery_window(&s, date(2026, Month::February, 1)).unwrap();
        assert_eq!(window.opens, date(2025, Month::November, 5));
        assert_eq!(window.closes, date(2025, Month::November, 20));
    }

    #[test]
    fn test_window_day_clamps_to_short_month() {
        // Window in February: day 30/31 clamps to the 28th.
        let s = settings(1, 28, 31);
        let window = lottery_window(&s, date(2026, Month::March, 10)).unwrap();
        assert_eq!(window.opens, date(2026, Month::February, 28));
        assert_eq!(window.closes, date(2026, Month::February, 28));
    }

    #[test]
    fn test_window_day_clamps_in_leap_february() {
        let s = settings(1, 28, 31);
        let window = lottery_window(&s, date(2028, Month::March, 10)).unwrap();
        assert_eq!(window.closes, date(2028, Month::February, 29));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let s = settings(2, 1, 10);
        let window = lottery_window(&s, date(2026, Month::August, 15)).unwrap();
        assert!(window.contains(date(2026, Month::June, 1)));
        assert!(window.contains(date(2026, Month::June, 10)));
        assert!(!window.contains(date(2026, Month::May, 31)));
        assert!(!window.contains(date(2026, Month::June, 11)));
    }

    #[test]
    fn test_position_classification() {
        let s = settings(2, 1, 10);
        let window = lottery_window(&s, date(2026, Month::August, 15)).unwrap();
        assert_eq!(
            window.position_of(date(2026, Month::May, 20)),
            WindowPosition::Before
        );
        assert_eq!(
            window.position_of(date(2026, Month::June, 5)),
            WindowPosition::Within
        );
        assert_eq!(
            window.position_of(date(2026, Month::July, 1)),
            WindowPosition::After
        );
    }

    #[test]
    fn test_every_date_in_month_shares_one_window() {
        let s = settings(2, 1, 10);
        let first = lottery_window(&s, date(2026, Month::August, 1)).unwrap();
        let last = lottery_window(&s, date(2026, Month::August, 31)).unwrap();
        assert_eq!(first, last);
    }

    #[test]
    fn test_current_period_info_open() {
        let s = settings(2, 1, 10);
        let info = current_period_info(&s, date(2026, Month::June, 5)).unwrap();
        assert!(info.is_open);
        assert_eq!(info.target_year, 2026);
        assert_eq!(info.target_month, Month::August);
        assert_eq!(info.window.opens, date(2026, Month::June, 1));
        assert_eq!(info.window.closes, date(2026, Month::June, 10));
    }

    #[test]
    fn test_current_period_info_closed() {
        let s = settings(2, 1, 10);
        let info = current_period_info(&s, date(2026, Month::June, 15)).unwrap();
        assert!(!info.is_open);
        assert_eq!(info.target_month, Month::August);
    }

    #[test]
    fn test_current_period_crosses_year_forward() {
        let s = settings(2, 1, 10);
        let info = current_period_info(&s, date(2026, Month::November, 3)).unwrap();
        assert!(info.is_open);
        assert_eq!(info.target_year, 2027);
        assert_eq!(info.target_month, Month::January);
    }
}
