// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use leave_draw::{LeaveStore, NewApplication};
use leave_draw_domain::{
    Application, ApplicationStatus, Level, Period, StaffId,
};
use time::macros::datetime;
use time::{Date, Month};

/// Creates an in-memory store with retention rate 100 for staff 1-10.
pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for staff in 1..=10 {
        persistence
            .set_retention_rate(StaffId::new(staff), 100)
            .unwrap();
    }
    persistence
}

/// August 15, 2026; its lottery window under test settings is June 1-10.
pub fn create_test_vacation_date() -> Date {
    Date::from_calendar_date(2026, Month::August, 15).expect("Valid test date")
}

/// Inserts an application row directly through the store trait.
pub fn insert_test_application(
    persistence: &mut Persistence,
    staff: i64,
    date: Date,
    level: Level,
    status: ApplicationStatus,
    priority: Option<u32>,
    minute: i64,
) -> Application {
    persistence
        .insert_application(&NewApplication {
            staff_id: StaffId::new(staff),
            vacation_date: date,
            period: Period::FullDay,
            level,
            is_within_lottery_period: level != Level::Three,
            status,
            priority,
            applied_at: datetime!(2026-06-01 08:00 UTC) + time::Duration::minutes(minute),
            remarks: None,
        })
        .unwrap()
}
