// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::engine::LeaveEngine;
use crate::store::{LeaveStore, NewApplication, StoreError};
use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CalendarDay, CalendarStatus,
    CancellationRequest, CancellationRequestId, CancellationRequestStatus, DrawPosition,
    FiscalYear, LotterySettings, StaffId,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap, HashSet};
use time::macros::datetime;
use time::{Date, Month, OffsetDateTime};

pub type TestEngine = LeaveEngine<MemoryStore, StdRng, FixedClock>;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// In-memory store. `fail_dates` makes the transactional batch methods
/// fail for specific dates so batch isolation can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub applications: Vec<Application>,
    pub calendar: BTreeMap<Date, CalendarDay>,
    pub requests: Vec<CancellationRequest>,
    pub retention_rates: HashMap<StaffId, u32>,
    pub non_working: Vec<Date>,
    pub fail_dates: HashSet<Date>,
    next_application_id: i64,
    next_request_id: i64,
}

impl MemoryStore {
    fn check_failure(&self, date: Date) -> Result<(), StoreError> {
        if self.fail_dates.contains(&date) {
            return Err(StoreError::Backend(format!("injected failure for {date}")));
        }
        Ok(())
    }

    fn upsert_calendar_status(&mut self, date: Date, status: CalendarStatus) {
        self.calendar
            .entry(date)
            .and_modify(|day| day.status = status)
            .or_insert(CalendarDay {
                vacation_date: date,
                max_people: None,
                status,
            });
    }

    fn application_mut(&mut self, id: ApplicationId) -> Result<&mut Application, StoreError> {
        self.applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::Backend(format!("no application {id}")))
    }
}

impl LeaveStore for MemoryStore {
    fn application(&mut self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(self.applications.iter().find(|a| a.id == id).cloned())
    }

    fn applications_for_date(&mut self, date: Date) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|a| a.vacation_date == date)
            .cloned()
            .collect())
    }

    fn applications_for_staff_between(
        &mut self,
        staff_id: StaffId,
        from: Date,
        to: Date,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|a| {
                a.staff_id == staff_id && a.vacation_date >= from && a.vacation_date <= to
            })
            .cloned()
            .collect())
    }

    fn insert_application(
        &mut self,
        application: &NewApplication,
    ) -> Result<Application, StoreError> {
        self.next_application_id += 1;
        let stored = Application {
            id: ApplicationId::new(self.next_application_id),
            staff_id: application.staff_id,
            vacation_date: application.vacation_date,
            period: application.period,
            level: application.level,
            is_within_lottery_period: application.is_within_lottery_period,
            status: application.status,
            priority: application.priority,
            applied_at: application.applied_at,
            remarks: application.remarks.clone(),
        };
        self.applications.push(stored.clone());
        Ok(stored)
    }

    fn apply_draw(&mut self, date: Date, positions: &[DrawPosition]) -> Result<(), StoreError> {
        self.check_failure(date)?;
        for position in positions {
            let application = self.application_mut(position.application_id)?;
            application.status = ApplicationStatus::AfterLottery;
            application.priority = Some(position.priority);
        }
        self.upsert_calendar_status(date, CalendarStatus::AfterLottery);
        Ok(())
    }

    fn apply_confirmation(
        &mut self,
        date: Date,
        confirmed: &[ApplicationId],
        withdrawn: &[ApplicationId],
    ) -> Result<(), StoreError> {
        self.check_failure(date)?;
        for id in confirmed {
            self.application_mut(*id)?.status = ApplicationStatus::Confirmed;
        }
        for id in withdrawn {
            let application = self.application_mut(*id)?;
            application.status = ApplicationStatus::Withdrawn;
            application.priority = None;
        }
        self.upsert_calendar_status(date, CalendarStatus::ConfirmationCompleted);
        Ok(())
    }

    fn set_application_state(
        &mut self,
        id: ApplicationId,
        status: ApplicationStatus,
        priority: Option<u32>,
    ) -> Result<(), StoreError> {
        let application = self.application_mut(id)?;
        application.status = status;
        application.priority = priority;
        Ok(())
    }

    fn apply_priorities(
        &mut self,
        date: Date,
        assignments: &[(ApplicationId, u32)],
    ) -> Result<(), StoreError> {
        self.check_failure(date)?;
        for (id, priority) in assignments {
            self.application_mut(*id)?.priority = Some(*priority);
        }
        Ok(())
    }

    fn confirm_if_capacity(
        &mut self,
        id: ApplicationId,
        date: Date,
        max_people: u32,
    ) -> Result<bool, StoreError> {
        let confirmed = self
            .applications
            .iter()
            .filter(|a| a.vacation_date == date && a.status == ApplicationStatus::Confirmed)
            .count();
        if confirmed >= usize::try_from(max_people).unwrap_or(usize::MAX) {
            return Ok(false);
        }
        self.application_mut(id)?.status = ApplicationStatus::Confirmed;
        Ok(true)
    }

    fn calendar_day(&mut self, date: Date) -> Result<Option<CalendarDay>, StoreError> {
        Ok(self.calendar.get(&date).cloned())
    }

    fn calendar_days_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<CalendarDay>, StoreError> {
        Ok(self
            .calendar
            .values()
            .filter(|d| d.vacation_date.year() == year && d.vacation_date.month() == month)
            .cloned()
            .collect())
    }

    fn set_calendar_status(
        &mut self,
        date: Date,
        status: CalendarStatus,
    ) -> Result<(), StoreError> {
        self.upsert_calendar_status(date, status);
        Ok(())
    }

    fn insert_cancellation_request(
        &mut self,
        application_id: ApplicationId,
        requested_at: OffsetDateTime,
    ) -> Result<CancellationRequest, StoreError> {
        self.next_request_id += 1;
        let request = CancellationRequest {
            id: CancellationRequestId::new(self.next_request_id),
            application_id,
            status: CancellationRequestStatus::Pending,
            reviewer: None,
            comment: None,
            requested_at,
            resolved_at: None,
        };
        self.requests.push(request.clone());
        Ok(request)
    }

    fn cancellation_request(
        &mut self,
        id: CancellationRequestId,
    ) -> Result<Option<CancellationRequest>, StoreError> {
        Ok(self.requests.iter().find(|r| r.id == id).cloned())
    }

    fn resolve_cancellation_request(
        &mut self,
        id: CancellationRequestId,
        status: CancellationRequestStatus,
        reviewer: StaffId,
        comment: Option<String>,
        resolved_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::Backend(format!("no cancellation request {id}")))?;
        request.status = status;
        request.reviewer = Some(reviewer);
        request.comment = comment;
        request.resolved_at = Some(resolved_at);
        Ok(())
    }

    fn retention_rate(&mut self, staff_id: StaffId) -> Result<Option<u32>, StoreError> {
        Ok(self.retention_rates.get(&staff_id).copied())
    }

    fn non_working_dates_in_month(
        &mut self,
        year: i32,
        month: Month,
    ) -> Result<Vec<Date>, StoreError> {
        Ok(self
            .non_working
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .copied()
            .collect())
    }
}

/// Settings shared by most tests: the window for an August vacation date
/// is June 1 through June 10, level costs are 3/2/1, and the ceiling is
/// 20 points in fiscal 2026.
pub fn test_settings() -> LotterySettings {
    LotterySettings::new(2, 1, 10, [3, 2, 1], 20, FiscalYear::new(2026))
        .unwrap_or_else(|e| panic!("test settings should be valid: {e}"))
}

/// A vacation date whose lottery window is June 1-10, 2026.
pub fn vacation_date() -> Date {
    Date::from_calendar_date(2026, Month::August, 15).expect("valid date")
}

/// An instant inside the [`vacation_date`] lottery window.
pub fn within_window() -> OffsetDateTime {
    datetime!(2026-06-05 09:00 UTC)
}

/// An instant after the [`vacation_date`] lottery window has closed.
pub fn after_window() -> OffsetDateTime {
    datetime!(2026-07-01 09:00 UTC)
}

/// Builds an engine over a fresh in-memory store with retention rate 100
/// seeded for staff IDs 1 through 10.
pub fn engine_at(now: OffsetDateTime, seed: u64) -> TestEngine {
    let mut store = MemoryStore::default();
    for staff in 1..=10 {
        store.retention_rates.insert(StaffId::new(staff), 100);
    }
    LeaveEngine::new(store, StdRng::seed_from_u64(seed), FixedClock(now), test_settings())
}

/// Inserts an application row directly, bypassing submission checks.
#[allow(clippy::too_many_arguments)]
pub fn seed_application(
    engine: &mut TestEngine,
    staff: i64,
    date: Date,
    level: leave_draw_domain::Level,
    period: leave_draw_domain::Period,
    status: ApplicationStatus,
    priority: Option<u32>,
    minute: i64,
) -> ApplicationId {
    let stored = engine
        .store_mut()
        .insert_application(&NewApplication {
            staff_id: StaffId::new(staff),
            vacation_date: date,
            period,
            level,
            is_within_lottery_period: level != leave_draw_domain::Level::Three,
            status,
            priority,
            applied_at: datetime!(2026-06-01 08:00 UTC) + time::Duration::minutes(minute),
            remarks: None,
        })
        .unwrap_or_else(|e| panic!("seeding application should succeed: {e}"));
    stored.id
}

/// Configures a capacity for a date in the engine's store.
pub fn set_capacity(engine: &mut TestEngine, date: Date, max_people: u32) {
    let day = engine
        .store_mut()
        .calendar
        .entry(date)
        .or_insert(CalendarDay {
            vacation_date: date,
            max_people: None,
            status: CalendarStatus::BeforeLottery,
        });
    day.max_people = Some(max_people);
}
