// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::EngineError;
use crate::store::LeaveStore;
use crate::tests::helpers::{
    TestEngine, engine_at, seed_application, set_capacity, vacation_date, within_window,
};
use leave_draw_domain::{ApplicationId, ApplicationStatus, CalendarStatus, Level, Period};
use time::Month;

fn ranked_engine(capacity: u32) -> (TestEngine, Vec<ApplicationId>) {
    let mut engine = engine_at(within_window(), 11);
    let mut ids = Vec::new();
    for staff in 1..=3_i64 {
        let priority = u32::try_from(staff).unwrap();
        let id = seed_application(
            &mut engine,
            staff,
            vacation_date(),
            Level::One,
            Period::FullDay,
            ApplicationStatus::AfterLottery,
            Some(priority),
            staff,
        );
        ids.push(id);
    }
    set_capacity(&mut engine, vacation_date(), capacity);
    (engine, ids)
}

fn status_of(engine: &TestEngine, id: ApplicationId) -> ApplicationStatus {
    engine
        .store
        .applications
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.status)
        .unwrap()
}

#[test]
fn test_capacity_cut_confirms_top_priorities() {
    // Three ranked applications against a capacity of two: priorities 1
    // and 2 are confirmed, priority 3 is withdrawn.
    let (mut engine, ids) = ranked_engine(2);

    let (confirmed, withdrawn) = engine.confirm_applications(vacation_date()).unwrap();

    assert_eq!(confirmed, vec![ids[0], ids[1]]);
    assert_eq!(withdrawn, vec![ids[2]]);
    assert_eq!(status_of(&engine, ids[0]), ApplicationStatus::Confirmed);
    assert_eq!(status_of(&engine, ids[1]), ApplicationStatus::Confirmed);
    assert_eq!(status_of(&engine, ids[2]), ApplicationStatus::Withdrawn);

    let day = engine.store.calendar.get(&vacation_date()).unwrap();
    assert_eq!(day.status, CalendarStatus::ConfirmationCompleted);
}

#[test]
fn test_capacity_larger_than_field_confirms_everyone() {
    let (mut engine, ids) = ranked_engine(10);

    let (confirmed, withdrawn) = engine.confirm_applications(vacation_date()).unwrap();

    assert_eq!(confirmed.len(), ids.len());
    assert!(withdrawn.is_empty());
}

#[test]
fn test_missing_capacity_is_configuration_error() {
    let mut engine = engine_at(within_window(), 11);
    seed_application(
        &mut engine,
        1,
        vacation_date(),
        Level::One,
        Period::FullDay,
        ApplicationStatus::AfterLottery,
        Some(1),
        0,
    );

    let result = engine.confirm_applications(vacation_date());
    assert!(matches!(result, Err(EngineError::Configuration { .. })));
}

#[test]
fn test_monthly_confirmation_skips_dates_without_capacity() {
    let (mut engine, _) = ranked_engine(2);
    // A second date with ranked applications but no capacity configured.
    let other = time::Date::from_calendar_date(2026, Month::August, 20).unwrap();
    seed_application(
        &mut engine,
        4,
        other,
        Level::One,
        Period::FullDay,
        ApplicationStatus::AfterLottery,
        Some(1),
        0,
    );
    engine
        .store_mut()
        .set_calendar_status(other, CalendarStatus::AfterLottery)
        .unwrap();

    let summary = engine
        .confirm_all_applications_for_month(2026, Month::August)
        .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_monthly_confirmation_isolates_failures() {
    let (mut engine, _) = ranked_engine(2);
    let failing = time::Date::from_calendar_date(2026, Month::August, 20).unwrap();
    set_capacity(&mut engine, failing, 1);
    engine.store_mut().fail_dates.insert(failing);

    let summary = engine
        .confirm_all_applications_for_month(2026, Month::August)
        .unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_single_confirmation_respects_capacity() {
    let (mut engine, ids) = ranked_engine(1);

    engine.confirm_single_application(ids[0]).unwrap();
    assert_eq!(status_of(&engine, ids[0]), ApplicationStatus::Confirmed);

    // The date is now full.
    let result = engine.confirm_single_application(ids[1]);
    assert!(matches!(result, Err(EngineError::Validation { .. })));
    assert_eq!(status_of(&engine, ids[1]), ApplicationStatus::AfterLottery);
}

#[test]
fn test_single_confirmation_requires_ranked_status() {
    let mut engine = engine_at(within_window(), 11);
    let id = seed_application(
        &mut engine,
        1,
        vacation_date(),
        Level::One,
        Period::FullDay,
        ApplicationStatus::BeforeLottery,
        Some(1),
        0,
    );
    set_capacity(&mut engine, vacation_date(), 2);

    let result = engine.confirm_single_application(id);
    assert!(matches!(result, Err(EngineError::InvalidState { .. })));
}

#[test]
fn test_single_confirmation_unknown_application() {
    let mut engine = engine_at(within_window(), 11);
    let result = engine.confirm_single_application(ApplicationId::new(404));
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}

#[test]
fn test_cancel_confirmation_reverts_application_and_date() {
    let (mut engine, ids) = ranked_engine(1);
    engine.confirm_applications(vacation_date()).unwrap();

    engine.cancel_confirmation(ids[0]).unwrap();

    let application = engine
        .store
        .applications
        .iter()
        .find(|a| a.id == ids[0])
        .unwrap();
    assert_eq!(application.status, ApplicationStatus::AfterLottery);
    // The priority survives revocation.
    assert_eq!(application.priority, Some(1));

    // No confirmed applications remain, so the date reopens.
    let day = engine.store.calendar.get(&vacation_date()).unwrap();
    assert_eq!(day.status, CalendarStatus::AfterLottery);
}

#[test]
fn test_cancel_confirmation_keeps_date_closed_while_others_confirmed() {
    let (mut engine, ids) = ranked_engine(2);
    engine.confirm_applications(vacation_date()).unwrap();

    engine.cancel_confirmation(ids[0]).unwrap();

    let day = engine.store.calendar.get(&vacation_date()).unwrap();
    assert_eq!(day.status, CalendarStatus::ConfirmationCompleted);
}

#[test]
fn test_cancel_confirmation_requires_confirmed_status() {
    let (mut engine, ids) = ranked_engine(2);
    let result = engine.cancel_confirmation(ids[0]);
    assert!(matches!(result, Err(EngineError::InvalidState { .. })));
}
