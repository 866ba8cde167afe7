// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cancellation::CancellationOutcome;
use crate::error::EngineError;
use crate::tests::helpers::{
    FixedClock, TestEngine, after_window, engine_at, seed_application, vacation_date,
    within_window,
};
use leave_draw_domain::{
    Application, ApplicationId, ApplicationStatus, CancellationRequestStatus, Level, Period,
    StaffId,
};

const REVIEWER: StaffId = StaffId::new(900);

fn application_of(engine: &TestEngine, id: ApplicationId) -> Application {
    engine
        .store
        .applications
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .unwrap()
}

fn seeded(status: ApplicationStatus, priority: Option<u32>) -> (TestEngine, ApplicationId) {
    let mut engine = engine_at(within_window(), 17);
    let id = seed_application(
        &mut engine,
        1,
        vacation_date(),
        Level::One,
        Period::FullDay,
        status,
        priority,
        0,
    );
    (engine, id)
}

#[test]
fn test_within_window_cancellation_is_immediate_with_refund() {
    let (mut engine, id) = seeded(ApplicationStatus::BeforeLottery, Some(1));

    let outcome = engine.request_cancellation(id).unwrap();

    assert_eq!(
        outcome,
        CancellationOutcome {
            requires_approval: false,
            points_will_recover: true,
        }
    );
    let application = application_of(&engine, id);
    assert_eq!(application.status, ApplicationStatus::CancelledBeforeLottery);
    assert_eq!(application.priority, None);
    assert!(engine.store.requests.is_empty());
}

#[test]
fn test_after_lottery_outside_window_cancels_without_refund() {
    let (mut engine, id) = seeded(ApplicationStatus::AfterLottery, Some(1));
    engine.clock = FixedClock(after_window());

    let outcome = engine.request_cancellation(id).unwrap();

    assert_eq!(
        outcome,
        CancellationOutcome {
            requires_approval: false,
            points_will_recover: false,
        }
    );
    let application = application_of(&engine, id);
    assert_eq!(application.status, ApplicationStatus::CancelledAfterLottery);
    assert_eq!(application.priority, None);
    assert!(engine.store.requests.is_empty());
}

#[test]
fn test_before_lottery_outside_window_defers_to_review() {
    let (mut engine, id) = seeded(ApplicationStatus::BeforeLottery, Some(1));
    engine.clock = FixedClock(after_window());

    let outcome = engine.request_cancellation(id).unwrap();

    assert_eq!(
        outcome,
        CancellationOutcome {
            requires_approval: true,
            points_will_recover: true,
        }
    );
    let application = application_of(&engine, id);
    assert_eq!(application.status, ApplicationStatus::PendingCancellation);
    // The slot is not vacated until the request is decided.
    assert_eq!(application.priority, Some(1));

    assert_eq!(engine.store.requests.len(), 1);
    assert_eq!(
        engine.store.requests[0].status,
        CancellationRequestStatus::Pending
    );
    assert_eq!(engine.store.requests[0].application_id, id);
}

#[test]
fn test_confirmed_application_rejects_this_path() {
    let (mut engine, id) = seeded(ApplicationStatus::Confirmed, Some(1));
    let result = engine.request_cancellation(id);
    assert!(matches!(result, Err(EngineError::InvalidState { .. })));
}

#[test]
fn test_terminal_application_rejects_cancellation() {
    let (mut engine, id) = seeded(ApplicationStatus::CancelledBeforeLottery, None);
    let result = engine.request_cancellation(id);
    assert!(matches!(result, Err(EngineError::InvalidState { .. })));
}

#[test]
fn test_unknown_application_is_not_found() {
    let mut engine = engine_at(within_window(), 17);
    let result = engine.request_cancellation(ApplicationId::new(404));
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}

#[test]
fn test_immediate_cancellation_renumbers_remaining() {
    let mut engine = engine_at(within_window(), 17);
    let mut ids = Vec::new();
    for staff in 1..=3_i64 {
        let id = seed_application(
            &mut engine,
            staff,
            vacation_date(),
            Level::One,
            Period::FullDay,
            ApplicationStatus::BeforeLottery,
            Some(u32::try_from(staff).unwrap()),
            staff,
        );
        ids.push(id);
    }

    // Cancelling the middle priority closes the gap: 1,3 -> 1,2.
    engine.request_cancellation(ids[1]).unwrap();

    assert_eq!(application_of(&engine, ids[0]).priority, Some(1));
    assert_eq!(application_of(&engine, ids[2]).priority, Some(2));
}

#[test]
fn test_approval_cancels_and_renumbers() {
    let mut engine = engine_at(within_window(), 17);
    let first = seed_application(
        &mut engine,
        1,
        vacation_date(),
        Level::One,
        Period::FullDay,
        ApplicationStatus::BeforeLottery,
        Some(1),
        0,
    );
    let second = seed_application(
        &mut engine,
        2,
        vacation_date(),
        Level::One,
        Period::FullDay,
        ApplicationStatus::BeforeLottery,
        Some(2),
        1,
    );
    engine.clock = FixedClock(after_window());
    engine.request_cancellation(first).unwrap();
    let request_id = engine.store.requests[0].id;

    engine.approve_cancellation(request_id, REVIEWER).unwrap();

    let application = application_of(&engine, first);
    assert_eq!(application.status, ApplicationStatus::CancelledBeforeLottery);
    assert_eq!(application.priority, None);
    // The survivor moves up to fill the vacated slot.
    assert_eq!(application_of(&engine, second).priority, Some(1));

    let request = &engine.store.requests[0];
    assert_eq!(request.status, CancellationRequestStatus::Approved);
    assert_eq!(request.reviewer, Some(REVIEWER));
    assert!(request.resolved_at.is_some());
}

#[test]
fn test_rejection_restores_application() {
    let (mut engine, id) = seeded(ApplicationStatus::BeforeLottery, Some(1));
    engine.clock = FixedClock(after_window());
    engine.request_cancellation(id).unwrap();
    let request_id = engine.store.requests[0].id;

    engine
        .reject_cancellation(request_id, REVIEWER, Some(String::from("short-staffed")))
        .unwrap();

    let application = application_of(&engine, id);
    assert_eq!(application.status, ApplicationStatus::BeforeLottery);
    assert_eq!(application.priority, Some(1));

    let request = &engine.store.requests[0];
    assert_eq!(request.status, CancellationRequestStatus::Rejected);
    assert_eq!(request.comment.as_deref(), Some("short-staffed"));
}

#[test]
fn test_resolved_request_cannot_be_decided_again() {
    let (mut engine, id) = seeded(ApplicationStatus::BeforeLottery, Some(1));
    engine.clock = FixedClock(after_window());
    engine.request_cancellation(id).unwrap();
    let request_id = engine.store.requests[0].id;
    engine.approve_cancellation(request_id, REVIEWER).unwrap();

    let approve_again = engine.approve_cancellation(request_id, REVIEWER);
    assert!(matches!(approve_again, Err(EngineError::InvalidState { .. })));

    let reject_after = engine.reject_cancellation(request_id, REVIEWER, None);
    assert!(matches!(reject_after, Err(EngineError::InvalidState { .. })));
}

#[test]
fn test_unknown_request_is_not_found() {
    let mut engine = engine_at(within_window(), 17);
    let result = engine.approve_cancellation(leave_draw_domain::CancellationRequestId::new(404), REVIEWER);
    assert!(matches!(result, Err(EngineError::NotFound { .. })));
}
