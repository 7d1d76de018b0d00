// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler-level tests for the staff workflow: one full walk from
//! booking to closed, plus the error translations callers see.

use time::OffsetDateTime;
use vhc_flow_store::MemoryStore;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    AssignTechnicianRequest, CancelRequest, CloseRequest, CompleteCheckInRequest,
    CompleteInspectionRequest, MriResultInput, PublishRequest, RecordDecisionRequest,
    RecordOpenRequest, SetItemCostsRequest, SkipCheckInRequest,
};

use super::helpers::{
    FixedTokenIssuer, RecordingDispatcher, create_request, create_test_admin,
    create_test_advisor, create_test_cause, create_test_technician, dec, drive_to_ready,
    drive_to_sent,
};

#[test]
fn test_full_lifecycle_from_booking_to_closed() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();
    let technician = create_test_technician();

    let created = handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(created.status, "awaiting_arrival");

    let response =
        handlers::record_arrival(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "awaiting_checkin");

    // One amber MRI answer raises repair item 1 priced at 100.00
    let response = handlers::complete_check_in(
        &mut store,
        CompleteCheckInRequest {
            health_check_id: 1,
            mileage: Some(42_150),
            mri_results: vec![MriResultInput {
                description: String::from("Front brake pads worn"),
                rag: Some(String::from("amber")),
                price: Some(dec("100.00")),
            }],
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "created");

    let response = handlers::assign_technician(
        &mut store,
        AssignTechnicianRequest {
            health_check_id: 1,
            technician: String::from("Taylor Tech"),
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "assigned");

    let response =
        handlers::start_inspection(&mut store, 1, &technician, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "in_progress");

    let response =
        handlers::pause_inspection(&mut store, 1, &technician, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "paused");

    let response =
        handlers::resume_inspection(&mut store, 1, &technician, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "in_progress");

    let response = handlers::complete_inspection(
        &mut store,
        CompleteInspectionRequest {
            health_check_id: 1,
            results: vec![],
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "tech_completed");

    let response =
        handlers::start_review(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "awaiting_review");

    // The first pricing write during review advances to awaiting_pricing
    let response = handlers::set_item_costs(
        &mut store,
        &SetItemCostsRequest {
            health_check_id: 1,
            repair_item_id: 1,
            child_id: None,
            parts_cost: dec("40.00"),
            labour_cost: dec("60.00"),
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "awaiting_pricing");

    let response =
        handlers::mark_ready(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "ready_to_send");

    let mut issuer = FixedTokenIssuer::new("vhc_fixed_token");
    let mut dispatcher = RecordingDispatcher::default();
    let published = handlers::publish(
        &mut store,
        &mut issuer,
        &mut dispatcher,
        &PublishRequest {
            health_check_id: 1,
            send_email: true,
            send_sms: true,
            validity_days: 7,
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(published.status, "sent");
    assert_eq!(published.token, "vhc_fixed_token");
    assert!(published.delivery_failures.is_empty());
    assert_eq!(dispatcher.emails, vec![String::from("jo@example.com")]);
    assert_eq!(dispatcher.texts, vec![String::from("07700900123")]);

    let response = handlers::record_open(
        &mut store,
        RecordOpenRequest {
            health_check_id: 1,
            token: String::from("vhc_fixed_token"),
        },
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "opened");

    // The only decidable item approved: the response status is authorized
    let decided = handlers::record_decision(
        &mut store,
        RecordDecisionRequest {
            health_check_id: 1,
            token: String::from("vhc_fixed_token"),
            repair_item_id: 1,
            decision: String::from("approved"),
            notes: None,
            signature: Some(String::from("Jo Customer")),
        },
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(decided.status, "authorized");
    assert_eq!(decided.decision, "approved");

    handlers::mark_labour_complete(
        &mut store,
        1,
        1,
        None,
        String::from("Taylor Tech"),
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::mark_parts_complete(
        &mut store,
        1,
        1,
        None,
        String::from("Pat Parts"),
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();

    let response =
        handlers::mark_completed(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "completed");

    let response = handlers::close(
        &mut store,
        CloseRequest {
            health_check_id: 1,
            closed_by: String::from("advisor-17"),
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(response.status, "closed");
}

#[test]
fn test_version_increases_with_every_mutation() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();

    let first =
        handlers::record_arrival(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    let second = handlers::skip_check_in(
        &mut store,
        SkipCheckInRequest {
            health_check_id: 1,
            reason: String::from("Fleet vehicle, no walkaround"),
        },
        &create_test_admin(),
        create_test_cause(),
        now,
    )
    .unwrap();

    assert!(second.version > first.version);
}

#[test]
fn test_create_rejects_duplicate_id() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    let result = handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    );

    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_create_rejects_blank_vehicle_reg() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    let mut request = create_request(1);
    request.vehicle_reg = String::from("   ");
    let result =
        handlers::create_health_check(&mut store, request, &advisor, create_test_cause(), now);

    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_mutation_on_missing_health_check_is_not_found() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    let result = handlers::record_arrival(&mut store, 99, &advisor, create_test_cause(), now);

    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_out_of_order_transition_is_rejected() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();

    // Inspection cannot start before arrival, check-in, and assignment
    let result = handlers::start_inspection(&mut store, 1, &advisor, create_test_cause(), now);

    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_mark_completed_blocked_while_work_outstanding() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    drive_to_sent(&mut store, 1, "vhc_fixed_token", now);
    handlers::record_decision(
        &mut store,
        RecordDecisionRequest {
            health_check_id: 1,
            token: String::from("vhc_fixed_token"),
            repair_item_id: 1,
            decision: String::from("approved"),
            notes: None,
            signature: None,
        },
        create_test_cause(),
        now,
    )
    .unwrap();

    // Authorised work has not been marked done yet
    let result = handlers::mark_completed(&mut store, 1, &advisor, create_test_cause(), now);
    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));

    handlers::mark_labour_complete(
        &mut store,
        1,
        1,
        None,
        String::from("Taylor Tech"),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::set_no_parts_required(
        &mut store,
        1,
        1,
        None,
        true,
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();

    let response =
        handlers::mark_completed(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(response.status, "completed");
}

#[test]
fn test_cancel_and_no_show_paths() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    handlers::create_health_check(
        &mut store,
        create_request(1),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    let cancelled = handlers::cancel(
        &mut store,
        CancelRequest {
            health_check_id: 1,
            reason: String::from("Customer rang to cancel"),
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    assert_eq!(cancelled.status, "cancelled");

    handlers::create_health_check(
        &mut store,
        create_request(2),
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    let no_show =
        handlers::mark_no_show(&mut store, 2, &advisor, create_test_cause(), now).unwrap();
    assert_eq!(no_show.status, "no_show");

    // Terminal statuses accept no further commands
    let result = handlers::record_arrival(&mut store, 2, &advisor, create_test_cause(), now);
    assert!(result.is_err());
    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_overview_read_does_not_bump_version() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    drive_to_ready(&mut store, 1, now);
    let before = handlers::get_health_check_overview(&mut store, 1, &advisor)
        .unwrap()
        .health_check
        .version;
    let after = handlers::get_health_check_overview(&mut store, 1, &advisor)
        .unwrap()
        .health_check
        .version;

    assert_eq!(before, after);
}
