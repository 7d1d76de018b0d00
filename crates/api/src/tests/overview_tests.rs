// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overview read tests: the assembled screen of record, its derived
//! badges and summaries, and the soft-delete filtering.

use time::OffsetDateTime;
use vhc_flow_store::MemoryStore;

use crate::handlers;
use crate::request_response::{
    AddChildItemRequest, DeleteRepairItemRequest, RecordDecisionRequest, SetItemCostsRequest,
    SkipCheckInRequest,
};

use super::helpers::{
    create_request, create_test_admin, create_test_advisor, create_test_cause,
    create_test_technician, dec, drive_to_ready, drive_to_sent, raise_priced_item,
};

#[test]
fn test_overview_reflects_the_full_walk() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();
    let technician = create_test_technician();

    drive_to_sent(&mut store, 1, "vhc_token", now);
    handlers::record_decision(
        &mut store,
        RecordDecisionRequest {
            health_check_id: 1,
            token: String::from("vhc_token"),
            repair_item_id: 1,
            decision: String::from("approved"),
            notes: None,
            signature: None,
        },
        create_test_cause(),
        now,
    )
    .unwrap();
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

    let overview = handlers::get_health_check_overview(&mut store, 1, &advisor).unwrap();

    assert_eq!(overview.health_check.vehicle_reg, "AB26 CDE");
    assert_eq!(overview.health_check.mileage, Some(42_150));
    assert_eq!(overview.health_check.status, "authorized");
    assert_eq!(overview.health_check.amount_total, dec("100.00"));

    assert_eq!(overview.workflow.technician.state, "complete");
    assert_eq!(
        overview.workflow.technician.completed_by.as_deref(),
        Some("Taylor Tech")
    );
    assert_eq!(overview.workflow.labour.state, "complete");
    assert_eq!(
        overview.workflow.labour.completed_by.as_deref(),
        Some("Taylor Tech")
    );
    assert_eq!(overview.workflow.parts.state, "complete");
    assert_eq!(
        overview.workflow.parts.completed_by.as_deref(),
        Some("Pat Parts")
    );
    assert_eq!(overview.workflow.authorisation.state, "complete");

    assert_eq!(overview.financial.total_identified, dec("100.00"));
    assert_eq!(overview.financial.total_authorised, dec("100.00"));
    assert_eq!(overview.financial.total_declined, dec("0.00"));
    assert_eq!(overview.financial.total_pending, dec("0.00"));
    assert_eq!(overview.financial.completed_value, dec("100.00"));
    assert_eq!(overview.financial.outstanding_value, dec("0.00"));

    assert_eq!(overview.mri.amber, 1);
    assert_eq!(overview.mri.red, 0);
    assert_eq!(overview.mri.unanswered, 0);

    assert_eq!(overview.repair_items.len(), 1);
    let item = &overview.repair_items[0];
    assert_eq!(item.title, "Front brake pads worn");
    assert_eq!(item.decision.as_deref(), Some("approved"));
    assert_eq!(item.effective_total, dec("100.00"));

    // Oldest first, staff and customer both attributed
    let first = &overview.timeline[0];
    assert_eq!(first.action, "CreateHealthCheck");
    assert_eq!(first.actor_type, "advisor");
    assert_eq!(first.before_status, "health_check_does_not_exist");

    let decision_event = overview
        .timeline
        .iter()
        .find(|event| event.action == "RecordDecision")
        .unwrap();
    assert_eq!(decision_event.actor_type, "customer");
    assert_eq!(decision_event.actor_id, "Jo Customer");
}

#[test]
fn test_mri_summary_degrades_when_checkin_is_skipped() {
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
    handlers::record_arrival(&mut store, 1, &advisor, create_test_cause(), now).unwrap();
    handlers::skip_check_in(
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

    let overview = handlers::get_health_check_overview(&mut store, 1, &advisor).unwrap();

    assert_eq!(overview.health_check.status, "created");
    assert_eq!(overview.health_check.mileage, None);
    assert_eq!(overview.mri.red, 0);
    assert_eq!(overview.mri.amber, 0);
    assert_eq!(overview.mri.green, 0);
    assert_eq!(overview.mri.unanswered, 0);
    assert!(overview.repair_items.is_empty());
}

#[test]
fn test_deleted_items_leave_the_overview_and_the_totals() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();

    drive_to_ready(&mut store, 1, now);
    let doomed = raise_priced_item(&mut store, 1, "Wiper blades", "50.00", now);

    let overview = handlers::get_health_check_overview(&mut store, 1, &advisor).unwrap();
    assert_eq!(overview.repair_items.len(), 2);
    assert_eq!(overview.financial.total_identified, dec("150.00"));

    handlers::delete_repair_item(
        &mut store,
        &DeleteRepairItemRequest {
            health_check_id: 1,
            repair_item_id: doomed,
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();

    let overview = handlers::get_health_check_overview(&mut store, 1, &advisor).unwrap();
    assert_eq!(overview.repair_items.len(), 1);
    assert_eq!(overview.financial.total_identified, dec("100.00"));
}

#[test]
fn test_overview_groups_children_under_their_item() {
    let mut store = MemoryStore::new();
    let now = OffsetDateTime::now_utc();
    let advisor = create_test_advisor();
    let technician = create_test_technician();

    drive_to_ready(&mut store, 1, now);
    let child = handlers::add_child_item(
        &mut store,
        AddChildItemRequest {
            health_check_id: 1,
            repair_item_id: 1,
            title: String::from("Offside caliper"),
            severity: String::from("red"),
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::set_item_costs(
        &mut store,
        &SetItemCostsRequest {
            health_check_id: 1,
            repair_item_id: 1,
            child_id: Some(child.child_id),
            parts_cost: dec("25.00"),
            labour_cost: dec("0.00"),
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();

    let overview = handlers::get_health_check_overview(&mut store, 1, &advisor).unwrap();

    let item = &overview.repair_items[0];
    assert_eq!(item.children.len(), 1);
    assert_eq!(item.children[0].title, "Offside caliper");
    assert_eq!(item.children[0].total_price, dec("25.00"));
    assert_eq!(item.effective_total, dec("125.00"));
    assert_eq!(overview.financial.total_identified, dec("125.00"));
}
