// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use std::str::FromStr;
use time::OffsetDateTime;
use vhc_flow_audit::Cause;
use vhc_flow_domain::TokenValidity;
use vhc_flow_store::MemoryStore;

use crate::auth::{AuthenticatedActor, Role};
use crate::dispatch::{DispatchError, NotificationDispatcher, ReportInvite, TokenIssuer};
use crate::handlers;
use crate::request_response::{
    AssignTechnicianRequest, CompleteCheckInRequest, CompleteInspectionRequest,
    CreateHealthCheckRequest, CreateRepairItemRequest, MriResultInput, PublishRequest,
    SetItemCostsRequest,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_advisor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("advisor-17"), Role::Advisor)
}

pub fn create_test_technician() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("tech-42"), Role::Technician)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-204"), String::from("Service desk request"))
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn create_request(health_check_id: i64) -> CreateHealthCheckRequest {
    CreateHealthCheckRequest {
        health_check_id,
        organization_id: 10,
        site_id: 100,
        vehicle_reg: String::from("AB26 CDE"),
        customer_name: String::from("Jo Customer"),
        customer_email: Some(String::from("jo@example.com")),
        customer_mobile: Some(String::from("07700900123")),
    }
}

/// Token issuer handing out a fixed token, so tests can present it back.
pub struct FixedTokenIssuer {
    pub token: String,
}

impl FixedTokenIssuer {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl TokenIssuer for FixedTokenIssuer {
    fn issue(&mut self, _health_check_id: i64, _validity: TokenValidity) -> String {
        self.token.clone()
    }
}

/// Dispatcher recording every send; either channel can be told to fail.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub emails: Vec<String>,
    pub texts: Vec<String>,
    pub fail_email: bool,
    pub fail_sms: bool,
}

impl NotificationDispatcher for RecordingDispatcher {
    fn send_email(&mut self, to: &str, _invite: &ReportInvite) -> Result<(), DispatchError> {
        if self.fail_email {
            return Err(DispatchError {
                channel: String::from("email"),
                to: to.to_string(),
                reason: String::from("provider unavailable"),
            });
        }
        self.emails.push(to.to_string());
        Ok(())
    }

    fn send_sms(&mut self, to: &str, _invite: &ReportInvite) -> Result<(), DispatchError> {
        if self.fail_sms {
            return Err(DispatchError {
                channel: String::from("sms"),
                to: to.to_string(),
                reason: String::from("provider unavailable"),
            });
        }
        self.texts.push(to.to_string());
        Ok(())
    }
}

/// Drives a fresh health check through the staff workflow to
/// `ReadyToSend`.
///
/// Check-in answers one amber MRI question priced at 100.00, so the
/// report carries exactly one decidable repair item with id 1.
pub fn drive_to_ready(store: &mut MemoryStore, health_check_id: i64, now: OffsetDateTime) {
    drive_request_to_ready(store, create_request(health_check_id), now);
}

/// Same walk as [`drive_to_ready`], starting from a caller-shaped
/// creation request.
pub fn drive_request_to_ready(
    store: &mut MemoryStore,
    request: CreateHealthCheckRequest,
    now: OffsetDateTime,
) {
    let health_check_id: i64 = request.health_check_id;
    let advisor = create_test_advisor();
    let technician = create_test_technician();

    handlers::create_health_check(store, request, &advisor, create_test_cause(), now).unwrap();
    handlers::record_arrival(store, health_check_id, &advisor, create_test_cause(), now).unwrap();
    handlers::complete_check_in(
        store,
        CompleteCheckInRequest {
            health_check_id,
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
    handlers::assign_technician(
        store,
        AssignTechnicianRequest {
            health_check_id,
            technician: String::from("Taylor Tech"),
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::start_inspection(store, health_check_id, &technician, create_test_cause(), now)
        .unwrap();
    handlers::complete_inspection(
        store,
        CompleteInspectionRequest {
            health_check_id,
            results: vec![],
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::start_review(store, health_check_id, &advisor, create_test_cause(), now).unwrap();
    handlers::mark_ready(store, health_check_id, &advisor, create_test_cause(), now).unwrap();
}

/// Publishes a ready report by email under the given fixed token with a
/// week of validity.
pub fn publish_with_token(
    store: &mut MemoryStore,
    health_check_id: i64,
    token: &str,
    now: OffsetDateTime,
) {
    let advisor = create_test_advisor();
    let mut issuer = FixedTokenIssuer::new(token);
    let mut dispatcher = RecordingDispatcher::default();
    handlers::publish(
        store,
        &mut issuer,
        &mut dispatcher,
        &PublishRequest {
            health_check_id,
            send_email: true,
            send_sms: false,
            validity_days: 7,
        },
        &advisor,
        create_test_cause(),
        now,
    )
    .unwrap();
}

/// Drives a fresh health check all the way to `Sent`; the customer
/// holds `token`.
pub fn drive_to_sent(
    store: &mut MemoryStore,
    health_check_id: i64,
    token: &str,
    now: OffsetDateTime,
) {
    drive_to_ready(store, health_check_id, now);
    publish_with_token(store, health_check_id, token, now);
}

/// Raises a standalone priced, customer-visible item and returns its id.
pub fn raise_priced_item(
    store: &mut MemoryStore,
    health_check_id: i64,
    title: &str,
    price: &str,
    now: OffsetDateTime,
) -> i64 {
    let technician = create_test_technician();
    let created = handlers::create_repair_item(
        store,
        CreateRepairItemRequest {
            health_check_id,
            title: title.to_string(),
            description: None,
            severity: String::from("red"),
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    handlers::set_item_costs(
        store,
        &SetItemCostsRequest {
            health_check_id,
            repair_item_id: created.repair_item_id,
            child_id: None,
            parts_cost: dec(price),
            labour_cost: Decimal::ZERO,
        },
        &technician,
        create_test_cause(),
        now,
    )
    .unwrap();
    created.repair_item_id
}
