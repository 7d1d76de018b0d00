// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::HealthCheckState;
use rust_decimal::Decimal;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};
use vhc_flow_audit::{Actor, Cause};
use vhc_flow_domain::{HealthCheck, HealthCheckStatus, RepairItem, Severity};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("advisor-17"), String::from("advisor"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-204"), String::from("Service desk request"))
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// A fresh health check in `AwaitingArrival` with both contact channels
/// on file.
pub fn create_test_state() -> HealthCheckState {
    HealthCheckState::new(HealthCheck::new(
        1,
        10,
        100,
        String::from("AB26 CDE"),
        String::from("Jo Customer"),
        Some(String::from("jo@example.com")),
        Some(String::from("07700900123")),
    ))
}

pub fn state_with_status(status: HealthCheckStatus) -> HealthCheckState {
    let mut state: HealthCheckState = create_test_state();
    state.health_check.status = status;
    state
}

/// Pushes a priced, customer-visible item and refreshes the
/// denormalized totals.
pub fn add_priced_item(
    state: &mut HealthCheckState,
    repair_item_id: i64,
    parts_cost: &str,
    labour_cost: &str,
) {
    let mut item: RepairItem = RepairItem::new(
        repair_item_id,
        state.health_check.health_check_id,
        format!("Item {repair_item_id}"),
        Severity::Amber,
    );
    item.set_costs(dec(parts_cost), dec(labour_cost)).unwrap();
    state.repair_items.push(item);
    state.refresh_totals();
}

/// A health check in `Sent` with an issued token, a week of validity
/// left, and one priced item worth 100.00.
pub fn sent_state(token: &str, now: OffsetDateTime) -> HealthCheckState {
    let mut state: HealthCheckState = state_with_status(HealthCheckStatus::Sent);
    add_priced_item(&mut state, 1, "40.00", "60.00");
    state.health_check.public_token = Some(token.to_string());
    state.health_check.token_expires_at = Some(now + Duration::days(7));
    state.health_check.sent_at = Some(now);
    state
}
