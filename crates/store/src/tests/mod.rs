// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use rust_decimal::Decimal;
use std::str::FromStr;
use vhc_flow_audit::{Actor, Cause};
use vhc_flow_domain::{HealthCheck, RepairItem, Severity};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("advisor-17"), String::from("advisor"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-204"), String::from("Service desk request"))
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn create_test_health_check(health_check_id: i64) -> HealthCheck {
    HealthCheck::new(
        health_check_id,
        10,
        100,
        String::from("AB26 CDE"),
        String::from("Jo Customer"),
        Some(String::from("jo@example.com")),
        Some(String::from("07700900123")),
    )
}

/// A priced, customer-visible repair item belonging to the given health
/// check.
pub fn create_test_item(
    health_check_id: i64,
    repair_item_id: i64,
    parts: &str,
    labour: &str,
) -> RepairItem {
    let mut item: RepairItem = RepairItem::new(
        repair_item_id,
        health_check_id,
        format!("Item {repair_item_id}"),
        Severity::Amber,
    );
    item.set_costs(dec(parts), dec(labour)).unwrap();
    item
}
