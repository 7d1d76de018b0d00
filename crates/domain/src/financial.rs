// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial aggregation across repair items.
//!
//! This module provides read-only aggregation of repair item pricing and
//! authorization decisions into the report-level money summary.
//!
//! All arithmetic is exact decimal. Per-line discount results stay
//! un-rounded; rounding to 2 decimal places (half-up) happens only at
//! the totals computed here and at item cost sync.

use crate::authorization::AuthorizationLedger;
use crate::completion::fully_complete;
use crate::repair_item::RepairItem;
use crate::types::Decision;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a monetary value to 2 decimal places, half-up.
#[must_use]
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Report-level money summary for one health check.
///
/// The identified total always equals authorised + declined + pending;
/// outstanding always equals authorised - completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Effective total of every non-deleted repair item.
    pub total_identified: Decimal,
    /// Effective total of items the customer approved.
    pub total_authorised: Decimal,
    /// Effective total of items the customer declined.
    pub total_declined: Decimal,
    /// Effective total of items with no decision yet.
    pub total_pending: Decimal,
    /// Value of authorised items whose labour and parts are both complete.
    pub completed_value: Decimal,
    /// Value of authorised items still awaiting labour or parts.
    pub outstanding_value: Decimal,
}

impl FinancialSummary {
    /// A summary with every total zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            total_identified: Decimal::ZERO,
            total_authorised: Decimal::ZERO,
            total_declined: Decimal::ZERO,
            total_pending: Decimal::ZERO,
            completed_value: Decimal::ZERO,
            outstanding_value: Decimal::ZERO,
        }
    }
}

impl Default for FinancialSummary {
    fn default() -> Self {
        Self::zero()
    }
}

/// Computes the money summary over a snapshot of repair items and the
/// authorization ledger.
///
/// Deleted items are excluded entirely. Each remaining item contributes
/// its effective total (own pricing plus children) to exactly one of the
/// authorised, declined, or pending buckets based on its current
/// decision. Completed value counts authorised items whose labour and
/// parts completion both resolve complete.
///
/// Pure and deterministic: recomputing over an unchanged snapshot yields
/// an identical summary.
#[must_use]
pub fn compute_totals(
    repair_items: &[RepairItem],
    ledger: &AuthorizationLedger,
) -> FinancialSummary {
    let mut total_identified: Decimal = Decimal::ZERO;
    let mut total_authorised: Decimal = Decimal::ZERO;
    let mut total_declined: Decimal = Decimal::ZERO;
    let mut total_pending: Decimal = Decimal::ZERO;
    let mut completed_value: Decimal = Decimal::ZERO;

    for item in repair_items.iter().filter(|item| !item.is_deleted()) {
        let effective: Decimal = item.effective_total();
        total_identified += effective;

        match ledger
            .decision_for(item.repair_item_id)
            .map(|authorization| authorization.decision)
        {
            Some(Decision::Approved) => {
                total_authorised += effective;
                if fully_complete(item) {
                    completed_value += effective;
                }
            }
            Some(Decision::Declined) => total_declined += effective,
            None => total_pending += effective,
        }
    }

    let outstanding_value: Decimal = total_authorised - completed_value;

    FinancialSummary {
        total_identified: round_currency(total_identified),
        total_authorised: round_currency(total_authorised),
        total_declined: round_currency(total_declined),
        total_pending: round_currency(total_pending),
        completed_value: round_currency(completed_value),
        outstanding_value: round_currency(outstanding_value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::authorization::Authorization;
    use crate::line_entry::LabourEntry;
    use crate::repair_item::RepairItemChild;
    use crate::types::Severity;
    use std::str::FromStr;
    use time::OffsetDateTime;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_item(id: i64, parts: &str, labour: &str) -> RepairItem {
        let mut item = RepairItem::new(id, 1, format!("Item {id}"), Severity::Amber);
        item.set_costs(dec(parts), dec(labour)).unwrap();
        item
    }

    fn decide(ledger: &mut AuthorizationLedger, repair_item_id: i64, decision: Decision) {
        ledger.record_decision(Authorization::new(
            repair_item_id,
            decision,
            OffsetDateTime::now_utc(),
            None,
            None,
        ));
    }

    fn complete(item: &mut RepairItem) {
        item.completion
            .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());
        item.completion
            .mark_parts_complete(String::from("parts"), OffsetDateTime::now_utc());
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let summary: FinancialSummary = compute_totals(&[], &AuthorizationLedger::new());
        assert_eq!(summary, FinancialSummary::zero());
    }

    #[test]
    fn test_buckets_partition_identified_total() {
        let items = vec![
            make_item(1, "50.00", "50.00"),
            make_item(2, "0.00", "75.00"),
            make_item(3, "25.00", "0.00"),
        ];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        decide(&mut ledger, 1, Decision::Approved);
        decide(&mut ledger, 2, Decision::Declined);

        let summary: FinancialSummary = compute_totals(&items, &ledger);

        assert_eq!(summary.total_identified, dec("200.00"));
        assert_eq!(summary.total_authorised, dec("100.00"));
        assert_eq!(summary.total_declined, dec("75.00"));
        assert_eq!(summary.total_pending, dec("25.00"));
        assert_eq!(
            summary.total_authorised + summary.total_declined + summary.total_pending,
            summary.total_identified
        );
    }

    #[test]
    fn test_deleted_items_excluded() {
        let mut deleted = make_item(1, "40.00", "0.00");
        deleted.soft_delete(OffsetDateTime::now_utc());
        let items = vec![deleted, make_item(2, "10.00", "0.00")];

        let summary: FinancialSummary = compute_totals(&items, &AuthorizationLedger::new());

        assert_eq!(summary.total_identified, dec("10.00"));
    }

    #[test]
    fn test_group_rolls_up_children_once() {
        // Group with no own pricing and two priced children
        let mut group = RepairItem::new(1, 1, String::from("Brake overhaul"), Severity::Red);
        let mut front = RepairItemChild::new(1, String::from("Front"), Severity::Red);
        front.set_costs(dec("40.00"), dec("80.00")).unwrap();
        let mut rear = RepairItemChild::new(2, String::from("Rear"), Severity::Red);
        rear.set_costs(dec("30.00"), dec("50.00")).unwrap();
        group.add_child(front).unwrap();
        group.add_child(rear).unwrap();

        let summary: FinancialSummary = compute_totals(&[group], &AuthorizationLedger::new());

        // 120.00 + 80.00 contributes exactly 200.00, no double count
        assert_eq!(summary.total_identified, dec("200.00"));
        assert_eq!(summary.total_pending, dec("200.00"));
    }

    #[test]
    fn test_completed_and_outstanding_over_authorised_items() {
        let mut done = make_item(1, "0.00", "100.00");
        complete(&mut done);
        let open = make_item(2, "0.00", "60.00");
        let items = vec![done, open];

        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        decide(&mut ledger, 1, Decision::Approved);
        decide(&mut ledger, 2, Decision::Approved);

        let summary: FinancialSummary = compute_totals(&items, &ledger);

        assert_eq!(summary.total_authorised, dec("160.00"));
        assert_eq!(summary.completed_value, dec("100.00"));
        assert_eq!(summary.outstanding_value, dec("60.00"));
    }

    #[test]
    fn test_declined_items_never_count_as_completed() {
        let mut item = make_item(1, "0.00", "100.00");
        complete(&mut item);
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        decide(&mut ledger, 1, Decision::Declined);

        let summary: FinancialSummary = compute_totals(&[item], &ledger);

        assert_eq!(summary.completed_value, Decimal::ZERO);
        assert_eq!(summary.outstanding_value, Decimal::ZERO);
        assert_eq!(summary.total_declined, dec("100.00"));
    }

    #[test]
    fn test_discounted_line_rounds_half_up_at_totals() {
        // 3.25 hours at 45.00 with 10% off: 131.625 un-rounded per line
        let mut item = RepairItem::new(1, 1, String::from("Timing belt"), Severity::Amber);
        item.labour_entries.push(LabourEntry::new(
            String::from("LAB01"),
            String::from("Timing belt"),
            dec("3.25"),
            dec("45.00"),
            dec("10"),
        ));
        item.recompute_costs_from_entries();

        let summary: FinancialSummary = compute_totals(&[item], &AuthorizationLedger::new());

        assert_eq!(summary.total_identified, dec("131.63"));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let items = vec![make_item(1, "12.34", "56.78"), make_item(2, "9.99", "0.01")];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        decide(&mut ledger, 1, Decision::Approved);

        let first: FinancialSummary = compute_totals(&items, &ledger);
        let second: FinancialSummary = compute_totals(&items, &ledger);

        assert_eq!(first, second);
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec("131.625")), dec("131.63"));
        assert_eq!(round_currency(dec("131.624")), dec("131.62"));
        assert_eq!(round_currency(dec("10.005")), dec("10.01"));
        assert_eq!(round_currency(dec("10")), dec("10.00"));
    }
}
