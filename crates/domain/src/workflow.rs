// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived workflow badges.
//!
//! The technician, labour, parts, and authorisation badges shown against
//! a health check are **computed**, never persisted. They are a pure
//! function of the current record, repair items, and authorization
//! ledger, recomputed on every read.

use crate::authorization::AuthorizationLedger;
use crate::completion::{labour_completion, parts_completion};
use crate::health_check::HealthCheck;
use crate::repair_item::RepairItem;
use crate::status::HealthCheckStatus;
use crate::types::Decision;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Resolved state of one workflow badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeState {
    /// Nothing recorded yet.
    Pending,
    /// Work underway (technician badge only).
    InProgress,
    /// Some but not all items satisfied.
    Partial,
    /// Every item satisfied.
    Complete,
}

impl BadgeState {
    /// Returns the string representation of the badge state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

/// One workflow badge with who/when attribution where known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowBadge {
    /// The resolved badge state.
    pub state: BadgeState,
    /// Who satisfied the badge, when attributable.
    pub completed_by: Option<String>,
    /// When the badge was satisfied, when attributable.
    pub completed_at: Option<OffsetDateTime>,
}

impl WorkflowBadge {
    /// A badge in the given state with no attribution.
    #[must_use]
    pub const fn bare(state: BadgeState) -> Self {
        Self {
            state,
            completed_by: None,
            completed_at: None,
        }
    }
}

/// The four derived badges for one health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    /// Technician inspection progress.
    pub technician: WorkflowBadge,
    /// Labour completion across authorised items.
    pub labour: WorkflowBadge,
    /// Parts completion across authorised items.
    pub parts: WorkflowBadge,
    /// Customer authorisation progress across decidable items.
    pub authorisation: WorkflowBadge,
}

/// Derives the four workflow badges from current state.
#[must_use]
pub fn derive_workflow_status(
    health_check: &HealthCheck,
    repair_items: &[RepairItem],
    ledger: &AuthorizationLedger,
) -> WorkflowStatus {
    WorkflowStatus {
        technician: technician_badge(health_check),
        labour: completion_badge(repair_items, ledger, CompletionDimension::Labour),
        parts: completion_badge(repair_items, ledger, CompletionDimension::Parts),
        authorisation: authorisation_badge(repair_items, ledger),
    }
}

/// Technician badge: complete once the inspection finished, in progress
/// once started, pending otherwise.
fn technician_badge(health_check: &HealthCheck) -> WorkflowBadge {
    if health_check.tech_completed_at.is_some() {
        return WorkflowBadge {
            state: BadgeState::Complete,
            completed_by: health_check.assigned_to.clone(),
            completed_at: health_check.tech_completed_at,
        };
    }
    if health_check.tech_started_at.is_some() {
        return WorkflowBadge::bare(BadgeState::InProgress);
    }
    WorkflowBadge::bare(BadgeState::Pending)
}

#[derive(Clone, Copy)]
enum CompletionDimension {
    Labour,
    Parts,
}

/// Labour or parts badge over authorised, non-deleted items. With no
/// authorised items the badge stays pending.
fn completion_badge(
    repair_items: &[RepairItem],
    ledger: &AuthorizationLedger,
    dimension: CompletionDimension,
) -> WorkflowBadge {
    let authorised: Vec<&RepairItem> = repair_items
        .iter()
        .filter(|item| !item.is_deleted())
        .filter(|item| {
            ledger
                .decision_for(item.repair_item_id)
                .is_some_and(|authorization| authorization.decision == Decision::Approved)
        })
        .collect();

    if authorised.is_empty() {
        return WorkflowBadge::bare(BadgeState::Pending);
    }

    let complete_count: usize = authorised
        .iter()
        .filter(|item| match dimension {
            CompletionDimension::Labour => labour_completion(item).is_complete(),
            CompletionDimension::Parts => parts_completion(item).is_complete(),
        })
        .count();

    if complete_count == authorised.len() {
        let (completed_by, completed_at) = latest_marker(&authorised, dimension);
        WorkflowBadge {
            state: BadgeState::Complete,
            completed_by,
            completed_at,
        }
    } else if complete_count > 0 {
        WorkflowBadge::bare(BadgeState::Partial)
    } else {
        WorkflowBadge::bare(BadgeState::Pending)
    }
}

/// Finds the most recent completion marker across items and their
/// children for attribution on a complete badge.
fn latest_marker(
    items: &[&RepairItem],
    dimension: CompletionDimension,
) -> (Option<String>, Option<OffsetDateTime>) {
    let mut latest: Option<(OffsetDateTime, Option<String>)> = None;

    let mut consider = |at: Option<OffsetDateTime>, by: Option<&String>| {
        if let Some(at) = at {
            let newer: bool = latest.as_ref().is_none_or(|(current, _)| at > *current);
            if newer {
                latest = Some((at, by.cloned()));
            }
        }
    };

    for item in items {
        match dimension {
            CompletionDimension::Labour => {
                consider(
                    item.completion.labour_completed_at,
                    item.completion.labour_completed_by.as_ref(),
                );
                for child in &item.children {
                    consider(
                        child.completion.labour_completed_at,
                        child.completion.labour_completed_by.as_ref(),
                    );
                }
            }
            CompletionDimension::Parts => {
                consider(
                    item.completion.parts_completed_at,
                    item.completion.parts_completed_by.as_ref(),
                );
                for child in &item.children {
                    consider(
                        child.completion.parts_completed_at,
                        child.completion.parts_completed_by.as_ref(),
                    );
                }
            }
        }
    }

    match latest {
        Some((at, by)) => (by, Some(at)),
        None => (None, None),
    }
}

/// Derives the response status implied by the current decisions.
///
/// Returns `None` while no decidable item carries a decision: the
/// health check stays in its sent or opened state. Once every decidable
/// item is decided the status resolves to authorized or declined when
/// the decisions are unanimous; any other non-zero decision count is a
/// partial response.
#[must_use]
pub fn derive_response_status(
    repair_items: &[RepairItem],
    ledger: &AuthorizationLedger,
) -> Option<HealthCheckStatus> {
    let decidable: Vec<&RepairItem> = repair_items
        .iter()
        .filter(|item| item.is_decidable())
        .collect();

    let decisions: Vec<Decision> = decidable
        .iter()
        .filter_map(|item| ledger.decision_for(item.repair_item_id))
        .map(|authorization| authorization.decision)
        .collect();

    if decisions.is_empty() {
        return None;
    }

    if decisions.len() == decidable.len() {
        if decisions
            .iter()
            .all(|decision| *decision == Decision::Approved)
        {
            return Some(HealthCheckStatus::Authorized);
        }
        if decisions
            .iter()
            .all(|decision| *decision == Decision::Declined)
        {
            return Some(HealthCheckStatus::Declined);
        }
    }

    Some(HealthCheckStatus::PartialResponse)
}

/// Authorisation badge over decidable items: complete when every
/// decidable item carries a decision, partial when some do.
fn authorisation_badge(
    repair_items: &[RepairItem],
    ledger: &AuthorizationLedger,
) -> WorkflowBadge {
    let decidable: Vec<&RepairItem> = repair_items
        .iter()
        .filter(|item| item.is_decidable())
        .collect();

    if decidable.is_empty() {
        return WorkflowBadge::bare(BadgeState::Pending);
    }

    let decided: Vec<OffsetDateTime> = decidable
        .iter()
        .filter_map(|item| ledger.decision_for(item.repair_item_id))
        .map(|authorization| authorization.decided_at)
        .collect();

    if decided.len() == decidable.len() {
        WorkflowBadge {
            state: BadgeState::Complete,
            completed_by: None,
            completed_at: decided.iter().max().copied(),
        }
    } else if decided.is_empty() {
        WorkflowBadge::bare(BadgeState::Pending)
    } else {
        WorkflowBadge::bare(BadgeState::Partial)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::authorization::Authorization;
    use crate::types::{Decision, Severity};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_check() -> HealthCheck {
        HealthCheck::new(
            1,
            10,
            100,
            String::from("AB26 CDE"),
            String::from("Jo Customer"),
            None,
            None,
        )
    }

    fn make_item(id: i64) -> RepairItem {
        let mut item = RepairItem::new(id, 1, format!("Item {id}"), Severity::Amber);
        item.set_costs(dec("50.00"), dec("50.00")).unwrap();
        item
    }

    fn approve(ledger: &mut AuthorizationLedger, id: i64) {
        ledger.record_decision(Authorization::new(
            id,
            Decision::Approved,
            OffsetDateTime::now_utc(),
            None,
            None,
        ));
    }

    #[test]
    fn test_technician_badge_progression() {
        let mut check: HealthCheck = make_check();
        let items: Vec<RepairItem> = vec![];
        let ledger: AuthorizationLedger = AuthorizationLedger::new();

        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.technician.state, BadgeState::Pending);

        check.tech_started_at = Some(OffsetDateTime::now_utc());
        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.technician.state, BadgeState::InProgress);

        check.assigned_to = Some(String::from("pat"));
        check.tech_completed_at = Some(OffsetDateTime::now_utc());
        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.technician.state, BadgeState::Complete);
        assert_eq!(status.technician.completed_by.as_deref(), Some("pat"));
        assert_eq!(status.technician.completed_at, check.tech_completed_at);
    }

    #[test]
    fn test_labour_badge_pending_without_authorised_items() {
        let check: HealthCheck = make_check();
        let mut item = make_item(1);
        item.completion
            .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());

        // Complete markers but nothing authorised: badge stays pending
        let status = derive_workflow_status(&check, &[item], &AuthorizationLedger::new());
        assert_eq!(status.labour.state, BadgeState::Pending);
    }

    #[test]
    fn test_labour_badge_partial_then_complete() {
        let check: HealthCheck = make_check();
        let mut first = make_item(1);
        let second = make_item(2);
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);
        approve(&mut ledger, 2);

        first
            .completion
            .mark_labour_complete(String::from("pat"), OffsetDateTime::now_utc());

        let status = derive_workflow_status(&check, &[first.clone(), second.clone()], &ledger);
        assert_eq!(status.labour.state, BadgeState::Partial);

        let mut second_done = second;
        second_done
            .completion
            .mark_labour_complete(String::from("sam"), OffsetDateTime::now_utc());

        let status = derive_workflow_status(&check, &[first, second_done], &ledger);
        assert_eq!(status.labour.state, BadgeState::Complete);
        // Attribution comes from the most recent marker
        assert_eq!(status.labour.completed_by.as_deref(), Some("sam"));
        assert!(status.labour.completed_at.is_some());
    }

    #[test]
    fn test_parts_badge_counts_not_required_flags() {
        let check: HealthCheck = make_check();
        let mut item = make_item(1);
        item.completion.no_parts_required = true;
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);

        let status = derive_workflow_status(&check, &[item], &ledger);
        assert_eq!(status.parts.state, BadgeState::Complete);
        // A waived dimension has no attribution to report
        assert!(status.parts.completed_by.is_none());
    }

    #[test]
    fn test_authorisation_badge_progression() {
        let check: HealthCheck = make_check();
        let items = vec![make_item(1), make_item(2), make_item(3)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();

        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.authorisation.state, BadgeState::Pending);

        approve(&mut ledger, 1);
        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.authorisation.state, BadgeState::Partial);

        approve(&mut ledger, 2);
        approve(&mut ledger, 3);
        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.authorisation.state, BadgeState::Complete);
        assert!(status.authorisation.completed_at.is_some());
    }

    #[test]
    fn test_authorisation_ignores_undecidable_items() {
        let check: HealthCheck = make_check();
        let mut hidden = make_item(2);
        hidden.customer_visible = false;
        let items = vec![make_item(1), hidden];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);

        // The hidden item does not block completion
        let status = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(status.authorisation.state, BadgeState::Complete);
    }

    #[test]
    fn test_badges_recompute_from_snapshot() {
        let check: HealthCheck = make_check();
        let items = vec![make_item(1)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);

        let first = derive_workflow_status(&check, &items, &ledger);
        let second = derive_workflow_status(&check, &items, &ledger);
        assert_eq!(first, second);
    }

    fn decline(ledger: &mut AuthorizationLedger, id: i64) {
        ledger.record_decision(Authorization::new(
            id,
            Decision::Declined,
            OffsetDateTime::now_utc(),
            None,
            None,
        ));
    }

    #[test]
    fn test_no_decisions_derives_no_response() {
        let items = vec![make_item(1), make_item(2)];
        let ledger: AuthorizationLedger = AuthorizationLedger::new();

        assert_eq!(derive_response_status(&items, &ledger), None);
    }

    #[test]
    fn test_mixed_decisions_derive_partial_response() {
        let items = vec![make_item(1), make_item(2), make_item(3)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);
        approve(&mut ledger, 2);
        decline(&mut ledger, 3);

        assert_eq!(
            derive_response_status(&items, &ledger),
            Some(HealthCheckStatus::PartialResponse)
        );
    }

    #[test]
    fn test_incomplete_decisions_derive_partial_response() {
        let items = vec![make_item(1), make_item(2)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);

        assert_eq!(
            derive_response_status(&items, &ledger),
            Some(HealthCheckStatus::PartialResponse)
        );
    }

    #[test]
    fn test_unanimous_approval_derives_authorized() {
        let items = vec![make_item(1), make_item(2), make_item(3)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);
        approve(&mut ledger, 2);
        approve(&mut ledger, 3);

        assert_eq!(
            derive_response_status(&items, &ledger),
            Some(HealthCheckStatus::Authorized)
        );
    }

    #[test]
    fn test_unanimous_decline_derives_declined() {
        let items = vec![make_item(1), make_item(2), make_item(3)];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        decline(&mut ledger, 1);
        decline(&mut ledger, 2);
        decline(&mut ledger, 3);

        assert_eq!(
            derive_response_status(&items, &ledger),
            Some(HealthCheckStatus::Declined)
        );
    }

    #[test]
    fn test_response_ignores_undecidable_items() {
        let mut hidden = make_item(2);
        hidden.customer_visible = false;
        let items = vec![make_item(1), hidden];
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        approve(&mut ledger, 1);

        // The hidden item never blocks a full response
        assert_eq!(
            derive_response_status(&items, &ledger),
            Some(HealthCheckStatus::Authorized)
        );
    }
}
