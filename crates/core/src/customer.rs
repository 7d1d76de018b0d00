// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer-facing commands: report opens and authorization decisions.
//!
//! Both arrive through the public report link, so both verify the
//! presented token before touching any state. Decisions feed the
//! authorization ledger and the response status is re-derived from the
//! full decision picture after every write.

use crate::error::CoreError;
use crate::state::{HealthCheckState, TransitionResult};
use crate::validate_health_check_open;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use vhc_flow_audit::{Action, Actor, Cause, StateSnapshot, TimelineEvent};
use vhc_flow_domain::{
    Authorization, Decision, DomainError, HealthCheckStatus, RepairItem, derive_response_status,
};

/// Records the customer opening the report link.
pub(crate) fn record_open(
    state: &HealthCheckState,
    token: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;
    state.health_check.verify_token(&token, now)?;
    validate_customer_access(&state.health_check.status, "opened")?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    // Repeat opens are tolerated; only the first one moves the status
    // and stamps the open time.
    if new_state.health_check.status == HealthCheckStatus::Sent {
        new_state
            .health_check
            .status
            .validate_transition(HealthCheckStatus::Opened)?;
        new_state.health_check.status = HealthCheckStatus::Opened;
    }
    if new_state.health_check.first_opened_at.is_none() {
        new_state.health_check.first_opened_at = Some(now);
    }

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("RecordOpen"),
        Some(String::from("Customer opened the report")),
    );
    let timeline_event: TimelineEvent = TimelineEvent::new(
        state.health_check.health_check_id,
        actor,
        cause,
        action,
        before,
        after,
        now,
    );

    Ok(TransitionResult {
        new_state,
        timeline_event,
    })
}

/// Records a customer decision on a single repair item and re-derives
/// the response status from the updated ledger.
#[allow(clippy::too_many_arguments)]
pub(crate) fn record_decision(
    state: &HealthCheckState,
    token: String,
    repair_item_id: i64,
    decision: Decision,
    notes: Option<String>,
    signature: Option<String>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;
    state.health_check.verify_token(&token, now)?;
    validate_customer_access(&state.health_check.status, "partial_response")?;
    validate_item_decidable(state.repair_item(repair_item_id)?)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let authorization: Authorization =
        Authorization::new(repair_item_id, decision, now, notes, signature);
    let superseded: Option<Authorization> = new_state.ledger.record_decision(authorization);
    if let Some(derived) =
        derive_response_status(&new_state.repair_items, &new_state.ledger)
    {
        if derived != new_state.health_check.status {
            new_state.health_check.status.validate_transition(derived)?;
            new_state.health_check.status = derived;
        }
    }

    let mut details: String = format!(
        "Customer {} repair item {repair_item_id}",
        decision.as_str()
    );
    if superseded.is_some() {
        details.push_str(" (replacing an earlier decision)");
    }

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("RecordDecision"), Some(details));
    let timeline_event: TimelineEvent = TimelineEvent::new(
        state.health_check.health_check_id,
        actor,
        cause,
        action,
        before,
        after,
        now,
    );

    Ok(TransitionResult {
        new_state,
        timeline_event,
    })
}

/// Rejects customer commands arriving outside the sent window.
fn validate_customer_access(
    status: &HealthCheckStatus,
    target: &str,
) -> Result<(), DomainError> {
    if status.allows_customer_access() {
        Ok(())
    } else {
        Err(DomainError::InvalidStatusTransition {
            from: status.as_str().to_string(),
            to: target.to_string(),
            reason: String::from("the report is not available to the customer"),
        })
    }
}

/// Rejects decisions on items the customer cannot act on, naming the
/// exact disqualifier.
fn validate_item_decidable(item: &RepairItem) -> Result<(), DomainError> {
    if item.is_deleted() {
        return Err(DomainError::ItemNotDecidable {
            repair_item_id: item.repair_item_id,
            reason: String::from("the item has been removed"),
        });
    }
    if !item.customer_visible {
        return Err(DomainError::ItemNotDecidable {
            repair_item_id: item.repair_item_id,
            reason: String::from("the item is not on the customer report"),
        });
    }
    if item.effective_total() <= Decimal::ZERO {
        return Err(DomainError::ItemNotDecidable {
            repair_item_id: item.repair_item_id,
            reason: String::from("the item has no price"),
        });
    }
    Ok(())
}
