// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repair item commands: creation, pricing, visibility, hierarchy, and
//! labour/parts completion marking.
//!
//! Pricing writes refresh the denormalized totals on the health check,
//! and the first pricing write during advisor review advances the
//! report into `AwaitingPricing`.

use crate::error::CoreError;
use crate::state::{HealthCheckState, TransitionResult};
use crate::{validate_health_check_open, validate_repair_item_active};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use vhc_flow_audit::{Action, Actor, Cause, StateSnapshot, TimelineEvent};
use vhc_flow_domain::{
    Authorization, CheckResult, CompletionMarkers, DomainError, HealthCheckStatus, LabourEntry,
    PartsEntry, RepairItem, RepairItemChild, Severity, validate_discount, validate_title,
};

/// Creates a repair item by hand, unpriced and visible to the customer.
pub(crate) fn create_repair_item(
    state: &HealthCheckState,
    title: String,
    description: Option<String>,
    severity: Severity,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;
    validate_title(&title)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let repair_item_id: i64 = new_state.next_repair_item_id();
    let mut item: RepairItem = RepairItem::new(
        repair_item_id,
        state.health_check.health_check_id,
        title.clone(),
        severity,
    );
    item.description = description;
    new_state.repair_items.push(item);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("CreateRepairItem"),
        Some(format!(
            "Raised repair item '{title}' ({})",
            severity.as_str()
        )),
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

/// Creates a repair item from a flagged inspection finding.
///
/// # Errors
///
/// Returns an error if the finding does not exist or is not flagged
/// red or amber.
pub(crate) fn create_repair_item_from_result(
    state: &HealthCheckState,
    check_result_id: i64,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let result: &CheckResult = state
        .check_results
        .iter()
        .find(|result| result.check_result_id == check_result_id)
        .ok_or(DomainError::CheckResultNotFound { check_result_id })?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let repair_item_id: i64 = new_state.next_repair_item_id();
    let item: RepairItem = RepairItem::from_check_result(repair_item_id, result)?;
    let details: String = format!(
        "Raised repair item '{}' from finding '{}'",
        item.title, result.label
    );
    new_state.repair_items.push(item);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("CreateRepairItemFromResult"), Some(details));
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

/// Replaces the pricing lines of an item or child and recomputes its
/// costs from them.
#[allow(clippy::too_many_arguments)]
pub(crate) fn update_item_pricing(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    labour_entries: Vec<LabourEntry>,
    parts_entries: Vec<PartsEntry>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;
    validate_labour_entries(&labour_entries)?;
    validate_parts_entries(&parts_entries)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    match child_id {
        Some(child_id) => {
            let child: &mut RepairItemChild = item.find_child_mut(child_id)?;
            child.labour_entries = labour_entries;
            child.parts_entries = parts_entries;
            child.recompute_costs_from_entries();
        }
        None => {
            item.labour_entries = labour_entries;
            item.parts_entries = parts_entries;
            item.recompute_costs_from_entries();
        }
    }
    let effective_total: Decimal = new_state.repair_item(repair_item_id)?.effective_total();
    new_state.refresh_totals();
    advance_on_first_pricing(&mut new_state)?;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("UpdateItemPricing"),
        Some(format!(
            "Priced {}; effective total now {effective_total}",
            describe_target(repair_item_id, child_id)
        )),
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

/// Sets the costs of an item or child directly, without pricing lines.
#[allow(clippy::too_many_arguments)]
pub(crate) fn set_item_costs(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    parts_cost: Decimal,
    labour_cost: Decimal,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    match child_id {
        Some(child_id) => {
            item.find_child_mut(child_id)?
                .set_costs(parts_cost, labour_cost)?;
        }
        None => {
            item.set_costs(parts_cost, labour_cost)?;
        }
    }
    let effective_total: Decimal = new_state.repair_item(repair_item_id)?.effective_total();
    new_state.refresh_totals();
    advance_on_first_pricing(&mut new_state)?;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("SetItemCosts"),
        Some(format!(
            "Priced {} at parts {parts_cost}, labour {labour_cost}; effective total {effective_total}",
            describe_target(repair_item_id, child_id)
        )),
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

/// Shows or hides an item on the customer report.
pub(crate) fn set_item_visibility(
    state: &HealthCheckState,
    repair_item_id: i64,
    customer_visible: bool,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    item.customer_visible = customer_visible;

    let visibility: &str = if customer_visible {
        "visible to the customer"
    } else {
        "hidden from the customer"
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("SetItemVisibility"),
        Some(format!("Repair item {repair_item_id} is now {visibility}")),
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

/// Soft deletes a repair item and withdraws any customer decision on it.
pub(crate) fn delete_repair_item(
    state: &HealthCheckState,
    repair_item_id: i64,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    item.soft_delete(now);
    let cleared: Option<Authorization> = new_state.ledger.clear_decision(repair_item_id);
    new_state.refresh_totals();

    let details: String = if cleared.is_some() {
        format!("Deleted repair item {repair_item_id} and withdrew its customer decision")
    } else {
        format!("Deleted repair item {repair_item_id}")
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("DeleteRepairItem"), Some(details));
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

/// Adds a child line under a repair item, making it a group.
pub(crate) fn add_child_item(
    state: &HealthCheckState,
    repair_item_id: i64,
    title: String,
    severity: Severity,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;
    validate_title(&title)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    let next_child_id: i64 = item
        .children
        .iter()
        .map(|child| child.child_id)
        .max()
        .map_or(1, |max| max + 1);
    let child: RepairItemChild = RepairItemChild::new(next_child_id, title.clone(), severity);
    item.add_child(child)?;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("AddChildItem"),
        Some(format!(
            "Added child '{title}' under repair item {repair_item_id}"
        )),
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

/// Removes a child line from a group.
pub(crate) fn remove_child_item(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: i64,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    let removed: RepairItemChild = item.remove_child(child_id)?;
    new_state.refresh_totals();

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("RemoveChildItem"),
        Some(format!(
            "Removed child '{}' from repair item {repair_item_id}",
            removed.title
        )),
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

/// Promotes a child line to a standalone repair item, carrying its
/// pricing and completion markers with it.
pub(crate) fn promote_child_item(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: i64,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let new_repair_item_id: i64 = new_state.next_repair_item_id();
    let parent: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(parent)?;
    let promoted: RepairItem = parent.promote_child(child_id, new_repair_item_id)?;
    let details: String = format!(
        "Promoted child '{}' of repair item {repair_item_id} to repair item {new_repair_item_id}",
        promoted.title
    );
    new_state.repair_items.push(promoted);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("PromoteChildItem"), Some(details));
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

/// Marks labour complete on an item or child, with attribution.
pub(crate) fn mark_labour_complete(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    completed_by: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = format!(
        "Labour complete on {} by {completed_by}",
        describe_target(repair_item_id, child_id)
    );
    update_completion(
        state,
        repair_item_id,
        child_id,
        "MarkLabourComplete",
        details,
        actor,
        cause,
        now,
        move |markers| markers.mark_labour_complete(completed_by, now),
    )
}

/// Clears the labour completion marker on an item or child.
pub(crate) fn undo_labour_complete(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = format!(
        "Labour completion cleared on {}",
        describe_target(repair_item_id, child_id)
    );
    update_completion(
        state,
        repair_item_id,
        child_id,
        "UndoLabourComplete",
        details,
        actor,
        cause,
        now,
        CompletionMarkers::undo_labour_complete,
    )
}

/// Marks parts complete on an item or child, with attribution.
pub(crate) fn mark_parts_complete(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    completed_by: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = format!(
        "Parts complete on {} by {completed_by}",
        describe_target(repair_item_id, child_id)
    );
    update_completion(
        state,
        repair_item_id,
        child_id,
        "MarkPartsComplete",
        details,
        actor,
        cause,
        now,
        move |markers| markers.mark_parts_complete(completed_by, now),
    )
}

/// Clears the parts completion marker on an item or child.
pub(crate) fn undo_parts_complete(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = format!(
        "Parts completion cleared on {}",
        describe_target(repair_item_id, child_id)
    );
    update_completion(
        state,
        repair_item_id,
        child_id,
        "UndoPartsComplete",
        details,
        actor,
        cause,
        now,
        CompletionMarkers::undo_parts_complete,
    )
}

/// Flags whether an item or child needs any labour at all.
pub(crate) fn set_no_labour_required(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    no_labour_required: bool,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = if no_labour_required {
        format!(
            "No labour required on {}",
            describe_target(repair_item_id, child_id)
        )
    } else {
        format!(
            "Labour required again on {}",
            describe_target(repair_item_id, child_id)
        )
    };
    update_completion(
        state,
        repair_item_id,
        child_id,
        "SetNoLabourRequired",
        details,
        actor,
        cause,
        now,
        move |markers| markers.no_labour_required = no_labour_required,
    )
}

/// Flags whether an item or child needs any parts at all.
pub(crate) fn set_no_parts_required(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    no_parts_required: bool,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let details: String = if no_parts_required {
        format!(
            "No parts required on {}",
            describe_target(repair_item_id, child_id)
        )
    } else {
        format!(
            "Parts required again on {}",
            describe_target(repair_item_id, child_id)
        )
    };
    update_completion(
        state,
        repair_item_id,
        child_id,
        "SetNoPartsRequired",
        details,
        actor,
        cause,
        now,
        move |markers| markers.no_parts_required = no_parts_required,
    )
}

/// Applies one mutation to the completion markers of an item or child
/// and wraps it in the usual transition bookkeeping.
#[allow(clippy::too_many_arguments)]
fn update_completion(
    state: &HealthCheckState,
    repair_item_id: i64,
    child_id: Option<i64>,
    action_name: &str,
    details: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
    update: impl FnOnce(&mut CompletionMarkers),
) -> Result<TransitionResult, CoreError> {
    validate_health_check_open(&state.health_check)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    let item: &mut RepairItem = new_state.repair_item_mut(repair_item_id)?;
    validate_repair_item_active(item)?;
    let markers: &mut CompletionMarkers = match child_id {
        Some(child_id) => &mut item.find_child_mut(child_id)?.completion,
        None => &mut item.completion,
    };
    update(markers);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(action_name.to_string(), Some(details));
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

/// The first pricing write during advisor review advances the report
/// into `AwaitingPricing`.
fn advance_on_first_pricing(new_state: &mut HealthCheckState) -> Result<(), CoreError> {
    if new_state.health_check.status == HealthCheckStatus::AwaitingReview {
        new_state
            .health_check
            .status
            .validate_transition(HealthCheckStatus::AwaitingPricing)?;
        new_state.health_check.status = HealthCheckStatus::AwaitingPricing;
    }
    Ok(())
}

/// Names an item or child line for timeline details.
fn describe_target(repair_item_id: i64, child_id: Option<i64>) -> String {
    child_id.map_or_else(
        || format!("repair item {repair_item_id}"),
        |child_id| format!("child {child_id} of repair item {repair_item_id}"),
    )
}

/// Validates the field constraints of labour pricing lines.
fn validate_labour_entries(entries: &[LabourEntry]) -> Result<(), DomainError> {
    for entry in entries {
        if entry.hours < Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                field: String::from("hours"),
                amount: entry.hours,
            });
        }
        if entry.rate < Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                field: String::from("rate"),
                amount: entry.rate,
            });
        }
        validate_discount(entry.discount_percent)?;
    }
    Ok(())
}

/// Validates the field constraints of parts pricing lines.
fn validate_parts_entries(entries: &[PartsEntry]) -> Result<(), DomainError> {
    for entry in entries {
        if entry.quantity < Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                field: String::from("quantity"),
                amount: entry.quantity,
            });
        }
        if entry.unit_price < Decimal::ZERO {
            return Err(DomainError::InvalidAmount {
                field: String::from("unit_price"),
                amount: entry.unit_price,
            });
        }
        validate_discount(entry.discount_percent)?;
    }
    Ok(())
}
