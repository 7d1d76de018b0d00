// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{HealthCheckState, TransitionResult};
use crate::{customer, items, lifecycle};
use time::OffsetDateTime;
use vhc_flow_audit::{Actor, Cause};
use vhc_flow_domain::DomainError;

/// Applies a command to a health check state, producing the new state
/// and a timeline event describing the change.
///
/// The input state is never mutated; callers persist the returned
/// state (and record the event) only if they choose to accept the
/// transition. `now` is the caller's clock reading, so the engine
/// itself never consults wall time and the same command at the same
/// instant always produces the same result.
///
/// # Arguments
///
/// * `state` - The current health check state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The instant the command takes effect
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and timeline event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The health check has been deleted
/// - The command violates domain rules or the status transition matrix
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &HealthCheckState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    // Deleted health checks accept no commands at all.
    if state.health_check.is_deleted() {
        return Err(CoreError::DomainViolation(DomainError::HealthCheckDeleted {
            health_check_id: state.health_check.health_check_id,
        }));
    }

    match command {
        Command::RecordArrival => lifecycle::record_arrival(state, actor, cause, now),
        Command::CompleteCheckIn {
            mileage,
            mri_results,
        } => lifecycle::complete_check_in(state, mileage, mri_results, actor, cause, now),
        Command::SkipCheckIn { reason } => {
            lifecycle::skip_check_in(state, reason, actor, cause, now)
        }
        Command::AssignTechnician { technician } => {
            lifecycle::assign_technician(state, technician, actor, cause, now)
        }
        Command::StartInspection => lifecycle::start_inspection(state, actor, cause, now),
        Command::PauseInspection => lifecycle::pause_inspection(state, actor, cause, now),
        Command::ResumeInspection => lifecycle::resume_inspection(state, actor, cause, now),
        Command::CompleteInspection { results } => {
            lifecycle::complete_inspection(state, results, actor, cause, now)
        }
        Command::StartReview => lifecycle::start_review(state, actor, cause, now),
        Command::MarkReady => lifecycle::mark_ready(state, actor, cause, now),
        Command::Publish {
            channels,
            validity,
            token,
        } => lifecycle::publish(state, channels, validity, token, actor, cause, now),
        Command::RecordUnableToSend { reason } => {
            lifecycle::record_unable_to_send(state, reason, actor, cause, now)
        }
        Command::RecordOpen { token } => customer::record_open(state, token, actor, cause, now),
        Command::RecordDecision {
            token,
            repair_item_id,
            decision,
            notes,
            signature,
        } => customer::record_decision(
            state,
            token,
            repair_item_id,
            decision,
            notes,
            signature,
            actor,
            cause,
            now,
        ),
        Command::MarkCompleted => lifecycle::mark_completed(state, actor, cause, now),
        Command::Close { closed_by } => lifecycle::close(state, closed_by, actor, cause, now),
        Command::Cancel { reason } => lifecycle::cancel(state, reason, actor, cause, now),
        Command::MarkNoShow => lifecycle::mark_no_show(state, actor, cause, now),
        Command::MarkExpired => lifecycle::mark_expired(state, actor, cause, now),
        Command::CreateRepairItem {
            title,
            description,
            severity,
        } => items::create_repair_item(state, title, description, severity, actor, cause, now),
        Command::CreateRepairItemFromResult { check_result_id } => {
            items::create_repair_item_from_result(state, check_result_id, actor, cause, now)
        }
        Command::UpdateItemPricing {
            repair_item_id,
            child_id,
            labour_entries,
            parts_entries,
        } => items::update_item_pricing(
            state,
            repair_item_id,
            child_id,
            labour_entries,
            parts_entries,
            actor,
            cause,
            now,
        ),
        Command::SetItemCosts {
            repair_item_id,
            child_id,
            parts_cost,
            labour_cost,
        } => items::set_item_costs(
            state,
            repair_item_id,
            child_id,
            parts_cost,
            labour_cost,
            actor,
            cause,
            now,
        ),
        Command::SetItemVisibility {
            repair_item_id,
            customer_visible,
        } => items::set_item_visibility(state, repair_item_id, customer_visible, actor, cause, now),
        Command::DeleteRepairItem { repair_item_id } => {
            items::delete_repair_item(state, repair_item_id, actor, cause, now)
        }
        Command::AddChildItem {
            repair_item_id,
            title,
            severity,
        } => items::add_child_item(state, repair_item_id, title, severity, actor, cause, now),
        Command::RemoveChildItem {
            repair_item_id,
            child_id,
        } => items::remove_child_item(state, repair_item_id, child_id, actor, cause, now),
        Command::PromoteChildItem {
            repair_item_id,
            child_id,
        } => items::promote_child_item(state, repair_item_id, child_id, actor, cause, now),
        Command::MarkLabourComplete {
            repair_item_id,
            child_id,
            completed_by,
        } => items::mark_labour_complete(
            state,
            repair_item_id,
            child_id,
            completed_by,
            actor,
            cause,
            now,
        ),
        Command::UndoLabourComplete {
            repair_item_id,
            child_id,
        } => items::undo_labour_complete(state, repair_item_id, child_id, actor, cause, now),
        Command::MarkPartsComplete {
            repair_item_id,
            child_id,
            completed_by,
        } => items::mark_parts_complete(
            state,
            repair_item_id,
            child_id,
            completed_by,
            actor,
            cause,
            now,
        ),
        Command::UndoPartsComplete {
            repair_item_id,
            child_id,
        } => items::undo_parts_complete(state, repair_item_id, child_id, actor, cause, now),
        Command::SetNoLabourRequired {
            repair_item_id,
            child_id,
            no_labour_required,
        } => items::set_no_labour_required(
            state,
            repair_item_id,
            child_id,
            no_labour_required,
            actor,
            cause,
            now,
        ),
        Command::SetNoPartsRequired {
            repair_item_id,
            child_id,
            no_parts_required,
        } => items::set_no_parts_required(
            state,
            repair_item_id,
            child_id,
            no_parts_required,
            actor,
            cause,
            now,
        ),
    }
}
