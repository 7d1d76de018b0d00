// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers orchestrating the API boundary.
//!
//! Every mutation follows the same path: authorize the actor, load
//! current state, apply one engine command, persist the outcome, and
//! shape the response. Handlers never change state outside a command,
//! and a stored transition always carries its timeline event.
//!
//! Customer operations take no authenticated actor; the public report
//! token presented with the request is the credential, and the engine
//! verifies it.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::{compute_customer_capabilities, compute_health_check_capabilities};
use crate::dispatch::{DispatchError, NotificationDispatcher, ReportInvite, TokenIssuer};
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
use crate::request_response::{
    AddChildItemRequest, AssignTechnicianRequest, BadgeInfo, CancelRequest, CheckResultInput,
    ChildItemInfo, ChildItemResponse, CloseRequest, CompleteCheckInRequest,
    CompleteInspectionRequest, CreateHealthCheckRequest, CreateHealthCheckResponse,
    CreateRepairItemFromResultRequest, CreateRepairItemRequest, CustomerCapabilities,
    DeleteRepairItemRequest, FinancialSummaryInfo, HealthCheckCapabilities, HealthCheckInfo,
    HealthCheckOverviewResponse, HealthCheckResponse, LabourLineInput, MriResultInput,
    MriSummaryInfo, PartsLineInput, PromoteChildItemRequest, PublishRequest, PublishResponse,
    RecordDecisionRequest, RecordDecisionResponse, RecordOpenRequest, RecordUnableToSendRequest,
    RemoveChildItemRequest, RepairItemInfo, RepairItemResponse, SetItemCostsRequest,
    SetItemVisibilityRequest,
    SkipCheckInRequest, TimelineEventInfo, UpdateItemPricingRequest, WorkflowStatusInfo,
};
use crate::send_policy::{Delivery, DeliveryChannel, delivery_plan};
use time::OffsetDateTime;
use vhc_flow::{Command, HealthCheckState, TransitionResult, apply};
use vhc_flow_audit::{Action, Actor, Cause, StateSnapshot, TimelineEvent};
use vhc_flow_domain::{
    AuthorizationLedger, CheckResult, Decision, FinancialSummary, HealthCheck, LabourEntry,
    MriResult, MriSummary, PartsEntry, RagStatus, RepairItem, RepairItemChild, SendChannels,
    Severity, TokenValidity, WorkflowBadge, WorkflowStatus, compute_totals,
    derive_workflow_status, summarize_mri_results, validate_customer_name, validate_vehicle_reg,
};
use vhc_flow_store::{HealthCheckStore, TimelineStore, load_state, persist_transition};

/// Loads current state, applies one command, and persists the outcome.
///
/// # Errors
///
/// Returns an error if the health check does not exist, the command is
/// rejected by the engine, or the write carries a stale version.
fn execute<S>(
    store: &mut S,
    health_check_id: i64,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<(TransitionResult, i64), ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    let state: HealthCheckState =
        load_state(store, health_check_id).map_err(translate_store_error)?;

    // Apply command via core transition
    let result: TransitionResult =
        apply(&state, command, actor, cause, now).map_err(translate_core_error)?;

    let version: i64 = persist_transition(store, &result).map_err(translate_store_error)?;
    Ok((result, version))
}

/// Shapes the shared mutation response from a persisted transition.
fn mutation_response(
    result: &TransitionResult,
    version: i64,
    message: String,
) -> HealthCheckResponse {
    HealthCheckResponse {
        health_check_id: result.new_state.health_check.health_check_id,
        status: result.new_state.health_check.status.as_str().to_string(),
        version,
        message,
    }
}

/// Creates a new health check awaiting vehicle arrival.
///
/// The identifier is allocated upstream by the booking system and
/// carried on the request.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `request` - The creation request
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause for audit trail purposes
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (Advisor role required)
/// - The vehicle registration or customer name is invalid
/// - A health check with the same id already exists
pub fn create_health_check<S>(
    store: &mut S,
    request: CreateHealthCheckRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CreateHealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "create_health_check")?;

    // Validate identity fields before touching the store
    validate_vehicle_reg(&request.vehicle_reg).map_err(translate_domain_error)?;
    validate_customer_name(&request.customer_name).map_err(translate_domain_error)?;

    let health_check: HealthCheck = HealthCheck::new(
        request.health_check_id,
        request.organization_id,
        request.site_id,
        request.vehicle_reg,
        request.customer_name,
        request.customer_email,
        request.customer_mobile,
    );
    store
        .create_health_check(&health_check)
        .map_err(translate_store_error)?;

    // Creation is not an engine transition; record the timeline event here
    let actor: Actor = authenticated_actor.to_audit_actor();
    let action: Action = Action::new(
        String::from("CreateHealthCheck"),
        Some(format!(
            "Created health check for '{}'",
            health_check.vehicle_reg
        )),
    );
    let before: StateSnapshot =
        StateSnapshot::new(String::from("health_check_does_not_exist"), None);
    let after: StateSnapshot = StateSnapshot::new(health_check.status.as_str().to_string(), None);
    let event: TimelineEvent = TimelineEvent::new(
        health_check.health_check_id,
        actor,
        cause,
        action,
        before,
        after,
        now,
    );
    store.record_event(&event).map_err(translate_store_error)?;

    // Translate to API response
    Ok(CreateHealthCheckResponse {
        health_check_id: health_check.health_check_id,
        vehicle_reg: health_check.vehicle_reg.clone(),
        status: health_check.status.as_str().to_string(),
        message: format!(
            "Successfully created health check for '{}'",
            health_check.vehicle_reg
        ),
    })
}

/// Records that the vehicle has arrived on site.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the health check is not awaiting arrival.
pub fn record_arrival<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "record_arrival")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::RecordArrival,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully recorded vehicle arrival"),
    ))
}

/// Completes check-in with the mileage and MRI checklist answers.
///
/// Flagged (red or amber) MRI answers raise repair items immediately.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (Advisor role required)
/// - The mileage is missing or invalid
/// - An MRI answer carries an unknown RAG grade
/// - The health check is not awaiting check-in
pub fn complete_check_in<S>(
    store: &mut S,
    request: CompleteCheckInRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "complete_check_in")?;

    // Translate API request into domain types
    let mri_results: Vec<MriResult> =
        map_mri_inputs(request.health_check_id, request.mri_results)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::CompleteCheckIn {
        mileage: request.mileage,
        mri_results,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully completed check-in"),
    ))
}

/// Skips check-in entirely, forfeiting MRI generation.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Admin role
/// required) or the visit has already moved past check-in.
pub fn skip_check_in<S>(
    store: &mut S,
    request: SkipCheckInRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_admin_action(authenticated_actor, "skip_check_in")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::SkipCheckIn {
        reason: request.reason,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully skipped check-in"),
    ))
}

/// Assigns the inspection to a technician.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the health check is not ready for assignment.
pub fn assign_technician<S>(
    store: &mut S,
    request: AssignTechnicianRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "assign_technician")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let message: String = format!(
        "Successfully assigned inspection to '{}'",
        request.technician
    );
    let command: Command = Command::AssignTechnician {
        technician: request.technician,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(&result, version, message))
}

/// Starts the assigned inspection.
///
/// # Errors
///
/// Returns an error if the health check is not assigned.
pub fn start_inspection<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "start_inspection")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::StartInspection,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully started inspection"),
    ))
}

/// Pauses a running inspection.
///
/// # Errors
///
/// Returns an error if the inspection is not in progress.
pub fn pause_inspection<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "pause_inspection")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::PauseInspection,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully paused inspection"),
    ))
}

/// Resumes a paused inspection.
///
/// # Errors
///
/// Returns an error if the inspection is not paused.
pub fn resume_inspection<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "resume_inspection")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::ResumeInspection,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully resumed inspection"),
    ))
}

/// Completes the inspection with the full set of findings.
///
/// Prior findings are replaced wholesale and the RAG counts on the
/// health check are refreshed from the new set.
///
/// # Errors
///
/// Returns an error if:
/// - A finding carries an unknown RAG grade
/// - The inspection is not in progress
pub fn complete_inspection<S>(
    store: &mut S,
    request: CompleteInspectionRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "complete_inspection")?;

    // Translate API request into domain types
    let results: Vec<CheckResult> = map_check_inputs(request.health_check_id, request.results)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::CompleteInspection { results };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully recorded inspection findings"),
    ))
}

/// Picks up a completed inspection for advisor review.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required), technician completion is not recorded, or the status
/// does not permit review.
pub fn start_review<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "start_review")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::StartReview,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully started review"),
    ))
}

/// Marks the priced report ready to send, at advisor discretion.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the report is not under review or pricing.
pub fn mark_ready<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "mark_ready")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::MarkReady,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully marked report ready to send"),
    ))
}

/// Publishes the report to the customer over the selected channels.
///
/// The delivery plan is resolved against the contact details on file
/// before a token is minted, so a bad channel selection fails without
/// side effects. The engine re-checks the selection authoritatively.
/// Once the transition is stored, deliveries are dispatched; a failed
/// delivery is reported on the response and never rolls the stored
/// transition back. A re-send mints a fresh token and recomputes the
/// expiry from the new send.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `issuer` - The token issuer collaborator
/// * `dispatcher` - The notification dispatcher collaborator
/// * `request` - The publish request
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause for audit trail purposes
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (Advisor role required)
/// - No channel is selected, or a selected channel has no contact on file
/// - The validity period is not 3, 7, 14 or 30 days
/// - The status does not permit publishing
/// - The write carries a stale version (a concurrent publish won)
pub fn publish<S, I, D>(
    store: &mut S,
    issuer: &mut I,
    dispatcher: &mut D,
    request: &PublishRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<PublishResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
    I: TokenIssuer + ?Sized,
    D: NotificationDispatcher + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "publish")?;

    let state: HealthCheckState =
        load_state(store, request.health_check_id).map_err(translate_store_error)?;

    // Resolve the delivery plan before minting a token
    let channels: SendChannels = SendChannels::new(request.send_email, request.send_sms);
    let deliveries: Vec<Delivery> = delivery_plan(channels, &state.health_check)?;

    let validity: TokenValidity =
        TokenValidity::from_days(request.validity_days).map_err(translate_domain_error)?;
    let token: String = issuer.issue(request.health_check_id, validity);

    // Convert authenticated actor to audit actor for attribution
    let actor: Actor = authenticated_actor.to_audit_actor();

    // Create core command
    let command: Command = Command::Publish {
        channels,
        validity,
        token: token.clone(),
    };

    // Apply command via core transition
    let result: TransitionResult =
        apply(&state, command, actor, cause, now).map_err(translate_core_error)?;
    let version: i64 = persist_transition(store, &result).map_err(translate_store_error)?;

    let health_check: &HealthCheck = &result.new_state.health_check;
    let expires_at: OffsetDateTime =
        health_check
            .token_expires_at
            .ok_or_else(|| ApiError::Internal {
                message: String::from("published health check carries no token expiry"),
            })?;

    let invite: ReportInvite = ReportInvite {
        health_check_id: health_check.health_check_id,
        vehicle_reg: health_check.vehicle_reg.clone(),
        customer_name: health_check.customer_name.clone(),
        token: token.clone(),
        expires_at,
    };

    // Dispatch only after the transition is stored; failures degrade the
    // response, never the stored state
    let mut delivery_failures: Vec<String> = Vec::new();
    for delivery in &deliveries {
        let sent: Result<(), DispatchError> = match delivery.channel {
            DeliveryChannel::Email => dispatcher.send_email(&delivery.to, &invite),
            DeliveryChannel::Sms => dispatcher.send_sms(&delivery.to, &invite),
        };
        if let Err(err) = sent {
            tracing::warn!(
                "Report delivery failed for health check {}: {err}",
                health_check.health_check_id
            );
            delivery_failures.push(err.to_string());
        }
    }

    // Translate to API response
    Ok(PublishResponse {
        health_check_id: health_check.health_check_id,
        status: health_check.status.as_str().to_string(),
        version,
        token,
        expires_at,
        delivery_failures,
        message: String::from("Successfully published report"),
    })
}

/// Records that the report could not be sent. Status does not advance.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the report is not ready to send.
pub fn record_unable_to_send<S>(
    store: &mut S,
    request: RecordUnableToSendRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "record_unable_to_send")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::RecordUnableToSend {
        reason: request.reason,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully recorded send failure"),
    ))
}

/// Records the customer opening the report link.
///
/// The first open moves the report to opened and stamps
/// `first_opened_at`; repeat opens are tolerated and change nothing.
///
/// # Errors
///
/// Returns an error if the token does not match, has expired, or the
/// status does not permit customer access.
pub fn record_open<S>(
    store: &mut S,
    request: RecordOpenRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    let state: HealthCheckState =
        load_state(store, request.health_check_id).map_err(translate_store_error)?;

    // The token is the credential; attribute the change to the customer
    let actor: Actor = Actor::new(
        state.health_check.customer_name.clone(),
        String::from("customer"),
    );
    let command: Command = Command::RecordOpen {
        token: request.token,
    };

    // Apply command via core transition
    let result: TransitionResult =
        apply(&state, command, actor, cause, now).map_err(translate_core_error)?;
    let version: i64 = persist_transition(store, &result).map_err(translate_store_error)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully recorded report open"),
    ))
}

/// Records a customer decision on one repair item.
///
/// The new decision supersedes any prior decision for the same item,
/// and the response status is re-derived across decidable items.
///
/// # Errors
///
/// Returns an error if:
/// - The token does not match or has expired
/// - The decision string is not "approved" or "declined"
/// - The item is hidden, deleted, or unpriced
/// - The status does not permit customer access
pub fn record_decision<S>(
    store: &mut S,
    request: RecordDecisionRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<RecordDecisionResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Parse the decision
    let decision: Decision = request.decision.parse().map_err(translate_domain_error)?;

    let state: HealthCheckState =
        load_state(store, request.health_check_id).map_err(translate_store_error)?;

    // The token is the credential; attribute the change to the customer
    let actor: Actor = Actor::new(
        state.health_check.customer_name.clone(),
        String::from("customer"),
    );

    // Create core command
    let command: Command = Command::RecordDecision {
        token: request.token,
        repair_item_id: request.repair_item_id,
        decision,
        notes: request.notes,
        signature: request.signature,
    };

    // Apply command via core transition
    let result: TransitionResult =
        apply(&state, command, actor, cause, now).map_err(translate_core_error)?;
    let version: i64 = persist_transition(store, &result).map_err(translate_store_error)?;

    // Translate to API response
    Ok(RecordDecisionResponse {
        health_check_id: request.health_check_id,
        repair_item_id: request.repair_item_id,
        decision: decision.as_str().to_string(),
        status: result.new_state.health_check.status.as_str().to_string(),
        version,
        message: format!(
            "Successfully recorded '{}' for repair item {}",
            decision.as_str(),
            request.repair_item_id
        ),
    })
}

/// Marks all authorised work done.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required), outstanding work remains, or the status does not permit
/// completion.
pub fn mark_completed<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "mark_completed")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::MarkCompleted,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully marked authorised work completed"),
    ))
}

/// Closes out the visit. Irreversible.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the status does not permit closing.
pub fn close<S>(
    store: &mut S,
    request: CloseRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "close")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::Close {
        closed_by: request.closed_by,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully closed health check"),
    ))
}

/// Cancels the visit.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the visit is already terminal or completed.
pub fn cancel<S>(
    store: &mut S,
    request: CancelRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "cancel")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::Cancel {
        reason: request.reason,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully cancelled health check"),
    ))
}

/// Records that the customer never arrived.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required) or the vehicle has already been checked in.
pub fn mark_no_show<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "mark_no_show")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::MarkNoShow,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully recorded no-show"),
    ))
}

/// Marks the customer link expired after its validity has lapsed.
///
/// The engine never expires a link on its own; this handler is how an
/// observed expiry is recorded.
///
/// # Errors
///
/// Returns an error if the actor is not authorized (Advisor role
/// required), the token has not lapsed yet, or the status does not
/// permit expiry.
pub fn mark_expired<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    // Enforce authorization before executing command
    AuthorizationService::authorize_advisor_action(authenticated_actor, "mark_expired")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let (result, version) = execute(
        store,
        health_check_id,
        Command::MarkExpired,
        actor,
        cause,
        now,
    )?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully marked customer link expired"),
    ))
}

/// Creates a repair item by hand.
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty or the severity string is invalid
/// - The health check is deleted or terminal
pub fn create_repair_item<S>(
    store: &mut S,
    request: CreateRepairItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<RepairItemResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "create_repair_item")?;

    // Parse severity
    let severity: Severity = request.severity.parse().map_err(translate_domain_error)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::CreateRepairItem {
        title: request.title,
        description: request.description,
        severity,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    created_item_response(&result, version)
}

/// Creates a repair item from a flagged inspection finding.
///
/// # Errors
///
/// Returns an error if the finding does not exist, is not flagged red
/// or amber, or the health check is deleted or terminal.
pub fn create_repair_item_from_result<S>(
    store: &mut S,
    request: &CreateRepairItemFromResultRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<RepairItemResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(
        authenticated_actor,
        "create_repair_item_from_result",
    )?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::CreateRepairItemFromResult {
        check_result_id: request.check_result_id,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    created_item_response(&result, version)
}

/// Replaces the pricing lines of an item or child and recomputes costs.
///
/// The first pricing write while the report is under review advances it
/// to awaiting pricing.
///
/// # Errors
///
/// Returns an error if a discount is outside 0 to 100, the item or
/// child does not exist, or the health check is deleted or terminal.
pub fn update_item_pricing<S>(
    store: &mut S,
    request: UpdateItemPricingRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "update_item_pricing")?;

    // Translate API request into domain types
    let labour_entries: Vec<LabourEntry> = map_labour_lines(request.labour_entries);
    let parts_entries: Vec<PartsEntry> = map_parts_lines(request.parts_entries);

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::UpdateItemPricing {
        repair_item_id: request.repair_item_id,
        child_id: request.child_id,
        labour_entries,
        parts_entries,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        format!(
            "Successfully updated pricing for repair item {}",
            request.repair_item_id
        ),
    ))
}

/// Sets the costs of an item or child directly, without pricing lines.
///
/// # Errors
///
/// Returns an error if a cost is negative, the item or child does not
/// exist, or the health check is deleted or terminal.
pub fn set_item_costs<S>(
    store: &mut S,
    request: &SetItemCostsRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "set_item_costs")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::SetItemCosts {
        repair_item_id: request.repair_item_id,
        child_id: request.child_id,
        parts_cost: request.parts_cost,
        labour_cost: request.labour_cost,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        format!(
            "Successfully set costs for repair item {}",
            request.repair_item_id
        ),
    ))
}

/// Shows or hides a repair item on the customer report.
///
/// # Errors
///
/// Returns an error if the item does not exist or the health check is
/// deleted or terminal.
pub fn set_item_visibility<S>(
    store: &mut S,
    request: &SetItemVisibilityRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "set_item_visibility")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::SetItemVisibility {
        repair_item_id: request.repair_item_id,
        customer_visible: request.customer_visible,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    let visibility: &str = if request.customer_visible {
        "visible"
    } else {
        "hidden"
    };
    Ok(mutation_response(
        &result,
        version,
        format!(
            "Successfully made repair item {} {visibility}",
            request.repair_item_id
        ),
    ))
}

/// Soft deletes a repair item.
///
/// # Errors
///
/// Returns an error if the item does not exist, is already deleted, or
/// the health check is deleted or terminal.
pub fn delete_repair_item<S>(
    store: &mut S,
    request: &DeleteRepairItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "delete_repair_item")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::DeleteRepairItem {
        repair_item_id: request.repair_item_id,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        format!(
            "Successfully deleted repair item {}",
            request.repair_item_id
        ),
    ))
}

/// Adds a child line under a repair item, making it a group.
///
/// # Errors
///
/// Returns an error if the severity string is invalid, the title
/// duplicates a sibling, the parent does not exist or is deleted, or
/// the health check is deleted or terminal.
pub fn add_child_item<S>(
    store: &mut S,
    request: AddChildItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ChildItemResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "add_child_item")?;

    // Parse severity
    let severity: Severity = request.severity.parse().map_err(translate_domain_error)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let title: String = request.title.clone();
    let command: Command = Command::AddChildItem {
        repair_item_id: request.repair_item_id,
        title: request.title,
        severity,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    // Child ids grow monotonically, so the newest child carries the
    // largest id
    let parent: &RepairItem = result
        .new_state
        .repair_item(request.repair_item_id)
        .map_err(translate_domain_error)?;
    let child_id: i64 = parent
        .children
        .iter()
        .map(|child| child.child_id)
        .max()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("added child is missing from the stored group"),
        })?;

    let message: String = format!("Successfully added child '{title}'");
    Ok(ChildItemResponse {
        health_check_id: request.health_check_id,
        repair_item_id: request.repair_item_id,
        child_id,
        title,
        version,
        message,
    })
}

/// Removes a child line from a group.
///
/// # Errors
///
/// Returns an error if the child or parent does not exist, or the
/// health check is deleted or terminal.
pub fn remove_child_item<S>(
    store: &mut S,
    request: &RemoveChildItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "remove_child_item")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::RemoveChildItem {
        repair_item_id: request.repair_item_id,
        child_id: request.child_id,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        format!(
            "Successfully removed child {} from repair item {}",
            request.child_id, request.repair_item_id
        ),
    ))
}

/// Promotes a child line to a standalone repair item.
///
/// # Errors
///
/// Returns an error if the child or parent does not exist, or the
/// health check is deleted or terminal.
pub fn promote_child_item<S>(
    store: &mut S,
    request: &PromoteChildItemRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<RepairItemResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "promote_child_item")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::PromoteChildItem {
        repair_item_id: request.repair_item_id,
        child_id: request.child_id,
    };

    let (result, version) = execute(store, request.health_check_id, command, actor, cause, now)?;

    created_item_response(&result, version)
}

/// Marks labour complete on an item or child.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
#[allow(clippy::too_many_arguments)]
pub fn mark_labour_complete<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    completed_by: String,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "mark_labour_complete")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::MarkLabourComplete {
        repair_item_id,
        child_id,
        completed_by,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully marked labour complete"),
    ))
}

/// Clears the labour completion marker on an item or child.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
pub fn undo_labour_complete<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "undo_labour_complete")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::UndoLabourComplete {
        repair_item_id,
        child_id,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully cleared labour completion"),
    ))
}

/// Marks parts complete on an item or child.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
#[allow(clippy::too_many_arguments)]
pub fn mark_parts_complete<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    completed_by: String,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "mark_parts_complete")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::MarkPartsComplete {
        repair_item_id,
        child_id,
        completed_by,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully marked parts complete"),
    ))
}

/// Clears the parts completion marker on an item or child.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
pub fn undo_parts_complete<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "undo_parts_complete")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::UndoPartsComplete {
        repair_item_id,
        child_id,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully cleared parts completion"),
    ))
}

/// Flags whether an item or child needs any labour at all.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
#[allow(clippy::too_many_arguments)]
pub fn set_no_labour_required<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    no_labour_required: bool,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "set_no_labour_required")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::SetNoLabourRequired {
        repair_item_id,
        child_id,
        no_labour_required,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully updated labour requirement"),
    ))
}

/// Flags whether an item or child needs any parts at all.
///
/// # Errors
///
/// Returns an error if the item or child does not exist or the health
/// check is deleted or terminal.
#[allow(clippy::too_many_arguments)]
pub fn set_no_parts_required<S>(
    store: &mut S,
    health_check_id: i64,
    repair_item_id: i64,
    child_id: Option<i64>,
    no_parts_required: bool,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<HealthCheckResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "set_no_parts_required")?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let command: Command = Command::SetNoPartsRequired {
        repair_item_id,
        child_id,
        no_parts_required,
    };

    let (result, version) = execute(store, health_check_id, command, actor, cause, now)?;

    Ok(mutation_response(
        &result,
        version,
        String::from("Successfully updated parts requirement"),
    ))
}

/// Assembles everything the overview screen shows for one health check.
///
/// Workflow badges, the financial summary, and the MRI summary are
/// derived on the fly; the MRI summary degrades to all zeroes when no
/// checklist was taken. Soft-deleted repair items are excluded.
///
/// # Errors
///
/// Returns an error if the health check does not exist or a read fails.
pub fn get_health_check_overview<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<HealthCheckOverviewResponse, ApiError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    AuthorizationService::authorize_workshop_action(authenticated_actor, "view_health_check")?;

    let state: HealthCheckState =
        load_state(store, health_check_id).map_err(translate_store_error)?;
    let timeline: Vec<TimelineEvent> = store
        .load_timeline(health_check_id)
        .map_err(translate_store_error)?;

    let health_check: &HealthCheck = &state.health_check;
    let workflow: WorkflowStatus =
        derive_workflow_status(health_check, &state.repair_items, &state.ledger);
    let financial: FinancialSummary = compute_totals(&state.repair_items, &state.ledger);
    let mri: MriSummary = summarize_mri_results(&state.mri_results);

    let repair_items: Vec<RepairItemInfo> = state
        .repair_items
        .iter()
        .filter(|item| !item.is_deleted())
        .map(|item| repair_item_info(item, &state.ledger))
        .collect();
    let timeline: Vec<TimelineEventInfo> = timeline.iter().map(timeline_event_info).collect();

    Ok(HealthCheckOverviewResponse {
        health_check: health_check_info(health_check),
        workflow: workflow_status_info(&workflow),
        financial: financial_summary_info(&financial),
        mri: mri_summary_info(mri),
        repair_items,
        timeline,
    })
}

/// Computes the capability flags an operator holds against one health
/// check, for UI gating.
///
/// # Errors
///
/// Returns an error if the health check does not exist.
pub fn get_health_check_capabilities<S>(
    store: &mut S,
    health_check_id: i64,
    authenticated_actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<HealthCheckCapabilities, ApiError>
where
    S: HealthCheckStore + ?Sized,
{
    let health_check: HealthCheck = store
        .load_health_check(health_check_id)
        .map_err(translate_store_error)?;

    Ok(compute_health_check_capabilities(
        authenticated_actor,
        &health_check,
        now,
    ))
}

/// Computes the capability flags the customer holds through the public
/// report link.
///
/// # Errors
///
/// Returns an error if the health check does not exist.
pub fn get_customer_capabilities<S>(
    store: &mut S,
    health_check_id: i64,
    now: OffsetDateTime,
) -> Result<CustomerCapabilities, ApiError>
where
    S: HealthCheckStore + ?Sized,
{
    let health_check: HealthCheck = store
        .load_health_check(health_check_id)
        .map_err(translate_store_error)?;

    Ok(compute_customer_capabilities(&health_check, now))
}

/// Shapes the response for a newly created standalone repair item.
///
/// Repair item ids grow monotonically, so the newest item carries the
/// largest id.
fn created_item_response(
    result: &TransitionResult,
    version: i64,
) -> Result<RepairItemResponse, ApiError> {
    let item: &RepairItem = result
        .new_state
        .repair_items
        .iter()
        .max_by_key(|item| item.repair_item_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("created repair item is missing from the stored state"),
        })?;

    Ok(RepairItemResponse {
        health_check_id: result.new_state.health_check.health_check_id,
        repair_item_id: item.repair_item_id,
        title: item.title.clone(),
        severity: item.severity.as_str().to_string(),
        version,
        message: format!("Successfully created repair item '{}'", item.title),
    })
}

/// Maps MRI checklist inputs to domain results, assigning sequential ids.
fn map_mri_inputs(
    health_check_id: i64,
    inputs: Vec<MriResultInput>,
) -> Result<Vec<MriResult>, ApiError> {
    let mut results: Vec<MriResult> = Vec::with_capacity(inputs.len());
    let mut next_id: i64 = 0;
    for input in inputs {
        next_id += 1;
        let rag: Option<RagStatus> = input
            .rag
            .map(|rag| rag.parse().map_err(translate_domain_error))
            .transpose()?;
        results.push(MriResult {
            mri_result_id: next_id,
            health_check_id,
            description: input.description,
            rag,
            price: input.price,
        });
    }
    Ok(results)
}

/// Maps inspection finding inputs to domain results, assigning
/// sequential ids.
fn map_check_inputs(
    health_check_id: i64,
    inputs: Vec<CheckResultInput>,
) -> Result<Vec<CheckResult>, ApiError> {
    let mut results: Vec<CheckResult> = Vec::with_capacity(inputs.len());
    let mut next_id: i64 = 0;
    for input in inputs {
        next_id += 1;
        let rag: Option<RagStatus> = input
            .rag
            .map(|rag| rag.parse().map_err(translate_domain_error))
            .transpose()?;
        results.push(CheckResult {
            check_result_id: next_id,
            health_check_id,
            template_item_id: input.template_item_id,
            section: input.section,
            label: input.label,
            rag,
            value: input.value,
            notes: input.notes,
            media: input.media,
        });
    }
    Ok(results)
}

/// Maps labour line inputs to domain pricing lines.
fn map_labour_lines(inputs: Vec<LabourLineInput>) -> Vec<LabourEntry> {
    inputs
        .into_iter()
        .map(|line| {
            LabourEntry::new(
                line.code,
                line.description,
                line.hours,
                line.rate,
                line.discount_percent,
            )
        })
        .collect()
}

/// Maps parts line inputs to domain pricing lines.
fn map_parts_lines(inputs: Vec<PartsLineInput>) -> Vec<PartsEntry> {
    inputs
        .into_iter()
        .map(|line| {
            PartsEntry::new(
                line.code,
                line.description,
                line.quantity,
                line.unit_price,
                line.discount_percent,
            )
        })
        .collect()
}

fn health_check_info(health_check: &HealthCheck) -> HealthCheckInfo {
    HealthCheckInfo {
        health_check_id: health_check.health_check_id,
        organization_id: health_check.organization_id,
        site_id: health_check.site_id,
        vehicle_reg: health_check.vehicle_reg.clone(),
        customer_name: health_check.customer_name.clone(),
        status: health_check.status.as_str().to_string(),
        assigned_to: health_check.assigned_to.clone(),
        mileage: health_check.mileage,
        red_count: health_check.red_count,
        amber_count: health_check.amber_count,
        green_count: health_check.green_count,
        parts_total: health_check.parts_total,
        labour_total: health_check.labour_total,
        amount_total: health_check.amount_total,
        sent_at: health_check.sent_at,
        first_opened_at: health_check.first_opened_at,
        token_expires_at: health_check.token_expires_at,
        version: health_check.version,
    }
}

fn badge_info(badge: &WorkflowBadge) -> BadgeInfo {
    BadgeInfo {
        state: badge.state.as_str().to_string(),
        completed_by: badge.completed_by.clone(),
        completed_at: badge.completed_at,
    }
}

fn workflow_status_info(workflow: &WorkflowStatus) -> WorkflowStatusInfo {
    WorkflowStatusInfo {
        technician: badge_info(&workflow.technician),
        labour: badge_info(&workflow.labour),
        parts: badge_info(&workflow.parts),
        authorisation: badge_info(&workflow.authorisation),
    }
}

const fn financial_summary_info(summary: &FinancialSummary) -> FinancialSummaryInfo {
    FinancialSummaryInfo {
        total_identified: summary.total_identified,
        total_authorised: summary.total_authorised,
        total_declined: summary.total_declined,
        total_pending: summary.total_pending,
        completed_value: summary.completed_value,
        outstanding_value: summary.outstanding_value,
    }
}

const fn mri_summary_info(summary: MriSummary) -> MriSummaryInfo {
    MriSummaryInfo {
        red: summary.red,
        amber: summary.amber,
        green: summary.green,
        unanswered: summary.unanswered,
    }
}

fn child_item_info(child: &RepairItemChild) -> ChildItemInfo {
    ChildItemInfo {
        child_id: child.child_id,
        title: child.title.clone(),
        severity: child.severity.as_str().to_string(),
        total_price: child.total_price,
    }
}

fn repair_item_info(item: &RepairItem, ledger: &AuthorizationLedger) -> RepairItemInfo {
    RepairItemInfo {
        repair_item_id: item.repair_item_id,
        title: item.title.clone(),
        severity: item.severity.as_str().to_string(),
        parts_cost: item.parts_cost,
        labour_cost: item.labour_cost,
        total_price: item.total_price,
        effective_total: item.effective_total(),
        customer_visible: item.customer_visible,
        decision: ledger
            .decision_for(item.repair_item_id)
            .map(|authorization| authorization.decision.as_str().to_string()),
        children: item.children.iter().map(child_item_info).collect(),
    }
}

fn timeline_event_info(event: &TimelineEvent) -> TimelineEventInfo {
    TimelineEventInfo {
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        before_status: event.before.status.clone(),
        after_status: event.after.status.clone(),
        occurred_at: event.occurred_at,
    }
}
