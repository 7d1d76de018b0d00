// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle transitions of a health check, from arrival through closure.
//!
//! Every function here is pure: it validates against the current state,
//! clones it, builds the new state, and returns it with the timeline
//! event recording the change. Failure leaves the input untouched.

use crate::error::CoreError;
use crate::state::{HealthCheckState, TransitionResult};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use vhc_flow_audit::{Action, Actor, Cause, StateSnapshot, TimelineEvent};
use vhc_flow_domain::{
    CheckResult, DomainError, FinancialSummary, HealthCheckStatus, MriResult, RepairItem,
    SendChannels, TokenValidity, compute_totals, validate_mileage,
};

/// Records that the vehicle has arrived on site.
pub(crate) fn record_arrival(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::AwaitingCheckin)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::AwaitingCheckin;
    new_state.health_check.arrived_at = Some(now);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("RecordArrival"),
        Some(format!(
            "Vehicle '{}' arrived on site",
            state.health_check.vehicle_reg
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

/// Completes check-in: records the mileage, stores the MRI answers, and
/// raises a repair item for every flagged answer.
///
/// # Errors
///
/// Returns an error if the vehicle has not arrived, the mileage is
/// missing or negative, or a flagged MRI answer cannot be turned into
/// a repair item.
pub(crate) fn complete_check_in(
    state: &HealthCheckState,
    mileage: Option<i64>,
    mri_results: Vec<MriResult>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    // Skip check-in is the only path into Created from AwaitingArrival
    if state.health_check.status != HealthCheckStatus::AwaitingCheckin {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: state.health_check.status.as_str().to_string(),
                to: HealthCheckStatus::Created.as_str().to_string(),
                reason: String::from("check-in requires an arrived vehicle"),
            },
        ));
    }

    let mileage: i64 = mileage.ok_or(DomainError::MissingCheckInData {
        field: String::from("mileage"),
    })?;
    validate_mileage(mileage)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Created;
    new_state.health_check.mileage = Some(mileage);

    let mut raised: usize = 0;
    for result in &mri_results {
        if !result.is_flagged() {
            continue;
        }
        let item: RepairItem =
            RepairItem::from_mri_result(new_state.next_repair_item_id(), result)?;
        new_state.repair_items.push(item);
        raised += 1;
    }
    new_state.mri_results = mri_results;
    new_state.refresh_totals();

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("CompleteCheckIn"),
        Some(format!(
            "Checked in at {mileage} miles; {raised} repair items raised from the MRI checklist"
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

/// Skips check-in entirely, recording why. No MRI items are raised.
pub(crate) fn skip_check_in(
    state: &HealthCheckState,
    reason: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::DomainViolation(
            DomainError::MissingCheckInData {
                field: String::from("skip reason"),
            },
        ));
    }
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Created)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Created;
    new_state.health_check.skip_checkin_reason = Some(reason.clone());

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("SkipCheckIn"),
        Some(format!("Check-in skipped: {reason}")),
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

/// Assigns the inspection to a technician.
pub(crate) fn assign_technician(
    state: &HealthCheckState,
    technician: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Assigned)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Assigned;
    new_state.health_check.assigned_to = Some(technician.clone());

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("AssignTechnician"),
        Some(format!("Assigned to {technician}")),
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

/// Starts the inspection, stamping when the technician began.
pub(crate) fn start_inspection(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    // Resume is the only other route into InProgress
    if state.health_check.status != HealthCheckStatus::Assigned {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: state.health_check.status.as_str().to_string(),
                to: HealthCheckStatus::InProgress.as_str().to_string(),
                reason: String::from("an inspection can only start from an assigned job"),
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::InProgress;
    new_state.health_check.tech_started_at = Some(now);

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("StartInspection"), None);
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

/// Pauses a running inspection.
pub(crate) fn pause_inspection(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Paused)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Paused;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("PauseInspection"), None);
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

/// Resumes a paused inspection. The original start time is kept.
pub(crate) fn resume_inspection(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    if state.health_check.status != HealthCheckStatus::Paused {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: state.health_check.status.as_str().to_string(),
                to: HealthCheckStatus::InProgress.as_str().to_string(),
                reason: String::from("only a paused inspection can resume"),
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::InProgress;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("ResumeInspection"), None);
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

/// Completes the inspection: stores the findings, stamps the finish
/// time, and refreshes the RAG counts on the health check.
pub(crate) fn complete_inspection(
    state: &HealthCheckState,
    results: Vec<CheckResult>,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::TechCompleted)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::TechCompleted;
    new_state.health_check.tech_completed_at = Some(now);
    new_state.check_results = results;
    new_state.refresh_rag_counts();

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("CompleteInspection"),
        Some(format!(
            "Inspection complete: {} red, {} amber, {} green",
            new_state.health_check.red_count,
            new_state.health_check.amber_count,
            new_state.health_check.green_count
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

/// Moves the completed inspection into advisor review.
///
/// # Errors
///
/// Returns an error if the technician has not recorded completion.
pub(crate) fn start_review(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::AwaitingReview)?;

    if state.health_check.tech_completed_at.is_none() {
        return Err(CoreError::DomainViolation(
            DomainError::TechnicianIncomplete {
                health_check_id: state.health_check.health_check_id,
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::AwaitingReview;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("StartReview"), None);
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

/// Marks the report ready to send, at advisor discretion.
pub(crate) fn mark_ready(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::ReadyToSend)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::ReadyToSend;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("MarkReady"),
        Some(format!(
            "Report ready to send; total {}",
            state.health_check.amount_total
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

/// Publishes the report to the customer: stores the freshly issued
/// token, computes its expiry, and stamps the send.
///
/// A resend reissues the token and recomputes the expiry from the new
/// send time. Notification delivery happens outside this function and
/// never rolls the transition back.
///
/// # Errors
///
/// Returns an error if the report is not in a publishable status, no
/// channel is selected, or a selected channel has no contact details.
pub(crate) fn publish(
    state: &HealthCheckState,
    channels: SendChannels,
    validity: TokenValidity,
    token: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Sent)?;

    if !channels.any() {
        return Err(CoreError::DomainViolation(
            DomainError::NoSendChannelSelected,
        ));
    }
    if channels.email && state.health_check.customer_email.is_none() {
        return Err(CoreError::DomainViolation(DomainError::MissingContactInfo {
            channel: String::from("email"),
        }));
    }
    if channels.sms && state.health_check.customer_mobile.is_none() {
        return Err(CoreError::DomainViolation(DomainError::MissingContactInfo {
            channel: String::from("sms"),
        }));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Sent;
    new_state.health_check.public_token = Some(token);
    new_state.health_check.token_expires_at = Some(now + validity.duration());
    new_state.health_check.sent_at = Some(now);
    new_state.health_check.unable_to_send_reason = None;

    let channel_desc: &str = match (channels.email, channels.sms) {
        (true, true) => "email and SMS",
        (true, false) => "email",
        _ => "SMS",
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("Publish"),
        Some(format!(
            "Report sent via {channel_desc}; link valid {} days",
            validity.as_days()
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

/// Records that the report could not be sent. The status stays at
/// `ReadyToSend` so the advisor can retry or chase by phone.
pub(crate) fn record_unable_to_send(
    state: &HealthCheckState,
    reason: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    if state.health_check.status != HealthCheckStatus::ReadyToSend {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: state.health_check.status.as_str().to_string(),
                to: HealthCheckStatus::ReadyToSend.as_str().to_string(),
                reason: String::from("a send failure can only be recorded on a report awaiting send"),
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.unable_to_send_reason = Some(reason.clone());

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("RecordUnableToSend"),
        Some(format!("Unable to send report: {reason}")),
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

/// Marks every piece of authorised work done.
///
/// # Errors
///
/// Returns an error if authorised work remains outstanding.
pub(crate) fn mark_completed(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Completed)?;

    let summary: FinancialSummary = compute_totals(&state.repair_items, &state.ledger);
    if summary.outstanding_value > Decimal::ZERO {
        return Err(CoreError::DomainViolation(
            DomainError::OutstandingWorkRemaining {
                outstanding_value: summary.outstanding_value,
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Completed;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("MarkCompleted"),
        Some(format!(
            "All authorised work complete; value {}",
            summary.completed_value
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

/// Closes out the visit. Terminal and irreversible.
pub(crate) fn close(
    state: &HealthCheckState,
    closed_by: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Closed)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Closed;
    new_state.health_check.closed_at = Some(now);
    new_state.health_check.closed_by = Some(closed_by.clone());

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("Close"),
        Some(format!("Closed by {closed_by}")),
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

/// Cancels the visit with a reason. Terminal.
pub(crate) fn cancel(
    state: &HealthCheckState,
    reason: String,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Cancelled)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Cancelled;
    new_state.health_check.cancelled_reason = Some(reason.clone());

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("Cancel"),
        Some(format!("Cancelled: {reason}")),
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

/// Records that the customer never arrived. Terminal.
pub(crate) fn mark_no_show(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::NoShow)?;

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::NoShow;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from("MarkNoShow"), None);
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

/// Marks the customer link expired. The caller observes the lapse and
/// issues this command; a status never advances on time alone.
///
/// # Errors
///
/// Returns an error if no issued token has actually lapsed.
pub(crate) fn mark_expired(
    state: &HealthCheckState,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    state
        .health_check
        .status
        .validate_transition(HealthCheckStatus::Expired)?;

    if !state.health_check.token_expired(now) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: state.health_check.status.as_str().to_string(),
                to: HealthCheckStatus::Expired.as_str().to_string(),
                reason: String::from("the public token has not lapsed"),
            },
        ));
    }

    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: HealthCheckState = state.clone();
    new_state.health_check.status = HealthCheckStatus::Expired;

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(
        String::from("MarkExpired"),
        Some(String::from("Customer link expired without a full response")),
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
