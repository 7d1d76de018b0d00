// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an operator is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace backend authorization checks.

use crate::auth::{AuthenticatedActor, Role};
use crate::request_response::{Capability, CustomerCapabilities, HealthCheckCapabilities};
use time::OffsetDateTime;
use vhc_flow_domain::{HealthCheck, HealthCheckStatus};

/// Computes capabilities an operator holds against one health check.
///
/// Capabilities depend on:
/// - Operator role
/// - The health check's current lifecycle status
/// - Token expiry, for the expired transition
///
/// # Arguments
///
/// * `actor` - The authenticated actor
/// * `health_check` - The health check being evaluated
/// * `now` - The current time, for token expiry comparison
///
/// # Returns
///
/// A `HealthCheckCapabilities` struct with all capability flags set.
#[must_use]
pub fn compute_health_check_capabilities(
    actor: &AuthenticatedActor,
    health_check: &HealthCheck,
    now: OffsetDateTime,
) -> HealthCheckCapabilities {
    // Deleted records offer no capabilities
    if health_check.is_deleted() {
        return HealthCheckCapabilities {
            can_record_arrival: Capability::Denied,
            can_complete_check_in: Capability::Denied,
            can_skip_check_in: Capability::Denied,
            can_assign_technician: Capability::Denied,
            can_start_inspection: Capability::Denied,
            can_pause_inspection: Capability::Denied,
            can_resume_inspection: Capability::Denied,
            can_complete_inspection: Capability::Denied,
            can_start_review: Capability::Denied,
            can_mark_ready: Capability::Denied,
            can_publish: Capability::Denied,
            can_record_unable_to_send: Capability::Denied,
            can_edit_items: Capability::Denied,
            can_record_completion: Capability::Denied,
            can_mark_completed: Capability::Denied,
            can_close: Capability::Denied,
            can_cancel: Capability::Denied,
            can_mark_no_show: Capability::Denied,
            can_mark_expired: Capability::Denied,
        };
    }

    let status = health_check.status;
    let admin = actor.role == Role::Admin;
    let advisor = matches!(actor.role, Role::Admin | Role::Advisor);
    // Every staff role may work the inspection and completion flow
    let workshop = true;
    let live = !status.is_terminal();

    HealthCheckCapabilities {
        can_record_arrival: Capability::from_bool(
            advisor && status == HealthCheckStatus::AwaitingArrival,
        ),
        can_complete_check_in: Capability::from_bool(
            advisor && status == HealthCheckStatus::AwaitingCheckin,
        ),
        can_skip_check_in: Capability::from_bool(
            admin
                && matches!(
                    status,
                    HealthCheckStatus::AwaitingArrival | HealthCheckStatus::AwaitingCheckin
                ),
        ),
        can_assign_technician: Capability::from_bool(
            advisor && status == HealthCheckStatus::Created,
        ),
        can_start_inspection: Capability::from_bool(
            workshop && status == HealthCheckStatus::Assigned,
        ),
        can_pause_inspection: Capability::from_bool(
            workshop && status == HealthCheckStatus::InProgress,
        ),
        can_resume_inspection: Capability::from_bool(
            workshop && status == HealthCheckStatus::Paused,
        ),
        can_complete_inspection: Capability::from_bool(
            workshop && status == HealthCheckStatus::InProgress,
        ),
        can_start_review: Capability::from_bool(
            advisor
                && status == HealthCheckStatus::TechCompleted
                && health_check.tech_completed_at.is_some(),
        ),
        can_mark_ready: Capability::from_bool(
            advisor
                && matches!(
                    status,
                    HealthCheckStatus::AwaitingReview | HealthCheckStatus::AwaitingPricing
                ),
        ),
        can_publish: Capability::from_bool(advisor && status.allows_publish()),
        can_record_unable_to_send: Capability::from_bool(
            advisor && status == HealthCheckStatus::ReadyToSend,
        ),
        can_edit_items: Capability::from_bool(workshop && live),
        can_record_completion: Capability::from_bool(workshop && live),
        can_mark_completed: Capability::from_bool(
            advisor
                && matches!(
                    status,
                    HealthCheckStatus::Authorized | HealthCheckStatus::PartialResponse
                ),
        ),
        can_close: Capability::from_bool(
            advisor
                && matches!(
                    status,
                    HealthCheckStatus::Authorized
                        | HealthCheckStatus::Declined
                        | HealthCheckStatus::PartialResponse
                        | HealthCheckStatus::Completed
                ),
        ),
        // Completed visits close out; they cannot be cancelled
        can_cancel: Capability::from_bool(
            advisor && live && status != HealthCheckStatus::Completed,
        ),
        can_mark_no_show: Capability::from_bool(
            advisor
                && matches!(
                    status,
                    HealthCheckStatus::AwaitingArrival | HealthCheckStatus::AwaitingCheckin
                ),
        ),
        can_mark_expired: Capability::from_bool(
            advisor
                && matches!(status, HealthCheckStatus::Sent | HealthCheckStatus::Opened)
                && health_check.token_expired(now),
        ),
    }
}

/// Computes capabilities the customer holds through the public report link.
///
/// # Arguments
///
/// * `health_check` - The health check being evaluated
/// * `now` - The current time, for token expiry comparison
///
/// # Returns
///
/// A `CustomerCapabilities` struct with all capability flags set.
#[must_use]
pub fn compute_customer_capabilities(
    health_check: &HealthCheck,
    now: OffsetDateTime,
) -> CustomerCapabilities {
    // Opening and deciding share one gate: a live token on a status
    // the customer may access
    let gate = !health_check.is_deleted()
        && health_check.status.allows_customer_access()
        && health_check.public_token.is_some()
        && !health_check.token_expired(now);

    CustomerCapabilities {
        can_open: Capability::from_bool(gate),
        can_decide: Capability::from_bool(gate),
    }
}
