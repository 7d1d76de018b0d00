// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::send_policy::SendPolicyError;
use vhc_flow::CoreError;
use vhc_flow_domain::DomainError;
use vhc_flow_store::StoreError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core/store errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A concurrent write or duplicate record was detected.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Send policy violation.
    SendPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::SendPolicyViolation { message } => {
                write!(f, "Send policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<SendPolicyError> for ApiError {
    fn from(err: SendPolicyError) -> Self {
        Self::SendPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidHealthCheckStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unrecognized health check status: {status}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message: format!("Cannot move from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::InvalidRagStatus { status } => ApiError::InvalidInput {
            field: String::from("rag"),
            message: format!("Unrecognized RAG status: {status}"),
        },
        DomainError::InvalidSeverity { severity } => ApiError::InvalidInput {
            field: String::from("severity"),
            message: format!("Unrecognized severity: {severity}"),
        },
        DomainError::InvalidDecision { decision } => ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("Unrecognized decision: {decision}"),
        },
        DomainError::InvalidTokenValidity { days } => ApiError::InvalidInput {
            field: String::from("validity_days"),
            message: format!("Link validity must be 3, 7, 14 or 30 days, not {days}"),
        },
        DomainError::NoSendChannelSelected => ApiError::DomainRuleViolation {
            rule: String::from("send_channel_required"),
            message: String::from("At least one of email or SMS must be selected"),
        },
        DomainError::MissingContactInfo { channel } => ApiError::DomainRuleViolation {
            rule: String::from("contact_info_required"),
            message: format!("No {channel} contact details are on file for the customer"),
        },
        DomainError::TechnicianIncomplete { health_check_id } => ApiError::DomainRuleViolation {
            rule: String::from("technician_completion_required"),
            message: format!(
                "Health check {health_check_id} has no recorded technician completion"
            ),
        },
        DomainError::MissingCheckInData { field } => ApiError::InvalidInput {
            message: format!("'{field}' is required to complete check-in"),
            field,
        },
        DomainError::HealthCheckNotFound { health_check_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Health check"),
            message: format!("Health check {health_check_id} does not exist"),
        },
        DomainError::HealthCheckDeleted { health_check_id } => ApiError::DomainRuleViolation {
            rule: String::from("health_check_active"),
            message: format!("Health check {health_check_id} has been deleted"),
        },
        DomainError::CheckResultNotFound { check_result_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Check result"),
            message: format!("Check result {check_result_id} does not exist"),
        },
        DomainError::RepairItemNotFound { repair_item_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Repair item"),
            message: format!("Repair item {repair_item_id} does not exist"),
        },
        DomainError::RepairItemDeleted { repair_item_id } => ApiError::DomainRuleViolation {
            rule: String::from("repair_item_active"),
            message: format!("Repair item {repair_item_id} has been deleted"),
        },
        DomainError::ChildItemNotFound {
            repair_item_id,
            child_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Child item"),
            message: format!("Child {child_id} does not exist under repair item {repair_item_id}"),
        },
        DomainError::DuplicateChildTitle {
            repair_item_id,
            title,
        } => ApiError::DomainRuleViolation {
            rule: String::from("unique_child_title"),
            message: format!(
                "Repair item {repair_item_id} already has a child titled '{title}'"
            ),
        },
        DomainError::ItemNotDecidable {
            repair_item_id,
            reason,
        } => ApiError::DomainRuleViolation {
            rule: String::from("item_decidable"),
            message: format!(
                "Repair item {repair_item_id} cannot take a customer decision: {reason}"
            ),
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidAmount { field, amount } => ApiError::InvalidInput {
            field,
            message: format!("Invalid amount: {amount}"),
        },
        DomainError::InvalidDiscount { discount } => ApiError::InvalidInput {
            field: String::from("discount_percent"),
            message: format!("Discount must be between 0 and 100, not {discount}"),
        },
        DomainError::InvalidMileage { mileage } => ApiError::InvalidInput {
            field: String::from("mileage"),
            message: format!("Mileage cannot be negative: {mileage}"),
        },
        DomainError::InvalidVehicleReg(msg) => ApiError::InvalidInput {
            field: String::from("vehicle_reg"),
            message: msg,
        },
        DomainError::InvalidCustomerName(msg) => ApiError::InvalidInput {
            field: String::from("customer_name"),
            message: msg,
        },
        DomainError::TokenMismatch => ApiError::DomainRuleViolation {
            rule: String::from("public_token_match"),
            message: String::from("The presented link token does not match the issued token"),
        },
        DomainError::TokenNotIssued => ApiError::DomainRuleViolation {
            rule: String::from("public_token_issued"),
            message: String::from("No public link has been issued for this health check"),
        },
        DomainError::TokenExpired { expired_at } => ApiError::DomainRuleViolation {
            rule: String::from("public_token_unexpired"),
            message: format!("The public link expired at {expired_at}"),
        },
        DomainError::OutstandingWorkRemaining { outstanding_value } => {
            ApiError::DomainRuleViolation {
                rule: String::from("no_outstanding_work"),
                message: format!(
                    "Authorised work worth {outstanding_value} is still outstanding"
                ),
            }
        }
        DomainError::TimestampParseError { timestamp, error } => ApiError::InvalidInput {
            field: String::from("timestamp"),
            message: format!("Failed to parse timestamp '{timestamp}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a store error into an API error.
///
/// Version conflicts and duplicate records surface as conflicts so the
/// caller can reload and retry; backend failures stay opaque.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::HealthCheckNotFound(health_check_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Health check"),
            message: format!("Health check {health_check_id} does not exist"),
        },
        StoreError::VersionConflict {
            health_check_id,
            expected,
            actual,
        } => ApiError::Conflict {
            message: format!(
                "Health check {health_check_id} was modified concurrently: write carried version {expected}, store holds {actual}"
            ),
        },
        StoreError::DuplicateRecord { record, id } => ApiError::Conflict {
            message: format!("A {record} with id {id} already exists"),
        },
        StoreError::Backend(msg) => ApiError::Internal {
            message: format!("Storage failure: {msg}"),
        },
    }
}
