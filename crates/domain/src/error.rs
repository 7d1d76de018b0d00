// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Health check status string is not a recognized status.
    InvalidHealthCheckStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// RAG status string is not a recognized value.
    InvalidRagStatus {
        /// The unrecognized RAG string.
        status: String,
    },
    /// Severity string is not a recognized value.
    InvalidSeverity {
        /// The unrecognized severity string.
        severity: String,
    },
    /// Authorization decision string is not a recognized value.
    InvalidDecision {
        /// The unrecognized decision string.
        decision: String,
    },
    /// Token validity period is not one of the permitted durations.
    InvalidTokenValidity {
        /// The requested number of days.
        days: u16,
    },
    /// Publish was requested with neither email nor SMS selected.
    NoSendChannelSelected,
    /// Publish was requested over a channel with no contact details on file.
    MissingContactInfo {
        /// The channel lacking contact details.
        channel: String,
    },
    /// An operation requires the technician inspection to be complete.
    TechnicianIncomplete {
        /// The health check the operation targeted.
        health_check_id: i64,
    },
    /// Check-in data required by the operation is missing.
    MissingCheckInData {
        /// The missing field.
        field: String,
    },
    /// Health check does not exist in the loaded state.
    HealthCheckNotFound {
        /// The requested health check.
        health_check_id: i64,
    },
    /// Health check has been soft deleted.
    HealthCheckDeleted {
        /// The deleted health check.
        health_check_id: i64,
    },
    /// Inspection finding does not exist on the health check.
    CheckResultNotFound {
        /// The requested check result.
        check_result_id: i64,
    },
    /// Repair item does not exist on the health check.
    RepairItemNotFound {
        /// The requested repair item.
        repair_item_id: i64,
    },
    /// Repair item has been soft deleted.
    RepairItemDeleted {
        /// The deleted repair item.
        repair_item_id: i64,
    },
    /// Child item does not exist under the given repair item.
    ChildItemNotFound {
        /// The parent repair item.
        repair_item_id: i64,
        /// The requested child.
        child_id: i64,
    },
    /// A child with the same title already exists in the group.
    DuplicateChildTitle {
        /// The parent repair item.
        repair_item_id: i64,
        /// The duplicate title.
        title: String,
    },
    /// Repair item cannot receive a customer decision.
    ItemNotDecidable {
        /// The repair item.
        repair_item_id: i64,
        /// Why the item is not decidable.
        reason: String,
    },
    /// Repair item title is empty or invalid.
    InvalidTitle(String),
    /// A monetary amount is invalid.
    InvalidAmount {
        /// The field holding the invalid amount.
        field: String,
        /// The invalid value.
        amount: Decimal,
    },
    /// A discount percentage is outside 0 to 100.
    InvalidDiscount {
        /// The invalid percentage.
        discount: Decimal,
    },
    /// Recorded mileage is negative.
    InvalidMileage {
        /// The invalid mileage value.
        mileage: i64,
    },
    /// Vehicle registration is empty or invalid.
    InvalidVehicleReg(String),
    /// Customer name is empty or invalid.
    InvalidCustomerName(String),
    /// Presented public token does not match the issued token.
    TokenMismatch,
    /// No public token has been issued for the health check.
    TokenNotIssued,
    /// The public token has passed its expiry time.
    TokenExpired {
        /// When the token expired.
        expired_at: time::OffsetDateTime,
    },
    /// Completion cannot be recorded because authorised work is outstanding.
    OutstandingWorkRemaining {
        /// Total value of authorised but incomplete work.
        outstanding_value: Decimal,
    },
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        timestamp: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHealthCheckStatus { status } => {
                write!(f, "Invalid health check status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidRagStatus { status } => write!(f, "Invalid RAG status: {status}"),
            Self::InvalidSeverity { severity } => write!(f, "Invalid severity: {severity}"),
            Self::InvalidDecision { decision } => {
                write!(f, "Invalid authorization decision: {decision}")
            }
            Self::InvalidTokenValidity { days } => {
                write!(
                    f,
                    "Invalid token validity: {days} days. Must be 3, 7, 14, or 30"
                )
            }
            Self::NoSendChannelSelected => {
                write!(f, "At least one send channel (email or SMS) is required")
            }
            Self::MissingContactInfo { channel } => {
                write!(f, "Cannot send via {channel}: no contact details on file")
            }
            Self::TechnicianIncomplete { health_check_id } => {
                write!(
                    f,
                    "Technician inspection for health check {health_check_id} is not complete"
                )
            }
            Self::MissingCheckInData { field } => {
                write!(f, "Check-in data is missing: {field}")
            }
            Self::HealthCheckNotFound { health_check_id } => {
                write!(f, "Health check {health_check_id} not found")
            }
            Self::HealthCheckDeleted { health_check_id } => {
                write!(f, "Health check {health_check_id} has been deleted")
            }
            Self::CheckResultNotFound { check_result_id } => {
                write!(f, "Check result {check_result_id} not found")
            }
            Self::RepairItemNotFound { repair_item_id } => {
                write!(f, "Repair item {repair_item_id} not found")
            }
            Self::RepairItemDeleted { repair_item_id } => {
                write!(f, "Repair item {repair_item_id} has been deleted")
            }
            Self::ChildItemNotFound {
                repair_item_id,
                child_id,
            } => {
                write!(
                    f,
                    "Child item {child_id} not found under repair item {repair_item_id}"
                )
            }
            Self::DuplicateChildTitle {
                repair_item_id,
                title,
            } => {
                write!(
                    f,
                    "Child titled '{title}' already exists under repair item {repair_item_id}"
                )
            }
            Self::ItemNotDecidable {
                repair_item_id,
                reason,
            } => {
                write!(
                    f,
                    "Repair item {repair_item_id} cannot receive a decision: {reason}"
                )
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidAmount { field, amount } => {
                write!(f, "Invalid amount for {field}: {amount}")
            }
            Self::InvalidDiscount { discount } => {
                write!(
                    f,
                    "Invalid discount: {discount}. Must be between 0 and 100"
                )
            }
            Self::InvalidMileage { mileage } => {
                write!(f, "Invalid mileage: {mileage}. Must not be negative")
            }
            Self::InvalidVehicleReg(msg) => write!(f, "Invalid vehicle registration: {msg}"),
            Self::InvalidCustomerName(msg) => write!(f, "Invalid customer name: {msg}"),
            Self::TokenMismatch => write!(f, "Presented token does not match the issued token"),
            Self::TokenNotIssued => {
                write!(f, "No public access token has been issued")
            }
            Self::TokenExpired { expired_at } => {
                write!(f, "Public access token expired at {expired_at}")
            }
            Self::OutstandingWorkRemaining { outstanding_value } => {
                write!(
                    f,
                    "Authorised work worth {outstanding_value} is still outstanding"
                )
            }
            Self::TimestampParseError { timestamp, error } => {
                write!(f, "Failed to parse timestamp '{timestamp}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
