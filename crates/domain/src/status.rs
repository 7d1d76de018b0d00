// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Health check status tracking and transition logic.
//!
//! This module defines the health check lifecycle states and valid
//! transitions. Status transitions are operator- or customer-initiated
//! only; the system never advances status based on time alone. Expiry
//! is recorded by an explicit operation when a caller observes it.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a health check from booking through closure.
///
/// Status is tracked per health check. The response states
/// (`PartialResponse`, `Authorized`, `Declined`) are derived from the
/// authorization ledger and may move between each other as the customer
/// revises decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCheckStatus {
    /// Booked; the vehicle has not yet arrived
    AwaitingArrival,
    /// Vehicle arrived; check-in data not yet captured
    AwaitingCheckin,
    /// Check-in complete; not yet assigned to a technician
    Created,
    /// Assigned to a technician; inspection not yet started
    Assigned,
    /// Technician inspection underway
    InProgress,
    /// Inspection paused by the technician
    Paused,
    /// Technician finished recording findings
    TechCompleted,
    /// Advisor review of findings underway
    AwaitingReview,
    /// Advisor is pricing identified work
    AwaitingPricing,
    /// Priced and approved for sending to the customer
    ReadyToSend,
    /// Report link sent to the customer
    Sent,
    /// Customer opened the report link
    Opened,
    /// Customer decided some but not all items, or mixed decisions
    PartialResponse,
    /// Customer approved every decidable item
    Authorized,
    /// Customer declined every decidable item
    Declined,
    /// All authorised work is done
    Completed,
    /// Visit closed out; no further changes
    Closed,
    /// Public access token lapsed before a full response
    Expired,
    /// Visit cancelled by the shop
    Cancelled,
    /// Customer never arrived
    NoShow,
}

impl HealthCheckStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingArrival => "awaiting_arrival",
            Self::AwaitingCheckin => "awaiting_checkin",
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Paused => "paused",
            Self::TechCompleted => "tech_completed",
            Self::AwaitingReview => "awaiting_review",
            Self::AwaitingPricing => "awaiting_pricing",
            Self::ReadyToSend => "ready_to_send",
            Self::Sent => "sent",
            Self::Opened => "opened",
            Self::PartialResponse => "partial_response",
            Self::Authorized => "authorized",
            Self::Declined => "declined",
            Self::Completed => "completed",
            Self::Closed => "closed",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHealthCheckStatus` if the string is not
    /// a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "awaiting_arrival" => Ok(Self::AwaitingArrival),
            "awaiting_checkin" => Ok(Self::AwaitingCheckin),
            "created" => Ok(Self::Created),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "tech_completed" => Ok(Self::TechCompleted),
            "awaiting_review" => Ok(Self::AwaitingReview),
            "awaiting_pricing" => Ok(Self::AwaitingPricing),
            "ready_to_send" => Ok(Self::ReadyToSend),
            "sent" => Ok(Self::Sent),
            "opened" => Ok(Self::Opened),
            "partial_response" => Ok(Self::PartialResponse),
            "authorized" => Ok(Self::Authorized),
            "declined" => Ok(Self::Declined),
            "completed" => Ok(Self::Completed),
            "closed" => Ok(Self::Closed),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(DomainError::InvalidHealthCheckStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Cancelled | Self::NoShow)
    }

    /// Returns true if this status reflects a customer response.
    #[must_use]
    pub const fn is_response(&self) -> bool {
        matches!(
            self,
            Self::PartialResponse | Self::Authorized | Self::Declined
        )
    }

    /// Returns true if the report may be published (or re-published)
    /// from this status.
    #[must_use]
    pub const fn allows_publish(&self) -> bool {
        matches!(self, Self::ReadyToSend | Self::Sent | Self::Expired)
    }

    /// Returns true if the customer may open the report and record
    /// decisions from this status.
    #[must_use]
    pub const fn allows_customer_access(&self) -> bool {
        matches!(
            self,
            Self::Sent | Self::Opened | Self::PartialResponse | Self::Authorized | Self::Declined
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        // Valid transitions based on current state
        let valid = match self {
            Self::AwaitingArrival => matches!(
                new_status,
                Self::AwaitingCheckin | Self::Created | Self::Cancelled | Self::NoShow
            ),
            Self::AwaitingCheckin => {
                matches!(new_status, Self::Created | Self::Cancelled | Self::NoShow)
            }
            Self::Created => matches!(new_status, Self::Assigned | Self::Cancelled),
            Self::Assigned => matches!(new_status, Self::InProgress | Self::Cancelled),
            Self::InProgress => matches!(
                new_status,
                Self::Paused | Self::TechCompleted | Self::Cancelled
            ),
            Self::Paused => matches!(new_status, Self::InProgress | Self::Cancelled),
            Self::TechCompleted => matches!(new_status, Self::AwaitingReview | Self::Cancelled),
            Self::AwaitingReview => matches!(
                new_status,
                Self::AwaitingPricing | Self::ReadyToSend | Self::Cancelled
            ),
            Self::AwaitingPricing => matches!(new_status, Self::ReadyToSend | Self::Cancelled),
            Self::ReadyToSend => matches!(new_status, Self::Sent | Self::Cancelled),
            // Sent permits a re-send to the same status
            Self::Sent => matches!(
                new_status,
                Self::Sent
                    | Self::Opened
                    | Self::PartialResponse
                    | Self::Authorized
                    | Self::Declined
                    | Self::Expired
                    | Self::Cancelled
            ),
            Self::Opened => matches!(
                new_status,
                Self::PartialResponse
                    | Self::Authorized
                    | Self::Declined
                    | Self::Expired
                    | Self::Cancelled
            ),
            // Response states move between each other as decisions are revised
            Self::PartialResponse => matches!(
                new_status,
                Self::Authorized
                    | Self::Declined
                    | Self::Completed
                    | Self::Closed
                    | Self::Cancelled
            ),
            Self::Authorized => matches!(
                new_status,
                Self::PartialResponse
                    | Self::Declined
                    | Self::Completed
                    | Self::Closed
                    | Self::Cancelled
            ),
            Self::Declined => matches!(
                new_status,
                Self::PartialResponse | Self::Authorized | Self::Closed | Self::Cancelled
            ),
            Self::Completed => matches!(new_status, Self::Closed),
            Self::Expired => matches!(new_status, Self::Sent | Self::Cancelled),
            Self::Closed | Self::Cancelled | Self::NoShow => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl std::fmt::Display for HealthCheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthCheckStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
