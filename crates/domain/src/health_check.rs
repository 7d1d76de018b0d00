// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The health check record: one inspection visit for one vehicle.

use crate::error::DomainError;
use crate::status::HealthCheckStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One vehicle health check visit.
///
/// Monetary totals are denormalized from the repair items and refreshed
/// by the engine whenever pricing changes; they are never authoritative
/// on their own. The `version` field carries the optimistic concurrency
/// guard to the store on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Unique identifier of the health check.
    pub health_check_id: i64,
    /// Owning organization.
    pub organization_id: i64,
    /// Site (branch) the visit takes place at.
    pub site_id: i64,
    /// Vehicle registration plate.
    pub vehicle_reg: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email address, if on file.
    pub customer_email: Option<String>,
    /// Customer mobile number, if on file.
    pub customer_mobile: Option<String>,
    /// Current lifecycle status.
    pub status: HealthCheckStatus,
    /// Technician the inspection is assigned to.
    pub assigned_to: Option<String>,
    /// Mileage recorded at check-in.
    pub mileage: Option<i64>,
    /// When the vehicle arrived.
    pub arrived_at: Option<OffsetDateTime>,
    /// When the technician started the inspection.
    pub tech_started_at: Option<OffsetDateTime>,
    /// When the technician finished the inspection.
    pub tech_completed_at: Option<OffsetDateTime>,
    /// When the report was last sent to the customer.
    pub sent_at: Option<OffsetDateTime>,
    /// When the customer first opened the report. Set once.
    pub first_opened_at: Option<OffsetDateTime>,
    /// When the visit was closed out.
    pub closed_at: Option<OffsetDateTime>,
    /// Who closed the visit.
    pub closed_by: Option<String>,
    /// Count of red findings.
    pub red_count: u32,
    /// Count of amber findings.
    pub amber_count: u32,
    /// Count of green findings.
    pub green_count: u32,
    /// Denormalized parts total across non-deleted repair items.
    pub parts_total: Decimal,
    /// Denormalized labour total across non-deleted repair items.
    pub labour_total: Decimal,
    /// Denormalized grand total across non-deleted repair items.
    pub amount_total: Decimal,
    /// Public access token for the customer report link.
    pub public_token: Option<String>,
    /// When the public token lapses.
    pub token_expires_at: Option<OffsetDateTime>,
    /// Reason the report could not be sent, if recorded.
    pub unable_to_send_reason: Option<String>,
    /// Reason check-in was skipped, if it was.
    pub skip_checkin_reason: Option<String>,
    /// Reason the visit was cancelled, if it was.
    pub cancelled_reason: Option<String>,
    /// Soft delete marker.
    pub deleted_at: Option<OffsetDateTime>,
    /// Optimistic concurrency version, bumped on every store write.
    pub version: i64,
}

impl HealthCheck {
    /// Creates a new health check awaiting vehicle arrival.
    ///
    /// # Arguments
    ///
    /// * `health_check_id` - Unique identifier
    /// * `organization_id` - Owning organization
    /// * `site_id` - Site the visit takes place at
    /// * `vehicle_reg` - Vehicle registration plate
    /// * `customer_name` - Customer display name
    /// * `customer_email` - Customer email, if on file
    /// * `customer_mobile` - Customer mobile, if on file
    #[must_use]
    pub const fn new(
        health_check_id: i64,
        organization_id: i64,
        site_id: i64,
        vehicle_reg: String,
        customer_name: String,
        customer_email: Option<String>,
        customer_mobile: Option<String>,
    ) -> Self {
        Self {
            health_check_id,
            organization_id,
            site_id,
            vehicle_reg,
            customer_name,
            customer_email,
            customer_mobile,
            status: HealthCheckStatus::AwaitingArrival,
            assigned_to: None,
            mileage: None,
            arrived_at: None,
            tech_started_at: None,
            tech_completed_at: None,
            sent_at: None,
            first_opened_at: None,
            closed_at: None,
            closed_by: None,
            red_count: 0,
            amber_count: 0,
            green_count: 0,
            parts_total: Decimal::ZERO,
            labour_total: Decimal::ZERO,
            amount_total: Decimal::ZERO,
            public_token: None,
            token_expires_at: None,
            unable_to_send_reason: None,
            skip_checkin_reason: None,
            cancelled_reason: None,
            deleted_at: None,
            version: 1,
        }
    }

    /// Returns true if the health check has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if a token has been issued and its expiry has passed.
    #[must_use]
    pub fn token_expired(&self, now: OffsetDateTime) -> bool {
        self.token_expires_at.is_some_and(|expires| now > expires)
    }

    /// Verifies a presented public token against the issued one.
    ///
    /// # Arguments
    ///
    /// * `presented` - The token presented by the customer
    /// * `now` - The current time, for expiry comparison
    ///
    /// # Errors
    ///
    /// Returns an error if no token has been issued, the presented token
    /// does not match, or the token has expired.
    pub fn verify_token(&self, presented: &str, now: OffsetDateTime) -> Result<(), DomainError> {
        let issued: &str = self
            .public_token
            .as_deref()
            .ok_or(DomainError::TokenNotIssued)?;

        if issued != presented {
            return Err(DomainError::TokenMismatch);
        }

        match self.token_expires_at {
            Some(expires) if now > expires => Err(DomainError::TokenExpired {
                expired_at: expires,
            }),
            // A token without an expiry never lapses
            _ => Ok(()),
        }
    }
}
