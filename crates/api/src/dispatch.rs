// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound collaborator seams: token issuing and report delivery.
//!
//! The engine never renders or sends anything itself. Publishing mints
//! a token through a [`TokenIssuer`] and hands the invite to a
//! [`NotificationDispatcher`]; delivery failures are reported back to
//! the caller but never roll back the stored transition.

use thiserror::Error;
use time::OffsetDateTime;
use vhc_flow_domain::TokenValidity;

/// The content of one customer report invitation.
///
/// Rendering the actual email or SMS body is the dispatcher's problem;
/// the engine only supplies the facts the link needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportInvite {
    /// The health check the invite belongs to.
    pub health_check_id: i64,
    /// Vehicle registration plate, for display.
    pub vehicle_reg: String,
    /// Customer display name, for display.
    pub customer_name: String,
    /// The public access token embedded in the link.
    pub token: String,
    /// When the link lapses.
    pub expires_at: OffsetDateTime,
}

/// A failed delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{channel} delivery to {to} failed: {reason}")]
pub struct DispatchError {
    /// The channel the delivery went out over.
    pub channel: String,
    /// The address or number the delivery targeted.
    pub to: String,
    /// Why the delivery failed.
    pub reason: String,
}

/// Outbound notification delivery.
///
/// Implementations talk to the actual email and SMS providers. A failed
/// send is reported to the caller; it never rolls back the published
/// transition.
pub trait NotificationDispatcher {
    /// Sends the report invite by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails the send.
    fn send_email(&mut self, to: &str, invite: &ReportInvite) -> Result<(), DispatchError>;

    /// Sends the report invite by SMS.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects or fails the send.
    fn send_sms(&mut self, to: &str, invite: &ReportInvite) -> Result<(), DispatchError>;
}

/// Public access token minting.
///
/// Called exactly once per successful publish; a re-send mints a fresh
/// token and the store's version guard keeps concurrent publishes from
/// storing two.
pub trait TokenIssuer {
    /// Issues a new public access token for a health check.
    fn issue(&mut self, health_check_id: i64, validity: TokenValidity) -> String;
}

/// Token issuer backed by the process RNG.
#[derive(Debug, Default)]
pub struct RandomTokenIssuer;

impl RandomTokenIssuer {
    /// Creates a new random token issuer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TokenIssuer for RandomTokenIssuer {
    fn issue(&mut self, health_check_id: i64, _validity: TokenValidity) -> String {
        format!("vhc_{health_check_id}_{:016x}", rand::random::<u64>())
    }
}
