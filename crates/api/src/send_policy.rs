// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Send policy validation.
//!
//! This module resolves a publish request's channel selection against
//! the contact details on file before a token is minted or a command
//! is applied.

use thiserror::Error;
use vhc_flow_domain::{HealthCheck, SendChannels};

/// Send policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendPolicyError {
    /// No channel was selected.
    #[error("At least one send channel must be selected")]
    NoChannelSelected,

    /// A selected channel has no matching contact details.
    #[error("The {channel} channel is selected but the customer has no {contact} on file")]
    MissingContact {
        /// The selected channel.
        channel: String,
        /// The missing contact field.
        contact: String,
    },
}

/// The channel one delivery goes out over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    /// Deliver by email.
    Email,
    /// Deliver by SMS.
    Sms,
}

impl DeliveryChannel {
    /// Returns the string representation of the channel.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }
}

/// One outbound delivery resolved from the channel selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// The channel to deliver over.
    pub channel: DeliveryChannel,
    /// The address or number to deliver to.
    pub to: String,
}

/// Resolves the selected channels into concrete deliveries.
///
/// # Arguments
///
/// * `channels` - The channel selection from the publish request
/// * `health_check` - The health check holding the contact details
///
/// # Returns
///
/// One delivery per selected channel, addressed from the contact
/// details on file.
///
/// # Errors
///
/// Returns a `SendPolicyError` if no channel is selected or a selected
/// channel has no contact details to deliver to.
pub fn delivery_plan(
    channels: SendChannels,
    health_check: &HealthCheck,
) -> Result<Vec<Delivery>, SendPolicyError> {
    if !channels.any() {
        return Err(SendPolicyError::NoChannelSelected);
    }

    let mut deliveries: Vec<Delivery> = Vec::new();

    if channels.email {
        let to: String = health_check.customer_email.clone().ok_or_else(|| {
            SendPolicyError::MissingContact {
                channel: String::from("email"),
                contact: String::from("email address"),
            }
        })?;
        deliveries.push(Delivery {
            channel: DeliveryChannel::Email,
            to,
        });
    }

    if channels.sms {
        let to: String = health_check.customer_mobile.clone().ok_or_else(|| {
            SendPolicyError::MissingContact {
                channel: String::from("sms"),
                contact: String::from("mobile number"),
            }
        })?;
        deliveries.push(Delivery {
            channel: DeliveryChannel::Sms,
            to,
        });
    }

    Ok(deliveries)
}
