// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared value types for the VHC workflow engine.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// RAG (red/amber/green) severity of an inspection finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    /// Urgent: unsafe or failed item.
    Red,
    /// Advisory: attention needed soon.
    Amber,
    /// Pass: no action required.
    Green,
}

impl RagStatus {
    /// Returns the string representation of the RAG status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Green => "green",
        }
    }

    /// Parses a RAG status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRagStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "red" => Ok(Self::Red),
            "amber" => Ok(Self::Amber),
            "green" => Ok(Self::Green),
            _ => Err(DomainError::InvalidRagStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this finding flags work (red or amber).
    #[must_use]
    pub const fn is_flagged(&self) -> bool {
        matches!(self, Self::Red | Self::Amber)
    }
}

impl FromStr for RagStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Severity of a repair item. Only flagged findings become repair items,
/// so green has no counterpart here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Urgent work.
    Red,
    /// Advisory work.
    Amber,
}

impl Severity {
    /// Returns the string representation of the severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
        }
    }

    /// Parses a severity from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeverity` if the string is not a valid severity.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "red" => Ok(Self::Red),
            "amber" => Ok(Self::Amber),
            _ => Err(DomainError::InvalidSeverity {
                severity: s.to_string(),
            }),
        }
    }

    /// Maps a RAG status to a repair severity. Green findings flag no work.
    #[must_use]
    pub const fn from_rag(rag: RagStatus) -> Option<Self> {
        match rag {
            RagStatus::Red => Some(Self::Red),
            RagStatus::Amber => Some(Self::Amber),
            RagStatus::Green => None,
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Customer decision on a single repair item.
///
/// Pending is represented by the absence of a decision record,
/// never by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Customer authorised the work.
    Approved,
    /// Customer declined the work.
    Declined,
}

impl Decision {
    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }

    /// Parses a decision from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDecision` if the string is not a valid decision.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidDecision {
                decision: s.to_string(),
            }),
        }
    }
}

impl FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Permitted validity periods for a public access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenValidity {
    /// Token valid for 3 days.
    ThreeDays,
    /// Token valid for 7 days.
    SevenDays,
    /// Token valid for 14 days.
    FourteenDays,
    /// Token valid for 30 days.
    ThirtyDays,
}

impl TokenValidity {
    /// Builds a validity period from a day count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTokenValidity` if the day count is not
    /// one of the permitted durations.
    pub const fn from_days(days: u16) -> Result<Self, DomainError> {
        match days {
            3 => Ok(Self::ThreeDays),
            7 => Ok(Self::SevenDays),
            14 => Ok(Self::FourteenDays),
            30 => Ok(Self::ThirtyDays),
            _ => Err(DomainError::InvalidTokenValidity { days }),
        }
    }

    /// Returns the validity period as a number of days.
    #[must_use]
    pub const fn as_days(&self) -> u16 {
        match self {
            Self::ThreeDays => 3,
            Self::SevenDays => 7,
            Self::FourteenDays => 14,
            Self::ThirtyDays => 30,
        }
    }

    /// Returns the validity period as a duration.
    #[must_use]
    pub fn duration(&self) -> time::Duration {
        time::Duration::days(i64::from(self.as_days()))
    }
}

/// Channels selected for publishing a report to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendChannels {
    /// Send the report link by email.
    pub email: bool,
    /// Send the report link by SMS.
    pub sms: bool,
}

impl SendChannels {
    /// Creates a new channel selection.
    #[must_use]
    pub const fn new(email: bool, sms: bool) -> Self {
        Self { email, sms }
    }

    /// Returns true if at least one channel is selected.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.email || self.sms
    }
}

/// Typed payload of an answered inspection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckValue {
    /// Tyre tread depth reading in millimetres.
    TyreReading {
        /// Measured tread depth.
        tread_depth_mm: Decimal,
    },
    /// Brake component measurement in millimetres.
    BrakeMeasurement {
        /// Measured thickness.
        measurement_mm: Decimal,
    },
    /// Simple yes/no answer.
    YesNo {
        /// The recorded answer.
        value: bool,
    },
    /// Date and mileage pair, e.g. last service.
    DateMileage {
        /// The recorded date.
        date: time::Date,
        /// The recorded mileage.
        mileage: i64,
    },
    /// Free text answer.
    Text {
        /// The recorded text.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rag_status_round_trip() {
        let statuses = vec![RagStatus::Red, RagStatus::Amber, RagStatus::Green];

        for status in statuses {
            let s = status.as_str();
            match RagStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse RAG string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_rag_flagged() {
        assert!(RagStatus::Red.is_flagged());
        assert!(RagStatus::Amber.is_flagged());
        assert!(!RagStatus::Green.is_flagged());
    }

    #[test]
    fn test_severity_from_rag() {
        assert_eq!(Severity::from_rag(RagStatus::Red), Some(Severity::Red));
        assert_eq!(Severity::from_rag(RagStatus::Amber), Some(Severity::Amber));
        assert_eq!(Severity::from_rag(RagStatus::Green), None);
    }

    #[test]
    fn test_decision_round_trip() {
        for decision in [Decision::Approved, Decision::Declined] {
            let s = decision.as_str();
            match Decision::parse_str(s) {
                Ok(parsed) => assert_eq!(decision, parsed),
                Err(e) => panic!("Failed to parse decision string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_decision_string() {
        let result = Decision::parse_str("maybe");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_validity_from_days() {
        assert_eq!(TokenValidity::from_days(3), Ok(TokenValidity::ThreeDays));
        assert_eq!(TokenValidity::from_days(7), Ok(TokenValidity::SevenDays));
        assert_eq!(
            TokenValidity::from_days(14),
            Ok(TokenValidity::FourteenDays)
        );
        assert_eq!(TokenValidity::from_days(30), Ok(TokenValidity::ThirtyDays));
        assert_eq!(
            TokenValidity::from_days(10),
            Err(DomainError::InvalidTokenValidity { days: 10 })
        );
    }

    #[test]
    fn test_token_validity_duration() {
        assert_eq!(TokenValidity::SevenDays.duration(), time::Duration::days(7));
    }

    #[test]
    fn test_send_channels_any() {
        assert!(!SendChannels::new(false, false).any());
        assert!(SendChannels::new(true, false).any());
        assert!(SendChannels::new(false, true).any());
        assert!(SendChannels::new(true, true).any());
    }
}
