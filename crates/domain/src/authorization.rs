// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer authorization decisions.
//!
//! The ledger holds at most one current decision per repair item.
//! Recording a new decision supersedes the prior one. Pending is the
//! absence of a record, never a stored state.

use crate::types::Decision;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// One customer decision on one repair item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    /// The repair item decided on.
    pub repair_item_id: i64,
    /// The decision taken.
    pub decision: Decision,
    /// When the decision was recorded.
    pub decided_at: OffsetDateTime,
    /// Customer notes accompanying the decision.
    pub notes: Option<String>,
    /// Captured signature reference, if any.
    pub signature: Option<String>,
}

impl Authorization {
    /// Creates a new authorization record.
    #[must_use]
    pub const fn new(
        repair_item_id: i64,
        decision: Decision,
        decided_at: OffsetDateTime,
        notes: Option<String>,
        signature: Option<String>,
    ) -> Self {
        Self {
            repair_item_id,
            decision,
            decided_at,
            notes,
            signature,
        }
    }
}

/// The set of current decisions for one health check, keyed by repair item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthorizationLedger {
    decisions: BTreeMap<i64, Authorization>,
}

impl AuthorizationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decisions: BTreeMap::new(),
        }
    }

    /// Records a decision, superseding any prior decision for the same
    /// repair item. Returns the superseded decision if there was one.
    pub fn record_decision(&mut self, authorization: Authorization) -> Option<Authorization> {
        self.decisions
            .insert(authorization.repair_item_id, authorization)
    }

    /// Returns the current decision for a repair item, if any.
    #[must_use]
    pub fn decision_for(&self, repair_item_id: i64) -> Option<&Authorization> {
        self.decisions.get(&repair_item_id)
    }

    /// Removes the decision for a repair item, if any.
    pub fn clear_decision(&mut self, repair_item_id: i64) -> Option<Authorization> {
        self.decisions.remove(&repair_item_id)
    }

    /// Iterates over current decisions in repair item order.
    pub fn iter(&self) -> impl Iterator<Item = &Authorization> {
        self.decisions.values()
    }

    /// Returns the number of current decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Returns true if no decisions have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_decision(repair_item_id: i64, decision: Decision) -> Authorization {
        Authorization::new(
            repair_item_id,
            decision,
            OffsetDateTime::now_utc(),
            None,
            None,
        )
    }

    #[test]
    fn test_empty_ledger_has_no_decisions() {
        let ledger: AuthorizationLedger = AuthorizationLedger::new();

        assert!(ledger.is_empty());
        assert!(ledger.decision_for(1).is_none());
    }

    #[test]
    fn test_record_decision() {
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();

        let superseded = ledger.record_decision(make_decision(1, Decision::Approved));

        assert!(superseded.is_none());
        assert_eq!(ledger.len(), 1);
        let current = ledger.decision_for(1);
        assert_eq!(current.map(|a| a.decision), Some(Decision::Approved));
    }

    #[test]
    fn test_new_decision_supersedes_prior() {
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        ledger.record_decision(make_decision(1, Decision::Approved));

        let superseded = ledger.record_decision(make_decision(1, Decision::Declined));

        // Exactly one current decision remains, and it is the new one
        assert_eq!(superseded.map(|a| a.decision), Some(Decision::Approved));
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.decision_for(1).map(|a| a.decision),
            Some(Decision::Declined)
        );
    }

    #[test]
    fn test_decisions_are_per_item() {
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        ledger.record_decision(make_decision(1, Decision::Approved));
        ledger.record_decision(make_decision(2, Decision::Declined));

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.decision_for(1).map(|a| a.decision),
            Some(Decision::Approved)
        );
        assert_eq!(
            ledger.decision_for(2).map(|a| a.decision),
            Some(Decision::Declined)
        );
    }

    #[test]
    fn test_clear_decision() {
        let mut ledger: AuthorizationLedger = AuthorizationLedger::new();
        ledger.record_decision(make_decision(1, Decision::Approved));

        let cleared = ledger.clear_decision(1);

        assert!(cleared.is_some());
        assert!(ledger.is_empty());
        assert!(ledger.decision_for(1).is_none());
    }
}
