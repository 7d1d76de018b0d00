// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use vhc_flow_audit::{StateSnapshot, TimelineEvent};
use vhc_flow_domain::{
    AuthorizationLedger, CheckResult, DomainError, HealthCheck, MriResult, RagCounts, RepairItem,
    count_rag_statuses, round_currency,
};

/// The complete loaded state of one health check.
///
/// This is the unit every command operates on: the health check record
/// itself plus its inspection findings, MRI answers, repair items, and
/// the current customer decisions. Transitions never mutate in place;
/// they clone, validate, and build a new state.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckState {
    /// The health check record.
    pub health_check: HealthCheck,
    /// Inspection findings recorded by the technician.
    pub check_results: Vec<CheckResult>,
    /// MRI checklist answers recorded at check-in.
    pub mri_results: Vec<MriResult>,
    /// Repair items raised against this health check, deleted ones included.
    pub repair_items: Vec<RepairItem>,
    /// Current customer decisions, one per repair item at most.
    pub ledger: AuthorizationLedger,
}

impl HealthCheckState {
    /// Creates a state holding just the health check, with nothing
    /// recorded against it yet.
    #[must_use]
    pub const fn new(health_check: HealthCheck) -> Self {
        Self {
            health_check,
            check_results: Vec::new(),
            mri_results: Vec::new(),
            repair_items: Vec::new(),
            ledger: AuthorizationLedger::new(),
        }
    }

    /// Converts the state to a snapshot for the timeline.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let item_count: usize = self
            .repair_items
            .iter()
            .filter(|item| !item.is_deleted())
            .count();
        StateSnapshot::new(
            self.health_check.status.as_str().to_string(),
            Some(format!(
                "items={},decisions={},total={}",
                item_count,
                self.ledger.len(),
                self.health_check.amount_total
            )),
        )
    }

    /// Looks up a repair item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no item with the given id exists.
    pub fn repair_item(&self, repair_item_id: i64) -> Result<&RepairItem, DomainError> {
        self.repair_items
            .iter()
            .find(|item| item.repair_item_id == repair_item_id)
            .ok_or(DomainError::RepairItemNotFound { repair_item_id })
    }

    /// Looks up a repair item by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if no item with the given id exists.
    pub fn repair_item_mut(&mut self, repair_item_id: i64) -> Result<&mut RepairItem, DomainError> {
        self.repair_items
            .iter_mut()
            .find(|item| item.repair_item_id == repair_item_id)
            .ok_or(DomainError::RepairItemNotFound { repair_item_id })
    }

    /// Returns the next free repair item id for this health check.
    ///
    /// Deleted items stay in the state, so ids are never reused.
    #[must_use]
    pub fn next_repair_item_id(&self) -> i64 {
        self.repair_items
            .iter()
            .map(|item| item.repair_item_id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Refreshes the denormalized monetary totals on the health check
    /// from the non-deleted repair items, children included.
    pub fn refresh_totals(&mut self) {
        let mut parts_total: Decimal = Decimal::ZERO;
        let mut labour_total: Decimal = Decimal::ZERO;
        let mut amount_total: Decimal = Decimal::ZERO;

        for item in self.repair_items.iter().filter(|item| !item.is_deleted()) {
            parts_total += item.effective_parts_cost();
            labour_total += item.effective_labour_cost();
            amount_total += item.effective_total();
        }

        self.health_check.parts_total = round_currency(parts_total);
        self.health_check.labour_total = round_currency(labour_total);
        self.health_check.amount_total = round_currency(amount_total);
    }

    /// Refreshes the RAG counts on the health check from the recorded
    /// inspection findings.
    pub fn refresh_rag_counts(&mut self) {
        let counts: RagCounts = count_rag_statuses(&self.check_results);
        self.health_check.red_count = counts.red;
        self.health_check.amber_count = counts.amber;
        self.health_check.green_count = counts.green;
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: HealthCheckState,
    /// The timeline event recording this transition.
    pub timeline_event: TimelineEvent,
}
