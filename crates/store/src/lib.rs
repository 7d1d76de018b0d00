// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage layer for the VHC workflow engine.
//!
//! This crate defines the store contracts the api layer reads and writes
//! through, plus an in-memory implementation backing tests and
//! single-process deployments.
//!
//! ## Contracts
//!
//! - [`HealthCheckStore`]: health check records and everything hanging
//!   off them, such as inspection findings, MRI checklist answers, repair
//!   items, and customer decisions.
//! - [`TimelineStore`]: the append-only human-readable history. It is
//!   displayed to users and never read back to reconstruct engine state.
//!
//! ## Write discipline
//!
//! Every health check write carries the version the caller loaded. The
//! store accepts the write only if that version still matches the stored
//! record, then bumps it; a mismatch returns
//! [`StoreError::VersionConflict`] and leaves the record untouched. Each
//! contract method is atomic per call. [`persist_transition`] runs the
//! version-guarded health check write first, so a conflicted transition
//! stores nothing at all.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use time::OffsetDateTime;
use tracing::debug;
use vhc_flow::{HealthCheckState, TransitionResult};
use vhc_flow_audit::TimelineEvent;
use vhc_flow_domain::{Authorization, CheckResult, HealthCheck, MriResult, RepairItem};

mod error;
mod memory;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::StoreError;
pub use memory::MemoryStore;

/// Store contract for health check records and their dependents.
///
/// Implementations must make each method atomic per call and must honour
/// the version guard on [`HealthCheckStore::update_health_check`].
pub trait HealthCheckStore {
    /// Stores a brand new health check.
    ///
    /// # Errors
    ///
    /// Returns an error if a health check with the same id already
    /// exists.
    fn create_health_check(&mut self, health_check: &HealthCheck) -> Result<(), StoreError>;

    /// Loads one health check record.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_health_check(&mut self, health_check_id: i64) -> Result<HealthCheck, StoreError>;

    /// Loads the inspection findings recorded against a health check.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_check_results(&mut self, health_check_id: i64) -> Result<Vec<CheckResult>, StoreError>;

    /// Loads the MRI checklist answers recorded against a health check.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_mri_results(&mut self, health_check_id: i64) -> Result<Vec<MriResult>, StoreError>;

    /// Loads the repair items raised against a health check, deleted
    /// ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_repair_items(&mut self, health_check_id: i64) -> Result<Vec<RepairItem>, StoreError>;

    /// Loads the current customer decisions for a health check, at most
    /// one per repair item.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_authorizations(
        &mut self,
        health_check_id: i64,
    ) -> Result<Vec<Authorization>, StoreError>;

    /// Replaces the stored inspection findings for a health check.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn save_check_results(
        &mut self,
        health_check_id: i64,
        results: &[CheckResult],
    ) -> Result<(), StoreError>;

    /// Replaces the stored MRI checklist answers for a health check.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn save_mri_results(
        &mut self,
        health_check_id: i64,
        results: &[MriResult],
    ) -> Result<(), StoreError>;

    /// Stores one repair item, replacing any stored item with the same
    /// id.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning health check does not exist.
    fn save_repair_item(&mut self, item: &RepairItem) -> Result<(), StoreError>;

    /// Stores one customer decision, superseding any stored decision for
    /// the same repair item.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn save_authorization(
        &mut self,
        health_check_id: i64,
        authorization: &Authorization,
    ) -> Result<(), StoreError>;

    /// Removes the stored decision for one repair item. Clearing a
    /// decision that is not recorded is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn clear_authorization(
        &mut self,
        health_check_id: i64,
        repair_item_id: i64,
    ) -> Result<(), StoreError>;

    /// Writes a health check record back to the store, guarded by the
    /// version the caller loaded.
    ///
    /// # Returns
    ///
    /// The version now stored for the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist or if the
    /// write carries a version that no longer matches the stored record.
    fn update_health_check(&mut self, health_check: &HealthCheck) -> Result<i64, StoreError>;

    /// Soft deletes a health check. The record stays loadable with its
    /// deletion marker set.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn delete_health_check(
        &mut self,
        health_check_id: i64,
        deleted_at: OffsetDateTime,
    ) -> Result<(), StoreError>;
}

/// Store contract for the human-readable timeline.
pub trait TimelineStore {
    /// Appends one timeline event.
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced health check does not exist.
    fn record_event(&mut self, event: &TimelineEvent) -> Result<(), StoreError>;

    /// Loads the recorded timeline for a health check, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the health check does not exist.
    fn load_timeline(&mut self, health_check_id: i64) -> Result<Vec<TimelineEvent>, StoreError>;
}

/// Loads the complete engine state for one health check.
///
/// # Arguments
///
/// * `store` - The store to read from
/// * `health_check_id` - The health check to load
///
/// # Errors
///
/// Returns an error if the health check does not exist or a read fails.
pub fn load_state<S>(store: &mut S, health_check_id: i64) -> Result<HealthCheckState, StoreError>
where
    S: HealthCheckStore + ?Sized,
{
    let health_check: HealthCheck = store.load_health_check(health_check_id)?;
    let mut state: HealthCheckState = HealthCheckState::new(health_check);
    state.check_results = store.load_check_results(health_check_id)?;
    state.mri_results = store.load_mri_results(health_check_id)?;
    state.repair_items = store.load_repair_items(health_check_id)?;
    for authorization in store.load_authorizations(health_check_id)? {
        state.ledger.record_decision(authorization);
    }
    Ok(state)
}

/// Persists the outcome of one engine transition.
///
/// The version-guarded health check write runs first, so a stale
/// transition is rejected before any record is touched. Decisions the
/// engine withdrew are cleared from the store, then every current
/// decision and repair item is written back, and finally the timeline
/// event is appended.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `result` - The transition outcome produced by the engine
///
/// # Returns
///
/// The version now stored for the health check record.
///
/// # Errors
///
/// Returns an error if the health check does not exist, if the write
/// carries a stale version, or if any record write fails.
pub fn persist_transition<S>(store: &mut S, result: &TransitionResult) -> Result<i64, StoreError>
where
    S: HealthCheckStore + TimelineStore + ?Sized,
{
    let new_state: &HealthCheckState = &result.new_state;
    let health_check_id: i64 = new_state.health_check.health_check_id;

    debug!(
        "Persisting transition '{}' for health check {}",
        result.timeline_event.action.name, health_check_id
    );

    let new_version: i64 = store.update_health_check(&new_state.health_check)?;
    store.save_check_results(health_check_id, &new_state.check_results)?;
    store.save_mri_results(health_check_id, &new_state.mri_results)?;
    for item in &new_state.repair_items {
        store.save_repair_item(item)?;
    }

    let stored_decisions: Vec<Authorization> = store.load_authorizations(health_check_id)?;
    for stored in &stored_decisions {
        if new_state.ledger.decision_for(stored.repair_item_id).is_none() {
            store.clear_authorization(health_check_id, stored.repair_item_id)?;
        }
    }
    for authorization in new_state.ledger.iter() {
        store.save_authorization(health_check_id, authorization)?;
    }

    store.record_event(&result.timeline_event)?;

    Ok(new_version)
}
