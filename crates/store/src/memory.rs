// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store backing tests and single-process deployments.

use std::collections::BTreeMap;

use time::OffsetDateTime;
use tracing::{debug, info};
use vhc_flow_audit::TimelineEvent;
use vhc_flow_domain::{Authorization, CheckResult, HealthCheck, MriResult, RepairItem};

use crate::error::StoreError;
use crate::{HealthCheckStore, TimelineStore};

/// In-memory implementation of both store contracts.
///
/// Records live in `BTreeMap`s keyed by health check id. The version
/// guard behaves exactly as a database-backed store would: every accepted
/// health check write bumps the stored version, and a write carrying a
/// stale version is rejected without touching the record.
#[derive(Debug, Default)]
pub struct MemoryStore {
    health_checks: BTreeMap<i64, HealthCheck>,
    check_results: BTreeMap<i64, Vec<CheckResult>>,
    mri_results: BTreeMap<i64, Vec<MriResult>>,
    repair_items: BTreeMap<i64, Vec<RepairItem>>,
    authorizations: BTreeMap<i64, Vec<Authorization>>,
    timeline: BTreeMap<i64, Vec<TimelineEvent>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            health_checks: BTreeMap::new(),
            check_results: BTreeMap::new(),
            mri_results: BTreeMap::new(),
            repair_items: BTreeMap::new(),
            authorizations: BTreeMap::new(),
            timeline: BTreeMap::new(),
        }
    }

    fn require_health_check(&self, health_check_id: i64) -> Result<&HealthCheck, StoreError> {
        self.health_checks
            .get(&health_check_id)
            .ok_or(StoreError::HealthCheckNotFound(health_check_id))
    }
}

impl HealthCheckStore for MemoryStore {
    fn create_health_check(&mut self, health_check: &HealthCheck) -> Result<(), StoreError> {
        let health_check_id: i64 = health_check.health_check_id;
        if self.health_checks.contains_key(&health_check_id) {
            return Err(StoreError::DuplicateRecord {
                record: String::from("health check"),
                id: health_check_id,
            });
        }

        info!("Storing new health check with ID: {}", health_check_id);
        self.health_checks
            .insert(health_check_id, health_check.clone());
        Ok(())
    }

    fn load_health_check(&mut self, health_check_id: i64) -> Result<HealthCheck, StoreError> {
        debug!("Loading health check with ID: {}", health_check_id);
        self.require_health_check(health_check_id).cloned()
    }

    fn load_check_results(&mut self, health_check_id: i64) -> Result<Vec<CheckResult>, StoreError> {
        self.require_health_check(health_check_id)?;
        Ok(self
            .check_results
            .get(&health_check_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_mri_results(&mut self, health_check_id: i64) -> Result<Vec<MriResult>, StoreError> {
        self.require_health_check(health_check_id)?;
        Ok(self
            .mri_results
            .get(&health_check_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_repair_items(&mut self, health_check_id: i64) -> Result<Vec<RepairItem>, StoreError> {
        self.require_health_check(health_check_id)?;
        Ok(self
            .repair_items
            .get(&health_check_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_authorizations(
        &mut self,
        health_check_id: i64,
    ) -> Result<Vec<Authorization>, StoreError> {
        self.require_health_check(health_check_id)?;
        Ok(self
            .authorizations
            .get(&health_check_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_check_results(
        &mut self,
        health_check_id: i64,
        results: &[CheckResult],
    ) -> Result<(), StoreError> {
        self.require_health_check(health_check_id)?;
        debug!(
            "Storing {} check results for health check {}",
            results.len(),
            health_check_id
        );
        self.check_results.insert(health_check_id, results.to_vec());
        Ok(())
    }

    fn save_mri_results(
        &mut self,
        health_check_id: i64,
        results: &[MriResult],
    ) -> Result<(), StoreError> {
        self.require_health_check(health_check_id)?;
        debug!(
            "Storing {} MRI results for health check {}",
            results.len(),
            health_check_id
        );
        self.mri_results.insert(health_check_id, results.to_vec());
        Ok(())
    }

    fn save_repair_item(&mut self, item: &RepairItem) -> Result<(), StoreError> {
        self.require_health_check(item.health_check_id)?;

        // Upsert by item id; items come back in id order regardless of
        // write order.
        let items: &mut Vec<RepairItem> = self.repair_items.entry(item.health_check_id).or_default();
        items.retain(|stored| stored.repair_item_id != item.repair_item_id);
        items.push(item.clone());
        items.sort_by_key(|stored| stored.repair_item_id);

        debug!(
            "Stored repair item {} for health check {}",
            item.repair_item_id, item.health_check_id
        );
        Ok(())
    }

    fn save_authorization(
        &mut self,
        health_check_id: i64,
        authorization: &Authorization,
    ) -> Result<(), StoreError> {
        self.require_health_check(health_check_id)?;

        // At most one current decision per repair item; a new write
        // supersedes the stored one.
        let decisions: &mut Vec<Authorization> =
            self.authorizations.entry(health_check_id).or_default();
        decisions.retain(|stored| stored.repair_item_id != authorization.repair_item_id);
        decisions.push(authorization.clone());
        decisions.sort_by_key(|stored| stored.repair_item_id);

        debug!(
            "Stored decision for repair item {} on health check {}",
            authorization.repair_item_id, health_check_id
        );
        Ok(())
    }

    fn clear_authorization(
        &mut self,
        health_check_id: i64,
        repair_item_id: i64,
    ) -> Result<(), StoreError> {
        self.require_health_check(health_check_id)?;
        if let Some(decisions) = self.authorizations.get_mut(&health_check_id) {
            decisions.retain(|stored| stored.repair_item_id != repair_item_id);
        }
        Ok(())
    }

    fn update_health_check(&mut self, health_check: &HealthCheck) -> Result<i64, StoreError> {
        let health_check_id: i64 = health_check.health_check_id;
        let stored: &mut HealthCheck = self
            .health_checks
            .get_mut(&health_check_id)
            .ok_or(StoreError::HealthCheckNotFound(health_check_id))?;

        if health_check.version != stored.version {
            return Err(StoreError::VersionConflict {
                health_check_id,
                expected: health_check.version,
                actual: stored.version,
            });
        }

        let mut updated: HealthCheck = health_check.clone();
        updated.version = stored.version + 1;
        let new_version: i64 = updated.version;
        *stored = updated;

        debug!(
            "Updated health check {} to version {}",
            health_check_id, new_version
        );
        Ok(new_version)
    }

    fn delete_health_check(
        &mut self,
        health_check_id: i64,
        deleted_at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let stored: &mut HealthCheck = self
            .health_checks
            .get_mut(&health_check_id)
            .ok_or(StoreError::HealthCheckNotFound(health_check_id))?;

        // The bump fails any in-flight write that loaded the record
        // before the delete.
        stored.deleted_at = Some(deleted_at);
        stored.version += 1;

        info!("Soft deleted health check with ID: {}", health_check_id);
        Ok(())
    }
}

impl TimelineStore for MemoryStore {
    fn record_event(&mut self, event: &TimelineEvent) -> Result<(), StoreError> {
        self.require_health_check(event.health_check_id)?;
        debug!(
            "Recording timeline event '{}' for health check {}",
            event.action.name, event.health_check_id
        );
        self.timeline
            .entry(event.health_check_id)
            .or_default()
            .push(event.clone());
        Ok(())
    }

    fn load_timeline(&mut self, health_check_id: i64) -> Result<Vec<TimelineEvent>, StoreError> {
        self.require_health_check(health_check_id)?;
        Ok(self
            .timeline
            .get(&health_check_id)
            .cloned()
            .unwrap_or_default())
    }
}
