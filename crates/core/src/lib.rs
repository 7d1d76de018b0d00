// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod customer;
mod error;
mod items;
mod lifecycle;
mod state;

#[cfg(test)]
mod tests;

use vhc_flow_domain::{DomainError, HealthCheck, RepairItem};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{HealthCheckState, TransitionResult};

/// Validates that a health check is still open to change.
///
/// This is a read-only validation that does not create timeline events.
///
/// # Arguments
///
/// * `health_check` - The health check to check
///
/// # Returns
///
/// * `Ok(())` if the health check can still be changed
/// * `Err(DomainError::HealthCheckDeleted)` if it has been deleted
/// * `Err(DomainError::InvalidStatusTransition)` if it has reached a terminal status
///
/// # Errors
///
/// Returns an error if the health check is deleted or terminal.
pub fn validate_health_check_open(health_check: &HealthCheck) -> Result<(), DomainError> {
    if health_check.is_deleted() {
        return Err(DomainError::HealthCheckDeleted {
            health_check_id: health_check.health_check_id,
        });
    }
    if health_check.status.is_terminal() {
        return Err(DomainError::InvalidStatusTransition {
            from: health_check.status.as_str().to_string(),
            to: health_check.status.as_str().to_string(),
            reason: format!(
                "'{}' is a terminal status; the record can no longer change",
                health_check.status.as_str()
            ),
        });
    }
    Ok(())
}

/// Validates that a repair item has not been soft deleted.
///
/// This is a read-only validation that does not create timeline events.
///
/// # Arguments
///
/// * `item` - The repair item to check
///
/// # Returns
///
/// * `Ok(())` if the item is active
/// * `Err(DomainError::RepairItemDeleted)` if it has been deleted
///
/// # Errors
///
/// Returns an error if the item has been deleted.
pub fn validate_repair_item_active(item: &RepairItem) -> Result<(), DomainError> {
    if item.is_deleted() {
        return Err(DomainError::RepairItemDeleted {
            repair_item_id: item.repair_item_id,
        });
    }
    Ok(())
}
