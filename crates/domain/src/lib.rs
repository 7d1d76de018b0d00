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

mod authorization;
mod check_result;
mod completion;
mod error;
mod financial;
mod health_check;
mod line_entry;
mod repair_item;
mod status;
mod types;
mod validation;
mod workflow;

#[cfg(test)]
mod tests;

pub use authorization::{Authorization, AuthorizationLedger};
pub use check_result::{
    CheckResult, MriResult, MriSummary, RagCounts, count_rag_statuses, summarize_mri_results,
};
pub use completion::{
    CompletionMarkers, CompletionOutcome, CompletionRule, CompletionState, fully_complete,
    labour_completion, parts_completion,
};
pub use financial::{FinancialSummary, compute_totals, round_currency};
pub use status::HealthCheckStatus;
pub use workflow::{
    BadgeState, WorkflowBadge, WorkflowStatus, derive_response_status, derive_workflow_status,
};

// Re-export public types
pub use error::DomainError;
pub use health_check::HealthCheck;
pub use line_entry::{LabourEntry, PartsEntry, sum_labour_lines, sum_parts_lines};
pub use repair_item::{RepairItem, RepairItemChild};
pub use types::{CheckValue, Decision, RagStatus, SendChannels, Severity, TokenValidity};
pub use validation::{
    validate_customer_name, validate_discount, validate_mileage, validate_title,
    validate_vehicle_reg,
};
