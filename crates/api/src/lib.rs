// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the VHC workflow engine.
//!
//! Callers present an authenticated actor; handlers enforce the role
//! policy, translate requests into engine commands, and persist each
//! transition together with its timeline event. Customer operations
//! authenticate with the public report token instead of an operator
//! session. Capability computation serves UI gating and never replaces
//! the handler-side checks.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod capabilities;
mod dispatch;
mod error;
mod handlers;
mod request_response;
mod send_policy;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use capabilities::{compute_customer_capabilities, compute_health_check_capabilities};
pub use dispatch::{
    DispatchError, NotificationDispatcher, RandomTokenIssuer, ReportInvite, TokenIssuer,
};
pub use error::{ApiError, AuthError};
pub use handlers::{
    add_child_item, assign_technician, cancel, close, complete_check_in, complete_inspection,
    create_health_check, create_repair_item, create_repair_item_from_result, delete_repair_item,
    get_customer_capabilities, get_health_check_capabilities, get_health_check_overview,
    mark_completed, mark_expired, mark_labour_complete, mark_no_show, mark_parts_complete,
    mark_ready, pause_inspection, promote_child_item, publish, record_arrival, record_decision,
    record_open, record_unable_to_send, remove_child_item, resume_inspection, set_item_costs,
    set_item_visibility, set_no_labour_required, set_no_parts_required, skip_check_in,
    start_inspection, start_review, undo_labour_complete, undo_parts_complete,
    update_item_pricing,
};
pub use request_response::{
    AddChildItemRequest, AssignTechnicianRequest, BadgeInfo, CancelRequest, Capability,
    CheckResultInput, ChildItemInfo, ChildItemResponse, CloseRequest, CompleteCheckInRequest,
    CompleteInspectionRequest, CreateHealthCheckRequest, CreateHealthCheckResponse,
    CreateRepairItemFromResultRequest, CreateRepairItemRequest, CustomerCapabilities,
    DeleteRepairItemRequest, FinancialSummaryInfo, HealthCheckCapabilities, HealthCheckInfo,
    HealthCheckOverviewResponse, HealthCheckResponse, LabourLineInput, MriResultInput,
    MriSummaryInfo, PartsLineInput, PromoteChildItemRequest, PublishRequest, PublishResponse,
    RecordDecisionRequest, RecordDecisionResponse, RecordOpenRequest, RecordUnableToSendRequest,
    RepairItemInfo, RepairItemResponse, SetItemCostsRequest, SetItemVisibilityRequest,
    SkipCheckInRequest, TimelineEventInfo, UpdateItemPricingRequest, WorkflowStatusInfo,
};
pub use send_policy::{Delivery, DeliveryChannel, SendPolicyError, delivery_plan};
