// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use rust_decimal::Decimal;
use time::OffsetDateTime;
use vhc_flow_domain::CheckValue;

/// API request to create a new health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHealthCheckRequest {
    /// The identifier allocated by the booking system.
    pub health_check_id: i64,
    /// The owning organization.
    pub organization_id: i64,
    /// The site the visit takes place at.
    pub site_id: i64,
    /// Vehicle registration plate.
    pub vehicle_reg: String,
    /// Customer display name.
    pub customer_name: String,
    /// Customer email address, if on file.
    pub customer_email: Option<String>,
    /// Customer mobile number, if on file.
    pub customer_mobile: Option<String>,
}

/// API response for a successful health check creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateHealthCheckResponse {
    /// The created health check.
    pub health_check_id: i64,
    /// Vehicle registration plate.
    pub vehicle_reg: String,
    /// The initial lifecycle status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// One MRI checklist answer supplied at check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MriResultInput {
    /// What the manufacturer recommends.
    pub description: String,
    /// RAG grading, if evaluated (red, amber, green).
    pub rag: Option<String>,
    /// Indicative price for the recommended work.
    pub price: Option<Decimal>,
}

/// API request to complete check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteCheckInRequest {
    /// The health check being checked in.
    pub health_check_id: i64,
    /// Mileage read off the vehicle. Required.
    pub mileage: Option<i64>,
    /// MRI checklist answers taken with the customer.
    pub mri_results: Vec<MriResultInput>,
}

/// API request to skip check-in entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipCheckInRequest {
    /// The health check to skip check-in for.
    pub health_check_id: i64,
    /// Why check-in was skipped.
    pub reason: String,
}

/// API request to assign the inspection to a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTechnicianRequest {
    /// The health check to assign.
    pub health_check_id: i64,
    /// The technician taking the job.
    pub technician: String,
}

/// One answered inspection item supplied at inspection completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResultInput {
    /// The checklist template item answered.
    pub template_item_id: i64,
    /// Checklist section, e.g. "Tyres".
    pub section: String,
    /// Item label, e.g. "Front left tyre".
    pub label: String,
    /// RAG grading, if the item was graded (red, amber, green).
    pub rag: Option<String>,
    /// Typed reading or answer, if one was captured.
    pub value: Option<CheckValue>,
    /// Technician notes.
    pub notes: Option<String>,
    /// Attached media references.
    pub media: Vec<String>,
}

/// API request to complete the inspection with the full set of findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteInspectionRequest {
    /// The health check being inspected.
    pub health_check_id: i64,
    /// Every answered inspection item. Replaces prior findings wholesale.
    pub results: Vec<CheckResultInput>,
}

/// API request to publish the report to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// The health check to publish.
    pub health_check_id: i64,
    /// Send the report link by email.
    pub send_email: bool,
    /// Send the report link by SMS.
    pub send_sms: bool,
    /// How long the link stays valid, in days (3, 7, 14 or 30).
    pub validity_days: u16,
}

/// API response for a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishResponse {
    /// The published health check.
    pub health_check_id: i64,
    /// The lifecycle status after publishing.
    pub status: String,
    /// The version now stored for the record.
    pub version: i64,
    /// The issued public access token.
    pub token: String,
    /// When the link lapses.
    pub expires_at: OffsetDateTime,
    /// Human-readable descriptions of any failed deliveries. The
    /// transition stands regardless.
    pub delivery_failures: Vec<String>,
    /// A success message.
    pub message: String,
}

/// API request to record that the report could not be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUnableToSendRequest {
    /// The health check the send failed for.
    pub health_check_id: i64,
    /// Why the report could not be sent.
    pub reason: String,
}

/// API request recording the customer opening the report link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOpenRequest {
    /// The health check the link belongs to.
    pub health_check_id: i64,
    /// The token presented with the link.
    pub token: String,
}

/// API request recording a customer decision on one repair item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDecisionRequest {
    /// The health check the decision belongs to.
    pub health_check_id: i64,
    /// The token presented with the link.
    pub token: String,
    /// The repair item decided on.
    pub repair_item_id: i64,
    /// The decision taken (approved or declined).
    pub decision: String,
    /// Customer notes accompanying the decision.
    pub notes: Option<String>,
    /// Captured signature reference, if any.
    pub signature: Option<String>,
}

/// API response for a recorded customer decision.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordDecisionResponse {
    /// The health check the decision belongs to.
    pub health_check_id: i64,
    /// The repair item decided on.
    pub repair_item_id: i64,
    /// The decision recorded.
    pub decision: String,
    /// The derived response status after the decision.
    pub status: String,
    /// The version now stored for the record.
    pub version: i64,
    /// A success message.
    pub message: String,
}

/// API request to close a visit out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    /// The health check to close.
    pub health_check_id: i64,
    /// Who closed the visit.
    pub closed_by: String,
}

/// API request to cancel a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    /// The health check to cancel.
    pub health_check_id: i64,
    /// Why the visit was cancelled.
    pub reason: String,
}

/// API response for a state-changing health check operation.
///
/// Operations with no richer payload all return this shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckResponse {
    /// The mutated health check.
    pub health_check_id: i64,
    /// The lifecycle status after the operation.
    pub status: String,
    /// The version now stored for the record.
    pub version: i64,
    /// A success message.
    pub message: String,
}

/// API request to create a repair item by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepairItemRequest {
    /// The health check to raise the item against.
    pub health_check_id: i64,
    /// Short title of the work.
    pub title: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Urgency of the work (amber or red).
    pub severity: String,
}

/// API request to create a repair item from a flagged inspection finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepairItemFromResultRequest {
    /// The health check the finding belongs to.
    pub health_check_id: i64,
    /// The finding to raise the item from.
    pub check_result_id: i64,
}

/// API response for a created repair item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RepairItemResponse {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The created repair item.
    pub repair_item_id: i64,
    /// Short title of the work.
    pub title: String,
    /// Urgency of the work.
    pub severity: String,
    /// The version now stored for the record.
    pub version: i64,
    /// A success message.
    pub message: String,
}

/// One labour pricing line supplied with a pricing update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabourLineInput {
    /// Labour operation code.
    pub code: String,
    /// What the work is.
    pub description: String,
    /// Hours of labour.
    pub hours: Decimal,
    /// Hourly rate.
    pub rate: Decimal,
    /// Discount applied to this line, as a percentage.
    pub discount_percent: Decimal,
}

/// One parts pricing line supplied with a pricing update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsLineInput {
    /// Part number or code.
    pub code: String,
    /// What the part is.
    pub description: String,
    /// Quantity of parts.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Discount applied to this line, as a percentage.
    pub discount_percent: Decimal,
}

/// API request to replace the pricing lines of an item or child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItemPricingRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The repair item to price.
    pub repair_item_id: i64,
    /// The child line to price instead, if any.
    pub child_id: Option<i64>,
    /// Labour pricing lines. Replace prior lines wholesale.
    pub labour_entries: Vec<LabourLineInput>,
    /// Parts pricing lines. Replace prior lines wholesale.
    pub parts_entries: Vec<PartsLineInput>,
}

/// API request to set the costs of an item or child directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetItemCostsRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The repair item to price.
    pub repair_item_id: i64,
    /// The child line to price instead, if any.
    pub child_id: Option<i64>,
    /// Parts cost.
    pub parts_cost: Decimal,
    /// Labour cost.
    pub labour_cost: Decimal,
}

/// API request to show or hide an item on the customer report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetItemVisibilityRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The repair item.
    pub repair_item_id: i64,
    /// Whether the customer sees the item.
    pub customer_visible: bool,
}

/// API request to soft delete a repair item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRepairItemRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The repair item to delete.
    pub repair_item_id: i64,
}

/// API request to add a child line under a repair item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddChildItemRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The parent repair item.
    pub repair_item_id: i64,
    /// Short title of the child work.
    pub title: String,
    /// Urgency of the child work (amber or red).
    pub severity: String,
}

/// API response for an added child item.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChildItemResponse {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The parent repair item.
    pub repair_item_id: i64,
    /// The created child line.
    pub child_id: i64,
    /// Short title of the child work.
    pub title: String,
    /// The version now stored for the record.
    pub version: i64,
    /// A success message.
    pub message: String,
}

/// API request to remove a child line from a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveChildItemRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The parent repair item.
    pub repair_item_id: i64,
    /// The child to remove.
    pub child_id: i64,
}

/// API request to promote a child line to a standalone repair item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoteChildItemRequest {
    /// The health check the item belongs to.
    pub health_check_id: i64,
    /// The parent repair item.
    pub repair_item_id: i64,
    /// The child to promote.
    pub child_id: i64,
}

/// Health check summary for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckInfo {
    /// The health check identifier.
    pub health_check_id: i64,
    /// The owning organization.
    pub organization_id: i64,
    /// The site the visit takes place at.
    pub site_id: i64,
    /// Vehicle registration plate.
    pub vehicle_reg: String,
    /// Customer display name.
    pub customer_name: String,
    /// Current lifecycle status.
    pub status: String,
    /// Technician the inspection is assigned to.
    pub assigned_to: Option<String>,
    /// Mileage recorded at check-in.
    pub mileage: Option<i64>,
    /// Count of red findings.
    pub red_count: u32,
    /// Count of amber findings.
    pub amber_count: u32,
    /// Count of green findings.
    pub green_count: u32,
    /// Parts total across non-deleted repair items.
    pub parts_total: Decimal,
    /// Labour total across non-deleted repair items.
    pub labour_total: Decimal,
    /// Grand total across non-deleted repair items.
    pub amount_total: Decimal,
    /// When the report was last sent to the customer.
    pub sent_at: Option<OffsetDateTime>,
    /// When the customer first opened the report.
    pub first_opened_at: Option<OffsetDateTime>,
    /// When the public token lapses.
    pub token_expires_at: Option<OffsetDateTime>,
    /// The version currently stored for the record.
    pub version: i64,
}

/// One workflow badge with attribution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BadgeInfo {
    /// The resolved badge state (pending, `in_progress`, partial, complete).
    pub state: String,
    /// Who satisfied the badge, when attributable.
    pub completed_by: Option<String>,
    /// When the badge was satisfied, when attributable.
    pub completed_at: Option<OffsetDateTime>,
}

/// The four derived workflow badges for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkflowStatusInfo {
    /// Technician inspection progress.
    pub technician: BadgeInfo,
    /// Labour completion across authorised items.
    pub labour: BadgeInfo,
    /// Parts completion across authorised items.
    pub parts: BadgeInfo,
    /// Customer authorisation progress across decidable items.
    pub authorisation: BadgeInfo,
}

/// Financial summary for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FinancialSummaryInfo {
    /// Effective total of every non-deleted repair item.
    pub total_identified: Decimal,
    /// Effective total of items the customer approved.
    pub total_authorised: Decimal,
    /// Effective total of items the customer declined.
    pub total_declined: Decimal,
    /// Effective total of items with no decision yet.
    pub total_pending: Decimal,
    /// Value of authorised items whose labour and parts are both complete.
    pub completed_value: Decimal,
    /// Value of authorised items still awaiting labour or parts.
    pub outstanding_value: Decimal,
}

/// MRI evaluation summary for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MriSummaryInfo {
    /// Number of red MRI results.
    pub red: u32,
    /// Number of amber MRI results.
    pub amber: u32,
    /// Number of green MRI results.
    pub green: u32,
    /// Number of MRI results without a grade.
    pub unanswered: u32,
}

/// One child line on a repair item, for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChildItemInfo {
    /// The child identifier.
    pub child_id: i64,
    /// Short title of the child work.
    pub title: String,
    /// Urgency of the child work.
    pub severity: String,
    /// Total price of the child's own costs.
    pub total_price: Decimal,
}

/// One repair item for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RepairItemInfo {
    /// The repair item identifier.
    pub repair_item_id: i64,
    /// Short title of the work.
    pub title: String,
    /// Urgency of the work.
    pub severity: String,
    /// Parts cost of the item's own work.
    pub parts_cost: Decimal,
    /// Labour cost of the item's own work.
    pub labour_cost: Decimal,
    /// Total price of the item's own work.
    pub total_price: Decimal,
    /// Own total plus every child's effective total.
    pub effective_total: Decimal,
    /// Whether the customer sees the item.
    pub customer_visible: bool,
    /// The current customer decision, if one is recorded.
    pub decision: Option<String>,
    /// Child lines, if the item is a group.
    pub children: Vec<ChildItemInfo>,
}

/// One timeline entry for the overview read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineEventInfo {
    /// The action that was performed.
    pub action: String,
    /// Details of the action, if recorded.
    pub details: Option<String>,
    /// Who initiated the change.
    pub actor_id: String,
    /// The kind of actor (admin, advisor, technician, customer).
    pub actor_type: String,
    /// The status before the change.
    pub before_status: String,
    /// The status after the change.
    pub after_status: String,
    /// When the change happened.
    pub occurred_at: OffsetDateTime,
}

/// API response assembling everything the overview screen shows.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckOverviewResponse {
    /// The health check record.
    pub health_check: HealthCheckInfo,
    /// The four derived workflow badges.
    pub workflow: WorkflowStatusInfo,
    /// The derived financial summary.
    pub financial: FinancialSummaryInfo,
    /// The MRI evaluation summary. All zeroes when no MRI was taken.
    pub mri: MriSummaryInfo,
    /// Repair items, soft-deleted ones excluded.
    pub repair_items: Vec<RepairItemInfo>,
    /// The timeline of completed mutations, oldest first.
    pub timeline: Vec<TimelineEventInfo>,
}

// ========================================================================
// Capability model
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// Capabilities an operator holds against one health check.
///
/// These combine the operator's role with the health check's current
/// status. They are advisory flags for UI gating; every handler
/// re-checks before mutating.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheckCapabilities {
    /// Whether arrival can be recorded.
    pub can_record_arrival: Capability,
    /// Whether check-in can be completed.
    pub can_complete_check_in: Capability,
    /// Whether check-in can be skipped.
    pub can_skip_check_in: Capability,
    /// Whether a technician can be assigned.
    pub can_assign_technician: Capability,
    /// Whether the inspection can be started.
    pub can_start_inspection: Capability,
    /// Whether the inspection can be paused.
    pub can_pause_inspection: Capability,
    /// Whether the inspection can be resumed.
    pub can_resume_inspection: Capability,
    /// Whether the inspection can be completed.
    pub can_complete_inspection: Capability,
    /// Whether advisor review can begin.
    pub can_start_review: Capability,
    /// Whether the report can be marked ready to send.
    pub can_mark_ready: Capability,
    /// Whether the report can be published to the customer.
    pub can_publish: Capability,
    /// Whether a send failure can be recorded.
    pub can_record_unable_to_send: Capability,
    /// Whether repair items can be created, priced, or reorganized.
    pub can_edit_items: Capability,
    /// Whether labour and parts completion can be recorded.
    pub can_record_completion: Capability,
    /// Whether the visit can be marked completed.
    pub can_mark_completed: Capability,
    /// Whether the visit can be closed.
    pub can_close: Capability,
    /// Whether the visit can be cancelled.
    pub can_cancel: Capability,
    /// Whether the visit can be marked a no-show.
    pub can_mark_no_show: Capability,
    /// Whether the customer link can be marked expired.
    pub can_mark_expired: Capability,
}

/// Capabilities the customer holds through the public report link.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CustomerCapabilities {
    /// Whether the report link can be opened.
    pub can_open: Capability,
    /// Whether repair item decisions can be recorded.
    pub can_decide: Capability,
}
