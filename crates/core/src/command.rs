// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use vhc_flow_domain::{
    CheckResult, Decision, LabourEntry, MriResult, PartsEntry, SendChannels, Severity,
    TokenValidity,
};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record that the vehicle has arrived on site.
    RecordArrival,
    /// Complete check-in: record the mileage and the MRI checklist
    /// answers. Flagged answers generate repair items.
    CompleteCheckIn {
        /// Mileage read off the vehicle. Required.
        mileage: Option<i64>,
        /// MRI checklist answers taken with the customer.
        mri_results: Vec<MriResult>,
    },
    /// Skip check-in entirely, forfeiting MRI generation.
    SkipCheckIn {
        /// Why check-in was skipped.
        reason: String,
    },
    /// Assign the inspection to a technician.
    AssignTechnician {
        /// The technician taking the job.
        technician: String,
    },
    /// Technician starts the inspection.
    StartInspection,
    /// Technician pauses a running inspection.
    PauseInspection,
    /// Technician resumes a paused inspection.
    ResumeInspection,
    /// Technician completes the inspection, recording the findings.
    CompleteInspection {
        /// The full set of inspection findings.
        results: Vec<CheckResult>,
    },
    /// Advisor picks up the completed inspection for review.
    StartReview,
    /// Advisor marks the priced report ready to send.
    MarkReady,
    /// Publish the report to the customer over the selected channels.
    Publish {
        /// The channels to send over. At least one must be selected.
        channels: SendChannels,
        /// How long the customer link stays valid.
        validity: TokenValidity,
        /// The freshly issued public access token.
        token: String,
    },
    /// Record that the report could not be sent. Status does not advance.
    RecordUnableToSend {
        /// Why the report could not be sent.
        reason: String,
    },
    /// Customer opened the report link.
    RecordOpen {
        /// The token presented with the link.
        token: String,
    },
    /// Customer approved or declined one repair item.
    RecordDecision {
        /// The token presented with the link.
        token: String,
        /// The repair item decided on.
        repair_item_id: i64,
        /// The decision taken.
        decision: Decision,
        /// Customer notes accompanying the decision.
        notes: Option<String>,
        /// Captured signature reference, if any.
        signature: Option<String>,
    },
    /// Mark all authorised work done.
    MarkCompleted,
    /// Close out the visit. Irreversible.
    Close {
        /// Who closed the visit.
        closed_by: String,
    },
    /// Cancel the visit.
    Cancel {
        /// Why the visit was cancelled.
        reason: String,
    },
    /// Record that the customer never arrived.
    MarkNoShow,
    /// Mark the customer link expired, after observing that the token
    /// validity has lapsed.
    MarkExpired,
    /// Create a repair item by hand.
    CreateRepairItem {
        /// Short title of the work.
        title: String,
        /// Longer description, if any.
        description: Option<String>,
        /// Urgency of the work.
        severity: Severity,
    },
    /// Create a repair item from a flagged inspection finding.
    CreateRepairItemFromResult {
        /// The finding to raise the item from.
        check_result_id: i64,
    },
    /// Replace the pricing lines of an item or child and recompute
    /// its costs.
    UpdateItemPricing {
        /// The repair item to price.
        repair_item_id: i64,
        /// The child line to price instead, if any.
        child_id: Option<i64>,
        /// Labour pricing lines.
        labour_entries: Vec<LabourEntry>,
        /// Parts pricing lines.
        parts_entries: Vec<PartsEntry>,
    },
    /// Set the costs of an item or child directly, without pricing lines.
    SetItemCosts {
        /// The repair item to price.
        repair_item_id: i64,
        /// The child line to price instead, if any.
        child_id: Option<i64>,
        /// Parts cost.
        parts_cost: Decimal,
        /// Labour cost.
        labour_cost: Decimal,
    },
    /// Show or hide an item on the customer report.
    SetItemVisibility {
        /// The repair item.
        repair_item_id: i64,
        /// Whether the customer sees the item.
        customer_visible: bool,
    },
    /// Soft delete a repair item.
    DeleteRepairItem {
        /// The repair item to delete.
        repair_item_id: i64,
    },
    /// Add a child line under a repair item, making it a group.
    AddChildItem {
        /// The parent repair item.
        repair_item_id: i64,
        /// Short title of the child work.
        title: String,
        /// Urgency of the child work.
        severity: Severity,
    },
    /// Remove a child line from a group.
    RemoveChildItem {
        /// The parent repair item.
        repair_item_id: i64,
        /// The child to remove.
        child_id: i64,
    },
    /// Promote a child line to a standalone repair item.
    PromoteChildItem {
        /// The parent repair item.
        repair_item_id: i64,
        /// The child to promote.
        child_id: i64,
    },
    /// Mark labour complete on an item or child.
    MarkLabourComplete {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
        /// Who did the work.
        completed_by: String,
    },
    /// Clear the labour completion marker on an item or child.
    UndoLabourComplete {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
    },
    /// Mark parts complete on an item or child.
    MarkPartsComplete {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
        /// Who fitted the parts.
        completed_by: String,
    },
    /// Clear the parts completion marker on an item or child.
    UndoPartsComplete {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
    },
    /// Flag whether an item or child needs any labour at all.
    SetNoLabourRequired {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
        /// True if the work needs no labour.
        no_labour_required: bool,
    },
    /// Flag whether an item or child needs any parts at all.
    SetNoPartsRequired {
        /// The repair item.
        repair_item_id: i64,
        /// The child line instead, if any.
        child_id: Option<i64>,
        /// True if the work needs no parts.
        no_parts_required: bool,
    },
}
