// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repair items: priced, authorizable units of proposed work.
//!
//! An item's `total_price` is always its own parts cost plus its own
//! labour cost. Group rollups never overwrite it; the effective total
//! (own plus children) is computed wherever sums are needed.

use crate::check_result::{CheckResult, MriResult};
use crate::completion::CompletionMarkers;
use crate::error::DomainError;
use crate::financial::round_currency;
use crate::line_entry::{LabourEntry, PartsEntry, sum_labour_lines, sum_parts_lines};
use crate::types::Severity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A line of work grouped under a parent repair item.
///
/// Children cannot themselves have children; one level of grouping only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairItemChild {
    /// Identifier unique within the health check.
    pub child_id: i64,
    /// Short title of the work.
    pub title: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Urgency of the work.
    pub severity: Severity,
    /// Parts cost for this child alone.
    pub parts_cost: Decimal,
    /// Labour cost for this child alone.
    pub labour_cost: Decimal,
    /// Always `parts_cost` + `labour_cost`.
    pub total_price: Decimal,
    /// Labour pricing lines.
    pub labour_entries: Vec<LabourEntry>,
    /// Parts pricing lines.
    pub parts_entries: Vec<PartsEntry>,
    /// Labour and parts completion markers.
    pub completion: CompletionMarkers,
}

impl RepairItemChild {
    /// Creates a new child line with zero pricing.
    #[must_use]
    pub const fn new(child_id: i64, title: String, severity: Severity) -> Self {
        Self {
            child_id,
            title,
            description: None,
            severity,
            parts_cost: Decimal::ZERO,
            labour_cost: Decimal::ZERO,
            total_price: Decimal::ZERO,
            labour_entries: Vec::new(),
            parts_entries: Vec::new(),
            completion: CompletionMarkers::new(),
        }
    }

    /// Sets the child's own costs and keeps `total_price` consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if either cost is negative.
    pub fn set_costs(&mut self, parts_cost: Decimal, labour_cost: Decimal) -> Result<(), DomainError> {
        validate_cost("parts_cost", parts_cost)?;
        validate_cost("labour_cost", labour_cost)?;
        self.parts_cost = parts_cost;
        self.labour_cost = labour_cost;
        self.total_price = parts_cost + labour_cost;
        Ok(())
    }

    /// Recomputes costs from the pricing lines, rounding each cost to
    /// currency precision.
    pub fn recompute_costs_from_entries(&mut self) {
        self.labour_cost = round_currency(sum_labour_lines(&self.labour_entries));
        self.parts_cost = round_currency(sum_parts_lines(&self.parts_entries));
        self.total_price = self.parts_cost + self.labour_cost;
    }
}

/// A priced unit of proposed work the customer can authorize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairItem {
    /// Unique identifier of the repair item.
    pub repair_item_id: i64,
    /// The health check this item belongs to.
    pub health_check_id: i64,
    /// The inspection finding that raised this item, if any.
    pub check_result_id: Option<i64>,
    /// Short title of the work.
    pub title: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Urgency of the work.
    pub severity: Severity,
    /// Parts cost for this item alone, excluding children.
    pub parts_cost: Decimal,
    /// Labour cost for this item alone, excluding children.
    pub labour_cost: Decimal,
    /// Always `parts_cost` + `labour_cost`. Never includes children.
    pub total_price: Decimal,
    /// Whether the customer sees this item on the report.
    pub customer_visible: bool,
    /// Whether this work is an MOT failure.
    pub is_mot_failure: bool,
    /// Display ordering on the report.
    pub sort_order: i32,
    /// Labour pricing lines.
    pub labour_entries: Vec<LabourEntry>,
    /// Parts pricing lines.
    pub parts_entries: Vec<PartsEntry>,
    /// Labour and parts completion markers for the item itself.
    pub completion: CompletionMarkers,
    /// Grouped child lines, if this item is a group.
    pub children: Vec<RepairItemChild>,
    /// Soft delete marker.
    pub deleted_at: Option<OffsetDateTime>,
}

impl RepairItem {
    /// Creates a new repair item with zero pricing.
    #[must_use]
    pub const fn new(
        repair_item_id: i64,
        health_check_id: i64,
        title: String,
        severity: Severity,
    ) -> Self {
        Self {
            repair_item_id,
            health_check_id,
            check_result_id: None,
            title,
            description: None,
            severity,
            parts_cost: Decimal::ZERO,
            labour_cost: Decimal::ZERO,
            total_price: Decimal::ZERO,
            customer_visible: true,
            is_mot_failure: false,
            sort_order: 0,
            labour_entries: Vec::new(),
            parts_entries: Vec::new(),
            completion: CompletionMarkers::new(),
            children: Vec::new(),
            deleted_at: None,
        }
    }

    /// Creates a repair item from a flagged inspection finding.
    ///
    /// # Errors
    ///
    /// Returns an error if the finding is not graded red or amber.
    pub fn from_check_result(
        repair_item_id: i64,
        result: &CheckResult,
    ) -> Result<Self, DomainError> {
        let severity: Severity = result
            .rag
            .and_then(Severity::from_rag)
            .ok_or_else(|| DomainError::ItemNotDecidable {
                repair_item_id,
                reason: format!("finding '{}' is not flagged red or amber", result.label),
            })?;

        let mut item: Self = Self::new(
            repair_item_id,
            result.health_check_id,
            result.label.clone(),
            severity,
        );
        item.check_result_id = Some(result.check_result_id);
        item.description = result.notes.clone();
        Ok(item)
    }

    /// Creates a repair item from a flagged MRI result, carrying its
    /// indicative price as labour.
    ///
    /// # Errors
    ///
    /// Returns an error if the MRI result is not graded red or amber.
    pub fn from_mri_result(repair_item_id: i64, result: &MriResult) -> Result<Self, DomainError> {
        let severity: Severity = result
            .rag
            .and_then(Severity::from_rag)
            .ok_or_else(|| DomainError::ItemNotDecidable {
                repair_item_id,
                reason: format!(
                    "MRI result '{}' is not flagged red or amber",
                    result.description
                ),
            })?;

        let mut item: Self = Self::new(
            repair_item_id,
            result.health_check_id,
            result.description.clone(),
            severity,
        );
        if let Some(price) = result.price {
            item.set_costs(Decimal::ZERO, price)?;
        }
        Ok(item)
    }

    /// Returns true if the item has been soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if the item groups child lines.
    #[must_use]
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the item's own total plus the totals of all its children.
    #[must_use]
    pub fn effective_total(&self) -> Decimal {
        self.children
            .iter()
            .fold(self.total_price, |acc, child| acc + child.total_price)
    }

    /// Returns the item's own parts cost plus the parts costs of its children.
    #[must_use]
    pub fn effective_parts_cost(&self) -> Decimal {
        self.children
            .iter()
            .fold(self.parts_cost, |acc, child| acc + child.parts_cost)
    }

    /// Returns the item's own labour cost plus the labour costs of its children.
    #[must_use]
    pub fn effective_labour_cost(&self) -> Decimal {
        self.children
            .iter()
            .fold(self.labour_cost, |acc, child| acc + child.labour_cost)
    }

    /// Returns true if the customer can record a decision on this item:
    /// visible, not deleted, and priced above zero.
    #[must_use]
    pub fn is_decidable(&self) -> bool {
        self.customer_visible && !self.is_deleted() && self.effective_total() > Decimal::ZERO
    }

    /// Sets the item's own costs and keeps `total_price` consistent.
    ///
    /// # Errors
    ///
    /// Returns an error if either cost is negative.
    pub fn set_costs(&mut self, parts_cost: Decimal, labour_cost: Decimal) -> Result<(), DomainError> {
        validate_cost("parts_cost", parts_cost)?;
        validate_cost("labour_cost", labour_cost)?;
        self.parts_cost = parts_cost;
        self.labour_cost = labour_cost;
        self.total_price = parts_cost + labour_cost;
        Ok(())
    }

    /// Recomputes costs from the pricing lines, rounding each cost to
    /// currency precision.
    pub fn recompute_costs_from_entries(&mut self) {
        self.labour_cost = round_currency(sum_labour_lines(&self.labour_entries));
        self.parts_cost = round_currency(sum_parts_lines(&self.parts_entries));
        self.total_price = self.parts_cost + self.labour_cost;
    }

    /// Marks the item soft deleted.
    pub const fn soft_delete(&mut self, now: OffsetDateTime) {
        self.deleted_at = Some(now);
    }

    /// Adds a child line under this item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is deleted or a child with the same
    /// title already exists in the group.
    pub fn add_child(&mut self, child: RepairItemChild) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::RepairItemDeleted {
                repair_item_id: self.repair_item_id,
            });
        }
        if self.children.iter().any(|c| c.title == child.title) {
            return Err(DomainError::DuplicateChildTitle {
                repair_item_id: self.repair_item_id,
                title: child.title,
            });
        }
        self.children.push(child);
        Ok(())
    }

    /// Removes a child line from this item, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if no child with the given id exists.
    pub fn remove_child(&mut self, child_id: i64) -> Result<RepairItemChild, DomainError> {
        let index: usize = self
            .children
            .iter()
            .position(|c| c.child_id == child_id)
            .ok_or(DomainError::ChildItemNotFound {
                repair_item_id: self.repair_item_id,
                child_id,
            })?;
        Ok(self.children.remove(index))
    }

    /// Looks up a child line by id.
    ///
    /// # Errors
    ///
    /// Returns an error if no child with the given id exists.
    pub fn find_child_mut(&mut self, child_id: i64) -> Result<&mut RepairItemChild, DomainError> {
        let repair_item_id: i64 = self.repair_item_id;
        self.children
            .iter_mut()
            .find(|c| c.child_id == child_id)
            .ok_or(DomainError::ChildItemNotFound {
                repair_item_id,
                child_id,
            })
    }

    /// Promotes a child line to a standalone repair item, removing it
    /// from the group. The caller supplies the new item's identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if no child with the given id exists.
    pub fn promote_child(
        &mut self,
        child_id: i64,
        new_repair_item_id: i64,
    ) -> Result<Self, DomainError> {
        let child: RepairItemChild = self.remove_child(child_id)?;

        let mut item: Self = Self::new(
            new_repair_item_id,
            self.health_check_id,
            child.title,
            child.severity,
        );
        item.description = child.description;
        item.parts_cost = child.parts_cost;
        item.labour_cost = child.labour_cost;
        item.total_price = child.total_price;
        item.labour_entries = child.labour_entries;
        item.parts_entries = child.parts_entries;
        item.completion = child.completion;
        item.customer_visible = self.customer_visible;
        Ok(item)
    }
}

/// Validates that a monetary cost is not negative.
fn validate_cost(field: &str, amount: Decimal) -> Result<(), DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::InvalidAmount {
            field: field.to_string(),
            amount,
        });
    }
    Ok(())
}
