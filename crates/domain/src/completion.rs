// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Labour and parts completion tracking.
//!
//! Completion is **computed**, not stored. An item or group resolves to
//! pending, partial, or complete as a pure function of its markers and
//! its children's markers.
//!
//! A group satisfies a completion dimension through either of two rules:
//! its own marker (or not-required flag), which is authoritative once
//! set, or every child carrying a marker or flag. The outcome is tagged
//! with the rule that satisfied it.

use crate::repair_item::RepairItem;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Completion markers for one item or child line.
///
/// The timestamp and attribution fields are set and cleared together.
/// The not-required flags count as completion for their dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionMarkers {
    /// When labour was marked complete.
    pub labour_completed_at: Option<OffsetDateTime>,
    /// Who marked labour complete.
    pub labour_completed_by: Option<String>,
    /// The work needs no labour.
    pub no_labour_required: bool,
    /// When parts were marked complete.
    pub parts_completed_at: Option<OffsetDateTime>,
    /// Who marked parts complete.
    pub parts_completed_by: Option<String>,
    /// The work needs no parts.
    pub no_parts_required: bool,
}

impl CompletionMarkers {
    /// Creates empty markers: nothing complete, nothing waived.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            labour_completed_at: None,
            labour_completed_by: None,
            no_labour_required: false,
            parts_completed_at: None,
            parts_completed_by: None,
            no_parts_required: false,
        }
    }

    /// Marks labour complete with attribution.
    pub fn mark_labour_complete(&mut self, by: String, at: OffsetDateTime) {
        self.labour_completed_at = Some(at);
        self.labour_completed_by = Some(by);
    }

    /// Clears the labour completion marker.
    pub fn undo_labour_complete(&mut self) {
        self.labour_completed_at = None;
        self.labour_completed_by = None;
    }

    /// Marks parts complete with attribution.
    pub fn mark_parts_complete(&mut self, by: String, at: OffsetDateTime) {
        self.parts_completed_at = Some(at);
        self.parts_completed_by = Some(by);
    }

    /// Clears the parts completion marker.
    pub fn undo_parts_complete(&mut self) {
        self.parts_completed_at = None;
        self.parts_completed_by = None;
    }

    /// Returns true if labour is complete or waived for this line alone.
    #[must_use]
    pub const fn labour_done(&self) -> bool {
        self.labour_completed_at.is_some() || self.no_labour_required
    }

    /// Returns true if parts are complete or waived for this line alone.
    #[must_use]
    pub const fn parts_done(&self) -> bool {
        self.parts_completed_at.is_some() || self.no_parts_required
    }
}

/// Resolved completion of one dimension for an item or group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    /// Nothing done yet.
    Pending,
    /// Some but not all children done.
    Partial,
    /// The dimension is satisfied.
    Complete,
}

impl CompletionState {
    /// Returns the string representation of the state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

/// Which rule satisfied a complete dimension on a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// The group's own marker or not-required flag.
    GroupMarker,
    /// Every child carries a marker or flag.
    AllChildren,
}

/// Completion of one dimension, tagged with the satisfying rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOutcome {
    /// The resolved state.
    pub state: CompletionState,
    /// The rule that satisfied it; `None` unless complete.
    pub rule: Option<CompletionRule>,
}

impl CompletionOutcome {
    /// Returns true if the dimension is satisfied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == CompletionState::Complete
    }
}

/// Resolves labour completion for an item, including its children.
#[must_use]
pub fn labour_completion(item: &RepairItem) -> CompletionOutcome {
    let children_done: Vec<bool> = item
        .children
        .iter()
        .map(|child| child.completion.labour_done())
        .collect();
    resolve(item.completion.labour_done(), &children_done)
}

/// Resolves parts completion for an item, including its children.
#[must_use]
pub fn parts_completion(item: &RepairItem) -> CompletionOutcome {
    let children_done: Vec<bool> = item
        .children
        .iter()
        .map(|child| child.completion.parts_done())
        .collect();
    resolve(item.completion.parts_done(), &children_done)
}

/// Returns true if both dimensions resolve complete for the item.
#[must_use]
pub fn fully_complete(item: &RepairItem) -> bool {
    labour_completion(item).is_complete() && parts_completion(item).is_complete()
}

/// Resolves one completion dimension.
///
/// The item's own marker is authoritative once set, even if children
/// later regress. Without it, every child must be done; some children
/// done resolves partial.
fn resolve(own_done: bool, children_done: &[bool]) -> CompletionOutcome {
    if own_done {
        return CompletionOutcome {
            state: CompletionState::Complete,
            rule: Some(CompletionRule::GroupMarker),
        };
    }

    if children_done.is_empty() {
        return CompletionOutcome {
            state: CompletionState::Pending,
            rule: None,
        };
    }

    let done_count: usize = children_done.iter().filter(|done| **done).count();
    if done_count == children_done.len() {
        CompletionOutcome {
            state: CompletionState::Complete,
            rule: Some(CompletionRule::AllChildren),
        }
    } else if done_count > 0 {
        CompletionOutcome {
            state: CompletionState::Partial,
            rule: None,
        }
    } else {
        CompletionOutcome {
            state: CompletionState::Pending,
            rule: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::repair_item::RepairItemChild;
    use crate::types::Severity;

    fn make_item() -> RepairItem {
        RepairItem::new(1, 1, String::from("Brakes"), Severity::Red)
    }

    fn make_child(id: i64, labour_done: bool) -> RepairItemChild {
        let mut child = RepairItemChild::new(id, format!("Child {id}"), Severity::Amber);
        if labour_done {
            child
                .completion
                .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());
        }
        child
    }

    #[test]
    fn test_standalone_item_pending_by_default() {
        let item: RepairItem = make_item();

        assert_eq!(labour_completion(&item).state, CompletionState::Pending);
        assert_eq!(parts_completion(&item).state, CompletionState::Pending);
    }

    #[test]
    fn test_standalone_item_own_marker() {
        let mut item: RepairItem = make_item();
        item.completion
            .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());

        let outcome: CompletionOutcome = labour_completion(&item);
        assert_eq!(outcome.state, CompletionState::Complete);
        assert_eq!(outcome.rule, Some(CompletionRule::GroupMarker));
    }

    #[test]
    fn test_not_required_flag_counts_as_complete() {
        let mut item: RepairItem = make_item();
        item.completion.no_parts_required = true;

        let outcome: CompletionOutcome = parts_completion(&item);
        assert_eq!(outcome.state, CompletionState::Complete);
        assert_eq!(outcome.rule, Some(CompletionRule::GroupMarker));
    }

    #[test]
    fn test_group_all_children_complete() {
        let mut item: RepairItem = make_item();
        item.add_child(make_child(1, true)).unwrap();
        item.add_child(make_child(2, true)).unwrap();

        let outcome: CompletionOutcome = labour_completion(&item);
        assert_eq!(outcome.state, CompletionState::Complete);
        assert_eq!(outcome.rule, Some(CompletionRule::AllChildren));
    }

    #[test]
    fn test_group_some_children_complete_is_partial() {
        let mut item: RepairItem = make_item();
        item.add_child(make_child(1, true)).unwrap();
        item.add_child(make_child(2, false)).unwrap();

        let outcome: CompletionOutcome = labour_completion(&item);
        assert_eq!(outcome.state, CompletionState::Partial);
        assert_eq!(outcome.rule, None);
    }

    #[test]
    fn test_group_no_children_complete_is_pending() {
        let mut item: RepairItem = make_item();
        item.add_child(make_child(1, false)).unwrap();
        item.add_child(make_child(2, false)).unwrap();

        assert_eq!(labour_completion(&item).state, CompletionState::Pending);
    }

    #[test]
    fn test_group_marker_authoritative_over_regressed_children() {
        let mut item: RepairItem = make_item();
        item.add_child(make_child(1, false)).unwrap();
        item.completion
            .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());

        // Own marker wins even though the child is not done
        let outcome: CompletionOutcome = labour_completion(&item);
        assert_eq!(outcome.state, CompletionState::Complete);
        assert_eq!(outcome.rule, Some(CompletionRule::GroupMarker));
    }

    #[test]
    fn test_child_not_required_flag_counts_toward_all_children() {
        let mut item: RepairItem = make_item();
        let mut flagged = RepairItemChild::new(1, String::from("Inspect only"), Severity::Amber);
        flagged.completion.no_labour_required = true;
        item.add_child(flagged).unwrap();
        item.add_child(make_child(2, true)).unwrap();

        let outcome: CompletionOutcome = labour_completion(&item);
        assert_eq!(outcome.state, CompletionState::Complete);
        assert_eq!(outcome.rule, Some(CompletionRule::AllChildren));
    }

    #[test]
    fn test_undo_clears_attribution() {
        let mut markers = CompletionMarkers::new();
        markers.mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());
        assert!(markers.labour_done());

        markers.undo_labour_complete();
        assert!(!markers.labour_done());
        assert!(markers.labour_completed_by.is_none());
    }

    #[test]
    fn test_dimensions_are_independent() {
        let mut item: RepairItem = make_item();
        item.completion
            .mark_labour_complete(String::from("tech"), OffsetDateTime::now_utc());

        assert!(labour_completion(&item).is_complete());
        assert!(!parts_completion(&item).is_complete());
        assert!(!fully_complete(&item));

        item.completion.no_parts_required = true;
        assert!(fully_complete(&item));
    }
}
