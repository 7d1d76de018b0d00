// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inspection findings: answered checklist items and MRI results.

use crate::types::{CheckValue, RagStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One answered inspection checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Unique identifier of the result.
    pub check_result_id: i64,
    /// The health check this result belongs to.
    pub health_check_id: i64,
    /// The checklist template item answered.
    pub template_item_id: i64,
    /// Checklist section, e.g. "Tyres".
    pub section: String,
    /// Item label, e.g. "Front left tyre".
    pub label: String,
    /// RAG grading, if the item was graded.
    pub rag: Option<RagStatus>,
    /// Typed reading or answer, if one was captured.
    pub value: Option<CheckValue>,
    /// Technician notes.
    pub notes: Option<String>,
    /// Attached media references.
    pub media: Vec<String>,
}

impl CheckResult {
    /// Returns true if this result flags work (graded red or amber).
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.rag.is_some_and(|rag| rag.is_flagged())
    }
}

/// RAG counts across a set of findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RagCounts {
    /// Number of red findings.
    pub red: u32,
    /// Number of amber findings.
    pub amber: u32,
    /// Number of green findings.
    pub green: u32,
}

/// Counts RAG grades across check results. Ungraded results are not counted.
#[must_use]
pub fn count_rag_statuses(results: &[CheckResult]) -> RagCounts {
    results
        .iter()
        .filter_map(|result| result.rag)
        .fold(RagCounts::default(), |mut counts, rag| {
            match rag {
                RagStatus::Red => counts.red += 1,
                RagStatus::Amber => counts.amber += 1,
                RagStatus::Green => counts.green += 1,
            }
            counts
        })
}

/// One manufacturer recommended item evaluated at check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MriResult {
    /// Unique identifier of the MRI result.
    pub mri_result_id: i64,
    /// The health check this result belongs to.
    pub health_check_id: i64,
    /// What the manufacturer recommends.
    pub description: String,
    /// RAG grading, if evaluated.
    pub rag: Option<RagStatus>,
    /// Indicative price for the recommended work.
    pub price: Option<Decimal>,
}

impl MriResult {
    /// Returns true if this result flags work (graded red or amber).
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.rag.is_some_and(|rag| rag.is_flagged())
    }
}

/// Summary of MRI evaluation for the overview read.
///
/// Derived data: when no MRI results exist the summary degrades to all
/// zeroes rather than failing the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MriSummary {
    /// Number of red MRI results.
    pub red: u32,
    /// Number of amber MRI results.
    pub amber: u32,
    /// Number of green MRI results.
    pub green: u32,
    /// Number of MRI results without a grade.
    pub unanswered: u32,
}

/// Summarizes MRI results for the overview read.
#[must_use]
pub fn summarize_mri_results(results: &[MriResult]) -> MriSummary {
    results
        .iter()
        .fold(MriSummary::default(), |mut summary, result| {
            match result.rag {
                Some(RagStatus::Red) => summary.red += 1,
                Some(RagStatus::Amber) => summary.amber += 1,
                Some(RagStatus::Green) => summary.green += 1,
                None => summary.unanswered += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(id: i64, rag: Option<RagStatus>) -> CheckResult {
        CheckResult {
            check_result_id: id,
            health_check_id: 1,
            template_item_id: id,
            section: String::from("Tyres"),
            label: String::from("Front left tyre"),
            rag,
            value: None,
            notes: None,
            media: vec![],
        }
    }

    fn make_mri(id: i64, rag: Option<RagStatus>) -> MriResult {
        MriResult {
            mri_result_id: id,
            health_check_id: 1,
            description: String::from("Brake fluid change"),
            rag,
            price: None,
        }
    }

    #[test]
    fn test_count_rag_statuses() {
        let results = vec![
            make_result(1, Some(RagStatus::Red)),
            make_result(2, Some(RagStatus::Amber)),
            make_result(3, Some(RagStatus::Amber)),
            make_result(4, Some(RagStatus::Green)),
            make_result(5, None),
        ];

        let counts: RagCounts = count_rag_statuses(&results);

        assert_eq!(counts.red, 1);
        assert_eq!(counts.amber, 2);
        assert_eq!(counts.green, 1);
    }

    #[test]
    fn test_count_rag_statuses_empty() {
        let counts: RagCounts = count_rag_statuses(&[]);
        assert_eq!(counts, RagCounts::default());
    }

    #[test]
    fn test_flagged_results() {
        assert!(make_result(1, Some(RagStatus::Red)).is_flagged());
        assert!(make_result(2, Some(RagStatus::Amber)).is_flagged());
        assert!(!make_result(3, Some(RagStatus::Green)).is_flagged());
        assert!(!make_result(4, None).is_flagged());
    }

    #[test]
    fn test_summarize_mri_results() {
        let results = vec![
            make_mri(1, Some(RagStatus::Red)),
            make_mri(2, Some(RagStatus::Green)),
            make_mri(3, None),
        ];

        let summary: MriSummary = summarize_mri_results(&results);

        assert_eq!(summary.red, 1);
        assert_eq!(summary.amber, 0);
        assert_eq!(summary.green, 1);
        assert_eq!(summary.unanswered, 1);
    }

    #[test]
    fn test_mri_summary_degrades_to_default() {
        let summary: MriSummary = summarize_mri_results(&[]);
        assert_eq!(summary, MriSummary::default());
    }
}
