//! Attempt report types with JSON persistence.
//!
//! A report is the durable record of one completed attempt. Submitted
//! attempts carry their full per-question review data; timed-out attempts
//! carry only the score summary and cannot be reviewed.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::Completion;
use crate::model::Question;
use crate::scoring::{review_rows, QuestionReview, ScoreSummary};

/// How the recorded attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Submitted,
    TimedOut,
}

/// The durable record of one completed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt completed.
    pub created_at: DateTime<Utc>,
    pub course_id: String,
    pub module_id: String,
    pub module_title: String,
    pub kind: ReportKind,
    pub score: u32,
    pub total: u32,
    /// Present only for submitted attempts.
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Present only for submitted attempts.
    #[serde(default)]
    pub answers: BTreeMap<usize, usize>,
}

impl AttemptReport {
    /// Build a report from a completion payload.
    pub fn from_completion(completion: &Completion, module_title: &str) -> Self {
        let summary = completion.summary();
        let (kind, questions, answers) = match completion {
            Completion::Submitted(review) => (
                ReportKind::Submitted,
                review.questions.clone(),
                review.answers.clone(),
            ),
            Completion::TimedOut(_) => (ReportKind::TimedOut, Vec::new(), BTreeMap::new()),
        };

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            course_id: summary.course_id.clone(),
            module_id: summary.module_id.clone(),
            module_title: module_title.to_string(),
            kind,
            score: summary.score,
            total: summary.total,
            questions,
            answers,
        }
    }

    /// The score summary of the recorded attempt.
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            course_id: self.course_id.clone(),
            module_id: self.module_id.clone(),
            score: self.score,
            total: self.total,
        }
    }

    /// Per-question review rows, or `None` for a timed-out attempt.
    pub fn review(&self) -> Option<Vec<QuestionReview>> {
        match self.kind {
            ReportKind::Submitted => Some(review_rows(&self.questions, &self.answers)),
            ReportKind::TimedOut => None,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("no attempt found at {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse attempt report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ReviewOutcome;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                prompt: "First".into(),
                options: vec!["a".into(), "b".into()],
                correct: 1,
            },
            Question {
                prompt: "Second".into(),
                options: vec!["a".into(), "b".into()],
                correct: 0,
            },
        ]
    }

    fn summary(score: u32) -> ScoreSummary {
        ScoreSummary {
            course_id: "rust-101".into(),
            module_id: "ownership".into(),
            score,
            total: 2,
        }
    }

    #[test]
    fn submitted_report_carries_review() {
        let completion = Completion::Submitted(ReviewOutcome {
            summary: summary(1),
            questions: questions(),
            answers: BTreeMap::from([(0, 1), (1, 1)]),
        });
        let report = AttemptReport::from_completion(&completion, "Ownership");

        assert_eq!(report.kind, ReportKind::Submitted);
        let rows = report.review().expect("submitted attempts are reviewable");
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_correct);
        assert!(!rows[1].is_correct);
    }

    #[test]
    fn timed_out_report_has_no_review() {
        let completion = Completion::TimedOut(summary(0));
        let report = AttemptReport::from_completion(&completion, "Ownership");

        assert_eq!(report.kind, ReportKind::TimedOut);
        assert!(report.review().is_none());
        assert!(report.questions.is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let completion = Completion::Submitted(ReviewOutcome {
            summary: summary(2),
            questions: questions(),
            answers: BTreeMap::from([(0, 1), (1, 0)]),
        });
        let report = AttemptReport::from_completion(&completion, "Ownership");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attempt.json");
        report.save_json(&path).unwrap();

        let loaded = AttemptReport::load_json(&path).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.score, 2);
        assert_eq!(loaded.review().unwrap().len(), 2);
    }

    #[test]
    fn loading_missing_report_is_an_explicit_error() {
        let err = AttemptReport::load_json(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("no attempt found"));
    }
}
