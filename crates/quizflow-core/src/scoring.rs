//! Attempt scoring and completion payloads.
//!
//! Scoring is a single linear pass over the question list: an answer scores
//! one point when it matches the question's correct index, and an unanswered
//! question never matches. Deterministic and idempotent for fixed inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Question;

/// Minimum percentage required to pass an attempt.
pub const PASS_THRESHOLD: f64 = 60.0;

/// Count the correctly answered questions.
///
/// `answers` maps question index to the chosen option index. Entries outside
/// the question range are ignored.
pub fn score_answers(questions: &[Question], answers: &BTreeMap<usize, usize>) -> u32 {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(i) == Some(&q.correct))
        .count() as u32
}

/// The score summary handed off when an attempt completes.
///
/// This is the full payload for a timed-out attempt; a submitted attempt
/// additionally carries the review data in [`ReviewOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub course_id: String,
    pub module_id: String,
    pub score: u32,
    pub total: u32,
}

impl ScoreSummary {
    /// Score as a percentage of the total. Zero-question attempts score 0%.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total) * 100.0
    }

    /// Whether the attempt meets the pass threshold.
    pub fn passed(&self) -> bool {
        self.percentage() >= PASS_THRESHOLD
    }
}

/// The payload handed off when an attempt is submitted manually.
///
/// Carries everything the review screen needs; nothing is refetched or
/// recomputed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub summary: ScoreSummary,
    pub questions: Vec<Question>,
    pub answers: BTreeMap<usize, usize>,
}

impl ReviewOutcome {
    /// One review row per question, in presentation order.
    pub fn rows(&self) -> Vec<QuestionReview> {
        review_rows(&self.questions, &self.answers)
    }
}

/// Per-question correctness breakdown for the review screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub index: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    /// The learner's choice; `None` means unanswered.
    pub chosen: Option<usize>,
    pub is_correct: bool,
}

/// Build review rows from questions and recorded answers.
pub fn review_rows(
    questions: &[Question],
    answers: &BTreeMap<usize, usize>,
) -> Vec<QuestionReview> {
    questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let chosen = answers.get(&index).copied();
            QuestionReview {
                index,
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                correct: q.correct,
                chosen,
                is_correct: chosen == Some(q.correct),
            }
        })
        .collect()
}
