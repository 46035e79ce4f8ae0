//! The attempt state machine.
//!
//! An [`Attempt`] is one timed run through a quiz: a question pointer, the
//! recorded answers, a countdown, and a submit-confirmation phase. It is
//! pure and synchronous — time reaches it only as [`ExamEvent::Tick`] events,
//! so every transition is unit-testable without a clock. The async session
//! driver in `quizflow-session` owns exactly one `Attempt` and feeds it a
//! serialized stream of user commands and ticks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Question;
use crate::scoring::{score_answers, ReviewOutcome, ScoreSummary};
use crate::traits::ResolvedQuiz;

/// Which stage of the attempt is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Answering questions.
    InProgress,
    /// A submit confirmation is pending; the clock keeps running.
    ConfirmingSubmit,
    /// Terminal. All further events are ignored.
    Completed,
}

/// Everything that can happen to an in-flight attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamEvent {
    /// Choose an option for the current question. Re-selection overwrites.
    SelectAnswer(usize),
    /// Advance to the next question. No-op at the last question.
    Next,
    /// Go back one question. No-op at the first question.
    Previous,
    /// Ask to submit. Only honored at the last question.
    RequestSubmit,
    /// Back out of the submit confirmation.
    CancelSubmit,
    /// Confirm the pending submission and finish the attempt.
    ConfirmSubmit,
    /// One second of the time budget has elapsed.
    Tick,
}

/// How an attempt finished.
///
/// A manual submission carries the full review payload; a timeout carries
/// only the score summary, so a timed-out attempt cannot be reviewed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Completion {
    Submitted(ReviewOutcome),
    TimedOut(ScoreSummary),
}

impl Completion {
    /// The score summary, regardless of how the attempt ended.
    pub fn summary(&self) -> &ScoreSummary {
        match self {
            Completion::Submitted(review) => &review.summary,
            Completion::TimedOut(summary) => summary,
        }
    }
}

/// One timed run through a quiz.
///
/// Owned exclusively by its driver for its whole lifetime; there is no
/// save/resume, and an abandoned attempt is unrecoverable.
#[derive(Debug, Clone)]
pub struct Attempt {
    course_id: String,
    module_id: String,
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, usize>,
    remaining_secs: u64,
    phase: Phase,
}

impl Attempt {
    /// Start a fresh attempt at a resolved quiz.
    pub fn new(resolved: &ResolvedQuiz) -> Self {
        Self {
            course_id: resolved.course_id.clone(),
            module_id: resolved.module_id.clone(),
            questions: resolved.quiz.questions.clone(),
            current_index: 0,
            answers: BTreeMap::new(),
            remaining_secs: resolved.quiz.time_limit_secs,
            phase: Phase::InProgress,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// The question currently shown, if the quiz has any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// The recorded choice for the current question.
    pub fn current_choice(&self) -> Option<usize> {
        self.answers.get(&self.current_index).copied()
    }

    /// Number of questions with a recorded answer.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    fn at_last_question(&self) -> bool {
        self.current_index == self.last_index()
    }

    /// Apply one event and return the completion payload if the attempt
    /// finished. Events that have no defined transition in the current
    /// phase are no-ops; everything after completion is ignored.
    pub fn apply(&mut self, event: ExamEvent) -> Option<Completion> {
        if self.phase == Phase::Completed {
            return None;
        }

        match (self.phase, event) {
            (Phase::InProgress, ExamEvent::SelectAnswer(option)) => {
                let valid = self
                    .current_question()
                    .is_some_and(|q| option < q.options.len());
                if valid {
                    // Last write wins; at most one entry per question.
                    self.answers.insert(self.current_index, option);
                }
                None
            }
            (Phase::InProgress, ExamEvent::Next) => {
                if !self.at_last_question() {
                    self.current_index += 1;
                }
                None
            }
            (Phase::InProgress, ExamEvent::Previous) => {
                if self.current_index > 0 {
                    self.current_index -= 1;
                }
                None
            }
            (Phase::InProgress, ExamEvent::RequestSubmit) => {
                if self.at_last_question() {
                    self.phase = Phase::ConfirmingSubmit;
                }
                None
            }
            (Phase::ConfirmingSubmit, ExamEvent::CancelSubmit) => {
                self.phase = Phase::InProgress;
                None
            }
            (Phase::ConfirmingSubmit, ExamEvent::ConfirmSubmit) => {
                self.phase = Phase::Completed;
                Some(Completion::Submitted(ReviewOutcome {
                    summary: self.summary(),
                    questions: self.questions.clone(),
                    answers: self.answers.clone(),
                }))
            }
            // The clock runs through the submit confirmation; expiry wins
            // over an in-flight submission.
            (_, ExamEvent::Tick) => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    self.phase = Phase::Completed;
                    Some(Completion::TimedOut(self.summary()))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            course_id: self.course_id.clone(),
            module_id: self.module_id.clone(),
            score: score_answers(&self.questions, &self.answers),
            total: self.questions.len() as u32,
        }
    }
}
