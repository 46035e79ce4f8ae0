//! quizflow-session — Timed exam session driver.
//!
//! Runs one attempt end-to-end on a Tokio task that exclusively owns the
//! attempt state: commands arrive over a channel, the 1 Hz countdown is an
//! interval owned by the task (so it is released on every exit path), and
//! both are serialized through a single biased `select!` loop — a timeout
//! that becomes eligible in the same instant as a manual submission always
//! wins.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use quizflow_core::attempt::{Attempt, Completion, ExamEvent, Phase};
use quizflow_core::traits::ResolvedQuiz;

/// Errors that can occur when starting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The resolved quiz has no questions to run.
    #[error("quiz for {course_id}/{module_id} has no questions")]
    EmptyQuiz {
        course_id: String,
        module_id: String,
    },
}

/// Session tuning knobs.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Countdown granularity. One second unless a test says otherwise.
    pub tick: Duration,
    /// Overrides the quiz's own time budget, in seconds.
    pub time_limit_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            time_limit_secs: None,
        }
    }
}

/// A renderable snapshot of the attempt, published after every transition.
#[derive(Debug, Clone, Serialize)]
pub struct ExamView {
    pub phase: Phase,
    pub current_index: usize,
    pub total_questions: usize,
    pub prompt: String,
    pub options: Vec<String>,
    /// The recorded choice for the current question.
    pub chosen: Option<usize>,
    pub answered: usize,
    pub remaining_secs: u64,
}

impl ExamView {
    fn snapshot(attempt: &Attempt) -> Self {
        let (prompt, options) = match attempt.current_question() {
            Some(q) => (q.prompt.clone(), q.options.clone()),
            None => (String::new(), Vec::new()),
        };
        Self {
            phase: attempt.phase(),
            current_index: attempt.current_index(),
            total_questions: attempt.total_questions(),
            prompt,
            options,
            chosen: attempt.current_choice(),
            answered: attempt.answered_count(),
            remaining_secs: attempt.remaining_secs(),
        }
    }
}

/// Command side of a running session.
///
/// Dropping the handle without waiting for the outcome closes the command
/// channel and abandons the attempt; there is no save/resume.
#[derive(Debug)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<ExamEvent>,
    view: watch::Receiver<ExamView>,
}

impl SessionHandle {
    /// Send one event to the session. Returns `false` once the session has
    /// ended.
    pub fn send(&self, event: ExamEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// A fresh subscription to view snapshots.
    pub fn view(&self) -> watch::Receiver<ExamView> {
        self.view.clone()
    }
}

/// Outcome side of a running session.
#[derive(Debug)]
pub struct SessionRun {
    task: JoinHandle<Option<Completion>>,
}

impl SessionRun {
    /// Wait for the session to finish. `None` means the attempt was
    /// abandoned before completing.
    pub async fn join(self) -> Option<Completion> {
        match self.task.await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!("session task failed: {e}");
                None
            }
        }
    }
}

/// The exam session entry point.
pub struct ExamSession;

impl ExamSession {
    /// Spawn a session task for a resolved quiz.
    ///
    /// The returned handle drives the attempt; the run resolves to the
    /// completion payload.
    pub fn start(
        resolved: &ResolvedQuiz,
        config: SessionConfig,
    ) -> Result<(SessionHandle, SessionRun), SessionError> {
        if resolved.quiz.is_empty() {
            return Err(SessionError::EmptyQuiz {
                course_id: resolved.course_id.clone(),
                module_id: resolved.module_id.clone(),
            });
        }

        let mut resolved = resolved.clone();
        if let Some(limit) = config.time_limit_secs {
            resolved.quiz.time_limit_secs = limit;
        }

        let attempt = Attempt::new(&resolved);
        tracing::info!(
            course_id = %resolved.course_id,
            module_id = %resolved.module_id,
            questions = attempt.total_questions(),
            time_limit_secs = attempt.remaining_secs(),
            "exam session started"
        );

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ExamView::snapshot(&attempt));

        let task = tokio::spawn(drive(attempt, events_rx, view_tx, config.tick));

        Ok((
            SessionHandle {
                events: events_tx,
                view: view_rx,
            },
            SessionRun { task },
        ))
    }
}

/// The session loop. Owns the attempt and the ticker for its whole life.
async fn drive(
    mut attempt: Attempt,
    mut events: mpsc::UnboundedReceiver<ExamEvent>,
    view: watch::Sender<ExamView>,
    tick: Duration,
) -> Option<Completion> {
    // First tick one full period after start, so the budget is honored
    // exactly; skipped ticks are not made up in bursts.
    let mut ticker = time::interval_at(time::Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let completion = loop {
        let outcome = tokio::select! {
            // Tick arm first: expiry preempts an in-flight submission.
            biased;
            _ = ticker.tick() => attempt.apply(ExamEvent::Tick),
            event = events.recv() => match event {
                Some(event) => attempt.apply(event),
                None => break None,
            },
        };

        let _ = view.send(ExamView::snapshot(&attempt));
        if outcome.is_some() {
            break outcome;
        }
    };

    match &completion {
        Some(Completion::Submitted(review)) => {
            tracing::info!(
                score = review.summary.score,
                total = review.summary.total,
                "attempt submitted"
            );
        }
        Some(Completion::TimedOut(summary)) => {
            tracing::info!(
                score = summary.score,
                total = summary.total,
                "attempt timed out"
            );
        }
        None => tracing::debug!("attempt abandoned"),
    }

    completion
}
