//! Plain-text result and review rendering.

use std::fmt::Write as _;

use quizflow_core::report::{AttemptReport, ReportKind};
use quizflow_core::scoring::{QuestionReview, ScoreSummary};

const BAR_WIDTH: usize = 20;

/// Render the result view: pass/fail banner, score, and a progress bar.
pub fn render_result(summary: &ScoreSummary) -> String {
    let mut out = String::new();
    let percentage = summary.percentage();

    let _ = writeln!(out, "Quiz Result");
    let _ = writeln!(
        out,
        "You scored {} / {} ({percentage:.0}%)",
        summary.score, summary.total
    );

    let filled = if summary.total == 0 {
        0
    } else {
        (percentage / 100.0 * BAR_WIDTH as f64).round() as usize
    };
    let _ = writeln!(
        out,
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
    );

    if summary.passed() {
        let _ = writeln!(out, "Congratulations! You passed.");
    } else {
        let _ = writeln!(out, "Keep trying! You can do better.");
    }
    out
}

/// Render the review view: the result header plus a per-question breakdown.
pub fn render_review(summary: &ScoreSummary, rows: &[QuestionReview]) -> String {
    let mut out = render_result(summary);
    let _ = writeln!(out);

    for row in rows {
        let mark = if row.is_correct { "[ok]" } else { "[x]" };
        let _ = writeln!(out, "{mark} Q{}: {}", row.index + 1, row.prompt);

        for (i, option) in row.options.iter().enumerate() {
            let marker = match (Some(i) == row.chosen, i == row.correct) {
                (true, true) => "  > * ",
                (true, false) => "  >   ",
                (false, true) => "    * ",
                (false, false) => "      ",
            };
            let _ = writeln!(out, "{marker}{option}");
        }
        if row.chosen.is_none() {
            let _ = writeln!(out, "      (unanswered)");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "> your answer, * correct answer");
    out
}

/// Render a saved report: review when available, otherwise the result with
/// an explicit note.
pub fn render_report(report: &AttemptReport) -> String {
    let summary = report.summary();
    match report.review() {
        Some(rows) => render_review(&summary, &rows),
        None => {
            debug_assert_eq!(report.kind, ReportKind::TimedOut);
            let mut out = render_result(&summary);
            out.push_str("Time expired before submission; review is not available.\n");
            out
        }
    }
}
