//! HTML report generator.
//!
//! Produces a self-contained HTML page for one attempt, with all CSS
//! inlined.

use anyhow::Result;
use std::path::Path;

use quizflow_core::report::{AttemptReport, ReportKind};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from an attempt report.
pub fn generate_html(report: &AttemptReport) -> String {
    let summary = report.summary();
    let percentage = summary.percentage();
    let verdict = if summary.passed() { "Passed" } else { "Failed" };
    let verdict_class = if summary.passed() { "pass" } else { "fail" };

    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizflow — {}</title>\n",
        html_escape(&report.module_title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!(
        "<h1>{} — Quiz {}</h1>\n",
        html_escape(&report.module_title),
        match report.kind {
            ReportKind::Submitted => "Review",
            ReportKind::TimedOut => "Result",
        }
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Course: <strong>{}</strong> | Module: <strong>{}</strong> | {}</p>\n",
        html_escape(&report.course_id),
        html_escape(&report.module_id),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score summary
    html.push_str("<section class=\"score\">\n");
    html.push_str(&format!(
        "<p class=\"verdict {verdict_class}\">{verdict}</p>\n<p>You scored <strong>{} / {}</strong> ({percentage:.0}%)</p>\n",
        summary.score, summary.total
    ));
    html.push_str(&format!(
        "<div class=\"bar\"><div class=\"fill {verdict_class}\" style=\"width: {percentage:.0}%\"></div></div>\n"
    ));
    html.push_str("</section>\n");

    // Per-question review, if available
    match report.review() {
        Some(rows) => {
            html.push_str("<section class=\"review\">\n");
            html.push_str("<h2>Questions</h2>\n");
            for row in &rows {
                let row_class = if row.is_correct { "pass" } else { "fail" };
                html.push_str(&format!(
                    "<div class=\"question {row_class}\">\n<h3>Q{}: {}</h3>\n<ul>\n",
                    row.index + 1,
                    html_escape(&row.prompt)
                ));
                for (i, option) in row.options.iter().enumerate() {
                    let mut classes = Vec::new();
                    if i == row.correct {
                        classes.push("correct");
                    }
                    if Some(i) == row.chosen {
                        classes.push("chosen");
                    }
                    html.push_str(&format!(
                        "<li class=\"{}\">{}</li>\n",
                        classes.join(" "),
                        html_escape(option)
                    ));
                }
                html.push_str("</ul>\n");
                if row.chosen.is_none() {
                    html.push_str("<p class=\"unanswered\">Unanswered</p>\n");
                }
                html.push_str("</div>\n");
            }
            html.push_str("</section>\n");
        }
        None => {
            html.push_str(
                "<section class=\"review\">\n<p class=\"unanswered\">\
                 Time expired before submission; review is not available.</p>\n</section>\n",
            );
        }
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AttemptReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --pass-strong: #22c55e; --fail-strong: #ef4444; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 48rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.verdict { font-size: 1.5rem; font-weight: bold; padding: 0.25rem 1rem; display: inline-block; border-radius: 8px; }
.verdict.pass { background: var(--pass); }
.verdict.fail { background: var(--fail); }
.bar { width: 100%; height: 1rem; background: var(--border); border-radius: 8px; overflow: hidden; }
.fill.pass { background: var(--pass-strong); height: 100%; }
.fill.fail { background: var(--fail-strong); height: 100%; }
.question { border: 2px solid var(--border); border-radius: 8px; padding: 0.5rem 1rem; margin: 1rem 0; }
.question.pass { border-color: var(--pass-strong); background: var(--pass); }
.question.fail { border-color: var(--fail-strong); background: var(--fail); }
.question ul { list-style: none; padding-left: 0.5rem; }
.question li.correct::after { content: " ✓"; }
.question li.chosen { font-weight: bold; }
.unanswered { color: #6b7280; font-style: italic; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
