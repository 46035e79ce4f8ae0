//! The `quizflow review` command.

use std::path::PathBuf;

use anyhow::Result;

use quizflow_core::report::AttemptReport;
use quizflow_report::{render_report, write_html_report};

pub fn execute(attempt_path: PathBuf, html: Option<PathBuf>) -> Result<()> {
    let report = AttemptReport::load_json(&attempt_path)?;

    println!(
        "{} — {}/{} ({})",
        report.module_title,
        report.course_id,
        report.module_id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", render_report(&report));

    if let Some(html_path) = html {
        write_html_report(&report, &html_path)?;
        eprintln!("HTML review: {}", html_path.display());
    }

    Ok(())
}
