//! quizflow-report — Rendering of attempt reports.
//!
//! Turns a completed attempt into something a person reads: a plain-text
//! result/review for the terminal, or a self-contained HTML page.

pub mod html;
pub mod text;

pub use html::{generate_html, write_html_report};
pub use text::{render_report, render_result, render_review};
