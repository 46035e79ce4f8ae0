//! The `quizflow list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

pub async fn execute(catalog: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::config_for(config_path.as_ref())?;
    let resolver = super::resolver_for(catalog.as_ref(), &config)?;

    let mut courses = resolver.courses().await?;
    courses.sort_by(|a, b| a.id.cmp(&b.id));

    if courses.is_empty() {
        println!("No courses found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Course", "Title", "Modules", "Quizzes"]);
    for course in &courses {
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.title),
            Cell::new(course.module_count),
            Cell::new(course.quiz_count),
        ]);
    }

    println!("{table}");
    Ok(())
}
