//! The `quizflow validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizflow_core::parser;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let catalog = if catalog_path.is_dir() {
        parser::load_catalog_directory(&catalog_path)?
    } else {
        parser::parse_catalog(&catalog_path)?
    };

    let quiz_count: usize = catalog
        .courses
        .iter()
        .flat_map(|c| &c.modules)
        .filter(|m| m.quiz.is_some())
        .count();
    println!(
        "Catalog: {} course(s), {} quiz(zes)",
        catalog.courses.len(),
        quiz_count
    );

    let warnings = parser::validate_catalog(&catalog);
    for w in &warnings {
        let prefix = match (&w.course_id, &w.module_id) {
            (Some(course), Some(module)) => format!("  [{course}/{module}]"),
            (Some(course), None) => format!("  [{course}]"),
            _ => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All catalogs valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
