//! Catalog file parser.
//!
//! Loads course catalogs from TOML or JSON files and directories, and
//! validates them for common authoring mistakes.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Catalog, Course, Module, Question, Quiz};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    catalog: TomlCatalogHeader,
    #[serde(default)]
    courses: Vec<TomlCourse>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlCatalogHeader {
    #[serde(default)]
    #[allow(dead_code)]
    name: String,
    #[serde(default)]
    #[allow(dead_code)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    modules: Vec<TomlModule>,
}

#[derive(Debug, Deserialize)]
struct TomlModule {
    id: String,
    title: String,
    #[serde(default)]
    quiz: Option<TomlQuiz>,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    #[serde(default)]
    title: String,
    #[serde(default)]
    points: u32,
    #[serde(default = "default_time_limit")]
    time_limit_secs: u64,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

fn default_time_limit() -> u64 {
    600
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct: usize,
}

/// Parse a single catalog file, dispatching on its extension.
///
/// `.toml` files use the `[catalog]` / `[[courses]]` layout; `.json` files
/// deserialize directly into [`Catalog`].
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    } else {
        parse_catalog_str(&content, path)
    }
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let courses = parsed
        .courses
        .into_iter()
        .map(|c| Course {
            id: c.id,
            title: c.title,
            description: c.description,
            modules: c
                .modules
                .into_iter()
                .map(|m| {
                    let title = m.title;
                    Module {
                        id: m.id,
                        quiz: m.quiz.map(|q| Quiz {
                            title: if q.title.is_empty() {
                                title.clone()
                            } else {
                                q.title
                            },
                            points: q.points,
                            time_limit_secs: q.time_limit_secs,
                            questions: q
                                .questions
                                .into_iter()
                                .map(|question| Question {
                                    prompt: question.prompt,
                                    options: question.options,
                                    correct: question.correct,
                                })
                                .collect(),
                        }),
                        title,
                    }
                })
                .collect(),
        })
        .collect();

    Ok(Catalog { courses })
}

/// Recursively load all `.toml` and `.json` catalog files from a directory
/// into one merged catalog.
pub fn load_catalog_directory(dir: &Path) -> Result<Catalog> {
    let mut catalog = Catalog::default();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalog.merge(load_catalog_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json")
        {
            match parse_catalog(&path) {
                Ok(parsed) => catalog.merge(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(catalog)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The course ID (if applicable).
    pub course_id: Option<String>,
    /// The module ID (if applicable).
    pub module_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let course_warn = |course: &Course, message: String| ValidationWarning {
        course_id: Some(course.id.clone()),
        module_id: None,
        message,
    };

    // Check for duplicate course IDs
    let mut seen_courses = std::collections::HashSet::new();
    for course in &catalog.courses {
        if !seen_courses.insert(&course.id) {
            warnings.push(ValidationWarning {
                course_id: Some(course.id.clone()),
                module_id: None,
                message: format!("duplicate course ID: {}", course.id),
            });
        }
    }

    for course in &catalog.courses {
        if course.modules.is_empty() {
            warnings.push(course_warn(course, "course has no modules".into()));
        }

        // Check for duplicate module IDs within the course
        let mut seen_modules = std::collections::HashSet::new();
        for module in &course.modules {
            if !seen_modules.insert(&module.id) {
                warnings.push(ValidationWarning {
                    course_id: Some(course.id.clone()),
                    module_id: Some(module.id.clone()),
                    message: format!("duplicate module ID: {}", module.id),
                });
            }
        }

        for module in &course.modules {
            let Some(quiz) = &module.quiz else { continue };
            let module_warn = |message: String| ValidationWarning {
                course_id: Some(course.id.clone()),
                module_id: Some(module.id.clone()),
                message,
            };

            if quiz.questions.is_empty() {
                warnings.push(module_warn("quiz has no questions".into()));
            }
            if quiz.points == 0 && !quiz.questions.is_empty() {
                warnings.push(module_warn("quiz has a zero point total".into()));
            }
            if quiz.time_limit_secs == 0 {
                warnings.push(module_warn("quiz time limit is zero".into()));
            }

            for (i, question) in quiz.questions.iter().enumerate() {
                if question.prompt.trim().is_empty() {
                    warnings.push(module_warn(format!("question {i} has an empty prompt")));
                }
                if question.options.len() < 2 {
                    warnings.push(module_warn(format!(
                        "question {i} has fewer than two options"
                    )));
                }
                if question.correct >= question.options.len() {
                    warnings.push(module_warn(format!(
                        "question {i} marks option {} correct but has only {} options",
                        question.correct,
                        question.options.len()
                    )));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[catalog]
name = "Demo Catalog"

[[courses]]
id = "rust-101"
title = "Rust Fundamentals"
description = "An introduction to Rust"

[[courses.modules]]
id = "ownership"
title = "Ownership"

[courses.modules.quiz]
points = 30
time_limit_secs = 600

[[courses.modules.quiz.questions]]
prompt = "Which of these moves a value?"
options = ["Assignment", "Borrowing", "Shadowing"]
correct = 0

[[courses.modules.quiz.questions]]
prompt = "How many mutable borrows can coexist?"
options = ["Zero", "One", "Unlimited"]
correct = 1
"#;

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(catalog.courses.len(), 1);
        let quiz = catalog
            .find_module("rust-101", "ownership")
            .and_then(|m| m.quiz.as_ref())
            .unwrap();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.points, 30);
        assert_eq!(quiz.title, "Ownership");
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[[courses]]
id = "minimal"
title = "Minimal"

[[courses.modules]]
id = "m1"
title = "Module 1"

[courses.modules.quiz]
[[courses.modules.quiz.questions]]
prompt = "q"
options = ["a", "b"]
correct = 0
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let quiz = catalog
            .find_module("minimal", "m1")
            .and_then(|m| m.quiz.as_ref())
            .unwrap();
        assert_eq!(quiz.time_limit_secs, 600);
        assert_eq!(quiz.points, 0);
    }

    #[test]
    fn module_without_quiz_parses() {
        let toml = r#"
[[courses]]
id = "c"
title = "C"

[[courses.modules]]
id = "reading"
title = "Reading Only"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(catalog.find_module("c", "reading").unwrap().quiz.is_none());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_catalog_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_json_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "courses": [{
                    "id": "rust-101",
                    "title": "Rust Fundamentals",
                    "modules": [{
                        "id": "ownership",
                        "title": "Ownership",
                        "quiz": {
                            "points": 10,
                            "questions": [
                                {"prompt": "q", "options": ["a", "b"], "correct": 1}
                            ]
                        }
                    }]
                }]
            }"#,
        )
        .unwrap();

        let catalog = parse_catalog(&path).unwrap();
        let quiz = catalog
            .find_module("rust-101", "ownership")
            .and_then(|m| m.quiz.as_ref())
            .unwrap();
        assert_eq!(quiz.questions[0].correct, 1);
        assert_eq!(quiz.time_limit_secs, 600);
    }

    #[test]
    fn validate_clean_catalog() {
        let catalog = parse_catalog_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn validate_out_of_range_correct_index() {
        let toml = r#"
[[courses]]
id = "c"
title = "C"

[[courses.modules]]
id = "m"
title = "M"

[courses.modules.quiz]
points = 5
[[courses.modules.quiz.questions]]
prompt = "q"
options = ["a", "b"]
correct = 5
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("marks option 5 correct")));
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[[courses]]
id = "same"
title = "First"

[[courses.modules]]
id = "m"
title = "M"

[[courses]]
id = "same"
title = "Second"
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_empty_quiz_and_prompt() {
        let toml = r#"
[[courses]]
id = "c"
title = "C"

[[courses.modules]]
id = "empty"
title = "Empty"
[courses.modules.quiz]

[[courses.modules]]
id = "blank"
title = "Blank"
[courses.modules.quiz]
points = 1
[[courses.modules.quiz.questions]]
prompt = "  "
options = ["a"]
correct = 0
"#;
        let catalog = parse_catalog_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_catalog(&catalog);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
        assert!(warnings.iter().any(|w| w.message.contains("empty prompt")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("fewer than two options")));
    }

    #[test]
    fn load_directory_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(
            dir.path().join("b.toml"),
            r#"
[[courses]]
id = "go-101"
title = "Go Basics"
"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalog.courses.len(), 2);
    }

    #[test]
    fn load_directory_skips_unparseable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "not [valid").unwrap();

        let catalog = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalog.courses.len(), 1);
    }
}
