//! File-backed catalog resolver.

use std::path::Path;

use async_trait::async_trait;

use quizflow_core::error::ResolveError;
use quizflow_core::model::CourseSummary;
use quizflow_core::parser;
use quizflow_core::traits::{QuizResolver, ResolvedQuiz};

use crate::static_catalog::StaticCatalog;

/// A resolver over catalog files on disk.
///
/// Accepts a single `.toml`/`.json` file or a directory of them; the
/// contents are loaded once at construction and served from memory.
#[derive(Debug)]
pub struct FileCatalog {
    inner: StaticCatalog,
}

impl FileCatalog {
    /// Load a catalog file or directory.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let catalog = if path.is_dir() {
            parser::load_catalog_directory(path)
        } else {
            parser::parse_catalog(path)
        }
        .map_err(|e| ResolveError::Unavailable(format!("{e:#}")))?;

        tracing::debug!(
            path = %path.display(),
            courses = catalog.courses.len(),
            "loaded catalog"
        );
        Ok(Self {
            inner: StaticCatalog::new(catalog),
        })
    }
}

#[async_trait]
impl QuizResolver for FileCatalog {
    async fn resolve(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<ResolvedQuiz, ResolveError> {
        self.inner.lookup(course_id, module_id)
    }

    async fn courses(&self) -> Result<Vec<CourseSummary>, ResolveError> {
        self.inner.courses().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_TOML: &str = r#"
[[courses]]
id = "rust-101"
title = "Rust Fundamentals"

[[courses.modules]]
id = "ownership"
title = "Ownership"

[courses.modules.quiz]
points = 10
[[courses.modules.quiz.questions]]
prompt = "q"
options = ["a", "b"]
correct = 0
"#;

    #[tokio::test]
    async fn loads_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CATALOG_TOML).unwrap();

        let resolver = FileCatalog::load(&path).unwrap();
        let resolved = resolver.resolve("rust-101", "ownership").await.unwrap();
        assert_eq!(resolved.course_id, "rust-101");
    }

    #[tokio::test]
    async fn loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), CATALOG_TOML).unwrap();

        let resolver = FileCatalog::load(dir.path()).unwrap();
        assert_eq!(resolver.courses().await.unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = FileCatalog::load(Path::new("no/such/catalog.toml")).unwrap_err();
        assert!(matches!(err, ResolveError::Unavailable(_)));
        assert!(!err.is_not_found());
    }
}
