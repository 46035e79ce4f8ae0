//! In-memory catalog resolver.

use async_trait::async_trait;

use quizflow_core::error::ResolveError;
use quizflow_core::model::{Catalog, CourseSummary};
use quizflow_core::traits::{QuizResolver, ResolvedQuiz};

/// A resolver over a catalog held entirely in memory.
///
/// The shared lookup for every catalog that ends up as a [`Catalog`] value;
/// the file-backed resolver delegates here after loading.
#[derive(Debug)]
pub struct StaticCatalog {
    catalog: Catalog,
}

impl StaticCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Synchronous lookup shared by the async trait impl.
    pub fn lookup(&self, course_id: &str, module_id: &str) -> Result<ResolvedQuiz, ResolveError> {
        let course =
            self.catalog
                .find_course(course_id)
                .ok_or_else(|| ResolveError::CourseNotFound {
                    course_id: course_id.to_string(),
                })?;

        let module = course
            .modules
            .iter()
            .find(|m| m.id == module_id)
            .ok_or_else(|| ResolveError::ModuleNotFound {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
            })?;

        let quiz = module.quiz.clone().ok_or_else(|| ResolveError::QuizMissing {
            course_id: course_id.to_string(),
            module_id: module_id.to_string(),
        })?;

        Ok(ResolvedQuiz {
            course_id: course.id.clone(),
            module_id: module.id.clone(),
            module_title: module.title.clone(),
            quiz,
        })
    }
}

#[async_trait]
impl QuizResolver for StaticCatalog {
    async fn resolve(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<ResolvedQuiz, ResolveError> {
        self.lookup(course_id, module_id)
    }

    async fn courses(&self) -> Result<Vec<CourseSummary>, ResolveError> {
        Ok(self.catalog.summaries())
    }
}
