//! Mock resolver for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quizflow_core::error::ResolveError;
use quizflow_core::model::{CourseSummary, Quiz};
use quizflow_core::traits::{QuizResolver, ResolvedQuiz};

/// A mock quiz resolver for testing session and CLI code without a real
/// catalog source.
///
/// Returns configured quizzes keyed by `(course_id, module_id)` and counts
/// the lookups made against it.
pub struct MockResolver {
    quizzes: HashMap<(String, String), Quiz>,
    call_count: AtomicU32,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            quizzes: HashMap::new(),
            call_count: AtomicU32::new(0),
        }
    }

    /// Register a quiz for a course/module pair.
    pub fn with_quiz(mut self, course_id: &str, module_id: &str, quiz: Quiz) -> Self {
        self.quizzes
            .insert((course_id.to_string(), module_id.to_string()), quiz);
        self
    }

    /// Number of resolve calls made against this mock.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizResolver for MockResolver {
    async fn resolve(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<ResolvedQuiz, ResolveError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        let key = (course_id.to_string(), module_id.to_string());
        match self.quizzes.get(&key) {
            Some(quiz) => Ok(ResolvedQuiz {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
                module_title: module_id.to_string(),
                quiz: quiz.clone(),
            }),
            None => Err(ResolveError::ModuleNotFound {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
            }),
        }
    }

    async fn courses(&self) -> Result<Vec<CourseSummary>, ResolveError> {
        let mut by_course: HashMap<&str, usize> = HashMap::new();
        for (course_id, _) in self.quizzes.keys() {
            *by_course.entry(course_id.as_str()).or_default() += 1;
        }

        Ok(by_course
            .into_iter()
            .map(|(id, quiz_count)| CourseSummary {
                id: id.to_string(),
                title: id.to_string(),
                module_count: quiz_count,
                quiz_count,
            })
            .collect())
    }
}
