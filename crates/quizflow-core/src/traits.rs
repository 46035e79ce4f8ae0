//! The quiz resolver trait.
//!
//! The attempt machinery never touches a concrete data source: quiz content
//! arrives through [`QuizResolver`], so the in-memory catalog, the file
//! catalog, and the network-backed catalog in `quizflow-catalog` are
//! interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::model::{CourseSummary, Quiz, QuizIntro};

/// Read-only lookup from a course/module identifier pair to quiz content.
#[async_trait]
pub trait QuizResolver: Send + Sync {
    /// Resolve the quiz for a course module, or an explicit not-found error.
    async fn resolve(&self, course_id: &str, module_id: &str)
        -> Result<ResolvedQuiz, ResolveError>;

    /// List the courses this resolver knows about.
    async fn courses(&self) -> Result<Vec<CourseSummary>, ResolveError>;
}

/// A quiz bundled with the identifiers it was resolved under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedQuiz {
    pub course_id: String,
    pub module_id: String,
    pub module_title: String,
    pub quiz: Quiz,
}

impl ResolvedQuiz {
    /// The metadata shown on the intro screen.
    pub fn intro(&self) -> QuizIntro {
        QuizIntro {
            course_id: self.course_id.clone(),
            module_id: self.module_id.clone(),
            module_title: self.module_title.clone(),
            question_count: self.quiz.questions.len(),
            time_limit_secs: self.quiz.time_limit_secs,
            total_points: self.quiz.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    #[test]
    fn intro_reflects_quiz_metadata() {
        let resolved = ResolvedQuiz {
            course_id: "rust-101".into(),
            module_id: "ownership".into(),
            module_title: "Ownership".into(),
            quiz: Quiz {
                title: "Ownership".into(),
                questions: vec![Question {
                    prompt: "q".into(),
                    options: vec!["a".into(), "b".into()],
                    correct: 0,
                }],
                points: 10,
                time_limit_secs: 600,
            },
        };

        let intro = resolved.intro();
        assert_eq!(intro.question_count, 1);
        assert_eq!(intro.total_points, 10);
        assert_eq!(intro.clock(), "10:00");
    }
}
