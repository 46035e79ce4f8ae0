//! Resolver error types.
//!
//! Defined in `quizflow-core` so callers can classify lookup failures
//! without string matching: a missing course, module, or quiz is an
//! explicit outcome, never an undefined render.

use thiserror::Error;

/// Errors that can occur when resolving quiz content.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The course identifier is unknown.
    #[error("course not found: {course_id}")]
    CourseNotFound { course_id: String },

    /// The course exists but has no such module.
    #[error("module not found: {course_id}/{module_id}")]
    ModuleNotFound {
        course_id: String,
        module_id: String,
    },

    /// The module exists but carries no quiz.
    #[error("no quiz for module: {course_id}/{module_id}")]
    QuizMissing {
        course_id: String,
        module_id: String,
    },

    /// The catalog source could not be reached or read.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog source returned data that does not parse or validate.
    #[error("invalid catalog data: {0}")]
    Invalid(String),
}

impl ResolveError {
    /// Returns `true` when the quiz definitively does not exist, as opposed
    /// to a transient source failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ResolveError::CourseNotFound { .. }
                | ResolveError::ModuleNotFound { .. }
                | ResolveError::QuizMissing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let missing = ResolveError::ModuleNotFound {
            course_id: "c".into(),
            module_id: "m".into(),
        };
        assert!(missing.is_not_found());
        assert!(!ResolveError::Unavailable("io".into()).is_not_found());
    }

    #[test]
    fn display_includes_identifiers() {
        let err = ResolveError::QuizMissing {
            course_id: "rust-101".into(),
            module_id: "intro".into(),
        };
        assert_eq!(err.to_string(), "no quiz for module: rust-101/intro");
    }
}
