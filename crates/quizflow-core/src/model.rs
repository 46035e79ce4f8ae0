//! Core data model types for quizflow.
//!
//! These are the fundamental types that the entire quizflow system uses
//! to represent courses, modules, quizzes, and questions.

use serde::{Deserialize, Serialize};

/// A single multiple-choice question.
///
/// Exactly one option is correct; there is no partial credit and no
/// multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the learner.
    pub prompt: String,
    /// Ordered set of answer options.
    pub options: Vec<String>,
    /// Zero-based index of the correct option.
    pub correct: usize,
}

/// A quiz attached to a course module.
///
/// Immutable for the duration of an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Display title, usually derived from the module.
    #[serde(default)]
    pub title: String,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
    /// Total point value shown on the intro screen.
    #[serde(default)]
    pub points: u32,
    /// Time budget for one attempt, in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
}

fn default_time_limit() -> u64 {
    600
}

impl Quiz {
    /// Number of questions in this quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A module within a course. Not every module carries a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier within the course.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// The module's quiz, if it has one.
    #[serde(default)]
    pub quiz: Option<Quiz>,
}

/// A course with its modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Description shown in listings.
    #[serde(default)]
    pub description: String,
    /// The course's modules, in order.
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A collection of courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Catalog {
    /// Look up a course by identifier.
    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Look up a module within a course.
    pub fn find_module(&self, course_id: &str, module_id: &str) -> Option<&Module> {
        self.find_course(course_id)?
            .modules
            .iter()
            .find(|m| m.id == module_id)
    }

    /// Absorb another catalog's courses, in order.
    pub fn merge(&mut self, other: Catalog) {
        self.courses.extend(other.courses);
    }

    /// One summary row per course, for listings.
    pub fn summaries(&self) -> Vec<CourseSummary> {
        self.courses.iter().map(CourseSummary::from).collect()
    }
}

/// Summary of a course (without the full module definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub module_count: usize,
    pub quiz_count: usize,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            module_count: course.modules.len(),
            quiz_count: course.modules.iter().filter(|m| m.quiz.is_some()).count(),
        }
    }
}

/// Everything the intro screen shows before an attempt starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizIntro {
    pub course_id: String,
    pub module_id: String,
    pub module_title: String,
    pub question_count: usize,
    pub time_limit_secs: u64,
    pub total_points: u32,
}

impl QuizIntro {
    /// The time budget rendered as a `m:ss` clock.
    pub fn clock(&self) -> String {
        format_clock(self.time_limit_secs)
    }
}

/// Render seconds as a `m:ss` countdown clock (e.g. 600 -> "10:00").
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
