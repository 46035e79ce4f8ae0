//! Network-backed catalog resolver.
//!
//! Talks to an LMS backend that serves quiz content over HTTP. Drop-in
//! replacement for the file-backed catalog: same trait, same error
//! taxonomy, so the exam session is untouched by the swap.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use quizflow_core::error::ResolveError;
use quizflow_core::model::{CourseSummary, Quiz};
use quizflow_core::traits::{QuizResolver, ResolvedQuiz};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Resolver backed by an HTTP catalog service.
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
}

/// Wire shape of the quiz endpoint response.
#[derive(Deserialize)]
struct QuizPayload {
    module_title: String,
    quiz: Quiz,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ResolveError {
        if e.is_timeout() {
            ResolveError::Unavailable(format!(
                "catalog service timed out after {DEFAULT_TIMEOUT_SECS}s"
            ))
        } else if e.is_connect() {
            ResolveError::Unavailable(format!("catalog service not reachable at {}", self.base_url))
        } else {
            ResolveError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl QuizResolver for HttpCatalog {
    #[instrument(skip(self))]
    async fn resolve(
        &self,
        course_id: &str,
        module_id: &str,
    ) -> Result<ResolvedQuiz, ResolveError> {
        let url = format!(
            "{}/courses/{course_id}/modules/{module_id}/quiz",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(ResolveError::ModuleNotFound {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
            });
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::Unavailable(format!(
                "catalog service returned HTTP {status}: {body}"
            )));
        }

        let payload: QuizPayload = response
            .json()
            .await
            .map_err(|e| ResolveError::Invalid(format!("failed to parse quiz response: {e}")))?;

        Ok(ResolvedQuiz {
            course_id: course_id.to_string(),
            module_id: module_id.to_string(),
            module_title: payload.module_title,
            quiz: payload.quiz,
        })
    }

    async fn courses(&self) -> Result<Vec<CourseSummary>, ResolveError> {
        let response = self
            .client
            .get(format!("{}/courses", self.base_url))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ResolveError::Unavailable(format!(
                "catalog service returned HTTP {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ResolveError::Invalid(format!("failed to parse course list: {e}")))
    }
}
