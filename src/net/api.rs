//! Study collaborator contract and its HTTP implementation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views and state never talk to `reqwest` directly. They call through the
//! [`StudyApi`] trait so tests can substitute a recording fake, and the
//! shell wires in [`HttpStudyApi`] at startup.

use async_trait::async_trait;
use tracing::{debug, info};

use super::http::{ApiError, HttpClient};
use super::types::{
    Chapter, ChapterListResponse, DashboardStats, GenerateQuizRequest, HealthStatus, MAX_QUESTION_COUNT,
    MIN_QUESTION_COUNT, ProgressResponse, Quiz, QuizAttempt, QuizConfig, TutorAnswer, TutorRequest,
    attempts_from_records,
};
use crate::config::ApiConfig;

pub const HEALTH_PATH: &str = "health";
pub const CHAPTERS_PATH: &str = "pdfs/";
pub const PROGRESS_PATH: &str = "progress/dashboard";
pub const GENERATE_QUIZ_PATH: &str = "quiz/generate";
pub const TUTOR_PATH: &str = "tutor/ask";

/// Operations the study companion needs from its backend.
#[async_trait]
pub trait StudyApi: Send + Sync {
    /// Generate a quiz for a chapter.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn generate_quiz(&self, chapter_id: &str, config: &QuizConfig) -> Result<Quiz, ApiError>;

    /// Recent quiz attempts, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn list_attempts(&self) -> Result<Vec<QuizAttempt>, ApiError>;

    /// Dashboard summary statistics.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn get_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Ask the tutor a question in the context of a chapter.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn ask_tutor(&self, question: &str, chapter_id: &str) -> Result<TutorAnswer, ApiError>;

    /// The chapter catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn list_chapters(&self) -> Result<Vec<Chapter>, ApiError>;

    /// Backend liveness.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the reply is malformed.
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// Stats and attempts together.
    ///
    /// # Errors
    ///
    /// Returns the first error from either underlying call.
    async fn load_dashboard(&self) -> Result<(DashboardStats, Vec<QuizAttempt>), ApiError> {
        let stats = self.get_stats().await?;
        let attempts = self.list_attempts().await?;
        Ok((stats, attempts))
    }
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// [`StudyApi`] backed by the StudyMate REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpStudyApi {
    client: HttpClient,
}

impl HttpStudyApi {
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the HTTP client and wrap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpClient::new(config)?))
    }

    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    async fn progress(&self) -> Result<(DashboardStats, Vec<QuizAttempt>), ApiError> {
        let resp: ProgressResponse = self.client.get(PROGRESS_PATH).await?;
        let attempts = attempts_from_records(resp.recent_attempts).map_err(|message| ApiError::Decode {
            url: PROGRESS_PATH.to_owned(),
            message,
        })?;
        Ok((resp.stats, attempts))
    }
}

#[async_trait]
impl StudyApi for HttpStudyApi {
    async fn generate_quiz(&self, chapter_id: &str, config: &QuizConfig) -> Result<Quiz, ApiError> {
        if !QuizConfig::question_count_in_range(config.question_count) {
            return Err(ApiError::InvalidRequest(format!(
                "question count {} outside {MIN_QUESTION_COUNT}..={MAX_QUESTION_COUNT}",
                config.question_count
            )));
        }
        let body = GenerateQuizRequest::new(chapter_id, config);
        let quiz: Quiz = self.client.post(GENERATE_QUIZ_PATH, &body).await?;
        info!(chapter_id, quiz_id = %quiz.id, questions = quiz.questions.len(), "quiz generated");
        Ok(quiz)
    }

    async fn list_attempts(&self) -> Result<Vec<QuizAttempt>, ApiError> {
        let (_, attempts) = self.progress().await?;
        Ok(attempts)
    }

    async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let (stats, _) = self.progress().await?;
        Ok(stats)
    }

    async fn ask_tutor(&self, question: &str, chapter_id: &str) -> Result<TutorAnswer, ApiError> {
        let body = TutorRequest { question, chapter_id };
        self.client.post(TUTOR_PATH, &body).await
    }

    async fn list_chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        let resp: ChapterListResponse = self.client.get(CHAPTERS_PATH).await?;
        debug!(count = resp.pdfs.len(), "chapters listed");
        Ok(resp.pdfs)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.client.get(HEALTH_PATH).await
    }

    async fn load_dashboard(&self) -> Result<(DashboardStats, Vec<QuizAttempt>), ApiError> {
        self.progress().await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
