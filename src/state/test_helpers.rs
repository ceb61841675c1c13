//! Recording [`StudyApi`] fake shared by the state and shell tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::fixtures;
use crate::net::api::StudyApi;
use crate::net::http::ApiError;
use crate::net::types::{
    Chapter, DashboardStats, HealthStatus, Question, Quiz, QuizAttempt, QuizConfig, TutorAnswer,
};

/// One observed collaborator call with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    GenerateQuiz { chapter_id: String, config: QuizConfig },
    ListAttempts,
    GetStats,
    AskTutor { question: String, chapter_id: String },
    ListChapters,
    Health,
}

/// Serves fixture data and records every call. Set `fail` to make every
/// call return a 503 status error.
pub struct FakeStudyApi {
    calls: Mutex<Vec<Call>>,
    pub chapters: Vec<Chapter>,
    pub fail: bool,
}

impl Default for FakeStudyApi {
    fn default() -> Self {
        Self { calls: Mutex::new(Vec::new()), chapters: fixtures::sample_chapters(), fail: false }
    }
}

impl FakeStudyApi {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn with_chapters(chapters: Vec<Chapter>) -> Self {
        Self { chapters, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ApiError::Status {
                method: "GET".into(),
                url: "http://fake.invalid/".into(),
                status: 503,
                body: "maintenance".into(),
            });
        }
        Ok(())
    }
}

pub fn quiz_with(count: u32) -> Quiz {
    Quiz {
        id: "quiz_fake".into(),
        questions: (1..=count)
            .map(|n| Question {
                id: format!("q{n}"),
                prompt: format!("Question {n}"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: Some(0),
            })
            .collect(),
        time_limit: Some(count * 60),
    }
}

#[async_trait]
impl StudyApi for FakeStudyApi {
    async fn generate_quiz(&self, chapter_id: &str, config: &QuizConfig) -> Result<Quiz, ApiError> {
        self.record(Call::GenerateQuiz { chapter_id: chapter_id.to_owned(), config: *config })?;
        Ok(quiz_with(config.question_count))
    }

    async fn list_attempts(&self) -> Result<Vec<QuizAttempt>, ApiError> {
        self.record(Call::ListAttempts)?;
        Ok(fixtures::sample_attempts())
    }

    async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        self.record(Call::GetStats)?;
        Ok(fixtures::sample_stats())
    }

    async fn ask_tutor(&self, question: &str, chapter_id: &str) -> Result<TutorAnswer, ApiError> {
        self.record(Call::AskTutor { question: question.to_owned(), chapter_id: chapter_id.to_owned() })?;
        Ok(TutorAnswer { answer: format!("About {chapter_id}: {question}"), citations: vec!["p. 3".into()] })
    }

    async fn list_chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        self.record(Call::ListChapters)?;
        Ok(self.chapters.clone())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(Call::Health)?;
        Ok(HealthStatus { status: "healthy".into(), timestamp: None })
    }
}
