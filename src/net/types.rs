//! Wire and domain types shared by the API client, state, and pages.
//!
//! DESIGN
//! ======
//! Response bodies follow the backend's snake_case field names. Request
//! bodies use camelCase because that is what the quiz and tutor endpoints
//! accept. Backend records that can violate a domain invariant (duplicate
//! attempt ids, out-of-range scores) are decoded into private record types
//! first and converted with explicit checks.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 25;
pub const DEFAULT_QUESTION_COUNT: u32 = 10;

// =============================================================================
// DASHBOARD
// =============================================================================

/// Summary statistics shown at the top of the dashboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub total_quizzes: u32,
    #[serde(deserialize_with = "percent")]
    pub average_score: u8,
    #[serde(deserialize_with = "hours")]
    pub study_hours: f64,
    pub topics_mastered: u32,
}

/// One completed quiz. Sequence order is recency order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub subject: String,
    pub score: u8,
    pub date: String,
    /// `None` when the backend does not report a question count.
    pub total_questions: Option<NonZeroU32>,
}

/// `GET progress/dashboard` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ProgressResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_attempts: Vec<AttemptRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttemptRecord {
    #[serde(default)]
    id: Option<String>,
    subject: String,
    #[serde(deserialize_with = "percent")]
    score: u8,
    date: String,
    #[serde(default)]
    total_questions: Option<u32>,
}

/// Convert backend attempt records into domain attempts.
///
/// Records without an id get their 1-based position. Ids must be unique. A
/// missing question count stays unknown; an explicit zero is rejected.
pub(crate) fn attempts_from_records(records: Vec<AttemptRecord>) -> Result<Vec<QuizAttempt>, String> {
    let mut seen = HashSet::new();
    let mut attempts = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let id = record.id.unwrap_or_else(|| (index + 1).to_string());
        if !seen.insert(id.clone()) {
            return Err(format!("duplicate attempt id '{id}'"));
        }
        let total_questions = match record.total_questions {
            Some(n) => match NonZeroU32::new(n) {
                Some(n) => Some(n),
                None => return Err(format!("attempt '{id}' has zero total_questions")),
            },
            None => None,
        };
        attempts.push(QuizAttempt {
            id,
            subject: record.subject,
            score: record.score,
            date: record.date,
            total_questions,
        });
    }
    Ok(attempts)
}

/// Accept integer or fractional percentages, rounding half away from zero.
fn percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    percent_from_f64(raw).ok_or_else(|| serde::de::Error::custom(format!("percentage out of range: {raw}")))
}

/// Study hours must be finite and non-negative.
fn hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.is_finite() && raw >= 0.0 {
        Ok(raw)
    } else {
        Err(serde::de::Error::custom(format!("study hours out of range: {raw}")))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn percent_from_f64(raw: f64) -> Option<u8> {
    let rounded = raw.round();
    if rounded.is_finite() && (0.0..=100.0).contains(&rounded) {
        Some(rounded as u8)
    } else {
        None
    }
}

// =============================================================================
// CHAPTERS
// =============================================================================

/// A study chapter from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub pages: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: u8,
}

/// `GET pdfs/` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ChapterListResponse {
    #[serde(alias = "chapters")]
    pub pdfs: Vec<Chapter>,
}

// =============================================================================
// QUIZ CONFIG
// =============================================================================

/// Question style requested from the quiz generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Mcq,
    Saq,
    Laq,
    Mixed,
}

impl QuizType {
    pub const ALL: [Self; 4] = [Self::Mcq, Self::Saq, Self::Laq, Self::Mixed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mcq => "mcq",
            Self::Saq => "saq",
            Self::Laq => "laq",
            Self::Mixed => "mixed",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Mcq => "Multiple Choice (MCQ)",
            Self::Saq => "Short Answer (SAQ)",
            Self::Laq => "Long Answer (LAQ)",
            Self::Mixed => "Mixed Questions",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcq" => Ok(Self::Mcq),
            "saq" => Ok(Self::Saq),
            "laq" => Ok(Self::Laq),
            "mixed" => Ok(Self::Mixed),
            _ => Err(()),
        }
    }
}

/// Requested question difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(()),
        }
    }
}

/// Validated quiz-generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    #[serde(rename = "questionCount")]
    pub question_count: u32,
}

impl QuizConfig {
    #[must_use]
    pub fn question_count_in_range(count: u32) -> bool {
        (MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self { quiz_type: QuizType::Mcq, difficulty: Difficulty::Medium, question_count: DEFAULT_QUESTION_COUNT }
    }
}

/// `POST quiz/generate` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest<'a> {
    pub chapter_id: &'a str,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    pub question_count: u32,
}

impl<'a> GenerateQuizRequest<'a> {
    #[must_use]
    pub fn new(chapter_id: &'a str, config: &QuizConfig) -> Self {
        Self {
            chapter_id,
            quiz_type: config.quiz_type,
            difficulty: config.difficulty,
            question_count: config.question_count,
        }
    }
}

// =============================================================================
// GENERATED QUIZ
// =============================================================================

/// A quiz returned by the generator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Time limit in seconds.
    #[serde(default, alias = "timeLimit")]
    pub time_limit: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    /// Empty for short and long answer questions.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, alias = "correctAnswer")]
    pub correct_answer: Option<usize>,
}

// =============================================================================
// TUTOR
// =============================================================================

/// `POST tutor/ask` request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorRequest<'a> {
    pub question: &'a str,
    pub chapter_id: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorAnswer {
    pub answer: String,
    #[serde(default)]
    pub citations: Vec<String>,
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
