//! Study view state: chapter catalog, selection, panel mode, quiz form and
//! tutor transcript.
//!
//! DESIGN
//! ======
//! The selected chapter id is private and only ever assigned from catalog
//! ids, so it always references an existing chapter. Replacing the catalog
//! re-anchors the selection to the first entry when the old one is gone.
//!
//! ERROR HANDLING
//! ==============
//! Actions return [`StudyError`]. Validation runs before any collaborator
//! call; a failed call leaves the transcript and last quiz untouched. The
//! busy ticket is always finished, whatever the outcome.

use std::fmt;

use tracing::{debug, info, warn};

use super::busy::BusyIndicator;
use super::quiz_form::{QuizForm, ValidationError};
use crate::error::ErrorCode;
use crate::fixtures;
use crate::net::api::StudyApi;
use crate::net::http::ApiError;
use crate::net::types::{Chapter, Quiz, QuizConfig};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("chapter catalog is empty")]
    Empty,
    #[error("duplicate chapter id '{id}'")]
    DuplicateId { id: String },
    #[error("chapter '{id}' has no pages")]
    ZeroPages { id: String },
    #[error("chapter '{id}' progress {progress} exceeds 100")]
    ProgressOutOfRange { id: String, progress: u8 },
}

impl ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_CATALOG_EMPTY",
            Self::DuplicateId { .. } => "E_CATALOG_DUPLICATE_ID",
            Self::ZeroPages { .. } => "E_CATALOG_ZERO_PAGES",
            Self::ProgressOutOfRange { .. } => "E_CATALOG_PROGRESS",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("unknown chapter '{id}'")]
    UnknownChapter { id: String },
}

impl ErrorCode for StudyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::UnknownChapter { .. } => "E_STUDY_UNKNOWN_CHAPTER",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Non-empty list of chapters with unique ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterCatalog {
    chapters: Vec<Chapter>,
}

impl ChapterCatalog {
    /// # Errors
    ///
    /// Returns an error if the list is empty, repeats an id, or holds a
    /// chapter with zero pages or progress above 100.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, CatalogError> {
        check(&chapters)?;
        Ok(Self { chapters })
    }

    /// Wrap data known to be valid at compile time.
    pub(crate) fn from_static(chapters: Vec<Chapter>) -> Self {
        debug_assert!(check(&chapters).is_ok());
        Self { chapters }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn first(&self) -> &Chapter {
        &self.chapters[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chapter> {
        self.chapters.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Never true for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChapterCatalog {
    type Item = &'a Chapter;
    type IntoIter = std::slice::Iter<'a, Chapter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check(chapters: &[Chapter]) -> Result<(), CatalogError> {
    if chapters.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut seen = std::collections::HashSet::new();
    for chapter in chapters {
        if !seen.insert(chapter.id.as_str()) {
            return Err(CatalogError::DuplicateId { id: chapter.id.clone() });
        }
        if chapter.pages == 0 {
            return Err(CatalogError::ZeroPages { id: chapter.id.clone() });
        }
        if chapter.progress > 100 {
            return Err(CatalogError::ProgressOutOfRange { id: chapter.id.clone(), progress: chapter.progress });
        }
    }
    Ok(())
}

// =============================================================================
// PANEL / TRANSCRIPT
// =============================================================================

/// Right-hand panel of the study view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelMode {
    #[default]
    Quiz,
    Chat,
}

impl PanelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for PanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PanelMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(Self::Quiz),
            "chat" => Ok(Self::Chat),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    Student,
    Tutor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub citations: Vec<String>,
}

/// A quiz together with the request that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub chapter_id: String,
    pub config: QuizConfig,
    pub quiz: Quiz,
}

impl GeneratedQuiz {
    /// e.g. `Generated 17 MCQ questions at hard difficulty!`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Generated {} {} questions at {} difficulty!",
            self.config.question_count,
            self.config.quiz_type.as_str().to_ascii_uppercase(),
            self.config.difficulty.as_str()
        )
    }
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct StudyState {
    catalog: ChapterCatalog,
    selected_chapter_id: String,
    pub panel_mode: PanelMode,
    pub quiz_form: QuizForm,
    chat: Vec<ChatMessage>,
    last_quiz: Option<GeneratedQuiz>,
}

impl Default for StudyState {
    fn default() -> Self {
        Self::new(fixtures::sample_catalog())
    }
}

impl StudyState {
    #[must_use]
    pub fn new(catalog: ChapterCatalog) -> Self {
        let selected_chapter_id = catalog.first().id.clone();
        Self {
            catalog,
            selected_chapter_id,
            panel_mode: PanelMode::default(),
            quiz_form: QuizForm::default(),
            chat: Vec::new(),
            last_quiz: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &ChapterCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn selected_chapter_id(&self) -> &str {
        &self.selected_chapter_id
    }

    #[must_use]
    pub fn selected_chapter(&self) -> &Chapter {
        self.catalog.get(&self.selected_chapter_id).unwrap_or_else(|| self.catalog.first())
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.chat
    }

    #[must_use]
    pub fn last_quiz(&self) -> Option<&GeneratedQuiz> {
        self.last_quiz.as_ref()
    }

    /// Select a chapter by id. Touches nothing but the selection.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::UnknownChapter`] if the id is not in the catalog.
    pub fn select_chapter(&mut self, id: &str) -> Result<(), StudyError> {
        if !self.catalog.contains(id) {
            return Err(StudyError::UnknownChapter { id: id.to_owned() });
        }
        id.clone_into(&mut self.selected_chapter_id);
        debug!(chapter_id = id, "chapter selected");
        Ok(())
    }

    pub fn set_panel_mode(&mut self, mode: PanelMode) {
        self.panel_mode = mode;
    }

    /// Swap in a new catalog, keeping the selection when it still exists.
    ///
    /// # Errors
    ///
    /// Returns an error and leaves state unchanged if the catalog is invalid.
    pub fn replace_catalog(&mut self, chapters: Vec<Chapter>) -> Result<(), CatalogError> {
        let catalog = ChapterCatalog::new(chapters)?;
        if !catalog.contains(&self.selected_chapter_id) {
            let first = catalog.first().id.clone();
            warn!(dropped = %self.selected_chapter_id, selected = %first, "selected chapter left catalog");
            self.selected_chapter_id = first;
        }
        self.catalog = catalog;
        Ok(())
    }

    /// Fetch the catalog from the backend and swap it in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply breaks a catalog invariant.
    pub async fn refresh_catalog(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let chapters = api.list_chapters().await?;
        self.replace_catalog(chapters)?;
        info!(count = self.catalog.len(), "chapter catalog refreshed");
        Ok(())
    }

    /// Validate the form and ask the collaborator for a quiz on the selected
    /// chapter. The busy flag is raised for the duration of the call.
    ///
    /// # Errors
    ///
    /// Returns a validation error without calling `api`, or the API error.
    pub async fn generate_quiz(
        &mut self,
        api: &dyn StudyApi,
        busy: &BusyIndicator,
    ) -> Result<&GeneratedQuiz, StudyError> {
        let config = self.quiz_form.validate()?;
        let chapter_id = self.selected_chapter_id.clone();

        let ticket = busy.begin();
        let result = api.generate_quiz(&chapter_id, &config).await;
        busy.finish(ticket);

        let quiz = result?;
        info!(%chapter_id, quiz_type = %config.quiz_type, difficulty = %config.difficulty, "quiz stored");
        Ok(self.last_quiz.insert(GeneratedQuiz { chapter_id, config, quiz }))
    }

    /// Ask the tutor about the selected chapter and record the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuestion`] for blank input, or the API error.
    pub async fn ask_tutor(
        &mut self,
        api: &dyn StudyApi,
        busy: &BusyIndicator,
        question: &str,
    ) -> Result<&ChatMessage, StudyError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let ticket = busy.begin();
        let result = api.ask_tutor(question, &self.selected_chapter_id).await;
        busy.finish(ticket);

        let answer = result?;
        self.chat.push(ChatMessage { role: ChatRole::Student, content: question.to_owned(), citations: Vec::new() });
        self.chat.push(ChatMessage { role: ChatRole::Tutor, content: answer.answer, citations: answer.citations });
        debug!(messages = self.chat.len(), "tutor answered");
        Ok(&self.chat[self.chat.len() - 1])
    }
}

#[cfg(test)]
#[path = "study_test.rs"]
mod tests;
