//! Top-level session state: current view, dashboard data, notice banner,
//! study state and the busy flag.
//!
//! DESIGN
//! ======
//! `set_view` is a pure assignment. `navigate` is what the shell calls on a
//! user-driven switch: it cancels in-flight busy raises before showing the
//! short transition overlay, so nothing started on the previous screen can
//! bring the overlay back.
//!
//! Study state lives here rather than on the study page, so leaving and
//! re-entering the study view preserves the selection and form.
//!
//! ERROR HANDLING
//! ==============
//! Action failures never propagate as fatal. They clear the busy flag and
//! land in [`SessionState::notice`] as an error banner; the `Err` is still
//! returned for callers that want to branch on it.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{info, warn};

use super::busy::{BusyIndicator, BusyTicket, DEFAULT_BUSY_DURATION};
use super::study::{StudyError, StudyState};
use crate::error::ErrorCode;
use crate::fixtures;
use crate::net::api::StudyApi;
use crate::net::types::{DashboardStats, QuizAttempt};

pub const STARTUP_LOADING: Duration = Duration::from_millis(800);
pub const NAVIGATION_LOADING: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Study,
}

impl View {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Study => "study",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for View {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "study" => Ok(Self::Study),
            _ => Err(()),
        }
    }
}

// =============================================================================
// NOTICE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-blocking banner shown above the current view until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub code: Option<&'static str>,
    pub retryable: bool,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into(), code: None, retryable: false }
    }

    #[must_use]
    pub fn error_from<E: ErrorCode + ?Sized>(err: &E) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: err.to_string(),
            code: Some(err.error_code()),
            retryable: err.retryable(),
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub current_view: View,
    stats: DashboardStats,
    recent_attempts: Vec<QuizAttempt>,
    notice: Option<Notice>,
    pub study: StudyState,
    busy: BusyIndicator,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-filled with the built-in dashboard samples.
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self { stats: fixtures::sample_stats(), recent_attempts: fixtures::sample_attempts(), ..Self::default() }
    }

    #[must_use]
    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    #[must_use]
    pub fn recent_attempts(&self) -> &[QuizAttempt] {
        &self.recent_attempts
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// User-driven view switch with the transition overlay.
    pub fn navigate(&mut self, view: View) {
        self.busy.cancel();
        self.set_view(view);
        self.show_loading(NAVIGATION_LOADING);
        info!(view = view.as_str(), "navigated");
    }

    /// Raise the loading overlay for `duration`. The last call wins.
    pub fn show_loading(&self, duration: Duration) -> BusyTicket {
        self.busy.show_for(duration)
    }

    /// [`SessionState::show_loading`] with the default duration.
    pub fn show_loading_default(&self) -> BusyTicket {
        self.show_loading(DEFAULT_BUSY_DURATION)
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Initial load behind the startup overlay. One busy ticket covers both
    /// requests, and the overlay stays up for at least [`STARTUP_LOADING`]
    /// from the start of the call.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered after recording it as a notice.
    /// The built-in catalog stays in place on failure.
    pub async fn startup(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let started = Instant::now();
        let ticket = self.busy.begin();
        let dashboard = self.load_dashboard(api).await;
        let chapters = self.load_chapters(api).await;

        let remaining = STARTUP_LOADING.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            self.busy.finish(ticket);
        } else {
            self.busy.show_for(remaining);
        }
        dashboard.and(chapters)
    }

    /// Replace stats and attempts wholesale from the backend.
    ///
    /// # Errors
    ///
    /// Returns the API error after recording it as a notice.
    pub async fn refresh_dashboard(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let ticket = self.busy.begin();
        let result = self.load_dashboard(api).await;
        self.busy.finish(ticket);
        result
    }

    /// Refresh the chapter catalog from the backend.
    ///
    /// # Errors
    ///
    /// Returns the error after recording it as a notice. The previous
    /// catalog stays in place.
    pub async fn refresh_chapters(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let ticket = self.busy.begin();
        let result = self.load_chapters(api).await;
        self.busy.finish(ticket);
        result
    }

    /// Dashboard and catalog together. Both are attempted even if the first fails.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn refresh_all(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let dashboard = self.refresh_dashboard(api).await;
        let chapters = self.refresh_chapters(api).await;
        dashboard.and(chapters)
    }

    async fn load_dashboard(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let result = api.load_dashboard().await.map_err(StudyError::from);
        let (stats, attempts) = self.report(result)?;
        info!(total_quizzes = stats.total_quizzes, attempts = attempts.len(), "dashboard refreshed");
        self.stats = stats;
        self.recent_attempts = attempts;
        Ok(())
    }

    async fn load_chapters(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let result = self.study.refresh_catalog(api).await;
        self.report(result)
    }

    /// Generate a quiz from the study form and announce the result.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after recording it as a notice.
    pub async fn generate_quiz(&mut self, api: &dyn StudyApi) -> Result<(), StudyError> {
        let result = self.study.generate_quiz(api, &self.busy).await.map(|generated| generated.summary());
        let summary = self.report(result)?;
        self.set_notice(Notice::info(summary));
        Ok(())
    }

    /// Ask the tutor about the selected chapter.
    ///
    /// # Errors
    ///
    /// Returns the validation or API error after recording it as a notice.
    pub async fn ask_tutor(&mut self, api: &dyn StudyApi, question: &str) -> Result<(), StudyError> {
        let result = self.study.ask_tutor(api, &self.busy, question).await.map(|_| ());
        self.report(result)
    }

    fn report<T>(&mut self, result: Result<T, StudyError>) -> Result<T, StudyError> {
        if let Err(err) = &result {
            warn!(code = err.error_code(), retryable = err.retryable(), error = %err, "session action failed");
            self.notice = Some(Notice::error_from(err));
        }
        result
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
