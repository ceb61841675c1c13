//! Interactive command loop hosting the dashboard and study views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell owns the [`SessionState`] and a handle to the [`StudyApi`].
//! Each input line parses into a [`ShellCommand`], mutates session state
//! (awaiting the API inline where needed), then re-renders the current
//! view under the notice banner. The loading overlay runs as a separate
//! task that watches the busy flag.
//!
//! ERROR HANDLING
//! ==============
//! Nothing typed at the prompt is fatal. Parse errors print usage; action
//! errors become the session notice. Only I/O failure on the shell's own
//! input or output ends the loop with an error.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ErrorCode;
use crate::net::api::StudyApi;
use crate::pages::dashboard::{build_dashboard, render_dashboard};
use crate::pages::study::{build_study, render_quiz, render_study};
use crate::state::session::{Notice, NoticeLevel, SessionState, View};
use crate::state::study::PanelMode;

pub const PROMPT: &str = "studymate> ";
pub const OVERLAY_TEXT: &str = "Loading StudyMate...";

pub const HELP: &str = "\
Commands:
  dashboard              switch to the dashboard
  study                  switch to the study view
  show                   redraw the current view
  quiz                   list the questions of the last generated quiz
  select <chapter-id>    choose a chapter
  mode <quiz|chat>       switch the study panel
  type <mcq|saq|laq|mixed>
  difficulty <easy|medium|hard>
  count <n>              number of questions (5-25)
  generate               generate a quiz for the selected chapter
  ask <question>         ask the tutor about the selected chapter
  refresh                reload dashboard and chapters
  dismiss                clear the notice
  help                   show this text
  quit                   leave";

// =============================================================================
// PARSING
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Navigate(View),
    ShowQuiz,
    Select(String),
    Mode(PanelMode),
    QuizType(String),
    Difficulty(String),
    Count(String),
    Generate,
    Ask(String),
    Refresh,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {usage}")]
    MissingArgument { usage: &'static str },
    #[error("'{value}' is not one of {expected}")]
    InvalidArgument { value: String, expected: &'static str },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_SHELL_EMPTY",
            Self::Unknown(_) => "E_SHELL_UNKNOWN",
            Self::MissingArgument { .. } => "E_SHELL_MISSING_ARG",
            Self::InvalidArgument { .. } => "E_SHELL_INVALID_ARG",
        }
    }
}

/// Parse one input line. The verb is case-insensitive; the rest of the line
/// is passed through trimmed.
///
/// # Errors
///
/// Returns a [`ParseError`] for blank lines, unknown verbs and missing or
/// malformed arguments.
pub fn parse_command(line: &str) -> Result<ShellCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let arg = |usage: &'static str| {
        if rest.is_empty() { Err(ParseError::MissingArgument { usage }) } else { Ok(rest.to_owned()) }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "show" | "ls" => ShellCommand::Show,
        "dashboard" => ShellCommand::Navigate(View::Dashboard),
        "study" => ShellCommand::Navigate(View::Study),
        "quiz" => ShellCommand::ShowQuiz,
        "select" => ShellCommand::Select(arg("select <chapter-id>")?),
        "mode" => {
            let raw = arg("mode <quiz|chat>")?;
            let mode = raw
                .parse()
                .map_err(|()| ParseError::InvalidArgument { value: raw.clone(), expected: "quiz, chat" })?;
            ShellCommand::Mode(mode)
        }
        "type" => ShellCommand::QuizType(arg("type <mcq|saq|laq|mixed>")?),
        "difficulty" => ShellCommand::Difficulty(arg("difficulty <easy|medium|hard>")?),
        "count" => ShellCommand::Count(arg("count <n>")?),
        "generate" => ShellCommand::Generate,
        "ask" => ShellCommand::Ask(arg("ask <question>")?),
        "refresh" => ShellCommand::Refresh,
        "dismiss" => ShellCommand::Dismiss,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(command)
}

// =============================================================================
// SHELL
// =============================================================================

/// What the loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Print(String),
    Quit,
}

pub struct Shell {
    session: SessionState,
    api: Arc<dyn StudyApi>,
}

impl Shell {
    #[must_use]
    pub fn new(session: SessionState, api: Arc<dyn StudyApi>) -> Self {
        Self { session, api }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Notice banner followed by the current view.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.session.notice().map(render_notice).unwrap_or_default();
        let page = match self.session.current_view {
            View::Dashboard => {
                render_dashboard(&build_dashboard(self.session.stats(), self.session.recent_attempts()))
            }
            View::Study => render_study(&build_study(&self.session.study)),
        };
        out.push_str(&page);
        out
    }

    /// Apply one command to the session.
    pub async fn handle(&mut self, command: ShellCommand) -> Step {
        debug!(?command, "shell command");
        let api = self.api.as_ref();
        match command {
            ShellCommand::Show => {}
            ShellCommand::Navigate(view) => self.session.navigate(view),
            ShellCommand::ShowQuiz => {
                return Step::Print(self.session.study.last_quiz().map_or_else(
                    || "No quiz generated yet. Use 'generate' in the study view.".to_owned(),
                    render_quiz,
                ));
            }
            ShellCommand::Select(id) => {
                if let Err(err) = self.session.study.select_chapter(&id) {
                    self.session.set_notice(Notice::error_from(&err));
                }
            }
            ShellCommand::Mode(mode) => self.session.study.set_panel_mode(mode),
            ShellCommand::QuizType(raw) => {
                if let Err(err) = self.session.study.quiz_form.set_quiz_type(&raw) {
                    self.session.set_notice(Notice::error_from(&err));
                }
            }
            ShellCommand::Difficulty(raw) => {
                if let Err(err) = self.session.study.quiz_form.set_difficulty(&raw) {
                    self.session.set_notice(Notice::error_from(&err));
                }
            }
            ShellCommand::Count(raw) => self.session.study.quiz_form.set_question_count(raw),
            ShellCommand::Generate => {
                let _ = self.session.generate_quiz(api).await;
            }
            ShellCommand::Ask(question) => {
                self.session.study.set_panel_mode(PanelMode::Chat);
                let _ = self.session.ask_tutor(api, &question).await;
            }
            ShellCommand::Refresh => {
                if self.session.refresh_all(api).await.is_ok() {
                    self.session.set_notice(Notice::info("Dashboard and chapters refreshed."));
                }
            }
            ShellCommand::Dismiss => {
                self.session.dismiss_notice();
            }
            ShellCommand::Help => return Step::Print(HELP.to_owned()),
            ShellCommand::Quit => return Step::Quit,
        }
        Step::Print(self.render())
    }

    /// Parse and apply one input line.
    pub async fn handle_line(&mut self, line: &str) -> Step {
        match parse_command(line) {
            Ok(command) => self.handle(command).await,
            Err(ParseError::Empty) => Step::Print(String::new()),
            Err(err) => Step::Print(format!("error: {err}")),
        }
    }

    /// Read commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        output.write_all(self.render().as_bytes()).await?;
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                Step::Print(text) => {
                    output.write_all(text.as_bytes()).await?;
                    if !text.is_empty() && !text.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                }
                Step::Quit => break,
            }
        }
        info!("shell exited");
        Ok(())
    }
}

fn render_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!("* {}\n\n", notice.message),
        NoticeLevel::Error => {
            let code = notice.code.unwrap_or("E_UNKNOWN");
            let hint = if notice.retryable { " (retry may help)" } else { "" };
            format!("! [{code}] {}{hint}\n\n", notice.message)
        }
    }
}

// =============================================================================
// OVERLAY
// =============================================================================

/// Print [`OVERLAY_TEXT`] to `out` each time the busy flag rises. Ends when
/// the flag's sender is dropped or the writer fails.
pub fn spawn_overlay<W>(mut busy: watch::Receiver<bool>, mut out: W) -> JoinHandle<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let raised = *busy.borrow_and_update();
            if raised {
                let line = format!("{OVERLAY_TEXT}\n");
                if out.write_all(line.as_bytes()).await.is_err() || out.flush().await.is_err() {
                    break;
                }
            }
            if busy.changed().await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
