//! Study page: chapter list, document viewer header and the quiz/chat panel.

use std::fmt::Write as _;

use crate::net::types::{Difficulty, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT, QuizType};
use crate::state::study::{ChatMessage, ChatRole, GeneratedQuiz, PanelMode, StudyState};

pub const TUTOR_GREETING: &str = "Hi! I'm your AI study assistant. I can help you understand concepts from \
                                  your NCERT physics textbook. Try asking me:";

pub const SUGGESTED_PROMPTS: [&str; 3] = [
    "Explain the concept of significant figures",
    "What are the SI base units?",
    "Give me practice problems on dimensional analysis",
];

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterOption {
    pub id: String,
    pub title: String,
    pub pages_label: String,
    pub description: String,
    pub progress: u8,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerHeader {
    pub title: String,
    pub page_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizFormView {
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    pub question_count: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelView {
    Quiz { form: QuizFormView, last_quiz: Option<String> },
    Chat { greeting: Option<&'static str>, messages: Vec<ChatMessage> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyView {
    pub chapters: Vec<ChapterOption>,
    pub viewer: ViewerHeader,
    pub panel_mode: PanelMode,
    pub panel: PanelView,
}

#[must_use]
pub fn build_study(study: &StudyState) -> StudyView {
    let selected_id = study.selected_chapter_id();
    let chapters = study
        .catalog()
        .iter()
        .map(|c| ChapterOption {
            id: c.id.clone(),
            title: c.title.clone(),
            pages_label: format!("{} pages", c.pages),
            description: c.description.clone(),
            progress: c.progress,
            selected: c.id == selected_id,
        })
        .collect();

    let current = study.selected_chapter();
    let viewer = ViewerHeader { title: current.title.clone(), page_label: format!("Page 1 of {}", current.pages) };

    let panel = match study.panel_mode {
        PanelMode::Quiz => PanelView::Quiz {
            form: QuizFormView {
                quiz_type: study.quiz_form.quiz_type,
                difficulty: study.quiz_form.difficulty,
                question_count: study.quiz_form.question_count.clone(),
            },
            last_quiz: study.last_quiz().map(GeneratedQuiz::summary),
        },
        PanelMode::Chat => {
            let messages = study.transcript().to_vec();
            PanelView::Chat { greeting: messages.is_empty().then_some(TUTOR_GREETING), messages }
        }
    };

    StudyView { chapters, viewer, panel_mode: study.panel_mode, panel }
}

/// Fixed-width bar, e.g. `[###############-----] 75%`.
#[must_use]
pub fn progress_bar(progress: u8) -> String {
    let pct = usize::from(progress.min(100));
    let filled = pct * PROGRESS_BAR_WIDTH / 100;
    format!("[{}{}] {pct}%", "#".repeat(filled), "-".repeat(PROGRESS_BAR_WIDTH - filled))
}

#[must_use]
pub fn render_study(view: &StudyView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Study ==");
    let _ = writeln!(out, "Chapters");
    for chapter in &view.chapters {
        let marker = if chapter.selected { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} [{}] {} ({})", chapter.id, chapter.title, chapter.pages_label);
        if !chapter.description.is_empty() {
            let _ = writeln!(out, "      {}", chapter.description);
        }
        let _ = writeln!(out, "      {}", progress_bar(chapter.progress));
    }

    let _ = writeln!(out, "\n{} | {}", view.viewer.title, view.viewer.page_label);

    let tab = |mode: PanelMode| {
        if mode == view.panel_mode { format!("[{mode}]") } else { mode.to_string() }
    };
    let _ = writeln!(out, "\nPanel: {} {}", tab(PanelMode::Quiz), tab(PanelMode::Chat));

    match &view.panel {
        PanelView::Quiz { form, last_quiz } => {
            let _ = writeln!(out, "  Question Type:       {} ({})", form.quiz_type.label(), form.quiz_type);
            let _ = writeln!(out, "  Difficulty:          {}", form.difficulty.label());
            let _ = writeln!(
                out,
                "  Number of Questions: {} ({MIN_QUESTION_COUNT}-{MAX_QUESTION_COUNT})",
                form.question_count
            );
            if let Some(summary) = last_quiz {
                let _ = writeln!(out, "  Last quiz: {summary}");
            }
        }
        PanelView::Chat { greeting, messages } => {
            if let Some(greeting) = greeting {
                let _ = writeln!(out, "  {greeting}");
                for prompt in SUGGESTED_PROMPTS {
                    let _ = writeln!(out, "    - \"{prompt}\"");
                }
            }
            for message in messages {
                let who = match message.role {
                    ChatRole::Student => "You",
                    ChatRole::Tutor => "Tutor",
                };
                let _ = writeln!(out, "  {who}: {}", message.content);
                if !message.citations.is_empty() {
                    let _ = writeln!(out, "       sources: {}", message.citations.join("; "));
                }
            }
        }
    }
    out
}

/// Full question listing for a generated quiz. Options are lettered from `a`.
#[must_use]
pub fn render_quiz(generated: &GeneratedQuiz) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", generated.summary());
    if let Some(limit) = generated.quiz.time_limit {
        let _ = writeln!(out, "Time limit: {} min", limit.div_ceil(60));
    }
    for (n, question) in generated.quiz.questions.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", n + 1, question.prompt);
        for (letter, option) in ('a'..='z').zip(&question.options) {
            let _ = writeln!(out, "   {letter}) {option}");
        }
    }
    out
}

#[cfg(test)]
#[path = "study_test.rs"]
mod tests;
