//! Dashboard page: stat cards, recent attempts and performance overview.

use std::fmt::Write as _;
use std::num::NonZeroU32;

use crate::net::types::{DashboardStats, QuizAttempt};

/// Scores at or above this are shown as good.
pub const GOOD_SCORE_THRESHOLD: u8 = 80;

pub const QUICK_ACTIONS: [&str; 2] = ["Generate Practice Quiz", "Ask AI Tutor"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
    Good,
    NeedsAttention,
}

impl Standing {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsAttention => "needs attention",
        }
    }
}

#[must_use]
pub fn classify_score(score: u8) -> Standing {
    if score >= GOOD_SCORE_THRESHOLD { Standing::Good } else { Standing::NeedsAttention }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRow {
    pub id: String,
    pub subject: String,
    pub date: String,
    pub total_questions: Option<NonZeroU32>,
    pub score: u8,
    pub standing: Standing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardView {
    pub stat_cards: Vec<StatCard>,
    pub attempt_count: String,
    pub attempts: Vec<AttemptRow>,
    pub strong_topics: Vec<String>,
    pub focus_topics: Vec<String>,
    pub quick_actions: &'static [&'static str],
}

#[must_use]
pub fn build_dashboard(stats: &DashboardStats, attempts: &[QuizAttempt]) -> DashboardView {
    let stat_cards = vec![
        StatCard { label: "Quizzes Taken", value: stats.total_quizzes.to_string() },
        StatCard { label: "Average Score", value: format!("{}%", stats.average_score) },
        StatCard { label: "Study Hours", value: stats.study_hours.to_string() },
        StatCard { label: "Topics Mastered", value: stats.topics_mastered.to_string() },
    ];

    let rows: Vec<AttemptRow> = attempts
        .iter()
        .map(|a| AttemptRow {
            id: a.id.clone(),
            subject: a.subject.clone(),
            date: a.date.clone(),
            total_questions: a.total_questions,
            score: a.score,
            standing: classify_score(a.score),
        })
        .collect();

    let attempt_count = match rows.len() {
        1 => "1 attempt".to_owned(),
        n => format!("{n} attempts"),
    };

    DashboardView {
        stat_cards,
        attempt_count,
        strong_topics: topics_with(&rows, Standing::Good),
        focus_topics: topics_with(&rows, Standing::NeedsAttention),
        attempts: rows,
        quick_actions: &QUICK_ACTIONS,
    }
}

/// Topic part of a subject: `"Physics - Motion"` → `"Motion"`.
#[must_use]
pub fn topic_of(subject: &str) -> &str {
    subject.split_once(" - ").map_or(subject, |(_, topic)| topic).trim()
}

fn topics_with(rows: &[AttemptRow], standing: Standing) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for row in rows.iter().filter(|r| r.standing == standing) {
        let topic = topic_of(&row.subject);
        if !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_owned());
        }
    }
    topics
}

#[must_use]
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Dashboard ==");
    for card in &view.stat_cards {
        let _ = writeln!(out, "  {:<16} {}", card.label, card.value);
    }

    let _ = writeln!(out, "\nRecent Quiz Attempts ({})", view.attempt_count);
    if view.attempts.is_empty() {
        let _ = writeln!(out, "  (none yet)");
    }
    for row in &view.attempts {
        let marker = match row.standing {
            Standing::Good => '+',
            Standing::NeedsAttention => '!',
        };
        let detail = match row.total_questions {
            Some(n) => format!("{}, {n} questions", row.date),
            None => row.date.clone(),
        };
        let _ = writeln!(
            out,
            "  {marker} {:>3}%  {}  ({detail}) [{}]",
            row.score,
            row.subject,
            row.standing.label()
        );
    }

    let _ = writeln!(out, "\nPerformance Overview");
    let _ = writeln!(out, "  Strong Topics: {}", list_or_dash(&view.strong_topics));
    let _ = writeln!(out, "  Needs Focus:   {}", list_or_dash(&view.focus_topics));
    let _ = writeln!(out, "\nQuick Actions: {}", view.quick_actions.join(" | "));
    out
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() { "-".to_owned() } else { items.join(", ") }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
