//! Built-in sample data.
//!
//! The chapter list doubles as the default catalog until the backend
//! answers `list_chapters`. Stats and attempts seed
//! [`SessionState::with_sample_data`](crate::state::session::SessionState::with_sample_data).

use std::num::NonZeroU32;

use crate::net::types::{Chapter, DashboardStats, QuizAttempt};
use crate::state::study::ChapterCatalog;

#[must_use]
pub fn sample_stats() -> DashboardStats {
    DashboardStats { total_quizzes: 15, average_score: 78, study_hours: 24.0, topics_mastered: 8 }
}

#[must_use]
pub fn sample_attempts() -> Vec<QuizAttempt> {
    [
        ("Physics - Units & Measurement", 85, "2 hours ago", 10),
        ("Physics - Motion in Straight Line", 72, "1 day ago", 8),
        ("Physics - Work Energy Power", 90, "2 days ago", 12),
    ]
    .into_iter()
    .zip(1..)
    .map(|((subject, score, date, total_questions), id): ((&str, u8, &str, u32), u32)| QuizAttempt {
        id: id.to_string(),
        subject: subject.to_owned(),
        score,
        date: date.to_owned(),
        total_questions: NonZeroU32::new(total_questions),
    })
    .collect()
}

#[must_use]
pub fn sample_chapters() -> Vec<Chapter> {
    [
        ("ch1", "Units and Measurement", 25, "Fundamental concepts of measurement in physics", 85),
        ("ch2", "Motion in Straight Line", 28, "Study of motion along a straight line", 60),
        ("ch3", "Work, Energy and Power", 32, "Fundamental concepts of work, energy and power", 90),
        ("ch4", "Motion in a Plane", 30, "Two-dimensional motion analysis", 30),
    ]
    .into_iter()
    .map(|(id, title, pages, description, progress): (&str, &str, u32, &str, u8)| Chapter {
        id: id.to_owned(),
        title: title.to_owned(),
        pages,
        description: description.to_owned(),
        progress,
    })
    .collect()
}

/// The sample chapters as a catalog. The data is static and satisfies every
/// catalog invariant, so construction goes through the unchecked path.
#[must_use]
pub fn sample_catalog() -> ChapterCatalog {
    ChapterCatalog::from_static(sample_chapters())
}

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod tests;
