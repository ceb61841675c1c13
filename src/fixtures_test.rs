use super::*;

#[test]
fn sample_attempts_have_positional_ids_and_scores_in_order() {
    let attempts = sample_attempts();
    let ids: Vec<&str> = attempts.iter().map(|a| a.id.as_str()).collect();
    let scores: Vec<u8> = attempts.iter().map(|a| a.score).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(scores, vec![85, 72, 90]);
    assert!(attempts.iter().all(|a| a.total_questions.is_some()));
}

#[test]
fn sample_chapters_satisfy_catalog_invariants() {
    let catalog = ChapterCatalog::new(sample_chapters()).unwrap();
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.first().id, "ch1");
    assert_eq!(catalog, sample_catalog());
}

#[test]
fn sample_stats_match_dashboard_defaults() {
    let stats = sample_stats();
    assert_eq!(stats.total_quizzes, 15);
    assert_eq!(stats.average_score, 78);
    assert_eq!(stats.topics_mastered, 8);
}
