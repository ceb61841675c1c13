use super::*;

#[test]
fn defaults_match_initial_form() {
    let form = QuizForm::default();
    assert_eq!(form.quiz_type, QuizType::Mcq);
    assert_eq!(form.difficulty, Difficulty::Medium);
    assert_eq!(form.question_count, "10");
    assert_eq!(form.validate(), Ok(QuizConfig::default()));
}

#[test]
fn validate_accepts_range_edges() {
    assert_eq!(parse_question_count("5"), Ok(5));
    assert_eq!(parse_question_count(" 25 "), Ok(25));
}

#[test]
fn validate_rejects_non_numeric_count() {
    let mut form = QuizForm::default();
    form.set_question_count("abc");
    let err = form.validate().unwrap_err();
    assert_eq!(err, ValidationError::QuestionCountNotANumber { input: "abc".into() });
    assert!(err.to_string().contains("between 5 and 25"));
}

#[test]
fn validate_rejects_fractional_and_empty_counts() {
    assert!(matches!(parse_question_count("17.5"), Err(ValidationError::QuestionCountNotANumber { .. })));
    assert!(matches!(parse_question_count("12abc"), Err(ValidationError::QuestionCountNotANumber { .. })));
    assert!(matches!(parse_question_count(""), Err(ValidationError::QuestionCountNotANumber { .. })));
}

#[test]
fn validate_rejects_out_of_range_counts() {
    assert_eq!(parse_question_count("4"), Err(ValidationError::QuestionCountOutOfRange { value: 4 }));
    assert_eq!(parse_question_count("26"), Err(ValidationError::QuestionCountOutOfRange { value: 26 }));
    assert_eq!(parse_question_count("-3"), Err(ValidationError::QuestionCountOutOfRange { value: -3 }));
}

#[test]
fn set_quiz_type_and_difficulty_parse_option_values() {
    let mut form = QuizForm::default();
    form.set_quiz_type("laq").unwrap();
    form.set_difficulty("HARD").unwrap();
    form.set_question_count("17");
    assert_eq!(
        form.validate(),
        Ok(QuizConfig { quiz_type: QuizType::Laq, difficulty: Difficulty::Hard, question_count: 17 })
    );
}

#[test]
fn unknown_option_values_leave_form_unchanged() {
    let mut form = QuizForm::default();
    let err = form.set_quiz_type("essay").unwrap_err();
    assert_eq!(err.error_code(), "E_VALIDATION_QUIZ_TYPE");
    assert!(form.set_difficulty("brutal").is_err());
    assert_eq!(form, QuizForm::default());
}
