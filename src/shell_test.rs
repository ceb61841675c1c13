use super::*;
use crate::state::busy::BusyIndicator;
use crate::state::test_helpers::{Call, FakeStudyApi};

use std::time::Duration;
use tokio::io::{AsyncReadExt, BufReader};

fn shell_with(api: FakeStudyApi) -> (Shell, Arc<FakeStudyApi>) {
    let api = Arc::new(api);
    let shell = Shell::new(SessionState::with_sample_data(), api.clone());
    (shell, api)
}

fn printed(step: Step) -> String {
    match step {
        Step::Print(text) => text,
        Step::Quit => panic!("unexpected quit"),
    }
}

// =============================================================
// parse_command
// =============================================================

#[test]
fn parse_simple_verbs() {
    assert_eq!(parse_command("dashboard"), Ok(ShellCommand::Navigate(View::Dashboard)));
    assert_eq!(parse_command("  STUDY "), Ok(ShellCommand::Navigate(View::Study)));
    assert_eq!(parse_command("generate"), Ok(ShellCommand::Generate));
    assert_eq!(parse_command("exit"), Ok(ShellCommand::Quit));
}

#[test]
fn parse_keeps_argument_text() {
    assert_eq!(parse_command("select ch3"), Ok(ShellCommand::Select("ch3".into())));
    assert_eq!(parse_command("count 17.5"), Ok(ShellCommand::Count("17.5".into())));
    assert_eq!(
        parse_command("ask  What are the SI base units? "),
        Ok(ShellCommand::Ask("What are the SI base units?".into()))
    );
}

#[test]
fn parse_mode_checks_value() {
    assert_eq!(parse_command("mode chat"), Ok(ShellCommand::Mode(PanelMode::Chat)));
    assert_eq!(
        parse_command("mode notes"),
        Err(ParseError::InvalidArgument { value: "notes".into(), expected: "quiz, chat" })
    );
}

#[test]
fn parse_errors() {
    assert_eq!(parse_command("   "), Err(ParseError::Empty));
    assert_eq!(parse_command("select"), Err(ParseError::MissingArgument { usage: "select <chapter-id>" }));
    let err = parse_command("upload notes.pdf").unwrap_err();
    assert_eq!(err.error_code(), "E_SHELL_UNKNOWN");
    assert!(err.to_string().contains("'upload'"));
}

// =============================================================
// handle
// =============================================================

#[tokio::test]
async fn generate_flow_calls_api_with_form_values() {
    let (mut shell, api) = shell_with(FakeStudyApi::default());
    for line in ["study", "select ch2", "type mcq", "difficulty hard", "count 17"] {
        shell.handle_line(line).await;
    }
    let out = printed(shell.handle_line("generate").await);

    assert!(out.contains("* Generated 17 MCQ questions at hard difficulty!"));
    assert_eq!(api.calls().len(), 1);
    assert!(matches!(&api.calls()[0], Call::GenerateQuiz { chapter_id, .. } if chapter_id == "ch2"));
}

#[tokio::test]
async fn invalid_count_shows_notice_and_skips_api() {
    let (mut shell, api) = shell_with(FakeStudyApi::default());
    shell.handle_line("count abc").await;
    let out = printed(shell.handle_line("generate").await);

    assert!(out.starts_with("! [E_VALIDATION_COUNT_NAN]"));
    assert!(api.calls().is_empty());

    let out = printed(shell.handle_line("dismiss").await);
    assert!(!out.contains("E_VALIDATION"));
}

#[tokio::test]
async fn unknown_chapter_sets_notice() {
    let (mut shell, _) = shell_with(FakeStudyApi::default());
    let out = printed(shell.handle_line("select ch42").await);
    assert!(out.contains("[E_STUDY_UNKNOWN_CHAPTER] unknown chapter 'ch42'"));
    assert_eq!(shell.session().study.selected_chapter_id(), "ch1");
}

#[tokio::test]
async fn api_failure_is_reported_not_fatal() {
    let (mut shell, _) = shell_with(FakeStudyApi::failing());
    let out = printed(shell.handle_line("refresh").await);
    assert!(out.contains("[E_API_STATUS]"));
    assert!(out.contains("retry may help"));
    assert!(!shell.session().is_loading());
}

#[tokio::test]
async fn ask_switches_to_chat_and_shows_answer() {
    let (mut shell, _) = shell_with(FakeStudyApi::default());
    shell.handle_line("study").await;
    let out = printed(shell.handle_line("ask What is work?").await);
    assert!(out.contains("[chat]"));
    assert!(out.contains("Tutor: About ch1: What is work?"));
}

#[tokio::test]
async fn quiz_command_lists_questions() {
    let (mut shell, _) = shell_with(FakeStudyApi::default());
    assert!(printed(shell.handle_line("quiz").await).starts_with("No quiz generated yet"));
    shell.handle_line("generate").await;
    let out = printed(shell.handle_line("quiz").await);
    assert!(out.contains("10. Question 10"));
}

#[tokio::test]
async fn run_reads_until_quit() {
    let (mut shell, _) = shell_with(FakeStudyApi::default());
    let input = BufReader::new(&b"study\nbogus\nquit\nshow\n"[..]);
    let mut output = Vec::new();
    shell.run(input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("== Dashboard =="));
    assert!(text.contains("== Study =="));
    assert!(text.contains("error: unknown command 'bogus'"));
    assert_eq!(text.matches(PROMPT).count(), 3);
}

// =============================================================
// overlay
// =============================================================

#[tokio::test(start_paused = true)]
async fn overlay_prints_when_busy_rises() {
    let busy = BusyIndicator::new();
    let (writer, mut reader) = tokio::io::duplex(256);
    let overlay = spawn_overlay(busy.subscribe(), writer);

    busy.show_for(Duration::from_millis(800));
    let mut buf = vec![0u8; OVERLAY_TEXT.len() + 1];
    reader.read_exact(&mut buf).await.unwrap();
    assert_eq!(buf, format!("{OVERLAY_TEXT}\n").into_bytes());

    drop(busy);
    tokio::time::sleep(Duration::from_millis(900)).await;
    overlay.abort();
}
