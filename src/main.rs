use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{Level, info, warn};

use studymate::config::{API_TIMEOUT_ENV, API_URL_ENV, ApiConfig, ConfigError};
use studymate::net::api::{HttpStudyApi, StudyApi};
use studymate::net::http::ApiError;
use studymate::pages::dashboard::{build_dashboard, render_dashboard};
use studymate::pages::study::{build_study, progress_bar, render_quiz};
use studymate::shell::{self, Shell};
use studymate::state::session::SessionState;
use studymate::state::study::StudyError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Study(#[from] StudyError),
    #[error("backend reported status '{0}'")]
    Unhealthy(String),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "studymate", about = "StudyMate study companion: quiz dashboard, chapters and AI tutor")]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "STUDYMATE_API_URL", global = true)]
    api_url: Option<String>,

    /// Request timeout in whole seconds.
    #[arg(long, env = "STUDYMATE_API_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard and study views (default).
    Shell,
    /// Check backend liveness.
    Health,
    /// Print the dashboard.
    Dashboard,
    /// List chapters.
    Chapters,
    /// Generate a quiz and print its questions.
    Quiz(QuizArgs),
    /// Ask the tutor one question.
    Ask(AskArgs),
}

#[derive(Args, Debug)]
struct QuizArgs {
    #[arg(long, default_value = "ch1")]
    chapter: String,

    #[arg(long = "type", default_value = "mcq")]
    quiz_type: String,

    #[arg(long, default_value = "medium")]
    difficulty: String,

    #[arg(long, default_value = "10")]
    count: String,
}

#[derive(Args, Debug)]
struct AskArgs {
    #[arg(long, default_value = "ch1")]
    chapter: String,

    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    info!(base_url = %config.base_url, timeout = ?config.timeout, "backend configured");
    let api: Arc<dyn StudyApi> = Arc::new(HttpStudyApi::from_config(&config)?);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(api).await,
        Command::Health => run_health(api.as_ref()).await,
        Command::Dashboard => run_dashboard(api.as_ref()).await,
        Command::Chapters => run_chapters(api.as_ref()).await,
        Command::Quiz(args) => run_quiz(api.as_ref(), args).await,
        Command::Ask(args) => run_ask(api.as_ref(), args).await,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();
}

/// Flags win over the environment; clap already folds the env vars in.
fn load_config(cli: &Cli) -> Result<ApiConfig, ConfigError> {
    ApiConfig::from_lookup(|key| match key {
        API_URL_ENV => cli.api_url.clone(),
        API_TIMEOUT_ENV => cli.timeout_secs.clone(),
        _ => None,
    })
}

async fn run_shell(api: Arc<dyn StudyApi>) -> Result<(), CliError> {
    let mut session = SessionState::new();
    let overlay = shell::spawn_overlay(session.busy().subscribe(), tokio::io::stderr());

    if let Err(e) = session.startup(api.as_ref()).await {
        warn!(error = %e, "startup refresh failed; using built-in chapters");
    }

    let mut shell = Shell::new(session, api);
    let result = shell.run(BufReader::new(tokio::io::stdin()), &mut tokio::io::stdout()).await;
    overlay.abort();
    result.map_err(CliError::from)
}

async fn run_health(api: &dyn StudyApi) -> Result<(), CliError> {
    let health = api.health().await?;
    if !health.is_healthy() {
        return Err(CliError::Unhealthy(health.status));
    }
    match health.timestamp {
        Some(ts) => println!("{} ({ts})", health.status),
        None => println!("{}", health.status),
    }
    Ok(())
}

async fn run_dashboard(api: &dyn StudyApi) -> Result<(), CliError> {
    let mut session = SessionState::new();
    session.refresh_dashboard(api).await?;
    print!("{}", render_dashboard(&build_dashboard(session.stats(), session.recent_attempts())));
    Ok(())
}

async fn run_chapters(api: &dyn StudyApi) -> Result<(), CliError> {
    let mut session = SessionState::new();
    session.refresh_chapters(api).await?;
    for chapter in build_study(&session.study).chapters {
        println!("{:<6} {} ({})  {}", chapter.id, chapter.title, chapter.pages_label, progress_bar(chapter.progress));
    }
    Ok(())
}

async fn run_quiz(api: &dyn StudyApi, args: QuizArgs) -> Result<(), CliError> {
    let mut session = SessionState::new();
    if let Err(e) = session.refresh_chapters(api).await {
        warn!(error = %e, "chapter refresh failed; using built-in chapters");
    }
    let study = &mut session.study;
    study.select_chapter(&args.chapter)?;
    study.quiz_form.set_quiz_type(&args.quiz_type).map_err(StudyError::from)?;
    study.quiz_form.set_difficulty(&args.difficulty).map_err(StudyError::from)?;
    study.quiz_form.set_question_count(args.count);

    session.generate_quiz(api).await?;
    if let Some(generated) = session.study.last_quiz() {
        print!("{}", render_quiz(generated));
    }
    Ok(())
}

async fn run_ask(api: &dyn StudyApi, args: AskArgs) -> Result<(), CliError> {
    let mut session = SessionState::new();
    if let Err(e) = session.refresh_chapters(api).await {
        warn!(error = %e, "chapter refresh failed; using built-in chapters");
    }
    session.study.select_chapter(&args.chapter)?;
    session.ask_tutor(api, &args.question.join(" ")).await?;

    if let Some(reply) = session.study.transcript().last() {
        println!("{}", reply.content);
        for citation in &reply.citations {
            println!("  - {citation}");
        }
    }
    Ok(())
}
