use crate::demo::{run_demo, DemoArgs};
use crate::infra::load_catalog;
use crate::report::{run_progress, run_score, run_validate, LogArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use style_quiz::config::AppConfig;
use style_quiz::error::AppError;
use style_quiz::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "style-quiz",
    about = "Score style quiz response logs from the command line",
    version
)]
struct Cli {
    /// JSON question catalog (overrides QUIZ_CATALOG_PATH)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a completed response log and print the ranked styles
    Score(ScoreArgs),
    /// Check a response log for missing or repeated answers
    Validate(LogArgs),
    /// Show the running leaderboard for a partial response log
    Progress(LogArgs),
    /// Walk a scripted participant through the catalog (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    let catalog = load_catalog(cli.catalog, &config.scoring)?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Score(args) => run_score(catalog, &config.scoring, args),
        Command::Validate(args) => run_validate(catalog, &config.scoring, args),
        Command::Progress(args) => run_progress(catalog, &config.scoring, args),
        Command::Demo(args) => run_demo(catalog, &config.scoring, args),
    }
}
