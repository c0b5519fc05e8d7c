use crate::infra::build_service;
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use style_quiz::config::ScoringConfig;
use style_quiz::error::AppError;
use style_quiz::quiz::{
    CompletenessReport, ProgressSnapshot, QuestionCatalog, QuizResult, ResponseImporter,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Response log to score (`.json`, otherwise CSV)
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Participant name recorded on the result
    #[arg(long, default_value = "anonymous")]
    pub(crate) participant: String,
    /// Print the full result as JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LogArgs {
    /// Response log to inspect (`.json`, otherwise CSV)
    #[arg(long)]
    pub(crate) responses: PathBuf,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(
    catalog: QuestionCatalog,
    config: &ScoringConfig,
    args: ScoreArgs,
) -> Result<(), AppError> {
    let responses = ResponseImporter::from_path(&args.responses)?;
    let service = build_service(catalog, config);
    let result = service.calculate(&args.participant, &responses)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_result(&result));
    }
    Ok(())
}

/// Prints the report either way; an invalid answer or an incomplete log then fails with the
/// scoring error.
pub(crate) fn run_validate(
    catalog: QuestionCatalog,
    config: &ScoringConfig,
    args: LogArgs,
) -> Result<(), AppError> {
    let responses = ResponseImporter::from_path(&args.responses)?;
    let service = build_service(catalog, config);
    let report = service.completeness(&responses);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_completeness(&report));
    }

    service.check_responses(&responses)?;
    service.require_complete(&responses)?;
    Ok(())
}

pub(crate) fn run_progress(
    catalog: QuestionCatalog,
    config: &ScoringConfig,
    args: LogArgs,
) -> Result<(), AppError> {
    let responses = ResponseImporter::from_path(&args.responses)?;
    let snapshot = build_service(catalog, config).progress(&responses);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render_progress(&snapshot));
    }
    Ok(())
}

pub(crate) fn render_result(result: &QuizResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Result {} for {} ({})",
        result.id,
        result.participant_name,
        result.calculated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let [second, third] = result.complementary_styles;
    let _ = writeln!(
        out,
        "- Predominant style: {} | complementary: {}, {}",
        result.predominant_style.label(),
        second.label(),
        third.label()
    );
    let _ = writeln!(
        out,
        "- {} responses recorded over {} scoring questions",
        result.responses.len(),
        result.total_normal_questions
    );
    out.push_str("Ranking:\n");
    for score in &result.style_scores {
        let _ = writeln!(
            out,
            "  {}. {:<12} {:>3} pts {:>3}%",
            score.rank,
            score.style.label(),
            score.points,
            score.percentage
        );
    }
    out
}

pub(crate) fn render_completeness(report: &CompletenessReport) -> String {
    let mut out = String::new();
    if report.is_valid {
        out.push_str("Response log is complete\n");
        return out;
    }

    out.push_str("Response log is incomplete\n");
    if !report.missing_question_ids.is_empty() {
        let _ = writeln!(out, "- Missing: {}", join(&report.missing_question_ids));
    }
    if !report.duplicate_question_ids.is_empty() {
        let _ = writeln!(
            out,
            "- Answered more than once: {}",
            join(&report.duplicate_question_ids)
        );
    }
    out
}

pub(crate) fn render_progress(snapshot: &ProgressSnapshot) -> String {
    let leader = snapshot
        .current_leading_style
        .map(|style| style.label())
        .unwrap_or("none yet");
    format!(
        "{}/{} scoring questions answered ({}%) | leading style: {}",
        snapshot.answered_count, snapshot.total_count, snapshot.progress_percent, leader
    )
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
