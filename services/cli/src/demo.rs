use crate::infra::build_service;
use crate::report::{render_progress, render_result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use style_quiz::config::ScoringConfig;
use style_quiz::error::AppError;
use style_quiz::quiz::{
    ProgressSnapshot, Question, QuestionCatalog, ResponseLog, ResultSummaryView, Style,
};
use tracing::warn;

/// Style order the scripted participant leans towards; rotated per question.
const DEMO_PREFERENCES: [Style; Style::COUNT] = [
    Style::Elegant,
    Style::Classic,
    Style::Romantic,
    Style::Natural,
    Style::Contemporary,
    Style::Creative,
    Style::Sensual,
    Style::Dramatic,
];

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Participant name shown on the demo result
    #[arg(long, default_value = "Demo participant")]
    pub(crate) participant: String,
    /// Stop after this many scoring questions to show a partial leaderboard
    #[arg(long)]
    pub(crate) stop_after: Option<usize>,
    /// Print the session transcript as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            participant: "Demo participant".to_string(),
            stop_after: None,
            json: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct DemoTranscript {
    started_at: DateTime<Utc>,
    progress: Vec<ProgressSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ResultSummaryView>,
}

pub(crate) fn run_demo(
    catalog: QuestionCatalog,
    config: &ScoringConfig,
    args: DemoArgs,
) -> Result<(), AppError> {
    let DemoArgs {
        participant,
        stop_after,
        json,
    } = args;

    let service = build_service(catalog, config);
    let started_at = Utc::now();
    let log = scripted_log(service.catalog(), stop_after);

    let mut progress = Vec::new();
    for answered in 1..=log.len() {
        let prefix = &log.responses()[..answered];
        let latest = &prefix[answered - 1];
        if service
            .catalog()
            .question(&latest.question_id)
            .is_some_and(Question::is_normal)
        {
            progress.push(service.progress(prefix));
        }
    }

    let summary = if service.completeness(log.responses()).is_valid {
        Some(service.calculate(&participant, log.responses())?)
    } else {
        None
    };

    if json {
        let transcript = DemoTranscript {
            started_at,
            progress,
            summary: summary.as_ref().map(|result| result.summary_view()),
        };
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    println!("Style quiz demo for {participant}");
    for snapshot in &progress {
        println!("- {}", render_progress(snapshot));
    }
    match summary {
        Some(result) => {
            println!();
            print!("{}", render_result(&result));
            let profile = result.predominant_style.profile();
            println!("{}: {}", profile.label, profile.description);
        }
        None => println!("Session paused before completion; no result computed."),
    }
    Ok(())
}

/// Answers the catalog in order. Scoring questions take the options whose styles rank highest
/// in the rotated preference list; strategic questions take their first option.
fn scripted_log(catalog: &QuestionCatalog, stop_after: Option<usize>) -> ResponseLog {
    let mut log = ResponseLog::new();
    let limit = stop_after.unwrap_or(usize::MAX);
    let mut answered_normal = 0;

    for question in catalog.questions() {
        if question.is_normal() {
            if answered_normal == limit {
                break;
            }
            let picks = preferred_options(question, answered_normal);
            if record_scripted(&mut log, question, picks) {
                answered_normal += 1;
            }
        } else if let Some(option) = question.options.first() {
            record_scripted(&mut log, question, [option.id.0.clone()]);
        }
    }
    log
}

/// Appends the scripted answer, or logs why the question rejected it and leaves the log as is.
fn record_scripted<I>(log: &mut ResponseLog, question: &Question, picks: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    match log.record(question, picks) {
        Ok(_) => true,
        Err(error) => {
            warn!(question_id = %question.id, %error, "scripted answer rejected");
            false
        }
    }
}

fn preferred_options(question: &Question, position: usize) -> Vec<String> {
    let mut preferences = DEMO_PREFERENCES;
    preferences.rotate_left(position % 3);

    let mut options: Vec<_> = question
        .options
        .iter()
        .filter_map(|option| {
            let style = option.style?;
            let rank = preferences.iter().position(|preferred| *preferred == style)?;
            Some((rank, option.id.0.clone()))
        })
        .collect();
    options.sort_by_key(|(rank, _)| *rank);
    options
        .into_iter()
        .take(question.required_selections)
        .map(|(_, id)| id)
        .collect()
}
