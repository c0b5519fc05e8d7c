use std::collections::HashSet;

use serde::Serialize;

use super::catalog::QuestionCatalog;
use super::domain::{Response, Style};
use super::engine::ScoringEngine;
use super::validation::validate_normal_question;

/// Live view over a partial log, used for running leaderboards before completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub answered_count: usize,
    pub total_count: usize,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_leading_style: Option<Style>,
}

/// Counts scoring questions holding at least one valid answer and reuses the ranking on the
/// prefix collected so far.
pub fn progress_snapshot(
    engine: &ScoringEngine,
    responses: &[Response],
    catalog: &QuestionCatalog,
) -> ProgressSnapshot {
    let answered: HashSet<_> = responses
        .iter()
        .filter(|response| {
            catalog
                .question(&response.question_id)
                .filter(|question| question.is_normal())
                .is_some_and(|question| validate_normal_question(response, question))
        })
        .map(|response| &response.question_id)
        .collect();

    let answered_count = answered.len();
    let total_count = catalog.total_normal_questions();
    let progress_percent = if total_count == 0 {
        0
    } else {
        ((answered_count * 200 + total_count) / (total_count * 2)).min(100) as u8
    };

    ProgressSnapshot {
        answered_count,
        total_count,
        progress_percent,
        current_leading_style: engine.leading_style(responses, catalog),
    }
}
