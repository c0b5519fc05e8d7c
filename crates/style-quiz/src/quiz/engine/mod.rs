mod ranking;
pub(crate) mod tally;

pub use ranking::PERCENTAGE_SUM_TOLERANCE;

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::info;

use super::catalog::QuestionCatalog;
use super::domain::{QuizResult, Response, ResultId, Style, StyleScore};

/// Capability handing out identifiers for freshly assembled results.
pub trait ResultIdSource: Send + Sync {
    fn next_id(&self) -> ResultId;
}

/// Monotonic `<prefix>-NNNNNN` identifiers backed by an atomic counter.
#[derive(Debug)]
pub struct SequentialResultIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialResultIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }
}

impl ResultIdSource for SequentialResultIds {
    fn next_id(&self) -> ResultId {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        ResultId(format!("{}-{id:06}", self.prefix))
    }
}

/// Stateless scorer turning a response log into a ranked style profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// All eight styles in rank order for the given (possibly partial) log.
    pub fn style_scores(&self, responses: &[Response], catalog: &QuestionCatalog) -> Vec<StyleScore> {
        let tally = tally::tally_responses(responses, catalog);
        ranking::rank_styles(&tally)
    }

    pub fn calculate_result(
        &self,
        responses: &[Response],
        catalog: &QuestionCatalog,
        participant_name: &str,
        ids: &dyn ResultIdSource,
    ) -> QuizResult {
        self.calculate_result_at(responses, catalog, participant_name, ids, Utc::now())
    }

    /// Same as [`ScoringEngine::calculate_result`] with an explicit assembly timestamp.
    pub fn calculate_result_at(
        &self,
        responses: &[Response],
        catalog: &QuestionCatalog,
        participant_name: &str,
        ids: &dyn ResultIdSource,
        calculated_at: DateTime<Utc>,
    ) -> QuizResult {
        let tally = tally::tally_responses(responses, catalog);
        let style_scores = ranking::rank_styles(&tally);

        let predominant_style = style_scores[0].style;
        let complementary_styles = [style_scores[1].style, style_scores[2].style];
        let id = ids.next_id();

        info!(
            result_id = %id,
            predominant = %predominant_style,
            counted_responses = tally.counted_responses,
            total_points = tally.total_points(),
            "assembled quiz result"
        );

        QuizResult {
            id,
            participant_name: participant_name.to_string(),
            responses: responses.to_vec(),
            style_scores,
            predominant_style,
            complementary_styles,
            total_normal_questions: catalog.total_normal_questions(),
            calculated_at,
        }
    }

    /// Rank-one style for the log, or `None` while no style has any points.
    pub fn leading_style(&self, responses: &[Response], catalog: &QuestionCatalog) -> Option<Style> {
        self.style_scores(responses, catalog)
            .first()
            .filter(|score| score.points > 0)
            .map(|score| score.style)
    }
}
