use std::sync::Arc;

use tracing::{info, warn};

use super::catalog::QuestionCatalog;
use super::completeness::{validate_completeness, CompletenessReport};
use super::domain::{QuizResult, Response, ResultId};
use super::engine::{ResultIdSource, ScoringEngine};
use super::progress::{progress_snapshot, ProgressSnapshot};
use super::repository::{RepositoryError, ResultRepository};
use super::validation::{check_response, ValidationError};

/// Service composing the catalog, scoring engine, id source, and result repository.
///
/// This is the `Completed -> ResultComputed` step of a quiz session: the log must already be
/// complete, and each successful call stores exactly one new immutable result.
pub struct StyleQuizService<R, I> {
    catalog: Arc<QuestionCatalog>,
    engine: ScoringEngine,
    repository: Arc<R>,
    ids: Arc<I>,
}

impl<R, I> StyleQuizService<R, I>
where
    R: ResultRepository + 'static,
    I: ResultIdSource + 'static,
{
    pub fn new(catalog: Arc<QuestionCatalog>, repository: Arc<R>, ids: Arc<I>) -> Self {
        Self {
            catalog,
            engine: ScoringEngine::new(),
            repository,
            ids,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn completeness(&self, responses: &[Response]) -> CompletenessReport {
        validate_completeness(responses, &self.catalog)
    }

    pub fn progress(&self, responses: &[Response]) -> ProgressSnapshot {
        progress_snapshot(&self.engine, responses, &self.catalog)
    }

    /// Every response for a catalog question must meet that question's selection contract,
    /// including logs that were imported rather than recorded. Responses for unknown questions
    /// are left to the tally.
    pub fn check_responses(&self, responses: &[Response]) -> Result<(), QuizServiceError> {
        for response in responses {
            let Some(question) = self.catalog.question(&response.question_id) else {
                continue;
            };
            if let Err(error) = check_response(response, question) {
                warn!(
                    question_id = %response.question_id,
                    sequence_index = response.sequence_index,
                    %error,
                    "response log holds an invalid answer"
                );
                return Err(QuizServiceError::InvalidResponse {
                    sequence_index: response.sequence_index,
                    error,
                });
            }
        }
        Ok(())
    }

    /// Completeness gate: the report for a complete log, or `Incomplete` naming the first
    /// problem (missing questions before repeated ones).
    pub fn require_complete(
        &self,
        responses: &[Response],
    ) -> Result<CompletenessReport, QuizServiceError> {
        let report = self.completeness(responses);
        if report.is_valid {
            return Ok(report);
        }

        warn!(
            missing = report.missing_question_ids.len(),
            duplicated = report.duplicate_question_ids.len(),
            "response log is not complete"
        );
        let error = if report.missing_question_ids.is_empty() {
            ValidationError::DuplicateResponses {
                question_ids: report.duplicate_question_ids.clone(),
            }
        } else {
            ValidationError::MissingResponses {
                question_ids: report.missing_question_ids.clone(),
            }
        };
        Err(QuizServiceError::Incomplete { error, report })
    }

    /// Score a completed log and persist the result.
    pub fn calculate(
        &self,
        participant_name: &str,
        responses: &[Response],
    ) -> Result<QuizResult, QuizServiceError> {
        self.check_responses(responses)?;
        self.require_complete(responses)?;

        let result = self.engine.calculate_result(
            responses,
            &self.catalog,
            participant_name,
            &*self.ids,
        );
        let stored = self.repository.insert(result)?;
        info!(result_id = %stored.id, "stored quiz result");
        Ok(stored)
    }

    /// Fetch a stored result.
    pub fn get(&self, id: &ResultId) -> Result<QuizResult, QuizServiceError> {
        let result = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(result)
    }

    /// Score the stored log of an existing result again, producing and storing a new result.
    /// The original result is left as it was.
    pub fn recompute(&self, id: &ResultId) -> Result<QuizResult, QuizServiceError> {
        let previous = self.get(id)?;
        let result = self.calculate(&previous.participant_name, &previous.responses)?;
        info!(previous = %previous.id, result_id = %result.id, "recomputed quiz result");
        Ok(result)
    }

    pub fn history(&self, participant_name: &str) -> Result<Vec<QuizResult>, QuizServiceError> {
        Ok(self.repository.for_participant(participant_name)?)
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("{error}")]
    Incomplete {
        #[source]
        error: ValidationError,
        report: CompletenessReport,
    },
    #[error("response {sequence_index} rejected: {error}")]
    InvalidResponse {
        sequence_index: u64,
        #[source]
        error: ValidationError,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
