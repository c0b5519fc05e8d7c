use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::quiz::catalog::QuestionCatalog;
use crate::quiz::domain::{QuizResult, Response, ResultId, Style};
use crate::quiz::engine::SequentialResultIds;
use crate::quiz::repository::{RepositoryError, ResultRepository};
use crate::quiz::service::StyleQuizService;

pub(super) fn catalog() -> QuestionCatalog {
    QuestionCatalog::standard()
}

/// Response to standard question `q{question}` picking `styles` in the given order.
pub(super) fn answer(question: usize, styles: &[Style], sequence_index: u64) -> Response {
    Response::new(
        format!("q{question}"),
        styles
            .iter()
            .map(|style| format!("q{question}-{}", style.key())),
        sequence_index,
    )
}

/// Nine answers where elegant and classic both reach four points; elegant is picked first.
pub(super) fn scenario_a_log() -> Vec<Response> {
    use Style::*;
    let picks: [[Style; 3]; 9] = [
        [Elegant, Classic, Natural],
        [Classic, Romantic, Sensual],
        [Elegant, Dramatic, Creative],
        [Classic, Contemporary, Natural],
        [Elegant, Romantic, Sensual],
        [Classic, Dramatic, Creative],
        [Elegant, Contemporary, Natural],
        [Romantic, Sensual, Dramatic],
        [Natural, Creative, Contemporary],
    ];

    picks
        .iter()
        .enumerate()
        .map(|(position, styles)| answer(position + 1, styles, position as u64))
        .collect()
}

/// Answers every scoring question of the standard catalog, plus one strategic answer.
pub(super) fn complete_log() -> Vec<Response> {
    use Style::*;
    let mut responses: Vec<Response> = (1..=10)
        .map(|question| {
            let styles = if question % 2 == 0 {
                [Romantic, Elegant, Classic]
            } else {
                [Romantic, Natural, Creative]
            };
            answer(question, &styles, question as u64)
        })
        .collect();
    responses.push(Response::new("s1", ["s1-2"], 11));
    responses
}

pub(super) fn build_service() -> (
    StyleQuizService<MemoryResultRepository, SequentialResultIds>,
    Arc<MemoryResultRepository>,
) {
    let repository = Arc::new(MemoryResultRepository::default());
    let service = StyleQuizService::new(
        Arc::new(catalog()),
        repository.clone(),
        Arc::new(SequentialResultIds::new("result")),
    );
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryResultRepository {
    pub(super) results: Arc<Mutex<HashMap<ResultId, QuizResult>>>,
}

impl ResultRepository for MemoryResultRepository {
    fn insert(&self, result: QuizResult) -> Result<QuizResult, RepositoryError> {
        let mut guard = self.results.lock().expect("repository mutex poisoned");
        if guard.contains_key(&result.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(result.id.clone(), result.clone());
        Ok(result)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<QuizResult>, RepositoryError> {
        let guard = self.results.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_participant(&self, participant_name: &str) -> Result<Vec<QuizResult>, RepositoryError> {
        let guard = self.results.lock().expect("repository mutex poisoned");
        let mut results: Vec<QuizResult> = guard
            .values()
            .filter(|result| result.participant_name == participant_name)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(results)
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn insert(&self, _result: QuizResult) -> Result<QuizResult, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResultId) -> Result<Option<QuizResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_participant(&self, _participant_name: &str) -> Result<Vec<QuizResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
