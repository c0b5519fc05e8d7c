use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use style_quiz::config::ScoringConfig;
use style_quiz::error::AppError;
use style_quiz::quiz::{
    QuestionCatalog, QuizResult, RepositoryError, ResultId, ResultRepository,
    SequentialResultIds, StyleQuizService,
};
use tracing::info;

pub(crate) type CliQuizService = StyleQuizService<InMemoryResultRepository, SequentialResultIds>;

#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    results: Arc<Mutex<HashMap<ResultId, QuizResult>>>,
}

impl ResultRepository for InMemoryResultRepository {
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
        results.sort_by(|a, b| a.calculated_at.cmp(&b.calculated_at).then(a.id.0.cmp(&b.id.0)));
        Ok(results)
    }
}

/// Catalog precedence: `--catalog`, then `QUIZ_CATALOG_PATH`, then the built-in standard set.
pub(crate) fn load_catalog(
    flag: Option<PathBuf>,
    config: &ScoringConfig,
) -> Result<QuestionCatalog, AppError> {
    match flag.or_else(|| config.catalog_path.clone()) {
        Some(path) => {
            let catalog = QuestionCatalog::from_path(&path)?;
            info!(path = %path.display(), questions = catalog.len(), "loaded question catalog");
            Ok(catalog)
        }
        None => Ok(QuestionCatalog::standard()),
    }
}

pub(crate) fn build_service(catalog: QuestionCatalog, config: &ScoringConfig) -> CliQuizService {
    StyleQuizService::new(
        Arc::new(catalog),
        Arc::new(InMemoryResultRepository::default()),
        Arc::new(SequentialResultIds::new(config.result_prefix.clone())),
    )
}
