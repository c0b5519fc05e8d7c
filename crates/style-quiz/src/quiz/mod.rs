//! Style quiz scoring: catalog, response validation, tally, ranking, and result assembly.
//!
//! Data flows one way. A question catalog and a response log go through validation, the
//! style tally, and ranking before being assembled into an immutable `QuizResult`. Nothing in
//! this module mutates its inputs.

pub mod catalog;
pub mod completeness;
pub mod domain;
pub mod engine;
pub mod import;
pub mod log;
pub mod progress;
pub mod repository;
pub mod service;
pub mod styles;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ConsistencyError, QuestionCatalog};
pub use completeness::{validate_completeness, CompletenessReport};
pub use domain::{
    OptionId, Question, QuestionId, QuestionKind, QuestionOption, QuizResult, Response, ResultId,
    Style, StyleScore,
};
pub use engine::{ResultIdSource, ScoringEngine, SequentialResultIds, PERCENTAGE_SUM_TOLERANCE};
pub use import::{ResponseImportError, ResponseImporter};
pub use log::ResponseLog;
pub use progress::{progress_snapshot, ProgressSnapshot};
pub use repository::{RepositoryError, ResultRepository, ResultSummaryView, StyleBadge};
pub use service::{QuizServiceError, StyleQuizService};
pub use styles::StyleProfile;
pub use validation::{
    check_response, validate_normal_question, validate_strategic_question, ValidationError,
};
