use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::catalog::QuestionCatalog;
use super::domain::{QuestionId, Response};

/// Outcome of checking a response log against a catalog's scoring questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub is_valid: bool,
    pub missing_question_ids: Vec<QuestionId>,
    /// Scoring questions answered more than once.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_question_ids: Vec<QuestionId>,
}

/// Every normal question must be answered exactly once. Strategic questions are optional.
pub fn validate_completeness(
    responses: &[Response],
    catalog: &QuestionCatalog,
) -> CompletenessReport {
    let mut answers: HashMap<&QuestionId, usize> = HashMap::new();
    for response in responses {
        *answers.entry(&response.question_id).or_default() += 1;
    }

    let mut missing_question_ids = Vec::new();
    let mut duplicate_question_ids = Vec::new();
    for question in catalog.normal_questions() {
        match answers.get(&question.id).copied().unwrap_or(0) {
            0 => missing_question_ids.push(question.id.clone()),
            1 => {}
            _ => duplicate_question_ids.push(question.id.clone()),
        }
    }

    CompletenessReport {
        is_valid: missing_question_ids.is_empty() && duplicate_question_ids.is_empty(),
        missing_question_ids,
        duplicate_question_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::domain::Style;

    fn full_log(catalog: &QuestionCatalog) -> Vec<Response> {
        catalog
            .normal_questions()
            .enumerate()
            .map(|(position, question)| {
                let picks = [Style::Classic, Style::Natural, Style::Elegant]
                    .map(|style| format!("{}-{}", question.id, style.key()));
                Response::new(question.id.0.clone(), picks, position as u64)
            })
            .collect()
    }

    #[test]
    fn complete_log_is_valid_without_strategic_answers() {
        let catalog = QuestionCatalog::standard();
        let report = validate_completeness(&full_log(&catalog), &catalog);

        assert!(report.is_valid);
        assert!(report.missing_question_ids.is_empty());
        assert!(report.duplicate_question_ids.is_empty());
    }

    #[test]
    fn missing_questions_are_listed_in_catalog_order() {
        let catalog = QuestionCatalog::standard();
        let mut responses = full_log(&catalog);
        responses.retain(|response| response.question_id.0 != "q4" && response.question_id.0 != "q9");

        let report = validate_completeness(&responses, &catalog);

        assert!(!report.is_valid);
        assert_eq!(
            report.missing_question_ids,
            vec![QuestionId::new("q4"), QuestionId::new("q9")]
        );
    }

    #[test]
    fn answering_a_question_twice_invalidates_the_log() {
        let catalog = QuestionCatalog::standard();
        let mut responses = full_log(&catalog);
        let mut repeat = responses[0].clone();
        repeat.sequence_index = 99;
        responses.push(repeat);

        let report = validate_completeness(&responses, &catalog);

        assert!(!report.is_valid);
        assert!(report.missing_question_ids.is_empty());
        assert_eq!(report.duplicate_question_ids, vec![QuestionId::new("q1")]);
    }

    #[test]
    fn empty_log_misses_every_normal_question() {
        let catalog = QuestionCatalog::standard();
        let report = validate_completeness(&[], &catalog);
        assert_eq!(report.missing_question_ids.len(), 10);
    }
}
