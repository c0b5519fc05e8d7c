//! Selection-count contracts for individual responses.
//!
//! The boolean predicates are what the answering layer gates progression on. `check_response`
//! reports the specific defect so the caller can tell the participant what to fix. Nothing in
//! this module pads, truncates, or otherwise repairs a response.

use std::collections::HashSet;

use super::domain::{OptionId, Question, QuestionId, QuestionKind, Response};

/// User-correctable problems with a response or a response log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("question {question_id} requires {required} selection(s), found {found}")]
    WrongSelectionCount {
        question_id: QuestionId,
        required: usize,
        found: usize,
    },
    #[error("option {option_id} is not offered by question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error("option {option_id} of question {question_id} does not map to a style")]
    UnscoredOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error("option {option_id} was selected more than once for question {question_id}")]
    RepeatedSelection {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error("response for question {found} was checked against question {expected}")]
    QuestionMismatch {
        expected: QuestionId,
        found: QuestionId,
    },
    #[error("missing responses for question(s): {}", join_ids(.question_ids))]
    MissingResponses { question_ids: Vec<QuestionId> },
    #[error("question(s) answered more than once: {}", join_ids(.question_ids))]
    DuplicateResponses { question_ids: Vec<QuestionId> },
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// True iff the response answers `question`, carries exactly `required_selections` ids, names
/// no option twice, and every id maps to a styled option of the question. The repeated-id rule
/// is stricter than a plain count check: `[a, a, b]` has the right length but is rejected.
pub fn validate_normal_question(response: &Response, question: &Question) -> bool {
    response.question_id == question.id && check_normal(response, question).is_ok()
}

/// True iff the response carries exactly one selection.
pub fn validate_strategic_question(response: &Response) -> bool {
    response.selected_option_ids.len() == 1
}

/// Structured form of the predicates above, dispatching on the question kind.
pub fn check_response(response: &Response, question: &Question) -> Result<(), ValidationError> {
    if response.question_id != question.id {
        return Err(ValidationError::QuestionMismatch {
            expected: question.id.clone(),
            found: response.question_id.clone(),
        });
    }

    match question.kind {
        QuestionKind::Normal => check_normal(response, question),
        QuestionKind::Strategic => check_strategic(response, question),
    }
}

fn check_normal(response: &Response, question: &Question) -> Result<(), ValidationError> {
    check_count(response, question)?;

    let mut seen = HashSet::new();
    for option_id in &response.selected_option_ids {
        if !seen.insert(option_id) {
            return Err(ValidationError::RepeatedSelection {
                question_id: question.id.clone(),
                option_id: option_id.clone(),
            });
        }

        let option = question
            .option(option_id)
            .ok_or_else(|| ValidationError::UnknownOption {
                question_id: question.id.clone(),
                option_id: option_id.clone(),
            })?;

        if option.style.is_none() {
            return Err(ValidationError::UnscoredOption {
                question_id: question.id.clone(),
                option_id: option_id.clone(),
            });
        }
    }

    Ok(())
}

fn check_strategic(response: &Response, question: &Question) -> Result<(), ValidationError> {
    if !validate_strategic_question(response) {
        return Err(ValidationError::WrongSelectionCount {
            question_id: question.id.clone(),
            required: 1,
            found: response.selected_option_ids.len(),
        });
    }

    let option_id = &response.selected_option_ids[0];
    if question.option(option_id).is_none() {
        return Err(ValidationError::UnknownOption {
            question_id: question.id.clone(),
            option_id: option_id.clone(),
        });
    }

    Ok(())
}

fn check_count(response: &Response, question: &Question) -> Result<(), ValidationError> {
    let found = response.selected_option_ids.len();
    if found != question.required_selections {
        return Err(ValidationError::WrongSelectionCount {
            question_id: question.id.clone(),
            required: question.required_selections,
            found,
        });
    }
    Ok(())
}
