use super::domain::{OptionId, Question, Response};
use super::validation::{check_response, ValidationError};

/// Append-only response log that only admits responses passing their selection contract.
///
/// Sequence indices are assigned here, monotonically, so the log order is the order in which
/// the participant answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLog {
    responses: Vec<Response>,
    next_sequence: u64,
}

impl ResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the selection against `question` and append it. Rejected selections leave the
    /// log untouched.
    pub fn record<I, S>(&mut self, question: &Question, selected: I) -> Result<&Response, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let response = Response {
            question_id: question.id.clone(),
            selected_option_ids: selected
                .into_iter()
                .map(|id| OptionId(id.into()))
                .collect(),
            sequence_index: self.next_sequence,
        };
        check_response(&response, question)?;

        self.next_sequence += 1;
        self.responses.push(response);
        Ok(&self.responses[self.responses.len() - 1])
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Owned copy of the log for handing to other layers.
    pub fn snapshot(&self) -> Vec<Response> {
        self.responses.clone()
    }
}
