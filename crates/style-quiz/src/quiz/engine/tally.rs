use tracing::debug;

use super::super::catalog::QuestionCatalog;
use super::super::domain::{Response, Style};
use super::super::validation::validate_normal_question;

/// Raw points per style plus the global selection counter value at each style's first pick.
///
/// `first_appearance` of `None` stands for "never selected" and orders after every counter
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleTally {
    pub points: [u32; Style::COUNT],
    pub first_appearance: [Option<u64>; Style::COUNT],
    pub counted_responses: usize,
}

impl StyleTally {
    fn empty() -> Self {
        Self {
            points: [0; Style::COUNT],
            first_appearance: [None; Style::COUNT],
            counted_responses: 0,
        }
    }

    pub fn points(&self, style: Style) -> u32 {
        self.points[style.index()]
    }

    pub fn first_appearance(&self, style: Style) -> Option<u64> {
        self.first_appearance[style.index()]
    }

    /// Widened so eight saturated slots still add up exactly.
    pub fn total_points(&self) -> u64 {
        self.points.iter().copied().map(u64::from).sum()
    }
}

/// Responses in ascending sequence index; equal indices keep their log order.
pub(crate) fn chronological(responses: &[Response]) -> Vec<&Response> {
    let mut ordered: Vec<&Response> = responses.iter().collect();
    ordered.sort_by_key(|response| response.sequence_index);
    ordered
}

pub(crate) fn tally_responses(responses: &[Response], catalog: &QuestionCatalog) -> StyleTally {
    let mut tally = StyleTally::empty();
    let mut counter: u64 = 0;

    for response in chronological(responses) {
        let Some(question) = catalog.question(&response.question_id) else {
            debug!(question_id = %response.question_id, "skipping response for unknown question");
            continue;
        };

        if !question.is_normal() {
            continue;
        }

        if !validate_normal_question(response, question) {
            debug!(
                question_id = %response.question_id,
                sequence_index = response.sequence_index,
                "skipping response that fails its selection contract"
            );
            continue;
        }

        for option_id in &response.selected_option_ids {
            // validated above: every selected option exists and carries a style
            let Some(option) = question.option(option_id) else {
                continue;
            };
            let Some(style) = option.style else {
                continue;
            };

            let slot = style.index();
            tally.points[slot] = tally.points[slot].saturating_add(option.point_value);
            if tally.first_appearance[slot].is_none() {
                tally.first_appearance[slot] = Some(counter);
            }
            counter += 1;
        }

        tally.counted_responses += 1;
    }

    tally
}
