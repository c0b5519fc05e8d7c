use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{OptionId, QuestionId, Response};
use super::ResponseImportError;

pub(crate) const OPTION_SEPARATOR: char = '|';

#[derive(Debug, Deserialize)]
struct ResponseRow {
    sequence_index: u64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    question_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    selected_option_ids: Option<String>,
}

pub(crate) fn parse_responses<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut responses = Vec::new();

    for (position, record) in csv_reader.deserialize::<ResponseRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = position as u64 + 2;

        let question_id = row.question_id.ok_or(ResponseImportError::BlankCell {
            line,
            column: "question_id",
        })?;
        let selections = row.selected_option_ids.ok_or(ResponseImportError::BlankCell {
            line,
            column: "selected_option_ids",
        })?;

        responses.push(Response {
            question_id: QuestionId(question_id),
            selected_option_ids: split_options(&selections, line)?,
            sequence_index: row.sequence_index,
        });
    }

    Ok(responses)
}

/// Splits on `|` and trims each id. An empty segment (`a||b`, a trailing `|`) fails the row.
fn split_options(raw: &str, line: u64) -> Result<Vec<OptionId>, ResponseImportError> {
    raw.split(OPTION_SEPARATOR)
        .map(str::trim)
        .enumerate()
        .map(|(index, id)| {
            if id.is_empty() {
                Err(ResponseImportError::EmptyOptionId {
                    line,
                    position: index + 1,
                })
            } else {
                Ok(OptionId(id.to_string()))
            }
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
