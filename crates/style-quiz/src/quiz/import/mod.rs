mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::Response;

#[derive(Debug)]
pub enum ResponseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    BlankCell { line: u64, column: &'static str },
    EmptyOptionId { line: u64, position: usize },
}

impl std::fmt::Display for ResponseImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseImportError::Io(err) => write!(f, "failed to read response export: {}", err),
            ResponseImportError::Csv(err) => write!(f, "invalid response CSV data: {}", err),
            ResponseImportError::Json(err) => write!(f, "invalid response JSON data: {}", err),
            ResponseImportError::BlankCell { line, column } => {
                write!(f, "line {line}: column '{column}' must not be blank")
            }
            ResponseImportError::EmptyOptionId { line, position } => {
                write!(f, "line {line}: selected option #{position} is empty")
            }
        }
    }
}

impl std::error::Error for ResponseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseImportError::Io(err) => Some(err),
            ResponseImportError::Csv(err) => Some(err),
            ResponseImportError::Json(err) => Some(err),
            ResponseImportError::BlankCell { .. } | ResponseImportError::EmptyOptionId { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for ResponseImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResponseImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for ResponseImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads an exported response log. Rows are taken as-is: validation and ordering stay with the
/// scoring engine.
pub struct ResponseImporter;

impl ResponseImporter {
    /// Dispatches on the file extension: `.json` holds an array of responses, anything else is
    /// read as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Response>, ResponseImportError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let file = std::fs::File::open(path)?;
        if is_json {
            Self::from_json_reader(file)
        } else {
            Self::from_csv_reader(file)
        }
    }

    /// CSV with `sequence_index,question_id,selected_option_ids`; option ids are `|`-separated.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
        parser::parse_responses(reader)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Response>, ResponseImportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn option_ids_are_trimmed() {
        let csv = "sequence_index,question_id,selected_option_ids\n\
0,q1,\" q1-classic | q1-natural|q1-elegant \"\n";

        let responses = ResponseImporter::from_csv_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(
            responses[0],
            Response::new("q1", ["q1-classic", "q1-natural", "q1-elegant"], 0)
        );
    }

    #[test]
    fn empty_option_segment_fails_the_row() {
        let csv = "sequence_index,question_id,selected_option_ids\n\
0,q1,q1-elegant|q1-classic|q1-natural\n\
1,q2,q2-classic||q2-natural|q2-elegant\n";

        match ResponseImporter::from_csv_reader(Cursor::new(csv)) {
            Err(error @ ResponseImportError::EmptyOptionId { .. }) => {
                assert_eq!(error.to_string(), "line 3: selected option #2 is empty");
            }
            other => panic!("expected empty option error, got {other:?}"),
        }
    }

    #[test]
    fn trailing_separator_is_an_empty_option() {
        let csv = "sequence_index,question_id,selected_option_ids\n0,s1,s1-2|\n";

        assert!(matches!(
            ResponseImporter::from_csv_reader(Cursor::new(csv)),
            Err(ResponseImportError::EmptyOptionId {
                line: 2,
                position: 2
            })
        ));
    }

    #[test]
    fn csv_rows_become_responses() {
        let csv = "sequence_index,question_id,selected_option_ids\n\
0,q1,q1-elegant|q1-classic|q1-natural\n\
1, s1 ,s1-2\n";

        let responses = ResponseImporter::from_csv_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0], Response::new("q1", ["q1-elegant", "q1-classic", "q1-natural"], 0));
        assert_eq!(responses[1].question_id.0, "s1");
        assert_eq!(responses[1].sequence_index, 1);
    }

    #[test]
    fn short_selections_are_kept_verbatim_for_the_engine_to_reject() {
        let csv = "sequence_index,question_id,selected_option_ids\n3,q2,q2-romantic|q2-classic\n";

        let responses = ResponseImporter::from_csv_reader(Cursor::new(csv)).expect("parses");

        assert_eq!(responses[0].selected_option_ids.len(), 2);
    }

    #[test]
    fn blank_question_cell_reports_its_line() {
        let csv = "sequence_index,question_id,selected_option_ids\n0,q1,a|b|c\n1,,a\n";

        match ResponseImporter::from_csv_reader(Cursor::new(csv)) {
            Err(ResponseImportError::BlankCell { line, column }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "question_id");
            }
            other => panic!("expected blank cell error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_sequence_index_is_a_csv_error() {
        let csv = "sequence_index,question_id,selected_option_ids\nfirst,q1,a|b|c\n";
        assert!(matches!(
            ResponseImporter::from_csv_reader(Cursor::new(csv)),
            Err(ResponseImportError::Csv(_))
        ));
    }

    #[test]
    fn from_path_reads_json_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        let responses = vec![Response::new("q1", ["q1-classic", "q1-romantic", "q1-natural"], 0)];
        file.write_all(&serde_json::to_vec(&responses).expect("serializes"))
            .expect("write");

        let loaded = ResponseImporter::from_path(file.path()).expect("loads");
        assert_eq!(loaded, responses);
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = ResponseImporter::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, ResponseImportError::Io(_)));
    }
}
