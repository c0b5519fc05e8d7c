//! Integration scenarios for the quiz scoring workflow.
//!
//! Scenarios drive the public facade only: a session records answers into a `ResponseLog`,
//! the service gates on completeness, and results come back as serializable snapshots.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use style_quiz::quiz::{
        QuestionCatalog, QuizResult, RepositoryError, ResultId, ResultRepository,
        SequentialResultIds, StyleQuizService,
    };

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        results: Mutex<HashMap<ResultId, QuizResult>>,
    }

    impl ResultRepository for MemoryRepository {
        fn insert(&self, result: QuizResult) -> Result<QuizResult, RepositoryError> {
            let mut guard = self.results.lock().expect("repository mutex poisoned");
            if guard.contains_key(&result.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(result.id.clone(), result.clone());
            Ok(result)
        }

        fn fetch(&self, id: &ResultId) -> Result<Option<QuizResult>, RepositoryError> {
            Ok(self
                .results
                .lock()
                .expect("repository mutex poisoned")
                .get(id)
                .cloned())
        }

        fn for_participant(
            &self,
            participant_name: &str,
        ) -> Result<Vec<QuizResult>, RepositoryError> {
            Ok(self
                .results
                .lock()
                .expect("repository mutex poisoned")
                .values()
                .filter(|result| result.participant_name == participant_name)
                .cloned()
                .collect())
        }
    }

    pub(super) fn service(
        catalog: QuestionCatalog,
    ) -> StyleQuizService<MemoryRepository, SequentialResultIds> {
        StyleQuizService::new(
            Arc::new(catalog),
            Arc::new(MemoryRepository::default()),
            Arc::new(SequentialResultIds::new("result")),
        )
    }
}

use std::io::{Cursor, Write};

use common::service;
use style_quiz::quiz::{
    CatalogError, ConsistencyError, QuestionCatalog, QuizResult, QuizServiceError,
    ResponseImporter, ResponseLog, Style, ValidationError,
};

#[test]
fn session_records_answers_and_scores_on_completion() {
    let catalog = QuestionCatalog::standard();
    let service = service(catalog.clone());
    let mut log = ResponseLog::new();

    for question in catalog.questions() {
        if question.is_normal() {
            let picks = [Style::Dramatic, Style::Sensual, Style::Classic]
                .map(|style| format!("{}-{}", question.id, style.key()));

            let progress = service.progress(log.responses());
            assert!(progress.answered_count < progress.total_count);

            log.record(question, picks).expect("valid answer accepted");
        } else {
            log.record(question, [question.options[0].id.0.clone()])
                .expect("strategic answer accepted");
        }
    }

    let handed_off = log.snapshot();
    let result = service
        .calculate("Ana Souza", &handed_off)
        .expect("complete log scores");

    assert_eq!(result.predominant_style, Style::Dramatic);
    assert_eq!(result.complementary_styles, [Style::Sensual, Style::Classic]);
    assert_eq!(result.responses, handed_off);
    assert_eq!(result.responses.len(), catalog.len());
    assert_eq!(service.progress(log.responses()).progress_percent, 100);
}

#[test]
fn session_blocks_until_a_corrected_answer_arrives() {
    let catalog = QuestionCatalog::standard();
    let question = &catalog.questions()[0];
    let mut log = ResponseLog::new();

    let error = log
        .record(question, ["q1-romantic", "q1-classic"])
        .expect_err("short answer rejected");
    assert_eq!(
        error.to_string(),
        "question q1 requires 3 selection(s), found 2"
    );

    let service = service(catalog.clone());
    match service.calculate("Bia", log.responses()) {
        Err(QuizServiceError::Incomplete {
            error: ValidationError::MissingResponses { question_ids },
            ..
        }) => assert_eq!(question_ids.len(), 10),
        other => panic!("expected incomplete log, got {other:?}"),
    }
}

#[test]
fn imported_csv_log_scores_like_a_live_session() {
    let mut csv = String::from("sequence_index,question_id,selected_option_ids\n");
    for question in 1..=10 {
        csv.push_str(&format!(
            "{},q{question},q{question}-creative|q{question}-elegant|q{question}-natural\n",
            question - 1
        ));
    }
    csv.push_str("10,s2,s2-1\n");

    let responses = ResponseImporter::from_csv_reader(Cursor::new(csv)).expect("csv parses");
    let result = service(QuestionCatalog::standard())
        .calculate("Cris", &responses)
        .expect("complete log scores");

    assert_eq!(result.predominant_style, Style::Creative);
    assert_eq!(result.complementary_styles, [Style::Elegant, Style::Natural]);
    let creative = result.score_for(Style::Creative).expect("creative scored");
    assert_eq!(creative.points, 10);
    assert_eq!(creative.percentage, 33);
}

#[test]
fn json_catalog_from_disk_drives_scoring() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    file.write_all(
        br#"{
            "questions": [
                {
                    "id": "look",
                    "title": "Pick two looks",
                    "kind": "normal",
                    "required_selections": 2,
                    "options": [
                        { "id": "look-a", "display_text": "Blazer", "style": "classic" },
                        { "id": "look-b", "display_text": "Linen", "style": "natural" },
                        { "id": "look-c", "display_text": "Sequins", "style": "dramatic" }
                    ]
                },
                {
                    "id": "budget",
                    "kind": "strategic",
                    "options": [ { "id": "low" }, { "id": "high" } ]
                }
            ]
        }"#,
    )
    .expect("write catalog");

    let catalog = QuestionCatalog::from_path(file.path()).expect("catalog loads");
    let mut log = ResponseLog::new();
    log.record(&catalog.questions()[0], ["look-c", "look-b"])
        .expect("two picks accepted");

    let result = service(catalog)
        .calculate("Dani", log.responses())
        .expect("scores");

    assert_eq!(result.predominant_style, Style::Dramatic);
    assert_eq!(result.complementary_styles, [Style::Natural, Style::Classic]);
    assert_eq!(result.total_normal_questions, 1);
}

#[test]
fn unknown_style_in_catalog_halts_before_scoring() {
    let json = r#"{ "questions": [ { "id": "q", "kind": "normal", "required_selections": 1,
        "options": [ { "id": "x", "style": "gothic" } ] } ] }"#;

    match QuestionCatalog::from_json_reader(Cursor::new(json)) {
        Err(CatalogError::Consistency(ConsistencyError::UnknownStyleReference { reference })) => {
            assert_eq!(reference, "gothic");
        }
        other => panic!("expected consistency error, got {other:?}"),
    }
}

#[test]
fn results_survive_a_json_round_trip() {
    let catalog = QuestionCatalog::standard();
    let responses = ResponseImporter::from_csv_reader(Cursor::new(
        "sequence_index,question_id,selected_option_ids\n0,q1,q1-elegant|q1-classic|q1-natural\n",
    ))
    .expect("csv parses");
    let result = style_quiz::quiz::ScoringEngine::new().calculate_result(
        &responses,
        &catalog,
        "Eva",
        &style_quiz::quiz::SequentialResultIds::new("result"),
    );

    let json = serde_json::to_string(&result).expect("serializes");
    let restored: QuizResult = serde_json::from_str(&json).expect("deserializes");

    assert_eq!(restored, result);
}
