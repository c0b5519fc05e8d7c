use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::domain::{
    OptionId, Question, QuestionId, QuestionKind, QuestionOption, Style, DEFAULT_POINT_VALUE,
};

pub const DEFAULT_NORMAL_SELECTIONS: usize = 3;
pub const STRATEGIC_SELECTIONS: usize = 1;
/// Largest weight a single option may carry.
pub const MAX_POINT_VALUE: u32 = 1_000;

/// Content defects in a catalog. These halt processing; nothing is guessed or remapped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("unknown style reference '{reference}'")]
    UnknownStyleReference { reference: String },
    #[error("question {question_id} appears more than once in the catalog")]
    DuplicateQuestion { question_id: QuestionId },
    #[error("question {question_id} lists option {option_id} more than once")]
    DuplicateOption {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error("option {option_id} of scoring question {question_id} has no style")]
    MissingStyle {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error("option {option_id} of strategic question {question_id} must not carry a style")]
    UnexpectedStyle {
        question_id: QuestionId,
        option_id: OptionId,
    },
    #[error(
        "option {option_id} of question {question_id} is worth {point_value} points (limit {limit})",
        limit = MAX_POINT_VALUE
    )]
    PointValueOutOfRange {
        question_id: QuestionId,
        option_id: OptionId,
        point_value: u32,
    },
    #[error(
        "{kind:?} question {question_id} requires {required} selection(s) but offers {available} option(s)"
    )]
    SelectionContract {
        question_id: QuestionId,
        kind: QuestionKind,
        required: usize,
        available: usize,
    },
}

/// Failure while loading a catalog from an external source.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inconsistent question catalog: {0}")]
    Consistency(#[from] ConsistencyError),
}

/// Ordered, consistency-checked list of questions. Static per funnel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, ConsistencyError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(&question.id) {
                return Err(ConsistencyError::DuplicateQuestion {
                    question_id: question.id.clone(),
                });
            }
            check_question(question)?;
        }

        Ok(Self { questions })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        let questions = document
            .questions
            .into_iter()
            .map(RawQuestion::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(questions)?)
    }

    /// Built-in catalog: ten three-pick scoring questions and two segmentation questions.
    pub fn standard() -> Self {
        let mut questions: Vec<Question> = STANDARD_TOPICS
            .iter()
            .enumerate()
            .map(|(position, (title, noun))| {
                let question_id = format!("q{}", position + 1);
                let options = Style::ALL
                    .into_iter()
                    .map(|style| {
                        QuestionOption::scoring(
                            format!("{question_id}-{}", style.key()),
                            format!("{} {noun}", style.label()),
                            style,
                        )
                    })
                    .collect();

                Question {
                    id: QuestionId(question_id),
                    title: (*title).to_string(),
                    kind: QuestionKind::Normal,
                    required_selections: DEFAULT_NORMAL_SELECTIONS,
                    options,
                }
            })
            .collect();

        questions.push(strategic(
            "s1",
            "How do you feel about your current wardrobe?",
            &[
                "I have plenty of clothes but nothing feels like me",
                "I mostly repeat the same outfits",
                "I like what I own but want to refine it",
            ],
        ));
        questions.push(strategic(
            "s2",
            "What would help you most right now?",
            &[
                "A guide to my predominant style",
                "Knowing which pieces to buy next",
                "Combining what I already own",
            ],
        ));

        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn normal_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|question| question.is_normal())
    }

    pub fn total_normal_questions(&self) -> usize {
        self.normal_questions().count()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

const STANDARD_TOPICS: [(&str, &str); 10] = [
    ("What kind of clothing do you prefer?", "clothing"),
    ("Which words best describe your personality?", "personality"),
    ("Which look would you wear on a weekend?", "weekend look"),
    ("Which prints catch your eye?", "prints"),
    ("Which coat would you choose?", "coat"),
    ("Which trousers feel most like you?", "trousers"),
    ("Which shoes do you reach for first?", "shoes"),
    ("Which accessories complete your outfit?", "accessories"),
    ("Which fabrics do you enjoy wearing?", "fabrics"),
    ("How do you like to wear your hair?", "hairstyle"),
];

fn strategic(id: &str, title: &str, answers: &[&str]) -> Question {
    let options = answers
        .iter()
        .enumerate()
        .map(|(position, text)| {
            QuestionOption::segmenting(format!("{id}-{}", position + 1), *text)
        })
        .collect();

    Question {
        id: QuestionId::new(id),
        title: title.to_string(),
        kind: QuestionKind::Strategic,
        required_selections: STRATEGIC_SELECTIONS,
        options,
    }
}

fn check_question(question: &Question) -> Result<(), ConsistencyError> {
    let available = question.options.len();
    let contract_holds = match question.kind {
        QuestionKind::Normal => {
            question.required_selections > 0 && question.required_selections <= available
        }
        QuestionKind::Strategic => {
            question.required_selections == STRATEGIC_SELECTIONS && available > 0
        }
    };
    if !contract_holds {
        return Err(ConsistencyError::SelectionContract {
            question_id: question.id.clone(),
            kind: question.kind,
            required: question.required_selections,
            available,
        });
    }

    let mut seen = HashSet::new();
    for option in &question.options {
        if !seen.insert(&option.id) {
            return Err(ConsistencyError::DuplicateOption {
                question_id: question.id.clone(),
                option_id: option.id.clone(),
            });
        }

        match (question.kind, option.style) {
            (QuestionKind::Normal, None) => {
                return Err(ConsistencyError::MissingStyle {
                    question_id: question.id.clone(),
                    option_id: option.id.clone(),
                });
            }
            (QuestionKind::Strategic, Some(_)) => {
                return Err(ConsistencyError::UnexpectedStyle {
                    question_id: question.id.clone(),
                    option_id: option.id.clone(),
                });
            }
            _ => {}
        }

        if option.point_value > MAX_POINT_VALUE {
            return Err(ConsistencyError::PointValueOutOfRange {
                question_id: question.id.clone(),
                option_id: option.id.clone(),
                point_value: option.point_value,
            });
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: String,
    #[serde(default)]
    title: String,
    kind: QuestionKind,
    #[serde(default)]
    required_selections: Option<usize>,
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    id: String,
    #[serde(default)]
    display_text: String,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    point_value: Option<u32>,
}

impl RawQuestion {
    fn into_question(self) -> Result<Question, ConsistencyError> {
        let required_selections = self.required_selections.unwrap_or(match self.kind {
            QuestionKind::Normal => DEFAULT_NORMAL_SELECTIONS,
            QuestionKind::Strategic => STRATEGIC_SELECTIONS,
        });

        let mut options = Vec::with_capacity(self.options.len());
        for raw in self.options {
            let style = match raw.style.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(reference) => Some(reference.parse::<Style>().map_err(|err| {
                    warn!(
                        question_id = %self.id,
                        option_id = %raw.id,
                        reference,
                        "catalog option references an unknown style"
                    );
                    err
                })?),
            };
            let point_value = raw.point_value.unwrap_or(if style.is_some() {
                DEFAULT_POINT_VALUE
            } else {
                0
            });

            options.push(QuestionOption {
                id: OptionId(raw.id),
                display_text: raw.display_text,
                style,
                point_value,
            });
        }

        Ok(Question {
            id: QuestionId(self.id),
            title: self.title,
            kind: self.kind,
            required_selections,
            options,
        })
    }
}
