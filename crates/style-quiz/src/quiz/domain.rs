use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::ConsistencyError;

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for the options of a question.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(pub String);

impl OptionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for computed results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub String);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of styles a participant can be profiled into.
///
/// Declaration order is the canonical order and acts as the last tie-break when two styles
/// share both points and first appearance (only possible when neither was ever selected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Natural,
    Classic,
    Contemporary,
    Elegant,
    Romantic,
    Sensual,
    Dramatic,
    Creative,
}

impl Style {
    pub const COUNT: usize = 8;

    pub const ALL: [Style; Style::COUNT] = [
        Style::Natural,
        Style::Classic,
        Style::Contemporary,
        Style::Elegant,
        Style::Romantic,
        Style::Sensual,
        Style::Dramatic,
        Style::Creative,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Style::Natural => "natural",
            Style::Classic => "classic",
            Style::Contemporary => "contemporary",
            Style::Elegant => "elegant",
            Style::Romantic => "romantic",
            Style::Sensual => "sensual",
            Style::Dramatic => "dramatic",
            Style::Creative => "creative",
        }
    }

    /// Position in the canonical declaration order.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Style {
    type Err = ConsistencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.key() == normalized)
            .ok_or_else(|| ConsistencyError::UnknownStyleReference {
                reference: value.to_string(),
            })
    }
}

/// Whether a question feeds the style tally or only collects segmentation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Normal,
    Strategic,
}

pub const DEFAULT_POINT_VALUE: u32 = 1;

/// A selectable answer. Options of strategic questions carry no style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub display_text: String,
    pub style: Option<Style>,
    pub point_value: u32,
}

impl QuestionOption {
    pub fn scoring(id: impl Into<String>, display_text: impl Into<String>, style: Style) -> Self {
        Self {
            id: OptionId::new(id),
            display_text: display_text.into(),
            style: Some(style),
            point_value: DEFAULT_POINT_VALUE,
        }
    }

    pub fn segmenting(id: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(id),
            display_text: display_text.into(),
            style: None,
            point_value: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub kind: QuestionKind,
    pub required_selections: usize,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn is_normal(&self) -> bool {
        self.kind == QuestionKind::Normal
    }

    pub fn option(&self, id: &OptionId) -> Option<&QuestionOption> {
        self.options.iter().find(|option| &option.id == id)
    }
}

/// One submitted answer. `sequence_index` is assigned by the collecting layer and orders the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub selected_option_ids: Vec<OptionId>,
    pub sequence_index: u64,
}

impl Response {
    pub fn new<I, S>(question_id: impl Into<String>, selected: I, sequence_index: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: QuestionId::new(question_id),
            selected_option_ids: selected.into_iter().map(OptionId::new).collect(),
            sequence_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleScore {
    pub style: Style,
    pub points: u32,
    pub percentage: u8,
    pub rank: u8,
}

/// Immutable snapshot produced once per calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: ResultId,
    pub participant_name: String,
    pub responses: Vec<Response>,
    pub style_scores: Vec<StyleScore>,
    pub predominant_style: Style,
    pub complementary_styles: [Style; 2],
    pub total_normal_questions: usize,
    pub calculated_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn score_for(&self, style: Style) -> Option<&StyleScore> {
        self.style_scores.iter().find(|score| score.style == style)
    }

    /// Ranking-relevant fields, used to compare two calculations over the same log.
    pub fn ranking(&self) -> (&[StyleScore], Style, [Style; 2]) {
        (
            &self.style_scores,
            self.predominant_style,
            self.complementary_styles,
        )
    }
}
