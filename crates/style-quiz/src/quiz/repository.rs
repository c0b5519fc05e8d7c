use serde::Serialize;

use super::domain::{QuizResult, ResultId, Style};

/// Storage abstraction for computed results so the service can be exercised in isolation.
pub trait ResultRepository: Send + Sync {
    fn insert(&self, result: QuizResult) -> Result<QuizResult, RepositoryError>;
    fn fetch(&self, id: &ResultId) -> Result<Option<QuizResult>, RepositoryError>;
    fn for_participant(&self, participant_name: &str) -> Result<Vec<QuizResult>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("result already exists")]
    Conflict,
    #[error("result not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Presentation-ready summary of a stored result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummaryView {
    pub result_id: ResultId,
    pub participant_name: String,
    pub predominant: StyleBadge,
    pub complementary: Vec<StyleBadge>,
    pub response_count: usize,
    pub total_normal_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleBadge {
    pub style: Style,
    pub label: &'static str,
    pub points: u32,
    pub percentage: u8,
}

impl QuizResult {
    pub fn summary_view(&self) -> ResultSummaryView {
        let badge = |style: Style| {
            let (points, percentage) = self
                .score_for(style)
                .map(|score| (score.points, score.percentage))
                .unwrap_or((0, 0));
            StyleBadge {
                style,
                label: style.label(),
                points,
                percentage,
            }
        };

        ResultSummaryView {
            result_id: self.id.clone(),
            participant_name: self.participant_name.clone(),
            predominant: badge(self.predominant_style),
            complementary: self.complementary_styles.iter().copied().map(badge).collect(),
            response_count: self.responses.len(),
            total_normal_questions: self.total_normal_questions,
        }
    }
}
