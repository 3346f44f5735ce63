use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{Difficulty, GameType, GenerationRequest};

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct GenerateQuizRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[serde(alias = "num")]
    #[validate(range(min = 1, max = 50))]
    pub count: u16,

    pub difficulty: Difficulty,

    #[validate(length(min = 1, max = 100))]
    pub grade_level: String,

    pub game_type: GameType,

    #[validate(length(max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<GenerateQuizRequestDto> for GenerationRequest {
    fn from(dto: GenerateQuizRequestDto) -> Self {
        GenerationRequest {
            subject: dto.subject.trim().to_string(),
            count: dto.count,
            difficulty: dto.difficulty,
            grade_level: dto.grade_level.trim().to_string(),
            game_type: dto.game_type,
            title: dto.title,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct UpdateQuizRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
pub struct QuestionOutcomeInput {
    pub question_id: String,
    pub is_correct: bool,
    pub user_answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct RecordOutcomesRequestDto {
    #[validate(range(min = 0))]
    pub score: Option<i32>,

    #[validate(range(min = 0))]
    pub time_taken: Option<i64>,

    pub questions: Vec<QuestionOutcomeInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct ShareQuizRequestDto {
    #[validate(length(min = 1, max = 128))]
    pub sender_id: String,

    #[validate(length(min = 1, max = 128))]
    pub receiver_id: String,

    #[validate(length(min = 1))]
    pub quiz_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
