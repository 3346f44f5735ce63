use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{ExplanationRecord, Quiz};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizCreatedResponse {
    pub quiz_id: String,
    pub message: String,
}

impl QuizCreatedResponse {
    pub fn new(quiz_id: String) -> Self {
        QuizCreatedResponse {
            message: format!("Quiz {} created", quiz_id),
            quiz_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationsResponse {
    pub explanations: Vec<ExplanationRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub quiz: Quiz,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginatedQuizzes {
    pub items: Vec<Quiz>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
