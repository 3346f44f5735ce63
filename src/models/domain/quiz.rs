use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    explanation::ExplanationRecord,
    generation_request::{Difficulty, GameType, GenerationRequest},
    quiz_question::{QuizQuestion, ValidatedQuestion},
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub game_type: GameType,
    pub grade_level: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
    // Attached once, never invalidated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<ExplanationRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    /// Builds a new quiz from questions that already passed validation.
    pub fn from_generation(
        owner_id: &str,
        request: &GenerationRequest,
        questions: Vec<ValidatedQuestion>,
    ) -> Self {
        let now = Utc::now();
        Quiz {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: request.resolved_title(),
            description: request.resolved_description(),
            subject: request.subject.clone(),
            game_type: request.game_type,
            grade_level: request.grade_level.clone(),
            difficulty: request.difficulty,
            questions: questions.into_iter().map(QuizQuestion::from).collect(),
            explanations: None,
            score: None,
            time_taken: None,
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn incorrect_questions(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.questions.iter().filter(|q| q.is_incorrect())
    }
}
