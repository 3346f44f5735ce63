use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question record that passed schema validation. For open ended
/// questions `options` is empty.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidatedQuestion {
    pub question: String,
    pub answer: String,
    pub options: Vec<String>,
}

/// A stored question plus the learner's outcome once answered.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}

impl QuizQuestion {
    /// Unanswered questions count as incorrect.
    pub fn is_incorrect(&self) -> bool {
        self.is_correct != Some(true)
    }
}

impl From<ValidatedQuestion> for QuizQuestion {
    fn from(record: ValidatedQuestion) -> Self {
        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            question: record.question,
            answer: record.answer,
            options: record.options,
            is_correct: None,
            user_answer: None,
        }
    }
}
