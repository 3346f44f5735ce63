use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::models::domain::QuizQuestion;

/// One entry of an explanation batch. Order within the batch is significant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplanationRequest {
    pub question: String,
    pub user_answer: String,
    pub answer: String,
}

impl From<&QuizQuestion> for ExplanationRequest {
    fn from(question: &QuizQuestion) -> Self {
        ExplanationRequest {
            question: question.question.clone(),
            user_answer: question
                .user_answer
                .clone()
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| "no answer".to_string()),
            answer: question.answer.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct ExplanationRecord {
    pub question: String,
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_answer_is_described_explicitly() {
        let question = QuizQuestion {
            id: "q-1".to_string(),
            question: "Capital of France?".to_string(),
            answer: "Paris".to_string(),
            options: vec![],
            is_correct: Some(false),
            user_answer: None,
        };

        let request = ExplanationRequest::from(&question);
        assert_eq!(request.user_answer, "no answer");
        assert_eq!(request.answer, "Paris");
    }
}
