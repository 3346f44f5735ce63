#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        Difficulty, GameType, GenerationRequest, Quiz, QuizQuestion, ValidatedQuestion,
    };

    /// Model reply wrapping a well-formed two question mcq array in prose.
    pub const MCQ_COMPLETION: &str = r#"Here is your quiz:
[
  {"question": "Which planet is the largest?", "answer": "Jupiter", "options": ["Mars", "Jupiter", "Venus", "Earth"]},
  {"question": "Which planet is known as the red planet?", "answer": "Mars", "options": ["Mars", "Saturn", "Mercury", "Neptune"]}
]
Good luck!"#;

    pub const OPEN_ENDED_COMPLETION: &str = r#"[
  {"question": "What do producers do in an ecosystem?", "answer": "They make food from sunlight"},
  {"question": "Name one decomposer.", "answer": "Fungi"}
]"#;

    pub fn generation_request() -> GenerationRequest {
        GenerationRequest::new("planets", 2, Difficulty::Easy, "3rd grade", GameType::Mcq)
    }

    /// Freshly generated quiz with id `quiz-1` and two unanswered questions.
    pub fn stored_quiz(owner_id: &str) -> Quiz {
        let questions = vec![
            ValidatedQuestion {
                question: "Which planet is the largest?".to_string(),
                answer: "Jupiter".to_string(),
                options: vec!["Mars".into(), "Jupiter".into(), "Venus".into(), "Earth".into()],
            },
            ValidatedQuestion {
                question: "Which planet is known as the red planet?".to_string(),
                answer: "Mars".to_string(),
                options: vec!["Mars".into(), "Saturn".into(), "Mercury".into(), "Neptune".into()],
            },
        ];

        let mut quiz = Quiz::from_generation(owner_id, &generation_request(), questions);
        quiz.id = "quiz-1".to_string();
        quiz
    }

    /// Three answered questions, the first two of them wrong.
    pub fn answered_quiz(owner_id: &str) -> Quiz {
        let mut quiz = stored_quiz(owner_id);
        quiz.questions[0].is_correct = Some(false);
        quiz.questions[0].user_answer = Some("Earth".to_string());
        quiz.questions[1].is_correct = Some(false);
        quiz.questions[1].user_answer = Some("Saturn".to_string());
        quiz.questions.push(QuizQuestion {
            id: "q-3".to_string(),
            question: "Which planet has the most visible rings?".to_string(),
            answer: "Saturn".to_string(),
            options: vec!["Saturn".into(), "Mars".into(), "Venus".into(), "Earth".into()],
            is_correct: Some(true),
            user_answer: Some("Saturn".to_string()),
        });
        quiz.score = Some(1);
        quiz
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::{payload_extractor::PayloadExtractor, schema_validator::SchemaValidator};

    #[test]
    fn test_fixture_completions_are_valid() {
        let value = PayloadExtractor::extract(MCQ_COMPLETION).unwrap();
        assert_eq!(
            SchemaValidator::validate_questions(&value, crate::models::domain::GameType::Mcq)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_answered_quiz_has_two_incorrect() {
        let quiz = answered_quiz("owner-1");
        assert_eq!(quiz.incorrect_questions().count(), 2);
    }
}
