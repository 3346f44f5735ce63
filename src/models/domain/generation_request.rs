use async_graphql::Enum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Mcq,       // Four options per question
    OpenEnded, // Free-text answer, no options
}

impl GameType {
    /// Label used inside prompt text.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            GameType::Mcq => "mcq",
            GameType::OpenEnded => "open ended",
        }
    }
}

/// Immutable input to a quiz generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject: String,
    pub count: u16,
    pub difficulty: Difficulty,
    pub grade_level: String,
    pub game_type: GameType,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl GenerationRequest {
    pub fn new(
        subject: &str,
        count: u16,
        difficulty: Difficulty,
        grade_level: &str,
        game_type: GameType,
    ) -> Self {
        GenerationRequest {
            subject: subject.to_string(),
            count,
            difficulty,
            grade_level: grade_level.to_string(),
            game_type,
            title: None,
            description: None,
        }
    }

    pub fn resolved_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.subject.clone(),
        }
    }

    pub fn resolved_description(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!(
                "Studyset for {} at {} difficulty level for grade {}",
                self.subject,
                self.difficulty.as_str(),
                self.grade_level
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_type_serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&GameType::OpenEnded).unwrap(), "\"open_ended\"");
        assert_eq!(serde_json::to_string(&GameType::Mcq).unwrap(), "\"mcq\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn difficulty_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<Difficulty>("\"impossible\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_description_falls_back_to_generated_summary() {
        let mut request =
            GenerationRequest::new("fractions", 5, Difficulty::Medium, "5th grade", GameType::Mcq);
        request.description = Some("   ".to_string());

        assert_eq!(
            request.resolved_description(),
            "Studyset for fractions at medium difficulty level for grade 5th grade"
        );
        assert_eq!(request.resolved_title(), "fractions");
    }

    #[test]
    fn explicit_title_and_description_are_kept() {
        let mut request =
            GenerationRequest::new("cells", 3, Difficulty::Easy, "7th grade", GameType::OpenEnded);
        request.title = Some("Biology review".to_string());
        request.description = Some("Before the test".to_string());

        assert_eq!(request.resolved_title(), "Biology review");
        assert_eq!(request.resolved_description(), "Before the test");
    }
}
