use serde_json::{Map, Value};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{GameType, ValidatedQuestion},
};

pub const MCQ_OPTION_COUNT: usize = 4;

/// Checks parsed model output against the required record shape.
///
/// Checks run in order and stop at the first failure: the value is an array,
/// every record carries the required keys (and four options for mcq), then
/// every required field is a non-empty string.
pub struct SchemaValidator;

impl SchemaValidator {
    /// An empty array is valid and yields no questions; the produced count is
    /// never compared with the requested one.
    pub fn validate_questions(value: &Value, game_type: GameType) -> AppResult<Vec<ValidatedQuestion>> {
        let records = Self::records(value)?;

        for (index, record) in records.iter().enumerate() {
            Self::require_keys(record, index, &["question", "answer"])?;
            if game_type == GameType::Mcq {
                Self::require_options(record, index)?;
            }
        }

        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let question = Self::non_empty_string(record, index, "question")?;
                let answer = Self::non_empty_string(record, index, "answer")?;
                let options = match game_type {
                    GameType::Mcq => Self::option_strings(record, index)?,
                    GameType::OpenEnded => Vec::new(),
                };
                Ok(ValidatedQuestion {
                    question,
                    answer,
                    options,
                })
            })
            .collect()
    }

    /// Returns the explanation texts in input order. A count different from
    /// `expected` is a schema error even when every entry is well formed.
    pub fn validate_explanations(value: &Value, expected: usize) -> AppResult<Vec<String>> {
        let records = Self::records(value)?;

        for (index, record) in records.iter().enumerate() {
            Self::require_keys(record, index, &["explanation"])?;
        }

        let explanations = records
            .iter()
            .enumerate()
            .map(|(index, record)| Self::non_empty_string(record, index, "explanation"))
            .collect::<AppResult<Vec<_>>>()?;

        if explanations.len() != expected {
            return Err(AppError::schema(
                None,
                "explanations",
                format!("expected {} entries, got {}", expected, explanations.len()),
            ));
        }

        Ok(explanations)
    }

    fn records(value: &Value) -> AppResult<&Vec<Value>> {
        value
            .as_array()
            .ok_or_else(|| AppError::schema(None, "root", "is not an array"))
    }

    fn object(record: &Value, index: usize) -> AppResult<&Map<String, Value>> {
        record
            .as_object()
            .ok_or_else(|| AppError::schema(Some(index), "record", "is not an object"))
    }

    fn require_keys(record: &Value, index: usize, keys: &[&str]) -> AppResult<()> {
        let object = Self::object(record, index)?;
        match keys.iter().find(|key| !object.contains_key(**key)) {
            Some(missing) => Err(AppError::schema(Some(index), missing, "is missing")),
            None => Ok(()),
        }
    }

    fn require_options(record: &Value, index: usize) -> AppResult<()> {
        let options = record
            .get("options")
            .ok_or_else(|| AppError::schema(Some(index), "options", "is missing"))?
            .as_array()
            .ok_or_else(|| AppError::schema(Some(index), "options", "is not an array"))?;

        if options.len() != MCQ_OPTION_COUNT {
            return Err(AppError::schema(
                Some(index),
                "options",
                format!("has {} entries, expected {}", options.len(), MCQ_OPTION_COUNT),
            ));
        }
        Ok(())
    }

    fn non_empty_string(record: &Value, index: usize, field: &str) -> AppResult<String> {
        match record.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(Value::String(_)) => Err(AppError::schema(Some(index), field, "is empty")),
            _ => Err(AppError::schema(Some(index), field, "is not a string")),
        }
    }

    fn option_strings(record: &Value, index: usize) -> AppResult<Vec<String>> {
        let options = record
            .get("options")
            .and_then(Value::as_array)
            .ok_or_else(|| AppError::schema(Some(index), "options", "is not an array"))?;

        options
            .iter()
            .map(|option| match option {
                Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
                _ => Err(AppError::schema(
                    Some(index),
                    "options",
                    "contains an empty or non-string entry",
                )),
            })
            .collect()
    }
}
