use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Isolates the JSON array embedded in free model text.
///
/// The slice runs from the first `[` to the last `]`, so prose before and
/// after the array is tolerated. Two separate bracketed spans in one reply
/// produce an invalid slice and fail to parse.
pub struct PayloadExtractor;

impl PayloadExtractor {
    pub fn slice(raw: &str) -> AppResult<&str> {
        let start = raw
            .find('[')
            .ok_or_else(|| AppError::Extraction("no '[' found in model output".to_string()))?;
        let end = raw
            .rfind(']')
            .ok_or_else(|| AppError::Extraction("no ']' found in model output".to_string()))?;

        if end < start {
            return Err(AppError::Extraction(
                "closing ']' appears before opening '['".to_string(),
            ));
        }

        Ok(&raw[start..=end])
    }

    pub fn extract(raw: &str) -> AppResult<Value> {
        let payload = Self::slice(raw)?;
        serde_json::from_str(payload)
            .map_err(|e| AppError::Extraction(format!("invalid JSON array: {}", e)))
    }
}
