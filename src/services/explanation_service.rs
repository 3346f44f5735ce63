use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ExplanationRecord, ExplanationRequest},
    repositories::QuizRepository,
    services::{
        completion_client::DecodingParams, payload_extractor::PayloadExtractor,
        prompt_builder::PromptBuilder, retry_controller::RetryController,
        schema_validator::SchemaValidator,
    },
};

/// Batched explanations for the incorrectly answered questions of a quiz.
///
/// Results are matched to questions by position, and the first successful
/// batch is cached on the quiz and reused on every later request.
pub struct ExplanationService {
    repository: Arc<dyn QuizRepository>,
    controller: Arc<RetryController>,
    params: DecodingParams,
}

impl ExplanationService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        controller: Arc<RetryController>,
        params: DecodingParams,
    ) -> Self {
        Self {
            repository,
            controller,
            params,
        }
    }

    pub async fn generate_explanations(&self, quiz_id: &str) -> AppResult<Vec<ExplanationRecord>> {
        if let Some(cached) = self.repository.load_cached_explanations(quiz_id).await? {
            log::debug!("Serving cached explanations for quiz {}", quiz_id);
            return Ok(cached);
        }

        let quiz = self
            .repository
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let batch: Vec<ExplanationRequest> =
            quiz.incorrect_questions().map(ExplanationRequest::from).collect();

        if batch.is_empty() {
            log::info!("Quiz {} has no incorrect questions to explain", quiz_id);
            return Ok(Vec::new());
        }

        let records = self.explain_batch(&batch, &quiz.grade_level).await?;
        self.repository
            .attach_explanations(quiz_id, records.clone())
            .await?;

        log::info!(
            "Attached {} explanation(s) to quiz {}",
            records.len(),
            quiz_id
        );
        Ok(records)
    }

    /// Entry `i` of the result belongs to entry `i` of `batch`.
    pub async fn explain_batch(
        &self,
        batch: &[ExplanationRequest],
        grade_level: &str,
    ) -> AppResult<Vec<ExplanationRecord>> {
        let prompt = PromptBuilder::explanations(batch, grade_level);
        let expected = batch.len();

        let explanations = self
            .controller
            .run(&prompt, &self.params, |raw| {
                let value = PayloadExtractor::extract(raw)?;
                SchemaValidator::validate_explanations(&value, expected)
            })
            .await?;

        Ok(batch
            .iter()
            .zip(explanations)
            .map(|(item, explanation)| ExplanationRecord {
                question: item.question.clone(),
                explanation,
            })
            .collect())
    }
}
