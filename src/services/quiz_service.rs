use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GenerationRequest, Quiz, ValidatedQuestion},
        dto::{
            request::{RecordOutcomesRequestDto, UpdateQuizRequestDto},
            response::PaginatedQuizzes,
        },
    },
    repositories::QuizRepository,
    services::{
        completion_client::DecodingParams,
        notification_service::{Notifier, QuizEvent},
        payload_extractor::PayloadExtractor,
        prompt_builder::PromptBuilder,
        retry_controller::RetryController,
        schema_validator::SchemaValidator,
    },
};

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    controller: Arc<RetryController>,
    notifier: Arc<dyn Notifier>,
    params: DecodingParams,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        controller: Arc<RetryController>,
        notifier: Arc<dyn Notifier>,
        params: DecodingParams,
    ) -> Self {
        Self {
            repository,
            controller,
            notifier,
            params,
        }
    }

    /// Runs the generation pipeline without persisting anything. The number of
    /// questions returned is whatever the model produced.
    pub async fn generate_questions(
        &self,
        request: &GenerationRequest,
    ) -> AppResult<Vec<ValidatedQuestion>> {
        let prompt = PromptBuilder::quiz(request);
        let game_type = request.game_type;

        self.controller
            .run(&prompt, &self.params, |raw| {
                let value = PayloadExtractor::extract(raw)?;
                SchemaValidator::validate_questions(&value, game_type)
            })
            .await
    }

    pub async fn generate_quiz(&self, owner_id: &str, request: GenerationRequest) -> AppResult<String> {
        if owner_id.trim().is_empty() {
            return Err(AppError::ValidationError("owner id must not be empty".to_string()));
        }
        if request.count == 0 {
            return Err(AppError::ValidationError("count must be at least 1".to_string()));
        }
        if request.subject.trim().is_empty() || request.grade_level.trim().is_empty() {
            return Err(AppError::ValidationError(
                "subject and grade level must not be empty".to_string(),
            ));
        }

        log::info!(
            "Generating {} {} question(s) about '{}' for owner {}",
            request.count,
            request.game_type.prompt_label(),
            request.subject,
            owner_id
        );

        let questions = self.generate_questions(&request).await?;
        if questions.len() != usize::from(request.count) {
            log::debug!(
                "Model produced {} question(s), {} requested",
                questions.len(),
                request.count
            );
        }

        let quiz = Quiz::from_generation(owner_id, &request, questions);
        let quiz_id = self.repository.save_quiz(quiz).await?;

        if let Err(e) = self
            .notifier
            .broadcast(QuizEvent::quiz_created(&quiz_id, owner_id, &request.subject))
        {
            log::debug!("Quiz {} created without notification: {}", quiz_id, e);
        }

        Ok(quiz_id)
    }

    pub async fn get_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn list_quizzes_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<PaginatedQuizzes> {
        let (items, total) = self.repository.list_by_owner(owner_id, offset, limit).await?;

        Ok(PaginatedQuizzes {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn list_all_quizzes(&self, offset: i64, limit: i64) -> AppResult<PaginatedQuizzes> {
        let (items, total) = self.repository.list_all(offset, limit).await?;

        Ok(PaginatedQuizzes {
            items,
            total,
            offset,
            limit,
        })
    }

    pub async fn update_quiz_details(
        &self,
        id: &str,
        request: UpdateQuizRequestDto,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self.get_quiz(id).await?;

        if let Some(title) = request.title {
            quiz.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            quiz.description = description;
        }
        quiz.modified_at = Some(Utc::now());

        self.repository.update(quiz).await
    }

    /// Stores learner answers. Unknown question ids are skipped.
    pub async fn record_outcomes(
        &self,
        id: &str,
        request: RecordOutcomesRequestDto,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self.get_quiz(id).await?;

        for outcome in request.questions {
            match quiz.questions.iter_mut().find(|q| q.id == outcome.question_id) {
                Some(question) => {
                    question.is_correct = Some(outcome.is_correct);
                    question.user_answer = Some(outcome.user_answer);
                }
                None => log::warn!(
                    "Skipping outcome for unknown question {} on quiz {}",
                    outcome.question_id,
                    id
                ),
            }
        }

        if request.score.is_some() {
            quiz.score = request.score;
        }
        if request.time_taken.is_some() {
            quiz.time_taken = request.time_taken;
        }
        quiz.modified_at = Some(Utc::now());

        self.repository.update(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted quiz {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            domain::{Difficulty, GameType},
            dto::request::QuestionOutcomeInput,
        },
        repositories::quiz_repository::MockQuizRepository,
        services::{
            completion_client::MockCompletionClient, notification_service::MockNotifier,
            retry_controller::RetryPolicy,
        },
        test_utils::fixtures,
    };

    fn service(
        repository: MockQuizRepository,
        client: MockCompletionClient,
        notifier: MockNotifier,
    ) -> QuizService {
        QuizService::new(
            Arc::new(repository),
            Arc::new(RetryController::new(Arc::new(client), RetryPolicy::immediate(3))),
            Arc::new(notifier),
            DecodingParams::quiz(300),
        )
    }

    fn client_returning(raw: &'static str, times: usize) -> MockCompletionClient {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(times)
            .returning(move |_, _| Ok(raw.to_string()));
        client
    }

    #[tokio::test]
    async fn generate_quiz_saves_once_and_notifies() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_save_quiz()
            .times(1)
            .returning(|quiz| {
                assert_eq!(quiz.questions.len(), 2);
                assert_eq!(quiz.owner_id, "owner-1");
                Ok(quiz.id)
            });

        let mut notifier = MockNotifier::new();
        notifier.expect_broadcast().times(1).returning(|event| {
            assert_eq!(event.event_type, "quiz_created");
            Ok(1)
        });

        let service = service(
            repository,
            client_returning(fixtures::MCQ_COMPLETION, 1),
            notifier,
        );

        let quiz_id = service
            .generate_quiz("owner-1", fixtures::generation_request())
            .await
            .unwrap();
        assert!(!quiz_id.is_empty());
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_generation() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_save_quiz()
            .times(1)
            .returning(|quiz| Ok(quiz.id));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_broadcast()
            .times(1)
            .returning(|_| Err(AppError::InternalError("no subscribers".into())));

        let service = service(
            repository,
            client_returning(fixtures::MCQ_COMPLETION, 1),
            notifier,
        );

        assert!(service
            .generate_quiz("owner-1", fixtures::generation_request())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn exhausted_generation_persists_nothing() {
        let mut repository = MockQuizRepository::new();
        repository.expect_save_quiz().times(0);

        let mut notifier = MockNotifier::new();
        notifier.expect_broadcast().times(0);

        let service = service(
            repository,
            client_returning("Sorry, I cannot do that.", 3),
            notifier,
        );

        let err = service
            .generate_quiz("owner-1", fixtures::generation_request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExhaustedRetries { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn zero_count_is_rejected_before_calling_the_model() {
        let service = service(
            MockQuizRepository::new(),
            MockCompletionClient::new(),
            MockNotifier::new(),
        );

        let mut request = fixtures::generation_request();
        request.count = 0;

        let err = service.generate_quiz("owner-1", request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn open_ended_generation_stores_no_options() {
        let mut repository = MockQuizRepository::new();
        repository.expect_save_quiz().times(1).returning(|quiz| {
            assert!(quiz.questions.iter().all(|q| q.options.is_empty()));
            Ok(quiz.id)
        });
        let mut notifier = MockNotifier::new();
        notifier.expect_broadcast().returning(|_| Ok(0));

        let service = service(
            repository,
            client_returning(fixtures::OPEN_ENDED_COMPLETION, 1),
            notifier,
        );

        let request = GenerationRequest::new(
            "ecosystems",
            2,
            Difficulty::Easy,
            "6th grade",
            GameType::OpenEnded,
        );
        assert!(service.generate_quiz("owner-1", request).await.is_ok());
    }

    #[tokio::test]
    async fn list_all_quizzes_reports_page_window() {
        let mut repository = MockQuizRepository::new();
        repository
            .expect_list_all()
            .withf(|offset, limit| *offset == 20 && *limit == 10)
            .times(1)
            .returning(|_, _| Ok((vec![fixtures::stored_quiz("owner-1")], 21)));

        let page = service(repository, MockCompletionClient::new(), MockNotifier::new())
            .list_all_quizzes(20, 10)
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 21);
        assert_eq!(page.offset, 20);
    }

    #[tokio::test]
    async fn get_quiz_maps_missing_to_not_found() {
        let mut repository = MockQuizRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = service(repository, MockCompletionClient::new(), MockNotifier::new());

        let err = service.get_quiz("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn record_outcomes_updates_known_questions_only() {
        let quiz = fixtures::stored_quiz("owner-1");
        let first_id = quiz.questions[0].id.clone();

        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository.expect_update().times(1).returning(|quiz| Ok(quiz));

        let service = service(repository, MockCompletionClient::new(), MockNotifier::new());

        let updated = service
            .record_outcomes(
                "quiz-1",
                RecordOutcomesRequestDto {
                    score: Some(1),
                    time_taken: Some(42),
                    questions: vec![
                        QuestionOutcomeInput {
                            question_id: first_id.clone(),
                            is_correct: false,
                            user_answer: "Mars".to_string(),
                        },
                        QuestionOutcomeInput {
                            question_id: "does-not-exist".to_string(),
                            is_correct: true,
                            user_answer: "x".to_string(),
                        },
                    ],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.score, Some(1));
        assert_eq!(updated.time_taken, Some(42));
        assert_eq!(updated.questions[0].is_correct, Some(false));
        assert_eq!(updated.questions[0].user_answer.as_deref(), Some("Mars"));
        assert_eq!(updated.questions[1].is_correct, None);
    }

    #[tokio::test]
    async fn update_quiz_details_changes_title() {
        let quiz = fixtures::stored_quiz("owner-1");

        let mut repository = MockQuizRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(quiz.clone())));
        repository.expect_update().times(1).returning(|quiz| Ok(quiz));

        let service = service(repository, MockCompletionClient::new(), MockNotifier::new());

        let updated = service
            .update_quiz_details(
                "quiz-1",
                UpdateQuizRequestDto {
                    title: Some(" Planets ".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Planets");
    }
}
