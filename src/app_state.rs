use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoShareRepository, QuizRepository, ShareRepository},
    services::{
        BroadcastNotifier, CompletionClient, DecodingParams, ExplanationService,
        OpenAiCompletionClient, QuizService, RetryController, RetryPolicy, ShareService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub explanation_service: Arc<ExplanationService>,
    pub share_service: Arc<ShareService>,
    pub notifier: Arc<BroadcastNotifier>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        db.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        let share_repository = Arc::new(MongoShareRepository::new(&db));

        let completion_client = Arc::new(OpenAiCompletionClient::new(&config));
        let notifier = Arc::new(BroadcastNotifier::new(config.notification_channel_capacity));

        Ok(Self::from_parts(
            config,
            quiz_repository,
            share_repository,
            completion_client,
            notifier,
        ))
    }

    /// Wires the services around already constructed collaborators.
    pub fn from_parts(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        share_repository: Arc<dyn ShareRepository>,
        completion_client: Arc<dyn CompletionClient>,
        notifier: Arc<BroadcastNotifier>,
    ) -> Self {
        let controller = Arc::new(RetryController::new(
            completion_client,
            RetryPolicy::from_config(&config),
        ));

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            controller.clone(),
            notifier.clone(),
            DecodingParams::quiz(config.quiz_max_tokens),
        ));

        let explanation_service = Arc::new(ExplanationService::new(
            quiz_repository.clone(),
            controller,
            DecodingParams::explanation(config.explanation_max_tokens),
        ));

        let share_service = Arc::new(ShareService::new(
            share_repository,
            quiz_repository,
            notifier.clone(),
        ));

        Self {
            quiz_service,
            explanation_service,
            share_service,
            notifier,
            config: Arc::new(config),
        }
    }
}
