pub mod completion_client;
pub mod explanation_service;
pub mod notification_service;
pub mod payload_extractor;
pub mod prompt_builder;
pub mod quiz_service;
pub mod retry_controller;
pub mod schema_validator;
pub mod share_service;

pub use completion_client::{CompletionClient, DecodingParams, OpenAiCompletionClient};
pub use explanation_service::ExplanationService;
pub use notification_service::{BroadcastNotifier, Notifier, QuizEvent};
pub use quiz_service::QuizService;
pub use retry_controller::{RetryController, RetryPolicy};
pub use share_service::ShareService;
