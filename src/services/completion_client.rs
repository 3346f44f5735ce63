use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    constants::quiz_prompt::STOP_SEQUENCES,
    errors::{AppError, AppResult},
    services::prompt_builder::Prompt,
};

/// Fixed decoding configuration for one kind of generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
}

impl DecodingParams {
    /// Deterministic decoding for quiz questions.
    pub fn quiz(max_tokens: u32) -> Self {
        Self::with_temperature(0.0, max_tokens)
    }

    /// Higher temperature for varied explanations.
    pub fn explanation(max_tokens: u32) -> Self {
        Self::with_temperature(0.9, max_tokens)
    }

    fn with_temperature(temperature: f32, max_tokens: u32) -> Self {
        DecodingParams {
            temperature,
            max_tokens,
            frequency_penalty: 0.0,
            presence_penalty: 0.6,
            stop: STOP_SEQUENCES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Single completion call against the provider. Implementations never retry.
/// Transport failures are returned as `AppError::ExternalService`, a reply
/// without text as `AppError::Extraction`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &Prompt, params: &DecodingParams) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
    stop: &'a [String],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn request_body<'a>(
        &'a self,
        prompt: &'a Prompt,
        params: &'a DecodingParams,
    ) -> ChatCompletionBody<'a> {
        ChatCompletionBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            stop: &params.stop,
        }
    }
}

/// An empty choice list is a provider failure. A choice without content is a
/// reply the model produced badly, so it counts as malformed output.
fn first_choice_text(reply: ChatCompletionReply) -> AppResult<String> {
    let choice = reply.choices.into_iter().next().ok_or_else(|| {
        AppError::ExternalService("Completion response contained no choices".to_string())
    })?;

    choice
        .message
        .content
        .ok_or_else(|| AppError::Extraction("completion choice has no text content".to_string()))
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &Prompt, params: &DecodingParams) -> AppResult<String> {
        log::debug!(
            "Requesting completion from model {} (temperature {}, max_tokens {})",
            self.model,
            params.temperature,
            params.max_tokens
        );

        let reply: ChatCompletionReply = self
            .client
            .chat()
            .create_byot(self.request_body(prompt, params))
            .await?;

        first_choice_text(reply)
    }
}
