use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        completion_client::{CompletionClient, DecodingParams},
        prompt_builder::Prompt,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.generation_max_attempts.max(1),
            base_delay: Duration::from_millis(config.generation_backoff_ms),
            max_delay: Duration::from_millis(config.generation_max_backoff_ms),
        }
    }

    /// No delay between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay to wait before `attempt` (1-based). The first attempt never waits;
    /// later ones double from `base_delay` up to `max_delay`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 2).min(16);
        let delay = self.base_delay.saturating_mul(1u32 << exponent);
        std::cmp::min(delay, self.max_delay)
    }
}

#[derive(Debug, Clone)]
pub struct AttemptState {
    pub attempt_number: u32,
    pub max_attempts: u32,
    pub last_error: Option<AppError>,
}

impl AttemptState {
    fn new(max_attempts: u32) -> Self {
        Self {
            attempt_number: 0,
            max_attempts: max_attempts.max(1),
            last_error: None,
        }
    }

    fn has_budget(&self) -> bool {
        self.attempt_number < self.max_attempts
    }

    fn exhausted(self) -> AppError {
        let last_error = self
            .last_error
            .unwrap_or_else(|| AppError::InternalError("no generation attempt was made".to_string()));

        AppError::ExhaustedRetries {
            attempts: self.attempt_number,
            last_error: Box::new(last_error),
        }
    }
}

/// Drives completion, extraction and validation through a bounded number of
/// attempts.
///
/// Malformed output (extraction or schema failures) consumes one attempt and
/// asks the model again. Any other error, including transport failures of the
/// completion provider, ends the loop immediately and is returned unchanged.
pub struct RetryController {
    client: Arc<dyn CompletionClient>,
    policy: RetryPolicy,
}

impl RetryController {
    pub fn new(client: Arc<dyn CompletionClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// `parse` turns the raw completion into a validated value. It must not
    /// have side effects: output of a failed attempt is dropped.
    pub async fn run<T, F>(&self, prompt: &Prompt, params: &DecodingParams, parse: F) -> AppResult<T>
    where
        T: Send,
        F: Fn(&str) -> AppResult<T> + Send + Sync,
    {
        let mut state = AttemptState::new(self.policy.max_attempts);

        while state.has_budget() {
            state.attempt_number += 1;

            let delay = self.policy.delay_before(state.attempt_number);
            if !delay.is_zero() {
                log::debug!(
                    "Waiting {:?} before generation attempt {}",
                    delay,
                    state.attempt_number
                );
                tokio::time::sleep(delay).await;
            }

            let outcome = match self.client.complete(prompt, params).await {
                Ok(raw) => parse(&raw),
                Err(e) if e.is_malformed_output() => Err(e),
                Err(e) => {
                    log::error!(
                        "Completion provider failed on attempt {}: {}",
                        state.attempt_number,
                        e
                    );
                    return Err(e);
                }
            };

            match outcome {
                Ok(value) => {
                    log::info!(
                        "Generation succeeded on attempt {}/{}",
                        state.attempt_number,
                        state.max_attempts
                    );
                    return Ok(value);
                }
                Err(e) if e.is_malformed_output() => {
                    log::warn!(
                        "Malformed model output on attempt {}/{}: {}",
                        state.attempt_number,
                        state.max_attempts,
                        e
                    );
                    state.last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        log::error!(
            "Giving up after {} attempts with malformed model output",
            state.attempt_number
        );
        Err(state.exhausted())
    }
}
