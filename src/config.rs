use std::env;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub shares_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub generation_max_attempts: u32,
    pub generation_backoff_ms: u64,
    pub generation_max_backoff_ms: u64,
    pub quiz_max_tokens: u32,
    pub explanation_max_tokens: u32,
    pub notification_channel_capacity: usize,
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "studyset-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            shares_collection: env::var("SHARES_COLLECTION")
                .unwrap_or_else(|_| "quiz_shares".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parsed_or("WEB_SERVER_PORT", 8080),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            generation_max_attempts: parsed_or("GENERATION_MAX_ATTEMPTS", 3),
            generation_backoff_ms: parsed_or("GENERATION_BACKOFF_MS", 250),
            generation_max_backoff_ms: parsed_or("GENERATION_MAX_BACKOFF_MS", 2000),
            quiz_max_tokens: parsed_or("QUIZ_MAX_TOKENS", 300),
            explanation_max_tokens: parsed_or("EXPLANATION_MAX_TOKENS", 700),
            notification_channel_capacity: parsed_or("NOTIFICATION_CHANNEL_CAPACITY", 64),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are missing
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.openai_api_key.expose_secret().trim().is_empty() {
            panic!("FATAL: OPENAI_API_KEY is not set! Quiz generation cannot reach the completion provider.");
        }

        if self.generation_max_attempts == 0 {
            panic!("FATAL: GENERATION_MAX_ATTEMPTS must be at least 1.");
        }
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "studyset-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            shares_collection: "quiz_shares".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            openai_api_key: SecretString::from("test-openai-key".to_string()),
            openai_api_base: "http://localhost:9999/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            generation_max_attempts: 3,
            generation_backoff_ms: 0,
            generation_max_backoff_ms: 0,
            quiz_max_tokens: 300,
            explanation_max_tokens: 700,
            notification_channel_capacity: 16,
        }
    }
}
