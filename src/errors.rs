use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Transport or availability failure of the completion provider.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// No parseable JSON array could be isolated from the model output.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A JSON array was found but its records do not have the required shape.
    #[error("Schema error{}: field '{field}' {reason}", index_suffix(.index))]
    Schema {
        index: Option<usize>,
        field: String,
        reason: String,
    },

    #[error("Failed to generate output with the expected format after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        attempts: u32,
        #[source]
        last_error: Box<AppError>,
    },

    #[error("Internal server error: {0}")]
    InternalError(String),
}

fn index_suffix(index: &Option<usize>) -> String {
    index
        .map(|i| format!(" at index {}", i))
        .unwrap_or_default()
}

impl AppError {
    pub fn schema(index: Option<usize>, field: &str, reason: impl Into<String>) -> Self {
        AppError::Schema {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Malformed model output, recoverable by asking the model again.
    pub fn is_malformed_output(&self) -> bool {
        matches!(self, AppError::Extraction(_) | AppError::Schema { .. })
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Schema { .. } => "SCHEMA_ERROR",
            AppError::ExhaustedRetries { .. } => "EXHAUSTED_RETRIES",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(_) | AppError::Schema { .. } => StatusCode::BAD_GATEWAY,
            AppError::ExhaustedRetries { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
