use async_graphql::{ErrorExtensions, ID};

use crate::errors::{AppError, AppResult};

/// Converts a service result into a GraphQL result carrying the error `code`
/// extension.
pub fn extended<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|e| e.extend())
}

pub fn parse_id(id: &ID) -> AppResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::ValidationError("id must not be empty".to_string()));
    }
    Ok(id.to_string())
}
