//! Mapping of store failures onto HTTP responses.

use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use folio_core::{IdError, StoreError};

/// Error returned by every handler; rendered as a status plus an `{error}` body.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    /// The request itself could not be decoded (bad JSON, broken multipart stream).
    BadRequest(String),
    /// Failure outside the store, e.g. a blocking task that panicked.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::Validation(_) | StoreError::InvalidId(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<IdError> for ApiError {
    fn from(e: IdError) -> Self {
        ApiError::Store(StoreError::InvalidId(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Store(e) if e.is_client_error() => e.to_string(),
            ApiError::BadRequest(message) => message,
            other => {
                // Paths and io details stay in the log.
                tracing::error!("Request failed: {:?}", other);
                "Internal error".to_string()
            }
        };
        (status, Json(ErrorRes { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::Validation("id is required".into()), 400),
            (StoreError::InvalidId(IdError::Empty), 400),
            (StoreError::NotFound("post 'x' not found".into()), 404),
            (StoreError::Conflict("project 'x' already exists".into()), 409),
            (
                StoreError::Io {
                    path: PathBuf::from("/tmp/x"),
                    source: std::io::Error::other("disk on fire"),
                },
                500,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status().as_u16(), expected);
        }
    }

    #[test]
    fn test_bad_request_is_client_error() {
        assert_eq!(
            ApiError::BadRequest("broken".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
