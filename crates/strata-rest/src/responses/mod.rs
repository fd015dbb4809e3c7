//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use strata_core::{ErrorResponse, StrataError};
use tracing::error;

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub StrataError);

impl From<StrataError> for AppError {
    fn from(err: StrataError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_error() {
        let cases = [
            (StrataError::invalid_input("empty id"), StatusCode::BAD_REQUEST),
            (StrataError::not_found("Profile", "u1"), StatusCode::NOT_FOUND),
            (
                StrataError::StoreWriteFailed("x".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StrataError::CacheWriteFailed("x".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError(err).into_response().status(), expected);
        }
    }
}
