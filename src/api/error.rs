//! Mapping of errors onto HTTP responses.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, StoreError, SupportError};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl SupportError {
    /// HTTP status and body for this error.
    pub fn to_status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            SupportError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed", msg.clone()),
            ),
            SupportError::Auth(AuthError::MissingCredentials) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Access denied", "No token provided"),
            ),
            SupportError::Auth(AuthError::TokenExpired) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Token expired", "Please log in again"),
            ),
            SupportError::Auth(AuthError::InvalidToken(_)) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Invalid token", "Authentication failed"),
            ),
            SupportError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Authentication failed", "Invalid email or password"),
            ),
            SupportError::Store(StoreError::Conflict(msg)) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflict", msg.clone()),
            ),
            SupportError::Store(StoreError::NotFound(msg)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Not found", msg.clone()),
            ),
            SupportError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse::new(
                    "Too many requests",
                    "Too many requests from this client, please try again later",
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error", "Something went wrong"),
            ),
        }
    }
}

impl IntoResponse for SupportError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_status_and_body();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(body)).into_response();
        if let SupportError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}
