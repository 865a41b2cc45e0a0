/*
 * Responsibility
 * - AppError shared by every handler and by the auth gate
 * - IntoResponse: HTTP status + `{ success: false, message }` body
 * - Conversion from RepoError / AuthError / IdCodecError in one place
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;
use crate::services::id_codec::IdCodecError;

pub const MSG_TOKEN_REQUIRED: &str = "Authentication token is required";
/// Shared by bad signatures, expired tokens and unknown subjects.
pub const MSG_TOKEN_INVALID: &str = "Invalid or expired token";
pub const MSG_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            AppError::BadRequest(message) => message,
            AppError::Unauthorized(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => message.to_string(),
            AppError::Forbidden => "You are not allowed to modify this resource".to_string(),
            AppError::PayloadTooLarge => "Request body too large".to_string(),
            AppError::Internal => MSG_SERVER_ERROR.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            success: false,
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict("Resource already exists"),
            RepoError::Db(err) => {
                tracing::error!(error = %err, "database failure");
                AppError::Internal
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::Unauthorized(MSG_TOKEN_REQUIRED),
            // Same wording for both so callers cannot tell which accounts exist.
            AuthError::InvalidCredential(_) | AuthError::UnknownSubject => {
                AppError::Unauthorized(MSG_TOKEN_INVALID)
            }
            AuthError::Store(_) => AppError::Internal,
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        match e {
            // Client supplied a malformed public id (e.g. /recipes/{id})
            IdCodecError::DecodeInvalidFormat | IdCodecError::DecodeOutOfRange => {
                AppError::bad_request("Invalid recipe id")
            }
            _ => AppError::Internal,
        }
    }
}
