use crate::utils::auth::errors::AuthError;
use crate::utils::events::errors::EventError;
use crate::utils::invitations::errors::InvitationError;
use crate::validation::ValidateContentError;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

pub const UNEXPECTED_INFO: &str = "Unexpected server error";

/// Failure classes shared by every domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Unauthorized,
    Conflict,
    InvalidArgument,
    FailedPrecondition,
    Internal,
}

impl From<ErrorKind> for StatusCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Conflict | ErrorKind::InvalidArgument | ErrorKind::FailedPrecondition => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub trait ErrorKindExt: std::error::Error {
    fn kind(&self) -> ErrorKind;

    /// Reason shown to the caller. Internal failures never leak their details.
    fn info(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => UNEXPECTED_INFO.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Renders any domain error as `{"error_info": ...}` with its mapped status.
pub fn error_response<E: ErrorKindExt + std::fmt::Debug>(error: E) -> Response {
    let kind = error.kind();
    if kind == ErrorKind::Internal {
        tracing::error!("Internal server error: {error:?}");
    }
    let status = StatusCode::from(kind);
    (status, Json(json!({ "error_info": error.info() }))).into_response()
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error(transparent)]
    EventError(#[from] EventError),
    #[error(transparent)]
    InvitationError(#[from] InvitationError),
    #[error(transparent)]
    ValidateContentError(#[from] ValidateContentError),
    #[error("route not found")]
    RouteNotFound,
}

impl ErrorKindExt for AppError {
    fn kind(&self) -> ErrorKind {
        match self {
            AppError::AuthError(e) => e.kind(),
            AppError::EventError(e) => e.kind(),
            AppError::InvitationError(e) => e.kind(),
            AppError::ValidateContentError(e) => e.kind(),
            AppError::RouteNotFound => ErrorKind::NotFound,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(self)
    }
}
