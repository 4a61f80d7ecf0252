use crate::app_errors::{error_response, ErrorKind, ErrorKindExt};
use crate::stores::StoreError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    /// Same reason for an unknown email and a wrong password.
    #[error("invalid email or password")]
    WrongEmailOrPassword,
    #[error("authorization header required")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ErrorKindExt for AuthError {
    fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::WrongEmailOrPassword | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Unexpected(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self)
    }
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => Self::UsernameTaken,
            StoreError::Unexpected(e) => Self::Unexpected(e),
        }
    }
}
