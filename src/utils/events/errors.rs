use crate::app_errors::{error_response, ErrorKind, ErrorKindExt};
use crate::stores::StoreError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("event not found")]
    NotFound,
    #[error("access denied: you can only {0} your own events")]
    NotCreator(&'static str),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ErrorKindExt for EventError {
    fn kind(&self) -> ErrorKind {
        match self {
            EventError::NotFound => ErrorKind::NotFound,
            EventError::NotCreator(_) => ErrorKind::Forbidden,
            EventError::Unexpected(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        error_response(self)
    }
}

impl From<StoreError> for EventError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation => {
                Self::Unexpected(anyhow::anyhow!("unexpected unique violation on events"))
            }
            StoreError::Unexpected(e) => Self::Unexpected(e),
        }
    }
}
