use crate::app_errors::{error_response, ErrorKind, ErrorKindExt};
use axum::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::request::Parts;
use http::Request;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("{0}")]
    Expected(String),
    #[error(transparent)]
    Rejected(#[from] JsonRejection),
    #[error("invalid path parameter")]
    InvalidPath(#[from] PathRejection),
}

impl ValidateContentError {
    pub fn new(content: impl ToString) -> Self {
        Self::Expected(content.to_string())
    }
}

impl From<ValidationErrors> for ValidateContentError {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(errors)
    }
}

impl ErrorKindExt for ValidateContentError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

impl IntoResponse for ValidateContentError {
    fn into_response(self) -> Response {
        error_response(self)
    }
}

/// Checks `validator` derives cannot express, such as blank strings.
pub trait ValidateContent {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        Ok(())
    }
}

pub fn not_blank(field: &str, value: &str) -> Result<(), ValidateContentError> {
    if value.trim().is_empty() {
        return Err(ValidateContentError::new(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Deserializes a string with surrounding whitespace removed, so field
/// validators see the trimmed value.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(String::deserialize(deserializer)?.trim().to_string())
}

/// JSON body that passed both field validation and content validation.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + ValidateContent,
    S: Send + Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    B: Send + 'static,
{
    type Rejection = ValidateContentError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        value.validate_content()?;
        Ok(Self(value))
    }
}

/// Path parameters whose rejection renders as `{"error_info"}`.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ValidateContentError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(not_blank("title", "Party").is_ok());
        let error = not_blank("title", "   ").unwrap_err();
        assert_eq!(error.to_string(), "title must not be blank");
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[derive(serde::Deserialize)]
    struct Padded {
        #[serde(deserialize_with = "trimmed")]
        email: String,
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let padded: Padded = serde_json::from_str(r#"{"email": "  a@x.com \n"}"#).unwrap();
        assert_eq!(padded.email, "a@x.com");
    }
}
