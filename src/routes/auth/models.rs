use crate::utils::auth::additions::is_ascii_or_latin_extended;
use crate::validation::{not_blank, trimmed, ValidateContent, ValidateContentError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginCredentials {
    #[serde(deserialize_with = "trimmed")]
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl ValidateContent for LoginCredentials {}

#[derive(Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterCredentials {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 50), custom = "is_ascii_or_latin_extended")]
    pub username: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

impl RegisterCredentials {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl ValidateContent for RegisterCredentials {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        not_blank("username", &self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_credentials_bounds() {
        assert!(RegisterCredentials::new("ann", "a@x.com", "pw123456").validate().is_ok());
        assert!(RegisterCredentials::new("ann", "not-an-email", "pw123456").validate().is_err());
        assert!(RegisterCredentials::new("ann", "a@x.com", "short").validate().is_err());
        assert!(RegisterCredentials::new("", "a@x.com", "pw123456").validate().is_err());
        assert!(RegisterCredentials::new("thΣtruΣsigma", "a@x.com", "pw123456").validate().is_err());
        assert!(RegisterCredentials::new("   ", "a@x.com", "pw123456").validate_content().is_err());
    }

    #[test]
    fn emails_are_trimmed_before_validation() {
        let credentials: LoginCredentials =
            serde_json::from_str(r#"{"email": " a@x.com ", "password": "pw123456"}"#).unwrap();
        assert_eq!(credentials.email, "a@x.com");
        assert!(credentials.validate().is_ok());
    }
}
