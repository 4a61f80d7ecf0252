use crate::utils::events::models::EventChanges;
use crate::validation::{not_blank, ValidateContent, ValidateContentError};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
}

impl ValidateContent for CreateEvent {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        not_blank("title", &self.title)?;
        not_blank("location", &self.location)
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<OffsetDateTime>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
}

impl ValidateContent for UpdateEvent {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if let Some(title) = &self.title {
            not_blank("title", title)?;
        }
        if let Some(location) = &self.location {
            not_blank("location", location)?;
        }
        Ok(())
    }
}

impl From<UpdateEvent> for EventChanges {
    fn from(update: UpdateEvent) -> Self {
        Self {
            title: update.title,
            description: update.description,
            date: update.date,
            location: update.location,
        }
    }
}
