use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::{Debug, Formatter};
use time::{Duration, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// User row about to be inserted. `password_hash` is already hashed.
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Payload of an issued credential.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub jti: Uuid,
    pub user_id: i64,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

impl Claims {
    pub fn new(user_id: i64, email: &str, duration: Duration) -> Self {
        let iat = jsonwebtoken::get_current_timestamp();
        let exp = (iat as i64).saturating_add(duration.whole_seconds()).max(0) as u64;
        Self {
            jti: Uuid::new_v4(),
            user_id,
            email: email.to_string(),
            iat,
            exp,
        }
    }
}
