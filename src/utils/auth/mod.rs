pub mod additions;
pub mod errors;
pub mod models;

use self::additions::{hash_pass, verify_pass};
use crate::config::tokens::JwtSettings;
use crate::stores::{StoreError, UserStore};
use anyhow::Context;
use errors::AuthError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use models::{Claims, NewUser, User};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, trace};
use utoipa::ToSchema;

/// A user together with a freshly issued credential.
#[derive(Debug, Serialize, ToSchema)]
pub struct Authenticated {
    pub user: User,
    pub token: String,
}

/// Registers and authenticates users and issues/validates their credentials.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    jwt: JwtSettings,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtSettings) -> Self {
        Self { users, jwt }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: SecretString,
    ) -> Result<Authenticated, AuthError> {
        if self.users.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_pass(password.expose_secret())?;
        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: OffsetDateTime::now_utc(),
        };

        let user = match self.users.create_user(new_user).await {
            Ok(user) => user,
            // Either the email was registered concurrently or the username is taken.
            Err(StoreError::UniqueViolation) => {
                return Err(if self.users.email_exists(email).await? {
                    AuthError::EmailTaken
                } else {
                    AuthError::UsernameTaken
                });
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.issue_token(&user)?;
        debug!("User {} ({}) registered", user.id, user.email);
        Ok(Authenticated { user, token })
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: SecretString,
    ) -> Result<Authenticated, AuthError> {
        let user = self
            .users
            .user_by_email(email)
            .await?
            .ok_or(AuthError::WrongEmailOrPassword)?;

        if !verify_pass(password.expose_secret(), &user.password_hash)? {
            return Err(AuthError::WrongEmailOrPassword);
        }

        let token = self.issue_token(&user)?;
        debug!("User {} ({}) logged in", user.id, user.email);
        Ok(Authenticated { user, token })
    }

    /// Resolves a credential to its user. Every failure, including a user
    /// that no longer exists, is [`AuthError::InvalidToken`].
    pub async fn validate_credential(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.decode_token(token)?;
        self.users
            .user_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = Claims::new(user.id, &user.email, self.jwt.expiration);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.expose_secret().as_bytes()),
        )
        .context("Failed to encode token")?;
        trace!("Issued token {} for user {}", claims.jti, user.id);
        Ok(token)
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 5;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            trace!("Rejected token: {e}");
            AuthError::InvalidToken
        })?;

        Ok(data.claims)
    }
}
