use crate::utils::auth::additions::TOKEN_COOKIE;
use crate::utils::auth::errors::AuthError;
use crate::utils::auth::models::User;
use crate::utils::auth::IdentityService;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::extract::CookieJar;
use http::header::AUTHORIZATION;
use http::request::Parts;
use tracing::debug;

/// The authenticated user behind a request.
///
/// Taken from `Authorization: Bearer <token>`, or from the `jwt` cookie when
/// the header is absent.
#[derive(Debug, Clone)]
pub struct Caller(pub User);

impl Caller {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    IdentityService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let identity = IdentityService::from_ref(state);
        let user = identity.validate_credential(&token).await?;
        debug!("Request from user {}", user.id);
        Ok(Caller(user))
    }
}

fn bearer_token(parts: &Parts) -> Result<String, AuthError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let header = header.to_str().map_err(|_| AuthError::InvalidToken)?;
        let mut split = header.split(' ');
        return match (split.next(), split.next(), split.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(AuthError::InvalidToken),
        };
    }

    CookieJar::from_headers(&parts.headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AuthError::MissingToken)
}
