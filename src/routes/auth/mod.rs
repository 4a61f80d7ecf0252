pub mod models;

use crate::app_errors::AppError;
use crate::modules::extractors::jwt::Caller;
use crate::modules::AppState;
use crate::routes::auth::models::{LoginCredentials, RegisterCredentials};
use crate::utils::auth::additions::{token_cookie, TOKEN_COOKIE};
use crate::utils::auth::{Authenticated, IdentityService};
use crate::validation::ValidatedJson;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use http::StatusCode;
use secrecy::SecretString;
use serde_json::{json, Value};
use time::Duration;
use tracing::debug;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(post_register_user))
        .route("/login", post(post_login_user))
        .route("/profile", get(get_profile))
        .route("/logout", post(post_logout_user))
}

/// Register a new user
#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = RegisterCredentials, responses((status = 201, body = Authenticated, description = "Registered and logged in"), (status = 400, description = "Invalid fields or email already registered")))]
pub async fn post_register_user(
    State(identity): State<IdentityService>,
    jar: CookieJar,
    ValidatedJson(credentials): ValidatedJson<RegisterCredentials>,
) -> Result<(StatusCode, CookieJar, Json<Authenticated>), AppError> {
    let authenticated = identity
        .register(
            &credentials.username,
            &credentials.email,
            SecretString::new(credentials.password),
        )
        .await?;

    let jar = jar.add(token_cookie(authenticated.token.clone()));
    Ok((StatusCode::CREATED, jar, Json(authenticated)))
}

/// Log in with email and password
#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = LoginCredentials, responses((status = 200, body = Authenticated, description = "Logged in"), (status = 401, description = "Invalid email or password")))]
pub async fn post_login_user(
    State(identity): State<IdentityService>,
    jar: CookieJar,
    ValidatedJson(credentials): ValidatedJson<LoginCredentials>,
) -> Result<(CookieJar, Json<Authenticated>), AppError> {
    let authenticated = identity
        .authenticate(
            &credentials.email,
            SecretString::new(credentials.password),
        )
        .await?;

    let jar = jar.add(token_cookie(authenticated.token.clone()));
    Ok((jar, Json(authenticated)))
}

/// Profile of the authenticated user
#[utoipa::path(get, path = "/auth/profile", tag = "auth", responses((status = 200, body = User, description = "Caller profile"), (status = 401, description = "Missing or invalid credential")))]
pub async fn get_profile(Caller(user): Caller) -> Json<Value> {
    Json(json!({ "user": user }))
}

/// Drop the credential cookie
#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 200, description = "Cookie removed")))]
pub async fn post_logout_user(jar: CookieJar) -> (CookieJar, Json<Value>) {
    debug!("User logged out");
    let jar = jar.remove(
        Cookie::build(TOKEN_COOKIE, "")
            .path("/")
            .max_age(Duration::seconds(0))
            .finish(),
    );
    (jar, Json(json!({ "message": "logged out successfully" })))
}
