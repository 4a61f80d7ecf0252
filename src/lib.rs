pub mod app_errors;
pub mod config;
mod doc;
pub mod modules;
pub mod routes;
pub mod stores;
pub mod utils;
pub mod validation;

use crate::app_errors::AppError;
use crate::config::environment::Environment;
use crate::modules::AppState;
use axum::extract::State;
use axum::response::Redirect;
use axum::Router;
use http::Uri;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const SWAGGER_URI: &str = "/swagger-ui";

pub fn app(state: AppState) -> Router {
    let mut router = Router::new();

    info!("Environment: {}", state.environment);
    if state.environment.is_dev() {
        info!("Enabling Swagger UI");
        router = router.merge(
            SwaggerUi::new(SWAGGER_URI).url("/api-doc/openapi.json", doc::ApiDoc::openapi()),
        );
    }

    info!("Spawning main router with state: {state}");

    router
        .merge(routes::health::router())
        .nest("/auth", routes::auth::router())
        .nest("/events", routes::events::router())
        .nest("/invitations", routes::invitations::router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(
    State(environment): State<Environment>,
    uri: Uri,
) -> Result<Redirect, AppError> {
    if environment.is_dev() && uri.path() == "/" {
        return Ok(Redirect::to(SWAGGER_URI));
    }
    Err(AppError::RouteNotFound)
}
