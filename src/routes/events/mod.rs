pub mod models;

use crate::modules::extractors::jwt::Caller;
use crate::modules::AppState;
use crate::routes::events::models::{CreateEvent, UpdateEvent};
use crate::routes::invitations::get_event_invitations;
use crate::utils::events::errors::EventError;
use crate::utils::events::EventService;
use crate::validation::{ValidatedJson, ValidatedPath};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_events).post(create_event))
        .route("/my", get(get_my_events))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/:id/invitations", get(get_event_invitations))
}

/// Create event
#[utoipa::path(post, path = "/events", tag = "events", request_body = CreateEvent, responses((status = 201, body = Event, description = "Created event")))]
pub async fn create_event(
    caller: Caller,
    State(events): State<EventService>,
    ValidatedJson(body): ValidatedJson<CreateEvent>,
) -> Result<(StatusCode, Json<Value>), EventError> {
    let event = events
        .create(
            body.title,
            body.description,
            body.date,
            body.location,
            caller.id(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "event": event }))))
}

/// Every event, newest first. Public.
#[utoipa::path(get, path = "/events", tag = "events", responses((status = 200, body = [Event], description = "All events")))]
pub async fn get_events(State(events): State<EventService>) -> Result<Json<Value>, EventError> {
    let events = events.get_all().await?;
    Ok(Json(json!({ "events": events })))
}

/// Events created by the caller
#[utoipa::path(get, path = "/events/my", tag = "events", responses((status = 200, body = [Event], description = "Caller's events")))]
pub async fn get_my_events(
    caller: Caller,
    State(events): State<EventService>,
) -> Result<Json<Value>, EventError> {
    let events = events.get_by_creator(caller.id()).await?;
    Ok(Json(json!({ "events": events })))
}

/// Get event
#[utoipa::path(get, path = "/events/{id}", tag = "events", params(("id" = i64, Path, description = "Event id")), responses((status = 200, body = Event), (status = 404, description = "Event not found")))]
pub async fn get_event(
    State(events): State<EventService>,
    ValidatedPath(event_id): ValidatedPath<i64>,
) -> Result<Json<Value>, EventError> {
    let event = events.get_by_id(event_id).await?;
    Ok(Json(json!({ "event": event })))
}

/// Update event fields present in the body
#[utoipa::path(put, path = "/events/{id}", tag = "events", params(("id" = i64, Path, description = "Event id")), request_body = UpdateEvent, responses((status = 200, body = Event), (status = 403, description = "Caller is not the creator"), (status = 404, description = "Event not found")))]
pub async fn update_event(
    caller: Caller,
    State(events): State<EventService>,
    ValidatedPath(event_id): ValidatedPath<i64>,
    ValidatedJson(body): ValidatedJson<UpdateEvent>,
) -> Result<Json<Value>, EventError> {
    let event = events.update(event_id, body.into(), caller.id()).await?;
    Ok(Json(json!({ "event": event })))
}

/// Delete event
#[utoipa::path(delete, path = "/events/{id}", tag = "events", params(("id" = i64, Path, description = "Event id")), responses((status = 200, description = "Deleted event"), (status = 403, description = "Caller is not the creator"), (status = 404, description = "Event not found")))]
pub async fn delete_event(
    caller: Caller,
    State(events): State<EventService>,
    ValidatedPath(event_id): ValidatedPath<i64>,
) -> Result<Json<Value>, EventError> {
    events.delete(event_id, caller.id()).await?;
    Ok(Json(json!({ "message": "event deleted successfully" })))
}
