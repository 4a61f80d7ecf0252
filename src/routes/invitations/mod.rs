pub mod models;

use crate::modules::extractors::jwt::Caller;
use crate::modules::AppState;
use crate::routes::invitations::models::{CreateInvitation, RespondInvitation};
use crate::utils::invitations::errors::InvitationError;
use crate::utils::invitations::models::{Invitation, InvitationDetails};
use crate::utils::invitations::InvitationService;
use crate::validation::{ValidatedJson, ValidatedPath};
use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{json, Value};
use tracing::trace;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invitation))
        .route("/received", get(get_received_invitations))
        .route("/sent", get(get_sent_invitations))
        .route("/:id", get(get_invitation).delete(cancel_invitation))
        .route("/:id/details", get(get_invitation_details))
        .route("/:id/respond", put(respond_invitation))
}

/// Invite a user to an event the caller created
#[utoipa::path(post, path = "/invitations", tag = "invitations", request_body = CreateInvitation, responses((status = 201, body = Invitation, description = "Sent invitation"), (status = 403, description = "Caller did not create the event"), (status = 404, description = "Event or invitee not found"), (status = 400, description = "Duplicate invitation or self invite")))]
pub async fn create_invitation(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedJson(body): ValidatedJson<CreateInvitation>,
) -> Result<(StatusCode, Json<Value>), InvitationError> {
    let invitation = invitations
        .create(body.event_id, body.invitee_id, caller.id(), body.message)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "invitation": invitation }))))
}

/// Invitations the caller received
#[utoipa::path(get, path = "/invitations/received", tag = "invitations", responses((status = 200, body = [Invitation], description = "Received invitations")))]
pub async fn get_received_invitations(
    caller: Caller,
    State(invitations): State<InvitationService>,
) -> Result<Json<Value>, InvitationError> {
    let invitations = invitations.get_for_invitee(caller.id()).await?;
    Ok(Json(json!({ "invitations": invitations })))
}

/// Invitations the caller sent
#[utoipa::path(get, path = "/invitations/sent", tag = "invitations", responses((status = 200, body = [Invitation], description = "Sent invitations")))]
pub async fn get_sent_invitations(
    caller: Caller,
    State(invitations): State<InvitationService>,
) -> Result<Json<Value>, InvitationError> {
    let invitations = invitations.get_for_inviter(caller.id()).await?;
    Ok(Json(json!({ "invitations": invitations })))
}

/// Invitations of an event that involve the caller
#[utoipa::path(get, path = "/events/{id}/invitations", tag = "invitations", params(("id" = i64, Path, description = "Event id")), responses((status = 200, body = [Invitation], description = "Event invitations visible to the caller")))]
pub async fn get_event_invitations(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedPath(event_id): ValidatedPath<i64>,
) -> Result<Json<Value>, InvitationError> {
    let invitations: Vec<Invitation> = invitations
        .get_by_event(event_id)
        .await?
        .into_iter()
        .filter(|invitation| invitation.involves(caller.id()))
        .collect();

    trace!(
        "{} invitation(s) of event {event_id} visible to user {}",
        invitations.len(),
        caller.id()
    );
    Ok(Json(json!({ "invitations": invitations })))
}

/// Get invitation
#[utoipa::path(get, path = "/invitations/{id}", tag = "invitations", params(("id" = i64, Path, description = "Invitation id")), responses((status = 200, body = Invitation), (status = 404, description = "Invitation not found")))]
pub async fn get_invitation(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedPath(invitation_id): ValidatedPath<i64>,
) -> Result<Json<Value>, InvitationError> {
    let invitation = invitations.get_by_id(invitation_id).await?;
    if !invitation.involves(caller.id()) {
        return Err(InvitationError::NotFound);
    }
    Ok(Json(json!({ "invitation": invitation })))
}

/// Invitation joined with its event, inviter and invitee
#[utoipa::path(get, path = "/invitations/{id}/details", tag = "invitations", params(("id" = i64, Path, description = "Invitation id")), responses((status = 200, body = InvitationDetails), (status = 404, description = "Invitation or a related entity not found")))]
pub async fn get_invitation_details(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedPath(invitation_id): ValidatedPath<i64>,
) -> Result<Json<InvitationDetails>, InvitationError> {
    let details = invitations.get_with_details(invitation_id).await?;
    if !details.invitation.involves(caller.id()) {
        return Err(InvitationError::NotFound);
    }
    Ok(Json(details))
}

/// Accept or decline a pending invitation
#[utoipa::path(put, path = "/invitations/{id}/respond", tag = "invitations", params(("id" = i64, Path, description = "Invitation id")), request_body = RespondInvitation, responses((status = 200, body = Invitation), (status = 403, description = "Caller is not the invitee"), (status = 400, description = "Invitation is no longer pending")))]
pub async fn respond_invitation(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedPath(invitation_id): ValidatedPath<i64>,
    ValidatedJson(body): ValidatedJson<RespondInvitation>,
) -> Result<Json<Value>, InvitationError> {
    let invitation = invitations
        .respond(invitation_id, caller.id(), body.status)
        .await?;
    Ok(Json(json!({ "invitation": invitation })))
}

/// Cancel a pending invitation
#[utoipa::path(delete, path = "/invitations/{id}", tag = "invitations", params(("id" = i64, Path, description = "Invitation id")), responses((status = 200, description = "Cancelled invitation"), (status = 403, description = "Caller is not the inviter"), (status = 400, description = "Invitation is no longer pending")))]
pub async fn cancel_invitation(
    caller: Caller,
    State(invitations): State<InvitationService>,
    ValidatedPath(invitation_id): ValidatedPath<i64>,
) -> Result<Json<Value>, InvitationError> {
    invitations.cancel(invitation_id, caller.id()).await?;
    Ok(Json(json!({ "message": "invitation cancelled successfully" })))
}
