use crate::utils::invitations::models::InvitationReply;
use crate::validation::ValidateContent;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Serialize, Debug, Validate, ToSchema)]
pub struct CreateInvitation {
    pub event_id: i64,
    pub invitee_id: i64,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

impl ValidateContent for CreateInvitation {}

#[derive(Deserialize, Serialize, Debug, Validate, ToSchema)]
pub struct RespondInvitation {
    pub status: InvitationReply,
}

impl ValidateContent for RespondInvitation {}
