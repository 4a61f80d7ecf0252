use crate::utils::auth::models::User;
use crate::utils::events::models::Event;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt::{Display, Formatter};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// `Pending` is the only state with outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invitation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    /// Never written by this service: cancelling removes the row.
    Cancelled,
}

impl InvitationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }
}

impl Display for InvitationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Cancelled => "cancelled",
        };
        write!(f, "{status}")
    }
}

/// Statuses an invitee may answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationReply {
    Accepted,
    Declined,
}

impl From<InvitationReply> for InvitationStatus {
    fn from(reply: InvitationReply) -> Self {
        match reply {
            InvitationReply::Accepted => InvitationStatus::Accepted,
            InvitationReply::Declined => InvitationStatus::Declined,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Invitation {
    pub id: i64,
    pub event_id: i64,
    pub invitee_id: i64,
    pub inviter_id: i64,
    pub status: InvitationStatus,
    pub message: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub responded_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Invitation {
    pub fn involves(&self, user_id: i64) -> bool {
        self.inviter_id == user_id || self.invitee_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub event_id: i64,
    pub invitee_id: i64,
    pub inviter_id: i64,
    pub message: Option<String>,
    pub sent_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvitationDetails {
    pub invitation: Invitation,
    pub event: Event,
    pub inviter: User,
    pub invitee: User,
}
