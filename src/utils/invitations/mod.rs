//! Invitation lifecycle.
//!
//! ```text
//! pending --(invitee)--> accepted | declined
//! pending --(inviter)--> removed
//! ```
//!
//! Nothing leaves `accepted` or `declined`. The store applies both
//! transitions conditionally on the row still being pending, so two
//! concurrent responses cannot both succeed.

pub mod errors;
pub mod models;

use crate::stores::{EventStore, InvitationStore, UserStore};
use errors::InvitationError;
use models::{Invitation, InvitationDetails, InvitationReply, InvitationStatus, NewInvitation};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::{debug, trace};

#[derive(Clone)]
pub struct InvitationService {
    invitations: Arc<dyn InvitationStore>,
    events: Arc<dyn EventStore>,
    users: Arc<dyn UserStore>,
}

impl InvitationService {
    pub fn new(
        invitations: Arc<dyn InvitationStore>,
        events: Arc<dyn EventStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            invitations,
            events,
            users,
        }
    }

    /// Checks run in a fixed order and stop at the first failure.
    pub async fn create(
        &self,
        event_id: i64,
        invitee_id: i64,
        inviter_id: i64,
        message: Option<String>,
    ) -> Result<Invitation, InvitationError> {
        let event = self
            .events
            .event_by_id(event_id)
            .await?
            .ok_or(InvitationError::EventNotFound)?;

        if event.creator_id != inviter_id {
            return Err(InvitationError::NotEventCreator);
        }

        if self.users.user_by_id(invitee_id).await?.is_none() {
            return Err(InvitationError::InviteeNotFound);
        }

        if self.invitations.invitation_exists(event_id, invitee_id).await? {
            return Err(InvitationError::AlreadySent);
        }

        if invitee_id == inviter_id {
            return Err(InvitationError::SelfInvite);
        }

        // A concurrent insert that slipped past the check above surfaces here
        // as a unique violation, which converts into `AlreadySent`.
        let invitation = self
            .invitations
            .create_invitation(NewInvitation {
                event_id,
                invitee_id,
                inviter_id,
                message,
                sent_at: OffsetDateTime::now_utc(),
            })
            .await?;

        debug!(
            "User {inviter_id} invited user {invitee_id} to event {event_id} ({})",
            invitation.id
        );
        Ok(invitation)
    }

    pub async fn respond(
        &self,
        id: i64,
        responder_id: i64,
        reply: InvitationReply,
    ) -> Result<Invitation, InvitationError> {
        let invitation = self.get_by_id(id).await?;

        if invitation.invitee_id != responder_id {
            return Err(InvitationError::NotInvitee);
        }
        if invitation.status.is_terminal() {
            return Err(InvitationError::AlreadyResponded);
        }

        let status = InvitationStatus::from(reply);
        let invitation = self
            .invitations
            .respond_to_invitation(id, status, OffsetDateTime::now_utc())
            .await?
            .ok_or(InvitationError::AlreadyResponded)?;

        debug!("User {responder_id} {status} invitation {id}");
        Ok(invitation)
    }

    /// Cancelling removes the invitation; it is not kept as `cancelled`.
    pub async fn cancel(&self, id: i64, canceller_id: i64) -> Result<(), InvitationError> {
        let invitation = self.get_by_id(id).await?;

        if invitation.inviter_id != canceller_id {
            return Err(InvitationError::NotInviter);
        }
        if invitation.status.is_terminal() {
            return Err(InvitationError::NotCancellable);
        }

        if !self.invitations.delete_pending_invitation(id).await? {
            return Err(InvitationError::NotCancellable);
        }

        debug!("User {canceller_id} cancelled invitation {id}");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Invitation, InvitationError> {
        self.invitations
            .invitation_by_id(id)
            .await?
            .ok_or(InvitationError::NotFound)
    }

    /// Unfiltered; callers narrow the result to what the requester may see.
    pub async fn get_by_event(&self, event_id: i64) -> Result<Vec<Invitation>, InvitationError> {
        Ok(self.invitations.invitations_by_event(event_id).await?)
    }

    pub async fn get_for_invitee(
        &self,
        invitee_id: i64,
    ) -> Result<Vec<Invitation>, InvitationError> {
        Ok(self.invitations.invitations_by_invitee(invitee_id).await?)
    }

    pub async fn get_for_inviter(
        &self,
        inviter_id: i64,
    ) -> Result<Vec<Invitation>, InvitationError> {
        Ok(self.invitations.invitations_by_inviter(inviter_id).await?)
    }

    pub async fn get_with_details(&self, id: i64) -> Result<InvitationDetails, InvitationError> {
        let invitation = self.get_by_id(id).await?;

        let event = self
            .events
            .event_by_id(invitation.event_id)
            .await?
            .ok_or(InvitationError::EventNotFound)?;
        let inviter = self
            .users
            .user_by_id(invitation.inviter_id)
            .await?
            .ok_or(InvitationError::InviterNotFound)?;
        let invitee = self
            .users
            .user_by_id(invitation.invitee_id)
            .await?
            .ok_or(InvitationError::InviteeNotFound)?;

        trace!("Joined details for invitation {id}");
        Ok(InvitationDetails {
            invitation,
            event,
            inviter,
            invitee,
        })
    }
}
