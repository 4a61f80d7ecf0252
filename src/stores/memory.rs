use super::{EventStore, HealthCheck, InvitationStore, StoreError, StoreResult, UserStore};
use crate::utils::auth::models::{NewUser, User};
use crate::utils::events::models::{Event, NewEvent};
use crate::utils::invitations::models::{Invitation, InvitationStatus, NewInvitation};
use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::trace;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    events: BTreeMap<i64, Event>,
    invitations: BTreeMap<i64, Invitation>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn sorted_invitations(&self, filter: impl Fn(&Invitation) -> bool) -> Vec<Invitation> {
        let mut invitations: Vec<Invitation> = self
            .invitations
            .values()
            .filter(|invitation| filter(invitation))
            .cloned()
            .collect();
        invitations.sort_by_key(|invitation| Reverse((invitation.sent_at, invitation.id)));
        invitations
    }

    fn sorted_events(&self, filter: impl Fn(&Event) -> bool) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .values()
            .filter(|event| filter(event))
            .cloned()
            .collect();
        events.sort_by_key(|event| Reverse((event.date, event.id)));
        events
    }
}

/// Store kept entirely in process memory. Mirrors the constraints of the
/// relational schema: unique username/email, unique (event, invitee) and
/// cascading event deletion.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.username == user.username || u.email == user.email);
        if taken {
            return Err(StoreError::UniqueViolation);
        }

        let id = tables.next_id();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        };
        tables.users.insert(id, user.clone());

        trace!("Created user {id}");
        Ok(user)
    }

    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let event = Event {
            id,
            title: event.title,
            description: event.description,
            date: event.date,
            location: event.location,
            creator_id: event.creator_id,
            created_at: event.created_at,
            updated_at: event.created_at,
        };
        tables.events.insert(id, event.clone());

        trace!("Created event {id}");
        Ok(event)
    }

    async fn event_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.tables.read().await.events.get(&id).cloned())
    }

    async fn events_by_creator(&self, creator_id: i64) -> StoreResult<Vec<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_events(|event| event.creator_id == creator_id))
    }

    async fn all_events(&self) -> StoreResult<Vec<Event>> {
        Ok(self.tables.read().await.sorted_events(|_| true))
    }

    async fn update_event(&self, event: &Event) -> StoreResult<Option<Event>> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.events.get_mut(&event.id) else {
            return Ok(None);
        };
        stored.title = event.title.clone();
        stored.description = event.description.clone();
        stored.date = event.date;
        stored.location = event.location.clone();
        stored.updated_at = event.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete_event(&self, id: i64, creator_id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .events
            .get(&id)
            .map_or(false, |event| event.creator_id == creator_id);
        if !owned {
            return Ok(false);
        }
        tables.events.remove(&id);
        tables.invitations.retain(|_, invitation| invitation.event_id != id);

        trace!("Deleted event {id}");
        Ok(true)
    }
}

#[async_trait]
impl InvitationStore for InMemoryStore {
    async fn create_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation> {
        let mut tables = self.tables.write().await;
        let duplicate = tables.invitations.values().any(|existing| {
            existing.event_id == invitation.event_id && existing.invitee_id == invitation.invitee_id
        });
        if duplicate {
            return Err(StoreError::UniqueViolation);
        }

        let id = tables.next_id();
        let invitation = Invitation {
            id,
            event_id: invitation.event_id,
            invitee_id: invitation.invitee_id,
            inviter_id: invitation.inviter_id,
            status: InvitationStatus::Pending,
            message: invitation.message,
            sent_at: invitation.sent_at,
            responded_at: None,
            created_at: invitation.sent_at,
            updated_at: invitation.sent_at,
        };
        tables.invitations.insert(id, invitation.clone());

        trace!("Created invitation {id} for event {}", invitation.event_id);
        Ok(invitation)
    }

    async fn invitation_by_id(&self, id: i64) -> StoreResult<Option<Invitation>> {
        Ok(self.tables.read().await.invitations.get(&id).cloned())
    }

    async fn invitations_by_event(&self, event_id: i64) -> StoreResult<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_invitations(|invitation| invitation.event_id == event_id))
    }

    async fn invitations_by_invitee(&self, invitee_id: i64) -> StoreResult<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_invitations(|invitation| invitation.invitee_id == invitee_id))
    }

    async fn invitations_by_inviter(&self, inviter_id: i64) -> StoreResult<Vec<Invitation>> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_invitations(|invitation| invitation.inviter_id == inviter_id))
    }

    async fn invitation_exists(&self, event_id: i64, invitee_id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .invitations
            .values()
            .any(|invitation| invitation.event_id == event_id && invitation.invitee_id == invitee_id))
    }

    async fn respond_to_invitation(
        &self,
        id: i64,
        status: InvitationStatus,
        at: OffsetDateTime,
    ) -> StoreResult<Option<Invitation>> {
        let mut tables = self.tables.write().await;
        let Some(invitation) = tables.invitations.get_mut(&id) else {
            return Ok(None);
        };
        if invitation.status != InvitationStatus::Pending {
            return Ok(None);
        }
        invitation.status = status;
        invitation.responded_at = Some(at);
        invitation.updated_at = at;
        Ok(Some(invitation.clone()))
    }

    async fn delete_pending_invitation(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let pending = tables
            .invitations
            .get(&id)
            .map_or(false, |invitation| invitation.status == InvitationStatus::Pending);
        if pending {
            tables.invitations.remove(&id);
        }
        Ok(pending)
    }
}

#[async_trait]
impl HealthCheck for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
