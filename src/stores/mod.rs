//! Persistence boundary. Every method is a single statement against the
//! backing store; nothing here spans more than one round trip.

use crate::utils::auth::models::{NewUser, User};
use crate::utils::events::models::{Event, NewEvent};
use crate::utils::invitations::models::{Invitation, InvitationStatus, NewInvitation};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated")]
    UniqueViolation,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return Self::UniqueViolation;
            }
        }
        Self::Unexpected(anyhow::Error::from(e))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] on a taken username or email.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, event: NewEvent) -> StoreResult<Event>;
    async fn event_by_id(&self, id: i64) -> StoreResult<Option<Event>>;
    /// Newest `date` first.
    async fn events_by_creator(&self, creator_id: i64) -> StoreResult<Vec<Event>>;
    /// Newest `date` first.
    async fn all_events(&self) -> StoreResult<Vec<Event>>;
    /// Overwrites the mutable columns of the row with `event.id`.
    async fn update_event(&self, event: &Event) -> StoreResult<Option<Event>>;
    /// Removes the event and, by cascade, its invitations.
    async fn delete_event(&self, id: i64, creator_id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait InvitationStore: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] when the (event, invitee)
    /// pair already has an invitation.
    async fn create_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation>;
    async fn invitation_by_id(&self, id: i64) -> StoreResult<Option<Invitation>>;
    /// Newest `sent_at` first, as are the two listings below.
    async fn invitations_by_event(&self, event_id: i64) -> StoreResult<Vec<Invitation>>;
    async fn invitations_by_invitee(&self, invitee_id: i64) -> StoreResult<Vec<Invitation>>;
    async fn invitations_by_inviter(&self, inviter_id: i64) -> StoreResult<Vec<Invitation>>;
    async fn invitation_exists(&self, event_id: i64, invitee_id: i64) -> StoreResult<bool>;
    /// Moves a still pending invitation to `status`. `None` when the row is
    /// missing or no longer pending.
    async fn respond_to_invitation(
        &self,
        id: i64,
        status: InvitationStatus,
        at: OffsetDateTime,
    ) -> StoreResult<Option<Invitation>>;
    /// Deletes the row only while it is pending.
    async fn delete_pending_invitation(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}

/// Handles to every store, shared by the services.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub events: Arc<dyn EventStore>,
    pub invitations: Arc<dyn InvitationStore>,
    pub health: Arc<dyn HealthCheck>,
}

impl Stores {
    fn from_backend<B>(backend: B) -> Self
    where
        B: UserStore + EventStore + InvitationStore + HealthCheck + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            users: backend.clone(),
            events: backend.clone(),
            invitations: backend.clone(),
            health: backend,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::from_backend(PostgresStore::new(pool))
    }

    pub fn in_memory() -> Self {
        Self::from_backend(InMemoryStore::new())
    }
}
