use super::{EventStore, HealthCheck, InvitationStore, StoreResult, UserStore};
use crate::utils::auth::models::{NewUser, User};
use crate::utils::events::models::{Event, NewEvent};
use crate::utils::invitations::models::{Invitation, InvitationStatus, NewInvitation};
use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, PgPool};
use time::OffsetDateTime;
use tracing::trace;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let user = query_as::<_, User>(
            r#"
                INSERT INTO users (username, email, password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $4)
                RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await?;

        trace!("Created user {}", user.id);
        Ok(user)
    }

    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists =
            query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl EventStore for PostgresStore {
    async fn create_event(&self, event: NewEvent) -> StoreResult<Event> {
        let event = query_as::<_, Event>(
            r#"
                INSERT INTO events (title, description, date, location, creator_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                RETURNING *
            "#,
        )
        .bind(event.title)
        .bind(event.description)
        .bind(event.date)
        .bind(event.location)
        .bind(event.creator_id)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await?;

        trace!("Created event {}", event.id);
        Ok(event)
    }

    async fn event_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        let event = query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    async fn events_by_creator(&self, creator_id: i64) -> StoreResult<Vec<Event>> {
        let events = query_as::<_, Event>(
            "SELECT * FROM events WHERE creator_id = $1 ORDER BY date DESC",
        )
        .bind(creator_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn all_events(&self) -> StoreResult<Vec<Event>> {
        let events = query_as::<_, Event>("SELECT * FROM events ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(events)
    }

    async fn update_event(&self, event: &Event) -> StoreResult<Option<Event>> {
        let event = query_as::<_, Event>(
            r#"
                UPDATE events
                SET title = $1, description = $2, date = $3, location = $4, updated_at = $5
                WHERE id = $6
                RETURNING *
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.location)
        .bind(event.updated_at)
        .bind(event.id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    async fn delete_event(&self, id: i64, creator_id: i64) -> StoreResult<bool> {
        let affected = query("DELETE FROM events WHERE id = $1 AND creator_id = $2")
            .bind(id)
            .bind(creator_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        trace!("Deleted {affected} event(s) with id {id}");
        Ok(affected > 0)
    }
}

#[async_trait]
impl InvitationStore for PostgresStore {
    async fn create_invitation(&self, invitation: NewInvitation) -> StoreResult<Invitation> {
        let invitation = query_as::<_, Invitation>(
            r#"
                INSERT INTO invitations (event_id, invitee_id, inviter_id, status, message, sent_at, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6, $6)
                RETURNING *
            "#,
        )
        .bind(invitation.event_id)
        .bind(invitation.invitee_id)
        .bind(invitation.inviter_id)
        .bind(InvitationStatus::Pending)
        .bind(invitation.message)
        .bind(invitation.sent_at)
        .fetch_one(&self.pool)
        .await?;

        trace!("Created invitation {} for event {}", invitation.id, invitation.event_id);
        Ok(invitation)
    }

    async fn invitation_by_id(&self, id: i64) -> StoreResult<Option<Invitation>> {
        let invitation = query_as::<_, Invitation>("SELECT * FROM invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(invitation)
    }

    async fn invitations_by_event(&self, event_id: i64) -> StoreResult<Vec<Invitation>> {
        let invitations = query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE event_id = $1 ORDER BY sent_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invitations)
    }

    async fn invitations_by_invitee(&self, invitee_id: i64) -> StoreResult<Vec<Invitation>> {
        let invitations = query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE invitee_id = $1 ORDER BY sent_at DESC",
        )
        .bind(invitee_id)
        .fetch_all(&self.pool)
        .await?;

        trace!("Got {} received invitations", invitations.len());
        Ok(invitations)
    }

    async fn invitations_by_inviter(&self, inviter_id: i64) -> StoreResult<Vec<Invitation>> {
        let invitations = query_as::<_, Invitation>(
            "SELECT * FROM invitations WHERE inviter_id = $1 ORDER BY sent_at DESC",
        )
        .bind(inviter_id)
        .fetch_all(&self.pool)
        .await?;

        trace!("Got {} sent invitations", invitations.len());
        Ok(invitations)
    }

    async fn invitation_exists(&self, event_id: i64, invitee_id: i64) -> StoreResult<bool> {
        let exists = query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM invitations WHERE event_id = $1 AND invitee_id = $2)",
        )
        .bind(event_id)
        .bind(invitee_id)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            trace!("Invitation was previously sent");
        }
        Ok(exists)
    }

    async fn respond_to_invitation(
        &self,
        id: i64,
        status: InvitationStatus,
        at: OffsetDateTime,
    ) -> StoreResult<Option<Invitation>> {
        let invitation = query_as::<_, Invitation>(
            r#"
                UPDATE invitations
                SET status = $1, responded_at = $2, updated_at = $2
                WHERE id = $3 AND status = $4
                RETURNING *
            "#,
        )
        .bind(status)
        .bind(at)
        .bind(id)
        .bind(InvitationStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invitation)
    }

    async fn delete_pending_invitation(&self, id: i64) -> StoreResult<bool> {
        let affected = query("DELETE FROM invitations WHERE id = $1 AND status = $2")
            .bind(id)
            .bind(InvitationStatus::Pending)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

#[async_trait]
impl HealthCheck for PostgresStore {
    async fn ping(&self) -> StoreResult<()> {
        query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
