pub mod errors;
pub mod models;

use crate::stores::EventStore;
use errors::EventError;
use models::{Event, EventChanges, NewEvent};
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::debug;

/// Event CRUD where only the creator may mutate or delete.
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn create(
        &self,
        title: String,
        description: Option<String>,
        date: OffsetDateTime,
        location: String,
        creator_id: i64,
    ) -> Result<Event, EventError> {
        let event = self
            .events
            .create_event(NewEvent {
                title,
                description,
                date,
                location,
                creator_id,
                created_at: OffsetDateTime::now_utc(),
            })
            .await?;

        debug!("User {creator_id} created event {}", event.id);
        Ok(event)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Event, EventError> {
        self.events
            .event_by_id(id)
            .await?
            .ok_or(EventError::NotFound)
    }

    pub async fn get_by_creator(&self, creator_id: i64) -> Result<Vec<Event>, EventError> {
        Ok(self.events.events_by_creator(creator_id).await?)
    }

    /// Every event, unfiltered. Served publicly.
    pub async fn get_all(&self) -> Result<Vec<Event>, EventError> {
        Ok(self.events.all_events().await?)
    }

    pub async fn update(
        &self,
        id: i64,
        changes: EventChanges,
        caller_id: i64,
    ) -> Result<Event, EventError> {
        let mut event = self.owned_event(id, caller_id, "update").await?;
        changes.apply(&mut event);
        event.updated_at = OffsetDateTime::now_utc();

        let event = self
            .events
            .update_event(&event)
            .await?
            .ok_or(EventError::NotFound)?;

        debug!("User {caller_id} updated event {id}");
        Ok(event)
    }

    pub async fn delete(&self, id: i64, caller_id: i64) -> Result<(), EventError> {
        self.owned_event(id, caller_id, "delete").await?;
        if !self.events.delete_event(id, caller_id).await? {
            return Err(EventError::NotFound);
        }

        debug!("User {caller_id} deleted event {id}");
        Ok(())
    }

    async fn owned_event(
        &self,
        id: i64,
        caller_id: i64,
        action: &'static str,
    ) -> Result<Event, EventError> {
        let event = self.get_by_id(id).await?;
        if event.creator_id != caller_id {
            return Err(EventError::NotCreator(action));
        }
        Ok(event)
    }
}
