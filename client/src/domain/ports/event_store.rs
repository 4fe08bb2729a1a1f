//! Driven port for the remote event store.
//!
//! The store exposes plain CRUD over three collections. Its records are
//! authoritative; the client keeps no state between calls and writes are
//! last-writer-wins.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Category, Event, EventId, EventInput, User};

define_port_error! {
    /// Errors surfaced while talking to the event store.
    pub enum EventStoreError {
        /// The request never produced a response.
        Transport {
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store transport failed: {message}",
        /// The request exceeded the client timeout.
        Timeout {
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store timed out: {message}",
        /// The addressed record does not exist.
        NotFound {
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store record not found: {message}",
        /// The store answered with a non-success status.
        Rejected {
            /// HTTP status code.
            status: u16,
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store rejected request with status {status}: {message}",
        /// The response body did not have the expected shape.
        Decode {
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest {
            /// Detail from the adapter or the response body.
            message: String,
        } =>
            "event store request invalid: {message}",
    }
}

/// Port for reading and mutating store records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>, EventStoreError>;

    /// `GET /categories`
    async fn list_categories(&self) -> Result<Vec<Category>, EventStoreError>;

    /// `GET /events`
    async fn list_events(&self) -> Result<Vec<Event>, EventStoreError>;

    /// `GET /events/:id`
    async fn get_event(&self, id: EventId) -> Result<Event, EventStoreError>;

    /// `POST /events`, returning the record with its assigned id.
    async fn create_event(&self, input: &EventInput) -> Result<Event, EventStoreError>;

    /// `PUT /events/:id`, replacing every field of the record.
    async fn replace_event(
        &self,
        id: EventId,
        input: &EventInput,
    ) -> Result<Event, EventStoreError>;

    /// `DELETE /events/:id`
    async fn delete_event(&self, id: EventId) -> Result<(), EventStoreError>;
}

#[derive(Debug, Default)]
struct FixtureCollections {
    users: Vec<User>,
    categories: Vec<Category>,
    events: Vec<Event>,
}

/// In-memory store used as a test double and for local demos.
///
/// New events get `max(id) + 1`, mirroring a JSON file store.
///
/// # Examples
/// ```
/// use event_board::domain::ports::{EventStore, FixtureEventStore};
///
/// # tokio::runtime::Builder::new_current_thread()
/// #     .build()
/// #     .expect("runtime")
/// #     .block_on(async {
/// let store = FixtureEventStore::default();
/// let events = store.list_events().await.expect("fixture never fails");
/// assert!(events.is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct FixtureEventStore {
    collections: Mutex<FixtureCollections>,
}

impl FixtureEventStore {
    /// Seed the store with the given collections.
    pub fn new(users: Vec<User>, categories: Vec<Category>, events: Vec<Event>) -> Self {
        Self {
            collections: Mutex::new(FixtureCollections {
                users,
                categories,
                events,
            }),
        }
    }

    /// Snapshot of the stored events.
    pub fn events(&self) -> Vec<Event> {
        self.lock()
            .map(|collections| collections.events.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, FixtureCollections>, EventStoreError> {
        self.collections
            .lock()
            .map_err(|_| EventStoreError::transport("fixture store lock poisoned"))
    }
}

fn missing(id: EventId) -> EventStoreError {
    EventStoreError::not_found(format!("event {id}"))
}

#[async_trait]
impl EventStore for FixtureEventStore {
    async fn list_users(&self) -> Result<Vec<User>, EventStoreError> {
        Ok(self.lock()?.users.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, EventStoreError> {
        Ok(self.lock()?.categories.clone())
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventStoreError> {
        Ok(self.lock()?.events.clone())
    }

    async fn get_event(&self, id: EventId) -> Result<Event, EventStoreError> {
        self.lock()?
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| missing(id))
    }

    async fn create_event(&self, input: &EventInput) -> Result<Event, EventStoreError> {
        let mut collections = self.lock()?;
        let next_id = collections
            .events
            .iter()
            .map(|event| event.id.get())
            .max()
            .map_or(1, |max| max + 1);
        let event = input.clone().into_event(EventId::new(next_id));
        collections.events.push(event.clone());
        Ok(event)
    }

    async fn replace_event(
        &self,
        id: EventId,
        input: &EventInput,
    ) -> Result<Event, EventStoreError> {
        let mut collections = self.lock()?;
        let slot = collections
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| missing(id))?;
        *slot = input.clone().into_event(id);
        Ok(slot.clone())
    }

    async fn delete_event(&self, id: EventId) -> Result<(), EventStoreError> {
        let mut collections = self.lock()?;
        let before = collections.events.len();
        collections.events.retain(|event| event.id != id);
        if collections.events.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }
}
