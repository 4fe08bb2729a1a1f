//! Reqwest-backed event store adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use tracing::debug;

use super::dto::{
    CategoryDto, EventDto, EventPayloadDto, UserDto, decode_collection, decode_record,
};
use crate::domain::ports::{EventStore, EventStoreError};
use crate::domain::{Category, Event, EventId, EventInput, User};

const USERS_PATH: &str = "users";
const CATEGORIES_PATH: &str = "categories";
const EVENTS_PATH: &str = "events";

/// Event store adapter speaking plain JSON REST against one base URL.
pub struct HttpEventStore {
    client: Client,
    base_url: Url,
}

impl HttpEventStore {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// Collection paths are resolved relative to `base_url`, so
    /// `http://host/api` and `http://host/api/` both address `http://host/api/events`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL that collection paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, EventStoreError> {
        self.base_url.join(path).map_err(|error| {
            EventStoreError::invalid_request(format!("cannot address {path}: {error}"))
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&EventInput>,
    ) -> Result<Vec<u8>, EventStoreError> {
        let url = self.url(path)?;
        debug!(%method, %url, "sending event store request");
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(input) = payload {
            request = request.json(&EventPayloadDto::from(input));
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, path, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl EventStore for HttpEventStore {
    async fn list_users(&self) -> Result<Vec<User>, EventStoreError> {
        let body = self.send(Method::GET, USERS_PATH, None).await?;
        decode_collection::<UserDto, User>(&body, USERS_PATH).map_err(EventStoreError::decode)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, EventStoreError> {
        let body = self.send(Method::GET, CATEGORIES_PATH, None).await?;
        decode_collection::<CategoryDto, Category>(&body, CATEGORIES_PATH)
            .map_err(EventStoreError::decode)
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventStoreError> {
        let body = self.send(Method::GET, EVENTS_PATH, None).await?;
        decode_collection::<EventDto, Event>(&body, EVENTS_PATH).map_err(EventStoreError::decode)
    }

    async fn get_event(&self, id: EventId) -> Result<Event, EventStoreError> {
        let path = event_path(id);
        let body = self.send(Method::GET, &path, None).await?;
        decode_record::<EventDto, Event>(&body, &path).map_err(EventStoreError::decode)
    }

    async fn create_event(&self, input: &EventInput) -> Result<Event, EventStoreError> {
        let body = self.send(Method::POST, EVENTS_PATH, Some(input)).await?;
        decode_record::<EventDto, Event>(&body, EVENTS_PATH).map_err(EventStoreError::decode)
    }

    async fn replace_event(
        &self,
        id: EventId,
        input: &EventInput,
    ) -> Result<Event, EventStoreError> {
        let path = event_path(id);
        let body = self.send(Method::PUT, &path, Some(input)).await?;
        decode_record::<EventDto, Event>(&body, &path).map_err(EventStoreError::decode)
    }

    async fn delete_event(&self, id: EventId) -> Result<(), EventStoreError> {
        // The store echoes an empty object; nothing in it is needed.
        self.send(Method::DELETE, &event_path(id), None).await?;
        Ok(())
    }
}

fn event_path(id: EventId) -> String {
    format!("{EVENTS_PATH}/{id}")
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn map_transport_error(error: reqwest::Error) -> EventStoreError {
    if error.is_timeout() {
        EventStoreError::timeout(error.to_string())
    } else {
        EventStoreError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, path: &str, body: &[u8]) -> EventStoreError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("/{path}")
    } else {
        format!("/{path}: {body_preview}")
    };

    match status {
        StatusCode::NOT_FOUND => EventStoreError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            EventStoreError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => EventStoreError::rejected(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
