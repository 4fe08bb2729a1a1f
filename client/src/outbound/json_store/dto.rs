//! DTOs for the store's JSON records.
//!
//! Responses decode into these transport DTOs first, then map into domain
//! records in one pass. Request bodies are built from domain inputs.
//!
//! Event times are read leniently: other writers of the same store may save
//! `datetime-local` values without an offset, which are taken as UTC. A
//! collection record that still fails to decode is skipped and logged so one
//! bad row never hides the rest.

use std::fmt;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::{
    Category, CategoryId, CoercionError, Event, EventId, EventInput, User, UserId,
    coerce_timestamp, to_iso_string,
};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) image: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EventDto {
    pub(super) id: i64,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) image: String,
    #[serde(default)]
    pub(super) location: String,
    pub(super) start_time: String,
    pub(super) end_time: String,
    #[serde(default)]
    pub(super) created_by: Option<i64>,
    #[serde(default)]
    pub(super) category_ids: Vec<i64>,
}

/// Body of `POST /events` and `PUT /events/:id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EventPayloadDto<'a> {
    title: &'a str,
    description: &'a str,
    image: &'a str,
    location: &'a str,
    start_time: String,
    end_time: String,
    created_by: Option<i64>,
    category_ids: Vec<i64>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            name: dto.name,
            image: dto.image,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: CategoryId::new(dto.id),
            name: dto.name,
        }
    }
}

impl TryFrom<EventDto> for Event {
    type Error = CoercionError;

    fn try_from(dto: EventDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::new(dto.id),
            start_time: coerce_timestamp("startTime", &dto.start_time, &Utc)?,
            end_time: coerce_timestamp("endTime", &dto.end_time, &Utc)?,
            title: dto.title,
            description: dto.description,
            image: dto.image,
            location: dto.location,
            created_by: dto.created_by.map(UserId::new),
            category_ids: dto.category_ids.into_iter().map(CategoryId::new).collect(),
        })
    }
}

impl<'a> From<&'a EventInput> for EventPayloadDto<'a> {
    fn from(input: &'a EventInput) -> Self {
        Self {
            title: &input.title,
            description: &input.description,
            image: &input.image,
            location: &input.location,
            start_time: to_iso_string(&input.start_time),
            end_time: to_iso_string(&input.end_time),
            created_by: input.created_by.map(UserId::get),
            category_ids: input.category_ids.iter().map(|id| id.get()).collect(),
        }
    }
}

/// Decode a collection body, insisting on a top-level JSON array.
///
/// Records that fail to decode are dropped with a warning.
pub(super) fn decode_collection<D, T>(body: &[u8], collection: &str) -> Result<Vec<T>, String>
where
    D: DeserializeOwned,
    T: TryFrom<D>,
    T::Error: fmt::Display,
{
    let value: Value = serde_json::from_slice(body)
        .map_err(|error| format!("invalid JSON for /{collection}: {error}"))?;
    let Value::Array(records) = value else {
        return Err(format!(
            "expected a JSON array for /{collection}, found {}",
            json_kind(&value)
        ));
    };
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match decode_value::<D, T>(record) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                warn!(collection, index, %error, "skipping undecodable record");
                None
            }
        })
        .collect())
}

/// Decode a single record body.
pub(super) fn decode_record<D, T>(body: &[u8], path: &str) -> Result<T, String>
where
    D: DeserializeOwned,
    T: TryFrom<D>,
    T::Error: fmt::Display,
{
    serde_json::from_slice::<Value>(body)
        .map_err(|error| error.to_string())
        .and_then(decode_value::<D, T>)
        .map_err(|error| format!("invalid record at {path}: {error}"))
}

fn decode_value<D, T>(value: Value) -> Result<T, String>
where
    D: DeserializeOwned,
    T: TryFrom<D>,
    T::Error: fmt::Display,
{
    let dto: D = serde_json::from_value(value).map_err(|error| error.to_string())?;
    T::try_from(dto).map_err(|error| error.to_string())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
