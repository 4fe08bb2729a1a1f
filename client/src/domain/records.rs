//! Records held by the store.
//!
//! The client only ever holds disposable copies of these. They are fetched
//! when a screen is entered and dropped when it is left.

use chrono::{DateTime, Utc};

use super::{CategoryId, EventId, UserId};

/// A person who can author events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub image: String,
}

/// A tag applied to events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Store-assigned id.
    pub id: CategoryId,
    /// Label shown in selectors and on cards.
    pub name: String,
}

/// A scheduled occurrence.
///
/// `created_by` and `category_ids` are foreign keys into the user and
/// category collections. Nothing checks that they resolve; views treat an
/// unknown reference as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Store-assigned id.
    pub id: EventId,
    /// Headline, matched by the list search.
    pub title: String,
    /// Free text.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Free text; empty when unset.
    pub location: String,
    /// Start instant.
    pub start_time: DateTime<Utc>,
    /// End instant.
    pub end_time: DateTime<Utc>,
    /// `None` when the store record carries no creator.
    pub created_by: Option<UserId>,
    /// Tags in store order.
    pub category_ids: Vec<CategoryId>,
}

impl Event {
    /// The first category id, which is the only one the forms can edit.
    pub fn primary_category(&self) -> Option<CategoryId> {
        self.category_ids.first().copied()
    }

    /// Whether the event is tagged with `category`.
    pub fn has_category(&self, category: CategoryId) -> bool {
        self.category_ids.contains(&category)
    }

    /// Every field except the id, ready to be sent back as a full replace.
    pub fn to_input(&self) -> EventInput {
        EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            created_by: self.created_by,
            category_ids: self.category_ids.clone(),
        }
    }
}

/// Event fields without an id.
///
/// Used as the body of both create and full-record replace requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    /// See [`Event::title`].
    pub title: String,
    /// See [`Event::description`].
    pub description: String,
    /// See [`Event::image`].
    pub image: String,
    /// See [`Event::location`].
    pub location: String,
    /// See [`Event::start_time`].
    pub start_time: DateTime<Utc>,
    /// See [`Event::end_time`].
    pub end_time: DateTime<Utc>,
    /// See [`Event::created_by`].
    pub created_by: Option<UserId>,
    /// See [`Event::category_ids`].
    pub category_ids: Vec<CategoryId>,
}

impl EventInput {
    /// Attach the id the store assigned.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            created_by: self.created_by,
            category_ids: self.category_ids,
        }
    }
}
