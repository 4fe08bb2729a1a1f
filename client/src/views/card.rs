//! Read-only projection of an event joined with its users and categories.

use std::fmt;

use chrono::TimeZone;

use crate::domain::{Category, CategoryId, Event, EventId, User, display_local};

/// Creator shown on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorBadge {
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub avatar: String,
}

/// Everything needed to draw one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    /// Event id.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Location text.
    pub location: String,
    /// Start as `M/D/YYYY, h:mm AM` in the viewer's zone.
    pub starts: String,
    /// End, formatted like `starts`.
    pub ends: String,
    /// Names of the event's categories; ids that do not resolve are skipped.
    pub categories: Vec<String>,
    /// `None` when the creator id does not resolve.
    pub creator: Option<CreatorBadge>,
}

impl EventCard {
    /// Join `event` with the fetched collections, formatting times in `zone`.
    pub fn build<Tz>(event: &Event, users: &[User], categories: &[Category], zone: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            image: event.image.clone(),
            location: event.location.clone(),
            starts: display_local(&event.start_time, zone),
            ends: display_local(&event.end_time, zone),
            categories: category_names(&event.category_ids, categories),
            creator: find_creator(event, users).map(|user| CreatorBadge {
                name: user.name.clone(),
                avatar: user.image.clone(),
            }),
        }
    }
}

/// The user who created `event`, if known.
pub fn find_creator<'a>(event: &Event, users: &'a [User]) -> Option<&'a User> {
    let creator = event.created_by?;
    users.iter().find(|user| user.id == creator)
}

/// Resolve category ids to names, keeping id order.
pub fn category_names(ids: &[CategoryId], categories: &[Category]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| categories.iter().find(|category| category.id == *id))
        .map(|category| category.name.clone())
        .collect()
}

/// One entry of a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Shown text.
    pub label: String,
}

impl SelectOption {
    /// Pair a value with its label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for a user select, in store order.
pub fn user_options(users: &[User]) -> Vec<SelectOption> {
    users
        .iter()
        .map(|user| SelectOption::new(user.id.to_string(), user.name.as_str()))
        .collect()
}

/// Options for a category select, in store order.
pub fn category_options(categories: &[Category]) -> Vec<SelectOption> {
    categories
        .iter()
        .map(|category| SelectOption::new(category.id.to_string(), category.name.as_str()))
        .collect()
}
