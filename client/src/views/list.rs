//! Event list screen: fetch everything, then filter locally.

use std::fmt;

use chrono::TimeZone;
use thiserror::Error;
use tracing::{debug, error};

use super::card::{EventCard, SelectOption, category_options};
use crate::domain::ports::EventStore;
use crate::domain::{ALL_CATEGORIES, Category, CategoryFilter, Event, EventFilter, User};

/// Label of the selector entry that disables category filtering.
pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

/// Reported when the event collection cannot be filtered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The event fetch failed or returned something other than a list.
    #[error("events are unavailable: {reason}")]
    EventsUnavailable {
        /// Why the collection is missing.
        reason: String,
    },
}

/// Filter output: possibly empty events, plus an error when the event
/// collection was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListing<'a> {
    /// Matching events in store order.
    pub events: Vec<&'a Event>,
    /// Set when there was no collection to filter.
    pub error: Option<ListingError>,
}

/// State of the list screen.
///
/// The three collections are fetched once when the screen is entered. Search
/// text and category selection only touch local state.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    users: Vec<User>,
    categories: Vec<Category>,
    events: Option<Vec<Event>>,
    filter: EventFilter,
    load_errors: Vec<String>,
}

impl ListView {
    /// Fetch users, events and categories concurrently.
    ///
    /// A failed fetch is recorded as an inline error; the other collections
    /// are still shown.
    pub async fn load<S>(store: &S) -> Self
    where
        S: EventStore + ?Sized,
    {
        let (users, events, categories) = tokio::join!(
            store.list_users(),
            store.list_events(),
            store.list_categories()
        );

        let mut load_errors = Vec::new();
        let users = users.unwrap_or_else(|err| {
            error!(error = %err, kind = err.kind(), "failed to load users");
            load_errors.push(err.to_string());
            Vec::new()
        });
        let categories = categories.unwrap_or_else(|err| {
            error!(error = %err, kind = err.kind(), "failed to load categories");
            load_errors.push(err.to_string());
            Vec::new()
        });
        let events = match events {
            Ok(events) => Some(events),
            Err(err) => {
                error!(error = %err, kind = err.kind(), "failed to load events");
                load_errors.push(err.to_string());
                None
            }
        };

        debug!(
            users = users.len(),
            categories = categories.len(),
            events = events.as_ref().map_or(0, Vec::len),
            "list view loaded"
        );
        Self::from_parts(users, categories, events, load_errors)
    }

    /// Assemble a view from already-fetched collections.
    pub fn from_parts(
        users: Vec<User>,
        categories: Vec<Category>,
        events: Option<Vec<Event>>,
        load_errors: Vec<String>,
    ) -> Self {
        Self {
            users,
            categories,
            events,
            filter: EventFilter::default(),
            load_errors,
        }
    }

    /// Replace the title search text.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Apply a raw category select value such as `all` or `3`.
    pub fn select_category(&mut self, raw: &str) {
        self.filter.category = CategoryFilter::parse(raw);
    }

    /// Current filter.
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Fetched users.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Fetched categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Inline error message for failed fetches, if any.
    pub fn error_message(&self) -> Option<String> {
        if self.load_errors.is_empty() {
            None
        } else {
            Some(self.load_errors.join("; "))
        }
    }

    /// Category selector entries, starting with "All Categories".
    pub fn category_options(&self) -> Vec<SelectOption> {
        let mut options = vec![SelectOption::new(ALL_CATEGORIES, ALL_CATEGORIES_LABEL)];
        options.extend(category_options(&self.categories));
        options
    }

    /// Events passing the current filter.
    ///
    /// When the event collection is absent the listing is empty and carries
    /// an error instead. The failure itself was logged by [`ListView::load`].
    pub fn listing(&self) -> EventListing<'_> {
        match &self.events {
            Some(events) => EventListing {
                events: self.filter.apply(events),
                error: None,
            },
            None => {
                let reason = self
                    .error_message()
                    .unwrap_or_else(|| "no event collection was loaded".to_owned());
                EventListing {
                    events: Vec::new(),
                    error: Some(ListingError::EventsUnavailable { reason }),
                }
            }
        }
    }

    /// Cards for the events passing the current filter.
    pub fn cards<Tz>(&self, zone: &Tz) -> Vec<EventCard>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.listing()
            .events
            .into_iter()
            .map(|event| EventCard::build(event, &self.users, &self.categories, zone))
            .collect()
    }
}
