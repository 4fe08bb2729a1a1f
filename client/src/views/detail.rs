//! Single event screen with inline editing and deletion.
//!
//! The screen is either viewing or editing. Entering edit mode seeds a draft
//! from the loaded event; saving sends every field back as a full replace and
//! always returns to viewing.

use std::fmt;
use std::time::Duration;

use chrono::TimeZone;
use tracing::{error, info, warn};

use super::card::{EventCard, SelectOption, category_options, find_creator, user_options};
use super::confirmation::Confirmation;
use super::notice::{CATEGORIES_LOAD_FAILED, Navigation, Notice, USERS_LOAD_FAILED};
use crate::domain::ports::EventStore;
use crate::domain::{
    Category, CategoryId, CoercionError, Event, EventId, EventInput, User, UserId,
    coerce_optional_id, coerce_timestamp, to_iso_string,
};

/// Question put to the [`Confirmation`] before deleting.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";
/// Notice after a successful save.
pub const UPDATE_SUCCEEDED: &str = "Details updated successfully! This page will reload.";
/// Notice after a failed save.
pub const UPDATE_FAILED: &str = "Failed to update event details";
/// Notice after a successful delete.
pub const DELETE_SUCCEEDED: &str = "Event deleted successfully";
/// Notice after a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete event";
/// Notice when the event itself cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load event";

/// Editable copy of an event, held as raw form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Creator select value.
    pub user: String,
    /// Select value for the first category.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Location text.
    pub location: String,
    /// RFC 3339 or `datetime-local` text.
    pub start_time: String,
    /// RFC 3339 or `datetime-local` text.
    pub end_time: String,
}

impl EventDraft {
    /// Seed every field from `event`. Times are seeded as ISO strings.
    pub fn seed(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            user: event.created_by.map(|id| id.to_string()).unwrap_or_default(),
            category: event
                .primary_category()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image: event.image.clone(),
            location: event.location.clone(),
            start_time: to_iso_string(&event.start_time),
            end_time: to_iso_string(&event.end_time),
        }
    }

    /// Coerce the draft into a full replace body for `original`.
    ///
    /// Only the first category is editable; further ids are carried over.
    pub fn to_input<Tz: TimeZone>(
        &self,
        original: &Event,
        zone: &Tz,
    ) -> Result<EventInput, CoercionError> {
        let created_by = coerce_optional_id::<UserId>("createdBy", &self.user)?;
        let category = coerce_optional_id::<CategoryId>("categoryIds", &self.category)?;
        let start_time = coerce_timestamp("startTime", &self.start_time, zone)?;
        let end_time = coerce_timestamp("endTime", &self.end_time, zone)?;

        Ok(EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            start_time,
            end_time,
            created_by,
            category_ids: replace_primary_category(&original.category_ids, category),
        })
    }
}

fn replace_primary_category(
    current: &[CategoryId],
    primary: Option<CategoryId>,
) -> Vec<CategoryId> {
    match (primary, current.split_first()) {
        (Some(primary), Some((_, rest))) => std::iter::once(primary)
            .chain(rest.iter().copied())
            .collect(),
        (Some(primary), None) => vec![primary],
        (None, _) => current.to_vec(),
    }
}

/// Viewing or editing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailMode {
    /// Showing the loaded event.
    #[default]
    Viewing,
    /// Holding a draft of the loaded event.
    Editing(EventDraft),
}

/// State of the detail screen for one event.
#[derive(Debug, Clone)]
pub struct DetailView {
    event_id: EventId,
    users: Vec<User>,
    categories: Vec<Category>,
    event: Option<Event>,
    mode: DetailMode,
    notices: Vec<Notice>,
    reload_delay: Duration,
}

impl DetailView {
    /// Fetch users, the event and categories concurrently.
    ///
    /// Only a failed event fetch leaves the view empty. A failed user or
    /// category fetch queues its own error notice and leaves that lookup
    /// empty, so the event can still be edited or deleted.
    pub async fn load<S>(store: &S, event_id: EventId, reload_delay: Duration) -> Self
    where
        S: EventStore + ?Sized,
    {
        let (users, event, categories) = tokio::join!(
            store.list_users(),
            store.get_event(event_id),
            store.list_categories()
        );

        let mut view = Self {
            event_id,
            users: Vec::new(),
            categories: Vec::new(),
            event: None,
            mode: DetailMode::Viewing,
            notices: Vec::new(),
            reload_delay,
        };
        match event {
            Ok(event) => view.event = Some(event),
            Err(err) => {
                error!(%event_id, error = %err, kind = err.kind(), "failed to load event");
                view.notices.push(Notice::error(LOAD_FAILED));
            }
        }
        match users {
            Ok(users) => view.users = users,
            Err(err) => {
                warn!(%event_id, error = %err, kind = err.kind(), "failed to load users for event");
                view.notices.push(Notice::error(USERS_LOAD_FAILED));
            }
        }
        match categories {
            Ok(categories) => view.categories = categories,
            Err(err) => {
                warn!(%event_id, error = %err, kind = err.kind(), "failed to load categories for event");
                view.notices.push(Notice::error(CATEGORIES_LOAD_FAILED));
            }
        }
        view
    }

    /// Id the screen was opened for.
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    /// The loaded event, absent when its fetch failed.
    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// Users fetched for the creator lookup.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Categories fetched for name lookup.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The event's creator, if it resolves.
    pub fn creator(&self) -> Option<&User> {
        self.event
            .as_ref()
            .and_then(|event| find_creator(event, &self.users))
    }

    /// Card for the loaded event.
    pub fn card<Tz>(&self, zone: &Tz) -> Option<EventCard>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.event
            .as_ref()
            .map(|event| EventCard::build(event, &self.users, &self.categories, zone))
    }

    /// Creator selector entries for the draft.
    pub fn user_options(&self) -> Vec<SelectOption> {
        user_options(&self.users)
    }

    /// Category selector entries for the draft.
    pub fn category_options(&self) -> Vec<SelectOption> {
        category_options(&self.categories)
    }

    /// Current mode.
    pub fn mode(&self) -> &DetailMode {
        &self.mode
    }

    /// Whether a draft is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DetailMode::Editing(_))
    }

    /// Switch to editing with a draft seeded from the loaded event.
    ///
    /// Returns `false` when there is no event to edit.
    pub fn begin_edit(&mut self) -> bool {
        let Some(event) = &self.event else {
            return false;
        };
        self.mode = DetailMode::Editing(EventDraft::seed(event));
        true
    }

    /// The open draft.
    pub fn draft(&self) -> Option<&EventDraft> {
        match &self.mode {
            DetailMode::Editing(draft) => Some(draft),
            DetailMode::Viewing => None,
        }
    }

    /// The open draft, for the shell to edit.
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        match &mut self.mode {
            DetailMode::Editing(draft) => Some(draft),
            DetailMode::Viewing => None,
        }
    }

    /// Drop the draft and return to viewing.
    pub fn cancel_edit(&mut self) {
        self.mode = DetailMode::Viewing;
    }

    /// Send the draft as a full replace.
    ///
    /// On success the screen asks to be reloaded after the configured delay;
    /// the loaded event is left as-is until then.
    pub async fn save<S, Tz>(&mut self, store: &S, zone: &Tz) -> Navigation
    where
        S: EventStore + ?Sized,
        Tz: TimeZone,
    {
        let DetailMode::Editing(draft) = std::mem::take(&mut self.mode) else {
            return Navigation::Stay;
        };
        let Some(original) = &self.event else {
            return Navigation::Stay;
        };

        let input = match draft.to_input(original, zone) {
            Ok(input) => input,
            Err(err) => {
                warn!(event_id = %self.event_id, error = %err, "edit rejected before sending");
                self.notices.push(Notice::error(UPDATE_FAILED));
                return Navigation::Stay;
            }
        };

        match store.replace_event(self.event_id, &input).await {
            Ok(_) => {
                info!(event_id = %self.event_id, "event updated");
                self.notices.push(Notice::success(UPDATE_SUCCEEDED));
                Navigation::ReloadAfter(self.reload_delay)
            }
            Err(err) => {
                error!(event_id = %self.event_id, error = %err, kind = err.kind(), "error updating event details");
                self.notices.push(Notice::error(UPDATE_FAILED));
                Navigation::Stay
            }
        }
    }

    /// Delete the event after an explicit confirmation.
    pub async fn delete<S, C>(&mut self, store: &S, confirmation: &C) -> Navigation
    where
        S: EventStore + ?Sized,
        C: Confirmation + ?Sized,
    {
        if !confirmation.confirm(DELETE_PROMPT) {
            return Navigation::Stay;
        }

        match store.delete_event(self.event_id).await {
            Ok(()) => {
                info!(event_id = %self.event_id, "event deleted");
                self.notices.push(Notice::success(DELETE_SUCCEEDED));
                Navigation::EventList
            }
            Err(err) => {
                error!(event_id = %self.event_id, error = %err, kind = err.kind(), "error deleting event");
                self.notices.push(Notice::error(DELETE_FAILED));
                Navigation::Stay
            }
        }
    }

    /// Notices queued since the last take.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand queued notices to the shell.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
