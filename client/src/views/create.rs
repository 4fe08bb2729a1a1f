//! New event screen.

use chrono::TimeZone;
use tracing::{error, info};

use super::card::{SelectOption, category_options, user_options};
use super::notice::{CATEGORIES_LOAD_FAILED, Navigation, Notice, USERS_LOAD_FAILED};
use crate::domain::ports::EventStore;
use crate::domain::{
    Category, CategoryId, CoercionError, Event, EventInput, User, UserId, coerce_optional_id,
    coerce_timestamp,
};

/// Notice text for a failed submit; the cause is appended.
pub const CREATE_FAILED: &str = "Failed to add event";

/// Raw values of the creation form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventForm {
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Location text.
    pub location: String,
    /// `datetime-local` value.
    pub start_time: String,
    /// `datetime-local` value.
    pub end_time: String,
    /// Creator select value.
    pub user: String,
    /// Category select value.
    pub category: String,
}

impl EventForm {
    /// Coerce times to UTC and ids to integers.
    pub fn to_input<Tz: TimeZone>(&self, zone: &Tz) -> Result<EventInput, CoercionError> {
        let start_time = coerce_timestamp("startTime", &self.start_time, zone)?;
        let end_time = coerce_timestamp("endTime", &self.end_time, zone)?;
        let created_by = coerce_optional_id::<UserId>("createdBy", &self.user)?;
        let category = coerce_optional_id::<CategoryId>("categoryIds", &self.category)?;

        Ok(EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            start_time,
            end_time,
            created_by,
            category_ids: category.into_iter().collect(),
        })
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// State of the creation screen.
#[derive(Debug, Clone, Default)]
pub struct CreateView {
    users: Vec<User>,
    categories: Vec<Category>,
    form: EventForm,
    created: Option<Event>,
    notices: Vec<Notice>,
}

impl CreateView {
    /// Fetch users and categories for the selectors.
    ///
    /// A failed fetch leaves that selector empty and queues an error notice.
    pub async fn load<S>(store: &S) -> Self
    where
        S: EventStore + ?Sized,
    {
        let (users, categories) = tokio::join!(store.list_users(), store.list_categories());
        let mut view = Self::default();
        match users {
            Ok(users) => view.users = users,
            Err(err) => {
                error!(error = %err, kind = err.kind(), "failed to load users for event form");
                view.notices.push(Notice::error(USERS_LOAD_FAILED));
            }
        }
        match categories {
            Ok(categories) => view.categories = categories,
            Err(err) => {
                error!(error = %err, kind = err.kind(), "failed to load categories for event form");
                view.notices.push(Notice::error(CATEGORIES_LOAD_FAILED));
            }
        }
        view
    }

    /// Current form values.
    pub fn form(&self) -> &EventForm {
        &self.form
    }

    /// Form values for the shell to fill in.
    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    /// Creator selector entries.
    pub fn user_options(&self) -> Vec<SelectOption> {
        user_options(&self.users)
    }

    /// Category selector entries.
    pub fn category_options(&self) -> Vec<SelectOption> {
        category_options(&self.categories)
    }

    /// The record returned by the last successful submit.
    pub fn created(&self) -> Option<&Event> {
        self.created.as_ref()
    }

    /// Coerce and submit the form.
    ///
    /// Success clears the form and returns to the list. Failures are logged
    /// and the form keeps its values.
    pub async fn submit<S, Tz>(&mut self, store: &S, zone: &Tz) -> Navigation
    where
        S: EventStore + ?Sized,
        Tz: TimeZone,
    {
        let input = match self.form.to_input(zone) {
            Ok(input) => input,
            Err(err) => {
                error!(error = %err, "failed to add event");
                self.notices.push(Notice::error(format!("{CREATE_FAILED}: {err}")));
                return Navigation::Stay;
            }
        };

        match store.create_event(&input).await {
            Ok(event) => {
                info!(event_id = %event.id, "event created");
                self.form.clear();
                self.created = Some(event);
                Navigation::EventList
            }
            Err(err) => {
                error!(error = %err, kind = err.kind(), "failed to add event");
                self.notices.push(Notice::error(format!("{CREATE_FAILED}: {err}")));
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
