//! Clap argument definitions for the `event-board` binary.

use clap::{Args, Parser, Subcommand};

use crate::domain::{ALL_CATEGORIES, EventId};

/// `event-board` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "event-board",
    about = "Browse, create, edit and delete events held in a JSON store",
    version
)]
pub struct Cli {
    /// Store base URL. Falls back to `EVENT_BOARD_BASE_URL` when omitted.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Screen to open.
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per screen interaction.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List events, optionally filtered by title and category.
    List(ListArgs),
    /// Show one event with its creator and categories.
    Show {
        /// Event id.
        #[arg(value_name = "id")]
        id: EventId,
    },
    /// Edit an event; omitted fields keep their current values.
    Edit {
        /// Event id.
        #[arg(value_name = "id")]
        id: EventId,
        /// Field overrides.
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Delete an event after confirmation.
    Delete {
        /// Event id.
        #[arg(value_name = "id")]
        id: EventId,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Create a new event.
    Create(CreateArgs),
}

/// List screen filters.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive title search.
    #[arg(long, value_name = "text", default_value = "")]
    pub search: String,
    /// Category id, or `all`.
    #[arg(long, value_name = "all|id", default_value = ALL_CATEGORIES)]
    pub category: String,
}

/// Overrides applied to the seeded draft. Times accept RFC 3339 or
/// `YYYY-MM-DDTHH:MM` in local time.
#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    /// New title.
    #[arg(long)]
    pub title: Option<String>,
    /// New description.
    #[arg(long)]
    pub description: Option<String>,
    /// Creator user id.
    #[arg(long, value_name = "id")]
    pub user: Option<String>,
    /// Primary category id.
    #[arg(long, value_name = "id")]
    pub category: Option<String>,
    /// New image URL.
    #[arg(long, value_name = "url")]
    pub image: Option<String>,
    /// New location.
    #[arg(long)]
    pub location: Option<String>,
    /// New start time.
    #[arg(long, value_name = "datetime")]
    pub start: Option<String>,
    /// New end time.
    #[arg(long, value_name = "datetime")]
    pub end: Option<String>,
}

/// Creation form values. Times accept RFC 3339 or `YYYY-MM-DDTHH:MM` in
/// local time.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Event title.
    #[arg(long)]
    pub title: String,
    /// Start time.
    #[arg(long, value_name = "datetime")]
    pub start: String,
    /// End time.
    #[arg(long, value_name = "datetime")]
    pub end: String,
    /// Creator user id.
    #[arg(long, value_name = "id")]
    pub user: String,
    /// Category id.
    #[arg(long, value_name = "id")]
    pub category: String,
    /// Event description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Image URL.
    #[arg(long, value_name = "url", default_value = "")]
    pub image: String,
    /// Where it happens.
    #[arg(long, default_value = "")]
    pub location: String,
}
