//! Screen state for the event board.
//!
//! Each view fetches what it needs when entered, keeps user input as plain
//! local fields, and reports outcomes as [`Notice`]s plus a [`Navigation`]
//! request. Views talk to the store only through
//! [`EventStore`](crate::domain::ports::EventStore), so any shell (CLI, TUI,
//! web) can drive them.

pub mod card;
pub mod confirmation;
pub mod create;
pub mod detail;
pub mod list;
pub mod notice;

pub use self::card::{CreatorBadge, EventCard, SelectOption};
pub use self::confirmation::{AssumeYes, Confirmation};
pub use self::create::{CreateView, EventForm};
pub use self::detail::{DetailMode, DetailView, EventDraft};
pub use self::list::{EventListing, ListView, ListingError};
pub use self::notice::{Navigation, Notice, NoticeKind};
