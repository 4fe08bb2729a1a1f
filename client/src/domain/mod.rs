//! Domain primitives for the event board.
//!
//! Purpose: define the records fetched from the store, the coercions applied
//! to form input, and the client-side filter. Nothing here performs I/O;
//! the store is reached through [`ports::EventStore`].
//!
//! Public surface:
//! - `User`, `Category`, `Event`, `EventInput`: store records.
//! - `UserId`, `CategoryId`, `EventId`: integer keys.
//! - `EventFilter`, `CategoryFilter`: list view filtering.
//! - `coerce_timestamp`, `coerce_optional_id`: form coercion.

pub mod coercion;
pub mod filter;
pub mod ids;
pub mod ports;
pub mod records;
pub mod timestamp;

pub use self::coercion::{CoercionError, coerce_optional_id};
pub use self::filter::{ALL_CATEGORIES, CategoryFilter, EventFilter, title_contains};
pub use self::ids::{CategoryId, EventId, UserId};
pub use self::records::{Category, Event, EventInput, User};
pub use self::timestamp::{coerce_timestamp, display_local, to_iso_string, to_local_input};
