//! Domain ports defining the edges of the hexagon.
//!
//! The only driven dependency is the remote event store. Its trait exposes a
//! strongly typed error so adapters map transport failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod event_store;

#[cfg(test)]
pub use event_store::MockEventStore;
pub use event_store::{EventStore, EventStoreError, FixtureEventStore};
