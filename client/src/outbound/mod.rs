//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **json_store**: reqwest-backed client for the JSON REST event store
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod json_store;
