//! JSON REST store adapters.
//!
//! This module provides a reqwest implementation of the `EventStore` port
//! for stores exposing `/users`, `/events` and `/categories` collections.

mod dto;
mod http_store;

pub use http_store::HttpEventStore;
