//! Shared helpers for event board integration tests.
//!
//! Integration tests compile as separate crates under `client/tests/`, so the
//! in-process JSON store double lives here rather than being copied around.

pub mod json_store;
