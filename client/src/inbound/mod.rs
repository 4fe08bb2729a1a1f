//! Inbound adapters that translate user input into view actions while
//! keeping terminal details at the edge.
//!
//! The command-line shell lives under [`cli`].

pub mod cli;
