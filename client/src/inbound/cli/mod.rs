//! Command-line shell over the view layer.
//!
//! Each subcommand activates one screen: it loads the view, applies the
//! requested interactions, and renders the result as plain text.

mod args;
mod commands;
mod render;

pub use args::{Cli, Command, CreateArgs, EditArgs, ListArgs};
pub use commands::{RunContext, StdinConfirmation, parse_answer, run};
pub use render::{render_detail, render_listing, render_notices};
