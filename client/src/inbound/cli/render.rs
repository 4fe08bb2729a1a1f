//! Plain-text rendering of view state.

use std::fmt;
use std::io::{self, Write};

use chrono::TimeZone;

use crate::views::{DetailView, EventCard, ListView, Notice, NoticeKind};

/// Print the category selector, any inline error, and one card per
/// matching event.
pub fn render_listing<W, Tz>(out: &mut W, view: &ListView, zone: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let selected = view.filter().category.as_select_value();
    let options = view
        .category_options()
        .into_iter()
        .map(|option| {
            if option.value == selected {
                format!("[{}]", option.label)
            } else {
                option.label
            }
        })
        .collect::<Vec<_>>();
    writeln!(out, "Categories: {}", options.join(" | "))?;
    if !view.filter().search_term.is_empty() {
        writeln!(out, "Search: {}", view.filter().search_term)?;
    }

    if let Some(error) = view.listing().error {
        return writeln!(out, "Error: {error}");
    }
    if let Some(message) = view.error_message() {
        writeln!(out, "Error: {message}")?;
    }

    let cards = view.cards(zone);
    if cards.is_empty() {
        writeln!(out, "No events found.")?;
    }
    for card in &cards {
        writeln!(out)?;
        render_card(out, card)?;
    }
    Ok(())
}

/// Print the loaded event, or nothing when the load failed.
pub fn render_detail<W, Tz>(out: &mut W, view: &DetailView, zone: &Tz) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(card) = view.card(zone) else {
        return Ok(());
    };
    render_card(out, &card)?;
    if !card.description.is_empty() {
        writeln!(out, "    {}", card.description)?;
    }
    if !card.image.is_empty() {
        writeln!(out, "    Image: {}", card.image)?;
    }
    let avatar = card.creator.as_ref().map_or("", |creator| creator.avatar.as_str());
    if !avatar.is_empty() {
        writeln!(out, "    Avatar: {avatar}")?;
    }
    Ok(())
}

/// One `[ok]` or `[error]` line per notice.
pub fn render_notices<W: Write>(out: &mut W, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        let tag = match notice.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        };
        writeln!(out, "[{tag}] {}", notice.message)?;
    }
    Ok(())
}

fn render_card<W: Write>(out: &mut W, card: &EventCard) -> io::Result<()> {
    writeln!(out, "#{} {}", card.id, card.title)?;
    writeln!(out, "    When: {} - {}", card.starts, card.ends)?;
    if !card.location.is_empty() {
        writeln!(out, "    Where: {}", card.location)?;
    }
    if !card.categories.is_empty() {
        writeln!(out, "    Categories: {}", card.categories.join(", "))?;
    }
    let creator = card
        .creator
        .as_ref()
        .map_or("unknown user", |creator| creator.name.as_str());
    writeln!(out, "    Created by: {creator}")?;
    Ok(())
}
