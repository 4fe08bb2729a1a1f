//! Subcommand dispatch: one screen activation per invocation.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use chrono::TimeZone;
use tracing::{debug, warn};

use super::args::{Command, CreateArgs, EditArgs, ListArgs};
use super::render::{render_detail, render_listing, render_notices};
use crate::domain::EventId;
use crate::domain::ports::EventStore;
use crate::views::{
    AssumeYes, Confirmation, CreateView, DetailView, EventDraft, EventForm, ListView, Navigation,
};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunContext<Tz> {
    /// Zone used to read `datetime-local` input and to display times.
    pub zone: Tz,
    /// Delay before the detail screen reloads after a save.
    pub reload_delay: Duration,
}

/// Asks on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = io::stderr().lock();
        if let Err(error) = write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()) {
            warn!(%error, "failed to show confirmation prompt");
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => parse_answer(&line),
            Err(error) => {
                warn!(%error, "failed to read confirmation");
                false
            }
        }
    }
}

/// `y` or `yes`, in any case, confirms; anything else declines.
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Run one subcommand against `store`, writing the screen to `out`.
///
/// View failures are printed as notices; only write failures are returned.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub async fn run<S, Tz, C, W>(
    command: Command,
    store: &S,
    context: &RunContext<Tz>,
    confirmation: &C,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    C: Confirmation + ?Sized,
    W: Write,
{
    match command {
        Command::List(args) => list(store, context, &args, out).await,
        Command::Show { id } => show(store, context, id, out).await,
        Command::Edit { id, changes } => edit(store, context, id, changes, out).await,
        Command::Delete { id, yes } => {
            if yes {
                delete(store, context, id, &AssumeYes, out).await
            } else {
                delete(store, context, id, confirmation, out).await
            }
        }
        Command::Create(args) => create(store, context, args, out).await,
    }
}

async fn list<S, Tz, W>(
    store: &S,
    context: &RunContext<Tz>,
    args: &ListArgs,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    let mut view = ListView::load(store).await;
    view.set_search_term(args.search.as_str());
    view.select_category(&args.category);
    render_listing(out, &view, &context.zone)
}

async fn show<S, Tz, W>(
    store: &S,
    context: &RunContext<Tz>,
    id: EventId,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    let mut view = DetailView::load(store, id, context.reload_delay).await;
    render_notices(out, &view.take_notices())?;
    render_detail(out, &view, &context.zone)
}

async fn edit<S, Tz, W>(
    store: &S,
    context: &RunContext<Tz>,
    id: EventId,
    changes: EditArgs,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    let mut view = DetailView::load(store, id, context.reload_delay).await;
    if !view.begin_edit() {
        return render_notices(out, &view.take_notices());
    }
    if let Some(draft) = view.draft_mut() {
        apply_changes(draft, changes);
    }

    let navigation = view.save(store, &context.zone).await;
    render_notices(out, &view.take_notices())?;
    follow(store, context, id, navigation, out).await
}

async fn delete<S, Tz, C, W>(
    store: &S,
    context: &RunContext<Tz>,
    id: EventId,
    confirmation: &C,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    C: Confirmation + ?Sized,
    W: Write,
{
    let mut view = DetailView::load(store, id, context.reload_delay).await;
    if view.event().is_none() {
        return render_notices(out, &view.take_notices());
    }
    let navigation = view.delete(store, confirmation).await;
    render_notices(out, &view.take_notices())?;
    follow(store, context, id, navigation, out).await
}

async fn create<S, Tz, W>(
    store: &S,
    context: &RunContext<Tz>,
    args: CreateArgs,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    let mut view = CreateView::load(store).await;
    *view.form_mut() = EventForm {
        title: args.title,
        description: args.description,
        image: args.image,
        location: args.location,
        start_time: args.start,
        end_time: args.end,
        user: args.user,
        category: args.category,
    };

    let navigation = view.submit(store, &context.zone).await;
    render_notices(out, &view.take_notices())?;
    if let Some(event) = view.created() {
        writeln!(out, "[ok] Created event #{}", event.id)?;
    }
    if navigation == Navigation::EventList {
        writeln!(out)?;
        list(store, context, &ListArgs::default(), out).await?;
    }
    Ok(())
}

/// Carry out the navigation a view asked for.
async fn follow<S, Tz, W>(
    store: &S,
    context: &RunContext<Tz>,
    id: EventId,
    navigation: Navigation,
    out: &mut W,
) -> io::Result<()>
where
    S: EventStore + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    match navigation {
        Navigation::Stay => Ok(()),
        Navigation::EventList => {
            writeln!(out)?;
            list(store, context, &ListArgs::default(), out).await
        }
        Navigation::ReloadAfter(delay) => {
            debug!(event_id = %id, ?delay, "reloading event detail");
            out.flush()?;
            tokio::time::sleep(delay).await;
            writeln!(out)?;
            show(store, context, id, out).await
        }
    }
}

fn apply_changes(draft: &mut EventDraft, changes: EditArgs) {
    let EditArgs {
        title,
        description,
        user,
        category,
        image,
        location,
        start,
        end,
    } = changes;
    let fields = [
        (&mut draft.title, title),
        (&mut draft.description, description),
        (&mut draft.user, user),
        (&mut draft.category, category),
        (&mut draft.image, image),
        (&mut draft.location, location),
        (&mut draft.start_time, start),
        (&mut draft.end_time, end),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
}
