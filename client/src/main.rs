//! Event board entry-point: wires settings, logging and the JSON store into
//! the command-line shell.

use std::io;

use chrono::Local;
use clap::Parser;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use event_board::config::ClientSettings;
use event_board::inbound::cli::{Cli, RunContext, StdinConfirmation, run};
use event_board::outbound::json_store::HttpEventStore;

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = ClientSettings::load_from_env()
        .map_err(io::Error::other)?
        .with_base_url(cli.base_url.clone());
    init_tracing(settings.log_json);

    let base_url = settings.base_url().map_err(io::Error::other)?;
    let store = HttpEventStore::new(base_url, settings.timeout())
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    let context = RunContext {
        zone: Local,
        reload_delay: settings.reload_delay(),
    };

    let mut stdout = io::stdout().lock();
    run(cli.command, &store, &context, &StdinConfirmation, &mut stdout).await
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
