#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};
use std::sync::Arc;

use chrono::Local;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tracing::{error, info};

use leadbook::config::{Cli, Config};
use leadbook::logging;
use leadbook::places::{AddressAutocomplete, PlacesClient, ScriptLoader, SuggestionPanel};
use leadbook::submit::{BookingSink, HttpSink, Outbox};
use leadbook::tui::{App, AppError};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli).map_err(AppError::from)?;
    logging::init(&config.log_path()).map_err(AppError::from)?;
    info!(data_dir = %config.data_dir.display(), "starting leadbook");

    // Background requests run on one worker while the UI loop owns this thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("leadbook-io")
        .enable_all()
        .build()?;
    let mut app = build_app(&config, &runtime)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);
    drop(app);

    let restore_result = restore_terminal();
    match result {
        Err(e) => {
            error!(error = %e, "leadbook stopped");
            Err(e.into())
        }
        Ok(()) => {
            info!("leadbook exited");
            restore_result.map_err(Into::into)
        }
    }
}

/// Picks the booking sink and, when an API key is configured, starts the
/// address lookup service in the background.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn build_app(config: &Config, runtime: &Runtime) -> Result<App, AppError> {
    let (sink, destination): (Arc<dyn BookingSink>, String) = match &config.endpoint {
        Some(endpoint) => {
            let sink = HttpSink::new(endpoint.clone(), config.submit_timeout)?;
            (Arc::new(sink), endpoint.clone())
        }
        None => {
            let outbox = Outbox::in_dir(&config.data_dir);
            let destination = outbox.path().display().to_string();
            (Arc::new(outbox), destination)
        }
    };
    info!(%destination, "bookings will be sent");

    let app = App::new(
        sink,
        destination,
        runtime.handle().clone(),
        Local::now().date_naive(),
    );
    let Some(api_key) = config.places_api_key.clone() else {
        info!("no places API key, address lookup disabled");
        return Ok(app);
    };

    let client = PlacesClient::new(api_key)?;
    let loader = ScriptLoader::new();
    let ready = loader.subscribe();
    let probe_client = client.clone();
    let limit = config.script_timeout;
    runtime.spawn(async move {
        loader.load(probe_client.probe(), limit).await;
    });

    let panel = SuggestionPanel::new(Arc::new(client), runtime.handle().clone());
    Ok(app.with_autocomplete(AddressAutocomplete::new(panel, ready)))
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
    raw_result.and(screen_result)
}
