//! Entry point: wires CLI → loader → blocks → TUI event loop.
//!
//! This is the thin orchestrator that connects all pipeline stages.
//! It handles CLI argument parsing, logging setup, file I/O, terminal
//! initialization, the event loop, and graceful shutdown.

mod cli;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::eyre;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing_subscriber::EnvFilter;

use codeink::app::App;
use codeink::{clipboard, demo, parser, renderer};

use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    // Install color_eyre error/panic hooks for pretty backtraces.
    color_eyre::install()?;

    // Chain our panic hook to restore the terminal before printing the backtrace.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        original_hook(info);
    }));

    // Parse CLI arguments.
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Read the input into blocks, or fall back to the sample page.
    let (sources, title) = match &cli.file {
        Some(file) => (parser::load(file, cli.lang.as_deref())?, file.clone()),
        None => (demo::sample_blocks(), "samples".to_string()),
    };
    tracing::info!(blocks = sources.len(), %title, theme = cli.theme.name(), "starting codeink");

    // Create the application state.
    let mut app = App::new(
        sources,
        cli.block_config(),
        cli.theme,
        title,
        clipboard::open(cli.clipboard),
    );

    // Initialize the terminal (enters raw mode + alternate screen).
    let mut terminal = ratatui::init();

    // Main event loop.
    let result = run_event_loop(&mut terminal, &mut app);

    app.unmount();

    // Always restore the terminal, even if the loop returned an error.
    ratatui::restore();

    result
}

/// Sends `tracing` output to `path`. The terminal belongs to the TUI, so
/// logging is off unless a file is given.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("CODEINK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))
}

/// Runs the TUI event loop until the user quits or an error occurs.
///
/// Separated from `main()` so that `ratatui::restore()` always runs
/// regardless of how this function exits.
fn run_event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> color_eyre::Result<()> {
    loop {
        // Update the viewport from the current terminal size; this also
        // covers resize events.
        let size = terminal.size()?;
        app.resize(size.width, size.height.saturating_sub(1) as usize);
        app.signal_visible_blocks();

        // Draw the current frame.
        terminal.draw(|frame| renderer::draw(frame, app))?;

        // Deferred work runs after its placeholder frame is on screen.
        if app.run_pending(Instant::now()) {
            continue;
        }

        // Wait for input, waking up for the next copy-feedback or toast
        // expiry.
        let ready = match app.next_deadline() {
            Some(deadline) => event::poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true,
        };
        if ready {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                // Resize is picked up at the top of the loop; mouse, focus,
                // and paste events are ignored.
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.quit {
            break;
        }
    }

    Ok(())
}
