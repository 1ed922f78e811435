//! trendlens - TikTok trend dashboard
//!
//! Terminal UI over a pre-computed trend snapshot: hashtags, songs,
//! clusters, and emerging trends, with summary charts and a detail view.

mod app;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use trendlens_core::{Config, SnapshotSource};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "trendlens", version, about = "TikTok trend dashboard")]
struct Cli {
    /// Snapshot path or URL, overriding the configured source
    #[arg(long)]
    data: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        trendlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("trendlens starting up");

    let source_spec = cli.data.unwrap_or_else(|| config.data.source.clone());
    let source = SnapshotSource::from_spec(&source_spec);
    tracing::info!(source = %source, "Using snapshot source");

    // Create app and load the initial snapshot; a failed load still starts
    // the UI, in its error state.
    let mut app = App::new(source, config.ui);
    app.reload();

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("trendlens shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Advance the refresh and insight timers
        app.tick(Instant::now());

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
