use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use searchtui::{app::App, config::Config, logging};
use std::io::{self, Stdout};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "searchtui", version, about)]
struct Cli {
    /// Path to a config file (default: ~/.searchtui/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pre-fill the search box; press Enter to run it
    #[arg(short, long)]
    query: Option<String>,

    /// Log filter, e.g. "debug" or "searchtui=trace"
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.log_level.as_deref())?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting searchtui");

    let mut app = App::new(config);
    if let Some(query) = cli.query {
        app.search_mut().set_query(query);
    }

    let mut terminal = setup_terminal()?;
    let result = app.run(&mut terminal).await;
    let restored = restore_terminal(&mut terminal);

    finish(result, restored)
}

/// The event loop's error outranks a failed restore; the latter is only logged then.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    match (result, restored) {
        (Err(e), restored) => {
            error!("{:#}", e);
            if let Err(restore_err) = restored {
                error!("{:#}", restore_err);
            }
            Err(e)
        }
        (Ok(()), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(restore_err)
        }
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let terminal = enter_alternate_screen();
    if terminal.is_err() {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    }
    terminal
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Runs every restore step even if an earlier one fails; reports the first failure.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen");
    let cursor = terminal.show_cursor().context("Failed to show cursor");

    raw.and(screen).and(cursor)
}
