//! Courier - terminal HTTP client
//!
//! Startup:
//! - optional file logging (`--debug`)
//! - settings and palette
//! - terminal in raw mode on the alternate screen, restored on exit or panic
//! - the App loop on the Tokio main task, requests on worker tasks

use std::io;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use courier::constants::LOG_FILE_NAME;
use courier::{App, Executor, HttpTransport, Palette, Settings, TerminalEvents};

#[derive(Parser)]
#[command(name = "courier", version, about = "Terminal HTTP client")]
struct Cli {
    /// Write a debug log to courier.log in the working directory
    #[arg(short, long)]
    debug: bool,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = cli.debug.then(init_logging);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting");

    let settings = Settings::load_or_default();
    let palette = Palette::from_settings(&settings.colors).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid colour in settings, using defaults");
        Palette::default()
    });

    // Restore the terminal before the default hook prints the panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_panic(info);
    }));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let executor = Executor::new(Arc::new(HttpTransport::new()), Handle::current());
    let mut app = App::new(Rect::new(0, 0, size.width, size.height), palette, executor);
    app.run(&mut terminal, &mut TerminalEvents)?;

    tracing::info!("Exiting");
    Ok(())
}
