//! Decree TUI - Terminal User Interface
//!
//! Ratatui-based policy grid with a row menu, confirmation dialogs and a
//! details panel.

mod app;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decree_core::auth::EnvTokenProvider;
use decree_core::config::{ConfigStore, DecreeConfig};
use decree_core::session::Session;

use crate::app::App;

const TICK: Duration = Duration::from_millis(250);
const LOG_FILE: &str = "decree-tui.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; the terminal belongs to the UI, so logs go to a file
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decree_tui=warn,decree_core=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer(dirs::cache_dir().map(|dir| dir.join("decree")))),
        )
        .init();

    let config = load_config()?;
    let tokens = EnvTokenProvider::new(config.token.env.clone(), config.token.kind);
    let session = Session::from_config(&config, tokens)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the TUI
    let res = run_tui(&mut terminal, App::new(session)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

/// `<dir>/decree-tui.log`, or nowhere when the file cannot be created.
fn log_writer(dir: Option<PathBuf>) -> BoxMakeWriter {
    let appender = dir.and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE)
            .build(dir)
            .ok()
    });
    match appender {
        Some(appender) => BoxMakeWriter::new(appender),
        None => BoxMakeWriter::new(std::io::sink),
    }
}

/// decree.toml from `DECREE_CONFIG` or the default location.
fn load_config() -> anyhow::Result<DecreeConfig> {
    let store = match std::env::var_os("DECREE_CONFIG") {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::with_defaults()?,
    };
    let config = store.load()?;
    config.require_complete()?;
    Ok(config)
}

async fn run_tui(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    app.start_loading();
    terminal.draw(|f| app.draw(f))?;
    app.load().await;

    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key.code).await {
                    return Ok(());
                }
            }
        }
        app.tick();
    }
}
