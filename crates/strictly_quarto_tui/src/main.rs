//! Strictly Quarto - terminal front end
//!
//! Draws the board and piece picker, captures mouse clicks and keys, and
//! ticks the turn controller once per pass of the event loop.

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::Cli;
use config::QuartoConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = QuartoConfig::load(&cli.config)
        .context("Failed to load configuration")?
        .with_overrides(&cli);

    init_logging(&config)?;
    info!(?config, "Starting Strictly Quarto");

    run_tui(&config)
}

/// Logs to a file so tracing output does not tear the screen.
fn init_logging(config: &QuartoConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Sets up the terminal, runs the game loop, and restores the terminal.
fn run_tui(config: &QuartoConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_game(&mut terminal, &mut app, config.tick());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Game loop error");
        eprintln!("Error: {:?}", err);
    }

    info!("Strictly Quarto exited");
    Ok(())
}

/// Draw, poll input for at most one tick interval, then tick the controller.
#[instrument(skip_all, fields(tick_ms = tick.as_millis()))]
fn run_game(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    info!("Starting game loop");

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key.code),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    app.pointer_down(mouse.column, mouse.row)
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        app.tick();
    }
}
