//! cospal - Cosine Color Palette Generator
//!
//! A terminal playground for palettes of the form
//! `color(x) = A + B*cos(2*pi*(C*x + D))` per RGB channel.
//!
//! # Usage
//!
//! ```bash
//! # Start with the last session's palette (or a fresh random one)
//! cospal
//!
//! # Load a shared palette code
//! cospal --palette "0.500c0.500c0.500p0.500c0.500c0.500p1.000c1.000c1.000p0.000c0.000c0.000"
//!
//! # Fresh random palette, ignore saved state
//! cospal --no-restore
//!
//! # Debug logs to a file (the terminal itself is busy drawing)
//! cospal --log-file /tmp/cospal.log -l debug
//! ```

mod app;
mod clipboard;
mod theme;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use cospal_core::{AppConfig, Palette};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use app::App;

/// cospal - Interactive cosine palette generator
#[derive(Parser, Debug)]
#[command(name = "cospal")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Palette share code to load instead of the saved state
    #[arg(short = 'p', long, env = "COSPAL_PALETTE", value_name = "CODE")]
    palette: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "COSPAL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start from a fresh random palette, ignoring saved state
    #[arg(long)]
    no_restore: bool,

    /// Write logs to this file
    #[arg(long, env = "COSPAL_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "COSPAL_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // Logging to the screen would fight the UI for the terminal
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .init();
        }
    }
    Ok(())
}

/// Pick the palette the session starts from.
///
/// Priority: `--palette` code, then the saved state file, then `None`
/// (which makes the app open with an animated randomize). Malformed
/// codes and corrupt state files fall back to the next option.
fn resolve_initial_palette(args: &Args, config: &AppConfig) -> Option<Palette> {
    if let Some(code) = &args.palette {
        match Palette::from_share(code) {
            Ok(palette) => return Some(palette),
            Err(e) => warn!("Ignoring malformed palette code: {e}"),
        }
    }

    if args.no_restore || !config.persist_enabled {
        return None;
    }

    let path = cospal_core::default_state_path()?;
    match cospal_core::load_palette(&path) {
        Ok(palette) => palette,
        Err(e) => {
            warn!("Could not restore saved palette: {e}");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => cospal_core::load_config_from_path(Some(path.clone()))?,
        None => cospal_core::load_config()?,
    };

    let initial = resolve_initial_palette(&args, &config);
    let state_path = cospal_core::default_state_path();
    let mut app = App::new(config, initial, state_path);

    // Restore the terminal even if we panic mid-frame
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
