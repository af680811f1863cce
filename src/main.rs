//! fplcompanion - Fantasy Premier League dashboard
//!
//! A terminal companion for FPL managers.
//!
//! Features:
//! - Gameweek header with the transfer deadline
//! - AI transfer suggestions with confidence and form trend
//! - Team summary and quick links
//! - Light and dark FPL themes following the host terminal
//!
//! Usage: fplcompanion [--light|--dark] [--no-animations] [--debug]

mod animation;
mod app;
mod appearance;
mod config;
mod data;
mod logging;
mod screen;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use types::AppearanceMode;

/// Redraw interval while animations run
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Args {
    appearance: Option<AppearanceMode>,
    no_animations: bool,
    debug: bool,
    help: bool,
    version: bool,
}

impl Args {
    fn parse(args: &[String]) -> Self {
        let mut parsed = Args::default();
        for arg in args {
            match arg.as_str() {
                "--light" => parsed.appearance = Some(AppearanceMode::Light),
                "--dark" => parsed.appearance = Some(AppearanceMode::Dark),
                "--no-animations" => parsed.no_animations = true,
                "--debug" | "-d" => parsed.debug = true,
                "--help" | "-h" => parsed.help = true,
                "--version" | "-v" => parsed.version = true,
                _ => {}
            }
        }
        parsed
    }
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(&raw);

    if args.help {
        print_help();
        return Ok(());
    }

    if args.version {
        println!("fplcompanion {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Run the application
    let result = run_app(&args);

    // Terminal is already restored at this point
    if let Err(e) = result {
        tracing::error!(error = %e, "Exiting with error");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"fplcompanion - Fantasy Premier League dashboard

USAGE:
    fplcompanion [OPTIONS]

OPTIONS:
    --light            Force the light theme
    --dark             Force the dark theme
    --no-animations    Skip entrance and pulse animations
    -d, --debug        Verbose logging
    -h, --help         Print help information
    -v, --version      Print version information

KEYBINDINGS:
    1-3 / Tab          Switch recommendation tab
    a                  Chat with the AI coach
    v                  View team details
    t f s n            Transfers, Fixtures, Stats, News
    m                  Toggle light/dark
    Esc                Back
    q                  Quit

CONFIG:
    ~/.config/fplcompanion/config.toml
"#
    );
}

fn run_app(args: &Args) -> Result<()> {
    // Load configuration
    let mut config = config::Config::load()
        .context("Failed to load configuration")?;
    if args.no_animations {
        config.animations.enabled = false;
    }

    let log_path = logging::init(args.debug, config.logging.level.as_deref())
        .context("Failed to initialise logging")?;
    eprintln!("Logging to {}", log_path.display());

    let host_appearance = appearance::detect();
    tracing::info!(
        host = ?host_appearance,
        preference = config.appearance.as_str(),
        cli = ?args.appearance,
        "Resolved appearance inputs"
    );

    let mut app = App::new(
        config,
        host_appearance,
        args.appearance,
        Box::new(data::StaticData),
        Instant::now(),
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)
        .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .context("Failed to create terminal")?;

    // Run main loop
    let result = main_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn main_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);

        // Render UI
        terminal.draw(|frame| {
            ui::render(frame, app, now);
        })?;

        // Poll for events with timeout (for animation frames)
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                // Coming back to the terminal: the host scheme may have changed
                Event::FocusGained => app.set_host_appearance(appearance::detect()),
                _ => {}
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }
    }

    tracing::info!("Quit requested");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        let owned: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        Args::parse(&owned)
    }

    #[test]
    fn test_help_does_not_panic() {
        print_help();
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(args(&[]), Args::default());

        let parsed = args(&["--dark", "--no-animations", "-d"]);
        assert_eq!(parsed.appearance, Some(AppearanceMode::Dark));
        assert!(parsed.no_animations);
        assert!(parsed.debug);

        // Last appearance flag wins
        assert_eq!(args(&["--dark", "--light"]).appearance, Some(AppearanceMode::Light));
        assert!(args(&["-h"]).help);
        assert!(args(&["--version"]).version);
    }
}
