mod app;
mod config;
mod controller;
mod domain;
mod input;
mod logging;
mod notifications;
mod repository;
mod store;
mod ui;
mod worker;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{config_file, load_settings, log_file, save_settings, Overrides, Settings};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use repository::{HttpTaskRepository, InMemoryTaskRepository, TaskRepository};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "A terminal todo list backed by a remote task API", long_about = None)]
struct Cli {
    /// Base URL of the task API (overrides the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Maximum number of tasks fetched from the API
    #[arg(long, global = true)]
    fetch_limit: Option<usize>,

    /// Path to config.json. Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a throwaway in-memory backend instead of the API
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config_file()?,
    };
    let overrides = Overrides {
        api_url: cli.api_url.clone(),
        fetch_limit: cli.fetch_limit,
    };

    match cli.command {
        Some(Commands::Init { force }) => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    config_path.display()
                );
            }
            let settings = Settings::default().with_overrides(overrides);
            save_settings(&config_path, &settings)?;
            println!("Wrote config file: {}", config_path.display());
            Ok(())
        }
        None => {
            let settings = load_settings(&config_path)?.with_overrides(overrides);
            run_tui(settings, cli.demo)
        }
    }
}

fn build_repository(settings: &Settings, demo: bool) -> Result<Arc<dyn TaskRepository>> {
    if demo {
        let repo = InMemoryTaskRepository::seeded().with_fetch_limit(settings.fetch_limit);
        return Ok(Arc::new(repo));
    }

    let repo = HttpTaskRepository::new(
        &settings.api_base_url,
        settings.fetch_limit,
        settings.request_timeout(),
    )?;
    Ok(Arc::new(repo))
}

fn run_tui(settings: Settings, demo: bool) -> Result<()> {
    let log_path = log_file()?;
    logging::install_tracing(&log_path)?;
    tracing::info!(api = %settings.api_base_url, demo, "starting todolist");

    let repo = build_repository(&settings, demo)?;
    let mut app = AppState::new(repo, &settings);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop failed");
    }
    tracing::info!("todolist stopped");
    result.context("Terminal UI failed")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    settings: &Settings,
) -> Result<()> {
    let tick_rate = settings.tick_duration();

    loop {
        // Apply whatever the worker finished since the last frame
        app.pump();

        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout so completions keep flowing in
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}
