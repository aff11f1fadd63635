mod app;
mod bootstrap;
mod catalog;
mod cli;
mod config;
mod controller;
mod credential_store;
mod error;
mod runtime;
mod services;
mod test_data;
mod time_utils;
mod types;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::{fmt, fmt::time::OffsetTime, prelude::*, EnvFilter};

use bootstrap::Mode;
use cli::{Cli, Commands};
use config::WidgetConfig;
use credential_store::StoredTokens;

fn main() -> Result<()> {
    // Before any worker thread exists.
    time_utils::local_offset();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run_cli())
}

async fn run_cli() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Login => login(),
        Commands::Logout => {
            credential_store::clear_tokens()?;
            println!("Stored API tokens removed.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = WidgetConfig::config_path()?;
            if !path.exists() {
                WidgetConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Run => run(Mode::Live).await,
        Commands::Dev => run(Mode::Dev).await,
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let path = WidgetConfig::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env("TIMER_WIDGET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_timer(OffsetTime::new(time_utils::local_offset(), Rfc3339)),
        )
        .init();
    Ok(())
}

async fn run(mode: Mode) -> Result<()> {
    init_tracing()?;
    let config = WidgetConfig::load()?;
    let tokens = credential_store::load_tokens()?.with_env_overrides();

    let (tracker, todo) = bootstrap::build_services(mode, &config, tokens)?;
    let mut app = bootstrap::initialize_app(&config, tracker, todo).await?;
    tracing::info!(?mode, "starting timer widget");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Prompt for both tokens. Leaving a prompt empty keeps the stored value.
fn login() -> Result<()> {
    let stored = credential_store::load_tokens()?;
    let prompt = |label: &str| -> Result<Option<String>> {
        let value = rpassword::prompt_password(format!("{} API token: ", label))?;
        let value = value.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    };

    let tokens = StoredTokens {
        toggl: prompt("Toggl")?.or(stored.toggl),
        todoist: prompt("Todoist")?.or(stored.todoist),
    };
    credential_store::save_tokens(&tokens)?;
    println!(
        "Tokens saved to {}",
        credential_store::credentials_path()?.display()
    );
    Ok(())
}
