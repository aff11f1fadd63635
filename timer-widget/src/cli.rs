use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "timer-widget")]
#[command(about = "Start Toggl timers from Todoist tasks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run against the real Toggl and Todoist APIs (default)
    Run,
    /// Run with local in-memory data
    Dev,
    /// Store API tokens for both services
    Login,
    /// Remove stored API tokens
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
