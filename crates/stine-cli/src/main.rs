//! stine — STiNE campus portal client CLI.
//!
//! Logs in, keeps the session between runs, checks whether it is still
//! alive, and starts calendar exports.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stine_client::SessionStore;
use tracing::error;

/// stine — STiNE portal client
#[derive(Parser)]
#[command(name = "stine", version, about = "STiNE portal client — log in, check sessions, export your schedule")]
struct Cli {
    /// Config file path
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Session file path
    #[arg(long = "session-file", global = true)]
    session_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and save the session
    Login {
        /// Account name (defaults to the configured one, else prompts)
        #[arg(short, long)]
        username: Option<String>,

        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },

    /// Check whether the saved session is still valid
    Check,

    /// Export the schedule of a month (Y2024M06) or week (Y2024W25)
    Export {
        /// Period to export
        period: String,
    },

    /// Show the saved session
    Session {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the saved session
    Logout,
}

fn stine_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".stine")
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config file.
    let config_path = cli.config.unwrap_or_else(|| stine_dir().join("config.toml"));
    let cfg = config::Config::load(&config_path)?;

    // Session file: flag, then config, then the default location.
    let store = match cli
        .session_file
        .or_else(|| cfg.account.session_file.as_ref().map(PathBuf::from))
    {
        Some(path) => SessionStore::new(path),
        None => SessionStore::default_location()?,
    };

    let ctx = commands::Context {
        username: cfg.username().map(str::to_string),
        portal: cfg.portal,
        store,
    };

    match cli.command {
        Command::Login {
            username,
            password_stdin,
        } => commands::login::run(&ctx, username.as_deref(), password_stdin).await,
        Command::Check => commands::check::run(&ctx).await,
        Command::Export { period } => commands::export::run(&ctx, &period).await,
        Command::Session { json } => commands::session::run_show(&ctx, json).await,
        Command::Logout => commands::session::run_logout(&ctx).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing.
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("stine=debug,stine_cli=debug,stine_client=debug,stine_core=debug")
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("stine=warn,stine_cli=warn,stine_client=warn")
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("stine: {e:#}");
        std::process::exit(1);
    }
}
