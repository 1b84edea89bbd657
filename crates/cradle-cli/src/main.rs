use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cradle_cli::commands::{alerts, clear, diaper, feed, init, sleep, status, watch};
use cradle_cli::{CareService, Cli, Commands, Config, FeedAction, SleepAction};

/// Load config and open the care service, ensuring the parent directory exists.
fn open_service(config_path: Option<&Path>) -> Result<CareService> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = cradle_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok(CareService::open(db))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Init {
            name,
            birthdate,
            feeding_type,
        }) => {
            let mut service = open_service(cli.config.as_deref())?;
            init::run(&mut out, &mut service, name, birthdate, feeding_type, Utc::now())?;
        }
        Some(Commands::Feed { action }) => {
            let mut service = open_service(cli.config.as_deref())?;
            match action {
                FeedAction::Start { kind, side } => {
                    feed::start(&mut out, &mut service, kind, side, Utc::now())?;
                }
                FeedAction::End { amount_ml } => {
                    feed::end(&mut out, &mut service, amount_ml, Utc::now())?;
                }
                FeedAction::Cancel => feed::cancel(&mut out, &mut service)?,
            }
        }
        Some(Commands::Sleep { action }) => {
            let mut service = open_service(cli.config.as_deref())?;
            match action {
                SleepAction::Start => sleep::start(&mut out, &mut service, Utc::now())?,
                SleepAction::End { kind } => {
                    sleep::end(&mut out, &mut service, kind, Utc::now())?;
                }
                SleepAction::Cancel => sleep::cancel(&mut out, &mut service)?,
            }
        }
        Some(Commands::Diaper { kind, color, notes }) => {
            let mut service = open_service(cli.config.as_deref())?;
            diaper::run(&mut out, &mut service, kind, color, notes, Utc::now())?;
        }
        Some(Commands::Status) => {
            let service = open_service(cli.config.as_deref())?;
            status::run(&mut out, service.snapshot(), Local::now().fixed_offset())?;
        }
        Some(Commands::Alerts) => {
            let service = open_service(cli.config.as_deref())?;
            alerts::render(&mut out, &service.alerts(Local::now().fixed_offset()))?;
        }
        Some(Commands::Watch { interval_secs }) => {
            let mut service = open_service(cli.config.as_deref())?;
            service.arm_standing_reminders();
            drop(out);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to build async runtime")?;
            runtime.block_on(watch::run(&mut service, interval_secs))?;
        }
        Some(Commands::Clear) => {
            let mut service = open_service(cli.config.as_deref())?;
            clear::run(&mut out, &mut service)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(out)?;
        }
    }

    Ok(())
}
