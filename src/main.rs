mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use timeallocator_core::config::AllocatorConfig;
use timeallocator_core::fixtures::{AvailabilityQuery, Registry};
use timeallocator_core::window::parse_datetime;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "timeallocator")]
#[command(about = "Search calendars for available appointment slots")]
struct Cli {
    /// Config file (defaults to ./timeallocator.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log allocation and booking decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find available slots in one or more calendars
    Find {
        /// ID of a calendar to search in (repeat for several calendars)
        #[arg(short = 'c', long = "calendar", required = true)]
        calendars: Vec<Uuid>,

        /// Start of the search window ("YYYY-MM-DD HH:MM", defaults to a year ago)
        #[arg(short = 'f', long = "from", value_parser = parse_datetime)]
        from: Option<NaiveDateTime>,

        /// End of the search window ("YYYY-MM-DD HH:MM", defaults to a year from now)
        #[arg(short = 't', long = "to", value_parser = parse_datetime)]
        to: Option<NaiveDateTime>,

        /// Minimum duration of a slot in minutes
        #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
        duration: i64,

        /// Only show slots of this type
        #[arg(short = 's', long = "slot-type")]
        slot_type: Option<Uuid>,
    },
    /// List loaded calendars and slot types
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let registry = load_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::Find {
            calendars,
            from,
            to,
            duration,
            slot_type,
        } => {
            let query = AvailabilityQuery {
                from,
                to,
                slot_type,
                duration,
            };
            commands::find::run(&registry, &calendars, &query)
        }
        Commands::List => commands::list::run(&registry),
    }
}

/// Logs go to stderr so search results on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_registry(config_path: Option<&Path>) -> Result<Registry> {
    let config = AllocatorConfig::load(config_path)?;
    tracing::debug!(data_dir = %config.data_path().display(), "loaded configuration");

    if config.calendars.is_empty() {
        anyhow::bail!(
            "No calendars configured.\n\n\
            Add calendars to timeallocator.toml:\n\n  \
            [[calendars]]\n  \
            id = \"48644c7a-975e-11e5-a090-c8e0eb18c1e9\"\n  \
            name = \"Joanna Hef\"\n  \
            file = \"joanna_hef\""
        );
    }

    Registry::load(&config).with_context(|| {
        format!(
            "Could not load calendars from {}",
            config.data_path().display()
        )
    })
}
