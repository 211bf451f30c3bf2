//! Directorio CLI
//!
//! Command-line interface for the municipal staff directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use directorio_core::{source_for, Config, Directory, Field, SortKey};

mod commands;
mod logging;
mod output;

use commands::contact::Via;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "directorio")]
#[command(about = "Directorio de Autoridades - municipal staff directory")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replace the directory with the records in this JSON file
    #[arg(long, global = true, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Skip loading the published directory
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List officials (default)
    #[command(alias = "ls")]
    List(FilterArgs),
    /// Print-friendly view of the officials
    Print(FilterArgs),
    /// Show one official in full
    Show {
        /// Official key (id, or name-position) or a unique prefix
        key: String,
    },
    /// List categories
    Categories {
        /// Show the fixed quick-filter list instead of the loaded categories
        #[arg(long)]
        featured: bool,
    },
    /// Export the directory as JSON
    Export {
        /// Output file (defaults to ./directorio_autoridades.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write one field of an official to stdout
    Copy {
        /// Official key or unique prefix
        key: String,
        /// Field to copy (email, phone, whatsapp, ...)
        field: Field,
    },
    /// Open a phone, WhatsApp or email link for an official
    Open {
        /// Official key or unique prefix
        key: String,
        /// How to get in touch
        #[arg(long, value_enum, default_value_t = Via::Whatsapp)]
        via: Via,
        /// Print the link instead of opening it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Args, Default)]
struct FilterArgs {
    /// Search name, position, department, email and phone
    search: Option<String>,
    /// Only show this category ("all" for every category)
    #[arg(short, long)]
    category: Option<String>,
    /// Sort by priority, name or position
    #[arg(short, long)]
    sort: Option<SortKey>,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (source, fetch_timeout_secs, default_sort, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the directory
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    let mut directory = Directory::new();
    directory.set_sort(config.default_sort);

    if !cli.offline {
        startup_load(&mut directory, &config).await;
    }

    if let Some(path) = &cli.import {
        commands::transfer::import(&mut directory, path, &output)?;
    }

    let command = cli
        .command
        .unwrap_or_else(|| Commands::List(FilterArgs::default()));

    match command {
        Commands::List(args) => {
            commands::list::apply_filters(&mut directory, args.search, args.category, args.sort);
            commands::list::list(&directory, &output)
        }
        Commands::Print(args) => {
            commands::list::apply_filters(&mut directory, args.search, args.category, args.sort);
            commands::list::print(&directory, &output)
        }
        Commands::Show { key } => commands::list::show(&directory, key, &output),
        Commands::Categories { featured } => {
            commands::list::categories(&directory, featured, &output)
        }
        Commands::Export { output: path } => commands::transfer::export(&directory, path, &output),
        Commands::Copy { key, field } => commands::contact::copy(&directory, key, field, &output),
        Commands::Open { key, via, dry_run } => {
            commands::contact::open(&directory, key, via, dry_run, &output)
        }
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Merge in the published directory, silently keeping the built-in records on failure
async fn startup_load(directory: &mut Directory, config: &Config) {
    let source = match source_for(config) {
        Ok(Some(source)) => source,
        Ok(None) => {
            debug!("Startup load disabled");
            return;
        }
        Err(e) => {
            warn!("Could not set up directory source: {}", e);
            return;
        }
    };

    directory.load_from(source.as_ref()).await;
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
