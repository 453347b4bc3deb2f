//! Open5e-Harvest main entry point
//!
//! This is the command-line interface for the Open5e data harvester.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use open5e_harvest::config::{load_config_with_hash, Config};
use open5e_harvest::fetch::{endpoint_url, user_agent_string};
use open5e_harvest::harvest::{run_harvest, Dataset, HarvestOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Open5e-Harvest: tabletop reference data to CSV
///
/// Open5e-Harvest fetches races, classes, backgrounds and equipment from the
/// Open5e API, normalizes inconsistent source fields into flat records,
/// removes duplicates and writes CSV files ready for a relational import.
#[derive(Parser, Debug)]
#[command(name = "open5e-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvest Open5e reference data into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,

    /// Which datasets to harvest
    #[arg(long, value_enum, default_value_t = DatasetArg::All)]
    dataset: DatasetArg,

    /// Print reports only; write no CSV files or summary
    #[arg(long)]
    no_export: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DatasetArg {
    Characters,
    Equipment,
    All,
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Characters => Dataset::Characters,
            DatasetArg::Equipment => Dataset::Equipment,
            DatasetArg::All => Dataset::All,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e)
                .with_context(|| format!("loading {}", cli.config.display()));
        }
    };

    let options = HarvestOptions {
        dataset: cli.dataset.into(),
        export: !cli.no_export,
    };

    if cli.dry_run {
        handle_dry_run(&config, options)?;
    } else {
        handle_harvest(config, config_hash, options).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("open5e_harvest=info,warn"),
            1 => EnvFilter::new("open5e_harvest=debug,info"),
            2 => EnvFilter::new("open5e_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be fetched
fn handle_dry_run(config: &Config, options: HarvestOptions) -> anyhow::Result<()> {
    println!("=== Open5e-Harvest Dry Run ===\n");

    println!("API Configuration:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Page limit: {}", config.api.page_limit);
    println!("  Request delay: {}ms", config.api.request_delay_ms);
    println!("  Timeout: {}s", config.api.timeout_secs);

    println!("\nUser Agent:");
    println!("  {}", user_agent_string(&config.user_agent));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    match &config.output.summary_path {
        Some(path) => println!("  Summary: {}", path),
        None => println!("  Summary: (none)"),
    }
    if !options.export {
        println!("  Export disabled (--no-export)");
    }

    println!("\nEndpoints ({}):", options.dataset);
    let selected = config.endpoints.all().into_iter().filter(|(key, _)| {
        let is_character = matches!(*key, "races" | "classes" | "backgrounds");
        if is_character {
            options.dataset.includes_characters()
        } else {
            options.dataset.includes_equipment()
        }
    });

    let mut count = 0;
    for (key, path) in selected {
        let url = endpoint_url(&config.api.base_url, path, config.api.page_limit)
            .with_context(|| format!("building URL for endpoint '{}'", key))?;
        println!("  - {}: {}", key, url);
        count += 1;
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} endpoints", count);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(
    config: Config,
    config_hash: String,
    options: HarvestOptions,
) -> anyhow::Result<()> {
    tracing::info!(
        "Starting harvest of {} data from {}",
        options.dataset,
        config.api.base_url
    );

    match run_harvest(config, config_hash, options).await {
        Ok(summary) => {
            for file in &summary.exported {
                println!("✓ {} ({} rows)", file.path.display(), file.rows);
            }
            tracing::info!("Harvest completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e).context("harvest failed")
        }
    }
}
