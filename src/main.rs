//! CLI entry point for the warehouse dashboard.
//!
//! Loads shipment records from a file or URL and renders the dashboard, or
//! one of its parts, as text, JSON or CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use warehouse_dashboard::{
    config::Config,
    dashboard::Dashboard,
    logging,
    output::{MetricsSnapshot, append_snapshot, print_json, print_pretty, write_picker_csv},
    render::Renderer,
    source::{load_dataset, source_for},
};

#[derive(Parser)]
#[command(name = "warehouse_dashboard")]
#[command(about = "Warehouse picking operations dashboard", long_about = None)]
struct Cli {
    /// Colour status badges (overrides DASHBOARD_COLOR)
    #[arg(long, global = true)]
    color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard
    Show {
        /// Path or URL of the records (.csv / .json, optionally .gz); defaults to DASHBOARD_SOURCE
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show aggregate metrics only
    Metrics {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the picker leaderboard
    Pickers {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the shipment table
    Table {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,
    },
    /// Append a timestamped metrics row to a CSV file
    Snapshot {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "snapshots.csv")]
        output: String,
    },
    /// Export picker statistics as CSV
    ExportPickers {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,

        /// CSV file to write
        #[arg(short, long, default_value = "pickers.csv")]
        output: String,
    },
    /// Load and validate records without rendering
    Validate {
        #[arg(value_name = "SOURCE")]
        source: Option<String>,
    },
}

impl Commands {
    fn source(&self) -> Option<&str> {
        match self {
            Commands::Show { source, .. }
            | Commands::Metrics { source, .. }
            | Commands::Pickers { source, .. }
            | Commands::Table { source }
            | Commands::Snapshot { source, .. }
            | Commands::ExportPickers { source, .. }
            | Commands::Validate { source } => source.as_deref(),
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    let config = Config::from_env();
    let _log_guard = logging::init(&config.log_file_path)?;

    let renderer = Renderer::new(cli.color || config.color);
    let location = config
        .resolve_source(cli.command.source().map(str::to_string))
        .context("no record source given; pass SOURCE or set DASHBOARD_SOURCE")?;
    let dataset = load_dataset(source_for(&location).as_ref())?;

    match cli.command {
        Commands::Show { format, .. } => {
            let dashboard = Dashboard::build(&dataset);
            print_pretty(&dashboard.metrics);

            match format {
                OutputFormat::Text => print!("{}", renderer.dashboard(&dashboard)),
                OutputFormat::Json => print_json(&dashboard)?,
            }
        }
        Commands::Metrics { json, .. } => {
            let dashboard = Dashboard::build(&dataset);

            if json {
                print_json(&dashboard.metrics)?;
            } else {
                print!("{}", renderer.progress(&dashboard.metrics));
                print!("{}", renderer.key_metrics(&dashboard.metrics));
            }
        }
        Commands::Pickers { json, .. } => {
            let dashboard = Dashboard::build(&dataset);

            if json {
                print_json(&dashboard.pickers)?;
            } else if dashboard.pickers.is_empty() {
                info!("No records carry a picker");
            } else {
                print!("{}", renderer.leaderboard(&dashboard.pickers));
            }
        }
        Commands::Table { .. } => {
            print!("{}", renderer.table(dataset.records()));
        }
        Commands::Snapshot { output, .. } => {
            let dashboard = Dashboard::build(&dataset);

            append_snapshot(&output, &MetricsSnapshot::new(&location, &dashboard.metrics))
                .with_context(|| format!("failed to append snapshot to {output}"))?;
            info!(output = %output, "Snapshot appended");
        }
        Commands::ExportPickers { output, .. } => {
            let dashboard = Dashboard::build(&dataset);

            write_picker_csv(&output, &dashboard.pickers)
                .with_context(|| format!("failed to write {output}"))?;
        }
        Commands::Validate { .. } => {
            let unknown = dataset.unknown_statuses();

            if unknown.is_empty() {
                info!(records = dataset.len(), "All records valid");
            } else {
                warn!(
                    records = dataset.len(),
                    unknown_picking = unknown.picking.len(),
                    unknown_vehicle = unknown.vehicle.len(),
                    "Records valid, some statuses unrecognized"
                );
            }
            println!(
                "{} records, {} unrecognized picking status(es), {} unrecognized vehicle status(es)",
                dataset.len(),
                unknown.picking.len(),
                unknown.vehicle.len()
            );
        }
    }

    Ok(())
}
