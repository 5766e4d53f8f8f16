use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "surge",
    about = "Surge — alert-driven fleet autoscaling control plane",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to the surge.toml config file.
    #[arg(long, global = true, default_value = "surge.toml")]
    config: PathBuf,

    /// Data directory for the local fleet registry.
    #[arg(long, global = true, default_value = ".surge")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a surge.toml scaffold with stock defaults
    Init {
        /// Fleet id to scaffold the config for.
        #[arg(long, default_value = "production-fleet")]
        fleet_id: String,
    },
    /// Manage the local fleet registry
    Fleet {
        #[command(subcommand)]
        action: FleetAction,
    },
    /// Evaluate an alert and apply the resulting decision.
    ///
    /// The alert is JSON in the incident-detection event format:
    ///
    /// {"action": "scale_up", "alert_type": "cpu", "severity": "critical",
    ///  "metric_value": "92%", "ai_confidence": 95}
    Decide {
        /// Alert JSON file, or "-" to read from stdin.
        #[arg(long)]
        alert: String,
        /// Compute the decision without applying it.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum FleetAction {
    /// Register a fleet in the local registry
    Register {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "2")]
        min: u32,
        #[arg(long, default_value = "10")]
        max: u32,
        #[arg(long)]
        desired: u32,
        /// Instances currently running (defaults to the desired count).
        #[arg(long)]
        running: Option<u32>,
    },
    /// Show a fleet's state and its last scaling action
    Status {
        #[arg(long)]
        id: String,
    },
    /// List all registered fleets
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("surge=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { fleet_id } => commands::init::run(&cli.config, &fleet_id),
        Commands::Fleet { action } => match action {
            FleetAction::Register {
                id,
                min,
                max,
                desired,
                running,
            } => commands::fleet::register(&cli.data_dir, &id, min, max, desired, running),
            FleetAction::Status { id } => commands::fleet::status(&cli.data_dir, &id),
            FleetAction::List => commands::fleet::list(&cli.data_dir),
        },
        Commands::Decide { alert, dry_run } => {
            commands::decide::run(&cli.config, &cli.data_dir, &alert, dry_run).await
        }
    }
}
