use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unblocker")]
#[command(about = "Incident Unblocker: triage queue, ownership routing and friction insights")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the table files (overrides the config file)
    #[arg(long = "data-dir", value_name = "DIR", env = "UNBLOCKER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    /// Emit JSON instead of markdown
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show headline counters and the filtered incident queue
    Queue(QueueArgs),
    /// Show one incident with its owner routing
    Show { incident_id: String },
    /// Record a claim on an incident
    Claim {
        incident_id: String,
        #[arg(long)]
        actor: Option<String>,
        /// Claim reason; defaults to "Need owner confirmation / next steps"
        #[arg(long)]
        reason: Option<String>,
    },
    /// Compose and record an alert to the owning team
    Alert {
        incident_id: String,
        #[arg(long)]
        actor: Option<String>,
    },
    /// Search the ownership registry
    Directory {
        /// Asset type to list; defaults to the first type alphabetically
        #[arg(long = "asset-type")]
        asset_type: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        /// Asset name to show an owner card for
        #[arg(long)]
        asset: Option<String>,
    },
    /// Delay and SLA statistics over the friction table
    Friction,
}

#[derive(Args, Debug, Default)]
pub struct QueueArgs {
    /// Status to include (repeatable); defaults to Open, Investigating, Blocked
    #[arg(long = "status")]
    pub statuses: Vec<String>,
    /// Include every status instead of the default active set
    #[arg(long = "all-statuses", conflicts_with = "statuses")]
    pub all_statuses: bool,
    /// Severity to include (repeatable)
    #[arg(long = "severity")]
    pub severities: Vec<String>,
    /// Incident type to include (repeatable)
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Only incidents without an owner team
    #[arg(long = "missing-owner")]
    pub missing_owner: bool,
    #[arg(long, default_value = "")]
    pub search: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
