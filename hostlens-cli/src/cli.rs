//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// HostLens command-line interface for remote system telemetry
#[derive(Parser)]
#[command(name = "hostlens")]
#[command(author, version, about = "Remote system telemetry collector")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Remote target selection shared by the collecting subcommands
#[derive(Args)]
pub struct TargetArgs {
    /// Remote host (hostname or IP)
    pub host: String,

    /// SSH username
    #[arg(short, long, env = "HOSTLENS_USER")]
    pub user: Option<String>,

    /// SSH port
    #[arg(short, long, default_value_t = 22)]
    pub port: u16,

    /// SSH identity file (private key)
    #[arg(short, long)]
    pub identity: Option<String>,

    /// Per-command execution timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Collect and print a system snapshot
    #[command(about = "Collect a one-shot telemetry snapshot from a host")]
    Snapshot {
        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Collect and print the detailed telemetry block
    #[command(about = "Fetch the detailed block (processes, services, cron, firewall, ...)")]
    Detail {
        #[command(flatten)]
        target: TargetArgs,

        /// Section to print
        #[arg(short, long, default_value = "all", value_enum)]
        section: DetailSection,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Re-collect on an interval and print each cycle
    #[command(about = "Watch a host, re-collecting on a fixed interval")]
    Watch {
        #[command(flatten)]
        target: TargetArgs,

        /// Refresh interval in seconds (overrides configuration)
        #[arg(short = 'n', long)]
        interval: Option<u64>,

        /// Stop after this many cycles (default: run until interrupted)
        #[arg(long)]
        cycles: Option<u32>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format for collected telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Section selector for the detail command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetailSection {
    /// Every section
    All,
    /// Top processes by CPU
    Processes,
    /// Active network connections
    Connections,
    /// System services
    Services,
    /// Local user accounts
    Users,
    /// Boot-time autostart entries
    Autostart,
    /// Scheduled cron jobs
    Cron,
    /// Firewall rules
    Firewall,
}
