//! Data models for collected host telemetry
//!
//! All types are transport-free and serializable. A [`SystemSnapshot`] is
//! built wholesale by the collector on each successful cycle and replaced
//! atomically, so consumers never observe partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete telemetry record for one collection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Remote hostname
    pub hostname: String,
    /// Human-readable uptime (as reported by `uptime`)
    pub uptime: String,
    /// 1/5/15-minute load averages; `"0"` when unavailable
    pub load_average: [String; 3],
    /// Memory usage with formatted byte strings
    pub memory: MemoryUsage,
    /// Root filesystem figures (or the first partition when `/` is absent)
    pub disk: DiskUsage,
    /// Real partitions in remote listing order
    pub partitions: Vec<Partition>,
    /// CPU model, core count, and current usage
    pub cpu: CpuInfo,
    /// Interfaces, DNS, gateway, and traffic counters
    pub network: NetworkInfo,
    /// Number of established connections
    pub connection_count: u32,
    /// Number of running processes
    pub process_count: u32,
    /// Number of logged-in users
    pub user_count: u32,
    /// When this snapshot's collection completed
    pub last_update: DateTime<Utc>,
    /// Detailed telemetry block, attached once fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<DetailedInfo>,
}

/// Memory usage with values formatted as byte strings (base-1024)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Total physical memory
    pub total: String,
    /// Used memory (total minus free)
    pub used: String,
    /// Free memory
    pub free: String,
    /// Available memory (includes reclaimable caches)
    pub available: String,
}

/// Disk usage summary for the representative partition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskUsage {
    /// Total size
    pub total: String,
    /// Used space
    pub used: String,
    /// Available space
    pub available: String,
    /// Usage percentage (e.g. `"42%"`)
    pub percentage: String,
}

/// A single real (non-pseudo) filesystem partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Device or filesystem name
    pub filesystem: String,
    /// Total size
    pub size: String,
    /// Used space
    pub used: String,
    /// Available space
    pub available: String,
    /// Usage percentage
    pub percentage: String,
    /// Mount point (may contain embedded whitespace)
    pub mountpoint: String,
}

/// CPU identification and current usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// CPU model name
    pub model: String,
    /// Number of logical cores
    pub cores: u32,
    /// Current usage percentage (0.0–100.0)
    pub usage_percent: f32,
}

/// Network configuration and traffic counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Non-loopback interfaces
    pub interfaces: Vec<NetworkInterface>,
    /// Configured DNS resolvers
    pub dns: Vec<String>,
    /// Default gateway address
    pub gateway: String,
    /// Total received bytes across non-loopback interfaces
    pub rx_bytes: u64,
    /// Total transmitted bytes across non-loopback interfaces
    pub tx_bytes: u64,
}

/// A single network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Interface name (e.g. `eth0`)
    pub name: String,
    /// Primary IPv4 address, empty when none is assigned
    pub ip: String,
    /// Link status, `"up"` or `"down"`
    pub status: String,
}

/// The larger, separately cached telemetry block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedInfo {
    /// Top processes by CPU usage
    pub processes: Vec<ProcessEntry>,
    /// Active network connections
    pub connections: Vec<ConnectionEntry>,
    /// System services
    pub services: Vec<ServiceEntry>,
    /// Local user accounts
    pub users: Vec<UserAccount>,
    /// Boot-time autostart entries
    pub autostart: Vec<AutostartEntry>,
    /// Scheduled cron jobs from all sources
    pub cron_jobs: Vec<CronJob>,
    /// Firewall rules from all installed tools
    pub firewall_rules: Vec<FirewallRule>,
}

/// One process row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// Process ID
    pub pid: u32,
    /// Owning user
    pub user: String,
    /// Process state flags (ps STAT column)
    pub stat: String,
    /// CPU usage percentage
    pub cpu_percent: f32,
    /// Memory usage percentage
    pub mem_percent: f32,
    /// Command line
    pub command: String,
}

/// One network connection row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEntry {
    /// Protocol (tcp/udp)
    pub protocol: String,
    /// Local address:port
    pub local_address: String,
    /// Remote address:port
    pub foreign_address: String,
    /// Connection state
    pub state: String,
    /// Owning process name, `"unknown"` when unattributed
    pub process: String,
    /// Owning PID, `"-"` when unattributed
    pub pid: String,
}

/// One systemd service row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Unit name without the `.service` suffix
    pub name: String,
    /// Active state (active/inactive/failed)
    pub status: String,
    /// Enablement state (enabled/disabled/unknown)
    pub enabled: String,
    /// Unit description
    pub description: String,
}

/// One local account from /etc/passwd
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Login name
    pub username: String,
    /// Numeric user ID
    pub uid: u32,
    /// Numeric group ID
    pub gid: u32,
    /// Home directory
    pub home: String,
    /// Login shell
    pub shell: String,
}

/// One boot-time autostart entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutostartEntry {
    /// Entry name (unit name or script)
    pub name: String,
    /// Command or unit the entry launches
    pub command: String,
    /// Enablement status
    pub status: String,
    /// Originating mechanism (systemd, cron)
    #[serde(rename = "type")]
    pub kind: String,
}

/// One scheduled cron job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronJob {
    /// User the job runs as
    pub user: String,
    /// Cron schedule expression (or `@hourly`-style tag)
    pub schedule: String,
    /// Command line (may contain literal commas)
    pub command: String,
    /// Originating source (crontab file or directory)
    pub source: String,
}

/// One firewall rule, normalized across tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    /// Chain the rule belongs to
    pub chain: String,
    /// Rule target/action
    pub target: String,
    /// Matched protocol
    pub protocol: String,
    /// Source address match
    pub source: String,
    /// Destination address match
    pub destination: String,
    /// Remaining match options, free-form
    pub options: String,
}

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count as a human-readable base-1024 string with two
/// decimal places (e.g. `8_192_000_000` → `"7.63 GB"`).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Formats a kilobyte count (as reported by /proc/meminfo) as a byte string
#[must_use]
pub fn format_kb(kb: u64) -> String {
    format_bytes(kb.saturating_mul(1024))
}
