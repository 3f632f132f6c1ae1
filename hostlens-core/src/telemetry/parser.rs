//! Parsers for the snapshot half of the telemetry battery
//!
//! Every parser is a total function over arbitrary text: blank or malformed
//! input yields an empty (or zeroed) value, never an error. The remote
//! commands shape their output so these stay plain line/field splitters;
//! the parsers are boundary adapters, not business logic.

use std::sync::OnceLock;

use regex::Regex;

use super::model::{
    CpuInfo, DiskUsage, MemoryUsage, NetworkInterface, Partition, format_kb,
};

/// Filesystems excluded from the partition listing by policy
const PSEUDO_FILESYSTEMS: [&str; 5] = ["tmpfs", "overlay", "loop", "cdrom", "udev"];

/// Mount point prefixes excluded from the partition listing by policy
const EXCLUDED_MOUNT_PREFIXES: [&str; 2] = ["/boot", "/snap"];

/// Leading `index: name:` pattern of an `ip addr` interface header line
fn interface_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+:\s+([^:@\s]+)").expect("interface header pattern is a valid regex")
    })
}

/// Stateless parsers for the snapshot command outputs
pub struct SnapshotParser;

impl SnapshotParser {
    /// Parses the grep'd meminfo lines into formatted byte strings.
    ///
    /// `used` is derived as `MemTotal - MemFree`; any missing line
    /// contributes zero.
    #[must_use]
    pub fn parse_memory(raw: &str) -> MemoryUsage {
        let mut total_kb: u64 = 0;
        let mut free_kb: u64 = 0;
        let mut available_kb: u64 = 0;

        for line in raw.lines() {
            if let Some(rest) = line.strip_prefix("MemTotal:") {
                total_kb = Self::first_u64(rest);
            } else if let Some(rest) = line.strip_prefix("MemFree:") {
                free_kb = Self::first_u64(rest);
            } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
                available_kb = Self::first_u64(rest);
            }
        }

        MemoryUsage {
            total: format_kb(total_kb),
            used: format_kb(total_kb.saturating_sub(free_kb)),
            free: format_kb(free_kb),
            available: format_kb(available_kb),
        }
    }

    /// Parses `df -hP` output into partitions, preserving listing order.
    ///
    /// Pseudo-filesystems and `/boot`/`/snap` mount points are excluded.
    /// The mount point is rejoined from the remaining tokens because it may
    /// contain embedded whitespace.
    #[must_use]
    pub fn parse_partitions(raw: &str) -> Vec<Partition> {
        let mut partitions = Vec::new();

        for line in raw.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 || fields[0] == "Filesystem" {
                continue;
            }

            let filesystem = fields[0];
            let mountpoint = fields[5..].join(" ");

            if PSEUDO_FILESYSTEMS.iter().any(|fs| filesystem.contains(fs)) {
                continue;
            }
            if EXCLUDED_MOUNT_PREFIXES
                .iter()
                .any(|p| mountpoint.starts_with(p))
            {
                continue;
            }

            partitions.push(Partition {
                filesystem: filesystem.to_string(),
                size: fields[1].to_string(),
                used: fields[2].to_string(),
                available: fields[3].to_string(),
                percentage: fields[4].to_string(),
                mountpoint,
            });
        }

        partitions
    }

    /// Selects the representative disk figures: the root mount point when
    /// present, otherwise the first listed partition.
    #[must_use]
    pub fn disk_summary(partitions: &[Partition]) -> DiskUsage {
        partitions
            .iter()
            .find(|p| p.mountpoint == "/")
            .or_else(|| partitions.first())
            .map(|p| DiskUsage {
                total: p.size.clone(),
                used: p.used.clone(),
                available: p.available.clone(),
                percentage: p.percentage.clone(),
            })
            .unwrap_or_default()
    }

    /// Parses the model/core-count output plus the top Cpu(s) line.
    ///
    /// The first line carries the model after a colon; the second line is
    /// the logical core count.
    #[must_use]
    pub fn parse_cpu(info_raw: &str, usage_raw: &str) -> CpuInfo {
        let mut lines = info_raw.lines();
        let model = lines
            .next()
            .and_then(|l| l.split_once(':'))
            .map(|(_, m)| m.trim().to_string())
            .unwrap_or_default();
        let cores = lines
            .next()
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or(0);

        CpuInfo {
            model,
            cores,
            usage_percent: Self::parse_cpu_usage(usage_raw),
        }
    }

    /// Extracts usage from a `%Cpu(s): ... 96.5 id, ...` line as 100 - idle.
    #[must_use]
    pub fn parse_cpu_usage(raw: &str) -> f32 {
        let Some(line) = raw.lines().next() else {
            return 0.0;
        };

        // the idle segment reads like "96.5 id" or "96.5%id" depending on
        // the top variant
        for segment in line.split(',') {
            if segment.contains("id") {
                let idle: f32 = segment
                    .trim()
                    .split(|c: char| !c.is_ascii_digit() && c != '.')
                    .find(|s| !s.is_empty())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100.0);
                return (100.0 - idle).clamp(0.0, 100.0);
            }
        }
        0.0
    }

    /// Two-pass scan of `ip addr` output.
    ///
    /// An interface header line (leading `index: name:` with an UP/DOWN
    /// state) opens a new context; later `inet <addr>` lines attach the
    /// first IPv4 address to the most recently opened interface. Loopback
    /// never appears in the result.
    #[must_use]
    pub fn parse_interfaces(raw: &str) -> Vec<NetworkInterface> {
        let mut interfaces: Vec<NetworkInterface> = Vec::new();

        for line in raw.lines() {
            if line.contains("UP") || line.contains("DOWN") {
                if let Some(caps) = interface_header_re().captures(line) {
                    let name = &caps[1];
                    if name == "lo" {
                        continue;
                    }
                    let status = if line.contains("UP") { "up" } else { "down" };
                    interfaces.push(NetworkInterface {
                        name: name.to_string(),
                        ip: String::new(),
                        status: status.to_string(),
                    });
                    continue;
                }
            }

            let trimmed = line.trim_start();
            if let Some(rest) = trimmed.strip_prefix("inet ")
                && let Some(current) = interfaces.last_mut()
                && current.ip.is_empty()
            {
                let addr = rest.split_whitespace().next().unwrap_or("");
                current.ip = addr.split('/').next().unwrap_or("").to_string();
            }
        }

        interfaces
    }

    /// Extracts `nameserver <addr>` entries from resolv.conf content
    #[must_use]
    pub fn parse_dns(raw: &str) -> Vec<String> {
        raw.lines()
            .filter_map(|line| {
                let mut tokens = line.split_whitespace();
                match (tokens.next(), tokens.next()) {
                    (Some("nameserver"), Some(addr)) => Some(addr.to_string()),
                    _ => None,
                }
            })
            .collect()
    }

    /// Extracts the gateway address from a `default via <addr> ...` line
    #[must_use]
    pub fn parse_gateway(raw: &str) -> String {
        for line in raw.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.first() == Some(&"default")
                && tokens.get(1) == Some(&"via")
                && let Some(addr) = tokens.get(2)
            {
                return (*addr).to_string();
            }
        }
        String::new()
    }

    /// Sums rx/tx byte counters across all non-loopback interfaces.
    ///
    /// Input is `/proc/net/dev` with the two header lines already stripped:
    /// `iface: rx_bytes rx_packets ... tx_bytes tx_packets ...`
    #[must_use]
    pub fn parse_net_counters(raw: &str) -> (u64, u64) {
        let mut rx_bytes: u64 = 0;
        let mut tx_bytes: u64 = 0;

        for line in raw.lines() {
            let line = line.trim();
            if line.starts_with("lo:") {
                continue;
            }
            if let Some((_iface, stats)) = line.split_once(':') {
                let fields: Vec<&str> = stats.split_whitespace().collect();
                if fields.len() >= 9 {
                    rx_bytes += fields[0].parse::<u64>().unwrap_or(0);
                    tx_bytes += fields[8].parse::<u64>().unwrap_or(0);
                }
            }
        }

        (rx_bytes, tx_bytes)
    }

    /// Parses `/proc/loadavg` into the three load strings, defaulting to
    /// `"0"` per slot when the input is short or blank.
    #[must_use]
    pub fn parse_load_average(raw: &str) -> [String; 3] {
        let mut tokens = raw.split_whitespace();
        std::array::from_fn(|_| tokens.next().unwrap_or("0").to_string())
    }

    /// Derives a human-readable uptime from either `uptime -p` or classic
    /// `uptime` output.
    #[must_use]
    pub fn parse_uptime(raw: &str) -> String {
        let line = raw.lines().next().unwrap_or("").trim();
        if line.starts_with("up ") {
            return line.to_string();
        }
        // classic format: " 12:30:01 up 3 days,  2:04,  1 user, ..."
        if let Some(idx) = line.find(" up ") {
            let rest = &line[idx + 1..];
            let end = rest.find(" user").map_or(rest.len(), |u| {
                rest[..u].rfind(',').unwrap_or(rest[..u].len())
            });
            return rest[..end].trim_end_matches(',').trim().to_string();
        }
        line.to_string()
    }

    /// Parses a single-number output (`wc -l` style), defaulting to 0
    #[must_use]
    pub fn parse_count(raw: &str) -> u32 {
        raw.split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }

    /// First unsigned integer in a string slice, 0 when absent
    fn first_u64(s: &str) -> u64 {
        s.split_whitespace()
            .next()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0)
    }
}
