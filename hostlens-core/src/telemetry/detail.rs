//! Parsers for the detailed half of the telemetry battery
//!
//! Same discipline as the snapshot parsers: total functions, blank input
//! yields an empty sequence, and a record whose primary key field is empty
//! is dropped rather than reported half-filled.
//!
//! The cron and autostart parsers must survive commands that contain
//! literal commas: the remote format puts the free-form command in the
//! middle of the line, so when a line splits into more segments than the
//! record has fields, the middle segments are rejoined.

use super::model::{
    AutostartEntry, ConnectionEntry, CronJob, FirewallRule, ProcessEntry, ServiceEntry,
    UserAccount,
};

/// Stateless parsers for the detail command outputs
pub struct DetailParser;

impl DetailParser {
    /// Parses the six-field process listing.
    ///
    /// The command is the remainder of the line; trailing filler is trimmed.
    #[must_use]
    pub fn parse_processes(raw: &str) -> Vec<ProcessEntry> {
        raw.lines()
            .filter_map(|line| {
                let mut fields = line.splitn(6, ',');
                let pid: u32 = fields.next()?.trim().parse().ok()?;
                let user = fields.next()?.trim();
                let stat = fields.next()?.trim();
                let cpu_percent: f32 = fields.next()?.trim().parse().unwrap_or(0.0);
                let mem_percent: f32 = fields.next()?.trim().parse().unwrap_or(0.0);
                let command = fields.next().unwrap_or("").trim();

                if user.is_empty() {
                    return None;
                }

                Some(ProcessEntry {
                    pid,
                    user: user.to_string(),
                    stat: stat.to_string(),
                    cpu_percent,
                    mem_percent,
                    command: command.to_string(),
                })
            })
            .collect()
    }

    /// Parses the six-field connection listing.
    ///
    /// Process and PID default to `"unknown"`/`"-"` so degraded-source
    /// output (no process attribution) parses identically.
    #[must_use]
    pub fn parse_connections(raw: &str) -> Vec<ConnectionEntry> {
        raw.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.splitn(6, ',').map(str::trim).collect();
                let protocol = *fields.first()?;
                if protocol.is_empty() {
                    return None;
                }

                let field = |i: usize| fields.get(i).copied().unwrap_or("").to_string();
                let or_default = |i: usize, d: &str| {
                    let v = field(i);
                    if v.is_empty() { d.to_string() } else { v }
                };

                Some(ConnectionEntry {
                    protocol: protocol.to_string(),
                    local_address: field(1),
                    foreign_address: field(2),
                    state: field(3),
                    process: or_default(4, "unknown"),
                    pid: or_default(5, "-"),
                })
            })
            .collect()
    }

    /// Parses the four-field service listing
    #[must_use]
    pub fn parse_services(raw: &str) -> Vec<ServiceEntry> {
        raw.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.splitn(4, ',').map(str::trim).collect();
                let name = *fields.first()?;
                if name.is_empty() {
                    return None;
                }
                let field = |i: usize| fields.get(i).copied().unwrap_or("").to_string();

                Some(ServiceEntry {
                    name: name.to_string(),
                    status: field(1),
                    enabled: field(2),
                    description: field(3),
                })
            })
            .collect()
    }

    /// Parses the five-field passwd extract
    #[must_use]
    pub fn parse_users(raw: &str) -> Vec<UserAccount> {
        raw.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                let username = *fields.first()?;
                if username.is_empty() {
                    return None;
                }
                let num = |i: usize| {
                    fields
                        .get(i)
                        .and_then(|f| f.parse().ok())
                        .unwrap_or(0)
                };
                let field = |i: usize| fields.get(i).copied().unwrap_or("").to_string();

                Some(UserAccount {
                    username: username.to_string(),
                    uid: num(1),
                    gid: num(2),
                    home: field(3),
                    shell: field(4),
                })
            })
            .collect()
    }

    /// Parses `name,command,status,type` lines; commands containing literal
    /// commas are rejoined from the middle segments.
    #[must_use]
    pub fn parse_autostart(raw: &str) -> Vec<AutostartEntry> {
        raw.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                if fields.len() < 4 || fields[0].is_empty() {
                    return None;
                }
                let last = fields.len() - 1;

                Some(AutostartEntry {
                    name: fields[0].to_string(),
                    command: fields[1..last - 1].join(","),
                    status: fields[last - 1].to_string(),
                    kind: fields[last].to_string(),
                })
            })
            .collect()
    }

    /// Parses `user,schedule,command,source` lines from the seven-source
    /// aggregate; commands containing literal commas are rejoined.
    #[must_use]
    pub fn parse_cron(raw: &str) -> Vec<CronJob> {
        raw.lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                if fields.len() < 4 || fields[0].is_empty() {
                    return None;
                }
                let last = fields.len() - 1;

                Some(CronJob {
                    user: fields[0].to_string(),
                    schedule: fields[1].to_string(),
                    command: fields[2..last].join(","),
                    source: fields[last].to_string(),
                })
            })
            .collect()
    }

    /// Parses the tool-tagged firewall aggregate, normalizing missing
    /// fields to conventional defaults.
    #[must_use]
    pub fn parse_firewall(raw: &str) -> Vec<FirewallRule> {
        raw.lines()
            .filter_map(|line| {
                if line.trim().is_empty() {
                    return None;
                }
                let fields: Vec<&str> = line.split(',').map(str::trim).collect();
                // the trailing tool tag marks a well-formed row
                if fields.len() < 7 || fields[6].is_empty() {
                    return None;
                }
                let or_default = |i: usize, d: &str| {
                    let v = fields.get(i).copied().unwrap_or("");
                    if v.is_empty() { d.to_string() } else { v.to_string() }
                };

                Some(FirewallRule {
                    chain: or_default(0, "INPUT"),
                    target: or_default(1, "ACCEPT"),
                    protocol: or_default(2, "all"),
                    source: or_default(3, "0.0.0.0/0"),
                    destination: or_default(4, "0.0.0.0/0"),
                    options: fields.get(5).copied().unwrap_or("").to_string(),
                })
            })
            .collect()
    }
}
