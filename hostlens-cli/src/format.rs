//! Human-readable rendering of collected telemetry

use std::fmt::Write as _;

use hostlens_core::{DetailedInfo, SystemSnapshot};

use crate::cli::DetailSection;

/// Renders a snapshot as a text report
#[must_use]
pub fn render_snapshot(snapshot: &SystemSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", snapshot.hostname);
    let _ = writeln!(out, "{}", "=".repeat(snapshot.hostname.len().max(8)));
    let _ = writeln!(out, "Uptime:      {}", snapshot.uptime);
    let _ = writeln!(
        out,
        "Load:        {} {} {}",
        snapshot.load_average[0], snapshot.load_average[1], snapshot.load_average[2]
    );
    let _ = writeln!(
        out,
        "CPU:         {} ({} cores, {:.1}% busy)",
        snapshot.cpu.model, snapshot.cpu.cores, snapshot.cpu.usage_percent
    );
    let _ = writeln!(
        out,
        "Memory:      {} used / {} total ({} available)",
        snapshot.memory.used, snapshot.memory.total, snapshot.memory.available
    );
    let _ = writeln!(
        out,
        "Disk (/):    {} used / {} total ({})",
        snapshot.disk.used, snapshot.disk.total, snapshot.disk.percentage
    );

    if !snapshot.partitions.is_empty() {
        let _ = writeln!(out, "\nPartitions:");
        for p in &snapshot.partitions {
            let _ = writeln!(
                out,
                "  {:<24} {:>6} {:>6} {:>6} {:>5}  {}",
                p.filesystem, p.size, p.used, p.available, p.percentage, p.mountpoint
            );
        }
    }

    let _ = writeln!(out, "\nNetwork:");
    for iface in &snapshot.network.interfaces {
        let ip = if iface.ip.is_empty() { "-" } else { &iface.ip };
        let _ = writeln!(out, "  {:<12} {:<16} {}", iface.name, ip, iface.status);
    }
    if !snapshot.network.dns.is_empty() {
        let _ = writeln!(out, "  DNS:         {}", snapshot.network.dns.join(", "));
    }
    if !snapshot.network.gateway.is_empty() {
        let _ = writeln!(out, "  Gateway:     {}", snapshot.network.gateway);
    }

    let _ = writeln!(
        out,
        "\nConnections: {}   Processes: {}   Users: {}",
        snapshot.connection_count, snapshot.process_count, snapshot.user_count
    );
    let _ = writeln!(
        out,
        "Collected:   {}",
        snapshot.last_update.format("%Y-%m-%d %H:%M:%S UTC")
    );

    out
}

/// One-line summary for watch mode
#[must_use]
pub fn render_summary_line(snapshot: &SystemSnapshot) -> String {
    format!(
        "{}  load {} {} {}  cpu {:.1}%  mem {}/{}  conns {}  procs {}",
        snapshot.last_update.format("%H:%M:%S"),
        snapshot.load_average[0],
        snapshot.load_average[1],
        snapshot.load_average[2],
        snapshot.cpu.usage_percent,
        snapshot.memory.used,
        snapshot.memory.total,
        snapshot.connection_count,
        snapshot.process_count,
    )
}

/// Renders the selected detail section(s) as a text report
#[must_use]
pub fn render_detail(detail: &DetailedInfo, section: DetailSection) -> String {
    let mut out = String::new();
    let all = section == DetailSection::All;

    if all || section == DetailSection::Processes {
        let _ = writeln!(out, "Processes ({}):", detail.processes.len());
        for p in &detail.processes {
            let _ = writeln!(
                out,
                "  {:>7} {:<12} {:<6} {:>5.1} {:>5.1}  {}",
                p.pid, p.user, p.stat, p.cpu_percent, p.mem_percent, p.command
            );
        }
    }

    if all || section == DetailSection::Connections {
        let _ = writeln!(out, "Connections ({}):", detail.connections.len());
        for c in &detail.connections {
            let _ = writeln!(
                out,
                "  {:<5} {:<24} {:<24} {:<12} {}/{}",
                c.protocol, c.local_address, c.foreign_address, c.state, c.process, c.pid
            );
        }
    }

    if all || section == DetailSection::Services {
        let _ = writeln!(out, "Services ({}):", detail.services.len());
        for s in &detail.services {
            let _ = writeln!(
                out,
                "  {:<28} {:<10} {:<10} {}",
                s.name, s.status, s.enabled, s.description
            );
        }
    }

    if all || section == DetailSection::Users {
        let _ = writeln!(out, "Users ({}):", detail.users.len());
        for u in &detail.users {
            let _ = writeln!(
                out,
                "  {:<16} {:>6} {:>6}  {:<20} {}",
                u.username, u.uid, u.gid, u.home, u.shell
            );
        }
    }

    if all || section == DetailSection::Autostart {
        let _ = writeln!(out, "Autostart ({}):", detail.autostart.len());
        for a in &detail.autostart {
            let _ = writeln!(
                out,
                "  {:<28} {:<10} {:<8} {}",
                a.name, a.status, a.kind, a.command
            );
        }
    }

    if all || section == DetailSection::Cron {
        let _ = writeln!(out, "Cron jobs ({}):", detail.cron_jobs.len());
        for j in &detail.cron_jobs {
            let _ = writeln!(
                out,
                "  {:<10} {:<16} {:<40} {}",
                j.user, j.schedule, j.command, j.source
            );
        }
    }

    if all || section == DetailSection::Firewall {
        let _ = writeln!(out, "Firewall rules ({}):", detail.firewall_rules.len());
        for r in &detail.firewall_rules {
            let _ = writeln!(
                out,
                "  {:<10} {:<8} {:<5} {:<18} {:<18} {}",
                r.chain, r.target, r.protocol, r.source, r.destination, r.options
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hostlens_core::{CronJob, MemoryUsage, SystemSnapshot};

    use super::*;

    fn sample_snapshot() -> SystemSnapshot {
        SystemSnapshot {
            hostname: "web01".to_string(),
            uptime: "up 3 days".to_string(),
            load_average: ["0.52".into(), "0.34".into(), "0.28".into()],
            memory: MemoryUsage {
                total: "7.63 GB".into(),
                used: "5.72 GB".into(),
                free: "1.91 GB".into(),
                available: "2.86 GB".into(),
            },
            disk: Default::default(),
            partitions: Vec::new(),
            cpu: Default::default(),
            network: Default::default(),
            connection_count: 12,
            process_count: 184,
            user_count: 2,
            last_update: Utc::now(),
            detailed: None,
        }
    }

    #[test]
    fn test_render_snapshot_mentions_key_facts() {
        let out = render_snapshot(&sample_snapshot());
        assert!(out.contains("web01"));
        assert!(out.contains("up 3 days"));
        assert!(out.contains("5.72 GB used / 7.63 GB total"));
        assert!(out.contains("Connections: 12"));
    }

    #[test]
    fn test_render_summary_line_is_single_line() {
        let out = render_summary_line(&sample_snapshot());
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("conns 12"));
    }

    #[test]
    fn test_render_detail_section_filter() {
        let detail = DetailedInfo {
            cron_jobs: vec![CronJob {
                user: "root".into(),
                schedule: "0 3 * * *".into(),
                command: "/usr/bin/backup.sh".into(),
                source: "/etc/crontab".into(),
            }],
            ..Default::default()
        };

        let cron_only = render_detail(&detail, DetailSection::Cron);
        assert!(cron_only.contains("Cron jobs (1):"));
        assert!(!cron_only.contains("Processes"));

        let all = render_detail(&detail, DetailSection::All);
        assert!(all.contains("Processes (0):"));
        assert!(all.contains("Firewall rules (0):"));
    }
}
