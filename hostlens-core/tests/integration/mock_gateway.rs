//! Scripted gateway for collector tests

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hostlens_core::gateway::{CommandGateway, ExecError, ExecResult};

/// Gateway whose responses are routed by command substring.
///
/// The first rule whose needle occurs in the command wins; unmatched
/// commands succeed with empty output. Every call is recorded, and the
/// whole gateway can be put into a failing or blocked state mid-test.
pub struct MockGateway {
    rules: Vec<(&'static str, ExecResult<String>)>,
    calls: Mutex<Vec<String>>,
    fail_all: AtomicBool,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl MockGateway {
    pub fn new(rules: Vec<(&'static str, ExecResult<String>)>) -> Self {
        Self {
            rules,
            calls: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
            gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Number of commands executed so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Number of executed commands containing `needle`
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }

    /// Makes every subsequent command fail with a transport error
    pub fn fail_from_now_on(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Holds all executions until the returned guard is dropped
    pub async fn hold(&self) -> tokio::sync::OwnedMutexGuard<()> {
        self.gate.clone().lock_owned().await
    }
}

#[async_trait]
impl CommandGateway for MockGateway {
    async fn execute(&self, command: &str) -> ExecResult<String> {
        {
            let _open = self.gate.lock().await;
        }
        self.calls.lock().unwrap().push(command.to_string());

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ExecError::Transport("connection lost".into()));
        }

        for (needle, response) in &self.rules {
            if command.contains(needle) {
                return response.clone();
            }
        }
        Ok(String::new())
    }
}

/// Rules reproducing a plausible healthy host for the snapshot battery
pub fn healthy_host_rules() -> Vec<(&'static str, ExecResult<String>)> {
    vec![
        ("hostname", Ok("web01\n".to_string())),
        ("uptime", Ok("up 3 days, 4 hours\n".to_string())),
        ("loadavg", Ok("0.52 0.34 0.28 2/1234 56789\n".to_string())),
        (
            "meminfo",
            Ok("MemTotal:       8000000 kB\nMemFree:        2000000 kB\nMemAvailable:   3000000 kB\n"
                .to_string()),
        ),
        (
            "df -hP",
            Ok("Filesystem      Size  Used Avail Use% Mounted on\n\
                /dev/sda1        98G   42G   51G  46% /\n\
                tmpfs           3.9G     0  3.9G   0% /dev/shm\n"
                .to_string()),
        ),
        (
            "cpuinfo",
            Ok("model name\t: Intel(R) Xeon(R) CPU E5-2680\n8\n".to_string()),
        ),
        (
            "top -bn1",
            Ok("%Cpu(s):  1.0 us,  1.0 sy,  0.0 ni, 96.0 id,  2.0 wa\n".to_string()),
        ),
        (
            "ip addr",
            Ok("2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> state UP\n    inet 10.0.0.5/24 scope global eth0\n"
                .to_string()),
        ),
        ("resolv.conf", Ok("nameserver 1.1.1.1\n".to_string())),
        (
            "ip route",
            Ok("default via 10.0.0.1 dev eth0\n".to_string()),
        ),
        (
            "net/dev",
            Ok("  eth0: 1000000 1000 0 0 0 0 0 0 500000 800 0 0 0 0 0 0\n".to_string()),
        ),
        ("ss -tun state established", Ok("12\n".to_string())),
        ("ps -e --no-headers", Ok("184\n".to_string())),
        ("who", Ok("2\n".to_string())),
    ]
}

/// Rules for the detail battery on the same host
pub fn healthy_detail_rules() -> Vec<(&'static str, ExecResult<String>)> {
    vec![
        (
            "ps -eo pid",
            Ok("1234,www-data,S,12.5,3.2,/usr/sbin/nginx -g daemon off;\n".to_string()),
        ),
        (
            "ss -tunap",
            Ok("tcp,10.0.0.5:22,10.0.0.99:51234,ESTAB,sshd,812\n".to_string()),
        ),
        (
            "list-units",
            Ok("ssh,active,enabled,OpenBSD Secure Shell server\n".to_string()),
        ),
        (
            "/etc/passwd",
            Ok("root,0,0,/root,/bin/bash\n".to_string()),
        ),
        (
            "list-unit-files",
            Ok("ssh,ssh.service,enabled,systemd\n".to_string()),
        ),
        (
            "crontabs",
            Ok("root,0 3 * * *,/usr/bin/backup.sh --full,/etc/crontab\n".to_string()),
        ),
        (
            "iptables",
            Ok("INPUT,ACCEPT,tcp,0.0.0.0/0,0.0.0.0/0,tcp dpt:22,iptables\n".to_string()),
        ),
    ]
}
