//! Aggregate collector: batch execution, caching, single-flight, refresh
//!
//! [`SystemCollector`] owns the gateway handle and the two caches. One
//! collection cycle launches the whole snapshot battery concurrently and
//! suspends until every command settles (join semantics: the first
//! failure aborts the cycle and no partial snapshot is ever published).
//! A boolean in-flight flag rejects overlapping cycles; it is cleared by a
//! drop guard on every exit path so a failed cycle cannot wedge future
//! ones.
//!
//! The collector is constructed once at application start and passed by
//! handle to every consumer; there are no ambient singletons.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock, mpsc};

use crate::gateway::{CommandGateway, ExecError};

use super::commands;
use super::detail::DetailParser;
use super::fallback::{self, CONNECTION_COUNT, CONNECTION_DETAIL};
use super::model::{DetailedInfo, NetworkInfo, SystemSnapshot};
use super::parser::SnapshotParser;
use super::settings::CollectorSettings;

/// Errors that can abort a collection cycle
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// Another collection cycle is still running
    #[error("Collection already in progress")]
    AlreadyInProgress,
    /// A battery command failed; the whole cycle is aborted
    #[error(transparent)]
    Transport(#[from] ExecError),
}

/// Result type for collector operations
pub type CollectResult<T> = Result<T, CollectError>;

/// Raw snapshot battery output, one field per command
#[derive(Debug, Default)]
struct RawSnapshot {
    hostname: String,
    uptime: String,
    loadavg: String,
    meminfo: String,
    disk: String,
    cpu_info: String,
    cpu_usage: String,
    interfaces: String,
    dns: String,
    default_route: String,
    net_dev: String,
    connection_count: String,
    process_count: String,
    user_count: String,
}

/// Raw detail battery output, one field per command
#[derive(Debug, Default)]
struct RawDetail {
    processes: String,
    connections: String,
    services: String,
    users: String,
    autostart: String,
    cron: String,
    firewall: String,
}

/// Clears the in-flight flag on every exit path of a cycle
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to a running auto-refresh task
#[derive(Debug)]
struct RefreshHandle {
    stop_tx: mpsc::Sender<()>,
}

/// Remote telemetry collector with caching and single-flight discipline
pub struct SystemCollector {
    gateway: Arc<dyn CommandGateway>,
    settings: CollectorSettings,
    in_flight: AtomicBool,
    snapshot: RwLock<Option<SystemSnapshot>>,
    detail: RwLock<Option<DetailedInfo>>,
    refresh: Mutex<Option<RefreshHandle>>,
}

impl SystemCollector {
    /// Creates a collector over `gateway` with default settings
    #[must_use]
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        Self::with_settings(gateway, CollectorSettings::default())
    }

    /// Creates a collector with explicit settings
    #[must_use]
    pub fn with_settings(gateway: Arc<dyn CommandGateway>, settings: CollectorSettings) -> Self {
        Self {
            gateway,
            settings,
            in_flight: AtomicBool::new(false),
            snapshot: RwLock::new(None),
            detail: RwLock::new(None),
            refresh: Mutex::new(None),
        }
    }

    /// Acquires the single-flight slot or rejects the cycle
    fn begin(&self) -> CollectResult<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CollectError::AlreadyInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Runs one snapshot collection cycle.
    ///
    /// The whole battery is launched concurrently; the first command
    /// failure aborts the cycle and the previous snapshot stays cached as
    /// last known good. On success the new snapshot (with the cached
    /// detail block attached when present) replaces the cache wholesale.
    ///
    /// # Errors
    ///
    /// [`CollectError::AlreadyInProgress`] when another cycle is running;
    /// [`CollectError::Transport`] when any battery command fails.
    pub async fn collect(&self) -> CollectResult<SystemSnapshot> {
        let _guard = self.begin()?;
        let started = std::time::Instant::now();

        let raw = self.fetch_snapshot().await?;
        let detailed = self.detail.read().await.clone();
        let snapshot = Self::assemble(&raw, detailed);

        *self.snapshot.write().await = Some(snapshot.clone());
        tracing::debug!(
            host = %snapshot.hostname,
            duration_ms = started.elapsed().as_millis() as u64,
            "snapshot collected"
        );
        Ok(snapshot)
    }

    /// Returns the detailed telemetry block, cache-first.
    ///
    /// A cached block is returned without touching the remote host; a miss
    /// runs the detail battery (under the same single-flight guard) and
    /// attaches the result to the cached snapshot.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::collect`].
    pub async fn detailed(&self) -> CollectResult<DetailedInfo> {
        if let Some(cached) = self.detail.read().await.clone() {
            tracing::debug!("serving detail from cache");
            return Ok(cached);
        }

        let _guard = self.begin()?;
        let raw = self.fetch_detail().await?;
        let detail = Self::assemble_detail(&raw);

        *self.detail.write().await = Some(detail.clone());
        if let Some(snapshot) = self.snapshot.write().await.as_mut() {
            snapshot.detailed = Some(detail.clone());
        }
        Ok(detail)
    }

    /// Last successfully collected snapshot, if any
    pub async fn cached_snapshot(&self) -> Option<SystemSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Discards the cached detail block only; the snapshot cache keeps its
    /// last known good value.
    pub async fn clear_detail_cache(&self) {
        *self.detail.write().await = None;
    }

    /// Arms the auto-refresh timer. Any previously armed timer is stopped
    /// first, so at most one is ever active. Failed cycles are logged and
    /// the timer keeps ticking.
    ///
    /// The spawned task holds only a weak handle, so dropping the last
    /// strong reference also ends the timer.
    pub async fn start_auto_refresh(self: Arc<Self>, interval: Duration) {
        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);
        let collector = Arc::downgrade(&self);

        {
            let mut slot = self.refresh.lock().await;
            if let Some(prev) = slot.take() {
                let _ = prev.stop_tx.send(()).await;
            }
            *slot = Some(RefreshHandle { stop_tx });
        }

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the first tick fires immediately; skip it so arming the
            // timer does not race a collection the caller just ran
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = stop_rx.recv() => break,
                    _ = ticker.tick() => {
                        let Some(collector) = collector.upgrade() else {
                            break;
                        };
                        match collector.collect().await {
                            Ok(_) => {}
                            Err(CollectError::AlreadyInProgress) => {
                                tracing::debug!("refresh tick skipped, cycle in flight");
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "auto-refresh cycle failed");
                            }
                        }
                    }
                }
            }
            tracing::debug!("auto-refresh stopped");
        });
    }

    /// Disarms the auto-refresh timer if one is active
    pub async fn stop_auto_refresh(&self) {
        if let Some(handle) = self.refresh.lock().await.take() {
            let _ = handle.stop_tx.send(()).await;
        }
    }

    /// Stops the refresh timer and drops both caches
    pub async fn shutdown(&self) {
        self.stop_auto_refresh().await;
        *self.snapshot.write().await = None;
        *self.detail.write().await = None;
    }

    /// Launches the snapshot battery concurrently and waits for all of it
    async fn fetch_snapshot(&self) -> Result<RawSnapshot, ExecError> {
        let g = &*self.gateway;

        let (
            hostname,
            uptime,
            loadavg,
            meminfo,
            disk,
            cpu_info,
            cpu_usage,
            interfaces,
            dns,
            default_route,
            net_dev,
            connection_count,
            process_count,
            user_count,
        ) = tokio::try_join!(
            g.execute(commands::HOSTNAME),
            g.execute(commands::UPTIME),
            g.execute(commands::LOADAVG),
            g.execute(commands::MEMINFO),
            g.execute(commands::DISK),
            g.execute(commands::CPU_INFO),
            g.execute(commands::CPU_USAGE),
            g.execute(commands::INTERFACES),
            g.execute(commands::DNS),
            g.execute(commands::GATEWAY),
            g.execute(commands::NET_DEV),
            async { Ok::<_, ExecError>(fallback::resolve(g, CONNECTION_COUNT).await.output) },
            g.execute(commands::PROCESS_COUNT),
            g.execute(commands::USER_COUNT),
        )?;

        Ok(RawSnapshot {
            hostname,
            uptime,
            loadavg,
            meminfo,
            disk,
            cpu_info,
            cpu_usage,
            interfaces,
            dns,
            default_route,
            net_dev,
            connection_count,
            process_count,
            user_count,
        })
    }

    /// Launches the detail battery concurrently and waits for all of it
    async fn fetch_detail(&self) -> Result<RawDetail, ExecError> {
        let g = &*self.gateway;
        let processes_cmd = commands::processes(self.settings.process_rows);
        let services_cmd = commands::services(self.settings.service_rows);

        let (processes, connections, services, users, autostart, cron, firewall) = tokio::try_join!(
            g.execute(&processes_cmd),
            async { Ok::<_, ExecError>(fallback::resolve(g, CONNECTION_DETAIL).await.output) },
            g.execute(&services_cmd),
            g.execute(commands::USERS),
            g.execute(commands::AUTOSTART),
            g.execute(commands::CRON_JOBS),
            g.execute(commands::FIREWALL_RULES),
        )?;

        Ok(RawDetail {
            processes,
            connections,
            services,
            users,
            autostart,
            cron,
            firewall,
        })
    }

    /// Builds the typed snapshot from the raw battery output
    fn assemble(raw: &RawSnapshot, detailed: Option<DetailedInfo>) -> SystemSnapshot {
        let partitions = SnapshotParser::parse_partitions(&raw.disk);
        let disk = SnapshotParser::disk_summary(&partitions);
        let (rx_bytes, tx_bytes) = SnapshotParser::parse_net_counters(&raw.net_dev);

        SystemSnapshot {
            hostname: raw.hostname.trim().to_string(),
            uptime: SnapshotParser::parse_uptime(&raw.uptime),
            load_average: SnapshotParser::parse_load_average(&raw.loadavg),
            memory: SnapshotParser::parse_memory(&raw.meminfo),
            disk,
            partitions,
            cpu: SnapshotParser::parse_cpu(&raw.cpu_info, &raw.cpu_usage),
            network: NetworkInfo {
                interfaces: SnapshotParser::parse_interfaces(&raw.interfaces),
                dns: SnapshotParser::parse_dns(&raw.dns),
                gateway: SnapshotParser::parse_gateway(&raw.default_route),
                rx_bytes,
                tx_bytes,
            },
            connection_count: SnapshotParser::parse_count(&raw.connection_count),
            process_count: SnapshotParser::parse_count(&raw.process_count),
            user_count: SnapshotParser::parse_count(&raw.user_count),
            last_update: Utc::now(),
            detailed,
        }
    }

    /// Builds the typed detail block from the raw battery output
    fn assemble_detail(raw: &RawDetail) -> DetailedInfo {
        DetailedInfo {
            processes: DetailParser::parse_processes(&raw.processes),
            connections: DetailParser::parse_connections(&raw.connections),
            services: DetailParser::parse_services(&raw.services),
            users: DetailParser::parse_users(&raw.users),
            autostart: DetailParser::parse_autostart(&raw.autostart),
            cron_jobs: DetailParser::parse_cron(&raw.cron),
            firewall_rules: DetailParser::parse_firewall(&raw.firewall),
        }
    }
}
