//! HostLens Core Library
//!
//! This crate provides the core functionality for the HostLens remote
//! telemetry collector: the remote-execution gateway contract, the
//! telemetry command battery with its format parsers, fallback chains for
//! facts with competing tool ecosystems, and the caching/single-flight
//! collection discipline.
//!
//! # Crate Structure
//!
//! - [`gateway`] - Remote command execution contract and the SSH implementation
//! - [`telemetry`] - Data models, command battery, parsers, fallback chains, collectors
//! - [`config`] - Application settings and TOML persistence
//! - [`tracing`] - Structured logging setup
//!
//! # Typical use
//!
//! ```no_run
//! use std::sync::Arc;
//! use hostlens_core::gateway::SshGateway;
//! use hostlens_core::telemetry::SystemCollector;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Arc::new(SshGateway::new("web01.example.com").with_username("ops"));
//! let collector = Arc::new(SystemCollector::new(gateway));
//!
//! let snapshot = collector.collect().await?;
//! println!("{} is up {}", snapshot.hostname, snapshot.uptime);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod gateway;
pub mod telemetry;
pub mod tracing;

pub use config::{AppSettings, ConfigError, ConfigManager, ConfigResult, LoggingSettings};
pub use gateway::{CommandGateway, ExecError, ExecResult, SshGateway};
pub use telemetry::{
    AutostartEntry, CollectError, CollectResult, CollectorSettings, ConnectionEntry, CpuInfo,
    CronJob, DetailParser, DetailedInfo, DiskUsage, FallbackChain, FallbackOutcome, FirewallRule,
    HostOverride, KubeError, KubeResult, KubeTarget, KubernetesCollector, MemoryUsage,
    NetworkInfo, NetworkInterface, NodeTelemetry, Partition, PodTelemetry, ProcessEntry,
    ServiceEntry, SnapshotParser, SystemCollector, SystemSnapshot, UserAccount, format_bytes,
    format_kb,
};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, field_names,
    get_tracing_config, init_tracing, is_tracing_initialized, span_names,
};
