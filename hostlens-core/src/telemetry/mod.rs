//! Remote host telemetry collection and parsing
//!
//! Provides agentless system telemetry for remote Linux hosts: a battery
//! of shell commands is issued concurrently through a [`crate::gateway`]
//! implementation and the raw text output is parsed into a typed
//! [`SystemSnapshot`]. Facts with competing tool ecosystems (`ss` vs
//! `netstat`) resolve through ordered fallback chains.
//!
//! This module is transport-free: it owns data models, command strings,
//! parsing, and the collection/caching discipline, never the remote
//! session itself.

pub mod collector;
pub mod commands;
mod detail;
pub mod fallback;
pub mod kubernetes;
mod model;
mod parser;
mod settings;

pub use collector::{CollectError, CollectResult, SystemCollector};
pub use detail::DetailParser;
pub use fallback::{CONNECTION_COUNT, CONNECTION_DETAIL, FallbackChain, FallbackOutcome};
pub use kubernetes::{
    KubeError, KubeResult, KubeTarget, KubernetesCollector, NodeTelemetry, PodTelemetry,
};
pub use model::{
    AutostartEntry, ConnectionEntry, CpuInfo, CronJob, DetailedInfo, DiskUsage, FirewallRule,
    MemoryUsage, NetworkInfo, NetworkInterface, Partition, ProcessEntry, ServiceEntry,
    SystemSnapshot, UserAccount, format_bytes, format_kb,
};
pub use parser::SnapshotParser;
pub use settings::{CollectorSettings, HostOverride};
