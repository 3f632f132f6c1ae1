//! Integration tests for the HostLens core library
//!
//! These drive the collector end-to-end against scripted gateways:
//! single-flight discipline, cache semantics, whole-batch abort, fallback
//! degradation, and the auto-refresh timer.

// Allow common test patterns that Clippy warns about
#![allow(clippy::redundant_clone)]
#![allow(clippy::too_many_lines)]

mod integration;
