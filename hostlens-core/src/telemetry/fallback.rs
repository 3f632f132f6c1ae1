//! Ordered fallback chains for facts with competing data sources
//!
//! Some facts (connection count, connection listing) have no single
//! universally installed tool: `ss` supersedes `netstat`, but either may
//! be missing. Instead of nested error handling, each fact carries an
//! explicit ordered list of alternative commands. The resolver walks the
//! list, isolating every attempt: a gateway failure or blank output moves
//! on to the next alternative, and only exhaustion of the whole chain
//! degrades to an empty result: "no data", not an error.

use crate::gateway::CommandGateway;

use super::commands;

/// An ordered list of alternative commands for one fact
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain {
    /// Name of the fact, used in trace output
    pub label: &'static str,
    /// Commands to try, preferred first
    pub alternatives: &'static [&'static str],
}

/// Connection-count chain: `ss`, then `netstat`
pub const CONNECTION_COUNT: FallbackChain = FallbackChain {
    label: "connection-count",
    alternatives: &commands::CONNECTION_COUNT_CHAIN,
};

/// Connection-listing chain: `ss` with processes, `netstat` with
/// processes, then `ss` without process attribution
pub const CONNECTION_DETAIL: FallbackChain = FallbackChain {
    label: "connection-detail",
    alternatives: &commands::CONNECTION_DETAIL_CHAIN,
};

/// Result of walking a fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackOutcome {
    /// Output of the first usable alternative, or empty on exhaustion
    pub output: String,
    /// Index of the alternative that produced the output
    pub source: Option<usize>,
}

impl FallbackOutcome {
    /// True when every alternative failed or produced nothing
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.source.is_none()
    }
}

/// Walks `chain` against `gateway`, returning the first non-blank result.
///
/// Attempts are isolated: neither a gateway error nor blank output
/// propagates past the chain boundary. An exhausted chain yields an empty
/// output that callers treat as "no data".
pub async fn resolve(gateway: &dyn CommandGateway, chain: FallbackChain) -> FallbackOutcome {
    for (index, command) in chain.alternatives.iter().enumerate() {
        match gateway.execute(command).await {
            Ok(output) if !output.trim().is_empty() => {
                tracing::debug!(
                    fact = chain.label,
                    source = index,
                    "fallback chain resolved"
                );
                return FallbackOutcome {
                    output,
                    source: Some(index),
                };
            }
            Ok(_) => {
                tracing::debug!(
                    fact = chain.label,
                    source = index,
                    "fallback source returned no output, trying next"
                );
            }
            Err(err) => {
                tracing::debug!(
                    fact = chain.label,
                    source = index,
                    error = %err,
                    "fallback source failed, trying next"
                );
            }
        }
    }

    tracing::debug!(fact = chain.label, "fallback chain exhausted");
    FallbackOutcome {
        output: String::new(),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::gateway::{ExecError, ExecResult};

    use super::*;

    /// Gateway stub that maps command strings to canned results
    struct ScriptedGateway {
        responses: HashMap<&'static str, ExecResult<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new(responses: HashMap<&'static str, ExecResult<String>>) -> Self {
            Self {
                responses,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CommandGateway for ScriptedGateway {
        async fn execute(&self, command: &str) -> ExecResult<String> {
            self.calls.lock().unwrap().push(command.to_string());
            self.responses
                .get(command)
                .cloned()
                .unwrap_or_else(|| Err(ExecError::Transport("unscripted command".into())))
        }
    }

    const CHAIN: FallbackChain = FallbackChain {
        label: "test-fact",
        alternatives: &["primary", "secondary", "tertiary"],
    };

    #[tokio::test]
    async fn test_primary_success_stops_the_chain() {
        let gw = ScriptedGateway::new(HashMap::from([(
            "primary",
            Ok("primary output\n".to_string()),
        )]));

        let outcome = resolve(&gw, CHAIN).await;
        assert_eq!(outcome.output, "primary output\n");
        assert_eq!(outcome.source, Some(0));
        assert_eq!(gw.call_count(), 1);
    }

    #[tokio::test]
    async fn test_secondary_result_passes_through_unmodified() {
        let gw = ScriptedGateway::new(HashMap::from([
            (
                "primary",
                Err(ExecError::Transport("ss: not found".into())),
            ),
            ("secondary", Ok("from netstat\n".to_string())),
        ]));

        let outcome = resolve(&gw, CHAIN).await;
        assert_eq!(outcome.output, "from netstat\n");
        assert_eq!(outcome.source, Some(1));
    }

    #[tokio::test]
    async fn test_blank_output_counts_as_failure() {
        let gw = ScriptedGateway::new(HashMap::from([
            ("primary", Ok("   \n".to_string())),
            ("secondary", Ok("usable\n".to_string())),
        ]));

        let outcome = resolve(&gw, CHAIN).await;
        assert_eq!(outcome.source, Some(1));
    }

    #[tokio::test]
    async fn test_exhaustion_degrades_to_empty_not_error() {
        let gw = ScriptedGateway::new(HashMap::new());

        let outcome = resolve(&gw, CHAIN).await;
        assert!(outcome.is_no_data());
        assert_eq!(outcome.output, "");
        // all three alternatives were attempted
        assert_eq!(gw.call_count(), 3);
    }

    #[test]
    fn test_shipped_chains_are_ordered() {
        assert_eq!(CONNECTION_COUNT.alternatives.len(), 2);
        assert_eq!(CONNECTION_DETAIL.alternatives.len(), 3);
    }
}
