//! Kubernetes-flavored telemetry collector
//!
//! Sibling of [`super::collector::SystemCollector`] for cluster targets:
//! it reuses the same gateway contract but asks kubectl for
//! JSON-formatted output (`-o json`) and decodes it directly instead of
//! parsing delimited text; the parser layer is swappable per the remote
//! tool's native output mode.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::gateway::{CommandGateway, ExecError};

/// Errors from the Kubernetes collector
#[derive(Debug, thiserror::Error)]
pub enum KubeError {
    /// kubectl could not be executed
    #[error(transparent)]
    Transport(#[from] ExecError),
    /// kubectl ran but its JSON output could not be decoded
    #[error("Failed to decode kubectl output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for Kubernetes collection
pub type KubeResult<T> = Result<T, KubeError>;

/// kubectl invocation parameters
#[derive(Debug, Clone, Default)]
pub struct KubeTarget {
    /// Explicit kubeconfig path
    pub kubeconfig: Option<PathBuf>,
    /// Cluster context name
    pub context: Option<String>,
    /// Namespace; `None` queries all namespaces for pods
    pub namespace: Option<String>,
}

/// One cluster node's telemetry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NodeTelemetry {
    /// Node name
    pub name: String,
    /// CPU capacity as reported (e.g. `"8"`)
    pub cpu_capacity: String,
    /// Memory capacity as reported (e.g. `"16384Mi"`)
    pub memory_capacity: String,
    /// Whether the Ready condition is True
    pub ready: bool,
}

/// One pod's telemetry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PodTelemetry {
    /// Pod name
    pub name: String,
    /// Namespace the pod runs in
    pub namespace: String,
    /// Lifecycle phase (Running, Pending, ...)
    pub phase: String,
    /// Total container restarts
    pub restarts: u32,
    /// Node the pod is scheduled on, empty when unscheduled
    pub node: String,
}

/// Telemetry collector for Kubernetes clusters
pub struct KubernetesCollector {
    gateway: Arc<dyn CommandGateway>,
    target: KubeTarget,
}

impl KubernetesCollector {
    /// Creates a collector issuing kubectl commands through `gateway`
    #[must_use]
    pub fn new(gateway: Arc<dyn CommandGateway>, target: KubeTarget) -> Self {
        Self { gateway, target }
    }

    /// Builds a kubectl command string with the target's global args
    fn kubectl(&self, args: &str) -> String {
        let mut cmd = String::from("kubectl");

        if let Some(ref kubeconfig) = self.target.kubeconfig {
            cmd.push_str(" --kubeconfig ");
            cmd.push_str(&kubeconfig.display().to_string());
        }
        if let Some(ref context) = self.target.context
            && !context.is_empty()
        {
            cmd.push_str(" --context ");
            cmd.push_str(context);
        }

        cmd.push(' ');
        cmd.push_str(args);
        cmd
    }

    /// Lists cluster nodes with capacity and readiness
    ///
    /// # Errors
    ///
    /// [`KubeError::Transport`] when kubectl fails,
    /// [`KubeError::Decode`] on unexpected JSON.
    pub async fn nodes(&self) -> KubeResult<Vec<NodeTelemetry>> {
        let command = self.kubectl("get nodes -o json");
        let output = self.gateway.execute(&command).await?;
        let list: KubeList<KubeNode> = serde_json::from_str(&output)?;

        Ok(list
            .items
            .into_iter()
            .map(|node| NodeTelemetry {
                name: node.metadata.name,
                cpu_capacity: node.status.capacity.get("cpu").cloned().unwrap_or_default(),
                memory_capacity: node
                    .status
                    .capacity
                    .get("memory")
                    .cloned()
                    .unwrap_or_default(),
                ready: node
                    .status
                    .conditions
                    .iter()
                    .any(|c| c.kind == "Ready" && c.status == "True"),
            })
            .collect())
    }

    /// Lists pods in the target namespace (or all namespaces)
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::nodes`].
    pub async fn pods(&self) -> KubeResult<Vec<PodTelemetry>> {
        let args = match self.target.namespace {
            Some(ref ns) => format!("get pods --namespace {ns} -o json"),
            None => "get pods --all-namespaces -o json".to_string(),
        };
        let command = self.kubectl(&args);
        let output = self.gateway.execute(&command).await?;
        let list: KubeList<KubePod> = serde_json::from_str(&output)?;

        Ok(list
            .items
            .into_iter()
            .map(|pod| PodTelemetry {
                name: pod.metadata.name,
                namespace: pod.metadata.namespace,
                phase: pod.status.phase,
                restarts: pod
                    .status
                    .container_statuses
                    .iter()
                    .map(|c| c.restart_count)
                    .sum(),
                node: pod.spec.node_name,
            })
            .collect())
    }
}

// Partial decode targets: only the fields this collector consumes, with
// defaults so sparse objects from older API versions still decode.

#[derive(Debug, Deserialize)]
struct KubeList<T> {
    #[serde(default)]
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubeMetadata {
    name: String,
    namespace: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubeNode {
    metadata: KubeMetadata,
    status: KubeNodeStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubeNodeStatus {
    capacity: HashMap<String, String>,
    conditions: Vec<KubeCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubeCondition {
    #[serde(rename = "type")]
    kind: String,
    status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubePod {
    metadata: KubeMetadata,
    spec: KubePodSpec,
    status: KubePodStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubePodSpec {
    #[serde(rename = "nodeName")]
    node_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubePodStatus {
    phase: String,
    #[serde(rename = "containerStatuses")]
    container_statuses: Vec<KubeContainerStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KubeContainerStatus {
    #[serde(rename = "restartCount")]
    restart_count: u32,
}
