//! Ramen disaster-recovery Custom Resource Definitions
//!
//! Mirrors the `ramendr.openshift.io` resources the console reads:
//! DR policies, the managed clusters they pair, and the placement
//! controls binding an application placement to a policy.

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::{Condition, LabelSelector, ObjectReference};

/// Condition type reported once a policy passed operator validation
pub const VALIDATED_CONDITION: &str = "Validated";

// =============================================================================
// DRPolicy CRD
// =============================================================================

/// DRPolicy pairs a set of managed clusters under a replication schedule.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ramendr.openshift.io",
    version = "v1alpha1",
    kind = "DRPolicy",
    plural = "drpolicies",
    status = "DRPolicyStatus",
    printcolumn = r#"{"name": "Interval", "type": "string", "jsonPath": ".spec.schedulingInterval"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#,
    namespaced = false
)]
#[serde(rename_all = "camelCase")]
pub struct DRPolicySpec {
    /// Replication schedule, e.g. "5m", "1h", "1d".
    /// An empty interval means synchronous replication.
    #[serde(default)]
    pub scheduling_interval: String,

    /// Names of the DRCluster resources governed by this policy
    #[serde(default)]
    pub dr_clusters: Vec<String>,

    /// Selector for the volume replication class used by this policy
    #[serde(default)]
    pub replication_class_selector: Option<LabelSelector>,

    /// Selector for the volume snapshot class used by this policy
    #[serde(default)]
    pub volume_snapshot_class_selector: Option<LabelSelector>,
}

/// Observed state of the DRPolicy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DRPolicyStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl DRPolicy {
    /// Get the name of this policy
    pub fn policy_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    /// DR cluster names listed in the spec
    pub fn cluster_names(&self) -> &[String] {
        &self.spec.dr_clusters
    }

    /// Status conditions, empty when the status is absent
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}

// =============================================================================
// DRCluster CRD
// =============================================================================

/// DRCluster describes a managed cluster participating in disaster recovery
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ramendr.openshift.io",
    version = "v1alpha1",
    kind = "DRCluster",
    plural = "drclusters",
    status = "DRClusterStatus",
    namespaced = false
)]
#[serde(rename_all = "camelCase")]
pub struct DRClusterSpec {
    /// Failure domain of the cluster; clusters sharing a region
    /// replicate synchronously
    #[serde(default)]
    pub region: String,

    /// S3 profile used to store cluster metadata
    #[serde(default)]
    pub s3_profile_name: String,

    #[serde(default)]
    pub cidrs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DRClusterStatus {
    #[serde(default)]
    pub phase: Option<String>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl DRCluster {
    /// Get the cluster name
    pub fn cluster_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("unknown")
    }

    pub fn region(&self) -> &str {
        &self.spec.region
    }
}

// =============================================================================
// DRPlacementControl CRD
// =============================================================================

/// DRPlacementControl binds an application placement to a DR policy
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "ramendr.openshift.io",
    version = "v1alpha1",
    kind = "DRPlacementControl",
    plural = "drplacementcontrols",
    shortname = "drpc",
    status = "DRPlacementControlStatus",
    printcolumn = r#"{"name": "Phase", "type": "string", "jsonPath": ".status.phase"}"#,
    namespaced = true
)]
#[serde(rename_all = "camelCase")]
pub struct DRPlacementControlSpec {
    /// Policy governing this placement
    #[serde(default)]
    pub dr_policy_ref: ObjectReference,

    /// Placement whose decisions are protected
    #[serde(default)]
    pub placement_ref: ObjectReference,

    /// Selects the PVCs protected by this control
    #[serde(default)]
    pub pvc_selector: LabelSelector,

    #[serde(default)]
    pub preferred_cluster: Option<String>,

    #[serde(default)]
    pub failover_cluster: Option<String>,

    #[serde(default)]
    pub action: Option<DRAction>,
}

/// Requested DR action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DRAction {
    Failover,
    Relocate,
}

/// Observed state of the placement control
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DRPlacementControlStatus {
    /// Current phase, e.g. "Deployed", "Relocating", "FailingOver"
    #[serde(default)]
    pub phase: Option<String>,

    /// Time of the last successful group sync
    #[serde(default)]
    pub last_group_sync_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl DRPlacementControl {
    pub fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.phase.as_deref())
    }

    pub fn last_group_sync_time(&self) -> Option<DateTime<Utc>> {
        self.status.as_ref().and_then(|s| s.last_group_sync_time)
    }
}
