//! Normalized view-model records
//!
//! Read-only projections of the raw resources. They are rebuilt from
//! scratch whenever the watched resources change and carry no identity
//! of their own.

use chrono::{DateTime, Utc};
use kube::api::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::crd::{DRCluster, DRPolicy, ObjectReference};
use crate::i18n::Translate;

/// Where a workload is deployed, resolved from a placement and its decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementInfo {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    /// Cluster names in decision order
    pub deployment_clusters: Vec<String>,
}

/// A placement control bound to its resolved placement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DRPlacementControlInfo {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub dr_policy_ref: ObjectReference,
    pub placement_info: PlacementInfo,
    /// `key=value` strings of the PVC selector labels, never absent
    pub pvc_selector: Vec<String>,
    pub last_group_sync_time: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

/// A DR policy with the placement controls that reference it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DRPolicyInfo {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    /// Creation time of the first placement control only
    pub assigned_on: Option<DateTime<Utc>>,
    /// In-progress activity of the first placement control, or ""
    pub activity: String,
    pub is_validated: bool,
    pub scheduling_interval: String,
    pub replication_type: ReplicationType,
    pub dr_clusters: Vec<String>,
    pub placement_control_info: Vec<DRPlacementControlInfo>,
}

/// An application with its placements and the policies protecting it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub workload_namespace: String,
    pub placements: Vec<PlacementInfo>,
    pub data_policies: Vec<DRPolicyInfo>,
}

/// Replication mode implied by the failure domains of the DR clusters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicationType {
    /// Clusters share a region (metro DR)
    Sync,
    /// Clusters span regions (regional DR)
    #[default]
    Async,
}

impl ReplicationType {
    pub fn display_text(&self, t: &dyn Translate) -> String {
        match self {
            ReplicationType::Sync => t.translate("Synchronous"),
            ReplicationType::Async => t.translate("Asynchronous"),
        }
    }
}

impl std::fmt::Display for ReplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplicationType::Sync => write!(f, "sync"),
            ReplicationType::Async => write!(f, "async"),
        }
    }
}

/// A DR policy together with the DR clusters it names
#[derive(Debug, Clone)]
pub struct DrResource {
    pub dr_policy: DRPolicy,
    pub dr_clusters: Vec<DRCluster>,
}
