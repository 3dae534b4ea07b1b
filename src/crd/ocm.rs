//! Open Cluster Management placement resources
//!
//! A `Placement` describes where a workload should run; the hub resolves it
//! into one or more `PlacementDecision` objects naming concrete clusters.

use std::borrow::Cow;

use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::{CustomResource, Resource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::Condition;

/// Label linking a PlacementDecision to the Placement it resolves
pub const PLACEMENT_LABEL: &str = "cluster.open-cluster-management.io/placement";

const OCM_GROUP: &str = "cluster.open-cluster-management.io";
const OCM_VERSION: &str = "v1beta1";

// =============================================================================
// Placement CRD
// =============================================================================

/// Placement selects managed clusters for a workload
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cluster.open-cluster-management.io",
    version = "v1beta1",
    kind = "Placement",
    plural = "placements",
    status = "PlacementStatus",
    namespaced = true
)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSpec {
    /// ManagedClusterSets the placement may select from
    #[serde(default)]
    pub cluster_sets: Vec<String>,

    /// Desired number of clusters; all matching clusters when absent
    #[serde(default)]
    pub number_of_clusters: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlacementStatus {
    #[serde(default)]
    pub number_of_selected_clusters: i32,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

// =============================================================================
// PlacementDecision
// =============================================================================

/// PlacementDecision carries the clusters chosen for a Placement.
///
/// The resource has no spec, so it is modelled by hand rather than derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDecision {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub status: Option<PlacementDecisionStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementDecisionStatus {
    #[serde(default)]
    pub decisions: Vec<ClusterDecision>,
}

/// A single scheduling decision
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDecision {
    #[serde(default)]
    pub cluster_name: String,

    #[serde(default)]
    pub reason: String,
}

impl Resource for PlacementDecision {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "PlacementDecision".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        OCM_GROUP.into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        OCM_VERSION.into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "placementdecisions".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl PlacementDecision {
    /// Decision for the named placement with the given clusters
    pub fn for_clusters<I, S>(placement: &str, namespace: &str, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decision = Self {
            metadata: ObjectMeta {
                name: Some(format!("{}-decision-1", placement)),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            status: Some(PlacementDecisionStatus {
                decisions: clusters
                    .into_iter()
                    .map(|c| ClusterDecision {
                        cluster_name: c.into(),
                        reason: String::new(),
                    })
                    .collect(),
            }),
        };
        decision
            .labels_mut()
            .insert(PLACEMENT_LABEL.to_string(), placement.to_string());
        decision
    }

    /// Name of the placement this decision belongs to, if labelled
    pub fn placement_name(&self) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|l| l.get(PLACEMENT_LABEL))
            .map(String::as_str)
    }

    pub fn decisions(&self) -> &[ClusterDecision] {
        self.status
            .as_ref()
            .map(|s| s.decisions.as_slice())
            .unwrap_or_default()
    }
}
