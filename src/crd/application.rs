//! Application Custom Resource Definition
//!
//! The `app.k8s.io` Application groups the workload resources that a set of
//! placements deploys to managed clusters.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::common::LabelSelector;

/// Application aggregates the components of a deployed workload
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "app.k8s.io",
    version = "v1beta1",
    kind = "Application",
    plural = "applications",
    namespaced = true
)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    /// Kinds of resources making up the application
    #[serde(default)]
    pub component_kinds: Vec<GroupKind>,

    /// Selects the subscriptions belonging to the application
    #[serde(default)]
    pub selector: Option<LabelSelector>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupKind {
    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub kind: String,
}
