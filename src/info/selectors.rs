//! Field selectors and classifiers over raw DR resources

use std::collections::{BTreeMap, HashSet};

use crate::crd::{DRCluster, DRPolicy, PlacementDecision, VALIDATED_CONDITION};
use crate::i18n::Translate;

use super::types::ReplicationType;

/// Cluster names chosen by a placement decision, in decision order
pub fn clusters_from_decision(decision: Option<&PlacementDecision>) -> Vec<String> {
    decision
        .map(|d| {
            d.decisions()
                .iter()
                .map(|c| c.cluster_name.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// True once the DR operator reported the policy as validated
pub fn is_dr_policy_validated(policy: &DRPolicy) -> bool {
    policy
        .conditions()
        .iter()
        .any(|c| c.r#type == VALIDATED_CONDITION && c.is_true())
}

/// Classify replication by region: one shared region means synchronous.
pub fn find_dr_type(dr_clusters: &[DRCluster]) -> ReplicationType {
    let first_region = dr_clusters.first().map(DRCluster::region);
    if dr_clusters
        .iter()
        .all(|c| Some(c.region()) == first_region)
    {
        ReplicationType::Sync
    } else {
        ReplicationType::Async
    }
}

/// Whether a policy spanning `policy_clusters` can protect a workload
/// deployed on `deployment_clusters`.
///
/// Every deployment cluster must belong to the policy; either side being
/// empty never matches.
pub fn match_clusters(policy_clusters: &[String], deployment_clusters: &[String]) -> bool {
    if policy_clusters.is_empty() || deployment_clusters.is_empty() {
        return false;
    }
    let policy: HashSet<&str> = policy_clusters.iter().map(String::as_str).collect();
    deployment_clusters
        .iter()
        .all(|c| policy.contains(c.as_str()))
}

/// Render labels as `key=value`, or a bare `key` when the value is empty
pub fn label_strings(labels: &BTreeMap<String, String>) -> Vec<String> {
    labels
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.clone()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect()
}

// =============================================================================
// Placement control phases
// =============================================================================

/// Phases reported by a placement control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrpcPhase {
    Initiating,
    WaitForUser,
    Deploying,
    Deployed,
    FailingOver,
    FailedOver,
    Relocating,
    Relocated,
    Deleting,
    Other(String),
}

impl From<&str> for DrpcPhase {
    fn from(phase: &str) -> Self {
        match phase {
            "Initiating" => DrpcPhase::Initiating,
            "WaitForUser" => DrpcPhase::WaitForUser,
            "Deploying" => DrpcPhase::Deploying,
            "Deployed" => DrpcPhase::Deployed,
            "FailingOver" => DrpcPhase::FailingOver,
            "FailedOver" => DrpcPhase::FailedOver,
            "Relocating" => DrpcPhase::Relocating,
            "Relocated" => DrpcPhase::Relocated,
            "Deleting" => DrpcPhase::Deleting,
            other => DrpcPhase::Other(other.to_string()),
        }
    }
}

impl DrpcPhase {
    /// Label for an action still in flight, if any
    pub fn activity(&self) -> Option<&'static str> {
        match self {
            DrpcPhase::Relocating => Some("Relocate in progress"),
            DrpcPhase::FailingOver => Some("Failover in progress"),
            _ => None,
        }
    }
}

/// Human activity text for a placement control phase; "" when idle or unknown
pub fn current_activity(phase: Option<&str>, t: &dyn Translate) -> String {
    phase
        .map(DrpcPhase::from)
        .and_then(|p| p.activity())
        .map(|label| t.translate(label))
        .unwrap_or_default()
}
