//! Resource info builders
//!
//! Turns watched DR resources (policies, placements, placement decisions,
//! placement controls and applications) into the normalized records the
//! console renders, and answers which policies can protect an application.
//!
//! # Flow
//!
//! ```text
//! Placement + PlacementDecision ──▶ PlacementInfo
//! DRPlacementControl + PlacementInfo ──▶ [DRPlacementControlInfo]
//! DRPolicy + DRClusters + [DRPlacementControlInfo] ──▶ [DRPolicyInfo]
//! Application + PlacementInfos + DRPolicyInfos ──▶ ApplicationInfo
//! ```

mod builder;
mod interval;
mod selectors;
mod types;

#[cfg(test)]
mod proptest;

pub use builder::{
    build_application_info, build_dr_policy_info, build_drpc_info, build_placement_info,
    format_dr_resources, get_cluster_names_from_placements, get_matching_dr_policies,
};
pub use interval::{IntervalUnit, SyncInterval};
pub use selectors::{
    clusters_from_decision, current_activity, find_dr_type, is_dr_policy_validated,
    label_strings, match_clusters, DrpcPhase,
};
pub use types::{
    ApplicationInfo, DRPlacementControlInfo, DRPolicyInfo, DrResource, PlacementInfo,
    ReplicationType,
};
