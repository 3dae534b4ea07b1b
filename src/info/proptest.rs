//! Property-based tests for the info builders
//!
//! # Test Properties
//!
//! 1. **Concatenation**: cluster names across placements keep order and duplicates
//! 2. **Decision Order**: placement info lists clusters exactly as decided
//! 3. **Determinism**: identical inputs build equal records
//! 4. **Subset Matching**: a policy covering every deployment cluster always matches

#![cfg(test)]

use proptest::prelude::*;

use super::builder::{
    build_dr_policy_info, build_placement_info, get_cluster_names_from_placements,
};
use super::selectors::match_clusters;
use crate::crd::{DRCluster, DRClusterSpec, DRPolicy, DRPolicySpec, Placement, PlacementDecision, PlacementSpec};

// =============================================================================
// Property Strategies
// =============================================================================

fn cluster_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn cluster_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cluster_name_strategy(), 0..6)
}

fn placement_infos(lists: &[Vec<String>]) -> Vec<super::PlacementInfo> {
    lists
        .iter()
        .enumerate()
        .map(|(i, clusters)| {
            let name = format!("placement-{}", i);
            let placement = Placement::new(&name, PlacementSpec::default());
            let decision = PlacementDecision::for_clusters(&name, "apps", clusters.iter().cloned());
            build_placement_info(&placement, Some(&decision))
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_cluster_names_concatenate(lists in prop::collection::vec(cluster_list_strategy(), 0..5)) {
        let infos = placement_infos(&lists);
        let expected: Vec<String> = lists.concat();
        prop_assert_eq!(get_cluster_names_from_placements(&infos), expected);
    }

    #[test]
    fn prop_placement_info_keeps_decision_order(clusters in cluster_list_strategy()) {
        let infos = placement_infos(std::slice::from_ref(&clusters));
        prop_assert_eq!(&infos[0].deployment_clusters, &clusters);
    }

    #[test]
    fn prop_policy_info_is_deterministic(
        clusters in cluster_list_strategy(),
        regions in prop::collection::vec("[a-z]{2}-[a-z]{4}", 0..4),
    ) {
        let policy = DRPolicy::new("policy", DRPolicySpec {
            scheduling_interval: "5m".to_string(),
            dr_clusters: clusters.clone(),
            ..Default::default()
        });
        let dr_clusters: Vec<DRCluster> = regions
            .iter()
            .enumerate()
            .map(|(i, region)| DRCluster::new(&format!("c{}", i), DRClusterSpec {
                region: region.clone(),
                ..Default::default()
            }))
            .collect();

        let first = build_dr_policy_info(Some(&policy), &dr_clusters, &[], None);
        let second = build_dr_policy_info(Some(&policy), &dr_clusters, &[], None);
        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_superset_policy_matches(
        deployment in prop::collection::vec(cluster_name_strategy(), 1..5),
        extra in cluster_list_strategy(),
    ) {
        let mut policy = deployment.clone();
        policy.extend(extra);
        prop_assert!(match_clusters(&policy, &deployment));
    }
}
