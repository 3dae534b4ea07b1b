//! Info builders
//!
//! Total functions projecting raw resources into the records in
//! [`super::types`]. Missing inputs degrade to empty results; nothing here
//! returns an error.

use kube::api::ObjectMeta;
use kube::Resource;
use tracing::debug;

use crate::crd::{DRCluster, DRPlacementControl, DRPolicy, PlacementDecision};
use crate::i18n::{Translate, Untranslated};

use super::selectors::{
    clusters_from_decision, current_activity, find_dr_type, is_dr_policy_validated,
    label_strings, match_clusters,
};
use super::types::{
    ApplicationInfo, DRPlacementControlInfo, DRPolicyInfo, DrResource, PlacementInfo,
};

/// apiVersion, kind and metadata of any statically typed resource
fn envelope<K>(resource: &K) -> (String, String, ObjectMeta)
where
    K: Resource<DynamicType = ()>,
{
    (
        K::api_version(&()).into_owned(),
        K::kind(&()).into_owned(),
        resource.meta().clone(),
    )
}

/// Resolve a placement into the clusters its decision selected.
///
/// A missing decision, or one without status, yields no deployment clusters.
pub fn build_placement_info<K>(placement: &K, decision: Option<&PlacementDecision>) -> PlacementInfo
where
    K: Resource<DynamicType = ()>,
{
    let (api_version, kind, metadata) = envelope(placement);
    PlacementInfo {
        api_version,
        kind,
        metadata,
        deployment_clusters: clusters_from_decision(decision),
    }
}

/// Wrap a placement control with its resolved placement.
///
/// Returns an empty list when there is no control, otherwise exactly one
/// element, so results from several sources can be concatenated.
pub fn build_drpc_info(
    drpc: Option<&DRPlacementControl>,
    placement_info: &PlacementInfo,
) -> Vec<DRPlacementControlInfo> {
    let Some(drpc) = drpc else {
        return Vec::new();
    };

    let (api_version, kind, metadata) = envelope(drpc);
    vec![DRPlacementControlInfo {
        api_version,
        kind,
        metadata,
        dr_policy_ref: drpc.spec.dr_policy_ref.clone(),
        placement_info: placement_info.clone(),
        pvc_selector: label_strings(&drpc.spec.pvc_selector.match_labels),
        last_group_sync_time: drpc.last_group_sync_time(),
        status: drpc.phase().map(str::to_string),
    }]
}

/// Summarize a DR policy and the placement controls using it.
///
/// Only the first control contributes `assigned_on` and `activity`;
/// several controls on one policy are not aggregated.
pub fn build_dr_policy_info(
    dr_policy: Option<&DRPolicy>,
    dr_clusters: &[DRCluster],
    drpc_infos: &[DRPlacementControlInfo],
    translator: Option<&dyn Translate>,
) -> Vec<DRPolicyInfo> {
    let Some(policy) = dr_policy else {
        debug!("No DR policy given, skipping policy info");
        return Vec::new();
    };

    let t = translator.unwrap_or(&Untranslated);
    let first_drpc = drpc_infos.first();
    let (api_version, kind, metadata) = envelope(policy);

    vec![DRPolicyInfo {
        api_version,
        kind,
        metadata,
        // TODO: pick the least recently created control once multiple
        // controls per policy are surfaced in the console
        assigned_on: first_drpc
            .and_then(|d| d.metadata.creation_timestamp.as_ref())
            .map(|ts| ts.0),
        activity: current_activity(first_drpc.and_then(|d| d.status.as_deref()), t),
        is_validated: is_dr_policy_validated(policy),
        scheduling_interval: policy.spec.scheduling_interval.clone(),
        replication_type: find_dr_type(dr_clusters),
        dr_clusters: policy.spec.dr_clusters.clone(),
        placement_control_info: drpc_infos.to_vec(),
    }]
}

/// Assemble an application record from already-built parts.
///
/// The caller guarantees that the placements and policies belong to the
/// application.
pub fn build_application_info<K>(
    application: &K,
    workload_namespace: &str,
    placements: Vec<PlacementInfo>,
    data_policies: Vec<DRPolicyInfo>,
) -> ApplicationInfo
where
    K: Resource<DynamicType = ()>,
{
    let (api_version, kind, metadata) = envelope(application);
    ApplicationInfo {
        api_version,
        kind,
        metadata,
        workload_namespace: workload_namespace.to_string(),
        placements,
        data_policies,
    }
}

/// All deployment clusters across the placements, in order, duplicates kept
pub fn get_cluster_names_from_placements(placements: &[PlacementInfo]) -> Vec<String> {
    placements
        .iter()
        .flat_map(|p| p.deployment_clusters.iter().cloned())
        .collect()
}

/// DR policies able to protect the application, in pool order.
///
/// Matching policies are summarized at policy level only; no placement
/// control info is attached.
pub fn get_matching_dr_policies(
    application: &ApplicationInfo,
    dr_resources: &[DrResource],
) -> Vec<DRPolicyInfo> {
    let deployment_clusters = get_cluster_names_from_placements(&application.placements);

    dr_resources
        .iter()
        .filter(|resource| {
            let matched = match_clusters(&resource.dr_policy.spec.dr_clusters, &deployment_clusters);
            debug!(
                policy = resource.dr_policy.policy_name(),
                matched, "Matched DR policy clusters against deployment"
            );
            matched
        })
        .flat_map(|resource| {
            build_dr_policy_info(Some(&resource.dr_policy), &resource.dr_clusters, &[], None)
        })
        .collect()
}

/// Pair each policy with the DR clusters named in its spec.
///
/// Clusters keep the order of the policy's `drClusters` list; names with
/// no DRCluster object are skipped.
pub fn format_dr_resources(policies: &[DRPolicy], clusters: &[DRCluster]) -> Vec<DrResource> {
    policies
        .iter()
        .map(|policy| DrResource {
            dr_policy: policy.clone(),
            dr_clusters: policy
                .cluster_names()
                .iter()
                .filter_map(|name| clusters.iter().find(|c| c.cluster_name() == name))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{
        Application, ApplicationSpec, Condition, ConditionStatus, DRClusterSpec,
        DRPlacementControlSpec, DRPlacementControlStatus, DRPolicySpec, DRPolicyStatus,
        LabelSelector, ObjectReference, Placement, PlacementSpec,
    };
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn placement(name: &str) -> Placement {
        let mut p = Placement::new(name, PlacementSpec::default());
        p.metadata.namespace = Some("busybox".to_string());
        p
    }

    fn placement_info(name: &str, clusters: &[&str]) -> PlacementInfo {
        let decision = PlacementDecision::for_clusters(name, "busybox", clusters.iter().copied());
        build_placement_info(&placement(name), Some(&decision))
    }

    fn policy(name: &str, clusters: &[&str]) -> DRPolicy {
        DRPolicy::new(
            name,
            DRPolicySpec {
                scheduling_interval: "5m".to_string(),
                dr_clusters: names(clusters),
                ..Default::default()
            },
        )
    }

    fn dr_cluster(name: &str, region: &str) -> DRCluster {
        DRCluster::new(
            name,
            DRClusterSpec {
                region: region.to_string(),
                ..Default::default()
            },
        )
    }

    fn drpc(name: &str, phase: Option<&str>, selector: LabelSelector) -> DRPlacementControl {
        let mut drpc = DRPlacementControl::new(
            name,
            DRPlacementControlSpec {
                dr_policy_ref: ObjectReference::named("policy-5m"),
                placement_ref: ObjectReference::named("busybox-placement"),
                pvc_selector: selector,
                ..Default::default()
            },
        );
        drpc.metadata.namespace = Some("busybox".to_string());
        drpc.metadata.creation_timestamp =
            Some(Time(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap()));
        drpc.status = Some(DRPlacementControlStatus {
            phase: phase.map(str::to_string),
            ..Default::default()
        });
        drpc
    }

    #[test]
    fn test_placement_info_keeps_decision_order() {
        let info = placement_info("busybox-placement", &["west", "east"]);
        assert_eq!(info.api_version, "cluster.open-cluster-management.io/v1beta1");
        assert_eq!(info.kind, "Placement");
        assert_eq!(info.metadata.name.as_deref(), Some("busybox-placement"));
        assert_eq!(info.deployment_clusters, names(&["west", "east"]));
    }

    #[test]
    fn test_placement_info_without_decision() {
        let info = build_placement_info(&placement("busybox-placement"), None);
        assert!(info.deployment_clusters.is_empty());
    }

    #[test]
    fn test_drpc_info_absent_is_empty() {
        let pl = placement_info("busybox-placement", &["east"]);
        assert!(build_drpc_info(None, &pl).is_empty());
    }

    #[test]
    fn test_drpc_info_single_element() {
        let pl = placement_info("busybox-placement", &["east"]);
        let selector = LabelSelector::from_labels([("app", "busybox")]);
        let infos = build_drpc_info(Some(&drpc("busybox-drpc", Some("Deployed"), selector)), &pl);

        assert_eq!(infos.len(), 1);
        let info = &infos[0];
        assert_eq!(info.kind, "DRPlacementControl");
        assert_eq!(info.dr_policy_ref.name, "policy-5m");
        assert_eq!(info.placement_info, pl);
        assert_eq!(info.pvc_selector, names(&["app=busybox"]));
        assert_eq!(info.status.as_deref(), Some("Deployed"));
    }

    #[test]
    fn test_drpc_info_missing_selector_is_empty_list() {
        let pl = placement_info("busybox-placement", &["east"]);
        let infos = build_drpc_info(Some(&drpc("busybox-drpc", None, LabelSelector::default())), &pl);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].pvc_selector.is_empty());
        assert!(infos[0].status.is_none());
    }

    #[test]
    fn test_policy_info_absent_is_empty() {
        assert!(build_dr_policy_info(None, &[], &[], None).is_empty());
    }

    #[test]
    fn test_policy_info_fields() {
        let mut p = policy("policy-5m", &["east", "west"]);
        p.status = Some(DRPolicyStatus {
            conditions: vec![Condition::new("Validated", ConditionStatus::True)],
        });
        let clusters = [dr_cluster("east", "us-east-1"), dr_cluster("west", "us-west-1")];

        let infos = build_dr_policy_info(Some(&p), &clusters, &[], None);
        assert_eq!(infos.len(), 1);
        let info = &infos[0];
        assert_eq!(info.api_version, "ramendr.openshift.io/v1alpha1");
        assert_eq!(info.kind, "DRPolicy");
        assert!(info.is_validated);
        assert_eq!(info.scheduling_interval, "5m");
        assert_eq!(info.replication_type, crate::info::ReplicationType::Async);
        assert_eq!(info.dr_clusters, names(&["east", "west"]));
        assert_eq!(info.activity, "");
        assert!(info.assigned_on.is_none());
        assert!(info.placement_control_info.is_empty());
    }

    #[test]
    fn test_policy_info_uses_first_drpc_only() {
        let pl = placement_info("busybox-placement", &["east"]);
        let mut drpcs = build_drpc_info(
            Some(&drpc("first", Some("Relocating"), LabelSelector::default())),
            &pl,
        );
        let mut second = drpc("second", Some("FailingOver"), LabelSelector::default());
        second.metadata.creation_timestamp =
            Some(Time(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()));
        drpcs.extend(build_drpc_info(Some(&second), &pl));

        let t = |m: &str| format!("[{}]", m);
        let infos = build_dr_policy_info(
            Some(&policy("policy-5m", &["east", "west"])),
            &[],
            &drpcs,
            Some(&t),
        );

        let info = &infos[0];
        assert_eq!(info.activity, "[Relocate in progress]");
        assert_eq!(
            info.assigned_on,
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(info.placement_control_info.len(), 2);
    }

    #[test]
    fn test_application_info_assembly() {
        let app = Application::new("busybox", ApplicationSpec::default());
        let pl = placement_info("busybox-placement", &["east"]);
        let info = build_application_info(&app, "busybox", vec![pl.clone()], vec![]);

        assert_eq!(info.api_version, "app.k8s.io/v1beta1");
        assert_eq!(info.kind, "Application");
        assert_eq!(info.workload_namespace, "busybox");
        assert_eq!(info.placements, vec![pl]);
        assert!(info.data_policies.is_empty());
    }

    #[test]
    fn test_cluster_names_keep_duplicates() {
        let placements = [
            placement_info("p1", &["A", "B"]),
            placement_info("p2", &["B", "C"]),
        ];
        assert_eq!(
            get_cluster_names_from_placements(&placements),
            names(&["A", "B", "B", "C"])
        );
        assert!(get_cluster_names_from_placements(&[]).is_empty());
    }

    #[test]
    fn test_matching_dr_policies() {
        let app = build_application_info(
            &Application::new("busybox", ApplicationSpec::default()),
            "busybox",
            vec![placement_info("busybox-placement", &["east", "west"])],
            vec![],
        );
        let clusters = [
            dr_cluster("east", "us-east-1"),
            dr_cluster("west", "us-west-1"),
            dr_cluster("central", "us-central-1"),
        ];
        let policies = [
            policy("east-west", &["east", "west"]),
            policy("east-central", &["east", "central"]),
        ];
        let pool = format_dr_resources(&policies, &clusters);

        let matched = get_matching_dr_policies(&app, &pool);
        assert_eq!(matched.len(), 1);
        assert_matches!(matched[0].metadata.name.as_deref(), Some("east-west"));
        assert!(matched[0].placement_control_info.is_empty());
    }

    #[test]
    fn test_matching_dr_policies_empty_pool() {
        let app = ApplicationInfo::default();
        assert!(get_matching_dr_policies(&app, &[]).is_empty());
    }

    #[test]
    fn test_format_dr_resources_follows_policy_order() {
        let clusters = [dr_cluster("west", "r2"), dr_cluster("east", "r1")];
        let pool = format_dr_resources(&[policy("p", &["east", "west", "gone"])], &clusters);

        let found: Vec<&str> = pool[0].dr_clusters.iter().map(|c| c.cluster_name()).collect();
        assert_eq!(found, ["east", "west"]);
    }

    #[test]
    fn test_builders_are_idempotent() {
        let p = policy("policy-5m", &["east", "west"]);
        let clusters = [dr_cluster("east", "r1")];
        assert_eq!(
            build_dr_policy_info(Some(&p), &clusters, &[], None),
            build_dr_policy_info(Some(&p), &clusters, &[], None)
        );
    }
}
