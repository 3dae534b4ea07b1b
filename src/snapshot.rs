//! Resource snapshots
//!
//! A point-in-time copy of the resources the console watches, decoded once
//! into typed records. Accepts `kind: List` documents, multi-document YAML
//! or JSON (JSON is valid YAML).

use std::path::Path;

use kube::{Resource, ResourceExt};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::crd::{
    Application, ClusterDecision, DRCluster, DRPlacementControl, DRPolicy, Placement,
    PlacementDecision,
};
use crate::error::{Error, Result};
use crate::i18n::Translate;
use crate::info::{
    build_application_info, build_dr_policy_info, build_drpc_info, build_placement_info,
    format_dr_resources, get_matching_dr_policies, ApplicationInfo, DRPlacementControlInfo,
    DRPolicyInfo, DrResource, PlacementInfo,
};

/// Decoded resources, grouped by kind
#[derive(Debug, Clone, Default)]
pub struct ResourceSnapshot {
    pub applications: Vec<Application>,
    pub placements: Vec<Placement>,
    pub decisions: Vec<PlacementDecision>,
    pub policies: Vec<DRPolicy>,
    pub clusters: Vec<DRCluster>,
    pub controls: Vec<DRPlacementControl>,
}

fn is_kind<K: Resource<DynamicType = ()>>(api_version: &str, kind: &str) -> bool {
    K::api_version(&()) == api_version && K::kind(&()) == kind
}

impl ResourceSnapshot {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Decode every document; unsupported kinds are skipped with a warning
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut snapshot = Self::default();
        for document in serde_yaml::Deserializer::from_str(content) {
            let value = Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            snapshot.add_value(value)?;
        }
        debug!(
            applications = snapshot.applications.len(),
            placements = snapshot.placements.len(),
            policies = snapshot.policies.len(),
            controls = snapshot.controls.len(),
            "Loaded resource snapshot"
        );
        Ok(snapshot)
    }

    fn add_value(&mut self, value: Value) -> Result<()> {
        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedResource("document without kind".to_string()))?
            .to_string();

        if kind == "List" {
            let items = match value {
                Value::Object(mut map) => map.remove("items").unwrap_or(Value::Null),
                _ => Value::Null,
            };
            for item in items.as_array().cloned().unwrap_or_default() {
                self.add_value(item)?;
            }
            return Ok(());
        }

        match self.add_resource(&api_version, &kind, value) {
            Err(Error::UnsupportedKind { kind, api_version }) => {
                warn!(%kind, %api_version, "Skipping unsupported resource");
                Ok(())
            }
            other => other,
        }
    }

    /// Decode one resource by apiVersion and kind
    pub fn add_resource(&mut self, api_version: &str, kind: &str, value: Value) -> Result<()> {
        if is_kind::<Application>(api_version, kind) {
            self.applications.push(serde_json::from_value(value)?);
        } else if is_kind::<Placement>(api_version, kind) {
            self.placements.push(serde_json::from_value(value)?);
        } else if is_kind::<PlacementDecision>(api_version, kind) {
            self.decisions.push(serde_json::from_value(value)?);
        } else if is_kind::<DRPolicy>(api_version, kind) {
            self.policies.push(serde_json::from_value(value)?);
        } else if is_kind::<DRCluster>(api_version, kind) {
            self.clusters.push(serde_json::from_value(value)?);
        } else if is_kind::<DRPlacementControl>(api_version, kind) {
            self.controls.push(serde_json::from_value(value)?);
        } else {
            return Err(Error::UnsupportedKind {
                kind: kind.to_string(),
                api_version: api_version.to_string(),
            });
        }
        Ok(())
    }

    /// Policies paired with their DR clusters
    pub fn dr_resources(&self) -> Vec<DrResource> {
        format_dr_resources(&self.policies, &self.clusters)
    }

    /// Decisions labelled for `placement`, merged in snapshot order. Large
    /// placements spread their clusters over several decision objects.
    fn decision_for(&self, placement: &Placement) -> Option<PlacementDecision> {
        let mut matching = self.decisions.iter().filter(|d| {
            d.namespace() == placement.namespace()
                && d.placement_name() == Some(placement.name_any().as_str())
        });

        let mut merged = matching.next()?.clone();
        let rest: Vec<ClusterDecision> = matching
            .flat_map(|d| d.decisions().iter().cloned())
            .collect();
        if !rest.is_empty() {
            merged
                .status
                .get_or_insert_with(Default::default)
                .decisions
                .extend(rest);
        }
        Some(merged)
    }

    /// The control bound to `placement`; a reference naming another kind,
    /// such as a PlacementRule, does not bind
    fn control_for(&self, placement: &Placement) -> Option<&DRPlacementControl> {
        self.controls.iter().find(|c| {
            let reference = &c.spec.placement_ref;
            c.namespace() == placement.namespace()
                && reference.name == placement.name_any()
                && reference
                    .kind
                    .as_deref()
                    .is_none_or(|kind| kind == Placement::kind(&()))
        })
    }

    /// Placement infos for every placement in `namespace`
    pub fn placement_infos(&self, namespace: &str) -> Vec<PlacementInfo> {
        self.placements
            .iter()
            .filter(|p| p.namespace().as_deref() == Some(namespace))
            .map(|p| build_placement_info(p, self.decision_for(p).as_ref()))
            .collect()
    }

    /// Policy infos for the controls protecting placements in `namespace`,
    /// one per referenced policy in order of first reference
    pub fn policy_infos(&self, namespace: &str, t: &dyn Translate) -> Vec<DRPolicyInfo> {
        let mut by_policy: Vec<(String, Vec<DRPlacementControlInfo>)> = Vec::new();

        for placement in self
            .placements
            .iter()
            .filter(|p| p.namespace().as_deref() == Some(namespace))
        {
            let decision = self.decision_for(placement);
            let placement_info = build_placement_info(placement, decision.as_ref());
            for drpc in build_drpc_info(self.control_for(placement), &placement_info) {
                let policy_name = drpc.dr_policy_ref.name.clone();
                match by_policy.iter_mut().find(|(name, _)| *name == policy_name) {
                    Some((_, controls)) => controls.push(drpc),
                    None => by_policy.push((policy_name, vec![drpc])),
                }
            }
        }

        let resources = self.dr_resources();
        by_policy
            .into_iter()
            .flat_map(|(name, controls)| {
                let resource = resources
                    .iter()
                    .find(|r| r.dr_policy.policy_name() == name);
                if resource.is_none() {
                    warn!(policy = %name, "Placement control references unknown DR policy");
                }
                build_dr_policy_info(
                    resource.map(|r| &r.dr_policy),
                    resource.map(|r| r.dr_clusters.as_slice()).unwrap_or_default(),
                    &controls,
                    Some(t),
                )
            })
            .collect()
    }

    /// Assemble every application with its placements and protecting policies.
    ///
    /// Placements are those in the application's namespace, which is also
    /// the workload namespace.
    pub fn application_infos(&self, t: &dyn Translate) -> Vec<ApplicationInfo> {
        self.applications
            .iter()
            .map(|app| {
                let namespace = app.namespace().unwrap_or_default();
                build_application_info(
                    app,
                    &namespace,
                    self.placement_infos(&namespace),
                    self.policy_infos(&namespace, t),
                )
            })
            .collect()
    }

    /// Policies in the snapshot able to protect `application`
    pub fn matching_policies(&self, application: &ApplicationInfo) -> Vec<DRPolicyInfo> {
        get_matching_dr_policies(application, &self.dr_resources())
    }

    /// Names of all DR policies, for uniqueness checks
    pub fn policy_names(&self) -> Vec<String> {
        self.policies.iter().map(|p| p.name_any()).collect()
    }
}
