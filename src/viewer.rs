//! Policy configuration view model
//!
//! Everything the policy details panel shows for one DR policy: replication
//! type, sync interval, validation status, clusters and, per placement, the
//! protected PVC labels and last sync time.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::i18n::{pluralize, Translate};
use crate::info::{DRPlacementControlInfo, DRPolicyInfo, SyncInterval};

/// Which placement controls the panel is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlacementSelection {
    /// Aggregate over every placement control
    #[default]
    All,
    /// A single placement, by name
    Placement(String),
}

/// Placement controls keyed by the name of their placement, in the order
/// the controls were listed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementControlMap {
    entries: Vec<(String, DRPlacementControlInfo)>,
}

impl PlacementControlMap {
    /// Add a control; one with the same placement name is replaced in place
    pub fn insert(&mut self, name: String, drpc: DRPlacementControlInfo) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = drpc,
            None => self.entries.push((name, drpc)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DRPlacementControlInfo> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn controls(&self) -> impl Iterator<Item = &DRPlacementControlInfo> {
        self.entries.iter().map(|(_, d)| d)
    }
}

/// Rendered policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfigView {
    pub policy_name: String,
    pub replication_type: String,
    /// Empty when the policy interval cannot be parsed
    pub sync_interval: String,
    pub status: String,
    pub is_validated: bool,
    pub clusters: Vec<String>,
    pub dropdown_options: Vec<String>,
    pub selection: PlacementSelection,
    pub pvc_labels: Vec<String>,
    /// Only set for a single selected placement
    pub last_sync_time: Option<DateTime<Utc>>,
    pub protected_resources: String,
}

/// Index placement controls by placement name; later entries win on clashes
pub fn placement_control_map(controls: &[DRPlacementControlInfo]) -> PlacementControlMap {
    controls
        .iter()
        .fold(PlacementControlMap::default(), |mut map, drpc| {
            let name = drpc.placement_info.metadata.name.clone().unwrap_or_default();
            map.insert(name, drpc.clone());
            map
        })
}

/// PVC labels in scope: all controls' labels for `All`, otherwise the
/// selected control's labels (empty for an unknown placement)
pub fn selected_labels(map: &PlacementControlMap, selection: &PlacementSelection) -> Vec<String> {
    match selection {
        PlacementSelection::All => map
            .controls()
            .flat_map(|drpc| drpc.pvc_selector.iter().cloned())
            .collect(),
        PlacementSelection::Placement(name) => map
            .get(name)
            .map(|drpc| drpc.pvc_selector.clone())
            .unwrap_or_default(),
    }
}

impl PolicyConfigView {
    pub fn build(policy: &DRPolicyInfo, selection: PlacementSelection, t: &dyn Translate) -> Self {
        let map = placement_control_map(&policy.placement_control_info);
        let policy_name = policy.metadata.name.clone().unwrap_or_default();

        let sync_interval = match SyncInterval::parse(&policy.scheduling_interval) {
            Ok(interval) => interval.display_text(t),
            Err(e) => {
                warn!(policy = %policy_name, "Unparseable scheduling interval: {}", e);
                String::new()
            }
        };

        let mut dropdown_options = vec![t.translate("All placements")];
        dropdown_options.extend(map.names().map(str::to_string));

        let (last_sync_time, protected_resources) = match &selection {
            PlacementSelection::All => (
                None,
                pluralize(map.len(), "placement", "placements", t),
            ),
            PlacementSelection::Placement(name) => (
                map.get(name).and_then(|drpc| drpc.last_group_sync_time),
                name.clone(),
            ),
        };

        Self {
            replication_type: policy.replication_type.display_text(t),
            sync_interval,
            status: if policy.is_validated {
                t.translate("Validated")
            } else {
                t.translate("Not Validated")
            },
            is_validated: policy.is_validated,
            clusters: policy.dr_clusters.clone(),
            dropdown_options,
            pvc_labels: selected_labels(&map, &selection),
            selection,
            last_sync_time,
            protected_resources,
            policy_name,
        }
    }
}
