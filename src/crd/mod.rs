//! Custom Resource Definitions
//!
//! Typed views of the resources the console reads. Absent fields are
//! modelled as `Option` or defaulted collections so a watched object is
//! validated once, when it is decoded.

mod application;
mod common;
mod ocm;
mod ramen;

pub use application::{Application, ApplicationSpec, GroupKind};

pub use common::{
    Condition, ConditionStatus, LabelSelector, LabelSelectorOperator, LabelSelectorRequirement,
    ObjectReference,
};

pub use ocm::{
    ClusterDecision, Placement, PlacementDecision, PlacementDecisionStatus, PlacementSpec,
    PlacementStatus, PLACEMENT_LABEL,
};

pub use ramen::{
    DRAction, DRCluster, DRClusterSpec, DRClusterStatus, DRPlacementControl,
    DRPlacementControlSpec, DRPlacementControlStatus, DRPolicy, DRPolicySpec, DRPolicyStatus,
    VALIDATED_CONDITION,
};
