//! ODF Console View Models
//!
//! Derives the normalized view models a storage console renders for
//! disaster-recovery protection of applications, and validates the forms
//! that create storage resources.
//!
//! # Architecture
//!
//! ```text
//! watched resources ─▶ crd (typed) ─▶ info builders ─▶ Info records ─▶ viewer
//! form values ─▶ validation resolver ─▶ values | per-field errors ─▶ form reducer
//! ```
//!
//! # Modules
//!
//! - [`crd`] - Typed DR and placement Custom Resources
//! - [`error`] - Error types
//! - [`form`] - Form state reducer
//! - [`i18n`] - Explicit translation lookup
//! - [`info`] - Policy, placement and application info builders
//! - [`snapshot`] - Loading resource snapshots and assembling infos
//! - [`validation`] - Schema-driven form validation
//! - [`viewer`] - Policy configuration view model

pub mod crd;
pub mod error;
pub mod form;
pub mod i18n;
pub mod info;
pub mod snapshot;
pub mod validation;
pub mod viewer;

// Re-export commonly used types
pub use crd::{Application, DRCluster, DRPlacementControl, DRPolicy, Placement, PlacementDecision};
pub use error::{Error, Result};
pub use info::{ApplicationInfo, DRPlacementControlInfo, DRPolicyInfo, PlacementInfo};
pub use snapshot::ResourceSnapshot;
pub use validation::{Resolution, Schema, ValidationResolver};
