//! Client-side form validation
//!
//! - **Schema** (`schema.rs`) - Declarative per-field rules
//! - **Resolver** (`resolver.rs`) - Runs every rule and groups violations per field
//! - **Requirements** (`requirements.rs`) - Met/unmet indicators for listed requirements
//! - **Presets** (`presets.rs`) - Kubernetes-style resource name rules
//!
//! # Usage
//!
//! ```ignore
//! let rules = NameRules::new(43).unique_among(existing, "A unique name for the namespace within the project");
//! let resolver = ValidationResolver::new(Some(Schema::new().field("ns-name", rules.field_schema(&t))));
//! let resolution = resolver.resolve(values).await?;
//! let states = requirement_states(&rules.requirements(&t), true, resolution.errors.get("ns-name"));
//! ```

mod presets;
mod requirements;
mod resolver;
mod schema;

pub use presets::{LiveNames, NameRules};
pub use requirements::{field_status, requirement_states, FieldStatus, RequirementStatus};
pub use resolver::{
    collect_errors, resolve, ErrorMap, FieldError, MessageEntry, Resolution, ValidationResolver,
    DEFAULT_ERROR_TYPE,
};
pub use schema::{AsyncFieldTest, FieldSchema, FormValues, Rule, Schema, Violation};
