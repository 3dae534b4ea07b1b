//! Form state reducer
//!
//! Pure `(state, action) -> state` transitions for a validated form. Every
//! edit bumps the revision; a validation result is applied only if it was
//! started for the latest revision, so a stale pass finishing late never
//! overwrites a newer one.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::validation::{ErrorMap, FieldError, FormValues, Resolution, ValidationResolver};

/// Current values, dirtiness and last applied validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub dirty: BTreeSet<String>,
    pub revision: u64,
    pub errors: ErrorMap,
    /// Coerced values of the last successful pass
    pub resolved_values: Option<FormValues>,
    validated_revision: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetValue { field: String, value: String },
    Validated { revision: u64, resolution: Resolution },
    Reset { values: FormValues },
}

impl FormState {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// True when the latest revision has been validated without errors
    pub fn is_valid(&self) -> bool {
        self.validated_revision == Some(self.revision) && self.errors.is_empty()
    }
}

pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetValue { field, value } => {
            state.values.insert(field.clone(), value);
            state.dirty.insert(field);
            state.revision += 1;
        }
        FormAction::Validated {
            revision,
            resolution,
        } => {
            if revision != state.revision {
                debug!(
                    revision,
                    current = state.revision,
                    "Discarding stale validation result"
                );
                return state;
            }
            state.resolved_values = resolution.is_valid().then_some(resolution.values);
            state.errors = resolution.errors;
            state.validated_revision = Some(revision);
        }
        FormAction::Reset { values } => {
            state = FormState {
                revision: state.revision + 1,
                ..FormState::new(values)
            };
        }
    }
    state
}

/// Validate the current values, producing the action to dispatch
pub async fn validate(resolver: &ValidationResolver, state: &FormState) -> Result<FormAction> {
    let revision = state.revision;
    let resolution = resolver.resolve(state.values.clone()).await?;
    Ok(FormAction::Validated {
        revision,
        resolution,
    })
}
