//! Validation resolver
//!
//! Bridges a [`Schema`] to a form-state controller: a pass either yields the
//! coerced values and no errors, or no values and every violation grouped by
//! field.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

use super::schema::{FormValues, Schema, Violation};

/// Classification used when a rule does not name its own
pub const DEFAULT_ERROR_TYPE: &str = "validation";

/// One distinct message recorded for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub field: String,
}

/// All violations of one field in a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Type of the last violation recorded
    #[serde(rename = "type")]
    pub kind: String,
    /// Message of the last violation recorded
    pub message: String,
    /// Every distinct message, keyed by message text
    pub messages: BTreeMap<String, MessageEntry>,
}

impl FieldError {
    pub fn has_message(&self, message: &str) -> bool {
        self.messages.contains_key(message)
    }
}

/// Field errors keyed by field path
pub type ErrorMap = BTreeMap<String, FieldError>;

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub values: FormValues,
    pub errors: ErrorMap,
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Group violations by path, merging distinct messages of the same field
pub fn collect_errors<'a, I>(violations: I) -> ErrorMap
where
    I: IntoIterator<Item = &'a Violation>,
{
    violations
        .into_iter()
        .fold(ErrorMap::new(), |mut errors, violation| {
            let kind = violation
                .kind
                .clone()
                .unwrap_or_else(|| DEFAULT_ERROR_TYPE.to_string());
            let entry = MessageEntry {
                kind: kind.clone(),
                field: violation.path.clone(),
            };

            errors
                .entry(violation.path.clone())
                .and_modify(|e| {
                    e.kind = kind.clone();
                    e.message = violation.message.clone();
                    e.messages.insert(violation.message.clone(), entry.clone());
                })
                .or_insert_with(|| FieldError {
                    kind: kind.clone(),
                    message: violation.message.clone(),
                    messages: BTreeMap::from([(violation.message.clone(), entry.clone())]),
                });
            errors
        })
}

/// Validate `values` against `schema`; a missing schema accepts anything.
///
/// Violations come back as a [`Resolution`] with errors; only a failing
/// custom test surfaces as `Err`.
pub async fn resolve(schema: Option<&Schema>, values: FormValues) -> Result<Resolution> {
    let Some(schema) = schema else {
        return Ok(Resolution {
            values,
            errors: ErrorMap::new(),
        });
    };

    let (coerced, violations) = schema.validate(&values).await?;
    if violations.is_empty() {
        return Ok(Resolution {
            values: coerced,
            errors: ErrorMap::new(),
        });
    }

    let errors = collect_errors(&violations);
    debug!(
        fields = errors.len(),
        violations = violations.len(),
        "Form validation failed"
    );
    Ok(Resolution {
        values: FormValues::new(),
        errors,
    })
}

/// A schema bound once and resolved on every validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResolver {
    schema: Option<Arc<Schema>>,
}

impl ValidationResolver {
    pub fn new(schema: Option<Schema>) -> Self {
        Self {
            schema: schema.map(Arc::new),
        }
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    pub async fn resolve(&self, values: FormValues) -> Result<Resolution> {
        resolve(self.schema(), values).await
    }
}
