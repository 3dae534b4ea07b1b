//! Shared building blocks of the disaster-recovery resources
//!
//! Label selectors, object references and status conditions appear in
//! several resource kinds and are modelled once here.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Label Selector
// =============================================================================

/// Kubernetes-style label selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Match labels exactly
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,

    /// Match expressions
    #[serde(default)]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

/// A single label selector requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelectorRequirement {
    /// The label key to match
    pub key: String,

    /// The operator (In, NotIn, Exists, DoesNotExist)
    pub operator: LabelSelectorOperator,

    /// Values for In/NotIn operators
    #[serde(default)]
    pub values: Vec<String>,
}

/// Label selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LabelSelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl LabelSelector {
    /// Selector matching exactly the given labels
    pub fn from_labels<I, K, V>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            match_labels: labels
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            match_expressions: Vec::new(),
        }
    }
}

// =============================================================================
// Object Reference
// =============================================================================

/// Reference to another resource by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ObjectReference {
    /// Reference by bare name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Conditions
// =============================================================================

/// Status condition as reported by the DR operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition
    pub r#type: String,

    /// Status: True, False, or Unknown
    pub status: ConditionStatus,

    /// Last time the condition transitioned
    #[serde(default)]
    pub last_transition_time: Option<DateTime<Utc>>,

    /// Machine-readable reason
    #[serde(default)]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

impl Condition {
    pub fn new(r#type: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            r#type: r#type.into(),
            status,
            last_transition_time: None,
            reason: None,
            message: None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// Condition status values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_label_selector_decodes_expressions() {
        let selector: LabelSelector = serde_json::from_str(
            r#"{"matchLabels": {"app": "busybox"},
                "matchExpressions": [{"key": "env", "operator": "NotIn", "values": ["dev"]}]}"#,
        )
        .unwrap();
        assert_eq!(selector.match_labels, labels(&[("app", "busybox")]));
        assert_eq!(selector.match_expressions[0].operator, LabelSelectorOperator::NotIn);
        assert_eq!(selector.match_expressions[0].values, ["dev"]);

        let empty: LabelSelector = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LabelSelector::default());
    }

    #[test]
    fn test_condition_deserialize() {
        let condition: Condition = serde_json::from_str(
            r#"{"type": "Validated", "status": "True", "reason": "Succeeded"}"#,
        )
        .unwrap();
        assert!(condition.is_true());
        assert_eq!(condition.reason.as_deref(), Some("Succeeded"));
        assert!(condition.last_transition_time.is_none());
    }
}
