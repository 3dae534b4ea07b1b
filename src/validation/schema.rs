//! Declarative field schema
//!
//! A [`Schema`] maps field names to an ordered list of [`Rule`]s. Every rule
//! of every field is evaluated on each pass; nothing short-circuits.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;
use regex::Regex;

use crate::error::{Error, Result};

/// Raw form input, keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Predicate whose answer may depend on data loaded asynchronously,
/// such as the names already taken in a live list
#[async_trait]
pub trait AsyncFieldTest: Send + Sync {
    /// `Ok(true)` when the value passes. An `Err` is not a validation
    /// failure; it aborts the whole pass.
    async fn test(&self, value: &str) -> anyhow::Result<bool>;
}

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single constraint on a field
#[derive(Clone)]
pub enum Rule {
    Required {
        message: Option<String>,
    },
    /// Minimum length in characters
    Min {
        len: usize,
        message: Option<String>,
    },
    /// Maximum length in characters
    Max {
        len: usize,
        message: Option<String>,
    },
    Matches {
        pattern: Regex,
        message: Option<String>,
    },
    Test {
        name: Option<String>,
        message: String,
        predicate: Predicate,
    },
    AsyncTest {
        name: Option<String>,
        message: String,
        test: Arc<dyn AsyncFieldTest>,
    },
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { .. } => write!(f, "Required"),
            Rule::Min { len, .. } => write!(f, "Min({})", len),
            Rule::Max { len, .. } => write!(f, "Max({})", len),
            Rule::Matches { pattern, .. } => write!(f, "Matches({})", pattern.as_str()),
            Rule::Test { name, .. } => write!(f, "Test({:?})", name),
            Rule::AsyncTest { name, .. } => write!(f, "AsyncTest({:?})", name),
        }
    }
}

impl Rule {
    /// Classification reported with a violation; `None` for unnamed tests
    pub fn kind(&self) -> Option<&str> {
        match self {
            Rule::Required { .. } => Some("required"),
            Rule::Min { .. } => Some("min"),
            Rule::Max { .. } => Some("max"),
            Rule::Matches { .. } => Some("matches"),
            Rule::Test { name, .. } | Rule::AsyncTest { name, .. } => name.as_deref(),
        }
    }

    fn message(&self, path: &str) -> String {
        match self {
            Rule::Required { message } => message
                .clone()
                .unwrap_or_else(|| format!("{} is a required field", path)),
            Rule::Min { len, message } => message
                .clone()
                .unwrap_or_else(|| format!("{} must be at least {} characters", path, len)),
            Rule::Max { len, message } => message
                .clone()
                .unwrap_or_else(|| format!("{} must be at most {} characters", path, len)),
            Rule::Matches { pattern, message } => message.clone().unwrap_or_else(|| {
                format!("{} must match the following: \"{}\"", path, pattern.as_str())
            }),
            Rule::Test { message, .. } | Rule::AsyncTest { message, .. } => message.clone(),
        }
    }

    /// Whether `value` satisfies the rule. Absent values only fail `Required`.
    async fn passes(&self, path: &str, value: Option<&str>) -> Result<bool> {
        let Some(value) = value else {
            return Ok(!matches!(self, Rule::Required { .. }));
        };

        let passed = match self {
            Rule::Required { .. } => !value.is_empty(),
            Rule::Min { len, .. } => value.chars().count() >= *len,
            Rule::Max { len, .. } => value.chars().count() <= *len,
            Rule::Matches { pattern, .. } => pattern.is_match(value),
            Rule::Test { predicate, .. } => predicate(value),
            Rule::AsyncTest { name, test, .. } => {
                test.test(value).await.map_err(|e| Error::ValidationTest {
                    field: path.to_string(),
                    test: name.clone().unwrap_or_else(|| "validation".to_string()),
                    reason: e.to_string(),
                })?
            }
        };
        Ok(passed)
    }
}

/// One failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: Option<String>,
    pub message: String,
}

// =============================================================================
// Field schema
// =============================================================================

/// Rules for a single string field, built in declaration order
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    trim: bool,
    rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn string() -> Self {
        Self::default()
    }

    /// Trim surrounding whitespace before validating and in the returned values
    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required { message: None })
    }

    pub fn required_with(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required {
            message: Some(message.into()),
        })
    }

    pub fn min(self, len: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::Min {
            len,
            message: Some(message.into()),
        })
    }

    pub fn max(self, len: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::Max {
            len,
            message: Some(message.into()),
        })
    }

    /// Add a pattern rule, compiling `pattern`
    pub fn matches(self, pattern: &str, message: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.matches_regex(pattern, message))
    }

    pub fn matches_regex(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.rule(Rule::Matches {
            pattern,
            message: Some(message.into()),
        })
    }

    pub fn test<F>(self, name: &str, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::Test {
            name: Some(name.to_string()),
            message: message.into(),
            predicate: Arc::new(predicate),
        })
    }

    pub fn async_test<T>(self, name: &str, message: impl Into<String>, test: T) -> Self
    where
        T: AsyncFieldTest + 'static,
    {
        self.rule(Rule::AsyncTest {
            name: Some(name.to_string()),
            message: message.into(),
            test: Arc::new(test),
        })
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn coerce(&self, value: &str) -> String {
        if self.trim {
            value.trim().to_string()
        } else {
            value.to_string()
        }
    }

    async fn violations(&self, path: &str, value: Option<&str>) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            if !rule.passes(path, value).await? {
                violations.push(Violation {
                    path: path.to_string(),
                    kind: rule.kind().map(str::to_string),
                    message: rule.message(path),
                });
            }
        }
        Ok(violations)
    }
}

// =============================================================================
// Object schema
// =============================================================================

/// Field schemas keyed by field name
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schema for `name`
    pub fn field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = field,
            None => self.fields.push((name, field)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Coerce `values` and collect every violation, in field then rule order.
    ///
    /// Values of fields without a schema pass through untouched.
    pub async fn validate(&self, values: &FormValues) -> Result<(FormValues, Vec<Violation>)> {
        let mut coerced = values.clone();
        for (name, field) in &self.fields {
            if let Some(value) = values.get(name) {
                coerced.insert(name.clone(), field.coerce(value));
            }
        }

        let checks = self
            .fields
            .iter()
            .map(|(name, field)| field.violations(name, coerced.get(name).map(String::as_str)));
        let violations = try_join_all(checks).await?.into_iter().flatten().collect();

        Ok((coerced, violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_all_rules_run() {
        let schema = Schema::new().field(
            "name",
            FieldSchema::string()
                .required()
                .max(3, "too long")
                .matches("^[a-z]+$", "lowercase only")
                .unwrap(),
        );

        let (_, violations) = schema.validate(&values(&[("name", "ABCD")])).await.unwrap();
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, ["too long", "lowercase only"]);
    }

    #[tokio::test]
    async fn test_absent_value_only_fails_required() {
        let schema = Schema::new()
            .field("name", FieldSchema::string().required().max(3, "too long"))
            .field("description", FieldSchema::string().max(3, "too long"));

        let (_, violations) = schema.validate(&FormValues::new()).await.unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "name");
        assert_eq!(violations[0].kind.as_deref(), Some("required"));
        assert_eq!(violations[0].message, "name is a required field");
    }

    #[tokio::test]
    async fn test_trim_coerces_values() {
        let schema = Schema::new().field("name", FieldSchema::string().trim().max(2, "too long"));
        let (coerced, violations) = schema
            .validate(&values(&[("name", "  ok  "), ("other", " x ")]))
            .await
            .unwrap();

        assert!(violations.is_empty());
        assert_eq!(coerced["name"], "ok");
        assert_eq!(coerced["other"], " x ");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FieldSchema::string().matches("([a-z", "broken").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_rule_kinds() {
        let field = FieldSchema::string()
            .required()
            .min(3, "short")
            .test("unique-name", "taken", |_| true)
            .rule(Rule::Test {
                name: None,
                message: "custom".to_string(),
                predicate: Arc::new(|_: &str| true),
            });

        let kinds: Vec<Option<&str>> = field.rules().iter().map(Rule::kind).collect();
        assert_eq!(kinds, [Some("required"), Some("min"), Some("unique-name"), None]);
    }

    #[test]
    fn test_field_replaces_existing() {
        let schema = Schema::new()
            .field("name", FieldSchema::string().required())
            .field("name", FieldSchema::string());
        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let field = FieldSchema::string().max(3, "too long");
        let passed = tokio_test::block_on(field.rules()[0].passes("name", Some("äöü"))).unwrap();
        assert!(passed);
    }
}
