//! Resource name rules
//!
//! Storage forms (bucket classes, backing and namespace stores, block pools,
//! storage classes, DR policies) share one set of Kubernetes-style name
//! requirements; only the length bounds and uniqueness scope differ.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::RwLock;

use crate::i18n::Translate;

use super::schema::{AsyncFieldTest, FieldSchema};

/// No leading or trailing period or hyphen
static STARTS_AND_ENDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-.a-z0-9]*[a-z0-9])?$").expect("static name pattern is valid")
});

/// Lowercase alphanumerics separated by single periods or hyphens
static ALLOWED_CHARACTERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+([-.]?[a-z0-9]+)*[-.]?$").expect("static name pattern is valid")
});

/// Names already in use, refreshed by whoever watches the resource list
#[derive(Debug, Clone, Default)]
pub struct LiveNames(Arc<RwLock<HashSet<String>>>);

impl LiveNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the known names with a fresh listing
    pub async fn replace<I>(&self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut guard = self.0.write().await;
        *guard = names.into_iter().collect();
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.0.read().await.contains(name)
    }
}

#[async_trait]
impl AsyncFieldTest for LiveNames {
    async fn test(&self, value: &str) -> anyhow::Result<bool> {
        Ok(!self.contains(value).await)
    }
}

#[derive(Debug, Clone)]
enum Uniqueness {
    None,
    Fixed(HashSet<String>),
    Live(LiveNames),
}

/// Length bounds and uniqueness scope of a resource name
#[derive(Debug, Clone)]
pub struct NameRules {
    min: Option<usize>,
    max: usize,
    uniqueness: Uniqueness,
    unique_message: String,
}

impl NameRules {
    pub fn new(max: usize) -> Self {
        Self {
            min: None,
            max,
            uniqueness: Uniqueness::None,
            unique_message: String::new(),
        }
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Reject names found in a fixed listing
    pub fn unique_among<I>(mut self, names: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.uniqueness = Uniqueness::Fixed(names.into_iter().collect());
        self.unique_message = message.into();
        self
    }

    /// Reject names currently present in a live listing
    pub fn unique_live(mut self, names: LiveNames, message: impl Into<String>) -> Self {
        self.uniqueness = Uniqueness::Live(names);
        self.unique_message = message.into();
        self
    }

    fn length_message(&self, t: &dyn Translate) -> String {
        match self.min {
            Some(min) => t
                .translate("{{min}}-{{max}} characters")
                .replace("{{min}}", &min.to_string())
                .replace("{{max}}", &self.max.to_string()),
            None => t
                .translate("No more than {{max}} characters")
                .replace("{{max}}", &self.max.to_string()),
        }
    }

    /// Requirement texts in the order the rules are checked
    pub fn requirements(&self, t: &dyn Translate) -> Vec<String> {
        let mut requirements = vec![
            self.length_message(t),
            t.translate("Starts and ends with a lowercase letter or number"),
            t.translate("Only lowercase letters, numbers, non-consecutive periods, or hyphens"),
        ];
        if !matches!(self.uniqueness, Uniqueness::None) {
            requirements.push(t.translate(&self.unique_message));
        }
        requirements
    }

    /// Field schema enforcing these rules; messages match [`Self::requirements`]
    pub fn field_schema(&self, t: &dyn Translate) -> FieldSchema {
        let requirements = self.requirements(t);
        let mut field = FieldSchema::string().required();

        if let Some(min) = self.min {
            field = field.min(min, requirements[0].clone());
        }
        field = field
            .max(self.max, requirements[0].clone())
            .matches_regex(STARTS_AND_ENDS.clone(), requirements[1].clone())
            .matches_regex(ALLOWED_CHARACTERS.clone(), requirements[2].clone());

        match &self.uniqueness {
            Uniqueness::None => field,
            Uniqueness::Fixed(names) => {
                let names = names.clone();
                field.test("unique-name", requirements[3].clone(), move |value| {
                    !names.contains(value)
                })
            }
            Uniqueness::Live(names) => {
                field.async_test("unique-name", requirements[3].clone(), names.clone())
            }
        }
    }
}
