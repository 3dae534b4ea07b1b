//! Field requirement indicators
//!
//! A text input lists its requirements next to the field and marks each
//! one as met or unmet from the field's [`FieldError`].

use serde::Serialize;

use super::resolver::FieldError;

/// Indicator for one listed requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementStatus {
    /// Field untouched so far
    Indeterminate,
    Error,
    Success,
}

/// Indicator for the field as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    Default,
    Error,
    Success,
}

/// Status of each requirement, in the order given
pub fn requirement_states(
    requirements: &[String],
    is_dirty: bool,
    error: Option<&FieldError>,
) -> Vec<(String, RequirementStatus)> {
    requirements
        .iter()
        .map(|requirement| {
            let status = if !is_dirty {
                RequirementStatus::Indeterminate
            } else if error.is_some_and(|e| e.has_message(requirement)) {
                RequirementStatus::Error
            } else {
                RequirementStatus::Success
            };
            (requirement.clone(), status)
        })
        .collect()
}

pub fn field_status(is_dirty: bool, error: Option<&FieldError>) -> FieldStatus {
    match (is_dirty, error) {
        (false, _) => FieldStatus::Default,
        (true, Some(_)) => FieldStatus::Error,
        (true, None) => FieldStatus::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::resolver::collect_errors;
    use crate::validation::Violation;

    fn requirements() -> Vec<String> {
        vec!["No more than 43 characters".to_string(), "Globally unique name".to_string()]
    }

    fn unique_error() -> FieldError {
        collect_errors(&[Violation {
            path: "name".to_string(),
            kind: Some("unique-name".to_string()),
            message: "Globally unique name".to_string(),
        }])
        .remove("name")
        .unwrap()
    }

    #[test]
    fn test_pristine_field_is_indeterminate() {
        let error = unique_error();
        let states = requirement_states(&requirements(), false, Some(&error));
        assert!(states.iter().all(|(_, s)| *s == RequirementStatus::Indeterminate));
        assert_eq!(field_status(false, Some(&error)), FieldStatus::Default);
    }

    #[test]
    fn test_dirty_field_marks_unmet_requirements() {
        let error = unique_error();
        let states = requirement_states(&requirements(), true, Some(&error));
        assert_eq!(states[0].1, RequirementStatus::Success);
        assert_eq!(states[1].1, RequirementStatus::Error);
        assert_eq!(field_status(true, Some(&error)), FieldStatus::Error);
    }

    #[test]
    fn test_dirty_field_without_error_succeeds() {
        let states = requirement_states(&requirements(), true, None);
        assert!(states.iter().all(|(_, s)| *s == RequirementStatus::Success));
        assert_eq!(field_status(true, None), FieldStatus::Success);
    }
}
