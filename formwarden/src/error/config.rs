//! Configuration error types

use crate::FieldId;

/// A problem found while preparing a form from its configuration.
///
/// These are diagnostics, not fatal errors: the offending field entry is
/// dropped and the rest of the form is still prepared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The field id does not resolve to any element.
    #[error("Element with id '{field}' not found in form")]
    MissingElement { field: FieldId },

    /// The field id resolves to an element that cannot hold a value.
    #[error("Element with id '{field}' is a <{kind}> and not a valid form element")]
    NotFormInput { field: FieldId, kind: String },

    /// A rule name that is neither builtin nor registered as custom.
    #[error("Unknown rule '{rule}' on field '{field}'")]
    UnknownRule { field: FieldId, rule: String },

    /// A rule whose argument has the wrong shape (e.g. `minLength` without a bound).
    #[error("Rule '{rule}' on field '{field}' expects {expected}")]
    InvalidArgument {
        field: FieldId,
        rule: String,
        expected: &'static str,
    },
}

impl ConfigError {
    /// Creates a new missing element error.
    pub fn missing_element(field: impl Into<FieldId>) -> Self {
        Self::MissingElement {
            field: field.into(),
        }
    }

    /// Creates a new not-a-form-input error.
    pub fn not_form_input(field: impl Into<FieldId>, kind: impl Into<String>) -> Self {
        Self::NotFormInput {
            field: field.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new unknown rule error.
    pub fn unknown_rule(field: impl Into<FieldId>, rule: impl Into<String>) -> Self {
        Self::UnknownRule {
            field: field.into(),
            rule: rule.into(),
        }
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(field: impl Into<FieldId>, rule: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            rule: rule.into(),
            expected,
        }
    }

    /// Returns the field whose configuration was dropped.
    pub fn field(&self) -> &FieldId {
        match self {
            Self::MissingElement { field }
            | Self::NotFormInput { field, .. }
            | Self::UnknownRule { field, .. }
            | Self::InvalidArgument { field, .. } => field,
        }
    }

    /// Returns `true` if the whole field was dropped, verifications included.
    pub fn drops_element(&self) -> bool {
        matches!(self, Self::MissingElement { .. } | Self::NotFormInput { .. })
    }
}
