//! Field identifiers, values and element kinds

use std::fmt;
use std::sync::Arc;

/// Stable identifier of a form field, unique within one form.
///
/// Cheap to clone; the string is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(Arc<str>);

impl FieldId {
    /// Creates a field id.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a raw field value before it is checked.
///
/// Carriage returns are dropped so multi-line values measure the same on
/// every platform.
pub fn normalize_value(raw: &str) -> String {
    raw.replace('\r', "")
}

/// What the host reports a field id resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// An `<input>` with its `type` attribute (`text`, `checkbox`, ...).
    Input(String),
    /// A `<select>` element.
    Select,
    /// A `<textarea>` element.
    Textarea,
    /// Anything else, by tag name.
    Other(String),
}

impl ElementKind {
    /// Returns `true` if the element can hold a form value.
    pub fn is_form_input(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns the name used in diagnostics: the input type for inputs,
    /// otherwise the tag name.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Input(kind) => kind,
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Other(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_carriage_returns() {
        assert_eq!(normalize_value("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_value("plain"), "plain");
    }

    #[test]
    fn test_element_kind_form_input() {
        assert!(ElementKind::Input("text".into()).is_form_input());
        assert!(ElementKind::Select.is_form_input());
        assert!(ElementKind::Textarea.is_form_input());
        assert!(!ElementKind::Other("div".into()).is_form_input());
        assert_eq!(ElementKind::Other("div".into()).type_name(), "div");
        assert_eq!(ElementKind::Input("email".into()).type_name(), "email");
    }

    #[test]
    fn test_field_id_equality() {
        assert_eq!(FieldId::from("email"), FieldId::new(String::from("email")));
        assert_eq!(FieldId::from("email").to_string(), "email");
    }
}
