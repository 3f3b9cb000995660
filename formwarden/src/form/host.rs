//! Host binding seam

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{FieldReport, ValidationResult};
use crate::{ElementKind, FieldId};

/// The UI layer a form is bound to.
///
/// The engine never touches markup; it asks the host what a field id
/// resolves to, reads current values when it has to re-check everything,
/// and hands back reports to render.
pub trait FormHost: Send + Sync {
    /// Resolves a field id to an element, or `None` if nothing matches.
    fn element(&self, field: &FieldId) -> Option<ElementKind>;

    /// Current value of a field. Checked radio/checkbox groups report the
    /// checked value; nothing checked reads as `None`.
    fn value(&self, field: &FieldId) -> Option<String>;

    /// Renders one field's state.
    fn render_field(&self, report: &FieldReport);

    /// Renders the form-level state after a full re-check.
    fn render_form(&self, result: &ValidationResult) {
        let _ = result;
    }
}

/// A host that keeps elements, values and the last rendered reports in memory.
///
/// Useful for headless forms and tests. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    inner: Arc<RwLock<MemoryHostInner>>,
}

#[derive(Debug, Default)]
struct MemoryHostInner {
    elements: HashMap<FieldId, ElementKind>,
    values: HashMap<FieldId, String>,
    reports: HashMap<FieldId, FieldReport>,
    form: Option<ValidationResult>,
    renders: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element.
    pub fn with_element(self, field: impl Into<FieldId>, kind: ElementKind) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.elements.insert(field.into(), kind);
        }
        self
    }

    /// Adds a text input with an initial value.
    pub fn with_text(self, field: impl Into<FieldId>, value: impl Into<String>) -> Self {
        let field = field.into();
        self.set_value(field.clone(), value);
        self.with_element(field, ElementKind::Input("text".to_string()))
    }

    /// Sets a field's current value.
    pub fn set_value(&self, field: impl Into<FieldId>, value: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.values.insert(field.into(), value.into());
        }
    }

    /// Last report rendered for a field.
    pub fn report(&self, field: &FieldId) -> Option<FieldReport> {
        self.inner.read().ok()?.reports.get(field).cloned()
    }

    /// Last form-level result rendered.
    pub fn form_result(&self) -> Option<ValidationResult> {
        self.inner.read().ok()?.form.clone()
    }

    /// Number of field renders so far.
    pub fn render_count(&self) -> usize {
        self.inner.read().map(|g| g.renders).unwrap_or(0)
    }
}

impl FormHost for MemoryHost {
    fn element(&self, field: &FieldId) -> Option<ElementKind> {
        self.inner.read().ok()?.elements.get(field).cloned()
    }

    fn value(&self, field: &FieldId) -> Option<String> {
        self.inner.read().ok()?.values.get(field).cloned()
    }

    fn render_field(&self, report: &FieldReport) {
        if let Ok(mut inner) = self.inner.write() {
            inner.renders += 1;
            inner.reports.insert(report.field.clone(), report.clone());
        }
    }

    fn render_form(&self, result: &ValidationResult) {
        if let Ok(mut inner) = self.inner.write() {
            inner.form = Some(result.clone());
        }
    }
}
