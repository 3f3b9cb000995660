//! Bound form registry

use dashmap::DashMap;

use super::Form;

/// Keeps at most one [`Form`] per form id.
///
/// Binding an id that is already bound returns the existing form instead
/// of preparing a second one. Unbinding destroys the form, cancelling its
/// outstanding verifications.
#[derive(Debug, Default)]
pub struct FormRegistry {
    forms: DashMap<String, Form>,
}

impl FormRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            forms: DashMap::new(),
        }
    }

    /// Returns the form bound to `id`, preparing it with `prepare` if none is.
    pub fn bind<F>(&self, id: impl Into<String>, prepare: F) -> Form
    where
        F: FnOnce() -> Form,
    {
        self.forms.entry(id.into()).or_insert_with(prepare).value().clone()
    }

    /// Returns the form bound to `id`.
    pub fn get(&self, id: &str) -> Option<Form> {
        self.forms.get(id).map(|entry| entry.value().clone())
    }

    /// Destroys and forgets the form bound to `id`.
    ///
    /// Returns `false` if nothing was bound.
    pub fn unbind(&self, id: &str) -> bool {
        match self.forms.remove(id) {
            Some((_, form)) => {
                form.destroy();
                true
            }
            None => false,
        }
    }

    /// Returns the number of bound forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns `true` if no form is bound.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
