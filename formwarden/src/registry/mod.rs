//! Per-field check registries
//!
//! Both registries share one shape: an ordered list of configured fields,
//! each owning its checks in declaration order. Entries are created when
//! the form is prepared and live as long as the form.

mod rules;
mod verification;

pub use rules::RuleCheck;
pub use verification::VerificationCheck;

use std::collections::HashMap;

use crate::FieldId;

/// Common view of a rule or verification check.
pub trait Check {
    /// Name the check was configured under.
    fn name(&self) -> &str;

    /// Whether the latest evaluation passed.
    fn is_valid(&self) -> bool;

    /// Message to show while the check fails.
    fn message(&self) -> &str;
}

/// Holds the synchronous rule checks of every configured field.
pub type RuleRegistry = Registry<RuleCheck>;

/// Holds the remote verification checks of every configured field.
pub type VerificationRegistry = Registry<VerificationCheck>;

/// Ordered field → checks storage.
#[derive(Debug, Clone)]
pub struct Registry<C> {
    order: Vec<FieldId>,
    entries: HashMap<FieldId, Vec<C>>,
}

impl<C: Check> Registry<C> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Registers the checks for a field, replacing any previous entry.
    pub fn insert(&mut self, field: FieldId, checks: Vec<C>) {
        if !self.entries.contains_key(&field) {
            self.order.push(field.clone());
        }
        self.entries.insert(field, checks);
    }

    /// Drops a field and its checks.
    pub fn remove(&mut self, field: &FieldId) -> Option<Vec<C>> {
        self.order.retain(|f| f != field);
        self.entries.remove(field)
    }

    /// Returns the checks of a field, in declaration order.
    pub fn checks(&self, field: &FieldId) -> Option<&[C]> {
        self.entries.get(field).map(Vec::as_slice)
    }

    /// Returns the checks of a field for mutation.
    pub fn checks_mut(&mut self, field: &FieldId) -> Option<&mut [C]> {
        self.entries.get_mut(field).map(Vec::as_mut_slice)
    }

    /// Returns one named check of a field.
    pub fn check(&self, field: &FieldId, name: &str) -> Option<&C> {
        self.checks(field)?.iter().find(|c| c.name() == name)
    }

    /// Returns one named check of a field for mutation.
    pub fn check_mut(&mut self, field: &FieldId, name: &str) -> Option<&mut C> {
        self.entries.get_mut(field)?.iter_mut().find(|c| c.name() == name)
    }

    pub fn contains(&self, field: &FieldId) -> bool {
        self.entries.contains_key(field)
    }

    /// Configured fields, in configuration order.
    pub fn fields(&self) -> &[FieldId] {
        &self.order
    }

    /// Message of the first failing check, if any.
    pub fn first_failing(&self, field: &FieldId) -> Option<&str> {
        self.checks(field)?
            .iter()
            .find(|c| !c.is_valid())
            .map(|c| c.message())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<C: Check> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}
