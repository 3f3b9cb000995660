//! User-supplied rule predicates

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::FieldId;
use crate::config::RuleArg;

/// A custom synchronous rule.
///
/// Receives the normalized value, the field it belongs to, and the argument
/// configured for the rule. Implemented for any matching closure.
///
/// # Example
///
/// ```
/// use formwarden::rules::CustomRules;
///
/// let mut custom = CustomRules::new();
/// custom.register_fn("postcode", |value, _, _| {
///     value.len() == 4 && value.chars().all(|c| c.is_ascii_digit())
/// });
/// assert!(custom.contains("postcode"));
/// ```
pub trait Predicate: Send + Sync {
    /// Returns `true` if `value` passes.
    fn check(&self, value: &str, field: &FieldId, arg: &RuleArg) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&str, &FieldId, &RuleArg) -> bool + Send + Sync,
{
    fn check(&self, value: &str, field: &FieldId, arg: &RuleArg) -> bool {
        self(value, field, arg)
    }
}

/// Named custom predicates available to a form's configuration.
#[derive(Clone, Default)]
pub struct CustomRules {
    predicates: HashMap<String, Arc<dyn Predicate>>,
}

impl CustomRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a predicate under `name`, replacing any previous one.
    ///
    /// A custom rule registered under a builtin name takes precedence over
    /// the builtin.
    pub fn register<P: Predicate + 'static>(&mut self, name: impl Into<String>, predicate: P) {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Registers a closure under `name`.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&str, &FieldId, &RuleArg) -> bool + Send + Sync + 'static,
    {
        self.register(name, f);
    }

    /// Returns the predicate registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Predicate>> {
        self.predicates.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }
}

impl fmt::Debug for CustomRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.predicates.keys().collect();
        names.sort();
        f.debug_struct("CustomRules").field("names", &names).finish()
    }
}
