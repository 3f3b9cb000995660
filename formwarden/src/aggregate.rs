//! Error aggregation across check categories

use std::fmt;

use crate::FieldId;
use crate::registry::Check;

/// Independent families of checks, each with its own error set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Synchronous rules.
    Rules,
    /// Remote verifications.
    Verification,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Rules, Category::Verification];

    fn index(self) -> usize {
        match self {
            Self::Rules => 0,
            Self::Verification => 1,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules => f.write_str("rules"),
            Self::Verification => f.write_str("verification"),
        }
    }
}

/// Per-category sets of failing fields.
///
/// Membership only ever reflects the checks passed to the latest
/// [`record`](Self::record) call for that field and category. Sets keep
/// first-failure order so the host can focus the earliest broken field.
#[derive(Debug, Clone, Default)]
pub struct ErrorAggregator {
    sets: [Vec<FieldId>; 2],
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes a field's membership in one category from its checks.
    ///
    /// Returns `true` if the field is now failing in that category.
    pub fn record<'a, C, I>(&mut self, field: &FieldId, category: Category, checks: I) -> bool
    where
        C: Check + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let failing = checks.into_iter().any(|check| !check.is_valid());
        if failing {
            self.add(field, category);
        } else {
            self.remove(field, category);
        }
        failing
    }

    /// Adds a field to a category's set. No-op if already present.
    pub fn add(&mut self, field: &FieldId, category: Category) {
        let set = &mut self.sets[category.index()];
        if !set.contains(field) {
            set.push(field.clone());
        }
    }

    /// Removes a field from a category's set, wherever it sits. No-op if absent.
    pub fn remove(&mut self, field: &FieldId, category: Category) {
        let set = &mut self.sets[category.index()];
        if let Some(index) = set.iter().position(|f| f == field) {
            set.remove(index);
        }
    }

    /// Removes a field from every category.
    pub fn clear_field(&mut self, field: &FieldId) {
        for category in Category::ALL {
            self.remove(field, category);
        }
    }

    /// Empties every category.
    pub fn clear(&mut self) {
        for set in &mut self.sets {
            set.clear();
        }
    }

    /// Failing fields of one category.
    pub fn errors(&self, category: Category) -> &[FieldId] {
        &self.sets[category.index()]
    }

    /// Returns `true` if the field fails in any category.
    pub fn is_failing(&self, field: &FieldId) -> bool {
        self.sets.iter().any(|set| set.contains(field))
    }

    /// Returns `true` if no category has a failing field.
    pub fn is_form_valid(&self) -> bool {
        self.sets.iter().all(Vec::is_empty)
    }
}
