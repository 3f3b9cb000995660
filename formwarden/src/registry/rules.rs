//! Rule check entries

use crate::FieldId;
use crate::config::RuleArg;
use crate::rules::RuleKind;

use super::Check;

/// One configured (field, rule) pair and its latest result.
///
/// Starts invalid; only the evaluator changes it.
#[derive(Debug, Clone)]
pub struct RuleCheck {
    pub field: FieldId,
    pub name: String,
    pub kind: RuleKind,
    pub arg: RuleArg,
    pub message: String,
    pub valid: bool,
}

impl RuleCheck {
    pub fn new(field: FieldId, name: impl Into<String>, kind: RuleKind, arg: RuleArg, message: impl Into<String>) -> Self {
        Self {
            field,
            name: name.into(),
            kind,
            arg,
            message: message.into(),
            valid: false,
        }
    }
}

impl Check for RuleCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn message(&self) -> &str {
        &self.message
    }
}
