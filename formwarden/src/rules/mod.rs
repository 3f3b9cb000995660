//! Synchronous rule kinds
//!
//! Rule names from the configuration resolve to a [`RuleKind`]: one of the
//! builtins or a [`Predicate`] registered in [`CustomRules`].

pub mod builtin;
mod predicate;

pub use predicate::{CustomRules, Predicate};

use std::fmt;
use std::sync::Arc;

use crate::FieldId;
use crate::config::RuleArg;
use crate::error::ConfigError;

/// A resolved synchronous rule.
#[derive(Clone)]
pub enum RuleKind {
    Required,
    Number,
    Email,
    NoSymbols,
    MinLength(usize),
    MaxLength(usize),
    RangeLength(usize, usize),
    /// A user-supplied predicate, called with the configured argument.
    Custom(Arc<dyn Predicate>),
}

/// Result of running one rule against a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub valid: bool,
    /// Replacement message, for rules that describe the value they saw.
    pub message: Option<String>,
}

impl RuleKind {
    /// Resolves a configured rule name and argument.
    ///
    /// Returns the rule and its initial failure message.
    pub fn resolve(
        field: &FieldId,
        name: &str,
        arg: &RuleArg,
        custom: &CustomRules,
    ) -> Result<(Self, String), ConfigError> {
        if let Some(predicate) = custom.get(name) {
            let message = arg.message().unwrap_or(name).to_string();
            return Ok((Self::Custom(predicate), message));
        }

        let kind = match name {
            "required" => Self::Required,
            "number" => Self::Number,
            "email" => Self::Email,
            "noSymbols" => Self::NoSymbols,
            "minLength" => Self::MinLength(bound(field, name, arg)?),
            "maxLength" => Self::MaxLength(bound(field, name, arg)?),
            "rangeLength" => {
                let (min, max) = range(field, name, arg)?;
                Self::RangeLength(min, max)
            }
            _ => return Err(ConfigError::unknown_rule(field.clone(), name)),
        };

        let message = match kind.outcome_message(0) {
            Some(generated) => generated,
            None => arg
                .message()
                .ok_or_else(|| ConfigError::invalid_argument(field.clone(), name, "a message"))?
                .to_string(),
        };

        Ok((kind, message))
    }

    /// Runs the rule.
    pub fn check(&self, value: &str, field: &FieldId, arg: &RuleArg) -> RuleOutcome {
        let valid = match self {
            Self::Required => builtin::required(value),
            Self::Number => builtin::number(value),
            Self::Email => builtin::email(value),
            Self::NoSymbols => builtin::no_symbols(value),
            Self::MinLength(min) => builtin::length(value) >= *min,
            Self::MaxLength(max) => builtin::length(value) <= *max,
            Self::RangeLength(min, max) => (*min..=*max).contains(&builtin::length(value)),
            Self::Custom(predicate) => predicate.check(value, field, arg),
        };

        RuleOutcome {
            valid,
            message: self.outcome_message(builtin::length(value)),
        }
    }

    fn outcome_message(&self, len: usize) -> Option<String> {
        match self {
            Self::MinLength(min) => Some(builtin::min_length_message(*min, len)),
            Self::MaxLength(max) => Some(builtin::max_length_message(*max, len)),
            Self::RangeLength(min, max) => Some(builtin::range_length_message(*min, *max, len)),
            _ => None,
        }
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Number => write!(f, "Number"),
            Self::Email => write!(f, "Email"),
            Self::NoSymbols => write!(f, "NoSymbols"),
            Self::MinLength(min) => write!(f, "MinLength({})", min),
            Self::MaxLength(max) => write!(f, "MaxLength({})", max),
            Self::RangeLength(min, max) => write!(f, "RangeLength({}, {})", min, max),
            Self::Custom(_) => write!(f, "Custom"),
        }
    }
}

fn bound(field: &FieldId, rule: &str, arg: &RuleArg) -> Result<usize, ConfigError> {
    match arg {
        RuleArg::Bound(n) => Ok(*n),
        RuleArg::Message(text) => text
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_argument(field.clone(), rule, "a length bound")),
        RuleArg::Range(_) => Err(ConfigError::invalid_argument(field.clone(), rule, "a length bound")),
    }
}

fn range(field: &FieldId, rule: &str, arg: &RuleArg) -> Result<(usize, usize), ConfigError> {
    match arg {
        RuleArg::Range([min, max]) if min <= max => Ok((*min, *max)),
        _ => Err(ConfigError::invalid_argument(field.clone(), rule, "[min, max] with min <= max")),
    }
}
