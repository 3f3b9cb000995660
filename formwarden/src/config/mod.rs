//! Declarative form configuration
//!
//! A [`FormConfig`] maps field ids to their rules and verifications, plus
//! the [`FormOptions`]. It can be built in code or read from the JSON
//! shape the host already uses:
//!
//! ```
//! use formwarden::FormConfig;
//!
//! let config = FormConfig::from_json(r#"{
//!     "rules": {
//!         "username": { "required": "username required", "minLength": 3 }
//!     },
//!     "verification": {
//!         "username": { "ajax": ["username taken", "/check?u="] }
//!     },
//!     "debug": true
//! }"#).unwrap();
//!
//! assert!(config.options.debug);
//! assert_eq!(config.rules.len(), 1);
//! ```

mod options;
mod ordered;
mod spec;

pub use options::FormOptions;
pub use ordered::OrderedMap;
pub use spec::{RuleArg, VerificationSpec};

use serde::Deserialize;

use crate::error::LoadError;

/// Rules, verifications and options for one form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Field id → rule name → rule argument.
    pub rules: OrderedMap<OrderedMap<RuleArg>>,

    /// Field id → check name → verification spec.
    pub verification: OrderedMap<OrderedMap<VerificationSpec>>,

    /// Behaviour options, flattened next to `rules` and `verification`.
    #[serde(flatten)]
    pub options: FormOptions,
}

impl FormConfig {
    /// Creates an empty configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a rule to a field.
    pub fn rule(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        arg: impl Into<RuleArg>,
    ) -> Self {
        self.rules.entry_or_default(field).insert(rule, arg.into());
        self
    }

    /// Adds a remote verification to a field.
    pub fn verification(
        mut self,
        field: impl Into<String>,
        check: impl Into<String>,
        message: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        self.verification
            .entry_or_default(field)
            .insert(check, VerificationSpec::new(message, endpoint));
        self
    }

    /// Replaces the options.
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }
}
