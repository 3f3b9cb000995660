//! Verification check entries

use crate::FieldId;
use crate::config::VerificationSpec;

use super::Check;

/// One configured (field, remote check) pair.
///
/// `valid` and `in_flight` are written by the verification controller and
/// may lag behind the field's current value while a request is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCheck {
    pub field: FieldId,
    pub name: String,
    pub message: String,
    pub endpoint: String,
    pub valid: bool,
    pub in_flight: bool,
}

impl VerificationCheck {
    pub fn new(field: FieldId, name: impl Into<String>, spec: &VerificationSpec) -> Self {
        Self {
            field,
            name: name.into(),
            message: spec.message.clone(),
            endpoint: spec.endpoint.clone(),
            valid: false,
            in_flight: false,
        }
    }

    /// Request URL for `value`: the endpoint followed by the encoded value.
    pub fn url(&self, value: &str) -> String {
        format!("{}{}", self.endpoint, urlencoding::encode(value))
    }
}

impl Check for VerificationCheck {
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
