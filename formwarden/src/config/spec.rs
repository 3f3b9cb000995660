//! Per-rule and per-verification configuration values

use serde::Deserialize;

use crate::error::LoadError;

/// The value attached to a rule name.
///
/// Most rules take the failure message. Length rules take their bound(s)
/// instead and build the message themselves.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleArg {
    /// Failure message.
    Message(String),
    /// A single length bound.
    Bound(usize),
    /// Inclusive `[min, max]` length range.
    Range([usize; 2]),
}

impl RuleArg {
    /// Returns the message, if this argument is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<&str> for RuleArg {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl From<String> for RuleArg {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<usize> for RuleArg {
    fn from(bound: usize) -> Self {
        Self::Bound(bound)
    }
}

impl From<(usize, usize)> for RuleArg {
    fn from((min, max): (usize, usize)) -> Self {
        Self::Range([min, max])
    }
}

/// Configuration of one remote verification.
///
/// The request URL is `endpoint` followed by the encoded field value.
/// Accepts `{"message": .., "endpoint": ..}` or the compact
/// `[message, endpoint]` form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVerificationSpec")]
pub struct VerificationSpec {
    /// Failure message.
    pub message: String,
    /// URL prefix the value is appended to.
    pub endpoint: String,
}

impl VerificationSpec {
    /// Creates a verification spec.
    pub fn new(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVerificationSpec {
    Object {
        message: String,
        #[serde(alias = "url", alias = "endpointTemplate")]
        endpoint: String,
    },
    Pair(Vec<String>),
}

impl TryFrom<RawVerificationSpec> for VerificationSpec {
    type Error = LoadError;

    fn try_from(raw: RawVerificationSpec) -> Result<Self, Self::Error> {
        match raw {
            RawVerificationSpec::Object { message, endpoint } => Ok(Self { message, endpoint }),
            RawVerificationSpec::Pair(parts) => match <[String; 2]>::try_from(parts) {
                Ok([message, endpoint]) => Ok(Self { message, endpoint }),
                Err(parts) => Err(LoadError::VerificationShape { len: parts.len() }),
            },
        }
    }
}
