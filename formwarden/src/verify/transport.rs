//! Remote verification transport seam

use async_trait::async_trait;

use crate::error::TransportError;

/// Performs the GET request behind a remote verification.
///
/// Implementations only fetch the body; the verdict is parsed by the
/// controller with [`parse_verdict`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `url` and returns the response body.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// Interprets a verification response body.
///
/// Accepts a JSON boolean or the JSON strings `"true"` / `"false"`.
pub fn parse_verdict(body: &str) -> Result<bool, TransportError> {
    match serde_json::from_str::<serde_json::Value>(body.trim()) {
        Ok(serde_json::Value::Bool(verdict)) => Ok(verdict),
        Ok(serde_json::Value::String(text)) if text == "true" => Ok(true),
        Ok(serde_json::Value::String(text)) if text == "false" => Ok(false),
        _ => Err(TransportError::verdict(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verdict() {
        assert!(parse_verdict("true").unwrap());
        assert!(!parse_verdict("false").unwrap());
        assert!(parse_verdict(" true\n").unwrap());
        assert!(parse_verdict("\"true\"").unwrap());
        assert!(!parse_verdict("\"false\"").unwrap());
    }

    #[test]
    fn test_parse_verdict_rejects_other_bodies() {
        for body in ["", "1", "yes", "\"TRUE\"", "{\"valid\": true}", "<html>"] {
            assert!(
                matches!(parse_verdict(body), Err(TransportError::Verdict { .. })),
                "{body:?} should be rejected"
            );
        }
    }
}
