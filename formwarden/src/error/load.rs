//! Configuration loading error types

/// Errors that can occur while reading a form configuration document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A verification entry given in array form has the wrong length.
    #[error("Verification must be [message, endpoint], got {len} elements")]
    VerificationShape { len: usize },
}
