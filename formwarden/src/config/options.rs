//! Form behaviour options

use std::time::Duration;

use serde::Deserialize;
use serde::Deserializer;

/// Options controlling when checks run and how submission is handled.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use formwarden::FormOptions;
///
/// let options = FormOptions::default()
///     .with_debounce(Duration::from_millis(200))
///     .with_highlight(false);
/// assert!(options.onchange);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Re-check fields live on change and interaction events.
    ///
    /// Default: true
    pub onchange: bool,

    /// Intercept submission and gate it on validity.
    ///
    /// Default: true
    pub onsubmit: bool,

    /// Ask the host to highlight invalid fields.
    ///
    /// Default: true
    pub highlight: bool,

    /// Never actually submit. Checks still run and render.
    ///
    /// Default: false
    pub debug: bool,

    /// Quiet period before a verification request is issued.
    ///
    /// Default: 350 ms
    #[serde(rename = "debounceMs", deserialize_with = "millis")]
    pub debounce: Duration,

    /// Upper bound on how long submission waits for outstanding verifications.
    ///
    /// Default: 10 seconds
    #[serde(rename = "submitTimeoutMs", deserialize_with = "millis")]
    pub submit_timeout: Duration,

    /// Per-request timeout used by the HTTP transport.
    ///
    /// Default: none
    #[serde(rename = "requestTimeoutMs", deserialize_with = "opt_millis")]
    pub request_timeout: Option<Duration>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            onchange: true,
            onsubmit: true,
            highlight: true,
            debug: false,
            debounce: Duration::from_millis(350),
            submit_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl FormOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables live re-checks.
    pub fn with_onchange(mut self, enabled: bool) -> Self {
        self.onchange = enabled;
        self
    }

    /// Enables or disables submit interception.
    pub fn with_onsubmit(mut self, enabled: bool) -> Self {
        self.onsubmit = enabled;
        self
    }

    /// Enables or disables error highlighting.
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    /// Enables or disables debug mode.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Sets the verification debounce delay.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Sets the submit wait bound.
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submit_timeout = timeout;
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

fn opt_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    Option::<u64>::deserialize(deserializer).map(|ms| ms.map(Duration::from_millis))
}
