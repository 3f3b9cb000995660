//! Shared test fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use formwarden::error::TransportError;
use formwarden::Transport;

/// A transport answering from a script, after a per-URL delay.
///
/// Delays use tokio time, so paused-clock tests control exactly when each
/// response lands.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<ScriptInner>,
}

#[derive(Default)]
struct ScriptInner {
    responses: Mutex<HashMap<String, (Duration, Option<String>)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with `body` after `delay`.
    pub fn respond(self, url: &str, delay: Duration, body: &str) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(url.to_string(), (delay, Some(body.to_string())));
        self
    }

    /// Fails `url` with an HTTP 500 after `delay`.
    pub fn fail(self, url: &str, delay: Duration) -> Self {
        self.inner
            .responses
            .lock()
            .unwrap()
            .insert(url.to_string(), (delay, None));
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        self.inner.calls.lock().unwrap().push(url.to_string());
        let scripted = self.inner.responses.lock().unwrap().get(url).cloned();

        match scripted {
            Some((delay, body)) => {
                tokio::time::sleep(delay).await;
                body.ok_or_else(|| TransportError::http(500, "scripted failure"))
            }
            None => Err(TransportError::http(404, format!("no script for {url}"))),
        }
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
