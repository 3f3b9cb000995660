//! Asynchronous verification controller
//!
//! Every (field, check) pair runs its own small state machine:
//!
//! ```text
//! Idle ──change──▶ Debouncing ──quiet──▶ RequestInFlight ──response──▶ Reconciled
//!                      │                        │
//!                      └──────newer change──────┴──▶ Superseded
//! ```
//!
//! A newer change cancels the previous slot outright. Because an aborted
//! task may already be waiting to apply its result, reconciliation also
//! checks that its [`RequestId`] is still the current one for the slot;
//! stale results are dropped.

mod http;
mod pending;
mod transport;

pub use http::HttpTransport;
pub use pending::{PendingGuard, PendingTracker, PendingVerification, RequestId};
pub use transport::{Transport, parse_verdict};

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::FieldId;
use crate::error::TransportError;

type SlotKey = (FieldId, String);

/// What a freshly started request needs to run.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub request: RequestId,
    pub cancel: CancellationToken,
}

/// Tracks the live request slot of every (field, check) pair.
#[derive(Debug, Default)]
pub struct VerificationController {
    slots: HashMap<SlotKey, PendingVerification>,
    next_request: u64,
    tracker: PendingTracker,
}

impl VerificationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding-work counter shared with the submission gate.
    pub fn tracker(&self) -> &PendingTracker {
        &self.tracker
    }

    /// Supersedes the slot's current request, if any, and starts a new one.
    ///
    /// The new request is counted as outstanding before the old one is
    /// released, so the counter never reads zero in between. The slot owns
    /// the count, so a superseded request stops counting right away even
    /// if its task has not been dropped yet.
    pub fn start(&mut self, field: &FieldId, check: &str) -> Ticket {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        let guard = self.tracker.enter();
        let cancel = CancellationToken::new();

        let previous = self.slots.insert(
            (field.clone(), check.to_string()),
            PendingVerification {
                request,
                cancel: cancel.clone(),
                handle: None,
                _guard: guard,
            },
        );
        if let Some(previous) = previous {
            log::debug!("[verify] {}.{} request {:?} superseded", field, check, previous.request);
            previous.abort();
        }

        Ticket { request, cancel }
    }

    /// Stores the task running `request`, unless it was already superseded.
    pub fn attach(&mut self, field: &FieldId, check: &str, request: RequestId, handle: JoinHandle<()>) {
        match self.slot_mut(field, check) {
            Some(slot) if slot.request == request => slot.handle = Some(handle),
            _ => handle.abort(),
        }
    }

    /// Returns `true` if `request` is the slot's live request.
    pub fn is_current(&self, field: &FieldId, check: &str, request: RequestId) -> bool {
        self.slots
            .get(&(field.clone(), check.to_string()))
            .is_some_and(|slot| slot.request == request && !slot.cancel.is_cancelled())
    }

    /// Settles `request`, handing back its slot.
    ///
    /// The request keeps counting as outstanding until the returned slot is
    /// dropped. Returns `None` and leaves the slot alone if the request is stale.
    pub fn finish(&mut self, field: &FieldId, check: &str, request: RequestId) -> Option<PendingVerification> {
        if !self.is_current(field, check, request) {
            return None;
        }
        self.slots.remove(&(field.clone(), check.to_string()))
    }

    /// Cancels whatever the slot is doing. Returns `true` if anything was pending.
    pub fn cancel(&mut self, field: &FieldId, check: &str) -> bool {
        match self.slots.remove(&(field.clone(), check.to_string())) {
            Some(slot) => {
                log::debug!("[verify] {}.{} request {:?} cancelled", field, check, slot.request);
                slot.abort();
                true
            }
            None => false,
        }
    }

    /// Cancels every pending request of every field.
    pub fn cancel_all(&mut self) {
        for ((field, check), slot) in self.slots.drain() {
            log::debug!("[verify] {}.{} request {:?} cancelled", field, check, slot.request);
            slot.abort();
        }
    }

    /// Returns `true` if the slot has a debouncing or in-flight request.
    pub fn is_pending(&self, field: &FieldId, check: &str) -> bool {
        self.slots.contains_key(&(field.clone(), check.to_string()))
    }

    /// Number of live slots.
    pub fn pending(&self) -> usize {
        self.slots.len()
    }

    fn slot_mut(&mut self, field: &FieldId, check: &str) -> Option<&mut PendingVerification> {
        self.slots.get_mut(&(field.clone(), check.to_string()))
    }
}

impl Drop for VerificationController {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Waits out the debounce delay, then performs the request.
///
/// Returns `None` if `cancel` fires first: a superseded request produces
/// no result at all, not even an error.
pub async fn debounced_request(
    cancel: &CancellationToken,
    debounce: Duration,
    transport: &dyn Transport,
    url: &str,
) -> Option<Result<bool, TransportError>> {
    tokio::select! {
        _ = cancel.cancelled() => return None,
        _ = tokio::time::sleep(debounce) => {}
    }

    tokio::select! {
        _ = cancel.cancelled() => None,
        body = transport.get(url) => Some(body.and_then(|body| parse_verdict(&body))),
    }
}
