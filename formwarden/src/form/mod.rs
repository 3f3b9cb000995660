//! The per-form validation context
//!
//! A [`Form`] owns the registries, error sets and verification controller
//! of one bound form. Hosts feed it events; it re-checks, reconciles and
//! asks the host to render.

mod builder;
mod host;
mod registry;
mod report;

pub use builder::{FormBuilder, Missing, Set, SubmitHandler};
pub use host::{FormHost, MemoryHost};
pub use registry::FormRegistry;
pub use report::{FieldError, FieldReport, ValidationResult};

use std::sync::{Arc, RwLock};

use crate::aggregate::{Category, ErrorAggregator};
use crate::config::FormOptions;
use crate::error::{ConfigError, TransportError};
use crate::evaluator;
use crate::registry::{RuleCheck, RuleRegistry, VerificationCheck, VerificationRegistry};
use crate::verify::{PendingTracker, RequestId, Transport, VerificationController};
use crate::{FieldId, normalize_value};

/// A prepared form.
///
/// Cheap to clone (uses `Arc` internally); clones drive the same form.
/// Verification requests run as tokio tasks, so change events must be
/// delivered from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// let form = Form::builder()
///     .config(config)
///     .host(host)
///     .submit_handler(|form| send(form))
///     .build();
///
/// form.on_change("username", "ab");
/// let outcome = form.on_submit().await;
/// ```
#[derive(Clone)]
pub struct Form {
    inner: Arc<FormInner>,
}

struct FormInner {
    options: FormOptions,
    host: Arc<dyn FormHost>,
    transport: Arc<dyn Transport>,
    submit_handler: Option<SubmitHandler>,
    diagnostics: Vec<ConfigError>,
    tracker: PendingTracker,
    state: RwLock<FormState>,
}

pub(crate) struct FormState {
    pub rules: RuleRegistry,
    pub verifications: VerificationRegistry,
    pub errors: ErrorAggregator,
    pub controller: VerificationController,
}

impl Form {
    /// Creates a new builder for preparing a form.
    pub fn builder() -> FormBuilder<Missing> {
        FormBuilder::new()
    }

    // -------------------------------------------------------------------------
    // Host events
    // -------------------------------------------------------------------------

    /// Handles a value change: re-checks rules and restarts verifications.
    ///
    /// Ignored (returns `None`) when live checking is off or the field is
    /// not configured.
    pub fn on_change(&self, field: impl Into<FieldId>, value: &str) -> Option<FieldReport> {
        if !self.inner.options.onchange {
            return None;
        }
        let field = field.into();
        let value = normalize_value(value);

        let report = {
            let mut guard = self.inner.state.write().ok()?;
            let state = &mut *guard;
            if !state.rules.contains(&field) && !state.verifications.contains(&field) {
                return None;
            }
            evaluator::evaluate(&mut state.rules, &mut state.errors, &field, &value);
            self.restart_verifications(state, &field, &value);
            self.field_report_locked(state, &field)
        };

        self.inner.host.render_field(&report);
        Some(report)
    }

    /// Handles a keystroke or blur: re-checks rules only.
    pub fn on_interaction(&self, field: impl Into<FieldId>, value: &str) -> Option<FieldReport> {
        if !self.inner.options.onchange {
            return None;
        }
        self.check_field(field, value)
    }

    /// Re-checks a field's rules against `value` and renders it.
    ///
    /// Runs regardless of the `onchange` option. Returns `None` if the
    /// field has no rules.
    pub fn check_field(&self, field: impl Into<FieldId>, value: &str) -> Option<FieldReport> {
        let field = field.into();
        let value = normalize_value(value);

        let report = {
            let mut guard = self.inner.state.write().ok()?;
            let state = &mut *guard;
            evaluator::evaluate(&mut state.rules, &mut state.errors, &field, &value)?;
            self.field_report_locked(state, &field)
        };

        self.inner.host.render_field(&report);
        Some(report)
    }

    /// Handles a submit attempt. See [`SubmitOutcome`](crate::SubmitOutcome).
    pub async fn on_submit(&self) -> crate::SubmitOutcome {
        crate::gate::submit(self).await
    }

    /// Waits until no verification is debouncing or in flight.
    pub async fn settle(&self) {
        self.inner.tracker.wait_idle().await
    }

    /// Re-checks every rule-bearing field using the host's current values.
    ///
    /// Verifications are not re-triggered. Renders every re-checked field
    /// and the form result, and returns whether the form is valid now.
    pub fn validate_all(&self) -> bool {
        let values: Vec<(FieldId, String)> = self
            .rule_fields()
            .into_iter()
            .map(|field| {
                let value = normalize_value(&self.inner.host.value(&field).unwrap_or_default());
                (field, value)
            })
            .collect();

        let (reports, result) = {
            let Ok(mut guard) = self.inner.state.write() else {
                return false;
            };
            let state = &mut *guard;
            let mut reports = Vec::with_capacity(values.len());
            for (field, value) in &values {
                evaluator::evaluate(&mut state.rules, &mut state.errors, field, value);
                reports.push(self.field_report_locked(state, field));
            }
            (reports, Self::result_locked(state))
        };

        for report in &reports {
            self.inner.host.render_field(report);
        }
        self.inner.host.render_form(&result);
        result.is_valid()
    }

    /// Cancels all outstanding verifications and clears their in-flight flags.
    ///
    /// Called when the host unbinds the form.
    pub fn destroy(&self) {
        if let Ok(mut state) = self.inner.state.write() {
            state.controller.cancel_all();
            let fields = state.verifications.fields().to_vec();
            for field in &fields {
                if let Some(checks) = state.verifications.checks_mut(field) {
                    for check in checks.iter_mut() {
                        check.in_flight = false;
                    }
                }
            }
        }
        log::debug!("[form] destroyed");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns `true` if no field is failing in any category.
    pub fn is_valid(&self) -> bool {
        self.inner
            .state
            .read()
            .map(|s| s.errors.is_form_valid())
            .unwrap_or(false)
    }

    /// Failing fields of one category.
    pub fn errors(&self, category: Category) -> Vec<FieldId> {
        self.inner
            .state
            .read()
            .map(|s| s.errors.errors(category).to_vec())
            .unwrap_or_default()
    }

    /// Current render state of a field, or `None` if it is not configured.
    pub fn field_report(&self, field: impl Into<FieldId>) -> Option<FieldReport> {
        let field = field.into();
        let state = self.inner.state.read().ok()?;
        if !state.rules.contains(&field) && !state.verifications.contains(&field) {
            return None;
        }
        Some(self.field_report_locked(&state, &field))
    }

    /// Form-level result, failing fields in configuration order.
    pub fn result(&self) -> ValidationResult {
        self.inner
            .state
            .read()
            .map(|s| Self::result_locked(&s))
            .unwrap_or_default()
    }

    /// Snapshot of a field's rule checks.
    pub fn rule_checks(&self, field: impl Into<FieldId>) -> Vec<RuleCheck> {
        let field = field.into();
        self.inner
            .state
            .read()
            .ok()
            .and_then(|s| s.rules.checks(&field).map(<[RuleCheck]>::to_vec))
            .unwrap_or_default()
    }

    /// Snapshot of one verification check.
    pub fn verification(&self, field: impl Into<FieldId>, check: &str) -> Option<VerificationCheck> {
        let field = field.into();
        self.inner.state.read().ok()?.verifications.check(&field, check).cloned()
    }

    /// Fields with rules, in configuration order.
    pub fn rule_fields(&self) -> Vec<FieldId> {
        self.inner
            .state
            .read()
            .map(|s| s.rules.fields().to_vec())
            .unwrap_or_default()
    }

    /// Fields with verifications, in configuration order.
    pub fn verification_fields(&self) -> Vec<FieldId> {
        self.inner
            .state
            .read()
            .map(|s| s.verifications.fields().to_vec())
            .unwrap_or_default()
    }

    /// Number of verifications still debouncing or awaiting a response.
    pub fn pending(&self) -> usize {
        self.inner.tracker.count()
    }

    /// Configuration problems found while preparing the form.
    pub fn diagnostics(&self) -> &[ConfigError] {
        &self.inner.diagnostics
    }

    /// Options the form was prepared with.
    pub fn options(&self) -> &FormOptions {
        &self.inner.options
    }

    pub(crate) fn tracker(&self) -> &PendingTracker {
        &self.inner.tracker
    }

    pub(crate) fn submit_handler(&self) -> Option<&SubmitHandler> {
        self.inner.submit_handler.as_ref()
    }

    pub(crate) fn host(&self) -> &dyn FormHost {
        self.inner.host.as_ref()
    }

    // -------------------------------------------------------------------------
    // Verification
    // -------------------------------------------------------------------------

    fn restart_verifications(&self, state: &mut FormState, field: &FieldId, value: &str) {
        let names: Vec<String> = match state.verifications.checks(field) {
            Some(checks) => checks.iter().map(|c| c.name.clone()).collect(),
            None => return,
        };

        for name in &names {
            if value.is_empty() {
                state.controller.cancel(field, name);
                if let Some(check) = state.verifications.check_mut(field, name) {
                    check.valid = false;
                    check.in_flight = false;
                }
                continue;
            }

            let Some(url) = state.verifications.check(field, name).map(|c| c.url(value)) else {
                continue;
            };

            let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                log::error!("[verify] {}.{} changed outside a tokio runtime; not verified", field, name);
                state.controller.cancel(field, name);
                if let Some(check) = state.verifications.check_mut(field, name) {
                    check.valid = false;
                    check.in_flight = false;
                }
                continue;
            };

            let ticket = state.controller.start(field, name);
            if let Some(check) = state.verifications.check_mut(field, name) {
                check.in_flight = true;
            }

            let request = ticket.request;
            let form = self.clone();
            let field_owned = field.clone();
            let name_owned = name.clone();
            let debounce = self.inner.options.debounce;
            let transport = Arc::clone(&self.inner.transport);

            log::debug!("[verify] {}.{} request {:?} scheduled", field, name, request);
            let handle = runtime.spawn(async move {
                let result =
                    crate::verify::debounced_request(&ticket.cancel, debounce, transport.as_ref(), &url).await;
                if let Some(result) = result {
                    form.reconcile(&field_owned, &name_owned, request, result);
                }
            });
            state.controller.attach(field, name, request, handle);
        }

        if let Some(checks) = state.verifications.checks(field) {
            state.errors.record(field, Category::Verification, checks.iter());
        }
    }

    /// Applies a verification response, unless a newer request replaced it.
    fn reconcile(&self, field: &FieldId, check: &str, request: RequestId, result: Result<bool, TransportError>) {
        let report = {
            let Ok(mut guard) = self.inner.state.write() else {
                return;
            };
            let state = &mut *guard;
            // Dropped once the state below is updated, which wakes the submit gate.
            let Some(_slot) = state.controller.finish(field, check, request) else {
                log::debug!("[verify] {}.{} request {:?} discarded as stale", field, check, request);
                return;
            };

            let valid = match result {
                Ok(valid) => valid,
                Err(e) => {
                    log::warn!("[verify] {}.{} request failed: {}", field, check, e);
                    false
                }
            };
            log::debug!("[verify] {}.{} request {:?} reconciled, valid={}", field, check, request, valid);

            if let Some(entry) = state.verifications.check_mut(field, check) {
                entry.valid = valid;
                entry.in_flight = false;
            }

            if let Some(checks) = state.verifications.checks(field) {
                state.errors.record(field, Category::Verification, checks.iter());
            }
            if let Some(checks) = state.rules.checks(field) {
                state.errors.record(field, Category::Rules, checks.iter());
            }

            self.field_report_locked(state, field)
        };

        self.inner.host.render_field(&report);
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    fn field_report_locked(&self, state: &FormState, field: &FieldId) -> FieldReport {
        let valid = !state.errors.is_failing(field);
        let message = if valid {
            None
        } else {
            failing_message(state, field)
        };
        let in_flight = state
            .verifications
            .checks(field)
            .is_some_and(|checks| checks.iter().any(|c| c.in_flight));

        FieldReport {
            field: field.clone(),
            valid,
            message,
            in_flight,
            highlight: !valid && self.inner.options.highlight,
        }
    }

    fn result_locked(state: &FormState) -> ValidationResult {
        let verification_only = state
            .verifications
            .fields()
            .iter()
            .filter(|f| !state.rules.contains(f));

        let errors = state
            .rules
            .fields()
            .iter()
            .chain(verification_only)
            .filter(|f| state.errors.is_failing(f))
            .map(|f| FieldError {
                field: f.clone(),
                message: failing_message(state, f).unwrap_or_default(),
            })
            .collect();

        ValidationResult::from_errors(errors)
    }
}

/// First failing message of a field, looking only at categories it fails in.
fn failing_message(state: &FormState, field: &FieldId) -> Option<String> {
    let rules = state
        .errors
        .errors(Category::Rules)
        .contains(field)
        .then(|| state.rules.first_failing(field))
        .flatten();
    let verification = || {
        state
            .errors
            .errors(Category::Verification)
            .contains(field)
            .then(|| state.verifications.first_failing(field))
            .flatten()
    };
    rules.or_else(verification).map(str::to_string)
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("options", &self.inner.options)
            .field("diagnostics", &self.inner.diagnostics)
            .field("pending", &self.inner.tracker.count())
            .finish_non_exhaustive()
    }
}
