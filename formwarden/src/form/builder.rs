//! Form preparation

use std::sync::{Arc, RwLock};

use super::{Form, FormHost, FormInner, FormState};
use crate::aggregate::ErrorAggregator;
use crate::config::{FormConfig, FormOptions, RuleArg};
use crate::error::ConfigError;
use crate::registry::{RuleCheck, RuleRegistry, VerificationCheck, VerificationRegistry};
use crate::rules::{CustomRules, Predicate, RuleKind};
use crate::verify::{HttpTransport, Transport, VerificationController};
use crate::FieldId;

/// Callback invoked instead of the host's default submission.
pub type SubmitHandler = Arc<dyn Fn(&Form) + Send + Sync>;

/// Marker type for a missing required builder field.
pub struct Missing;

/// Marker type for a set builder field.
pub struct Set<T>(T);

/// Builder for preparing a [`Form`].
///
/// Uses the typestate pattern so a form cannot be built without a host.
///
/// # Example
///
/// ```ignore
/// let form = Form::builder()
///     .config(FormConfig::from_json(json)?)
///     .host(host)
///     .transport(HttpTransport::new().with_base_url("https://example.com"))
///     .custom_rule_fn("postcode", |v, _, _| v.len() == 4)
///     .submit_handler(|form| println!("submitting {:?}", form.result()))
///     .build();
/// ```
pub struct FormBuilder<H> {
    host: H,
    config: FormConfig,
    transport: Option<Arc<dyn Transport>>,
    custom: CustomRules,
    submit_handler: Option<SubmitHandler>,
}

impl FormBuilder<Missing> {
    /// Creates a new builder with an empty configuration.
    pub fn new() -> Self {
        Self {
            host: Missing,
            config: FormConfig::default(),
            transport: None,
            custom: CustomRules::new(),
            submit_handler: None,
        }
    }

    /// Sets the host the form is bound to.
    pub fn host<T: FormHost + 'static>(self, host: T) -> FormBuilder<Set<Arc<dyn FormHost>>> {
        self.shared_host(Arc::new(host))
    }

    /// Sets a host that is already shared.
    pub fn shared_host(self, host: Arc<dyn FormHost>) -> FormBuilder<Set<Arc<dyn FormHost>>> {
        FormBuilder {
            host: Set(host),
            config: self.config,
            transport: self.transport,
            custom: self.custom,
            submit_handler: self.submit_handler,
        }
    }
}

impl Default for FormBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FormBuilder<H> {
    /// Sets the rules, verifications and options.
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces just the options.
    pub fn options(mut self, options: FormOptions) -> Self {
        self.config.options = options;
        self
    }

    /// Sets the verification transport.
    ///
    /// Defaults to an [`HttpTransport`] using the configured request timeout.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets a transport that is already shared.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Registers a custom rule usable by name in the configuration.
    pub fn custom_rule<P: Predicate + 'static>(mut self, name: impl Into<String>, predicate: P) -> Self {
        self.custom.register(name, predicate);
        self
    }

    /// Registers a closure as a custom rule.
    pub fn custom_rule_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &FieldId, &RuleArg) -> bool + Send + Sync + 'static,
    {
        self.custom.register_fn(name, f);
        self
    }

    /// Takes over submission: the host's default submit is always
    /// prevented and `handler` runs once the form is valid.
    pub fn submit_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Form) + Send + Sync + 'static,
    {
        self.submit_handler = Some(Arc::new(handler));
        self
    }
}

impl FormBuilder<Set<Arc<dyn FormHost>>> {
    /// Prepares the form.
    ///
    /// Configuration problems never fail the build: each offending field
    /// entry is dropped, logged, and kept in [`Form::diagnostics`].
    pub fn build(self) -> Form {
        let host = self.host.0;
        let options = self.config.options.clone();
        let transport = self.transport.unwrap_or_else(|| {
            let mut http = HttpTransport::new();
            if let Some(timeout) = options.request_timeout {
                http = http.with_timeout(timeout);
            }
            Arc::new(http)
        });

        let prepared = prepare(&self.config, host.as_ref(), &self.custom);
        for diagnostic in &prepared.diagnostics {
            log::error!("[form] {}; entry dropped", diagnostic);
        }
        log::debug!(
            "[form] prepared {} rule field(s), {} verification field(s)",
            prepared.rules.len(),
            prepared.verifications.len()
        );

        let controller = VerificationController::new();
        let tracker = controller.tracker().clone();

        Form {
            inner: Arc::new(FormInner {
                options,
                host,
                transport,
                submit_handler: self.submit_handler,
                diagnostics: prepared.diagnostics,
                tracker,
                state: RwLock::new(FormState {
                    rules: prepared.rules,
                    verifications: prepared.verifications,
                    errors: ErrorAggregator::new(),
                    controller,
                }),
            }),
        }
    }
}

struct Prepared {
    rules: RuleRegistry,
    verifications: VerificationRegistry,
    diagnostics: Vec<ConfigError>,
}

fn prepare(config: &FormConfig, host: &dyn FormHost, custom: &CustomRules) -> Prepared {
    let mut prepared = Prepared {
        rules: RuleRegistry::new(),
        verifications: VerificationRegistry::new(),
        diagnostics: Vec::new(),
    };
    let mut rejected: Vec<FieldId> = Vec::new();

    for (id, rules) in config.rules.iter() {
        let field = FieldId::from(id);
        if let Err(e) = check_element(host, &field) {
            rejected.push(field);
            prepared.diagnostics.push(e);
            continue;
        }

        let checks: Result<Vec<RuleCheck>, ConfigError> = rules
            .iter()
            .map(|(name, arg)| -> Result<RuleCheck, ConfigError> {
                let (kind, message) = RuleKind::resolve(&field, name, arg, custom)?;
                Ok(RuleCheck::new(field.clone(), name, kind, arg.clone(), message))
            })
            .collect();

        match checks {
            Ok(checks) => prepared.rules.insert(field, checks),
            Err(e) => prepared.diagnostics.push(e),
        }
    }

    for (id, verifications) in config.verification.iter() {
        let field = FieldId::from(id);
        if rejected.contains(&field) {
            continue;
        }
        if let Err(e) = check_element(host, &field) {
            prepared.diagnostics.push(e);
            continue;
        }

        let checks = verifications
            .iter()
            .map(|(name, spec)| VerificationCheck::new(field.clone(), name, spec))
            .collect();
        prepared.verifications.insert(field, checks);
    }

    prepared
}

fn check_element(host: &dyn FormHost, field: &FieldId) -> Result<(), ConfigError> {
    match host.element(field) {
        None => Err(ConfigError::missing_element(field.clone())),
        Some(kind) if !kind.is_form_input() => Err(ConfigError::not_form_input(field.clone(), kind.type_name())),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;
    use crate::form::MemoryHost;

    fn host() -> MemoryHost {
        MemoryHost::new()
            .with_text("email", "")
            .with_text("name", "")
            .with_element("banner", ElementKind::Other("div".into()))
    }

    #[test]
    fn test_prepare_registers_rules_in_order() {
        let config = FormConfig::new()
            .rule("name", "required", "name required")
            .rule("email", "required", "email required")
            .rule("email", "email", "not an email");

        let prepared = prepare(&config, &host(), &CustomRules::new());

        assert!(prepared.diagnostics.is_empty());
        assert_eq!(prepared.rules.fields(), &[FieldId::from("name"), FieldId::from("email")]);
        let names: Vec<_> = prepared.rules.checks(&"email".into()).unwrap().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["required", "email"]);
        assert!(prepared.rules.checks(&"email".into()).unwrap().iter().all(|c| !c.valid));
    }

    #[test]
    fn test_prepare_drops_unknown_rule_field() {
        let config = FormConfig::new()
            .rule("name", "regex9000", "??")
            .rule("email", "required", "required");

        let prepared = prepare(&config, &host(), &CustomRules::new());

        assert_eq!(prepared.diagnostics, vec![ConfigError::unknown_rule("name", "regex9000")]);
        assert!(!prepared.rules.contains(&"name".into()));
        assert!(prepared.rules.contains(&"email".into()));
    }

    #[test]
    fn test_prepare_rejects_non_inputs_and_missing_elements() {
        let config = FormConfig::new()
            .rule("banner", "required", "required")
            .rule("ghost", "required", "required")
            .verification("banner", "ajax", "taken", "/check?u=");

        let prepared = prepare(&config, &host(), &CustomRules::new());

        assert_eq!(
            prepared.diagnostics,
            vec![
                ConfigError::not_form_input("banner", "div"),
                ConfigError::missing_element("ghost"),
            ]
        );
        assert!(prepared.rules.is_empty());
        assert!(prepared.verifications.is_empty());
        assert!(prepared.diagnostics.iter().all(ConfigError::drops_element));
    }

    #[test]
    fn test_rule_error_keeps_verification() {
        let config = FormConfig::new()
            .rule("name", "regex9000", "??")
            .verification("name", "ajax", "taken", "/check?u=");

        let prepared = prepare(&config, &host(), &CustomRules::new());

        assert_eq!(prepared.diagnostics.len(), 1);
        assert!(prepared.verifications.contains(&"name".into()));
    }
}
