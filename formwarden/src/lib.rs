//! Form validation engine
//!
//! Tracks per-field and per-form validity for a declaratively configured
//! form. Synchronous rules run on every interaction, asynchronous remote
//! verifications are debounced, cancelled when superseded, and reconciled
//! back into the form once their response arrives. Submission is gated on
//! the aggregate result.
//!
//! The host UI layer owns element lookup and rendering; it talks to the
//! engine through [`FormHost`] and feeds it events through [`Form`].
//!
//! # Example
//!
//! ```ignore
//! use formwarden::{Form, FormConfig, SubmitOutcome};
//!
//! let config = FormConfig::from_json(r#"{
//!     "rules": { "email": { "required": "required", "email": "not an email" } },
//!     "verification": { "username": { "ajax": ["taken", "/check?u="] } }
//! }"#)?;
//!
//! let form = Form::builder().config(config).host(my_host).build();
//!
//! form.on_change("username", "ab");
//! match form.on_submit().await {
//!     SubmitOutcome::Proceed => { /* let the host submit */ }
//!     _ => {}
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod form;
pub mod gate;
pub mod registry;
pub mod rules;
pub mod verify;

mod field;

pub use aggregate::{Category, ErrorAggregator};
pub use config::{FormConfig, FormOptions};
pub use field::*;
pub use form::{FieldError, FieldReport, Form, FormBuilder, FormHost, FormRegistry, MemoryHost, ValidationResult};
pub use gate::SubmitOutcome;
pub use verify::{HttpTransport, Transport};
