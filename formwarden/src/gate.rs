//! Submission gate

use crate::form::Form;

/// What the host should do with a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Let the host's default submission go ahead.
    Proceed,
    /// The submit handler ran; default submission must be prevented.
    Submitted,
    /// The form is invalid, or verifications did not settle in time;
    /// prevent submission and leave the rendered errors visible.
    Blocked,
    /// Debug mode: checks ran but submission is always prevented.
    Suppressed,
}

impl SubmitOutcome {
    /// Returns `true` if the host must prevent its default submission.
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Proceed)
    }
}

/// Runs the submit sequence for `form`.
///
/// 1. Re-check every rule against the host's current values.
/// 2. With a submit handler, wait (bounded) for outstanding verifications,
///    then call the handler if the form is valid.
/// 3. Without one, proceed only if the re-check left the form valid.
///    Verifications still in flight are not waited for in this mode.
pub(crate) async fn submit(form: &Form) -> SubmitOutcome {
    let options = form.options().clone();
    if !options.onsubmit {
        return SubmitOutcome::Proceed;
    }

    let valid_now = form.validate_all();

    if options.debug {
        log::debug!("[submit] debug mode, submission suppressed (valid={})", valid_now);
        return SubmitOutcome::Suppressed;
    }

    let Some(handler) = form.submit_handler() else {
        log::debug!("[submit] default submission, valid={}", valid_now);
        return if valid_now {
            SubmitOutcome::Proceed
        } else {
            SubmitOutcome::Blocked
        };
    };

    if form.pending() > 0 {
        log::debug!("[submit] waiting for {} verification(s)", form.pending());
    }
    if tokio::time::timeout(options.submit_timeout, form.tracker().wait_idle())
        .await
        .is_err()
    {
        log::warn!(
            "[submit] {} verification(s) still pending after {:?}; blocked",
            form.pending(),
            options.submit_timeout
        );
        return SubmitOutcome::Blocked;
    }

    let result = form.result();
    form.host().render_form(&result);

    if result.is_valid() {
        log::debug!("[submit] form valid, running submit handler");
        handler(form);
        SubmitOutcome::Submitted
    } else {
        log::debug!("[submit] form invalid after verification, blocked");
        SubmitOutcome::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prevents_default() {
        assert!(!SubmitOutcome::Proceed.prevents_default());
        assert!(SubmitOutcome::Submitted.prevents_default());
        assert!(SubmitOutcome::Blocked.prevents_default());
        assert!(SubmitOutcome::Suppressed.prevents_default());
    }
}
