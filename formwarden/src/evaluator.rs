//! Synchronous check evaluation

use crate::FieldId;
use crate::aggregate::Category;
use crate::aggregate::ErrorAggregator;
use crate::registry::RuleRegistry;

/// Runs every rule of `field` against `value` and records the result.
///
/// Updates each [`RuleCheck`](crate::registry::RuleCheck) in place (length
/// rules also rewrite their message) and recomputes the field's membership
/// in the rules error set. Returns `None` if the field has no rules.
pub fn evaluate(
    rules: &mut RuleRegistry,
    errors: &mut ErrorAggregator,
    field: &FieldId,
    value: &str,
) -> Option<bool> {
    let checks = rules.checks_mut(field)?;

    for check in checks.iter_mut() {
        let outcome = check.kind.check(value, field, &check.arg);
        check.valid = outcome.valid;
        if let Some(message) = outcome.message {
            check.message = message;
        }
    }

    let failing = errors.record(field, Category::Rules, checks.iter());
    log::debug!("[rules] {} evaluated, valid={}", field, !failing);
    Some(!failing)
}

/// Puts every rule of `field` back to its unevaluated (failing) state.
///
/// Returns `None` if the field has no rules.
pub fn reset(rules: &mut RuleRegistry, errors: &mut ErrorAggregator, field: &FieldId) -> Option<()> {
    let checks = rules.checks_mut(field)?;
    for check in checks.iter_mut() {
        check.valid = false;
    }
    errors.record(field, Category::Rules, checks.iter());
    Some(())
}
