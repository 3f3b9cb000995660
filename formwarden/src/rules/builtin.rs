//! Builtin rule predicates

use std::sync::LazyLock;

use regex::Regex;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(?:[0-9]+|[0-9]{1,3}(?:,[0-9]{3})+)?(?:\.[0-9]+)?$").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .unwrap()
});

static NO_SYMBOLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 _]*[A-Za-z0-9][A-Za-z0-9 _]*$").unwrap());

/// Non-blank after trimming.
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Signed decimal, optionally with `,` thousands separators.
///
/// The empty string passes; combine with `required` to demand a value.
pub fn number(value: &str) -> bool {
    NUMBER_RE.is_match(value)
}

/// ASCII `local@domain` address.
pub fn email(value: &str) -> bool {
    value.is_ascii() && EMAIL_RE.is_match(value)
}

/// Letters, digits, spaces and underscores, with at least one alphanumeric.
pub fn no_symbols(value: &str) -> bool {
    NO_SYMBOLS_RE.is_match(value)
}

/// Length in characters, as the length rules measure it.
pub fn length(value: &str) -> usize {
    value.chars().count()
}

pub fn min_length_message(min: usize, len: usize) -> String {
    format!("must be more than {} characters long, currently {}", min, len)
}

pub fn max_length_message(max: usize, len: usize) -> String {
    format!("must be less than {} characters long, currently {}", max, len)
}

pub fn range_length_message(min: usize, max: usize, len: usize) -> String {
    format!("must be between {} and {} characters long, currently {}", min, max, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("a"));
        assert!(required("  a  "));
        assert!(!required(""));
        assert!(!required(" \t\n "));
    }

    #[test]
    fn test_number() {
        for ok in ["", "0", "-12", "3.14", "-0.5", ".5", "1,000", "12,345,678.9"] {
            assert!(number(ok), "{ok:?} should be a number");
        }
        for bad in ["abc", "1,00", "1.2.3", "--1", "1e5", "١٢"] {
            assert!(!number(bad), "{bad:?} should not be a number");
        }
    }

    #[test]
    fn test_email() {
        for ok in ["a@b.co", "first.last@example.com", "x@[10.0.0.1]", "\"odd name\"@example.org"] {
            assert!(email(ok), "{ok:?} should be an email");
        }
        for bad in ["", "plain", "a@b", "a@b.c", "a b@example.com", "ü@example.com", "a@exämple.com"] {
            assert!(!email(bad), "{bad:?} should not be an email");
        }
    }

    #[test]
    fn test_no_symbols() {
        assert!(no_symbols("hello_world 42"));
        assert!(no_symbols("x"));
        assert!(!no_symbols(""));
        assert!(!no_symbols("___"));
        assert!(!no_symbols("   "));
        assert!(!no_symbols("hi!"));
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(length("héllo"), 5);
        assert_eq!(min_length_message(3, 1), "must be more than 3 characters long, currently 1");
        assert_eq!(max_length_message(5, 7), "must be less than 5 characters long, currently 7");
        assert_eq!(
            range_length_message(2, 4, 0),
            "must be between 2 and 4 characters long, currently 0"
        );
    }
}
