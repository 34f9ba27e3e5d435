//! Field validators.
//!
//! Validators are stateless, pure predicates: given a field's current value
//! and the message catalog, they return a [`Verdict`] and never throw.
//! Multiple validators attach to one field and evaluate in order with
//! short-circuit on the first failure (see [`crate::fields::Field::validate`]).
//!
//! Emptiness is [`Validator::Required`]'s concern alone: the shape
//! validators (email, phone, url) accept an empty value so that optional
//! fields stay valid when untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ErrorMessages;
use crate::fields::Field;

/// The outcome of one validator over one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the value passed.
    pub valid: bool,
    /// The catalog message to surface when invalid.
    pub message: Option<String>,
}

impl Verdict {
    fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn fail(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }

    fn check(valid: bool, message: &str) -> Self {
        if valid {
            Self::pass()
        } else {
            Self::fail(message)
        }
    }
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

// Permissive host.tld shape; the scheme is optional.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://)?[\da-z.-]+\.[a-z.]{2,6}(/[\w ./\-]*)?/?$").expect("valid regex"));

/// Characters a phone value may contain besides digits.
const PHONE_PUNCTUATION: [char; 5] = ['+', '-', '(', ')', ' '];

/// The closed set of validator kinds.
///
/// Each kind keys its own entry in the [`ErrorMessages`] catalog so a
/// deployment can localize them independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    /// The field must have a value (type-specific emptiness rule).
    Required,
    /// If non-empty, the value must look like an email address.
    Email,
    /// If non-empty, the value must look like a phone number: only digits,
    /// spaces, `+`, `-`, `(`, `)`, with 7–16 digits overall.
    Phone,
    /// If non-empty, the value must look like a web address.
    Url,
    /// Consent checkbox must be ticked. Behaves like `Required` but carries
    /// its own message kind.
    Consent,
}

impl Validator {
    /// Evaluates this validator against the field's current value.
    #[must_use]
    pub fn is_valid(self, field: &Field, messages: &ErrorMessages) -> Verdict {
        match self {
            Self::Required => Verdict::check(!field.value().is_empty(), &messages.required),
            Self::Consent => Verdict::check(!field.value().is_empty(), &messages.consent),
            Self::Email => Self::check_text(field, &messages.email, |text| {
                EMAIL_RE.is_match(&text.to_lowercase())
            }),
            Self::Url => Self::check_text(field, &messages.url, |text| {
                URL_RE.is_match(&text.to_lowercase())
            }),
            Self::Phone => Self::check_text(field, &messages.phone, |text| {
                let legal = text
                    .chars()
                    .all(|c| c.is_ascii_digit() || PHONE_PUNCTUATION.contains(&c));
                let digits = text.chars().filter(char::is_ascii_digit).count();
                legal && (7..=16).contains(&digits)
            }),
        }
    }

    /// Shape check over text values: empty (or non-text) values pass.
    fn check_text<P>(field: &Field, message: &str, predicate: P) -> Verdict
    where
        P: Fn(&str) -> bool,
    {
        let value = field.value();
        match value.as_text() {
            Some(text) if !text.trim().is_empty() => {
                Verdict::check(predicate(text.trim()), message)
            }
            _ => Verdict::pass(),
        }
    }
}
