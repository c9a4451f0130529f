//! Submission validation and normalization rules.
//!
//! [`validate`] is referentially transparent: it inspects nothing but the
//! draft and produces either a fully normalized [`NewRegistration`] or the
//! complete list of field violations. Violations are collected per field
//! rather than failing fast; the only dependent rule is the document-number
//! format check, which runs once both the document type and the stripped
//! number are individually acceptable.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::document::DocumentType;
use crate::domain::error::FieldViolation;

use super::{NewRegistration, ReferralSource, RegistrationDraft};

/// Character-count bounds for first and last names.
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;

/// Bounds for a document number once separators are stripped.
const DOCUMENT_MIN: usize = 5;
const DOCUMENT_MAX: usize = 20;

/// Bounds for a phone number once separators are stripped.
const PHONE_MIN: usize = 7;
const PHONE_MAX: usize = 15;

/// Country code applied when the submission omits one.
const DEFAULT_COUNTRY_CODE: &str = "+57";

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static COUNTRY_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Letters (including accented Latin), spaces, hyphens, apostrophes.
        compile(r"^[\p{L} '\-]+$")
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| compile(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))
}

fn country_code_regex() -> &'static Regex {
    COUNTRY_CODE_RE.get_or_init(|| compile(r"^\+[0-9]{1,4}$"))
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|error| panic!("validation regex failed to compile: {error}"))
}

/// Accumulates field violations while individual rules run.
#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    /// Record the violation and yield `None` so the caller keeps going.
    fn reject<T>(&mut self, field: &'static str, message: impl Into<String>) -> Option<T> {
        self.push(field, message);
        None
    }
}

/// Validate and normalize a raw submission.
///
/// Returns the normalized payload, or every field violation found. The
/// returned registration carries no origin address; the service attaches it.
pub fn validate(draft: RegistrationDraft) -> Result<NewRegistration, Vec<FieldViolation>> {
    let mut violations = Violations::default();

    let document_type = validate_document_type(draft.document_type.as_deref(), &mut violations);
    let document_number =
        validate_document_number(draft.document_number.as_deref(), &mut violations);

    // Format-by-type runs only when both halves passed their own checks.
    let document_number = match (document_type, document_number) {
        (Some(kind), Some(number)) => match kind.validate_number(&number) {
            Ok(()) => Some(number),
            Err(err) => violations.reject("document_number", err.to_string()),
        },
        (_, number) => number,
    };

    let first_name = validate_name("first_name", draft.first_name.as_deref(), &mut violations);
    let last_name = validate_name("last_name", draft.last_name.as_deref(), &mut violations);
    let email = validate_email(draft.email.as_deref(), &mut violations);
    let country_code = validate_country_code(draft.country_code.as_deref(), &mut violations);
    let phone = validate_phone(draft.phone.as_deref(), &mut violations);
    let city = normalize_city(draft.city.as_deref());
    let referral_source =
        validate_referral_source(draft.referral_source.as_deref(), &mut violations);
    validate_terms(draft.terms_accepted, &mut violations);

    // Every rejected field recorded a violation, so the values are all
    // present exactly when the list is empty.
    match (
        document_type,
        document_number,
        first_name,
        last_name,
        email,
        country_code,
        phone,
    ) {
        (
            Some(document_type),
            Some(document_number),
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(country_code),
            Some(phone),
        ) if violations.0.is_empty() => Ok(NewRegistration {
            document_type,
            document_number,
            first_name,
            last_name,
            email,
            country_code,
            phone,
            city,
            referral_source,
            terms_accepted: true,
            origin_address: None,
        }),
        _ => Err(violations.0),
    }
}

fn validate_document_type(
    raw: Option<&str>,
    violations: &mut Violations,
) -> Option<DocumentType> {
    let Some(raw) = raw else {
        return violations.reject("document_type", "document type is required");
    };
    match raw.trim().parse::<DocumentType>() {
        Ok(kind) => Some(kind),
        Err(err) => violations.reject("document_type", err.to_string()),
    }
}

fn validate_document_number(raw: Option<&str>, violations: &mut Violations) -> Option<String> {
    let Some(raw) = raw else {
        return violations.reject("document_number", "document number is required");
    };
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect();
    if stripped.is_empty() {
        return violations.reject("document_number", "document number must not be empty");
    }
    let length = stripped.chars().count();
    if length < DOCUMENT_MIN || length > DOCUMENT_MAX {
        return violations.reject(
            "document_number",
            format!(
                "document number must have between {DOCUMENT_MIN} and {DOCUMENT_MAX} characters"
            ),
        );
    }
    Some(stripped)
}

fn validate_name(
    field: &'static str,
    raw: Option<&str>,
    violations: &mut Violations,
) -> Option<String> {
    let label = field.replace('_', " ");
    let Some(raw) = raw else {
        return violations.reject(field, format!("{label} is required"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return violations.reject(field, format!("{label} must not be empty"));
    }
    let length = trimmed.chars().count();
    if length < NAME_MIN {
        return violations.reject(field, format!("{label} must have at least {NAME_MIN} characters"));
    }
    if length > NAME_MAX {
        return violations.reject(field, format!("{label} must have at most {NAME_MAX} characters"));
    }
    if !name_regex().is_match(trimmed) {
        return violations.reject(
            field,
            format!("{label} may only contain letters, spaces, hyphens, and apostrophes"),
        );
    }
    Some(title_case(trimmed))
}

fn validate_email(raw: Option<&str>, violations: &mut Violations) -> Option<String> {
    let Some(raw) = raw else {
        return violations.reject("email", "email is required");
    };
    let normalized = raw.trim().to_lowercase();
    if !email_regex().is_match(&normalized) {
        return violations.reject("email", "email must be a valid email address");
    }
    Some(normalized)
}

fn validate_country_code(raw: Option<&str>, violations: &mut Violations) -> Option<String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Some(DEFAULT_COUNTRY_CODE.to_owned()),
        Some(raw) => raw,
    };
    let prefixed = if raw.starts_with('+') {
        raw.to_owned()
    } else {
        format!("+{raw}")
    };
    if !country_code_regex().is_match(&prefixed) {
        return violations.reject(
            "country_code",
            "country code must be '+' followed by 1 to 4 digits",
        );
    }
    Some(prefixed)
}

fn validate_phone(raw: Option<&str>, violations: &mut Violations) -> Option<String> {
    let Some(raw) = raw else {
        return violations.reject("phone", "phone is required");
    };
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();
    if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_digit()) {
        return violations.reject("phone", "phone must contain only digits");
    }
    let length = stripped.chars().count();
    if length < PHONE_MIN || length > PHONE_MAX {
        return violations.reject(
            "phone",
            format!("phone must have between {PHONE_MIN} and {PHONE_MAX} digits"),
        );
    }
    Some(stripped)
}

fn normalize_city(raw: Option<&str>) -> Option<String> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        None
    } else {
        Some(title_case(trimmed))
    }
}

fn validate_referral_source(
    raw: Option<&str>,
    violations: &mut Violations,
) -> Option<ReferralSource> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<ReferralSource>() {
        Ok(source) => Some(source),
        Err(err) => violations.reject("referral_source", err.to_string()),
    }
}

fn validate_terms(raw: Option<bool>, violations: &mut Violations) {
    if raw != Some(true) {
        violations.push(
            "terms_accepted",
            "you must accept the personal data protection policy to continue \
             (Law 1581 of 2012)",
        );
    }
}

/// Title-case each whitespace-delimited word: first character uppercased,
/// the remainder lowercased.
fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
