//! Regression coverage for submission validation and normalization.

use rstest::rstest;

use crate::domain::document::DocumentType;
use crate::domain::registration::validation::validate;
use crate::domain::registration::{ReferralSource, RegistrationDraft};

fn valid_draft() -> RegistrationDraft {
    RegistrationDraft {
        document_type: Some("CC".into()),
        document_number: Some("12345678".into()),
        first_name: Some("María José".into()),
        last_name: Some("García López".into()),
        email: Some("maria@example.com".into()),
        country_code: Some("+57".into()),
        phone: Some("3001234567".into()),
        city: Some("Barranquilla".into()),
        referral_source: Some("social".into()),
        terms_accepted: Some(true),
    }
}

fn violation_fields(draft: RegistrationDraft) -> Vec<&'static str> {
    validate(draft)
        .expect_err("draft should fail validation")
        .into_iter()
        .map(|violation| violation.field)
        .collect()
}

#[test]
fn accepts_a_complete_draft() {
    let registration = validate(valid_draft()).expect("valid draft");

    assert_eq!(registration.document_type, DocumentType::Cc);
    assert_eq!(registration.document_number, "12345678");
    assert_eq!(registration.first_name, "María José");
    assert_eq!(registration.last_name, "García López");
    assert_eq!(registration.email, "maria@example.com");
    assert_eq!(registration.country_code, "+57");
    assert_eq!(registration.phone, "3001234567");
    assert_eq!(registration.city.as_deref(), Some("Barranquilla"));
    assert_eq!(registration.referral_source, Some(ReferralSource::Social));
    assert!(registration.terms_accepted);
    assert!(registration.origin_address.is_none());
}

#[test]
fn accepts_a_minimal_draft() {
    let draft = RegistrationDraft {
        country_code: None,
        city: None,
        referral_source: None,
        ..valid_draft()
    };

    let registration = validate(draft).expect("minimal draft");
    assert_eq!(registration.country_code, "+57");
    assert!(registration.city.is_none());
    assert!(registration.referral_source.is_none());
}

#[test]
fn normalizes_email_to_lower_case() {
    let draft = RegistrationDraft {
        email: Some("  MARIA@Example.COM ".into()),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.email, "maria@example.com");
}

#[rstest]
#[case("maría josé", "María José")]
#[case("garcía lópez", "García López")]
#[case("ANA", "Ana")]
#[case("  juan   pablo  ", "Juan Pablo")]
fn title_cases_names(#[case] raw: &str, #[case] expected: &str) {
    let draft = RegistrationDraft {
        first_name: Some(raw.into()),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.first_name, expected);
}

#[rstest]
#[case("María123")]
#[case("A")]
#[case("")]
#[case("   ")]
fn rejects_malformed_names(#[case] raw: &str) {
    let draft = RegistrationDraft {
        first_name: Some(raw.into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["first_name"]);
}

#[test]
fn accepts_accented_names() {
    let draft = RegistrationDraft {
        first_name: Some("José María".into()),
        last_name: Some("González Muñoz".into()),
        ..valid_draft()
    };

    let registration = validate(draft).expect("accented names are valid");
    assert_eq!(registration.first_name, "José María");
    assert_eq!(registration.last_name, "González Muñoz");
}

#[test]
fn strips_document_number_separators() {
    let draft = RegistrationDraft {
        document_number: Some("12.345-678".into()),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.document_number, "12345678");
}

#[rstest]
#[case("CC", "12345678", true)]
#[case("CC", "12345", false)]
#[case("CC", "1234567A", false)]
#[case("CE", "ABC1234", true)]
#[case("TI", "10012345678", true)]
#[case("PA", "AB1234567", true)]
fn applies_document_format_by_type(
    #[case] document_type: &str,
    #[case] document_number: &str,
    #[case] accepted: bool,
) {
    let draft = RegistrationDraft {
        document_type: Some(document_type.into()),
        document_number: Some(document_number.into()),
        ..valid_draft()
    };

    assert_eq!(validate(draft).is_ok(), accepted);
}

#[test]
fn unknown_document_type_is_a_field_violation() {
    let draft = RegistrationDraft {
        document_type: Some("DNI".into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["document_type"]);
}

#[test]
fn format_rule_is_skipped_when_document_type_is_invalid() {
    // The cross-field rule needs a valid type; only the type violation is
    // reported even though "123" is too short for every document kind.
    let draft = RegistrationDraft {
        document_type: Some("XX".into()),
        document_number: Some("123".into()),
        ..valid_draft()
    };

    assert_eq!(
        violation_fields(draft),
        vec!["document_type", "document_number"]
    );
}

#[rstest]
#[case("300 123 4567", "3001234567")]
#[case("(300) 123-4567", "3001234567")]
#[case("300.123.4567", "3001234567")]
fn strips_phone_separators(#[case] raw: &str, #[case] expected: &str) {
    let draft = RegistrationDraft {
        phone: Some(raw.into()),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.phone, expected);
}

#[rstest]
#[case("123456")]
#[case("1234567890123456")]
#[case("30012345a7")]
fn rejects_malformed_phones(#[case] raw: &str) {
    let draft = RegistrationDraft {
        phone: Some(raw.into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["phone"]);
}

#[rstest]
#[case(Some("57"), "+57")]
#[case(Some("+1"), "+1")]
#[case(Some("+1234"), "+1234")]
#[case(None, "+57")]
fn normalizes_country_codes(#[case] raw: Option<&str>, #[case] expected: &str) {
    let draft = RegistrationDraft {
        country_code: raw.map(Into::into),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.country_code, expected);
}

#[rstest]
#[case("abc")]
#[case("+12345")]
#[case("+")]
fn rejects_malformed_country_codes(#[case] raw: &str) {
    let draft = RegistrationDraft {
        country_code: Some(raw.into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["country_code"]);
}

#[rstest]
#[case("not-an-email")]
#[case("correo@")]
#[case("@example.com")]
#[case("a b@example.com")]
fn rejects_malformed_emails(#[case] raw: &str) {
    let draft = RegistrationDraft {
        email: Some(raw.into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["email"]);
}

#[rstest]
#[case(Some("  "), None)]
#[case(Some("barranquilla"), Some("Barranquilla"))]
#[case(Some("santa marta"), Some("Santa Marta"))]
#[case(None, None)]
fn city_is_optional_and_title_cased(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
    let draft = RegistrationDraft {
        city: raw.map(Into::into),
        ..valid_draft()
    };

    let registration = validate(draft).expect("valid draft");
    assert_eq!(registration.city.as_deref(), expected);
}

#[test]
fn unknown_referral_source_is_a_field_violation() {
    let draft = RegistrationDraft {
        referral_source: Some("billboard".into()),
        ..valid_draft()
    };

    assert_eq!(violation_fields(draft), vec!["referral_source"]);
}

#[rstest]
#[case(Some(false))]
#[case(None)]
fn rejects_unaccepted_terms_with_consent_message(#[case] terms: Option<bool>) {
    let draft = RegistrationDraft {
        terms_accepted: terms,
        ..valid_draft()
    };

    let violations = validate(draft).expect_err("terms must be accepted");
    let violation = violations
        .iter()
        .find(|violation| violation.field == "terms_accepted")
        .expect("terms violation present");
    assert!(violation.message.contains("data protection"));
    assert!(violation.message.contains("Law 1581 of 2012"));
}

#[test]
fn terms_rejection_applies_regardless_of_other_fields() {
    let draft = RegistrationDraft {
        terms_accepted: Some(false),
        ..valid_draft()
    };

    assert!(validate(draft).is_err());
}

#[test]
fn collects_every_violation_in_one_pass() {
    let draft = RegistrationDraft {
        document_type: Some("ZZ".into()),
        document_number: Some("1".into()),
        first_name: Some("M4ria".into()),
        last_name: None,
        email: Some("broken".into()),
        country_code: Some("abc".into()),
        phone: Some("12".into()),
        city: None,
        referral_source: Some("radio".into()),
        terms_accepted: Some(false),
    };

    let mut fields = violation_fields(draft);
    fields.sort_unstable();
    assert_eq!(
        fields,
        vec![
            "country_code",
            "document_number",
            "document_type",
            "email",
            "first_name",
            "last_name",
            "phone",
            "referral_source",
            "terms_accepted",
        ]
    );
}
