//! Colombian identity document types and their number format rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity document categories accepted on the waitlist form.
///
/// Serialized with the two-letter codes used on the wire (`"CC"`, `"CE"`,
/// `"TI"`, `"PA"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    /// Cédula de Ciudadanía.
    Cc,
    /// Cédula de Extranjería.
    Ce,
    /// Tarjeta de Identidad.
    Ti,
    /// Pasaporte.
    Pa,
}

/// Error returned when a string does not name a known document type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document type must be one of CC, CE, TI, PA")]
pub struct UnknownDocumentType;

/// Rejection produced when a document number does not match the format its
/// document type demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNumberError {
    /// The type accepts digits only and the number contains something else.
    DigitsOnly { kind: DocumentType },
    /// The type accepts alphanumerics only.
    AlphanumericOnly { kind: DocumentType },
    /// The number falls outside the length bounds for its type.
    Length { kind: DocumentType },
}

impl fmt::Display for DocumentNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DigitsOnly { kind } => {
                write!(f, "{} must contain only digits", kind.label())
            }
            Self::AlphanumericOnly { kind } => {
                write!(f, "{} must contain only letters and digits", kind.label())
            }
            Self::Length { kind } => {
                let (min, max) = kind.length_bounds();
                let unit = if kind.digits_only() {
                    "digits"
                } else {
                    "characters"
                };
                write!(f, "{} must have between {min} and {max} {unit}", kind.label())
            }
        }
    }
}

impl std::error::Error for DocumentNumberError {}

impl DocumentType {
    /// Two-letter wire code for the document type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Ce => "CE",
            Self::Ti => "TI",
            Self::Pa => "PA",
        }
    }

    /// Full document name used in rejection messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cc => "Cédula de Ciudadanía",
            Self::Ce => "Cédula de Extranjería",
            Self::Ti => "Tarjeta de Identidad",
            Self::Pa => "Pasaporte",
        }
    }

    /// Whether the number may contain digits only (letters allowed otherwise).
    pub fn digits_only(self) -> bool {
        matches!(self, Self::Cc | Self::Ti)
    }

    /// Inclusive character-count bounds for a normalized number.
    pub fn length_bounds(self) -> (usize, usize) {
        match self {
            Self::Cc => (6, 10),
            Self::Ce => (6, 7),
            Self::Ti => (10, 11),
            Self::Pa => (5, 15),
        }
    }

    /// Check a normalized (separator-free) number against this type's rules.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DocumentType;
    ///
    /// assert!(DocumentType::Cc.validate_number("12345678").is_ok());
    /// assert!(DocumentType::Cc.validate_number("12345").is_err());
    /// ```
    pub fn validate_number(self, number: &str) -> Result<(), DocumentNumberError> {
        if self.digits_only() {
            if !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(DocumentNumberError::DigitsOnly { kind: self });
            }
        } else if !number.chars().all(char::is_alphanumeric) {
            return Err(DocumentNumberError::AlphanumericOnly { kind: self });
        }

        let (min, max) = self.length_bounds();
        let length = number.chars().count();
        if length < min || length > max {
            return Err(DocumentNumberError::Length { kind: self });
        }

        Ok(())
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CC" => Ok(Self::Cc),
            "CE" => Ok(Self::Ce),
            "TI" => Ok(Self::Ti),
            "PA" => Ok(Self::Pa),
            _ => Err(UnknownDocumentType),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DocumentType::Cc, "12345678")]
    #[case(DocumentType::Cc, "123456")]
    #[case(DocumentType::Cc, "1234567890")]
    #[case(DocumentType::Ce, "ABC1234")]
    #[case(DocumentType::Ce, "XY1234")]
    #[case(DocumentType::Ti, "10012345678")]
    #[case(DocumentType::Ti, "1001234567")]
    #[case(DocumentType::Pa, "AB1234567")]
    #[case(DocumentType::Pa, "12345")]
    fn accepts_well_formed_numbers(#[case] kind: DocumentType, #[case] number: &str) {
        assert_eq!(kind.validate_number(number), Ok(()));
    }

    #[rstest]
    #[case(DocumentType::Cc, "12345", DocumentNumberError::Length { kind: DocumentType::Cc })]
    #[case(DocumentType::Cc, "12345678901", DocumentNumberError::Length { kind: DocumentType::Cc })]
    #[case(DocumentType::Cc, "1234567A", DocumentNumberError::DigitsOnly { kind: DocumentType::Cc })]
    #[case(DocumentType::Ce, "AB-1234", DocumentNumberError::AlphanumericOnly { kind: DocumentType::Ce })]
    #[case(DocumentType::Ce, "ABC12345", DocumentNumberError::Length { kind: DocumentType::Ce })]
    #[case(DocumentType::Ti, "123456789", DocumentNumberError::Length { kind: DocumentType::Ti })]
    #[case(DocumentType::Ti, "100123456A8", DocumentNumberError::DigitsOnly { kind: DocumentType::Ti })]
    #[case(DocumentType::Pa, "AB12", DocumentNumberError::Length { kind: DocumentType::Pa })]
    fn rejects_malformed_numbers(
        #[case] kind: DocumentType,
        #[case] number: &str,
        #[case] expected: DocumentNumberError,
    ) {
        assert_eq!(kind.validate_number(number), Err(expected));
    }

    #[rstest]
    #[case("CC", DocumentType::Cc)]
    #[case("CE", DocumentType::Ce)]
    #[case("TI", DocumentType::Ti)]
    #[case("PA", DocumentType::Pa)]
    fn parses_wire_codes(#[case] raw: &str, #[case] expected: DocumentType) {
        assert_eq!(raw.parse::<DocumentType>(), Ok(expected));
    }

    #[rstest]
    #[case("cc")]
    #[case("DNI")]
    #[case("")]
    fn rejects_unknown_codes(#[case] raw: &str) {
        assert_eq!(raw.parse::<DocumentType>(), Err(UnknownDocumentType));
    }

    #[test]
    fn length_rejection_names_the_document_and_bounds() {
        let err = DocumentNumberError::Length {
            kind: DocumentType::Cc,
        };
        assert_eq!(
            err.to_string(),
            "Cédula de Ciudadanía must have between 6 and 10 digits"
        );
    }
}
