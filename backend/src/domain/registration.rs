//! Waitlist registration entities.
//!
//! A submission arrives as an untyped [`RegistrationDraft`], is normalized
//! into a [`NewRegistration`] by the validation rules in
//! [`validation`](self::validation), and is persisted as a [`WaitlistEntry`]
//! once the storage layer has assigned the id and registration timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::document::DocumentType;

pub mod validation;

#[cfg(test)]
mod tests;

/// How the applicant heard about the launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReferralSource {
    Social,
    Friend,
    Parish,
    Community,
    Other,
}

/// Error returned when a string does not name a known referral source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("referral source must be one of social, friend, parish, community, other")]
pub struct UnknownReferralSource;

impl ReferralSource {
    /// Wire value for the referral source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Friend => "friend",
            Self::Parish => "parish",
            Self::Community => "community",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ReferralSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferralSource {
    type Err = UnknownReferralSource;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "social" => Ok(Self::Social),
            "friend" => Ok(Self::Friend),
            "parish" => Ok(Self::Parish),
            "community" => Ok(Self::Community),
            "other" => Ok(Self::Other),
            _ => Err(UnknownReferralSource),
        }
    }
}

/// Raw waitlist submission as received from the client.
///
/// Every field is optional at this level so the validator can report all
/// missing and malformed fields in a single pass instead of letting the
/// deserializer fail on the first absent key.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegistrationDraft {
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub referral_source: Option<String>,
    pub terms_accepted: Option<bool>,
}

/// Normalized registration payload ready for persistence.
///
/// ## Invariants
/// - Every field already satisfies the validation rules: names are
///   title-cased, the email is lower-cased and trimmed, the document number
///   and phone are separator-free, and `terms_accepted` is `true`.
/// - `origin_address` is attached by the registration service, never by the
///   validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub document_type: DocumentType,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub city: Option<String>,
    pub referral_source: Option<ReferralSource>,
    pub terms_accepted: bool,
    pub origin_address: Option<String>,
}

impl NewRegistration {
    /// Attach the request-origin address captured by the inbound adapter.
    pub fn with_origin_address(mut self, origin_address: Option<String>) -> Self {
        self.origin_address = origin_address;
        self
    }
}

/// A persisted waitlist entry.
///
/// ## Invariants
/// - `id` is storage-assigned, unique, and monotonically increasing.
/// - `email` and `document_number` are unique across all entries.
/// - `terms_accepted` is always `true`; entries that failed the consent rule
///   are never persisted.
/// - `registered_at` is assigned by the storage layer at insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: i32,
    pub document_type: DocumentType,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub city: Option<String>,
    pub referral_source: Option<ReferralSource>,
    pub terms_accepted: bool,
    pub registered_at: DateTime<Utc>,
    pub origin_address: Option<String>,
}

impl WaitlistEntry {
    /// Applicant's display name ("First Last") for confirmation messaging.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Dialable phone number including the country code.
    pub fn full_phone(&self) -> String {
        format!("{}{}", self.country_code, self.phone)
    }
}
