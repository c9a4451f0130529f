//! Row types bridging the `waitlist_entries` table and the domain entity.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::document::DocumentType;
use crate::domain::registration::{NewRegistration, ReferralSource, WaitlistEntry};

use super::schema::waitlist_entries;

/// Row read back from `waitlist_entries`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = waitlist_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EntryRow {
    pub id: i32,
    pub document_type: String,
    pub document_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub city: Option<String>,
    pub referral_source: Option<String>,
    pub terms_accepted: bool,
    pub registered_at: DateTime<Utc>,
    pub origin_address: Option<String>,
}

impl TryFrom<EntryRow> for WaitlistEntry {
    type Error = String;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let document_type: DocumentType = row
            .document_type
            .parse()
            .map_err(|_| format!("stored document type {:?} is not recognised", row.document_type))?;
        let referral_source = row
            .referral_source
            .as_deref()
            .map(str::parse::<ReferralSource>)
            .transpose()
            .map_err(|_| {
                format!(
                    "stored referral source {:?} is not recognised",
                    row.referral_source
                )
            })?;

        Ok(Self {
            id: row.id,
            document_type,
            document_number: row.document_number,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            country_code: row.country_code,
            phone: row.phone,
            city: row.city,
            referral_source,
            terms_accepted: row.terms_accepted,
            registered_at: row.registered_at,
            origin_address: row.origin_address,
        })
    }
}

/// Insertable row for a validated registration.
///
/// `id` and `registered_at` are omitted so the database assigns them.
#[derive(Debug, Insertable)]
#[diesel(table_name = waitlist_entries)]
pub struct NewEntryRow<'a> {
    pub document_type: &'a str,
    pub document_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub country_code: &'a str,
    pub phone: &'a str,
    pub city: Option<&'a str>,
    pub referral_source: Option<&'a str>,
    pub terms_accepted: bool,
    pub origin_address: Option<&'a str>,
}

impl<'a> From<&'a NewRegistration> for NewEntryRow<'a> {
    fn from(registration: &'a NewRegistration) -> Self {
        Self {
            document_type: registration.document_type.as_str(),
            document_number: &registration.document_number,
            first_name: &registration.first_name,
            last_name: &registration.last_name,
            email: &registration.email,
            country_code: &registration.country_code,
            phone: &registration.phone,
            city: registration.city.as_deref(),
            referral_source: registration.referral_source.map(ReferralSource::as_str),
            terms_accepted: registration.terms_accepted,
            origin_address: registration.origin_address.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversions.
    use super::*;
    use rstest::rstest;

    fn row() -> EntryRow {
        EntryRow {
            id: 7,
            document_type: "CC".into(),
            document_number: "12345678".into(),
            first_name: "María José".into(),
            last_name: "García López".into(),
            email: "maria@example.com".into(),
            country_code: "+57".into(),
            phone: "3001234567".into(),
            city: Some("Barranquilla".into()),
            referral_source: Some("friend".into()),
            terms_accepted: true,
            registered_at: Utc::now(),
            origin_address: Some("10.0.0.1".into()),
        }
    }

    #[test]
    fn converts_a_well_formed_row() {
        let entry = WaitlistEntry::try_from(row()).expect("row converts");

        assert_eq!(entry.id, 7);
        assert_eq!(entry.document_type, DocumentType::Cc);
        assert_eq!(entry.referral_source, Some(ReferralSource::Friend));
        assert_eq!(entry.display_name(), "María José García López");
        assert_eq!(entry.full_phone(), "+573001234567");
    }

    #[rstest]
    #[case("XX", Some("friend"))]
    #[case("CC", Some("billboard"))]
    fn rejects_unrecognised_stored_values(
        #[case] document_type: &str,
        #[case] referral_source: Option<&str>,
    ) {
        let mut bad = row();
        bad.document_type = document_type.into();
        bad.referral_source = referral_source.map(Into::into);

        assert!(WaitlistEntry::try_from(bad).is_err());
    }

    #[test]
    fn absent_referral_source_converts_to_none() {
        let mut bare = row();
        bare.referral_source = None;

        let entry = WaitlistEntry::try_from(bare).expect("row converts");
        assert!(entry.referral_source.is_none());
    }
}
