//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` when migrations change.

diesel::table! {
    /// Waitlist registrations.
    ///
    /// `email` and `document_number` carry unique constraints
    /// (`waitlist_entries_email_key`, `waitlist_entries_document_number_key`);
    /// the repository classifies insert conflicts by those constraint names.
    waitlist_entries (id) {
        /// Primary key: serial, monotonically increasing.
        id -> Int4,
        /// Identity document category code (CC, CE, TI, PA).
        #[max_length = 2]
        document_type -> Varchar,
        /// Separator-free document number; unique.
        #[max_length = 20]
        document_number -> Varchar,
        #[max_length = 100]
        first_name -> Varchar,
        #[max_length = 100]
        last_name -> Varchar,
        /// Lower-cased email; unique.
        #[max_length = 255]
        email -> Varchar,
        /// Dialing prefix, `+` followed by 1-4 digits.
        #[max_length = 5]
        country_code -> Varchar,
        /// Separator-free phone number.
        #[max_length = 15]
        phone -> Varchar,
        #[max_length = 100]
        city -> Nullable<Varchar>,
        #[max_length = 20]
        referral_source -> Nullable<Varchar>,
        terms_accepted -> Bool,
        /// Assigned by the database at insertion.
        registered_at -> Timestamptz,
        /// Request origin; sized for IPv6 textual form.
        #[max_length = 45]
        origin_address -> Nullable<Varchar>,
    }
}
