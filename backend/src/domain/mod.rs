//! Domain primitives and services.
//!
//! Purpose: define the strongly typed waitlist entities, the submission
//! validation rules, and the registration/access services used by the API
//! and persistence layers. Keep types immutable and document invariants in
//! each type's Rustdoc. Everything in this module is transport agnostic;
//! inbound adapters own the HTTP mapping.

pub mod access;
pub mod document;
pub mod error;
pub mod ports;
pub mod registration;
pub mod registration_service;


pub use self::access::{AccessGuard, AdminCredentials};
pub use self::document::{DocumentNumberError, DocumentType};
pub use self::error::{Error, ErrorCode, FieldViolation};
pub use self::registration::{
    NewRegistration, ReferralSource, RegistrationDraft, WaitlistEntry,
};
pub use self::registration_service::RegistrationService;
