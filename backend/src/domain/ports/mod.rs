//! Ports (driven interfaces) the domain services depend on.
//!
//! In hexagonal terms these are *driven* ports: the registration service
//! calls them without knowing the backing infrastructure, which keeps the
//! service testable against in-memory doubles.

pub mod entry_repository;

pub use self::entry_repository::{ConflictField, EntryPersistenceError, EntryRepository};
