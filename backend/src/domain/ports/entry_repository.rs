//! Port abstraction for waitlist entry persistence adapters.

use async_trait::async_trait;

use crate::domain::registration::{NewRegistration, WaitlistEntry};

/// The unique column a duplicate-key failure collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    DocumentNumber,
    /// The storage layer reported a uniqueness failure the adapter could not
    /// attribute to a specific column.
    Other,
}

impl ConflictField {
    /// Submission field name associated with the conflicting column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::DocumentNumber => "document_number",
            Self::Other => "other",
        }
    }
}

/// Persistence errors raised by entry repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryPersistenceError {
    /// Repository connection could not be established.
    #[error("waitlist repository connection failed: {message}")]
    Connection { message: String },

    /// Query or mutation failed during execution.
    #[error("waitlist repository query failed: {message}")]
    Query { message: String },

    /// Insert collided with an existing entry on a unique column.
    #[error("duplicate value for unique field {}", field.as_str())]
    Duplicate { field: ConflictField },
}

impl EntryPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-key error for the given field.
    pub fn duplicate(field: ConflictField) -> Self {
        Self::Duplicate { field }
    }
}

/// Persistence boundary for waitlist entries.
///
/// Implementations must enforce uniqueness of `email` and `document_number`
/// at the storage layer so concurrent colliding inserts resolve to exactly
/// one success and one [`EntryPersistenceError::Duplicate`]. Each operation
/// acquires its storage connection for the duration of the call and releases
/// it on every exit path.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry, returning the stored row with its assigned id and
    /// registration timestamp.
    async fn create(
        &self,
        registration: &NewRegistration,
    ) -> Result<WaitlistEntry, EntryPersistenceError>;

    /// Total number of entries.
    async fn count(&self) -> Result<u64, EntryPersistenceError>;

    /// Number of entries whose id is less than or equal to `id`; supports the
    /// 1-based queue-position computation.
    async fn count_up_to(&self, id: i32) -> Result<u64, EntryPersistenceError>;

    /// Entries ordered by registration time, newest first, windowed by
    /// `offset` and `limit`.
    async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WaitlistEntry>, EntryPersistenceError>;

    /// Fetch an entry by id.
    async fn get_by_id(&self, id: i32) -> Result<Option<WaitlistEntry>, EntryPersistenceError>;

    /// Fetch an entry by its normalized (lower-cased) email.
    async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, EntryPersistenceError>;

    /// Hard-delete an entry by id, returning the deleted row when it existed.
    async fn delete_by_id(&self, id: i32)
    -> Result<Option<WaitlistEntry>, EntryPersistenceError>;
}
