//! Registration service orchestrating validation, persistence, and the
//! derived queue position.
//!
//! The service owns every waitlist use-case: register, list, count, email
//! availability, fetch, and delete. It translates repository failures into
//! domain errors so inbound adapters only ever see [`Error`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::error::Error;
use super::ports::{ConflictField, EntryPersistenceError, EntryRepository};
use super::registration::validation::validate;
use super::registration::{RegistrationDraft, WaitlistEntry};

/// Default window size for the administrative list operation.
pub const DEFAULT_PAGE_SIZE: i64 = 100;
/// Hard cap on the list window to keep responses bounded.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 1-based rank by insertion order; best effort under concurrent bursts.
    pub position: u64,
    pub registered_at: DateTime<Utc>,
    /// Welcome message naming the applicant and the configured launch date.
    pub message: String,
}

/// Total entry count plus its human-readable summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistTotal {
    pub total: u64,
    pub message: String,
}

/// Result of an email availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAvailability {
    pub exists: bool,
    pub message: String,
}

/// Outcome of an administrative delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionReceipt {
    pub deleted_id: i32,
    /// Display name of the removed applicant for confirmation messaging.
    pub display_name: String,
}

/// Waitlist use-cases over an [`EntryRepository`].
#[derive(Clone)]
pub struct RegistrationService {
    repository: Arc<dyn EntryRepository>,
    launch_date: String,
}

impl RegistrationService {
    /// Build the service over a repository and the configured launch date
    /// used in welcome messaging.
    pub fn new(repository: Arc<dyn EntryRepository>, launch_date: impl Into<String>) -> Self {
        Self {
            repository,
            launch_date: launch_date.into(),
        }
    }

    /// Validate and persist a submission.
    ///
    /// Violations surface as an unprocessable error carrying the field list;
    /// unique-key collisions surface as a conflict naming the field.
    pub async fn register(
        &self,
        draft: RegistrationDraft,
        origin_address: Option<String>,
    ) -> Result<RegistrationReceipt, Error> {
        let registration = validate(draft)
            .map_err(Error::validation_failed)?
            .with_origin_address(origin_address);

        let entry = self
            .repository
            .create(&registration)
            .await
            .map_err(map_persistence_error)?;

        // Count of ids at or below ours; read-after-write without isolation
        // from concurrent inserts, so the value is monotonically reasonable
        // rather than globally consistent.
        let position = self
            .repository
            .count_up_to(entry.id)
            .await
            .map_err(map_persistence_error)?;

        info!(id = entry.id, position, "waitlist entry registered");

        let message = format!(
            "Welcome {first_name}! You are on the waitlist. We will contact you at \
             {email} when we launch on {launch_date}.",
            first_name = entry.first_name,
            email = entry.email,
            launch_date = self.launch_date,
        );

        Ok(RegistrationReceipt {
            id: entry.id,
            first_name: entry.first_name,
            last_name: entry.last_name,
            email: entry.email,
            position,
            registered_at: entry.registered_at,
            message,
        })
    }

    /// Entries ordered by registration time, newest first.
    ///
    /// `offset` is floored at zero and `limit` clamped to
    /// [`MAX_PAGE_SIZE`]; non-positive limits fall back to
    /// [`DEFAULT_PAGE_SIZE`].
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<WaitlistEntry>, Error> {
        let offset = offset.max(0);
        let limit = if limit <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            limit.min(MAX_PAGE_SIZE)
        };

        self.repository
            .list(offset, limit)
            .await
            .map_err(map_persistence_error)
    }

    /// Total entry count with its summary message.
    pub async fn count(&self) -> Result<WaitlistTotal, Error> {
        let total = self
            .repository
            .count()
            .await
            .map_err(map_persistence_error)?;

        let message = if total == 1 {
            "1 person is waiting for the launch".to_owned()
        } else {
            format!("{total} people are waiting for the launch")
        };

        Ok(WaitlistTotal { total, message })
    }

    /// Case-insensitive email availability check.
    pub async fn email_exists(&self, email: &str) -> Result<EmailAvailability, Error> {
        let normalized = email.trim().to_lowercase();
        let exists = self
            .repository
            .get_by_email(&normalized)
            .await
            .map_err(map_persistence_error)?
            .is_some();

        let message = if exists {
            "This email is already registered on the waitlist.".to_owned()
        } else {
            "This email is available.".to_owned()
        };

        Ok(EmailAvailability { exists, message })
    }

    /// Fetch a single entry.
    pub async fn get_by_id(&self, id: i32) -> Result<WaitlistEntry, Error> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("No entry found with ID {id}")))
    }

    /// Hard-delete a single entry.
    pub async fn delete_by_id(&self, id: i32) -> Result<DeletionReceipt, Error> {
        let deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("No entry found with ID {id}")))?;

        info!(id, "waitlist entry deleted");

        Ok(DeletionReceipt {
            deleted_id: deleted.id,
            display_name: deleted.display_name(),
        })
    }
}

/// Human message shown to clients when a unique column collides.
fn conflict_message(field: ConflictField) -> &'static str {
    match field {
        ConflictField::Email => "This email is already registered on the waitlist.",
        ConflictField::DocumentNumber => {
            "This document number is already registered on the waitlist."
        }
        ConflictField::Other => "An entry with these details already exists.",
    }
}

fn map_persistence_error(error: EntryPersistenceError) -> Error {
    match error {
        EntryPersistenceError::Connection { message } => Error::service_unavailable(message),
        EntryPersistenceError::Query { message } => Error::internal(message),
        EntryPersistenceError::Duplicate { field } => {
            debug!(field = field.as_str(), "registration conflicted on unique field");
            Error::conflict(conflict_message(field))
                .with_details(serde_json::json!({ "field": field.as_str() }))
        }
    }
}
