//! Diesel-backed [`EntryRepository`] adapter.
//!
//! Uniqueness of `email` and `document_number` is enforced by the database's
//! unique constraints; this adapter only classifies the resulting
//! `UniqueViolation` so the service can name the conflicting field. Each
//! operation checks a connection out of the pool for its own duration.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ConflictField, EntryPersistenceError, EntryRepository};
use crate::domain::registration::{NewRegistration, WaitlistEntry};

use super::pool::{DbPool, PoolError};
use super::rows::{EntryRow, NewEntryRow};
use super::schema::waitlist_entries::dsl;

/// PostgreSQL-backed entry repository.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EntryPersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    EntryPersistenceError::connection(message)
}

fn map_diesel_error(error: diesel::result::Error) -> EntryPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => EntryPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => EntryPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EntryPersistenceError::connection("database connection error")
        }
        _ => EntryPersistenceError::query("database error"),
    }
}

/// Map insert failures, attributing unique violations to their column.
fn map_insert_error(error: diesel::result::Error) -> EntryPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let field = classify_unique_violation(info.constraint_name(), info.message());
        return EntryPersistenceError::duplicate(field);
    }
    map_diesel_error(error)
}

/// Attribute a unique violation to the email or document column.
///
/// Prefers the constraint name (`waitlist_entries_email_key`,
/// `waitlist_entries_document_number_key`); falls back to scanning the error
/// message when the driver does not report one.
fn classify_unique_violation(constraint_name: Option<&str>, message: &str) -> ConflictField {
    let haystack = constraint_name
        .map_or_else(|| message.to_lowercase(), str::to_lowercase);

    if haystack.contains("email") {
        ConflictField::Email
    } else if haystack.contains("document") {
        ConflictField::DocumentNumber
    } else {
        ConflictField::Other
    }
}

fn convert_row(row: EntryRow) -> Result<WaitlistEntry, EntryPersistenceError> {
    WaitlistEntry::try_from(row).map_err(EntryPersistenceError::query)
}

fn convert_rows(rows: Vec<EntryRow>) -> Result<Vec<WaitlistEntry>, EntryPersistenceError> {
    rows.into_iter().map(convert_row).collect()
}

fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn create(
        &self,
        registration: &NewRegistration,
    ) -> Result<WaitlistEntry, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: EntryRow = diesel::insert_into(dsl::waitlist_entries)
            .values(NewEntryRow::from(registration))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_insert_error)?;

        convert_row(row)
    }

    async fn count(&self) -> Result<u64, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = dsl::waitlist_entries
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count_to_u64(total))
    }

    async fn count_up_to(&self, id: i32) -> Result<u64, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = dsl::waitlist_entries
            .filter(dsl::id.le(id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count_to_u64(total))
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WaitlistEntry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EntryRow> = dsl::waitlist_entries
            .select(EntryRow::as_select())
            .order(dsl::registered_at.desc())
            .then_order_by(dsl::id.desc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        convert_rows(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EntryRow> = dsl::waitlist_entries
            .find(id)
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(convert_row).transpose()
    }

    async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EntryRow> = dsl::waitlist_entries
            .filter(dsl::email.eq(email))
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(convert_row).transpose()
    }

    async fn delete_by_id(
        &self,
        id: i32,
    ) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EntryRow> = diesel::delete(dsl::waitlist_entries.find(id))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(convert_row).transpose()
    }
}
