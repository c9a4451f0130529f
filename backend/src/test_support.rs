//! Test doubles shared by unit and integration tests.
//!
//! Enabled for the crate's own `#[cfg(test)]` builds and for integration
//! tests via the `test-support` feature on the self dev-dependency.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{ConflictField, EntryPersistenceError, EntryRepository};
use crate::domain::registration::{NewRegistration, WaitlistEntry};

#[derive(Debug, Default)]
struct State {
    entries: Vec<WaitlistEntry>,
    next_id: i32,
}

/// In-memory [`EntryRepository`] mirroring the storage-layer contract,
/// including uniqueness enforcement on email and document number.
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    state: Mutex<State>,
}

impl InMemoryEntryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn create(
        &self,
        registration: &NewRegistration,
    ) -> Result<WaitlistEntry, EntryPersistenceError> {
        let mut state = self.state.lock().expect("repository state lock");

        if state
            .entries
            .iter()
            .any(|entry| entry.email == registration.email)
        {
            return Err(EntryPersistenceError::duplicate(ConflictField::Email));
        }
        if state
            .entries
            .iter()
            .any(|entry| entry.document_number == registration.document_number)
        {
            return Err(EntryPersistenceError::duplicate(
                ConflictField::DocumentNumber,
            ));
        }

        state.next_id += 1;
        let entry = WaitlistEntry {
            id: state.next_id,
            document_type: registration.document_type,
            document_number: registration.document_number.clone(),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            email: registration.email.clone(),
            country_code: registration.country_code.clone(),
            phone: registration.phone.clone(),
            city: registration.city.clone(),
            referral_source: registration.referral_source,
            terms_accepted: registration.terms_accepted,
            registered_at: Utc::now(),
            origin_address: registration.origin_address.clone(),
        };
        state.entries.push(entry.clone());
        Ok(entry)
    }

    async fn count(&self) -> Result<u64, EntryPersistenceError> {
        let state = self.state.lock().expect("repository state lock");
        Ok(state.entries.len() as u64)
    }

    async fn count_up_to(&self, id: i32) -> Result<u64, EntryPersistenceError> {
        let state = self.state.lock().expect("repository state lock");
        Ok(state.entries.iter().filter(|entry| entry.id <= id).count() as u64)
    }

    async fn list(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WaitlistEntry>, EntryPersistenceError> {
        let state = self.state.lock().expect("repository state lock");
        let mut entries = state.entries.clone();
        // Newest first; ids break ties the way the serial column would.
        entries.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then(b.id.cmp(&a.id))
        });
        Ok(entries
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let state = self.state.lock().expect("repository state lock");
        Ok(state.entries.iter().find(|entry| entry.id == id).cloned())
    }

    async fn get_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let state = self.state.lock().expect("repository state lock");
        Ok(state
            .entries
            .iter()
            .find(|entry| entry.email == email)
            .cloned())
    }

    async fn delete_by_id(
        &self,
        id: i32,
    ) -> Result<Option<WaitlistEntry>, EntryPersistenceError> {
        let mut state = self.state.lock().expect("repository state lock");
        let index = state.entries.iter().position(|entry| entry.id == id);
        Ok(index.map(|index| state.entries.remove(index)))
    }
}
