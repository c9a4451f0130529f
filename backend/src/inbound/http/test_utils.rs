//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::domain::{AccessGuard, AdminCredentials, RegistrationService};
use crate::test_support::InMemoryEntryRepository;

use super::state::HttpState;

/// API key used by handler tests.
pub const TEST_API_KEY: &str = "launch-key";
/// Admin username used by handler tests.
pub const TEST_ADMIN_USERNAME: &str = "admin";
/// Admin password used by handler tests.
pub const TEST_ADMIN_PASSWORD: &str = "admin123";
/// Launch date echoed into welcome messages by handler tests.
pub const TEST_LAUNCH_DATE: &str = "2025-02-05";

/// Handler state over an empty in-memory repository.
pub fn test_state() -> HttpState {
    let repository = Arc::new(InMemoryEntryRepository::new());
    let service = Arc::new(RegistrationService::new(repository, TEST_LAUNCH_DATE));
    let guard = Arc::new(AccessGuard::new(
        TEST_API_KEY,
        AdminCredentials::new(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD),
    ));
    HttpState::new(service, guard)
}
