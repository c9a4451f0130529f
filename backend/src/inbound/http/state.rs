//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they depend on
//! the domain service and guard only, never on ambient globals or the
//! persistence backend.

use std::sync::Arc;

use crate::domain::{AccessGuard, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub waitlist: Arc<RegistrationService>,
    pub guard: Arc<AccessGuard>,
    /// Version string reported by the health endpoint.
    pub version: &'static str,
}

impl HttpState {
    /// Construct handler state from the wired service and guard.
    pub fn new(waitlist: Arc<RegistrationService>, guard: Arc<AccessGuard>) -> Self {
        Self {
            waitlist,
            guard,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
