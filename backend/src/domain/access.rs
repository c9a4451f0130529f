//! Shared-secret access control.
//!
//! One static API key gates every administrative and registration endpoint,
//! and a single admin username/password pair exchanges for that key. No
//! sessions, hashing, or expiry: the credential is valid until the process
//! is reconfigured. Construct the guard once at startup from [`AppConfig`]
//! values and share it by reference; handlers never read ambient state.
//!
//! [`AppConfig`]: crate::server::AppConfig

use zeroize::Zeroizing;

use super::error::{Error, FieldViolation};

/// Minimum admin username length accepted by the login endpoint.
const USERNAME_MIN: usize = 3;
/// Minimum admin password length accepted by the login endpoint.
const PASSWORD_MIN: usize = 4;

/// Configured administrator credentials.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl AdminCredentials {
    /// Build credentials from configured values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

/// Stateless gate comparing presented credentials against configured secrets.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    api_key: String,
    admin: AdminCredentials,
}

impl AccessGuard {
    /// Build a guard around the configured API key and admin credentials.
    pub fn new(api_key: impl Into<String>, admin: AdminCredentials) -> Self {
        Self {
            api_key: api_key.into(),
            admin,
        }
    }

    /// Check a presented API key against the configured secret.
    pub fn authenticate(&self, presented: &str) -> Result<(), Error> {
        if presented == self.api_key {
            Ok(())
        } else {
            Err(Error::unauthorized("Invalid or missing API key"))
        }
    }

    /// Exchange admin credentials for the shared API key.
    ///
    /// Under-length fields are request-validation failures (the login form
    /// never submits them), reported together; only well-formed credentials
    /// are compared against the configured pair.
    pub fn admin_login(&self, username: &str, password: &str) -> Result<&str, Error> {
        let mut violations = Vec::new();
        if username.trim().chars().count() < USERNAME_MIN {
            violations.push(FieldViolation::new(
                "username",
                format!("username must have at least {USERNAME_MIN} characters"),
            ));
        }
        if password.chars().count() < PASSWORD_MIN {
            violations.push(FieldViolation::new(
                "password",
                format!("password must have at least {PASSWORD_MIN} characters"),
            ));
        }
        if !violations.is_empty() {
            return Err(Error::validation_failed(violations));
        }

        if username == self.admin.username && password == self.admin.password.as_str() {
            Ok(self.api_key.as_str())
        } else {
            Err(Error::unauthorized("Incorrect username or password"))
        }
    }

    /// The configured shared secret.
    pub fn api_key(&self) -> &str {
        self.api_key.as_str()
    }
}
