use thiserror::Error;

use crate::config::USER_CREDENTIALS;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect username or password. Please try again.")]
    InvalidCredentials,
}

/// Check a login against a credential table.
pub fn verify(credentials: &[(&str, &str)], username: &str, password: &str) -> Result<(), AuthError> {
    credentials
        .iter()
        .any(|(user, pass)| *user == username && *pass == password)
        .then_some(())
        .ok_or(AuthError::InvalidCredentials)
}

/// Check a login against the built-in accounts.
pub fn authenticate(username: &str, password: &str) -> Result<(), AuthError> {
    verify(USER_CREDENTIALS, username.trim(), password)
}
