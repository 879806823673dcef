//! Roster authentication behind a swappable seam
//!
//! The plant runs a single shared passphrase over an email allowlist. That
//! is a placeholder gate, not a security boundary; the trait exists so a
//! real credential backend can replace it without touching callers.

use thiserror::Error;

use crate::entities::AuthorizedUser;

/// Default shared passphrase, overridable via config
pub const DEFAULT_PASSPHRASE: &str = "Gotmar123";

/// Authentication failures. Both are retryable form errors; the session is
/// left untouched on failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Нямате оторизиран достъп с този имейл.")]
    UnknownUser,

    #[error("Грешна парола.")]
    WrongPassphrase,
}

/// Credential check over an email + passphrase pair
pub trait Authenticator {
    fn authenticate(&self, email: &str, passphrase: &str)
        -> Result<AuthorizedUser, AuthError>;
}

/// Shared-secret authenticator: case-insensitive email lookup in the
/// roster, then a verbatim passphrase comparison.
pub struct SharedSecret<'a> {
    roster: &'a [AuthorizedUser],
    passphrase: &'a str,
}

impl<'a> SharedSecret<'a> {
    pub fn new(roster: &'a [AuthorizedUser], passphrase: &'a str) -> Self {
        Self { roster, passphrase }
    }
}

impl Authenticator for SharedSecret<'_> {
    fn authenticate(
        &self,
        email: &str,
        passphrase: &str,
    ) -> Result<AuthorizedUser, AuthError> {
        let user = self
            .roster
            .iter()
            .find(|u| u.matches_email(email))
            .ok_or(AuthError::UnknownUser)?;

        if passphrase != self.passphrase {
            return Err(AuthError::WrongPassphrase);
        }

        Ok(user.clone())
    }
}
