use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::auth::access_jwt::AccessJwtError;

/// Why the gate rejected a request.
///
/// `Store` is an outage, not an authentication failure; it maps to 500.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing or malformed bearer credential")]
    MissingCredential,
    #[error("invalid credential: {0}")]
    InvalidCredential(#[source] AccessJwtError),
    #[error("token subject has no identity record")]
    UnknownSubject,
    #[error("identity store failure: {0}")]
    Store(#[from] RepoError),
}

impl AuthError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidCredential(_) => "invalid_credential",
            AuthError::UnknownSubject => "unknown_subject",
            AuthError::Store(_) => "store_failure",
        }
    }
}
