pub mod access_jwt;
pub mod error;
pub mod factory;
pub mod identity;
pub mod jwt;
pub mod password;

use std::sync::Arc;

use uuid::Uuid;

pub use error::AuthError;
pub use factory::build_auth_service;
pub use identity::{Identity, IdentityStore};

use access_jwt::TokenVerifier;
use jwt::{IssuedToken, JwtIssuer};

/// Verifies bearer tokens, resolves their subject and issues new tokens.
///
/// Holds no per-request state: the secret is fixed at construction and the
/// identity store is read on every call.
#[derive(Clone)]
pub struct AuthService {
    verifier: TokenVerifier,
    issuer: JwtIssuer,
    identities: Arc<dyn IdentityStore>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("verifier", &self.verifier)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(verifier: TokenVerifier, issuer: JwtIssuer, identities: Arc<dyn IdentityStore>) -> Self {
        Self {
            verifier,
            issuer,
            identities,
        }
    }

    /// Token Verifier: raw `Authorization` value -> subject id.
    pub fn verify(&self, raw_header: Option<&str>) -> Result<Uuid, AuthError> {
        self.verifier.verify(raw_header)
    }

    /// Identity Resolver: subject id -> identity record.
    pub async fn resolve(&self, subject: Uuid) -> Result<Identity, AuthError> {
        self.identities
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }

    /// Verify then resolve. Used by the access middleware.
    pub async fn authenticate(&self, raw_header: Option<&str>) -> Result<Identity, AuthError> {
        let subject = self.verify(raw_header)?;
        self.resolve(subject).await
    }

    pub fn issue_access_token(
        &self,
        user_id: Uuid,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        self.issuer.issue(user_id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use identity::testing::{InMemoryIdentityStore, UnavailableIdentityStore, identity};

    const SECRET: &[u8] = b"s1";

    fn service(store: Arc<dyn IdentityStore>) -> AuthService {
        AuthService::new(
            TokenVerifier::new(SECRET, 0),
            JwtIssuer::new(SECRET, 600),
            store,
        )
    }

    fn bearer(auth: &AuthService, user_id: Uuid) -> String {
        format!("Bearer {}", auth.issue_access_token(user_id).unwrap().token)
    }

    #[tokio::test]
    async fn resolves_existing_subject() {
        let alice = identity(Uuid::new_v4(), "alice");
        let auth = service(Arc::new(InMemoryIdentityStore::with([alice.clone()])));

        let header = bearer(&auth, alice.id);
        let resolved = auth.authenticate(Some(&header)).await.unwrap();
        assert_eq!(resolved, alice);
    }

    #[tokio::test]
    async fn unknown_subject_is_rejected() {
        let auth = service(Arc::new(InMemoryIdentityStore::default()));

        let header = bearer(&auth, Uuid::new_v4());
        let err = auth.authenticate(Some(&header)).await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownSubject));
    }

    #[tokio::test]
    async fn store_failure_is_reported_as_store_error() {
        let auth = service(Arc::new(UnavailableIdentityStore));

        let header = bearer(&auth, Uuid::new_v4());
        let err = auth.authenticate(Some(&header)).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
        assert_eq!(err.kind(), "store_failure");
    }

    #[tokio::test]
    async fn invalid_token_never_reaches_the_store() {
        let store = Arc::new(InMemoryIdentityStore::default());
        let auth = service(store.clone());

        let err = auth.authenticate(Some("Bearer forged")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential(_)));
        assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn same_token_resolves_same_identity_every_time() {
        let bob = identity(Uuid::new_v4(), "bob");
        let store = Arc::new(InMemoryIdentityStore::with([bob.clone()]));
        let auth = service(store.clone());
        let header = bearer(&auth, bob.id);

        for _ in 0..3 {
            assert_eq!(auth.authenticate(Some(&header)).await.unwrap(), bob);
        }
        // no caching: every request reads the store
        assert_eq!(store.lookups.load(Ordering::SeqCst), 3);
    }
}
