//! Identity records and the store the gate resolves them from.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::{error::RepoError, user_repo};

/// Durable user record. The gate only reads it.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: String,
    pub social_handles: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the password hash
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<user_repo::UserRow> for Identity {
    fn from(row: user_repo::UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            profile_picture: row.profile_picture,
            social_handles: row.social_handles.0,
            created_at: row.created_at,
        }
    }
}

/// Point lookup used by the gate.
///
/// - `Ok(None)` means "no such subject"; it must never auto-provision.
/// - `Err(_)` is a backend failure and is reported separately from auth failures.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, RepoError>;
}

/// PostgreSQL-backed identity store (users table).
#[derive(Clone, Debug)]
pub struct PgIdentityStore {
    db: PgPool,
}

impl PgIdentityStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, RepoError> {
        let row = user_repo::get(&self.db, id).await?;
        Ok(row.map(Identity::from))
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    pub fn identity(id: Uuid, username: &str) -> Identity {
        Identity {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$placeholder".to_string(),
            profile_picture: String::new(),
            social_handles: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// In-memory store that also counts lookups.
    #[derive(Default)]
    pub struct InMemoryIdentityStore {
        users: HashMap<Uuid, Identity>,
        pub lookups: AtomicUsize,
    }

    impl InMemoryIdentityStore {
        pub fn with(users: impl IntoIterator<Item = Identity>) -> Self {
            Self {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityStore for InMemoryIdentityStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, RepoError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.users.get(&id).cloned())
        }
    }

    /// Store whose backend is always down.
    pub struct UnavailableIdentityStore;

    #[async_trait]
    impl IdentityStore for UnavailableIdentityStore {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Identity>, RepoError> {
            Err(RepoError::Db(sqlx::Error::PoolTimedOut))
        }
    }
}
