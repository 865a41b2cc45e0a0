/*
 * Responsibility
 * - The authenticated request context handlers see
 * - The access middleware builds it and stores it in request extensions; handlers only receive this type
 *
 * Notes
 * - Token verification and identity lookup belong to middleware/services
 * - Authorization (ownership) is still each handler's job, using `identity` as the only source of truth
 */
use uuid::Uuid;

use crate::services::auth::Identity;

/// Per-request context attached to authenticated requests.
///
/// `identity` is the record resolved from the token subject for this request;
/// it never outlives the request.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: Identity,
}

impl AuthCtx {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.identity.id == owner_id
    }
}
