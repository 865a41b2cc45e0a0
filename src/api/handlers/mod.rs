pub mod health;
pub mod profiles;
pub mod recipes;
pub mod users;

use uuid::Uuid;

use crate::api::extractors::AuthCtx;
use crate::error::AppError;

/// Ownership check for mutations. The bound identity is the only input
/// about who is calling; request bodies are never consulted.
pub(crate) fn ensure_owner(ctx: &AuthCtx, owner_id: Uuid) -> Result<(), AppError> {
    if ctx.owns(owner_id) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %ctx.user_id(),
        owner_id = %owner_id,
        "ownership check failed"
    );
    Err(AppError::Forbidden)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::identity::testing::identity;
    use axum::http::StatusCode;

    #[test]
    fn owner_passes_and_others_are_forbidden() {
        let ctx = AuthCtx::new(identity(Uuid::new_v4(), "dana"));

        assert!(ensure_owner(&ctx, ctx.user_id()).is_ok());

        let err = ensure_owner(&ctx, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
