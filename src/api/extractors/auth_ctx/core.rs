use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::{AppError, MSG_TOKEN_REQUIRED};

use super::AuthCtx;

/// Handler-side extractor for AuthCtx.
/// Assumes the access middleware already inserted AuthCtx into request extensions.
/// Missing context (route not behind the middleware) is answered with 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized(MSG_TOKEN_REQUIRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::identity::testing::identity;
    use axum::http::{Request, StatusCode};
    use uuid::Uuid;

    #[tokio::test]
    async fn reads_context_from_extensions() {
        let alice = identity(Uuid::new_v4(), "alice");
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut().insert(AuthCtx::new(alice.clone()));

        let (mut parts, _) = req.into_parts();
        let AuthCtxExtractor(ctx) = AuthCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(ctx.identity, alice);
        assert!(ctx.owns(alice.id));
        assert!(!ctx.owns(Uuid::new_v4()));
    }

    #[tokio::test]
    async fn missing_context_is_unauthorized() {
        let req = Request::builder().body(()).unwrap();
        let (mut parts, _) = req.into_parts();

        let err = AuthCtxExtractor::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
