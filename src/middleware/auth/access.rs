//! Access gate: bearer token -> identity -> AuthCtx in request extensions.
//!
//! Steps, each short-circuiting with a rejection:
//! - Token Verifier: `Authorization: Bearer <jwt>` signature + `exp`, yields the subject
//! - Identity Resolver: subject -> users row (absent = 401, not 404)
//! - Binder: `AuthCtx` goes into extensions, then the handler runs
//!
//! Nothing is cached between requests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, AuthService};

/// Put every route registered on `router` so far behind the access gate.
///
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.auth.clone());
/// ```
pub fn apply<S>(router: Router<S>, auth: Arc<AuthService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // from_fn_with_state keeps the gate independent of AppState;
    // route_layer so unknown paths still answer 404 rather than 401
    router.route_layer(middleware::from_fn_with_state(auth, access_middleware))
}

async fn access_middleware(
    State(auth): State<Arc<AuthService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Non-UTF-8 header values count as a malformed header.
    let raw_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let identity = match auth.authenticate(raw_header.as_deref()).await {
        Ok(identity) => identity,
        Err(err) => {
            log_rejection(&err, req.uri().path());
            return Err(err.into());
        }
    };

    tracing::debug!(user_id = %identity.id, "request authenticated");

    // middleware -> extractor handoff
    req.extensions_mut().insert(AuthCtx::new(identity));

    Ok(next.run(req).await)
}

fn log_rejection(err: &AuthError, path: &str) {
    match err {
        AuthError::Store(e) => {
            tracing::error!(error = %e, path, "identity store failure during authentication")
        }
        AuthError::InvalidCredential(e) => {
            tracing::warn!(kind = err.kind(), error = %e, path, "authentication rejected")
        }
        _ => tracing::warn!(kind = err.kind(), path, "authentication rejected"),
    }
}
