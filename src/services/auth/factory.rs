/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::auth::{
    AuthService,
    access_jwt::TokenVerifier,
    identity::PgIdentityStore,
    jwt::JwtIssuer,
};

pub fn build_auth_service(config: &Config, db: PgPool) -> Arc<AuthService> {
    let secret = config.jwt_secret.as_bytes();

    let verifier = TokenVerifier::new(secret, config.access_token_leeway_seconds);
    let issuer = JwtIssuer::new(secret, config.access_token_ttl_seconds);
    let identities = Arc::new(PgIdentityStore::new(db));

    Arc::new(AuthService::new(verifier, issuer, identities))
}
