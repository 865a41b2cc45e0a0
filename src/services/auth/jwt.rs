use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;
use uuid::Uuid;

use crate::services::auth::access_jwt::AccessTokenClaims;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct JwtIssuer {
    ttl_seconds: u64,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    /// `secret` is the same HMAC secret the verifier checks against.
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Issue an access token for `user_id`.
    pub fn issue(&self, user_id: Uuid) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = AccessTokenClaims {
            user_id: user_id.to_string(),
            exp: now + self.ttl_seconds,
            iat: Some(now),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            e
        })?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::access_jwt::TokenVerifier;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let issuer = JwtIssuer::new(b"shared", 300);
        let verifier = TokenVerifier::new(b"shared", 0);
        let user_id = Uuid::new_v4();

        let issued = issuer.issue(user_id).unwrap();
        assert_eq!(issued.expires_in, 300);

        let sub = verifier
            .verify(Some(&format!("Bearer {}", issued.token)))
            .unwrap();
        assert_eq!(sub, user_id);
    }
}
