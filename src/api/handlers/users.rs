/*
 * Responsibility
 * - /users: register + login (public), me (behind the access gate)
 * - Issues access tokens; the gate only ever verifies them
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{
            ApiResponse,
            users::{LoginRequest, RegisterRequest, TokenResponse, UserResponse},
        },
        extractors::{AuthCtxExtractor, JsonBody},
    },
    error::AppError,
    repos::{error::RepoError, user_repo},
    services::auth::{Identity, password},
    state::AppState,
};

const MSG_BAD_LOGIN: &str = "Invalid email or password";

fn token_response(state: &AppState, identity: Identity) -> Result<TokenResponse, AppError> {
    let issued = state
        .auth
        .issue_access_token(identity.id)
        .map_err(|_| AppError::Internal)?;

    Ok(TokenResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_in: issued.expires_in,
        user: identity.into(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    // argon2 is CPU-bound; keep it off the async workers
    let plain = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|_| AppError::Internal)?
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::Internal
        })?;

    let row = user_repo::create(
        &state.db,
        user_repo::NewUser {
            username: req.username.trim(),
            email: req.email.trim(),
            password_hash: &password_hash,
            profile_picture: req.profile_picture.as_deref().unwrap_or(""),
            social_handles: &req.social_handles,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Conflict => AppError::Conflict("Username or email already in use"),
        other => other.into(),
    })?;

    let identity = Identity::from(row);
    tracing::info!(user_id = %identity.id, "user registered");

    let res = token_response(&state, identity)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User registered successfully", res)),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let identity = user_repo::find_by_email(&state.db, req.email.trim())
        .await?
        .map(Identity::from);

    // unknown emails still run one Argon2 verification
    let plain = req.password;
    let hash = identity.as_ref().map(|i| i.password_hash.clone());
    let ok = tokio::task::spawn_blocking(move || {
        password::verify_password_or_dummy(&plain, hash.as_deref())
    })
    .await
    .map_err(|_| AppError::Internal)?;

    let identity = match identity {
        Some(identity) if ok => identity,
        Some(identity) => {
            tracing::warn!(user_id = %identity.id, "login with wrong password");
            return Err(AppError::Unauthorized(MSG_BAD_LOGIN));
        }
        None => return Err(AppError::Unauthorized(MSG_BAD_LOGIN)),
    };

    let res = token_response(&state, identity)?;
    Ok(Json(ApiResponse::with_message("Login successful", res)))
}

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::data(ctx.identity.into()))
}
