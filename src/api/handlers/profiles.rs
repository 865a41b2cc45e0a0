/*
 * Responsibility
 * - /profiles CRUD + search
 * - A profile belongs to exactly one user; only that user may change or delete it
 */
use axum::{Json, extract::State, http::StatusCode};
use uuid::Uuid;

use crate::{
    api::{
        dto::{
            ApiResponse,
            profiles::{
                CreateProfileRequest, ProfileResponse, SearchProfilesQuery, UpdateProfileRequest,
            },
        },
        extractors::{AuthCtxExtractor, JsonBody, PathParam, QueryParams},
        handlers::ensure_owner,
    },
    error::AppError,
    repos::{self, error::RepoError, profile_repo},
    state::AppState,
};

const MSG_NOT_FOUND: &str = "Profile not found";

pub async fn create_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = profile_repo::create(
        &state.db,
        ctx.user_id(),
        req.bio.trim(),
        req.first_name.trim(),
        req.last_name.trim(),
        &req.extra_fields(),
    )
    .await
    .map_err(|e| match e {
        RepoError::Conflict => AppError::Conflict("Profile already exists for this user"),
        other => other.into(),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Profile created successfully",
            row.into(),
        )),
    ))
}

pub async fn get_profile(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    let row = profile_repo::get_by_user(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound(MSG_NOT_FOUND))?;

    Ok(Json(ApiResponse::data(row.into())))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathParam(user_id): PathParam<Uuid>,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, AppError> {
    ensure_owner(&ctx, user_id)?;
    req.validate().map_err(AppError::bad_request)?;

    let row = profile_repo::update_by_user(&state.db, user_id, &req.fields())
        .await?
        .ok_or(AppError::NotFound(MSG_NOT_FOUND))?;

    Ok(Json(ApiResponse::with_message(
        "Profile updated successfully",
        row.into(),
    )))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    PathParam(user_id): PathParam<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    ensure_owner(&ctx, user_id)?;

    if !profile_repo::delete_by_user(&state.db, user_id).await? {
        return Err(AppError::NotFound(MSG_NOT_FOUND));
    }

    Ok(Json(ApiResponse::message("Profile deleted successfully")))
}

pub async fn search_profiles(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchProfilesQuery>,
) -> Result<Json<ApiResponse<Vec<ProfileResponse>>>, AppError> {
    let pattern = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(repos::contains_pattern)
    };
    let first = pattern(&query.first_name);
    let last = pattern(&query.last_name);

    let rows = profile_repo::search(&state.db, first.as_deref(), last.as_deref()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("Profile(s) not found"));
    }

    Ok(Json(ApiResponse::data(
        rows.into_iter().map(ProfileResponse::from).collect(),
    )))
}
