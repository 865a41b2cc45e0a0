/*
 * Responsibility
 * - /recipes CRUD, like, comment, title search
 * - Path recipe ids are public ids; the extractor decodes them to internal ids
 * - Only the author may update or delete a recipe
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::{
            ApiResponse,
            recipes::{
                CommentRequest, CommentResponse, CreateRecipeRequest, RecipeResponse,
                SearchRecipesQuery, UpdateRecipeRequest,
            },
        },
        extractors::{AuthCtx, AuthCtxExtractor, JsonBody, QueryParams, public_id::PublicRecipeId},
        handlers::ensure_owner,
    },
    error::AppError,
    repos::{self, comment_repo, recipe_repo},
    state::AppState,
};

const MSG_NOT_FOUND: &str = "Recipe not found";

fn to_response(state: &AppState, row: recipe_repo::RecipeRow) -> Result<RecipeResponse, AppError> {
    Ok(RecipeResponse::from_row(&state.id_codec, row)?)
}

/// Only the author may update or delete a recipe.
fn ensure_author(ctx: &AuthCtx, recipe: &recipe_repo::RecipeRow) -> Result<(), AppError> {
    ensure_owner(ctx, recipe.author_id)
}

async fn load(state: &AppState, recipe_id: i64) -> Result<recipe_repo::RecipeRow, AppError> {
    recipe_repo::get(&state.db, recipe_id)
        .await?
        .ok_or(AppError::NotFound(MSG_NOT_FOUND))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    JsonBody(req): JsonBody<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RecipeResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = recipe_repo::create(
        &state.db,
        recipe_repo::NewRecipe {
            title: req.title.trim(),
            ingredients: &req.ingredients,
            instructions: &req.instructions,
            description: req.description.as_deref(),
            media: &req.media,
            author_id: ctx.user_id(),
        },
    )
    .await?;

    tracing::info!(recipe_id = row.recipe_id, author_id = %ctx.user_id(), "recipe created");

    let res = to_response(&state, row)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Recipe created successfully", res)),
    ))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    recipe_id: PublicRecipeId,
) -> Result<Json<ApiResponse<RecipeResponse>>, AppError> {
    let row = load(&state, recipe_id.id).await?;
    Ok(Json(ApiResponse::data(to_response(&state, row)?)))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    recipe_id: PublicRecipeId,
    JsonBody(req): JsonBody<UpdateRecipeRequest>,
) -> Result<Json<ApiResponse<RecipeResponse>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let existing = load(&state, recipe_id.id).await?;
    ensure_author(&ctx, &existing)?;

    let changes = recipe_repo::RecipeChanges {
        title: req.title.as_deref().map(str::trim),
        ingredients: req.ingredients.as_deref(),
        instructions: req.instructions.as_deref(),
        description: req.description.as_deref(),
        media: req.media.as_deref(),
    };

    let row = recipe_repo::update(&state.db, recipe_id.id, &changes)
        .await?
        .ok_or(AppError::NotFound(MSG_NOT_FOUND))?;

    Ok(Json(ApiResponse::with_message(
        "Recipe updated successfully",
        to_response(&state, row)?,
    )))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    recipe_id: PublicRecipeId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let existing = load(&state, recipe_id.id).await?;
    ensure_author(&ctx, &existing)?;

    if !recipe_repo::delete(&state.db, recipe_id.id).await? {
        return Err(AppError::NotFound(MSG_NOT_FOUND));
    }

    tracing::info!(recipe_id = recipe_id.id, "recipe deleted");
    Ok(Json(ApiResponse::message("Recipe deleted successfully")))
}

pub async fn like_recipe(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    recipe_id: PublicRecipeId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    load(&state, recipe_id.id).await?;

    if !recipe_repo::like(&state.db, recipe_id.id, ctx.user_id()).await? {
        return Err(AppError::bad_request("You have already liked this recipe"));
    }

    Ok(Json(ApiResponse::message("Recipe liked successfully")))
}

pub async fn comment_recipe(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    recipe_id: PublicRecipeId,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), AppError> {
    let text = req.comment.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("comment is required"));
    }

    load(&state, recipe_id.id).await?;

    let row = comment_repo::create(&state.db, recipe_id.id, ctx.user_id(), text).await?;
    let res = CommentResponse::from_row(&state.id_codec, row)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Comment posted successfully", res)),
    ))
}

pub async fn list_comments(
    State(state): State<AppState>,
    recipe_id: PublicRecipeId,
) -> Result<Json<ApiResponse<Vec<CommentResponse>>>, AppError> {
    load(&state, recipe_id.id).await?;

    let rows = comment_repo::list_for_recipe(&state.db, recipe_id.id).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(CommentResponse::from_row(&state.id_codec, row)?);
    }
    Ok(Json(ApiResponse::data(res)))
}

pub async fn search_recipes(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchRecipesQuery>,
) -> Result<Json<ApiResponse<Vec<RecipeResponse>>>, AppError> {
    let title = query
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::bad_request("title query parameter is required"))?;

    let rows = recipe_repo::search_by_title(&state.db, &repos::contains_pattern(title)).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No recipes found"));
    }

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(to_response(&state, row)?);
    }
    Ok(Json(ApiResponse::data(res)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::services::auth::identity::testing::identity;

    fn recipe_by(author_id: Uuid) -> recipe_repo::RecipeRow {
        recipe_repo::RecipeRow {
            recipe_id: 7,
            title: "Shakshuka".to_string(),
            ingredients: vec!["eggs".to_string(), "tomatoes".to_string()],
            instructions: vec!["simmer".to_string()],
            description: None,
            media: Vec::new(),
            likes: 3,
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn author_may_change_their_recipe() {
        let ctx = AuthCtx::new(identity(Uuid::new_v4(), "erin"));
        assert!(ensure_author(&ctx, &recipe_by(ctx.user_id())).is_ok());
    }

    #[test]
    fn non_author_is_forbidden() {
        let ctx = AuthCtx::new(identity(Uuid::new_v4(), "frank"));
        let err = ensure_author(&ctx, &recipe_by(Uuid::new_v4())).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
