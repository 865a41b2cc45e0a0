/*
 * Responsibility
 * - recipes CRUD, likes and title search
 * - authorId references users (CASCADE); likes/comments cascade with the recipe
 * - `likes` is always derived from recipe_likes, never stored
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRow {
    #[sqlx(rename = "recipeId")]
    pub recipe_id: i64,

    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
    pub media: Vec<String>,
    pub likes: i64,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub ingredients: &'a [String],
    pub instructions: &'a [String],
    pub description: Option<&'a str>,
    pub media: &'a [String],
    pub author_id: Uuid,
}

#[derive(Debug, Default)]
pub struct RecipeChanges<'a> {
    pub title: Option<&'a str>,
    pub ingredients: Option<&'a [String]>,
    pub instructions: Option<&'a [String]>,
    pub description: Option<&'a str>,
    pub media: Option<&'a [String]>,
}

const SELECT_RECIPE: &str = r#"
    SELECT
        r."recipeId", r.title, r.ingredients, r.instructions, r.description, r.media,
        (SELECT COUNT(*) FROM recipe_likes l WHERE l."recipeId" = r."recipeId") AS likes,
        r."authorId", r."createdAt", r."updatedAt"
    FROM recipes r
"#;

pub async fn create(pool: &PgPool, recipe: NewRecipe<'_>) -> Result<RecipeRow, RepoError> {
    let row = sqlx::query_as::<_, RecipeRow>(
        r#"
        INSERT INTO recipes (title, ingredients, instructions, description, media, "authorId")
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING
            "recipeId", title, ingredients, instructions, description, media,
            0::bigint AS likes, "authorId", "createdAt", "updatedAt"
        "#,
    )
    .bind(recipe.title)
    .bind(recipe.ingredients)
    .bind(recipe.instructions)
    .bind(recipe.description)
    .bind(recipe.media)
    .bind(recipe.author_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(pool: &PgPool, recipe_id: i64) -> Result<Option<RecipeRow>, RepoError> {
    let sql = format!(r#"{SELECT_RECIPE} WHERE r."recipeId" = $1"#);

    let row = sqlx::query_as::<_, RecipeRow>(&sql)
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    recipe_id: i64,
    changes: &RecipeChanges<'_>,
) -> Result<Option<RecipeRow>, RepoError> {
    let row = sqlx::query_as::<_, RecipeRow>(
        r#"
        UPDATE recipes r
        SET
            title = COALESCE($2, r.title),
            ingredients = COALESCE($3, r.ingredients),
            instructions = COALESCE($4, r.instructions),
            description = COALESCE($5, r.description),
            media = COALESCE($6, r.media),
            "updatedAt" = now()
        WHERE r."recipeId" = $1
        RETURNING
            r."recipeId", r.title, r.ingredients, r.instructions, r.description, r.media,
            (SELECT COUNT(*) FROM recipe_likes l WHERE l."recipeId" = r."recipeId") AS likes,
            r."authorId", r."createdAt", r."updatedAt"
        "#,
    )
    .bind(recipe_id)
    .bind(changes.title)
    .bind(changes.ingredients)
    .bind(changes.instructions)
    .bind(changes.description)
    .bind(changes.media)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, recipe_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM recipes
        WHERE "recipeId" = $1
        "#,
    )
    .bind(recipe_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns `false` when `user_id` already liked the recipe.
pub async fn like(pool: &PgPool, recipe_id: i64, user_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        INSERT INTO recipe_likes ("recipeId", "userId")
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(recipe_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn search_by_title(pool: &PgPool, pattern: &str) -> Result<Vec<RecipeRow>, RepoError> {
    let sql = format!(
        r#"{SELECT_RECIPE} WHERE r.title ILIKE $1 ORDER BY r."recipeId" DESC LIMIT 100"#
    );

    let rows = sqlx::query_as::<_, RecipeRow>(&sql)
        .bind(pattern)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
