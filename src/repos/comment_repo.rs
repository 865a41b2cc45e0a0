/*
 * Responsibility
 * - comments on recipes (insert + list per recipe)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: i64,
    #[sqlx(rename = "recipeId")]
    pub recipe_id: i64,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub comment: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    pool: &PgPool,
    recipe_id: i64,
    user_id: Uuid,
    comment: &str,
) -> Result<CommentRow, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO comments ("recipeId", "userId", comment)
        VALUES ($1, $2, $3)
        RETURNING "commentId", "recipeId", "userId", comment, "createdAt"
        "#,
    )
    .bind(recipe_id)
    .bind(user_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_for_recipe(pool: &PgPool, recipe_id: i64) -> Result<Vec<CommentRow>, RepoError> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT "commentId", "recipeId", "userId", comment, "createdAt"
        FROM comments
        WHERE "recipeId" = $1
        ORDER BY "createdAt" ASC, "commentId" ASC
        "#,
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
