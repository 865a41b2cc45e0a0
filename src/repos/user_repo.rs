/*
 * Responsibility
 * - SQLx operations for the users table
 * - Point lookups for the auth gate and login, insert for registration
 * - Unique violations (username/email) surface as RepoError::Conflict
 */
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
    #[sqlx(rename = "profilePicture")]
    pub profile_picture: String,
    #[sqlx(rename = "socialHandles")]
    pub social_handles: Json<HashMap<String, String>>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub profile_picture: &'a str,
    pub social_handles: &'a HashMap<String, String>,
}

pub async fn create(db: &PgPool, user: NewUser<'_>) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, email, "passwordHash", "profilePicture", "socialHandles")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING "userId", username, email, "passwordHash", "profilePicture",
                  "socialHandles", "createdAt"
        "#,
    )
    .bind(user.username)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.profile_picture)
    .bind(Json(user.social_handles))
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", username, email, "passwordHash", "profilePicture",
               "socialHandles", "createdAt"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", username, email, "passwordHash", "profilePicture",
               "socialHandles", "createdAt"
        FROM users
        WHERE lower(email) = lower($1)
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
