/*
 * Responsibility
 * - profiles CRUD keyed by the owning user's id (one profile per user)
 * - Substring search on first/last name
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    #[sqlx(rename = "profileId")]
    pub profile_id: Uuid,
    #[sqlx(rename = "userId")]
    pub user_id: Uuid,
    pub bio: String,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "twitterHandle")]
    pub twitter_handle: Option<String>,
    #[sqlx(rename = "instagramHandle")]
    pub instagram_handle: Option<String>,
    #[sqlx(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ProfileFields<'a> {
    pub bio: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub twitter_handle: Option<&'a str>,
    pub instagram_handle: Option<&'a str>,
    pub avatar_url: Option<&'a str>,
}

const COLUMNS: &str = r#""profileId", "userId", bio, "firstName", "lastName", "twitterHandle",
    "instagramHandle", "avatarUrl", "createdAt", "updatedAt""#;

pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    bio: &str,
    first_name: &str,
    last_name: &str,
    extra: &ProfileFields<'_>,
) -> Result<ProfileRow, RepoError> {
    let sql = format!(
        r#"
        INSERT INTO profiles ("userId", bio, "firstName", "lastName",
                              "twitterHandle", "instagramHandle", "avatarUrl")
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(user_id)
        .bind(bio)
        .bind(first_name)
        .bind(last_name)
        .bind(extra.twitter_handle)
        .bind(extra.instagram_handle)
        .bind(extra.avatar_url)
        .fetch_one(db)
        .await
        .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn get_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, RepoError> {
    let sql = format!(r#"SELECT {COLUMNS} FROM profiles WHERE "userId" = $1"#);

    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

/// Fields left as `None` keep their stored value.
pub async fn update_by_user(
    db: &PgPool,
    user_id: Uuid,
    fields: &ProfileFields<'_>,
) -> Result<Option<ProfileRow>, RepoError> {
    let sql = format!(
        r#"
        UPDATE profiles
        SET
            bio = COALESCE($2, bio),
            "firstName" = COALESCE($3, "firstName"),
            "lastName" = COALESCE($4, "lastName"),
            "twitterHandle" = COALESCE($5, "twitterHandle"),
            "instagramHandle" = COALESCE($6, "instagramHandle"),
            "avatarUrl" = COALESCE($7, "avatarUrl"),
            "updatedAt" = now()
        WHERE "userId" = $1
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(user_id)
        .bind(fields.bio)
        .bind(fields.first_name)
        .bind(fields.last_name)
        .bind(fields.twitter_handle)
        .bind(fields.instagram_handle)
        .bind(fields.avatar_url)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn delete_by_user(db: &PgPool, user_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM profiles
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// `None` patterns match everything; both given must both match.
pub async fn search(
    db: &PgPool,
    first_name_pattern: Option<&str>,
    last_name_pattern: Option<&str>,
) -> Result<Vec<ProfileRow>, RepoError> {
    let sql = format!(
        r#"
        SELECT {COLUMNS}
        FROM profiles
        WHERE ($1::text IS NULL OR "firstName" ILIKE $1)
          AND ($2::text IS NULL OR "lastName" ILIKE $2)
        ORDER BY "createdAt" DESC
        "#
    );

    let rows = sqlx::query_as::<_, ProfileRow>(&sql)
        .bind(first_name_pattern)
        .bind(last_name_pattern)
        .fetch_all(db)
        .await?;

    Ok(rows)
}
