/*
 * Responsibility
 * - Recipe / comment request and response DTOs
 * - Responses carry the encoded public id, never the internal bigint
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{comment_repo::CommentRow, recipe_repo::RecipeRow};
use crate::services::id_codec::{self, IdCodec};

pub const MAX_MEDIA: usize = 5;

fn check_steps(items: &[String], name: &'static str) -> Result<(), &'static str> {
    if items.is_empty() || items.iter().any(|s| s.trim().is_empty()) {
        return Err(name);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub media: Vec<String>,
}

impl CreateRecipeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        check_steps(&self.ingredients, "ingredients must be a non-empty list")?;
        check_steps(&self.instructions, "instructions must be a non-empty list")?;
        if self.media.len() > MAX_MEDIA {
            return Err("at most 5 media items are allowed");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub description: Option<String>,
    pub media: Option<Vec<String>>,
}

impl UpdateRecipeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(items) = &self.ingredients {
            check_steps(items, "ingredients must be a non-empty list")?;
        }
        if let Some(items) = &self.instructions {
            check_steps(items, "instructions must be a non-empty list")?;
        }
        if let Some(media) = &self.media
            && media.len() > MAX_MEDIA
        {
            return Err("at most 5 media items are allowed");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRecipesQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String, // encoded
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub description: Option<String>,
    pub media: Vec<String>,
    pub likes: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeResponse {
    pub fn from_row(codec: &IdCodec, row: RecipeRow) -> id_codec::Result<Self> {
        Ok(Self {
            id: codec.encode(row.recipe_id)?,
            title: row.title,
            ingredients: row.ingredients,
            instructions: row.instructions,
            description: row.description,
            media: row.media,
            likes: row.likes,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub recipe_id: String, // encoded
    pub user_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn from_row(codec: &IdCodec, row: CommentRow) -> id_codec::Result<Self> {
        Ok(Self {
            id: row.comment_id,
            recipe_id: codec.encode(row.recipe_id)?,
            user_id: row.user_id,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}
