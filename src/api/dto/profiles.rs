/*
 * Responsibility
 * - Profile request/response DTOs
 * - Social handle format checks (twitter <= 15, instagram <= 30 chars after '@')
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::profile_repo::{ProfileFields, ProfileRow};

const TWITTER_MAX: usize = 15;
const INSTAGRAM_MAX: usize = 30;

/// `@` followed by 1..=max ASCII letters, digits or underscores.
fn is_handle(raw: &str, max: usize) -> bool {
    match raw.strip_prefix('@') {
        Some(name) => {
            (1..=max).contains(&name.len())
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

fn check_handles(twitter: Option<&str>, instagram: Option<&str>) -> Result<(), &'static str> {
    if let Some(h) = twitter
        && !is_handle(h, TWITTER_MAX)
    {
        return Err("twitterHandle must look like @name (max 15 chars)");
    }
    if let Some(h) = instagram
        && !is_handle(h, INSTAGRAM_MAX)
    {
        return Err("instagramHandle must look like @name (max 30 chars)");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
    pub twitter_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub avatar_url: Option<String>,
}

impl CreateProfileRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.bio.trim().is_empty() {
            return Err("bio is required");
        }
        if self.first_name.trim().is_empty() {
            return Err("firstName is required");
        }
        if self.last_name.trim().is_empty() {
            return Err("lastName is required");
        }
        check_handles(
            self.twitter_handle.as_deref(),
            self.instagram_handle.as_deref(),
        )
    }

    pub fn extra_fields(&self) -> ProfileFields<'_> {
        ProfileFields {
            twitter_handle: self.twitter_handle.as_deref(),
            instagram_handle: self.instagram_handle.as_deref(),
            avatar_url: self.avatar_url.as_deref(),
            ..ProfileFields::default()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub twitter_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        for (value, err) in [
            (&self.bio, "bio cannot be empty"),
            (&self.first_name, "firstName cannot be empty"),
            (&self.last_name, "lastName cannot be empty"),
        ] {
            if let Some(v) = value
                && v.trim().is_empty()
            {
                return Err(err);
            }
        }
        check_handles(
            self.twitter_handle.as_deref(),
            self.instagram_handle.as_deref(),
        )
    }

    pub fn fields(&self) -> ProfileFields<'_> {
        ProfileFields {
            bio: self.bio.as_deref(),
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            twitter_handle: self.twitter_handle.as_deref(),
            instagram_handle: self.instagram_handle.as_deref(),
            avatar_url: self.avatar_url.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProfilesQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
    pub twitter_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.profile_id,
            user_id: row.user_id,
            bio: row.bio,
            first_name: row.first_name,
            last_name: row.last_name,
            twitter_handle: row.twitter_handle,
            instagram_handle: row.instagram_handle,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_rules() {
        assert!(is_handle("@chef_anna", TWITTER_MAX));
        assert!(is_handle("@a", TWITTER_MAX));
        assert!(!is_handle("chef", TWITTER_MAX));
        assert!(!is_handle("@", TWITTER_MAX));
        assert!(!is_handle("@has space", TWITTER_MAX));
        assert!(!is_handle("@sixteen_chars_xx", TWITTER_MAX));
        assert!(is_handle("@sixteen_chars_xx", INSTAGRAM_MAX));
    }

    #[test]
    fn create_requires_names_and_bio() {
        let req: CreateProfileRequest =
            serde_json::from_str(r#"{"bio":"Cooks","firstName":"","lastName":"Lee"}"#).unwrap();
        assert_eq!(req.validate(), Err("firstName is required"));
    }

    #[test]
    fn update_rejects_bad_handle_and_blank_fields() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"twitterHandle":"nope"}"#).unwrap();
        assert!(req.validate().is_err());

        let req: UpdateProfileRequest = serde_json::from_str(r#"{"bio":"  "}"#).unwrap();
        assert_eq!(req.validate(), Err("bio cannot be empty"));

        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"instagramHandle":"@cook_daily"}"#).unwrap();
        assert!(req.validate().is_ok());
    }
}
