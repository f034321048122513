//! Video database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for videos table
#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub thumbnail: Option<String>,
    pub caption_file: Option<String>,
    pub category: String,
    pub tags: String,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub duration: i32,
    pub has_sign_language: bool,
    pub created_at: DateTime<Utc>,
}

/// Video row joined with the owner's public fields
#[derive(Debug, Clone, FromRow)]
pub struct VideoWithOwnerModel {
    #[sqlx(flatten)]
    pub video: VideoModel,
    pub username: String,
    pub owner_avatar: Option<String>,
    pub owner_subscribers: i64,
}
