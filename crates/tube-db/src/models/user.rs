//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub is_deaf: bool,
    pub sign_language: String,
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}
