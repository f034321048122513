//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Stored blob names
//! are exposed as-is alongside their public `/uploads/...` URLs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tube_core::value_objects::ReactionKind;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain `{message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token issued at register/login with the account summary
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Authenticated user's own account (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: String,
    pub is_deaf: bool,
    pub sign_language: String,
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}

/// Public channel profile
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: String,
    pub is_deaf: bool,
    pub sign_language: String,
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Video Responses
// ============================================================================

/// Video record joined with its owner
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub thumbnail: Option<String>,
    pub caption_file: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub caption_url: Option<String>,
    pub category: String,
    pub tags: String,
    pub tag_list: Vec<String>,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub duration: i32,
    pub has_sign_language: bool,
    pub created_at: DateTime<Utc>,
    /// Owner's username
    pub username: String,
    /// Owner's avatar filename
    pub avatar: Option<String>,
    /// Owner's subscriber count
    pub subscribers: i64,
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub message: String,
}

// ============================================================================
// Engagement Responses
// ============================================================================

/// Result of a like/dislike toggle, carrying the post-transition state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionResponse {
    pub message: String,
    pub status: Option<ReactionKind>,
    pub likes: i64,
    pub dislikes: i64,
}

/// Caller's current reaction on a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeStatusResponse {
    pub status: Option<ReactionKind>,
}

/// Result of a subscription toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionResponse {
    pub subscribed: bool,
    pub subscribers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionStatusResponse {
    pub subscribed: bool,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment joined with its author
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    /// Author's username
    pub username: String,
    /// Author's avatar filename
    pub avatar: Option<String>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health of each backing dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
