//! Comment entity - text left by a user under a video

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const MAX_CONTENT_LENGTH: usize = 2000;

    /// Create a new Comment from raw user input
    pub fn new(video_id: Uuid, user_id: Uuid, content: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            video_id,
            user_id,
            content: Self::validate_content(content)?,
            likes: 0,
            created_at: Utc::now(),
        })
    }

    /// Trim and bound comment text
    pub fn validate_content(content: &str) -> Result<String, DomainError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(DomainError::ValidationError(
                "Comment content required".to_string(),
            ));
        }
        if content.chars().count() > Self::MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Self::MAX_CONTENT_LENGTH,
            });
        }
        Ok(content.to_string())
    }

    /// Only the author may delete a comment
    #[inline]
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Comment joined with the author's public identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub username: String,
    pub avatar: Option<String>,
}
