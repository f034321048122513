//! Video entity - an uploaded video and its engagement counters

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::BlobCategory;

/// Category assigned when the uploader does not choose one
pub const DEFAULT_CATEGORY: &str = "General";

/// Video entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Stored video filename
    pub filename: String,
    pub thumbnail: Option<String>,
    pub caption_file: Option<String>,
    pub category: String,
    /// Comma-joined tags
    pub tags: String,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub duration: i32,
    pub has_sign_language: bool,
    pub created_at: DateTime<Utc>,
}

/// Metadata and stored files for a new upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub thumbnail: Option<String>,
    pub caption_file: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub has_sign_language: bool,
}

impl Video {
    /// Build a fresh video record with zeroed counters
    pub fn new(id: Uuid, new: NewVideo) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            filename: new.filename,
            thumbnail: new.thumbnail,
            caption_file: new.caption_file,
            category: new
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: new.tags.unwrap_or_default(),
            views: 0,
            likes: 0,
            dislikes: 0,
            duration: 0,
            has_sign_language: new.has_sign_language,
            created_at: Utc::now(),
        }
    }

    /// Split the comma-joined tag text into trimmed, non-empty tags
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Every stored blob this video references
    pub fn blobs(&self) -> Vec<(BlobCategory, &str)> {
        let mut blobs = vec![(BlobCategory::Video, self.filename.as_str())];
        if let Some(thumbnail) = &self.thumbnail {
            blobs.push((BlobCategory::Thumbnail, thumbnail.as_str()));
        }
        if let Some(caption) = &self.caption_file {
            blobs.push((BlobCategory::Caption, caption.as_str()));
        }
        blobs
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Video joined with the owner's public identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoWithOwner {
    pub video: Video,
    pub username: String,
    pub avatar: Option<String>,
    pub subscribers: i64,
}
