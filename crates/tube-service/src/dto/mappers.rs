//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use tube_core::entities::{CommentWithAuthor, ReactionOutcome, SubscriptionOutcome, User, VideoWithOwner};
use tube_core::value_objects::BlobCategory;

use super::responses::{
    CommentResponse, CurrentUserResponse, PublicUserResponse, ReactionResponse,
    SubscriptionResponse, VideoResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            avatar_url: user.avatar_url(),
            bio: user.bio.clone(),
            is_deaf: user.is_deaf,
            sign_language: user.sign_language.clone(),
            subscribers: user.subscribers,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            avatar_url: user.avatar_url(),
            bio: user.bio.clone(),
            is_deaf: user.is_deaf,
            sign_language: user.sign_language.clone(),
            subscribers: user.subscribers,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

impl From<VideoWithOwner> for VideoResponse {
    fn from(row: VideoWithOwner) -> Self {
        let VideoWithOwner {
            video,
            username,
            avatar,
            subscribers,
        } = row;
        let tag_list = video.tag_list().into_iter().map(str::to_string).collect();

        Self {
            id: video.id,
            user_id: video.user_id,
            video_url: BlobCategory::Video.public_path(&video.filename),
            thumbnail_url: video
                .thumbnail
                .as_deref()
                .map(|file| BlobCategory::Thumbnail.public_path(file)),
            caption_url: video
                .caption_file
                .as_deref()
                .map(|file| BlobCategory::Caption.public_path(file)),
            title: video.title,
            description: video.description,
            filename: video.filename,
            thumbnail: video.thumbnail,
            caption_file: video.caption_file,
            category: video.category,
            tags: video.tags,
            tag_list,
            views: video.views,
            likes: video.likes,
            dislikes: video.dislikes,
            duration: video.duration,
            has_sign_language: video.has_sign_language,
            created_at: video.created_at,
            username,
            avatar,
            subscribers,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<CommentWithAuthor> for CommentResponse {
    fn from(row: CommentWithAuthor) -> Self {
        let CommentWithAuthor {
            comment,
            username,
            avatar,
        } = row;

        Self {
            id: comment.id,
            video_id: comment.video_id,
            user_id: comment.user_id,
            content: comment.content,
            likes: comment.likes,
            created_at: comment.created_at,
            username,
            avatar,
        }
    }
}

// ============================================================================
// Engagement Mappers
// ============================================================================

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            message: outcome.message().to_string(),
            status: outcome.status,
            likes: outcome.likes,
            dislikes: outcome.dislikes,
        }
    }
}

impl From<SubscriptionOutcome> for SubscriptionResponse {
    fn from(outcome: SubscriptionOutcome) -> Self {
        Self {
            subscribed: outcome.subscribed,
            subscribers: outcome.subscribers,
        }
    }
}
