//! Video model -> entity mappers

use tube_core::entities::{Video, VideoWithOwner};

use crate::models::{VideoModel, VideoWithOwnerModel};

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            filename: model.filename,
            thumbnail: model.thumbnail,
            caption_file: model.caption_file,
            category: model.category,
            tags: model.tags,
            views: model.views,
            likes: model.likes,
            dislikes: model.dislikes,
            duration: model.duration,
            has_sign_language: model.has_sign_language,
            created_at: model.created_at,
        }
    }
}

impl From<VideoWithOwnerModel> for VideoWithOwner {
    fn from(model: VideoWithOwnerModel) -> Self {
        VideoWithOwner {
            video: model.video.into(),
            username: model.username,
            avatar: model.owner_avatar,
            subscribers: model.owner_subscribers,
        }
    }
}
