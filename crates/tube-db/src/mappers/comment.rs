//! Comment model -> entity mappers

use tube_core::entities::{Comment, CommentWithAuthor};

use crate::models::{CommentModel, CommentWithAuthorModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            video_id: model.video_id,
            user_id: model.user_id,
            content: model.content,
            likes: model.likes,
            created_at: model.created_at,
        }
    }
}

impl From<CommentWithAuthorModel> for CommentWithAuthor {
    fn from(model: CommentWithAuthorModel) -> Self {
        CommentWithAuthor {
            comment: model.comment.into(),
            username: model.username,
            avatar: model.author_avatar,
        }
    }
}
