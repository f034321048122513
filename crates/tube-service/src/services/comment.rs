//! Comment service
//!
//! Handles listing, posting, and deleting comments under a video.

use tube_core::entities::Comment;
use tube_core::error::DomainError;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CommentResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments of a video, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, video_id: Uuid) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_video(video_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Post a comment and return it joined with its author
    #[instrument(skip(self, content))]
    pub async fn post_comment(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        content: String,
    ) -> ServiceResult<CommentResponse> {
        let comment = Comment::new(video_id, user_id, &content)?;
        let created = self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, video_id = %video_id, user_id = %user_id, "Comment posted");
        Ok(CommentResponse::from(created))
    }

    /// Delete a comment; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<MessageResponse> {
        if !self
            .ctx
            .comment_repo()
            .delete_owned(comment_id, requester_id)
            .await?
        {
            return Err(DomainError::NotFoundOrUnauthorized.into());
        }

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(MessageResponse::new("Deleted"))
    }
}
