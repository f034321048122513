//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tube_core::entities::{Comment, CommentWithAuthor};
use tube_core::error::DomainError;
use tube_core::traits::{CommentRepository, RepoResult};

use crate::models::CommentWithAuthorModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_video(&self, video_id: Uuid) -> RepoResult<Vec<CommentWithAuthor>> {
        let results = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            SELECT c.id, c.video_id, c.user_id, c.content, c.likes, c.created_at,
                   u.username, u.avatar AS author_avatar
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.video_id = $1
            ORDER BY c.created_at DESC, c.id
            ",
        )
        .bind(video_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, video_id = %comment.video_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<CommentWithAuthor> {
        let video_id = comment.video_id;
        let result = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            WITH inserted AS (
                INSERT INTO comments (id, video_id, user_id, content, likes, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, video_id, user_id, content, likes, created_at
            )
            SELECT i.id, i.video_id, i.user_id, i.content, i.likes, i.created_at,
                   u.username, u.avatar AS author_avatar
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            ",
        )
        .bind(comment.id)
        .bind(comment.video_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .bind(comment.likes)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::VideoNotFound(video_id)))?;

        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(author_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
