//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tube_core::entities::{Video, VideoWithOwner};
use tube_core::traits::{FeedQuery, RepoResult, VideoRepository};

use crate::models::{VideoModel, VideoWithOwnerModel};

use super::error::map_db_error;

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    /// Create a new PgVideoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<VideoWithOwner>> {
        let result = sqlx::query_as::<_, VideoWithOwnerModel>(
            r"
            SELECT v.id, v.user_id, v.title, v.description, v.filename, v.thumbnail,
                   v.caption_file, v.category, v.tags, v.views, v.likes, v.dislikes,
                   v.duration, v.has_sign_language, v.created_at,
                   u.username, u.avatar AS owner_avatar, u.subscribers AS owner_subscribers
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(VideoWithOwner::from))
    }

    #[instrument(skip(self))]
    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<VideoWithOwner>> {
        // ILIKE escapes with backslash by default, matching FeedQuery::search_pattern
        let results = sqlx::query_as::<_, VideoWithOwnerModel>(
            r"
            SELECT v.id, v.user_id, v.title, v.description, v.filename, v.thumbnail,
                   v.caption_file, v.category, v.tags, v.views, v.likes, v.dislikes,
                   v.duration, v.has_sign_language, v.created_at,
                   u.username, u.avatar AS owner_avatar, u.subscribers AS owner_subscribers
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE ($1::TEXT IS NULL OR v.category = $1)
              AND ($2::TEXT IS NULL
                   OR v.title ILIKE $2
                   OR v.description ILIKE $2
                   OR v.tags ILIKE $2)
            ORDER BY v.created_at DESC, v.id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(&query.category)
        .bind(query.search_pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VideoWithOwner::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<VideoWithOwner>> {
        let results = sqlx::query_as::<_, VideoWithOwnerModel>(
            r"
            SELECT v.id, v.user_id, v.title, v.description, v.filename, v.thumbnail,
                   v.caption_file, v.category, v.tags, v.views, v.likes, v.dislikes,
                   v.duration, v.has_sign_language, v.created_at,
                   u.username, u.avatar AS owner_avatar, u.subscribers AS owner_subscribers
            FROM videos v
            JOIN users u ON u.id = v.user_id
            WHERE v.user_id = $1
            ORDER BY v.created_at DESC, v.id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(VideoWithOwner::from).collect())
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO videos (id, user_id, title, description, filename, thumbnail, caption_file,
                                category, tags, views, likes, dislikes, duration, has_sign_language,
                                created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(video.id)
        .bind(video.user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.filename)
        .bind(&video.thumbnail)
        .bind(&video.caption_file)
        .bind(&video.category)
        .bind(&video.tags)
        .bind(video.views)
        .bind(video.likes)
        .bind(video.dislikes)
        .bind(video.duration)
        .bind(video.has_sign_language)
        .bind(video.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<i64>> {
        let views = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING views
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(views)
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> RepoResult<Option<Video>> {
        // comments and likes go with the row through ON DELETE CASCADE
        let result = sqlx::query_as::<_, VideoModel>(
            r"
            DELETE FROM videos
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, filename, thumbnail, caption_file,
                      category, tags, views, likes, dislikes, duration, has_sign_language,
                      created_at
            ",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }
}
