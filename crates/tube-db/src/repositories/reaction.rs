//! PostgreSQL implementation of ReactionRepository
//!
//! A toggle locks the video row before reading the pair's reaction, so
//! concurrent toggles on one video run one after another and the ledger row
//! and both counters always change together. The lock is `FOR NO KEY UPDATE`
//! so foreign-key checks from new comments and likes on the video never wait
//! on it.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{debug, instrument};
use uuid::Uuid;

use tube_core::entities::{ReactionOutcome, ReactionTransition, RowChange};
use tube_core::traits::{ReactionRepository, RepoResult};
use tube_core::value_objects::{CounterAudit, ReactionKind};

use crate::mappers::video_audit;
use crate::models::VideoAuditModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn audit_video<'e, E>(executor: E, video_id: Uuid) -> RepoResult<Option<CounterAudit>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, VideoAuditModel>(
        r"
        SELECT v.likes AS stored_likes,
               v.dislikes AS stored_dislikes,
               COUNT(l.id) FILTER (WHERE l.kind = 'like') AS counted_likes,
               COUNT(l.id) FILTER (WHERE l.kind = 'dislike') AS counted_dislikes
        FROM videos v
        LEFT JOIN likes l ON l.video_id = v.id
        WHERE v.id = $1
        GROUP BY v.id
        ",
    )
    .bind(video_id)
    .fetch_optional(executor)
    .await
    .map_err(map_db_error)?;

    Ok(row.map(|model| video_audit(video_id, model)))
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        kind: ReactionKind,
    ) -> RepoResult<Option<ReactionOutcome>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM videos WHERE id = $1 FOR NO KEY UPDATE
            ",
        )
        .bind(video_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            debug!("Reaction on unknown video ignored");
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        let current = sqlx::query_scalar::<_, String>(
            r"
            SELECT kind FROM likes WHERE user_id = $1 AND video_id = $2
            ",
        )
        .bind(user_id)
        .bind(video_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(|raw| raw.parse::<ReactionKind>())
        .transpose()?;

        let transition = ReactionTransition::compute(current, kind);

        match transition.row_change {
            RowChange::Insert(next) => {
                sqlx::query(
                    r"
                    INSERT INTO likes (id, user_id, video_id, kind, created_at)
                    VALUES ($1, $2, $3, $4, NOW())
                    ",
                )
                .bind(Uuid::new_v4())
                .bind(user_id)
                .bind(video_id)
                .bind(next.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            RowChange::Delete => {
                sqlx::query(
                    r"
                    DELETE FROM likes WHERE user_id = $1 AND video_id = $2
                    ",
                )
                .bind(user_id)
                .bind(video_id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
            RowChange::Switch(next) => {
                sqlx::query(
                    r"
                    UPDATE likes SET kind = $3 WHERE user_id = $1 AND video_id = $2
                    ",
                )
                .bind(user_id)
                .bind(video_id)
                .bind(next.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        let (likes, dislikes) = sqlx::query_as::<_, (i64, i64)>(
            r"
            UPDATE videos
            SET likes = likes + $2, dislikes = dislikes + $3
            WHERE id = $1
            RETURNING likes, dislikes
            ",
        )
        .bind(video_id)
        .bind(transition.likes_delta)
        .bind(transition.dislikes_delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Some(ReactionOutcome {
            status: transition.next,
            change: Some(transition.row_change),
            likes,
            dislikes,
        }))
    }

    #[instrument(skip(self))]
    async fn status(&self, user_id: Uuid, video_id: Uuid) -> RepoResult<Option<ReactionKind>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT kind FROM likes WHERE user_id = $1 AND video_id = $2
            ",
        )
        .bind(user_id)
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(|raw| raw.parse()).transpose()
    }

    #[instrument(skip(self))]
    async fn audit(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        audit_video(&self.pool, video_id).await
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let updated = sqlx::query(
            r"
            UPDATE videos v
            SET likes = (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id AND l.kind = 'like'),
                dislikes = (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id AND l.kind = 'dislike')
            WHERE v.id = $1
            ",
        )
        .bind(video_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        let audit = audit_video(&mut *tx, video_id).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(audit)
    }
}
