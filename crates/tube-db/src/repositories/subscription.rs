//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tube_core::entities::{Subscription, SubscriptionOutcome};
use tube_core::error::DomainError;
use tube_core::traits::{RepoResult, SubscriptionRepository};
use tube_core::value_objects::CounterAudit;

use crate::mappers::channel_audit;
use crate::models::ChannelAuditModel;

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> RepoResult<SubscriptionOutcome> {
        Subscription::ensure_distinct(subscriber_id, channel_id)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes toggles against the same counter. NO KEY UPDATE leaves the
        // KEY SHARE taken by foreign-key checks free, so X->Y and Y->X can't deadlock.
        let locked = sqlx::query_scalar::<_, Uuid>(
            r"
            SELECT id FROM users WHERE id = $1 FOR NO KEY UPDATE
            ",
        )
        .bind(channel_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if locked.is_none() {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::UserNotFound(channel_id));
        }

        let removed = sqlx::query(
            r"
            DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2
            ",
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        let subscribed = removed == 0;
        if subscribed {
            let subscription = Subscription::new(subscriber_id, channel_id)?;
            sqlx::query(
                r"
                INSERT INTO subscriptions (id, subscriber_id, channel_id, created_at)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(subscription.id)
            .bind(subscription.subscriber_id)
            .bind(subscription.channel_id)
            .bind(subscription.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(subscriber_id)))?;
        }

        let subscribers = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE users SET subscribers = subscribers + $2 WHERE id = $1 RETURNING subscribers
            ",
        )
        .bind(channel_id)
        .bind(SubscriptionOutcome::delta(subscribed))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(SubscriptionOutcome {
            subscribed,
            subscribers,
        })
    }

    #[instrument(skip(self))]
    async fn is_subscribed(&self, subscriber_id: Uuid, channel_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2
            )
            ",
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn audit(&self, channel_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        let row = sqlx::query_as::<_, ChannelAuditModel>(
            r"
            SELECT u.subscribers AS stored_subscribers,
                   (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS counted_subscribers
            FROM users u
            WHERE u.id = $1
            ",
        )
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|model| channel_audit(channel_id, model)))
    }
}
