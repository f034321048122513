//! Engagement service - the engagement ledger
//!
//! Like/dislike toggles, subscription toggles, and view counting. Each
//! mutation keeps a denormalized counter in step with the ledger rows it
//! summarizes; the audit helpers compare the two.

use tube_core::entities::{ReactionOutcome, Subscription};
use tube_core::value_objects::{CounterAudit, ReactionKind};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    LikeStatusResponse, ReactionResponse, SubscriptionResponse, SubscriptionStatusResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Engagement service
pub struct EngagementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EngagementService<'a> {
    /// Create a new EngagementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a like or dislike and return the resulting state and counters
    ///
    /// A video that does not exist is a no-op reported as `Unchanged`.
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionResponse> {
        let outcome = match self
            .ctx
            .reaction_repo()
            .toggle(user_id, video_id, kind)
            .await?
        {
            Some(outcome) => {
                info!(
                    video_id = %video_id,
                    user_id = %user_id,
                    status = ?outcome.status,
                    likes = outcome.likes,
                    dislikes = outcome.dislikes,
                    "Reaction toggled"
                );
                outcome
            }
            None => {
                warn!(video_id = %video_id, "Reaction on unknown video ignored");
                ReactionOutcome::unchanged()
            }
        };

        Ok(ReactionResponse::from(outcome))
    }

    /// The caller's current reaction on a video, if any
    #[instrument(skip(self))]
    pub async fn like_status(
        &self,
        user_id: Uuid,
        video_id: Uuid,
    ) -> ServiceResult<LikeStatusResponse> {
        let status = self.ctx.reaction_repo().status(user_id, video_id).await?;
        Ok(LikeStatusResponse { status })
    }

    /// Subscribe to a channel, or unsubscribe if already subscribed
    #[instrument(skip(self))]
    pub async fn toggle_subscription(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<SubscriptionResponse> {
        Subscription::ensure_distinct(subscriber_id, channel_id)?;

        let outcome = self
            .ctx
            .subscription_repo()
            .toggle(subscriber_id, channel_id)
            .await?;

        info!(
            subscriber_id = %subscriber_id,
            channel_id = %channel_id,
            subscribed = outcome.subscribed,
            subscribers = outcome.subscribers,
            "Subscription toggled"
        );
        Ok(SubscriptionResponse::from(outcome))
    }

    #[instrument(skip(self))]
    pub async fn subscription_status(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<SubscriptionStatusResponse> {
        let subscribed = self
            .ctx
            .subscription_repo()
            .is_subscribed(subscriber_id, channel_id)
            .await?;
        Ok(SubscriptionStatusResponse { subscribed })
    }

    /// Count one view; returns the new view count
    #[instrument(skip(self))]
    pub async fn record_view(&self, video_id: Uuid) -> ServiceResult<i64> {
        self.ctx
            .video_repo()
            .record_view(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video"))
    }

    /// Compare a video's like/dislike counters with its reaction rows
    #[instrument(skip(self))]
    pub async fn audit_video(&self, video_id: Uuid) -> ServiceResult<CounterAudit> {
        let audit = self
            .ctx
            .reaction_repo()
            .audit(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video"))?;
        log_drift(&audit);
        Ok(audit)
    }

    /// Compare a channel's subscriber counter with its subscription rows
    #[instrument(skip(self))]
    pub async fn audit_channel(&self, channel_id: Uuid) -> ServiceResult<CounterAudit> {
        let audit = self
            .ctx
            .subscription_repo()
            .audit(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        log_drift(&audit);
        Ok(audit)
    }

    /// Rewrite a video's counters from its reaction rows
    #[instrument(skip(self))]
    pub async fn reconcile_video(&self, video_id: Uuid) -> ServiceResult<CounterAudit> {
        let audit = self
            .ctx
            .reaction_repo()
            .reconcile(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video"))?;
        info!(video_id = %video_id, "Video counters reconciled");
        Ok(audit)
    }
}

fn log_drift(audit: &CounterAudit) {
    if !audit.is_consistent() {
        warn!(?audit, drifted = ?audit.drifted(), "Counter drift detected");
    }
}
