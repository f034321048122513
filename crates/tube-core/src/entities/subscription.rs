//! Subscription entity - a user following a channel

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Subscription entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new Subscription, rejecting self-subscription
    pub fn new(subscriber_id: Uuid, channel_id: Uuid) -> Result<Self, DomainError> {
        Self::ensure_distinct(subscriber_id, channel_id)?;
        Ok(Self {
            id: Uuid::new_v4(),
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        })
    }

    /// A user may not subscribe to their own channel
    pub fn ensure_distinct(subscriber_id: Uuid, channel_id: Uuid) -> Result<(), DomainError> {
        if subscriber_id == channel_id {
            return Err(DomainError::SelfSubscription);
        }
        Ok(())
    }
}

/// Result of a subscription toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionOutcome {
    pub subscribed: bool,
    /// Channel subscriber count after the toggle
    pub subscribers: i64,
}

impl SubscriptionOutcome {
    /// Counter delta for a toggle that ends in `subscribed`
    #[inline]
    pub fn delta(subscribed: bool) -> i64 {
        if subscribed {
            1
        } else {
            -1
        }
    }
}
