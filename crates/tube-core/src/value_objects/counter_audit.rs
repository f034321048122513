//! Counter audits - compare denormalized counters with the rows they summarize

use serde::Serialize;
use uuid::Uuid;

/// A stored counter next to the number of ledger rows it should equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterCheck {
    pub stored: i64,
    pub counted: i64,
}

impl CounterCheck {
    pub fn new(stored: i64, counted: i64) -> Self {
        Self { stored, counted }
    }

    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.stored == self.counted
    }

    /// Positive when the counter is ahead of the rows
    #[inline]
    pub fn drift(&self) -> i64 {
        self.stored - self.counted
    }
}

/// Audit result for one video or one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterAudit {
    Video {
        video_id: Uuid,
        likes: CounterCheck,
        dislikes: CounterCheck,
    },
    Channel {
        channel_id: Uuid,
        subscribers: CounterCheck,
    },
}

impl CounterAudit {
    /// Every stored counter equals its counted rows
    pub fn is_consistent(&self) -> bool {
        match self {
            Self::Video {
                likes, dislikes, ..
            } => likes.is_consistent() && dislikes.is_consistent(),
            Self::Channel { subscribers, .. } => subscribers.is_consistent(),
        }
    }

    /// Names of the counters that disagree with their rows
    pub fn drifted(&self) -> Vec<&'static str> {
        let checks: Vec<(&'static str, &CounterCheck)> = match self {
            Self::Video {
                likes, dislikes, ..
            } => vec![("likes", likes), ("dislikes", dislikes)],
            Self::Channel { subscribers, .. } => vec![("subscribers", subscribers)],
        };
        checks
            .into_iter()
            .filter(|(_, check)| !check.is_consistent())
            .map(|(name, _)| name)
            .collect()
    }
}
