//! Reaction entity - a user's like or dislike on a video
//!
//! A (user, video) pair is in exactly one of three states: no reaction,
//! liked, or disliked. [`ReactionTransition::compute`] is the only place the
//! state machine is encoded; storage backends apply its row change and
//! counter deltas together.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::ReactionKind;

/// Reaction entity (one row of the likes ledger)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(user_id: Uuid, video_id: Uuid, kind: ReactionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            video_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// What happens to the ledger row for the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    /// No row existed, one is inserted with this kind
    Insert(ReactionKind),
    /// The existing row is removed
    Delete,
    /// The existing row flips to this kind
    Switch(ReactionKind),
}

impl RowChange {
    /// Status message reported to clients
    pub fn message(self) -> &'static str {
        match self {
            Self::Insert(_) => "Success",
            Self::Delete => "Removed",
            Self::Switch(_) => "Switched",
        }
    }
}

/// One step of the like/dislike state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionTransition {
    pub previous: Option<ReactionKind>,
    pub next: Option<ReactionKind>,
    pub row_change: RowChange,
    pub likes_delta: i64,
    pub dislikes_delta: i64,
}

impl ReactionTransition {
    /// Compute the transition for `requested` given the pair's current state
    pub fn compute(current: Option<ReactionKind>, requested: ReactionKind) -> Self {
        let (next, row_change) = match current {
            None => (Some(requested), RowChange::Insert(requested)),
            Some(existing) if existing == requested => (None, RowChange::Delete),
            Some(_) => (Some(requested), RowChange::Switch(requested)),
        };

        let mut likes_delta = 0;
        let mut dislikes_delta = 0;
        for (kind, delta) in [(current, -1), (next, 1)] {
            match kind {
                Some(ReactionKind::Like) => likes_delta += delta,
                Some(ReactionKind::Dislike) => dislikes_delta += delta,
                None => {}
            }
        }

        Self {
            previous: current,
            next,
            row_change,
            likes_delta,
            dislikes_delta,
        }
    }

    /// Apply the deltas to a pair of counters
    pub fn apply_to(&self, likes: i64, dislikes: i64) -> (i64, i64) {
        (likes + self.likes_delta, dislikes + self.dislikes_delta)
    }
}

/// Authoritative result of a reaction toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    /// Resulting state for the pair
    pub status: Option<ReactionKind>,
    /// Row change applied, `None` when the video does not exist
    pub change: Option<RowChange>,
    pub likes: i64,
    pub dislikes: i64,
}

impl ReactionOutcome {
    /// Outcome of a toggle on a video that does not exist
    pub fn unchanged() -> Self {
        Self {
            status: None,
            change: None,
            likes: 0,
            dislikes: 0,
        }
    }

    pub fn message(&self) -> &'static str {
        self.change.map_or("Unchanged", RowChange::message)
    }
}
