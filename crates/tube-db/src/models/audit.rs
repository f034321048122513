//! Counter audit rows

use sqlx::FromRow;

/// Stored video counters next to counted reaction rows
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VideoAuditModel {
    pub stored_likes: i64,
    pub counted_likes: i64,
    pub stored_dislikes: i64,
    pub counted_dislikes: i64,
}

/// Stored subscriber counter next to counted subscription rows
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ChannelAuditModel {
    pub stored_subscribers: i64,
    pub counted_subscribers: i64,
}
