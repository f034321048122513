//! Audit row -> CounterAudit

use tube_core::value_objects::{CounterAudit, CounterCheck};
use uuid::Uuid;

use crate::models::{ChannelAuditModel, VideoAuditModel};

pub fn video_audit(video_id: Uuid, model: VideoAuditModel) -> CounterAudit {
    CounterAudit::Video {
        video_id,
        likes: CounterCheck::new(model.stored_likes, model.counted_likes),
        dislikes: CounterCheck::new(model.stored_dislikes, model.counted_dislikes),
    }
}

pub fn channel_audit(channel_id: Uuid, model: ChannelAuditModel) -> CounterAudit {
    CounterAudit::Channel {
        channel_id,
        subscribers: CounterCheck::new(model.stored_subscribers, model.counted_subscribers),
    }
}
