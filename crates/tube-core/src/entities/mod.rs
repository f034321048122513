//! Domain entities - core business objects

mod comment;
mod reaction;
mod subscription;
mod user;
mod video;

pub use comment::{Comment, CommentWithAuthor};
pub use reaction::{Reaction, ReactionOutcome, ReactionTransition, RowChange};
pub use subscription::{Subscription, SubscriptionOutcome};
pub use user::{ProfileUpdate, User, DEFAULT_SIGN_LANGUAGE};
pub use video::{NewVideo, Video, VideoWithOwner, DEFAULT_CATEGORY};
