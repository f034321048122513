//! Ports implemented by the infrastructure layer

mod repositories;
mod storage;

pub use repositories::{
    CommentRepository, FeedQuery, ReactionRepository, RepoResult, SubscriptionRepository,
    UserRepository, VideoRepository,
};
pub use storage::BlobStore;
