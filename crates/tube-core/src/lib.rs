//! # tube-core
//!
//! Domain layer containing entities, the engagement ledger rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, CommentWithAuthor, NewVideo, ProfileUpdate, Reaction, ReactionOutcome,
    ReactionTransition, RowChange, Subscription, SubscriptionOutcome, User, Video,
    VideoWithOwner, DEFAULT_CATEGORY, DEFAULT_SIGN_LANGUAGE,
};
pub use error::DomainError;
pub use traits::{
    BlobStore, CommentRepository, FeedQuery, ReactionRepository, RepoResult,
    SubscriptionRepository, UserRepository, VideoRepository,
};
pub use value_objects::{BlobCategory, CounterAudit, CounterCheck, ReactionKind};
