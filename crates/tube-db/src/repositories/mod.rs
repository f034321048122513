//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in tube-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod reaction;
mod subscription;
mod user;
mod video;

pub use comment::PgCommentRepository;
pub use reaction::PgReactionRepository;
pub use subscription::PgSubscriptionRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
