//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audit;
mod comment;
mod user;
mod video;

pub use audit::{ChannelAuditModel, VideoAuditModel};
pub use comment::{CommentModel, CommentWithAuthorModel};
pub use user::UserModel;
pub use video::{VideoModel, VideoWithOwnerModel};
