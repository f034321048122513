//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod engagement;
pub mod error;
pub mod user;
pub mod video;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder, StorageLimits};
pub use engagement::EngagementService;
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
pub use video::VideoService;
