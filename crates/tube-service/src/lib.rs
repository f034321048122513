//! # tube-service
//!
//! Application layer containing business logic, services, DTOs, and the local blob store.

pub mod dto;
pub mod services;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use dto::{
    AuthResponse, CommentResponse, CreateCommentRequest, CurrentUserResponse, FeedParams,
    HealthResponse, LikeStatusResponse, LoginRequest, MessageResponse, PublicUserResponse,
    ReactRequest, ReactionResponse, ReadinessResponse, RegisterRequest, SubscriptionResponse,
    SubscriptionStatusResponse, UpdateProfileRequest, UploadResponse, UploadVideoRequest,
    UploadedFile, VideoResponse,
};
pub use services::{
    AuthService, CommentService, EngagementService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, StorageLimits, UserService, VideoService,
};
pub use storage::LocalBlobStore;
