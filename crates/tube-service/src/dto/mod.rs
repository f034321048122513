//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, FeedParams, LoginRequest, ReactRequest, RegisterRequest,
    UpdateProfileRequest, UploadVideoRequest, UploadedFile,
};

pub use responses::{
    AuthResponse, CommentResponse, CurrentUserResponse, HealthChecks, HealthResponse,
    LikeStatusResponse, MessageResponse, PublicUserResponse, ReactionResponse,
    ReadinessResponse, SubscriptionResponse, SubscriptionStatusResponse, UploadResponse,
    VideoResponse,
};
