//! Request DTOs for API endpoints
//!
//! JSON request DTOs implement `Deserialize` and `Validate`. Multipart forms are
//! assembled by the API layer into the plain structs at the bottom of this file.

use std::borrow::Cow;

use serde::Deserialize;
use tube_core::error::DomainError;
use tube_core::traits::FeedQuery;
use tube_core::value_objects::ReactionKind;
use validator::{Validate, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[validate(length(max = 32, message = "Sign language must be at most 32 characters"))]
    pub sign_language: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Email and password required"))]
    pub password: String,
}

// ============================================================================
// Engagement Requests
// ============================================================================

/// Like or dislike toggle
///
/// `type` stays a string on the wire so an unknown kind is reported as
/// `Invalid reaction type: <kind>` instead of a JSON decoding error.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_reaction_kind"))]
    pub kind: String,
}

impl ReactRequest {
    /// The requested kind; only fails when the request skipped validation
    pub fn reaction_kind(&self) -> Result<ReactionKind, DomainError> {
        self.kind.parse()
    }
}

fn validate_reaction_kind(kind: &str) -> Result<(), ValidationError> {
    kind.parse::<ReactionKind>().map(|_| ()).map_err(|e| {
        ValidationError::new("reaction_kind").with_message(Cow::Owned(e.to_string()))
    })
}

/// New comment on a video
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Comment content required"))]
    pub content: String,
}

// ============================================================================
// Feed Query
// ============================================================================

/// Raw `?category&search&page&limit` parameters of the feed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<FeedParams> for FeedQuery {
    fn from(params: FeedParams) -> Self {
        FeedQuery::new(params.category, params.search, params.page, params.limit)
    }
}

// ============================================================================
// Multipart Requests
// ============================================================================

/// One file part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, used only for its extension
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Video upload form
#[derive(Debug, Clone, Default)]
pub struct UploadVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub has_sign_language: bool,
    pub video: Option<UploadedFile>,
    pub thumbnail: Option<UploadedFile>,
    pub caption: Option<UploadedFile>,
}

/// Profile edit form; absent fields are left unchanged
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Sign language must be 1-32 characters"))]
    pub sign_language: Option<String>,

    pub is_deaf: Option<bool>,

    pub avatar: Option<UploadedFile>,
}
