//! User entity - an account that uploads, watches, and subscribes

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::BlobCategory;

/// Sign language assumed when a user does not pick one
pub const DEFAULT_SIGN_LANGUAGE: &str = "ASL";

/// User entity; the user's channel is the user itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Stored avatar filename
    pub avatar: Option<String>,
    pub bio: String,
    pub is_deaf: bool,
    pub sign_language: String,
    /// Denormalized count of subscription rows targeting this user
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the registration defaults
    pub fn new(id: Uuid, username: String, email: String, sign_language: Option<String>) -> Self {
        Self {
            id,
            username,
            email,
            avatar: None,
            bio: String::new(),
            is_deaf: true,
            sign_language: sign_language
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SIGN_LANGUAGE.to_string()),
            subscribers: 0,
            created_at: Utc::now(),
        }
    }

    /// Public URL of the avatar, if one was uploaded
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_deref()
            .map(|file| BlobCategory::Avatar.public_path(file))
    }
}

/// Partial profile edit; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub sign_language: Option<String>,
    pub is_deaf: Option<bool>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.sign_language.is_none()
            && self.is_deaf.is_none()
            && self.avatar.is_none()
    }

    /// Apply the edit to a user in place
    pub fn apply(&self, user: &mut User) {
        if let Some(bio) = &self.bio {
            user.bio.clone_from(bio);
        }
        if let Some(sign_language) = &self.sign_language {
            user.sign_language.clone_from(sign_language);
        }
        if let Some(is_deaf) = self.is_deaf {
            user.is_deaf = is_deaf;
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
    }
}
