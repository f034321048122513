//! User service
//!
//! Handles public profiles and profile edits.

use tube_core::entities::ProfileUpdate;
use tube_core::value_objects::BlobCategory;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{MessageResponse, PublicUserResponse, UpdateProfileRequest, UploadedFile};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a channel's public profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Uuid) -> ServiceResult<PublicUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        Ok(PublicUserResponse::from(&user))
    }

    /// Apply a partial profile edit, storing a new avatar if one was sent
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> ServiceResult<MessageResponse> {
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let avatar = match &request.avatar {
            Some(file) => Some(self.store_avatar(file).await?),
            None => None,
        };

        let update = ProfileUpdate {
            bio: request.bio.map(|b| b.trim().to_string()),
            sign_language: request.sign_language.map(|s| s.trim().to_string()),
            is_deaf: request.is_deaf,
            avatar: avatar.clone(),
        };

        if update.is_empty() {
            return Ok(MessageResponse::new("Profile updated"));
        }

        if let Err(e) = self.ctx.user_repo().update_profile(user_id, &update).await {
            if let Some(avatar) = &avatar {
                self.discard_avatar(avatar).await;
            }
            return Err(e.into());
        }

        // The replaced avatar is no longer referenced
        if let (Some(_), Some(old)) = (&avatar, &user.avatar) {
            self.discard_avatar(old).await;
        }

        info!(user_id = %user_id, "User profile updated");
        Ok(MessageResponse::new("Profile updated"))
    }

    async fn store_avatar(&self, file: &UploadedFile) -> ServiceResult<String> {
        let limit = self.ctx.limits().max_image_bytes;
        if file.is_empty() {
            return Err(ServiceError::validation("Avatar file is empty"));
        }
        if file.len() > limit {
            return Err(ServiceError::PayloadTooLarge(format!(
                "Avatar exceeds {} MB",
                limit / (1024 * 1024)
            )));
        }
        Ok(self
            .ctx
            .blob_store()
            .store(BlobCategory::Avatar, &file.file_name, &file.bytes)
            .await?)
    }

    async fn discard_avatar(&self, filename: &str) {
        if let Err(e) = self.ctx.blob_store().remove(BlobCategory::Avatar, filename).await {
            warn!(filename, error = %e, "Failed to remove avatar");
        }
    }
}
