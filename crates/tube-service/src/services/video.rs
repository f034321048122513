//! Video service
//!
//! Handles the browsing feed, single-video fetches, uploads, and deletion.

use tube_core::entities::{NewVideo, Video};
use tube_core::error::DomainError;
use tube_core::traits::FeedQuery;
use tube_core::value_objects::BlobCategory;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::dto::{MessageResponse, UploadResponse, UploadVideoRequest, UploadedFile, VideoResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const MAX_TITLE_LENGTH: usize = 200;

/// Video service
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    /// Create a new VideoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest-first feed with optional category and search filters
    #[instrument(skip(self))]
    pub async fn feed(&self, query: FeedQuery) -> ServiceResult<Vec<VideoResponse>> {
        let videos = self.ctx.video_repo().feed(&query).await?;
        Ok(videos.into_iter().map(VideoResponse::from).collect())
    }

    /// Fetch one video, counting the fetch as a view
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: Uuid) -> ServiceResult<VideoResponse> {
        let mut video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video"))?;

        // Every fetch is a view, repeat viewers included
        video.video.views = self
            .ctx
            .video_repo()
            .record_view(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video"))?;

        debug!(video_id = %video_id, views = video.video.views, "View recorded");
        Ok(VideoResponse::from(video))
    }

    /// All videos uploaded by one channel, newest first
    #[instrument(skip(self))]
    pub async fn videos_by_user(&self, user_id: Uuid) -> ServiceResult<Vec<VideoResponse>> {
        let videos = self.ctx.video_repo().find_by_user(user_id).await?;
        Ok(videos.into_iter().map(VideoResponse::from).collect())
    }

    /// Store the uploaded files and create the video record
    #[instrument(skip(self, request))]
    pub async fn upload(
        &self,
        owner_id: Uuid,
        request: UploadVideoRequest,
    ) -> ServiceResult<UploadResponse> {
        let video_file = request
            .video
            .as_ref()
            .ok_or_else(|| ServiceError::validation("Video file required"))?;
        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::validation("Title required"))?
            .to_string();
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ServiceError::validation(format!(
                "Title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }

        let limits = self.ctx.limits();
        check_size(video_file, limits.max_video_bytes, "Video file")?;
        for (file, label) in [
            (&request.thumbnail, "Thumbnail"),
            (&request.caption, "Caption file"),
        ] {
            if let Some(file) = file {
                check_size(file, limits.max_image_bytes, label)?;
            }
        }

        let mut stored = Vec::new();
        let result = self
            .store_and_create(owner_id, title, video_file, &request, &mut stored)
            .await;

        match result {
            Ok(video) => {
                info!(video_id = %video.id, owner_id = %owner_id, "Video uploaded");
                Ok(UploadResponse {
                    id: video.id,
                    message: "Video uploaded successfully".to_string(),
                })
            }
            Err(e) => {
                for (category, filename) in &stored {
                    self.discard_blob(*category, filename).await;
                }
                Err(e)
            }
        }
    }

    async fn store_and_create(
        &self,
        owner_id: Uuid,
        title: String,
        video_file: &UploadedFile,
        request: &UploadVideoRequest,
        stored: &mut Vec<(BlobCategory, String)>,
    ) -> ServiceResult<Video> {
        let filename = self.store_blob(BlobCategory::Video, video_file, stored).await?;
        let thumbnail = match &request.thumbnail {
            Some(file) => Some(self.store_blob(BlobCategory::Thumbnail, file, stored).await?),
            None => None,
        };
        let caption_file = match &request.caption {
            Some(file) => Some(self.store_blob(BlobCategory::Caption, file, stored).await?),
            None => None,
        };

        let video = Video::new(
            Uuid::new_v4(),
            NewVideo {
                user_id: owner_id,
                title,
                description: request.description.clone(),
                filename,
                thumbnail,
                caption_file,
                category: request.category.clone(),
                tags: request.tags.clone(),
                has_sign_language: request.has_sign_language,
            },
        );
        self.ctx.video_repo().create(&video).await?;
        Ok(video)
    }

    async fn store_blob(
        &self,
        category: BlobCategory,
        file: &UploadedFile,
        stored: &mut Vec<(BlobCategory, String)>,
    ) -> ServiceResult<String> {
        let filename = self
            .ctx
            .blob_store()
            .store(category, &file.file_name, &file.bytes)
            .await?;
        stored.push((category, filename.clone()));
        Ok(filename)
    }

    /// Delete a video owned by the requester
    ///
    /// Comments and reactions go with the row; stored files are removed afterwards.
    #[instrument(skip(self))]
    pub async fn delete_video(
        &self,
        video_id: Uuid,
        requester_id: Uuid,
    ) -> ServiceResult<MessageResponse> {
        let video = self
            .ctx
            .video_repo()
            .delete_owned(video_id, requester_id)
            .await?
            .ok_or(DomainError::NotFoundOrUnauthorized)?;

        for (category, filename) in video.blobs() {
            self.discard_blob(category, filename).await;
        }

        info!(video_id = %video_id, "Video deleted");
        Ok(MessageResponse::new("Deleted"))
    }

    async fn discard_blob(&self, category: BlobCategory, filename: &str) {
        if let Err(e) = self.ctx.blob_store().remove(category, filename).await {
            warn!(%category, filename, error = %e, "Failed to remove blob");
        }
    }
}

fn check_size(file: &UploadedFile, limit: usize, label: &str) -> ServiceResult<()> {
    if file.is_empty() {
        return Err(ServiceError::validation(format!("{label} is empty")));
    }
    if file.len() > limit {
        return Err(ServiceError::PayloadTooLarge(format!(
            "{label} exceeds {} MB",
            limit / (1024 * 1024)
        )));
    }
    Ok(())
}
