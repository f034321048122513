//! Video handlers
//!
//! Feed, playback (which records a view), upload, deletion, and reactions.

use axum::{extract::State, Json};
use tube_service::{
    EngagementService, LikeStatusResponse, MessageResponse, ReactRequest, ReactionResponse,
    UploadResponse, VideoResponse, VideoService,
};

use crate::extractors::{AuthUser, FeedFilter, IdPath, ValidatedJson, VideoUploadForm};
use crate::response::ApiResult;
use crate::state::AppState;

/// List videos, newest first
///
/// GET /api/videos?category&search&page&limit
pub async fn list_videos(
    State(state): State<AppState>,
    FeedFilter(query): FeedFilter,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let videos = service.feed(query).await?;
    Ok(Json(videos))
}

/// Get a video with its owner; counts one view
///
/// GET /api/videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<VideoResponse>> {
    let service = VideoService::new(state.service_context());
    let video = service.get_video(video_id).await?;
    Ok(Json(video))
}

/// Videos uploaded by one user
///
/// GET /api/videos/user/{id}
pub async fn get_user_videos(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<VideoResponse>>> {
    let service = VideoService::new(state.service_context());
    let videos = service.videos_by_user(user_id).await?;
    Ok(Json(videos))
}

/// Upload a video with optional thumbnail and caption track
///
/// POST /api/videos/upload
pub async fn upload_video(
    State(state): State<AppState>,
    auth: AuthUser,
    VideoUploadForm(form): VideoUploadForm,
) -> ApiResult<Json<UploadResponse>> {
    let service = VideoService::new(state.service_context());
    let response = service.upload(auth.user_id, form).await?;
    Ok(Json(response))
}

/// Delete one of the caller's videos
///
/// DELETE /api/videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = VideoService::new(state.service_context());
    let response = service.delete_video(video_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Toggle a like or dislike
///
/// POST /api/videos/{id}/like
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let kind = request.reaction_kind()?;
    let service = EngagementService::new(state.service_context());
    let response = service.react(auth.user_id, video_id, kind).await?;
    Ok(Json(response))
}

/// The caller's reaction on a video
///
/// GET /api/videos/{id}/like-status
pub async fn like_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = EngagementService::new(state.service_context());
    let response = service.like_status(auth.user_id, video_id).await?;
    Ok(Json(response))
}
