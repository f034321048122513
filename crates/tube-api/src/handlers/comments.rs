//! Comment handlers

use axum::{extract::State, Json};
use tube_service::{CommentResponse, CommentService, CreateCommentRequest, MessageResponse};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Comments on a video, newest first
///
/// GET /api/comments/{video_id}
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list(video_id).await?;
    Ok(Json(comments))
}

/// Comment on a video
///
/// POST /api/comments/{video_id}
pub async fn post_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .post_comment(video_id, auth.user_id, request.content)
        .await?;
    Ok(Json(comment))
}

/// Delete one of the caller's comments
///
/// DELETE /api/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service.delete_comment(comment_id, auth.user_id).await?;
    Ok(Json(response))
}
