//! User handlers
//!
//! Public channel profiles, profile edits, and subscriptions.

use axum::{extract::State, Json};
use tube_service::{
    EngagementService, MessageResponse, PublicUserResponse, SubscriptionResponse,
    SubscriptionStatusResponse, UserService,
};

use crate::extractors::{AuthUser, IdPath, ProfileForm};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a user's public profile
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<PublicUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(user_id).await?;
    Ok(Json(response))
}

/// Edit the caller's profile
///
/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ProfileForm(form): ProfileForm,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, form).await?;
    Ok(Json(response))
}

/// Subscribe to a channel, or unsubscribe if already subscribed
///
/// POST /api/users/{id}/subscribe
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(channel_id): IdPath,
) -> ApiResult<Json<SubscriptionResponse>> {
    let service = EngagementService::new(state.service_context());
    let response = service.toggle_subscription(auth.user_id, channel_id).await?;
    Ok(Json(response))
}

/// GET /api/users/{id}/subscription-status
pub async fn subscription_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(channel_id): IdPath,
) -> ApiResult<Json<SubscriptionStatusResponse>> {
    let service = EngagementService::new(state.service_context());
    let response = service.subscription_status(auth.user_id, channel_id).await?;
    Ok(Json(response))
}
