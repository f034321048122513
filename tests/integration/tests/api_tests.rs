//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use uuid::Uuid;

async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn upload(server: &TestServer, token: &str, title: &str, category: &str) -> String {
    let form = video_form(title, category, "asl, lesson ,,basics");
    let response = server
        .post_form_auth("/api/videos/upload", token, form)
        .await
        .unwrap();
    let uploaded: UploadResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(uploaded.message, "Video uploaded successfully");
    uploaded.id
}

async fn react(server: &TestServer, token: &str, video_id: &str, body: &ReactRequest) -> ReactionResponse {
    let response = server
        .post_auth(&format!("/api/videos/{video_id}/like"), token, body)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_login_and_me() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email.as_deref(), Some(request.email.as_str()));
    assert_eq!(auth.user.sign_language, "BSL");
    assert!(auth.user.is_deaf);
    assert!(!auth.token.is_empty());

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server.get_auth("/api/auth/me", &login.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.subscribers, 0);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/api/auth/register", &request).await.unwrap();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Username or email already exists");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/auth/register", &request).await.unwrap();

    let wrong_password = LoginRequest {
        email: request.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "Invalid credentials");

    let unknown = LoginRequest {
        email: "nobody-here@example.com".to_string(),
        password: "whatever".to_string(),
    };
    let response = server.post("/api/auth/login", &unknown).await.unwrap();
    let message = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(message, "Invalid credentials");
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_upload_and_watch_counts_views() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let video_id = upload(&server, &owner.token, "Fingerspelling drills", "Education").await;

    let response = server.get(&format!("/api/videos/{video_id}")).await.unwrap();
    let first: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.views, 1);
    assert_eq!(first.username, owner.user.username);
    assert_eq!(first.user_id, owner.user.id);
    assert_eq!(first.tag_list, vec!["asl", "lesson", "basics"]);
    assert!(first.has_sign_language);
    assert!(first
        .thumbnail_url
        .as_deref()
        .is_some_and(|url| url.starts_with("/uploads/thumbnails/") && url.ends_with(".png")));

    let response = server.get(&format!("/api/videos/{video_id}")).await.unwrap();
    let second: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.views, 2);

    // The stored file is served back from /uploads
    let response = server.get(&second.video_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().len(), 4096);
}

#[tokio::test]
async fn test_upload_requires_video_and_auth() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;

    let response = server
        .post_form_auth("/api/videos/upload", &owner.token, form_without_video("No file"))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Video file required");

    let response = server
        .client
        .post(format!("{}/api/videos/upload", server.base_url()))
        .multipart(video_form("Anonymous", "General", ""))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_feed_filters_by_category_and_search() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let marker = unique_suffix();
    let category = format!("Poetry{marker}");

    let poem = upload(&server, &owner.token, &format!("Visual vernacular {marker}"), &category).await;
    upload(&server, &owner.token, &format!("Cooking {marker}"), "Food").await;

    let response = server
        .get(&format!("/api/videos?category={category}"))
        .await
        .unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, poem);

    let response = server
        .get(&format!("/api/videos?search=vernacular%20{marker}&limit=5"))
        .await
        .unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].category, category);

    let response = server
        .get(&format!("/api/videos/user/{}", owner.user.id))
        .await
        .unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(videos.len(), 2);
}

#[tokio::test]
async fn test_delete_video_checks_ownership_and_cascades() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = upload(&server, &owner.token, "Short lived", "General").await;

    react(&server, &viewer.token, &video_id, &ReactRequest::like()).await;
    let response = server
        .post_auth(
            &format!("/api/comments/{video_id}"),
            &viewer.token,
            &CreateCommentRequest {
                content: "Clear signing!".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/videos/{video_id}"), &viewer.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Not found or unauthorized");

    let response = server
        .delete_auth(&format!("/api/videos/{video_id}"), &owner.token)
        .await
        .unwrap();
    let deleted: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.message, "Deleted");

    let response = server.get(&format!("/api/videos/{video_id}")).await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Video not found");

    let response = server.get(&format!("/api/comments/{video_id}")).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(comments.is_empty());
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_single_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = upload(&server, &owner.token, "Toggle me", "General").await;

    let liked = react(&server, &viewer.token, &video_id, &ReactRequest::like()).await;
    assert_eq!(liked.message, "Success");
    assert_eq!(liked.status.as_deref(), Some("like"));
    assert_eq!((liked.likes, liked.dislikes), (1, 0));

    let switched = react(&server, &viewer.token, &video_id, &ReactRequest::dislike()).await;
    assert_eq!(switched.message, "Switched");
    assert_eq!(switched.status.as_deref(), Some("dislike"));
    assert_eq!((switched.likes, switched.dislikes), (0, 1));

    let response = server
        .get_auth(&format!("/api/videos/{video_id}/like-status"), &viewer.token)
        .await
        .unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.status.as_deref(), Some("dislike"));

    let removed = react(&server, &viewer.token, &video_id, &ReactRequest::dislike()).await;
    assert_eq!(removed.message, "Removed");
    assert_eq!(removed.status, None);
    assert_eq!((removed.likes, removed.dislikes), (0, 0));

    let response = server
        .get_auth(&format!("/api/videos/{video_id}/like-status"), &viewer.token)
        .await
        .unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.status, None);
}

#[tokio::test]
async fn test_reactions_from_two_users() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let first = register(&server).await;
    let second = register(&server).await;
    let video_id = upload(&server, &owner.token, "Two opinions", "General").await;

    react(&server, &first.token, &video_id, &ReactRequest::like()).await;
    let after = react(&server, &second.token, &video_id, &ReactRequest::dislike()).await;
    assert_eq!((after.likes, after.dislikes), (1, 1));

    let after = react(&server, &first.token, &video_id, &ReactRequest::dislike()).await;
    assert_eq!((after.likes, after.dislikes), (0, 2));

    let response = server.get(&format!("/api/videos/{video_id}")).await.unwrap();
    let video: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((video.likes, video.dislikes), (0, 2));
}

#[tokio::test]
async fn test_concurrent_likes_are_all_counted() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let video_id = upload(&server, &owner.token, "Crowd favourite", "General").await;

    let mut tokens = Vec::new();
    for _ in 0..8 {
        tokens.push(register(&server).await.token);
    }

    let mut handles = Vec::new();
    for token in tokens {
        let client = server.client.clone();
        let url = format!("{}/api/videos/{video_id}/like", server.base_url());
        handles.push(tokio::spawn(async move {
            client
                .post(url)
                .bearer_auth(token)
                .json(&ReactRequest::like())
                .send()
                .await
                .map(|r| r.status())
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), StatusCode::OK);
    }

    let response = server.get(&format!("/api/videos/{video_id}")).await.unwrap();
    let video: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(video.likes, 8);
    assert_eq!(video.dislikes, 0);
}

#[tokio::test]
async fn test_reaction_on_unknown_video_is_unchanged() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let viewer = register(&server).await;

    let outcome = react(
        &server,
        &viewer.token,
        &Uuid::new_v4().to_string(),
        &ReactRequest::like(),
    )
    .await;
    assert_eq!(outcome.message, "Unchanged");
    assert_eq!(outcome.status, None);
    assert_eq!((outcome.likes, outcome.dislikes), (0, 0));
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscription_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let channel = register(&server).await;
    let fan = register(&server).await;
    let subscribe = format!("/api/users/{}/subscribe", channel.user.id);
    let status = format!("/api/users/{}/subscription-status", channel.user.id);

    let response = server.post_auth(&subscribe, &fan.token, &()).await.unwrap();
    let on: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(on.subscribed);
    assert_eq!(on.subscribers, Some(1));

    let response = server.get_auth(&status, &fan.token).await.unwrap();
    let current: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(current.subscribed);

    let response = server.get(&format!("/api/users/{}", channel.user.id)).await.unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.subscribers, 1);
    assert!(profile.email.is_none());

    let response = server.post_auth(&subscribe, &fan.token, &()).await.unwrap();
    let off: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!off.subscribed);
    assert_eq!(off.subscribers, Some(0));
}

#[tokio::test]
async fn test_subscription_guards() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;

    let response = server
        .post_auth(&format!("/api/users/{}/subscribe", user.user.id), &user.token, &())
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Cannot subscribe to yourself");

    let response = server
        .post_auth(&format!("/api/users/{}/subscribe", Uuid::new_v4()), &user.token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let author = register(&server).await;
    let video_id = upload(&server, &owner.token, "Discuss", "General").await;
    let path = format!("/api/comments/{video_id}");

    let response = server
        .post_auth(
            &path,
            &author.token,
            &CreateCommentRequest {
                content: "  Loved the facial grammar  ".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comment.content, "Loved the facial grammar");
    assert_eq!(comment.username, author.user.username);
    assert_eq!(comment.video_id, video_id);
    assert_eq!(comment.user_id, author.user.id);

    let response = server.get(&path).await.unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 1);

    // Only the author may delete, even the video owner gets 404
    let response = server
        .delete_auth(&format!("/api/comments/{}", comment.id), &owner.token)
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Not found or unauthorized");

    let response = server
        .delete_auth(&format!("/api/comments/{}", comment.id), &author.token)
        .await
        .unwrap();
    let deleted: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.message, "Deleted");

    let response = server
        .delete_auth(&format!("/api/comments/{}", comment.id), &author.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server).await;

    let response = server
        .post_auth(
            &format!("/api/comments/{}", Uuid::new_v4()),
            &author.token,
            &CreateCommentRequest {
                content: "Anyone there?".to_string(),
            },
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Video not found");

    let response = server
        .post_auth(
            &format!("/api/comments/{}", Uuid::new_v4()),
            &author.token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Comment content required");
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = register(&server).await;

    let response = server
        .put_form_auth("/api/users/profile", &user.token, profile_form("Interpreter and storyteller", false))
        .await
        .unwrap();
    let updated: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.message, "Profile updated");

    let response = server.get(&format!("/api/users/{}", user.user.id)).await.unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio, "Interpreter and storyteller");
    assert!(!profile.is_deaf);
    assert_eq!(profile.sign_language, "BSL");
    let avatar = profile.avatar.expect("avatar stored");
    assert!(std::path::Path::new(&server.upload_dir)
        .join("avatars")
        .join(&avatar)
        .exists());
}
