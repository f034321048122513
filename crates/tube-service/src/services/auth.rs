//! Authentication service
//!
//! Handles user registration, login, and resolving the current user.

use tube_common::AppError;
use tube_core::entities::User;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = User::new(
            Uuid::new_v4(),
            request.username.trim().to_string(),
            normalize_email(&request.email),
            request.sign_language.map(|s| s.trim().to_string()),
        );

        // Duplicate username or email surfaces as UsernameOrEmailTaken
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        let Some(user) = self.ctx.user_repo().find_by_email(&email).await? else {
            warn!("Login failed: user not found");
            return Err(self.ctx.password_service().reject_unknown(&request.password).into());
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        info!(user_id = %user.id, "User logged in successfully");

        self.issue(&user)
    }

    /// Get the authenticated user's own account
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Uuid) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        Ok(CurrentUserResponse::from(&user))
    }

    fn issue(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue_token(user.id, &user.username)?;
        Ok(AuthResponse {
            token,
            user: CurrentUserResponse::from(user),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
