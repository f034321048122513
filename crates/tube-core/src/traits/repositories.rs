//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Comment, CommentWithAuthor, ProfileUpdate, ReactionOutcome, SubscriptionOutcome, User,
    Video, VideoWithOwner,
};
use crate::error::DomainError;
use crate::value_objects::{CounterAudit, ReactionKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user; duplicate username or email is `UsernameOrEmailTaken`
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Apply a partial profile edit and return the updated user
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;
}

// ============================================================================
// Video Repository
// ============================================================================

/// Filters and window for the browsing feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Exact category match; `None` means every category
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and tags
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl FeedQuery {
    pub const DEFAULT_LIMIT: i64 = 12;
    pub const MAX_LIMIT: i64 = 50;

    /// Normalize raw query parameters
    ///
    /// A category of `All` or blank disables the filter, `page` starts at 1,
    /// and `limit` is clamped to `1..=MAX_LIMIT`.
    pub fn new(
        category: Option<String>,
        search: Option<String>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        let limit = limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT);
        let page = page.unwrap_or(1).max(1);
        Self {
            category: category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty() && c != "All"),
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// `ILIKE` pattern for the search term with wildcards escaped
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }

    /// In-memory equivalent of the search predicate
    pub fn matches(&self, video: &Video) -> bool {
        if let Some(category) = &self.category {
            if &video.category != category {
                return false;
            }
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                [&video.title, &video.description, &video.tags]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            None => true,
        }
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Find video by ID, joined with its owner
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<VideoWithOwner>>;

    /// Newest-first feed page
    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<VideoWithOwner>>;

    /// All videos uploaded by a user, newest first
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<VideoWithOwner>>;

    /// Create a new video
    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// Atomically add one view; `None` if the video does not exist
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<i64>>;

    /// Delete a video owned by `owner_id` together with its comments and reactions
    ///
    /// Returns the deleted row, or `None` when the video is absent or owned by
    /// someone else.
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> RepoResult<Option<Video>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a video, newest first
    async fn find_by_video(&self, video_id: Uuid) -> RepoResult<Vec<CommentWithAuthor>>;

    /// Create a comment; an unknown video is `VideoNotFound`
    async fn create(&self, comment: &Comment) -> RepoResult<CommentWithAuthor>;

    /// Delete a comment written by `author_id`; `false` when nothing matched
    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Apply one like/dislike toggle and its counter deltas atomically
    ///
    /// Toggles on the same video are serialized. Returns `None`, having
    /// written nothing, when the video does not exist.
    async fn toggle(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        kind: ReactionKind,
    ) -> RepoResult<Option<ReactionOutcome>>;

    /// Current reaction of a user on a video
    async fn status(&self, user_id: Uuid, video_id: Uuid) -> RepoResult<Option<ReactionKind>>;

    /// Compare the video's counters with its reaction rows
    async fn audit(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>>;

    /// Rewrite the video's counters from its reaction rows
    async fn reconcile(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or remove the subscription row and adjust the channel counter atomically
    ///
    /// An unknown channel is `UserNotFound`.
    async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid)
        -> RepoResult<SubscriptionOutcome>;

    /// Check if a subscription row exists for the pair
    async fn is_subscribed(&self, subscriber_id: Uuid, channel_id: Uuid) -> RepoResult<bool>;

    /// Compare the channel's subscriber counter with its subscription rows
    async fn audit(&self, channel_id: Uuid) -> RepoResult<Option<CounterAudit>>;
}
