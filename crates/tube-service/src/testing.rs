//! In-memory repository fakes for service tests
//!
//! One shared store implements every repository trait so joins (owner of a
//! video, author of a comment) and the denormalized counters behave like the
//! PostgreSQL schema, cascades included.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tube_common::JwtService;
use tube_core::entities::{
    Comment, CommentWithAuthor, ProfileUpdate, ReactionOutcome, ReactionTransition, RowChange,
    Subscription, SubscriptionOutcome, User, Video, VideoWithOwner,
};
use tube_core::error::DomainError;
use tube_core::traits::{
    BlobStore, CommentRepository, FeedQuery, ReactionRepository, RepoResult,
    SubscriptionRepository, UserRepository, VideoRepository,
};
use tube_core::value_objects::{BlobCategory, CounterAudit, CounterCheck, ReactionKind};
use uuid::Uuid;

use crate::services::{ServiceContext, StorageLimits};

pub const TEST_SECRET: &str = "test-secret-key-for-service-tests";

#[derive(Default)]
struct State {
    users: HashMap<Uuid, (User, String)>,
    videos: HashMap<Uuid, Video>,
    comments: Vec<Comment>,
    reactions: HashMap<(Uuid, Uuid), ReactionKind>,
    subscriptions: HashSet<(Uuid, Uuid)>,
}

impl State {
    fn with_owner(&self, video: &Video) -> Option<VideoWithOwner> {
        let (owner, _) = self.users.get(&video.user_id)?;
        Some(VideoWithOwner {
            video: video.clone(),
            username: owner.username.clone(),
            avatar: owner.avatar.clone(),
            subscribers: owner.subscribers,
        })
    }

    fn with_author(&self, comment: &Comment) -> Option<CommentWithAuthor> {
        let (author, _) = self.users.get(&comment.user_id)?;
        Some(CommentWithAuthor {
            comment: comment.clone(),
            username: author.username.clone(),
            avatar: author.avatar.clone(),
        })
    }

    fn video_audit(&self, video_id: Uuid) -> Option<CounterAudit> {
        let video = self.videos.get(&video_id)?;
        let count = |kind| {
            self.reactions
                .iter()
                .filter(|((_, v), k)| *v == video_id && **k == kind)
                .count() as i64
        };
        Some(CounterAudit::Video {
            video_id,
            likes: CounterCheck::new(video.likes, count(ReactionKind::Like)),
            dislikes: CounterCheck::new(video.dislikes, count(ReactionKind::Dislike)),
        })
    }
}

/// Shared in-memory store implementing every repository trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing the auth flow
    pub fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            Uuid::new_v4(),
            username.to_string(),
            format!("{username}@example.com"),
            None,
        );
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.id, (user.clone(), String::new()));
        user
    }

    /// Insert a video directly, bypassing the upload flow
    pub fn seed_video(&self, owner: &User, title: &str) -> Video {
        let video = Video::new(
            Uuid::new_v4(),
            tube_core::entities::NewVideo {
                user_id: owner.id,
                title: title.to_string(),
                description: None,
                filename: format!("{}.mp4", Uuid::new_v4()),
                thumbnail: None,
                caption_file: None,
                category: None,
                tags: None,
                has_sign_language: true,
            },
        );
        self.state
            .lock()
            .unwrap()
            .videos
            .insert(video.id, video.clone());
        video
    }

    pub fn video(&self, id: Uuid) -> Option<Video> {
        self.state.lock().unwrap().videos.get(&id).cloned()
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).map(|(u, _)| u.clone())
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.state.lock().unwrap().reactions.len()
    }

    /// Overwrite a video's stored counters to simulate drift
    pub fn corrupt_likes(&self, video_id: Uuid, likes: i64) {
        if let Some(video) = self.state.lock().unwrap().videos.get_mut(&video_id) {
            video.likes = likes;
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .find(|(u, _)| u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .values()
            .any(|(u, _)| u.username == user.username || u.email == user.email)
        {
            return Err(DomainError::UsernameOrEmailTaken);
        }
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> RepoResult<User> {
        let mut state = self.state.lock().unwrap();
        let (user, _) = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;
        update.apply(user);
        Ok(user.clone())
    }

    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&id).map(|(_, hash)| hash.clone()))
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<VideoWithOwner>> {
        let state = self.state.lock().unwrap();
        Ok(state.videos.get(&id).and_then(|v| state.with_owner(v)))
    }

    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<VideoWithOwner>> {
        let state = self.state.lock().unwrap();
        let mut videos: Vec<&Video> = state.videos.values().filter(|v| query.matches(v)).collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(videos
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .filter_map(|v| state.with_owner(v))
            .collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<VideoWithOwner>> {
        let state = self.state.lock().unwrap();
        let mut videos: Vec<&Video> = state
            .videos
            .values()
            .filter(|v| v.user_id == user_id)
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos.into_iter().filter_map(|v| state.with_owner(v)).collect())
    }

    async fn create(&self, video: &Video) -> RepoResult<()> {
        self.state
            .lock()
            .unwrap()
            .videos
            .insert(video.id, video.clone());
        Ok(())
    }

    async fn record_view(&self, id: Uuid) -> RepoResult<Option<i64>> {
        let mut state = self.state.lock().unwrap();
        Ok(state.videos.get_mut(&id).map(|v| {
            v.views += 1;
            v.views
        }))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> RepoResult<Option<Video>> {
        let mut state = self.state.lock().unwrap();
        if !state.videos.get(&id).is_some_and(|v| v.is_owned_by(owner_id)) {
            return Ok(None);
        }
        let video = state.videos.remove(&id);
        state.comments.retain(|c| c.video_id != id);
        state.reactions.retain(|(_, v), _| *v != id);
        Ok(video)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_video(&self, video_id: Uuid) -> RepoResult<Vec<CommentWithAuthor>> {
        let state = self.state.lock().unwrap();
        let mut comments: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|c| c.video_id == video_id)
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments
            .into_iter()
            .filter_map(|c| state.with_author(c))
            .collect())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<CommentWithAuthor> {
        let mut state = self.state.lock().unwrap();
        if !state.videos.contains_key(&comment.video_id) {
            return Err(DomainError::VideoNotFound(comment.video_id));
        }
        state.comments.push(comment.clone());
        state
            .with_author(comment)
            .ok_or(DomainError::UserNotFound(comment.user_id))
    }

    async fn delete_owned(&self, id: Uuid, author_id: Uuid) -> RepoResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.comments.len();
        state
            .comments
            .retain(|c| !(c.id == id && c.is_authored_by(author_id)));
        Ok(state.comments.len() < before)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn toggle(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        kind: ReactionKind,
    ) -> RepoResult<Option<ReactionOutcome>> {
        let mut state = self.state.lock().unwrap();
        if !state.videos.contains_key(&video_id) {
            return Ok(None);
        }

        let key = (user_id, video_id);
        let transition = ReactionTransition::compute(state.reactions.get(&key).copied(), kind);
        match transition.row_change {
            RowChange::Insert(kind) | RowChange::Switch(kind) => {
                state.reactions.insert(key, kind);
            }
            RowChange::Delete => {
                state.reactions.remove(&key);
            }
        }

        let Some(video) = state.videos.get_mut(&video_id) else {
            return Ok(None);
        };
        (video.likes, video.dislikes) = transition.apply_to(video.likes, video.dislikes);
        Ok(Some(ReactionOutcome {
            status: transition.next,
            change: Some(transition.row_change),
            likes: video.likes,
            dislikes: video.dislikes,
        }))
    }

    async fn status(&self, user_id: Uuid, video_id: Uuid) -> RepoResult<Option<ReactionKind>> {
        let state = self.state.lock().unwrap();
        Ok(state.reactions.get(&(user_id, video_id)).copied())
    }

    async fn audit(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        Ok(self.state.lock().unwrap().video_audit(video_id))
    }

    async fn reconcile(&self, video_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        let mut state = self.state.lock().unwrap();
        let Some(CounterAudit::Video {
            likes, dislikes, ..
        }) = state.video_audit(video_id)
        else {
            return Ok(None);
        };
        if let Some(video) = state.videos.get_mut(&video_id) {
            video.likes = likes.counted;
            video.dislikes = dislikes.counted;
        }
        Ok(state.video_audit(video_id))
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn toggle(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> RepoResult<SubscriptionOutcome> {
        Subscription::ensure_distinct(subscriber_id, channel_id)?;
        let mut state = self.state.lock().unwrap();
        if !state.users.contains_key(&channel_id) {
            return Err(DomainError::UserNotFound(channel_id));
        }

        let key = (subscriber_id, channel_id);
        let subscribed = if state.subscriptions.remove(&key) {
            false
        } else {
            state.subscriptions.insert(key);
            true
        };

        let (channel, _) = state
            .users
            .get_mut(&channel_id)
            .ok_or(DomainError::UserNotFound(channel_id))?;
        channel.subscribers += SubscriptionOutcome::delta(subscribed);
        Ok(SubscriptionOutcome {
            subscribed,
            subscribers: channel.subscribers,
        })
    }

    async fn is_subscribed(&self, subscriber_id: Uuid, channel_id: Uuid) -> RepoResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.subscriptions.contains(&(subscriber_id, channel_id)))
    }

    async fn audit(&self, channel_id: Uuid) -> RepoResult<Option<CounterAudit>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&channel_id).map(|(user, _)| {
            let counted = state
                .subscriptions
                .iter()
                .filter(|(_, c)| *c == channel_id)
                .count() as i64;
            CounterAudit::Channel {
                channel_id,
                subscribers: CounterCheck::new(user.subscribers, counted),
            }
        }))
    }
}

/// Blob store that keeps files in memory
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<(BlobCategory, String), Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn contains(&self, category: BlobCategory, filename: &str) -> bool {
        self.blobs
            .lock()
            .unwrap()
            .contains_key(&(category, filename.to_string()))
    }

    pub fn count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(
        &self,
        category: BlobCategory,
        original_name: &str,
        bytes: &[u8],
    ) -> RepoResult<String> {
        let filename = format!("{}-{original_name}", Uuid::new_v4());
        self.blobs
            .lock()
            .unwrap()
            .insert((category, filename.clone()), bytes.to_vec());
        Ok(filename)
    }

    async fn remove(&self, category: BlobCategory, filename: &str) -> RepoResult<()> {
        self.blobs
            .lock()
            .unwrap()
            .remove(&(category, filename.to_string()));
        Ok(())
    }
}

/// Everything a service test needs: the context plus handles on the fakes
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: MemoryStore,
    pub blobs: MemoryBlobStore,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_limits(StorageLimits::default())
    }

    pub fn with_limits(limits: StorageLimits) -> Self {
        let store = MemoryStore::new();
        let blobs = MemoryBlobStore::default();
        let ctx = ServiceContext::builder()
            .user_repo(Arc::new(store.clone()))
            .video_repo(Arc::new(store.clone()))
            .comment_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .subscription_repo(Arc::new(store.clone()))
            .blob_store(Arc::new(blobs.clone()))
            .limits(limits)
            .jwt_service(Arc::new(JwtService::new(TEST_SECRET, 3600)))
            .build()
            .unwrap();
        Self { ctx, store, blobs }
    }
}
