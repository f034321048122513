//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validated JSON, path ids, the feed
//! query string, and multipart upload forms.

mod auth;
mod multipart;
mod path;
mod query;
mod validated;

pub use auth::AuthUser;
pub use multipart::{ProfileForm, VideoUploadForm};
pub use path::IdPath;
pub use query::FeedFilter;
pub use validated::ValidatedJson;
