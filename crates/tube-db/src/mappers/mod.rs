//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions from database rows to domain objects,
//! plus the audit conversions that need the audited id.

mod audit;
mod comment;
mod user;
mod video;

pub use audit::{channel_audit, video_audit};
