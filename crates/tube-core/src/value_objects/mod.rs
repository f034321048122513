//! Value objects - immutable types that represent domain concepts

mod blob_category;
mod counter_audit;
mod reaction_kind;

pub use blob_category::BlobCategory;
pub use counter_audit::{CounterAudit, CounterCheck};
pub use reaction_kind::ReactionKind;
