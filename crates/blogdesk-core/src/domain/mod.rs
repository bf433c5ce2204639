//! Domain entities - the core client objects.

mod id;
mod post;
mod query;

pub use id::TimestampIdGenerator;
pub use post::{BlogPost, DEFAULT_CATEGORY, DEFAULT_COVER_IMAGE};
pub use query::QueryKey;
