pub mod error;
pub mod lifecycle;
pub mod repository;

pub use error::ModerationError;
pub use lifecycle::{Moderation, normalize_tags};
pub use repository::{BucketMove, Repository};
