pub mod config;
pub mod models;

pub use config::{AdminConfig, StaticUser};
pub use models::{Bucket, CollectionDocument, Message, MessageImage, MessageStatus, Revision};
