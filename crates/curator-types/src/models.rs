use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema tag stamped on every collection document write.
pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Approved,
    Rejected,
    Published,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Approved => "approved",
            MessageStatus::Rejected => "rejected",
            MessageStatus::Published => "published",
        }
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageImage {
    pub filename: String,
}

/// A user-submitted message. The id is minted by the submission side and
/// stays stable as the message moves between buckets; at any moment the id
/// lives in at most one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<MessageImage>>,
}

/// One whole lifecycle bucket as stored. The document is the unit of both
/// storage and concurrency: reads and writes are always wholesale, there are
/// no row-level updates.
///
/// `messages` is required on parse — an object without it is not a
/// collection document, whatever else it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDocument {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

impl CollectionDocument {
    /// A document ready to persist: fresh `lastUpdated`, current schema tag.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            last_updated: Some(Utc::now()),
            version: default_version(),
        }
    }

    /// What a degraded read yields: no messages, no write timestamp.
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            last_updated: None,
            version: default_version(),
        }
    }
}

/// The four lifecycle buckets. Pending, approved and published are the
/// operator-visible tabs; rejected is an internal accumulating log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Pending,
    Approved,
    Rejected,
    Published,
}

impl Bucket {
    pub const VISIBLE: [Bucket; 3] = [Bucket::Pending, Bucket::Approved, Bucket::Published];

    /// Storage filename inside the data directory.
    pub fn filename(self) -> &'static str {
        match self {
            Bucket::Pending => "pending-messages.json",
            Bucket::Approved => "approved-messages.json",
            Bucket::Rejected => "rejected-messages.json",
            Bucket::Published => "published-messages.json",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Pending => "pending",
            Bucket::Approved => "approved",
            Bucket::Rejected => "rejected",
            Bucket::Published => "published",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Bucket::Pending),
            "approved" => Ok(Bucket::Approved),
            "rejected" => Ok(Bucket::Rejected),
            "published" => Ok(Bucket::Published),
            other => Err(format!(
                "unknown bucket '{other}' (expected pending, approved, rejected or published)"
            )),
        }
    }
}

/// Opaque content revision: returned by a read, required to overwrite the
/// same document. Absent on a write means "create".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision(pub String);

impl Revision {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, content: &str) -> Message {
        Message {
            id: id.to_string(),
            content: content.to_string(),
            timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
            status: MessageStatus::Pending,
            tags: None,
            images: None,
        }
    }

    #[test]
    fn document_serializes_camel_case() {
        let doc = CollectionDocument::new(vec![message("abc123", "Hello")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"version\":\"1.0\""));
        assert!(!json.contains("last_updated"));
    }

    #[test]
    fn optional_fields_are_omitted() {
        let json = serde_json::to_string(&message("abc123", "Hello")).unwrap();
        assert!(!json.contains("tags"));
        assert!(!json.contains("images"));
    }

    #[test]
    fn document_round_trips_multibyte_content() {
        let doc = CollectionDocument::new(vec![message("m1", "héllo wörld — 日本語 🚲")]);
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let back: CollectionDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn document_without_messages_field_is_rejected() {
        let result: Result<CollectionDocument, _> =
            serde_json::from_str(r#"{"lastUpdated":"2024-01-01T00:00:00Z","version":"1.0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn document_defaults_version_and_timestamp() {
        let doc: CollectionDocument = serde_json::from_str(r#"{"messages":[]}"#).unwrap();
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert!(doc.last_updated.is_none());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageStatus::Approved).unwrap(), "\"approved\"");
    }

    #[test]
    fn bucket_filenames_and_parse() {
        assert_eq!(Bucket::Pending.filename(), "pending-messages.json");
        assert_eq!("rejected".parse::<Bucket>().unwrap(), Bucket::Rejected);
        assert!("drafts".parse::<Bucket>().is_err());
    }
}
