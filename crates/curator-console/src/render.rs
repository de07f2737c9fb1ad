//! Plain-text rendering of messages and listings. Nothing here carries
//! semantics; everything is derived from the repository snapshot.

use curator_types::{Bucket, Message};

const PREVIEW_LIMIT: usize = 150;

/// First eight characters of the id, the card label the console shows.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    }
}

pub fn card(message: &Message) -> String {
    let mut card = format!(
        "#{}  {}\n  {}\n",
        short_id(&message.id),
        message.timestamp.format("%Y-%m-%d %H:%M"),
        truncate(&message.content, PREVIEW_LIMIT),
    );
    if let Some(tags) = message.tags.as_deref().filter(|t| !t.is_empty()) {
        let pills: Vec<String> = tags.iter().map(|t| format!("[{t}]")).collect();
        card.push_str("  ");
        card.push_str(&pills.join(" "));
        card.push('\n');
    }
    card
}

pub fn bucket_listing(bucket: Bucket, messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("No {bucket} messages\n");
    }
    let mut out = format!("{bucket} ({})\n\n", messages.len());
    for message in messages {
        out.push_str(&card(message));
        out.push('\n');
    }
    out
}

pub fn message_detail(bucket: Bucket, message: &Message) -> String {
    let mut out = format!(
        "Id:        {}\nBucket:    {}\nStatus:    {}\nReceived:  {}\n",
        message.id,
        bucket,
        message.status,
        message.timestamp.to_rfc3339(),
    );
    match message.tags.as_deref() {
        Some(tags) if !tags.is_empty() => {
            out.push_str(&format!("Tags:      {}\n", tags.join(", ")));
        }
        _ => out.push_str("Tags:      None\n"),
    }
    if let Some(images) = message.images.as_deref() {
        let filenames: Vec<&str> = images.iter().map(|i| i.filename.as_str()).collect();
        out.push_str(&format!("Images:    {}\n", filenames.join(", ")));
    }
    out.push('\n');
    out.push_str(&message.content);
    out.push('\n');
    out
}
