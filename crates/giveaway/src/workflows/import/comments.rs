use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::workflows::entries::{EntryId, RawEntry};

use super::ImportError;

const UNKNOWN_AUTHOR: &str = "Unknown";

/// One page of a Graph API `/{object-id}/comments` response.
#[derive(Debug, Deserialize)]
struct CommentsPage {
    #[serde(default)]
    data: Vec<GraphComment>,
}

#[derive(Debug, Deserialize)]
struct GraphComment {
    id: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    from: Option<GraphAuthor>,
}

#[derive(Debug, Deserialize)]
struct GraphAuthor {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

/// Maps an already-fetched comments payload to raw entries, in payload order.
///
/// Like and share status cannot be read from comments, so both flags stay unknown.
pub(crate) fn parse_comments(payload: &[u8]) -> Result<Vec<RawEntry>, ImportError> {
    let page: CommentsPage = serde_json::from_slice(payload)?;
    Ok(page_entries(page))
}

pub(crate) fn parse_comments_value(
    payload: serde_json::Value,
) -> Result<Vec<RawEntry>, ImportError> {
    let page: CommentsPage = serde_json::from_value(payload)?;
    Ok(page_entries(page))
}

fn page_entries(page: CommentsPage) -> Vec<RawEntry> {
    page
        .data
        .into_iter()
        .map(|comment| {
            let commented_at = comment.created_time.as_deref().and_then(|raw| {
                let parsed = parse_graph_time(raw);
                if parsed.is_none() {
                    warn!(comment_id = %comment.id, raw, "unparseable comment timestamp");
                }
                parsed
            });

            let (id, display_name) = match comment.from {
                Some(author) => (
                    author.id,
                    author
                        .name
                        .filter(|name| !name.trim().is_empty())
                        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                ),
                None => (comment.id.clone(), UNKNOWN_AUTHOR.to_string()),
            };

            RawEntry {
                id: EntryId(id),
                display_name,
                comment_text: comment.message,
                commented_at,
                flags: Default::default(),
                declared_friends: Vec::new(),
            }
        })
        .collect()
}

/// Graph timestamps look like `2025-01-31T12:00:00+0000`; RFC 3339 is accepted too.
fn parse_graph_time(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
pub(crate) fn parse_graph_time_for_tests(raw: &str) -> Option<DateTime<Utc>> {
    parse_graph_time(raw)
}
