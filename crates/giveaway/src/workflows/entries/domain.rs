use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// External identity of a participant (Facebook user id or spreadsheet row key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A friend name picked up from a comment or declared by the source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedFriend {
    pub name: String,
}

impl TaggedFriend {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Checks the engine cannot verify itself. `None` means nobody has confirmed either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFlags {
    #[serde(default)]
    pub liked_page: Option<bool>,
    #[serde(default)]
    pub shared_post: Option<bool>,
}

/// Entry as handed over by a comment or spreadsheet collaborator, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub id: EntryId,
    pub display_name: String,
    pub comment_text: String,
    #[serde(default)]
    pub commented_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flags: ExternalFlags,
    /// Friend names supplied out of band, merged after the text detectors.
    #[serde(default)]
    pub declared_friends: Vec<String>,
}

impl RawEntry {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        comment_text: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(id),
            display_name: display_name.into(),
            comment_text: comment_text.into(),
            commented_at: None,
            flags: ExternalFlags::default(),
            declared_friends: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl EntryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::Passed => "passed",
            EntryStatus::Failed => "failed",
        }
    }
}

/// Per-rule outcome kept next to the status for audit screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub has_liked_page: Option<bool>,
    pub has_shared_post: Option<bool>,
    pub has_tagged_friend: bool,
    pub has_hashtag: bool,
    pub has_reason: bool,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            has_liked_page: None,
            has_shared_post: None,
            has_tagged_friend: true,
            has_hashtag: true,
            has_reason: true,
        }
    }
}

/// A participant with extracted features and its eligibility verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub display_name: String,
    pub comment_text: String,
    pub commented_at: Option<DateTime<Utc>>,
    pub tagged_friends: Vec<TaggedFriend>,
    pub hashtags: Vec<String>,
    pub text_length: usize,
    pub flags: ExternalFlags,
    pub status: EntryStatus,
    pub fail_reasons: Vec<String>,
    pub conditions: Conditions,
}

impl Entry {
    pub fn is_qualified(&self) -> bool {
        self.status == EntryStatus::Passed
    }
}
