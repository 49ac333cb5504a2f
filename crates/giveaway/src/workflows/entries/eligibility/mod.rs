mod config;
mod rules;

pub use config::{ConfigPatchError, EligibilityConfig, EligibilityConfigPatch};
pub use rules::FailReason;

use super::domain::{Conditions, Entry, EntryStatus, RawEntry};
use super::features::{extract_features, TextFeatures};
use super::mentions::push_unique;
use rules::evaluate_rules;
use serde::{Deserialize, Serialize};

/// Verdict for one entry under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: EntryStatus,
    pub fail_reasons: Vec<String>,
    pub conditions: Conditions,
}

/// Stateless validator that applies one configuration to entries.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    /// Re-derives the verdict from the entry's stored features and flags.
    pub fn validate(&self, entry: &Entry) -> ValidationResult {
        let features = TextFeatures {
            tagged_friends: entry.tagged_friends.clone(),
            hashtags: entry.hashtags.clone(),
            text_length: entry.text_length,
        };
        let (reasons, signals) = evaluate_rules(&features, &self.config);

        let status = if reasons.is_empty() {
            EntryStatus::Passed
        } else {
            EntryStatus::Failed
        };

        ValidationResult {
            status,
            fail_reasons: reasons.iter().map(FailReason::summary).collect(),
            conditions: Conditions {
                has_liked_page: entry.flags.liked_page,
                has_shared_post: entry.flags.shared_post,
                has_tagged_friend: signals.has_tagged_friend,
                has_hashtag: signals.has_hashtag,
                has_reason: signals.has_reason,
            },
        }
    }

    /// Extracts features for a raw entry and validates it.
    pub fn admit(&self, raw: RawEntry) -> Entry {
        let mut entry = extract_entry(raw);
        self.apply(&mut entry);
        entry
    }

    pub fn validate_all(&self, raw_entries: Vec<RawEntry>) -> Vec<Entry> {
        raw_entries.into_iter().map(|raw| self.admit(raw)).collect()
    }

    /// Overwrites the verdict fields of `entry` in place.
    pub fn apply(&self, entry: &mut Entry) {
        let ValidationResult {
            status,
            fail_reasons,
            conditions,
        } = self.validate(entry);
        entry.status = status;
        entry.fail_reasons = fail_reasons;
        entry.conditions = conditions;
    }
}

pub fn validate_entry(entry: &Entry, config: &EligibilityConfig) -> ValidationResult {
    EligibilityEngine::new(config.clone()).validate(entry)
}

pub fn validate_all(raw_entries: Vec<RawEntry>, config: &EligibilityConfig) -> Vec<Entry> {
    EligibilityEngine::new(config.clone()).validate_all(raw_entries)
}

/// Builds a pending entry with extracted features; declared friends follow detected ones.
pub fn extract_entry(raw: RawEntry) -> Entry {
    let RawEntry {
        id,
        display_name,
        comment_text,
        commented_at,
        flags,
        declared_friends,
    } = raw;

    let TextFeatures {
        mut tagged_friends,
        hashtags,
        text_length,
    } = extract_features(&comment_text);

    for name in declared_friends {
        let name = name.trim().to_string();
        if !name.is_empty() {
            push_unique(&mut tagged_friends, name);
        }
    }

    Entry {
        id,
        display_name,
        comment_text,
        commented_at,
        tagged_friends,
        hashtags,
        text_length,
        flags,
        status: EntryStatus::Pending,
        fail_reasons: Vec::new(),
        conditions: Conditions {
            has_liked_page: flags.liked_page,
            has_shared_post: flags.shared_post,
            ..Conditions::default()
        },
    }
}
