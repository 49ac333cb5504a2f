use serde::{Deserialize, Serialize};

/// Rule switches and thresholds applied to every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub enable_hashtag: bool,
    pub required_hashtag: String,
    pub enable_tag: bool,
    pub min_tagged_friends: usize,
    pub enable_min_length: bool,
    pub min_text_length: usize,
}

impl Default for EligibilityConfig {
    /// Hashtag check on but vacuous until a hashtag is configured, one tagged friend,
    /// ten characters of reason text.
    fn default() -> Self {
        Self {
            enable_hashtag: true,
            required_hashtag: String::new(),
            enable_tag: true,
            min_tagged_friends: 1,
            enable_min_length: true,
            min_text_length: 10,
        }
    }
}

impl EligibilityConfig {
    /// Applies the fields present in `patch`, leaving `self` untouched on error.
    pub fn merge(&self, patch: &EligibilityConfigPatch) -> Result<Self, ConfigPatchError> {
        let mut merged = self.clone();

        if let Some(required) = &patch.required_hashtag {
            let trimmed = required.trim();
            if trimmed.chars().any(char::is_whitespace) {
                return Err(ConfigPatchError::HashtagContainsWhitespace(
                    required.to_string(),
                ));
            }
            merged.required_hashtag = trimmed.to_string();
        }
        if let Some(enable) = patch.enable_hashtag {
            merged.enable_hashtag = enable;
        }
        if let Some(enable) = patch.enable_tag {
            merged.enable_tag = enable;
        }
        if let Some(min) = patch.min_tagged_friends {
            merged.min_tagged_friends = min;
        }
        if let Some(enable) = patch.enable_min_length {
            merged.enable_min_length = enable;
        }
        if let Some(min) = patch.min_text_length {
            merged.min_text_length = min;
        }

        Ok(merged)
    }
}

/// Partial update for [`EligibilityConfig`]; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EligibilityConfigPatch {
    #[serde(default)]
    pub enable_hashtag: Option<bool>,
    #[serde(default)]
    pub required_hashtag: Option<String>,
    #[serde(default)]
    pub enable_tag: Option<bool>,
    #[serde(default)]
    pub min_tagged_friends: Option<usize>,
    #[serde(default)]
    pub enable_min_length: Option<bool>,
    #[serde(default)]
    pub min_text_length: Option<usize>,
}

impl EligibilityConfigPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigPatchError {
    #[error("required hashtag must be a single token, got '{0}'")]
    HashtagContainsWhitespace(String),
}
