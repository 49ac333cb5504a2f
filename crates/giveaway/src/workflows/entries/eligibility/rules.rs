use super::super::features::{has_required_hashtag, is_blank_requirement, TextFeatures};
use super::config::EligibilityConfig;
use serde::{Deserialize, Serialize};

/// Why an entry failed one of the automatic checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    NotEnoughTaggedFriends { required: usize, found: usize },
    MissingHashtag { required: String },
    TextTooShort { required: usize, found: usize },
}

impl FailReason {
    pub fn summary(&self) -> String {
        match self {
            FailReason::NotEnoughTaggedFriends { required, .. } => {
                format!("no tagged friend (at least {required} required)")
            }
            FailReason::MissingHashtag { required } => {
                format!("missing required hashtag {required}")
            }
            FailReason::TextTooShort { required, .. } => {
                format!("comment too short (at least {required} characters required)")
            }
        }
    }
}

pub(crate) struct RuleSignals {
    pub has_tagged_friend: bool,
    pub has_hashtag: bool,
    pub has_reason: bool,
}

/// Evaluates tag, hashtag, and length rules in that order. Disabled rules pass.
pub(crate) fn evaluate_rules(
    features: &TextFeatures,
    config: &EligibilityConfig,
) -> (Vec<FailReason>, RuleSignals) {
    let mut reasons = Vec::new();

    let found_friends = features.tagged_friends.len();
    let has_tagged_friend = !config.enable_tag || found_friends >= config.min_tagged_friends;
    if !has_tagged_friend {
        reasons.push(FailReason::NotEnoughTaggedFriends {
            required: config.min_tagged_friends,
            found: found_friends,
        });
    }

    let has_hashtag = !config.enable_hashtag
        || is_blank_requirement(&config.required_hashtag)
        || has_required_hashtag(&features.hashtags, &config.required_hashtag);
    if !has_hashtag {
        reasons.push(FailReason::MissingHashtag {
            required: config.required_hashtag.clone(),
        });
    }

    let has_reason = !config.enable_min_length || features.text_length >= config.min_text_length;
    if !has_reason {
        reasons.push(FailReason::TextTooShort {
            required: config.min_text_length,
            found: features.text_length,
        });
    }

    (
        reasons,
        RuleSignals {
            has_tagged_friend,
            has_hashtag,
            has_reason,
        },
    )
}
