use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::TaggedFriend;
use super::mentions::detect_tagged_friends;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^\s#,.!?]+").expect("invalid regex"));

static MENTION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[^\s@]+").expect("invalid regex"));

/// Structured signals pulled out of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub tagged_friends: Vec<TaggedFriend>,
    pub hashtags: Vec<String>,
    pub text_length: usize,
}

/// Extracts friends, hashtags, and substantive text length. Total over any input.
pub fn extract_features(text: &str) -> TextFeatures {
    TextFeatures {
        tagged_friends: detect_tagged_friends(text),
        hashtags: extract_hashtags(text),
        text_length: substantive_length(text),
    }
}

/// Hashtag tokens in order of appearance, case preserved, duplicates kept.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(text)
        .map(|token| token.as_str().to_string())
        .collect()
}

/// Character count once hashtags, `@mentions`, and whitespace are removed.
pub fn substantive_length(text: &str) -> usize {
    let without_hashtags = HASHTAG_RE.replace_all(text, "");
    let without_mentions = MENTION_TOKEN_RE.replace_all(&without_hashtags, "");
    without_mentions
        .chars()
        .filter(|c| !c.is_whitespace())
        .count()
}

/// True when the requirement is blank or a bare `#`, i.e. there is nothing to check.
pub fn is_blank_requirement(required: &str) -> bool {
    normalize_hashtag(required).is_empty()
}

/// Lenient hashtag match: case-insensitive, punctuation-insensitive, and satisfied by a
/// substring relation in either direction so `#AngthongMusicLove2024` still counts.
pub fn has_required_hashtag<S: AsRef<str>>(hashtags: &[S], required: &str) -> bool {
    let required = normalize_hashtag(required);
    if required.is_empty() {
        return true;
    }

    hashtags.iter().any(|hashtag| {
        let normalized = normalize_hashtag(hashtag.as_ref());
        !normalized.is_empty()
            && (normalized == required
                || normalized.contains(&required)
                || required.contains(&normalized))
    })
}

/// Lowercases and keeps only ASCII letters, digits, and the Thai block.
pub fn normalize_hashtag(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_thai(*c))
        .collect()
}

fn is_thai(c: char) -> bool {
    ('\u{0E01}'..='\u{0E5B}').contains(&c)
}
