//! Best-effort detection of tagged friends in free-form comment text.
//!
//! Facebook exports mentions as plain names, so a comment like
//! `"Nham Nham Umaporn อยากไปมาก"` carries the tag with no `@` marker. Each detector
//! below recognises one shape of mention; the union of their matches is the tagged
//! friend list. False positives and negatives are expected. The only guarantee is
//! that the same text always yields the same names in the same order.

use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::TaggedFriend;

static AT_MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([^\s@]+)").expect("invalid regex"));

static LATIN_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)([A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3})(?-u:\b)").expect("invalid regex")
});

static THAI_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\x{0E01}-\x{0E5B}]+\s+[\x{0E01}-\x{0E5B}]+(?:\s+[\x{0E01}-\x{0E5B}]+)?)")
        .expect("invalid regex")
});

const LATIN_MIN_EXCLUSIVE_CHARS: usize = 5;
const THAI_MIN_EXCLUSIVE_CHARS: usize = 4;

/// Everyday Thai phrases that look like two-word names but are not tags.
const THAI_COMMON_PHRASES: &[&str] = &["อยาก ไป", "ไป ด้วย", "มา ด้วย", "เพื่อน แท็ก", "ต้องการ"];

/// One independent way of spotting a mention in comment text.
pub trait MentionDetector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Candidate names in order of appearance. May contain duplicates.
    fn detect(&self, text: &str) -> Vec<String>;
}

/// Classic `@handle` mentions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtMentionDetector;

impl MentionDetector for AtMentionDetector {
    fn name(&self) -> &'static str {
        "at_mention"
    }

    fn detect(&self, text: &str) -> Vec<String> {
        AT_MENTION_RE
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|token| token.as_str().trim().to_string())
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// Two to four consecutive capitalised Latin words, e.g. `Somchai Jaidee`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinNameDetector;

impl MentionDetector for LatinNameDetector {
    fn name(&self) -> &'static str {
        "latin_name"
    }

    fn detect(&self, text: &str) -> Vec<String> {
        LATIN_NAME_RE
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|candidate| candidate.as_str().trim().to_string())
            .filter(|candidate| candidate.chars().count() > LATIN_MIN_EXCLUSIVE_CHARS)
            .collect()
    }
}

/// Two or three whitespace separated runs of Thai script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThaiNameDetector;

impl ThaiNameDetector {
    /// Only the first space of each phrase is dropped and the candidate keeps its
    /// spacing, so `มา ด้วย` written with a space is still accepted as a name.
    fn is_common_phrase(candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        THAI_COMMON_PHRASES
            .iter()
            .any(|phrase| candidate.contains(&phrase.replacen(' ', "", 1)))
    }
}

impl MentionDetector for ThaiNameDetector {
    fn name(&self) -> &'static str {
        "thai_name"
    }

    fn detect(&self, text: &str) -> Vec<String> {
        THAI_NAME_RE
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|candidate| candidate.as_str().trim().to_string())
            .filter(|candidate| candidate.chars().count() > THAI_MIN_EXCLUSIVE_CHARS)
            .filter(|candidate| !Self::is_common_phrase(candidate))
            .collect()
    }
}

static DEFAULT_DETECTORS: [&(dyn MentionDetector); 3] =
    [&AtMentionDetector, &LatinNameDetector, &ThaiNameDetector];

pub fn default_detectors() -> &'static [&'static dyn MentionDetector] {
    &DEFAULT_DETECTORS
}

/// Runs the default detectors and unions their results.
pub fn detect_tagged_friends(text: &str) -> Vec<TaggedFriend> {
    detect_with(default_detectors(), text)
}

/// Unions detector output in detector order, keeping the first copy of each exact name.
pub fn detect_with(detectors: &[&dyn MentionDetector], text: &str) -> Vec<TaggedFriend> {
    let mut friends: Vec<TaggedFriend> = Vec::new();
    for detector in detectors {
        for name in detector.detect(text) {
            push_unique(&mut friends, name);
        }
    }
    friends
}

pub(crate) fn push_unique(friends: &mut Vec<TaggedFriend>, name: String) {
    if !friends.iter().any(|friend| friend.name == name) {
        friends.push(TaggedFriend { name });
    }
}
