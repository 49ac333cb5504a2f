use crate::workflows::entries::{
    validate_all, EligibilityConfig, Entry, ExternalFlags, RawEntry,
};

pub(super) const EVENT_HASHTAG: &str = "#AngThongMusicLove";

pub(super) fn strict_config() -> EligibilityConfig {
    EligibilityConfig {
        enable_hashtag: true,
        required_hashtag: EVENT_HASHTAG.to_string(),
        enable_tag: true,
        min_tagged_friends: 1,
        enable_min_length: true,
        min_text_length: 5,
    }
}

pub(super) fn relaxed_config() -> EligibilityConfig {
    EligibilityConfig {
        enable_hashtag: false,
        required_hashtag: EVENT_HASHTAG.to_string(),
        enable_tag: false,
        min_tagged_friends: 3,
        enable_min_length: false,
        min_text_length: 500,
    }
}

pub(super) fn raw(id: &str, name: &str, text: &str) -> RawEntry {
    RawEntry::new(id, name, text)
}

pub(super) fn validated(id: &str, text: &str, config: &EligibilityConfig) -> Entry {
    validate_all(vec![raw(id, id, text)], config)
        .pop()
        .expect("one entry validated")
}

pub(super) fn flagged(id: &str, text: &str, liked: Option<bool>, shared: Option<bool>) -> RawEntry {
    let mut entry = raw(id, id, text);
    entry.flags = ExternalFlags {
        liked_page: liked,
        shared_post: shared,
    };
    entry
}
