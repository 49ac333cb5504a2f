use super::common::*;
use crate::workflows::entries::{
    extract_entry, validate_all, validate_entry, EligibilityConfig, EligibilityConfigPatch,
    EligibilityEngine, EntryStatus, FailReason,
};

#[test]
fn qualifying_comment_passes_every_rule() {
    let entry = validated("1", "#AngThongMusicLove @Bob nice event here", &strict_config());

    assert_eq!(entry.status, EntryStatus::Passed);
    assert!(entry.fail_reasons.is_empty());
    assert_eq!(entry.tagged_friends.len(), 1);
    assert_eq!(entry.tagged_friends[0].name, "Bob");
    assert!(entry.conditions.has_tagged_friend);
    assert!(entry.conditions.has_hashtag);
    assert!(entry.conditions.has_reason);
}

#[test]
fn failures_are_reported_in_rule_order() {
    let entry = validated("2", "hi", &strict_config());

    assert_eq!(entry.status, EntryStatus::Failed);
    assert_eq!(
        entry.fail_reasons,
        vec![
            "no tagged friend (at least 1 required)".to_string(),
            "missing required hashtag #AngThongMusicLove".to_string(),
            "comment too short (at least 5 characters required)".to_string(),
        ]
    );
}

#[test]
fn disabled_rules_never_contribute_reasons() {
    let entry = validated("3", "", &relaxed_config());

    assert_eq!(entry.status, EntryStatus::Passed);
    assert!(entry.fail_reasons.is_empty());
    assert!(entry.conditions.has_tagged_friend);
    assert!(entry.conditions.has_hashtag);
    assert!(entry.conditions.has_reason);
}

#[test]
fn zero_friend_minimum_is_vacuous_even_when_enabled() {
    let config = EligibilityConfig {
        min_tagged_friends: 0,
        ..strict_config()
    };
    let entry = validated("4", "#AngThongMusicLove lovely music", &config);

    assert!(entry.tagged_friends.is_empty());
    assert_eq!(entry.status, EntryStatus::Passed);
}

#[test]
fn bare_hash_requirement_disables_hashtag_rule() {
    for required in ["", "#", "  "] {
        let config = EligibilityConfig {
            required_hashtag: required.to_string(),
            ..strict_config()
        };
        let entry = validated("5", "@Bob wonderful evening", &config);
        assert_eq!(entry.status, EntryStatus::Passed, "required = {required:?}");
    }
}

#[test]
fn lowercase_requirement_matches_camel_case_hashtag() {
    let config = EligibilityConfig {
        required_hashtag: "#angthongmusiclove".to_string(),
        ..strict_config()
    };
    let entry = validated("6", "#AngThongMusicLove @Bob see you there", &config);
    assert_eq!(entry.status, EntryStatus::Passed);
}

#[test]
fn external_flags_are_passthrough_only() {
    let entries = validate_all(
        vec![
            flagged("7", "#AngThongMusicLove @Bob count me in", Some(false), Some(false)),
            flagged("8", "#AngThongMusicLove @Bob count me in", None, Some(true)),
        ],
        &strict_config(),
    );

    assert!(entries.iter().all(|entry| entry.status == EntryStatus::Passed));
    assert_eq!(entries[0].conditions.has_liked_page, Some(false));
    assert_eq!(entries[1].conditions.has_liked_page, None);
    assert_eq!(entries[1].conditions.has_shared_post, Some(true));
}

#[test]
fn validation_is_repeatable() {
    let config = strict_config();
    let entry = extract_entry(raw("9", "Nine", "@Ann short"));

    let first = validate_entry(&entry, &config);
    let second = validate_entry(&entry, &config);
    assert_eq!(first, second);
    assert_eq!(first.status, EntryStatus::Failed);
    assert_eq!(first.fail_reasons.len(), 1);
}

#[test]
fn declared_friends_count_towards_tag_rule() {
    let mut raw_entry = raw("10", "Ten", "#AngThongMusicLove want to go");
    raw_entry.declared_friends = vec!["Somchai".to_string(), "  ".to_string()];

    let engine = EligibilityEngine::new(strict_config());
    let entry = engine.admit(raw_entry);

    assert_eq!(entry.tagged_friends.len(), 1);
    assert_eq!(entry.status, EntryStatus::Passed);
}

#[test]
fn revalidation_follows_config_changes() {
    let engine = EligibilityEngine::new(strict_config());
    let mut entry = engine.admit(raw("11", "Eleven", "@Bob good vibes"));
    assert_eq!(entry.status, EntryStatus::Failed);

    let relaxed = strict_config()
        .merge(&EligibilityConfigPatch {
            enable_hashtag: Some(false),
            ..EligibilityConfigPatch::default()
        })
        .expect("patch applies");
    EligibilityEngine::new(relaxed).apply(&mut entry);

    assert_eq!(entry.status, EntryStatus::Passed);
    assert!(entry.fail_reasons.is_empty());
}

#[test]
fn fail_reason_summaries_interpolate_thresholds() {
    let reason = FailReason::TextTooShort {
        required: 12,
        found: 3,
    };
    assert!(reason.summary().contains("12"));
}

#[test]
fn merge_rejects_multi_word_hashtags_and_keeps_original() {
    let original = strict_config();
    let error = original
        .merge(&EligibilityConfigPatch {
            required_hashtag: Some("#two words".to_string()),
            min_text_length: Some(1),
            ..EligibilityConfigPatch::default()
        })
        .expect_err("whitespace rejected");

    assert!(error.to_string().contains("single token"));
    assert_eq!(original.min_text_length, 5);
}

#[test]
fn merge_only_touches_present_fields() {
    let merged = strict_config()
        .merge(&EligibilityConfigPatch {
            min_tagged_friends: Some(2),
            required_hashtag: Some("  #NewTag ".to_string()),
            ..EligibilityConfigPatch::default()
        })
        .expect("patch applies");

    assert_eq!(merged.min_tagged_friends, 2);
    assert_eq!(merged.required_hashtag, "#NewTag");
    assert!(merged.enable_min_length);
    assert_eq!(merged.min_text_length, 5);
    assert!(EligibilityConfigPatch::default().is_empty());
}
