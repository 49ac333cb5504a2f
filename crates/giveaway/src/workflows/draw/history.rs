use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::entries::{Entry, EntryId};

pub const DEFAULT_DRAWN_BY: &str = "Admin";

/// Immutable record of a confirmed draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    id: String,
    timestamp: DateTime<Utc>,
    winner: Option<Entry>,
    total_participants: usize,
    qualified_participants: usize,
    seed: String,
    drawn_by: String,
}

impl DrawResult {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn winner(&self) -> Option<&Entry> {
        self.winner.as_ref()
    }

    pub fn total_participants(&self) -> usize {
        self.total_participants
    }

    pub fn qualified_participants(&self) -> usize {
        self.qualified_participants
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn drawn_by(&self) -> &str {
        &self.drawn_by
    }
}

/// Packages a confirmed selection, stamped with the current time.
pub fn create_draw_result(
    winner: Option<Entry>,
    all_entries: &[Entry],
    qualified_entries: &[Entry],
    seed: &str,
    drawn_by: &str,
) -> DrawResult {
    create_draw_result_at(
        winner,
        all_entries,
        qualified_entries,
        seed,
        drawn_by,
        Utc::now(),
    )
}

/// Same as [`create_draw_result`] with an explicit timestamp.
pub fn create_draw_result_at(
    winner: Option<Entry>,
    all_entries: &[Entry],
    qualified_entries: &[Entry],
    seed: &str,
    drawn_by: &str,
    timestamp: DateTime<Utc>,
) -> DrawResult {
    let drawn_by = if drawn_by.trim().is_empty() {
        DEFAULT_DRAWN_BY
    } else {
        drawn_by
    };

    DrawResult {
        id: format!("draw_{}", timestamp.timestamp_millis()),
        timestamp,
        winner,
        total_participants: all_entries.len(),
        qualified_participants: qualified_entries.len(),
        seed: seed.to_string(),
        drawn_by: drawn_by.to_string(),
    }
}

/// Caller-held draw history, most recent first. The only memory carried across draws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawHistory {
    results: Vec<DrawResult>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_results(results: Vec<DrawResult>) -> Self {
        Self { results }
    }

    pub fn record(&mut self, result: DrawResult) {
        self.results.insert(0, result);
    }

    pub fn results(&self) -> &[DrawResult] {
        &self.results
    }

    pub fn latest(&self) -> Option<&DrawResult> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Identities of every confirmed winner.
    pub fn excluded_ids(&self) -> HashSet<EntryId> {
        self.results
            .iter()
            .filter_map(|result| result.winner())
            .map(|winner| winner.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::workflows::entries::{validate_all, EligibilityConfig, RawEntry};

    fn entries() -> Vec<Entry> {
        validate_all(
            vec![
                RawEntry::new("1", "A", "#AngThongMusicLove @Bob nice event here"),
                RawEntry::new("2", "B", "no tags"),
            ],
            &EligibilityConfig {
                required_hashtag: "#AngThongMusicLove".to_string(),
                min_text_length: 5,
                ..EligibilityConfig::default()
            },
        )
    }

    #[test]
    fn result_captures_counts_and_seed() {
        let all = entries();
        let qualified: Vec<Entry> = all.iter().filter(|e| e.is_qualified()).cloned().collect();
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();

        let result =
            create_draw_result_at(Some(all[0].clone()), &all, &qualified, "SEED1", "Host", at);

        assert_eq!(result.id(), format!("draw_{}", at.timestamp_millis()));
        assert_eq!(result.timestamp(), at);
        assert_eq!(result.total_participants(), 2);
        assert_eq!(result.qualified_participants(), 1);
        assert_eq!(result.seed(), "SEED1");
        assert_eq!(result.drawn_by(), "Host");
        assert_eq!(result.winner().map(|w| w.id.as_str()), Some("1"));
    }

    #[test]
    fn blank_drawer_defaults_to_admin() {
        let result = create_draw_result(None, &[], &[], "SEED1", " ");
        assert_eq!(result.drawn_by(), DEFAULT_DRAWN_BY);
        assert!(result.winner().is_none());
    }

    #[test]
    fn history_prepends_and_tracks_winners() {
        let all = entries();
        let mut history = DrawHistory::new();
        let first = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 1, 31, 12, 5, 0).unwrap();

        history.record(create_draw_result_at(
            Some(all[0].clone()),
            &all,
            &all,
            "S1",
            "Admin",
            first,
        ));
        history.record(create_draw_result_at(
            Some(all[1].clone()),
            &all,
            &all,
            "S2",
            "Admin",
            second,
        ));
        history.record(create_draw_result_at(None, &all, &all, "S3", "Admin", second));

        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().map(|r| r.seed()), Some("S3"));
        assert_eq!(history.results()[2].seed(), "S1");

        let excluded = history.excluded_ids();
        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains(&EntryId::new("1")));

        history.clear();
        assert!(history.is_empty());
        assert!(history.excluded_ids().is_empty());
    }
}
