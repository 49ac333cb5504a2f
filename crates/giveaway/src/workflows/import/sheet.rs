use std::io::Read;

use crate::workflows::entries::{ExternalFlags, RawEntry};

use super::ImportError;

const PASS_WORDS: &[&str] = &["ผ่าน", "pass", "yes", "true", "1", "ใช่", "ok"];
const FAIL_WORDS: &[&str] = &["ไม่", "fail", "no", "false", "0"];

const NAME_COLUMN: usize = 0;
const COMMENT_COLUMN: usize = 1;
const TAGGED_FRIEND_COLUMN: usize = 2;
const LIKED_PAGE_COLUMN: usize = 3;
const SHARED_POST_COLUMN: usize = 4;
const MIN_COLUMNS: usize = 3;

/// Parses a published sheet export: a header row, then
/// `name | comment | tagged friend | liked page | shared post | hashtag` rows.
///
/// The hashtag column is ignored; hashtags are always read from the comment.
pub(crate) fn parse_sheet<R: Read>(reader: R) -> Result<Vec<RawEntry>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }
    if rows.len() < 2 {
        return Err(ImportError::NoDataRows);
    }

    let mut entries = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let name = row.get(NAME_COLUMN).unwrap_or_default();
        if row.len() < MIN_COLUMNS || name.is_empty() {
            continue;
        }

        let comment = row.get(COMMENT_COLUMN).unwrap_or_default();
        let mut entry = RawEntry::new(format!("sheet-row-{index}"), name, comment);
        entry.flags = ExternalFlags {
            liked_page: yes_no(row.get(LIKED_PAGE_COLUMN)),
            shared_post: yes_no(row.get(SHARED_POST_COLUMN)),
        };

        let friend = row.get(TAGGED_FRIEND_COLUMN).unwrap_or_default();
        if !friend.is_empty() && !is_negative(friend) {
            entry.declared_friends.push(friend.to_string());
        }

        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(ImportError::NoParticipants);
    }

    Ok(entries)
}

/// Blank cells stay unknown; otherwise a fail word wins over a pass word.
fn yes_no(cell: Option<&str>) -> Option<bool> {
    let value = cell?.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }
    if FAIL_WORDS.iter().any(|word| value.contains(word)) {
        return Some(false);
    }
    Some(PASS_WORDS.iter().any(|word| value.contains(word)))
}

/// Whole-cell negatives only, so names that merely contain "no" are kept.
fn is_negative(cell: &str) -> bool {
    let value = cell.trim().to_lowercase();
    value.starts_with("ไม่") || FAIL_WORDS.contains(&value.as_str())
}

#[cfg(test)]
pub(crate) fn yes_no_for_tests(cell: &str) -> Option<bool> {
    yes_no(Some(cell))
}
