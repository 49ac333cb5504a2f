//! Adapters turning collaborator payloads (sheet exports, comment dumps) into raw
//! entries, plus CSV export of validated entries. Fetching is someone else's job.

mod comments;
mod export;
mod sheet;

pub use export::write_entries_csv;

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::workflows::entries::RawEntry;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read import source: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid comments payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the sheet is empty")]
    EmptySheet,
    #[error("the sheet needs at least one data row below the header")]
    NoDataRows,
    #[error("no participants found; check the sheet column layout")]
    NoParticipants,
}

/// Reads spreadsheet exports into raw entries.
pub struct SheetImporter;

impl SheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawEntry>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawEntry>, ImportError> {
        let entries = sheet::parse_sheet(reader)?;
        info!(rows = entries.len(), "sheet rows imported");
        Ok(entries)
    }
}

/// Reads Graph API comment payloads into raw entries.
pub struct CommentImporter;

impl CommentImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawEntry>, ImportError> {
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(payload: &[u8]) -> Result<Vec<RawEntry>, ImportError> {
        let entries = comments::parse_comments(payload)?;
        info!(comments = entries.len(), "comments imported");
        Ok(entries)
    }

    /// Same as [`CommentImporter::from_slice`] for a payload that is already decoded.
    pub fn from_value(payload: serde_json::Value) -> Result<Vec<RawEntry>, ImportError> {
        let entries = comments::parse_comments_value(payload)?;
        info!(comments = entries.len(), "comments imported");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::entries::{validate_all, EligibilityConfig, EntryStatus};
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    const SHEET: &str = "ชื่อ,คอมเมนต์,แท็กเพื่อน,ไลค์เพจ,แชร์โพสต์,แฮชแท็ก\n\
Ann,\"#AngThongMusicLove love this, see you\",Somchai,ผ่าน,yes,ผ่าน\n\
,no name row,Bob,yes,yes,yes\n\
Short,hi\n\
Noor,\"#AngThongMusicLove count us in\",ไม่มี,ไม่ผ่าน,,\n";

    #[test]
    fn sheet_rows_become_raw_entries() {
        let entries = SheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_str(), "sheet-row-1");
        assert_eq!(entries[0].display_name, "Ann");
        assert_eq!(entries[0].declared_friends, vec!["Somchai".to_string()]);
        assert_eq!(entries[0].flags.liked_page, Some(true));
        assert_eq!(entries[0].flags.shared_post, Some(true));

        assert_eq!(entries[1].id.as_str(), "sheet-row-4");
        assert!(entries[1].declared_friends.is_empty());
        assert_eq!(entries[1].flags.liked_page, Some(false));
        assert_eq!(entries[1].flags.shared_post, None);
    }

    #[test]
    fn sheet_entries_validate_like_comments() {
        let config = EligibilityConfig {
            required_hashtag: "#AngThongMusicLove".to_string(),
            min_text_length: 5,
            ..EligibilityConfig::default()
        };
        let entries = validate_all(
            SheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses"),
            &config,
        );

        assert_eq!(entries[0].status, EntryStatus::Passed);
        assert_eq!(entries[1].status, EntryStatus::Failed);
        assert_eq!(entries[1].fail_reasons.len(), 1);
    }

    #[test]
    fn fail_words_override_pass_words() {
        assert_eq!(sheet::yes_no_for_tests("ไม่ผ่าน"), Some(false));
        assert_eq!(sheet::yes_no_for_tests("PASS"), Some(true));
        assert_eq!(sheet::yes_no_for_tests("maybe"), Some(false));
        assert_eq!(sheet::yes_no_for_tests("  "), None);
    }

    #[test]
    fn empty_and_header_only_sheets_are_rejected() {
        assert!(matches!(
            SheetImporter::from_reader(Cursor::new("")),
            Err(ImportError::EmptySheet)
        ));
        assert!(matches!(
            SheetImporter::from_reader(Cursor::new("name,comment,friend\n")),
            Err(ImportError::NoDataRows)
        ));
        assert!(matches!(
            SheetImporter::from_reader(Cursor::new("name,comment,friend\n,x,y\n")),
            Err(ImportError::NoParticipants)
        ));
    }

    #[test]
    fn missing_sheet_file_is_an_io_error() {
        match SheetImporter::from_path("./does-not-exist.csv") {
            Err(ImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn comments_map_author_identity() {
        let payload = br#"{
            "data": [
                {"id": "c1", "message": "@Bob let's go", "created_time": "2025-01-31T12:00:00+0000",
                 "from": {"id": "u1", "name": "Ann"}},
                {"id": "c2", "message": "anonymous", "created_time": "garbage"}
            ],
            "paging": {"cursors": {"after": "x"}}
        }"#;

        let entries = CommentImporter::from_slice(payload).expect("payload parses");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id.as_str(), "u1");
        assert_eq!(entries[0].display_name, "Ann");
        assert_eq!(
            entries[0].commented_at,
            Some(Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap())
        );
        assert_eq!(entries[1].id.as_str(), "c2");
        assert_eq!(entries[1].display_name, "Unknown");
        assert!(entries[1].commented_at.is_none());
        assert_eq!(entries[1].flags.liked_page, None);
    }

    #[test]
    fn graph_time_accepts_rfc3339() {
        assert!(comments::parse_graph_time_for_tests("2025-01-31T12:00:00Z").is_some());
        assert!(comments::parse_graph_time_for_tests("").is_none());
    }

    #[test]
    fn decoded_payload_imports_like_bytes() {
        let payload = serde_json::json!({
            "data": [{"id": "c9", "message": "hello", "from": {"id": "u9", "name": "Mali"}}]
        });

        let entries = CommentImporter::from_value(payload).expect("value parses");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "u9");
        assert!(matches!(
            CommentImporter::from_value(serde_json::json!("not a page")),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn malformed_comment_payload_is_reported() {
        assert!(matches!(
            CommentImporter::from_slice(b"not json"),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let entries = validate_all(
            SheetImporter::from_reader(Cursor::new(SHEET)).expect("sheet parses"),
            &EligibilityConfig::default(),
        );
        let mut buffer = Vec::new();
        write_entries_csv(&mut buffer, &entries).expect("export");

        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,display_name,status,tagged_friends,hashtags,text_length,fail_reasons")
        );
        assert!(lines.next().expect("first row").starts_with("sheet-row-1,Ann,passed,Somchai"));
    }
}
