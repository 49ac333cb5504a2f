use std::io::Write;

use serde::Serialize;

use crate::workflows::entries::Entry;

use super::ImportError;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    display_name: &'a str,
    status: &'static str,
    tagged_friends: String,
    hashtags: String,
    text_length: usize,
    fail_reasons: String,
}

/// Writes validated entries as CSV with a header row. List columns are `; `-joined.
pub fn write_entries_csv<W: Write>(writer: W, entries: &[Entry]) -> Result<(), ImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for entry in entries {
        csv_writer.serialize(ExportRow {
            id: entry.id.as_str(),
            display_name: &entry.display_name,
            status: entry.status.label(),
            tagged_friends: entry
                .tagged_friends
                .iter()
                .map(|friend| friend.name.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            hashtags: entry.hashtags.join("; "),
            text_length: entry.text_length,
            fail_reasons: entry.fail_reasons.join("; "),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
