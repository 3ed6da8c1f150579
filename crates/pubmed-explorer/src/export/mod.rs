//! Client-side CSV export of the bookmark collection.
//!
//! UTF-8 with a byte-order mark for spreadsheet compatibility. Fields
//! containing commas, quotes or newlines are double-quoted with inner quotes
//! doubled, so a re-parse recovers the original values exactly.

use crate::models::BookmarkEntry;

/// Byte-order mark prepended for Excel.
const BOM: &str = "\u{feff}";

/// Column headers of the export.
const HEADERS: [&str; 6] = ["PMID", "Title", "Authors", "Journal", "Publication Date", "Abstract"];

/// Render the bookmark collection as CSV.
#[must_use]
pub fn bookmarks_csv(entries: &[BookmarkEntry]) -> String {
    let mut lines = vec![HEADERS.join(",")];

    for entry in entries {
        let row = [
            csv_field(&entry.pmid),
            csv_field(&entry.title),
            csv_field(&entry.authors.join("; ")),
            csv_field(&entry.journal),
            csv_field(&entry.pub_date),
            csv_field(&entry.r#abstract),
        ];
        lines.push(row.join(","));
    }

    format!("{BOM}{}\n", lines.join("\n"))
}

/// Quote a field when it needs quoting, doubling any inner quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
