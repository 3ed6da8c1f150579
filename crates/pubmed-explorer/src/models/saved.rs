//! Locally persisted entry types: bookmarks and search history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Paper;

/// A bookmarked paper.
///
/// Snapshot copy of the paper's display fields taken at bookmark time; it does
/// not update if the source paper's data changes upstream. At most one entry
/// per `pmid` exists in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkEntry {
    /// PubMed identifier (collection key).
    pub pmid: String,

    /// Title at bookmark time.
    pub title: String,

    /// Authors at bookmark time.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Journal name.
    #[serde(default)]
    pub journal: String,

    /// Publication date.
    #[serde(default)]
    pub pub_date: String,

    /// Abstract.
    #[serde(default)]
    pub r#abstract: String,

    /// MeSH keywords.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// PMC ID, when a free PDF was available.
    #[serde(default)]
    pub pmc_id: Option<String>,

    /// Citation count at bookmark time.
    #[serde(default)]
    pub citation_count: Option<i64>,

    /// When the bookmark was created.
    pub bookmarked_at: DateTime<Utc>,
}

impl BookmarkEntry {
    /// Snapshot a paper into a bookmark entry.
    #[must_use]
    pub fn snapshot(paper: &Paper, bookmarked_at: DateTime<Utc>) -> Self {
        Self {
            pmid: paper.pmid.clone(),
            title: paper.title.clone(),
            authors: paper.authors.clone(),
            journal: paper.journal.clone(),
            pub_date: paper.pub_date.clone(),
            r#abstract: paper.r#abstract.clone(),
            keywords: paper.keywords.clone(),
            pmc_id: paper.pmc_id.clone(),
            citation_count: paper.citation_count,
            bookmarked_at,
        }
    }
}

/// One remembered search.
///
/// The collection holds at most one entry per distinct `query` and is ordered
/// most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Raw user input.
    pub query: String,

    /// Machine query derived by the AI search mode, when one was used.
    #[serde(rename = "aiQuery", default)]
    pub ai_query: Option<String>,

    /// When the search was run.
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_snapshot_copies_fields() {
        let paper = Paper {
            pmid: "111".to_string(),
            title: "T".to_string(),
            authors: vec!["A".to_string()],
            journal: "J".to_string(),
            citation_count: Some(3),
            ..Paper::default()
        };
        let entry = BookmarkEntry::snapshot(&paper, Utc::now());
        assert_eq!(entry.pmid, "111");
        assert_eq!(entry.citation_count, Some(3));
    }

    #[test]
    fn test_history_entry_ai_query_wire_name() {
        let json = r#"{"query": "lung ct", "aiQuery": "(lung) AND (CT)", "date": "2024-05-01T00:00:00Z"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.ai_query.as_deref(), Some("(lung) AND (CT)"));

        let round = serde_json::to_value(&entry).unwrap();
        assert!(round.get("aiQuery").is_some());
    }
}
