//! Models for the analysis endpoints (publication trends, keywords, authors).

use serde::{Deserialize, Serialize};

/// Publication count for one year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendPoint {
    /// Publication year.
    pub year: String,

    /// Papers published that year within the result set.
    pub count: u64,
}

/// Occurrence count for one keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordCount {
    /// MeSH keyword.
    pub keyword: String,

    /// Occurrences within the result set.
    pub count: u64,
}

/// Paper count for one author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCount {
    /// Author name.
    pub author: String,

    /// Papers within the result set.
    pub count: u64,
}

/// The three analysis sections, fetched concurrently.
///
/// Each section is `None` when its fetch failed; analysis failures are
/// non-fatal to the search flow.
#[derive(Debug, Clone, Default)]
pub struct AnalysisBundle {
    /// Publication trend per year.
    pub trends: Option<Vec<TrendPoint>>,

    /// Top keywords.
    pub keywords: Option<Vec<KeywordCount>>,

    /// Most prolific authors.
    pub authors: Option<Vec<AuthorCount>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_point_deserialize() {
        let rows: Vec<TrendPoint> =
            serde_json::from_str(r#"[{"year": "2023", "count": 41}, {"year": "2024", "count": 57}]"#)
                .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], TrendPoint { year: "2024".to_string(), count: 57 });
    }
}
