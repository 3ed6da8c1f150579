//! Request parameter types for the backend API.

use serde::{Deserialize, Serialize};

use crate::config::api;

/// Result ordering for searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// PubMed relevance ranking.
    #[default]
    Relevance,
    /// Most recent first (PubMed `pub_date`).
    Date,
    /// Citation count; ranked client-visibly since PubMed does not sort by it.
    Citations,
}

impl SortBy {
    /// Wire name of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Date => "date",
            Self::Citations => "citations",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "date" => Ok(Self::Date),
            "citations" => Ok(Self::Citations),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Full parameter set for one search request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Search keywords or a generated boolean query.
    pub query: String,

    /// Author filter.
    pub author: Option<String>,

    /// Start of the publication date range (YYYY).
    pub start_date: Option<String>,

    /// End of the publication date range (YYYY).
    pub end_date: Option<String>,

    /// 1-based page.
    pub page: u32,

    /// Results per page.
    pub page_size: u32,

    /// Result ordering.
    pub sort_by: SortBy,
}

impl SearchParams {
    /// Query string pairs for `GET /api/search`.
    ///
    /// Optional filters are appended only when present, matching the request
    /// shape the backend expects.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("query".to_string(), self.query.clone()),
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
            ("sort_by".to_string(), self.sort_by.as_str().to_string()),
        ];
        append_filters(&mut pairs, &self.author, &self.start_date, &self.end_date);
        pairs
    }

    /// The same filters minus pagination, for the analysis endpoints.
    #[must_use]
    pub fn analysis_filter(&self) -> AnalysisFilter {
        AnalysisFilter {
            query: self.query.clone(),
            author: self.author.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Filter set for the analysis and CSV export endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisFilter {
    /// Search keywords.
    pub query: String,

    /// Author filter.
    pub author: Option<String>,

    /// Start of the publication date range (YYYY).
    pub start_date: Option<String>,

    /// End of the publication date range (YYYY).
    pub end_date: Option<String>,
}

impl AnalysisFilter {
    /// Query string pairs for the `GET /api/analyze/*` endpoints.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("query".to_string(), self.query.clone())];
        append_filters(&mut pairs, &self.author, &self.start_date, &self.end_date);
        pairs
    }

    /// Query string pairs for `GET /api/export/csv`.
    #[must_use]
    pub fn to_export_pairs(&self, max_results: u32) -> Vec<(String, String)> {
        let max = max_results.min(api::EXPORT_RESULT_CAP);
        let mut pairs = vec![
            ("query".to_string(), self.query.clone()),
            ("max_results".to_string(), max.to_string()),
        ];
        append_filters(&mut pairs, &self.author, &self.start_date, &self.end_date);
        pairs
    }
}

fn append_filters(
    pairs: &mut Vec<(String, String)>,
    author: &Option<String>,
    start_date: &Option<String>,
    end_date: &Option<String>,
) {
    if let Some(author) = author {
        pairs.push(("author".to_string(), author.clone()));
    }
    if let Some(start) = start_date {
        pairs.push(("start_date".to_string(), start.clone()));
    }
    if let Some(end) = end_date {
        pairs.push(("end_date".to_string(), end.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_wire_names() {
        assert_eq!(SortBy::Relevance.as_str(), "relevance");
        assert_eq!("citations".parse::<SortBy>().unwrap(), SortBy::Citations);
        assert!("upvotes".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_search_params_skips_absent_filters() {
        let params = SearchParams {
            query: "lung nodule".to_string(),
            page: 1,
            page_size: 20,
            ..SearchParams::default()
        };
        let pairs = params.to_query_pairs();
        assert!(pairs.iter().any(|(k, v)| k == "query" && v == "lung nodule"));
        assert!(pairs.iter().all(|(k, _)| k != "author"));
        assert!(pairs.iter().all(|(k, _)| k != "start_date"));
    }

    #[test]
    fn test_export_pairs_caps_max_results() {
        let filter = AnalysisFilter { query: "ct".to_string(), ..AnalysisFilter::default() };
        let pairs = filter.to_export_pairs(9999);
        assert!(pairs.contains(&("max_results".to_string(), "500".to_string())));
    }
}
