//! Paper data model matching the backend schema.

use serde::{Deserialize, Serialize};

/// A paper returned by the search backend.
///
/// Identified by `pmid` everywhere: bookmarking, selection, chat scoping.
/// Immutable once fetched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    /// PubMed unique identifier.
    pub pmid: String,

    /// Paper title.
    #[serde(default)]
    pub title: String,

    /// Author names, in publication order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Paper abstract (may be empty).
    #[serde(default)]
    pub r#abstract: String,

    /// Publication date as reported by PubMed.
    #[serde(default)]
    pub pub_date: String,

    /// Journal name.
    #[serde(default)]
    pub journal: String,

    /// MeSH keywords.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// PubMed Central ID; present when a free full-text PDF is available.
    #[serde(default)]
    pub pmc_id: Option<String>,

    /// Citation count from iCite.
    #[serde(default)]
    pub citation_count: Option<i64>,
}

impl Paper {
    /// Check whether a free full-text PDF is available.
    #[must_use]
    pub const fn has_free_pdf(&self) -> bool {
        self.pmc_id.is_some()
    }

    /// Get the citation count, or `None` rendered as "-" by the view layer.
    #[must_use]
    pub fn citations(&self) -> Option<i64> {
        self.citation_count
    }

    /// Author names joined for display, truncated to the first `max` with
    /// an "et al." style suffix.
    #[must_use]
    pub fn author_line(&self, max: usize) -> String {
        let shown = self.authors.iter().take(max).cloned().collect::<Vec<_>>().join(", ");
        let rest = self.authors.len().saturating_sub(max);
        if rest > 0 { format!("{shown} +{rest} more") } else { shown }
    }

    /// Canonical PubMed URL for this paper.
    #[must_use]
    pub fn pubmed_url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pmid)
    }

    /// PubMed Central PDF URL, if a PMC ID is present.
    #[must_use]
    pub fn pmc_pdf_url(&self) -> Option<String> {
        self.pmc_id
            .as_ref()
            .map(|id| format!("https://www.ncbi.nlm.nih.gov/pmc/articles/{id}/pdf/"))
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matching papers (server-reported).
    #[serde(default)]
    pub total: u64,

    /// 1-based page this response covers.
    #[serde(default)]
    pub page: u32,

    /// Page size the server applied.
    #[serde(default)]
    pub page_size: u32,

    /// Papers on this page only, not the full result set.
    #[serde(default)]
    pub papers: Vec<Paper>,
}
