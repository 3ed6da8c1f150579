//! HTTP client for the PubMed Explorer backend.
//!
//! Thin typed wrapper over the backend API: one method per capability,
//! connection pooling via reqwest, FastAPI error bodies normalized into
//! [`ClientError`]. Requests are not retried and responses are not cached;
//! callers decide what a failure means for their state.

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AnalysisBundle, AnalysisFilter, AuthorCount, ChatMessage, ChatResponse, GeneratedQuery,
    KeywordCount, Paper, SearchParams, SearchResponse, SummaryResponse, TrendPoint,
};

/// Client for the search backend.
#[derive(Clone)]
pub struct ExplorerClient {
    /// Pooled HTTP client.
    client: Client,

    /// Backend base URL.
    base_url: String,

    /// Language forwarded to the AI endpoints.
    language: String,
}

impl ExplorerClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    /// Language forwarded to the AI endpoints.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Search for papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search(&self, params: &SearchParams) -> ClientResult<SearchResponse> {
        let url = format!("{}/api/search", self.base_url);
        self.get(&url, &params.to_query_pairs()).await
    }

    /// Get a single paper by PMID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for unknown PMIDs.
    pub async fn get_paper(&self, pmid: &str) -> ClientResult<Paper> {
        let url = format!("{}/api/paper/{}", self.base_url, pmid);
        self.get(&url, &[]).await
    }

    /// Turn a natural-language question into a PubMed boolean query.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn generate_query(&self, natural_query: &str) -> ClientResult<GeneratedQuery> {
        let url = format!("{}/api/generate-query", self.base_url);
        let body = serde_json::json!({ "query": natural_query });
        self.post(&url, &body).await
    }

    /// Summarize a set of papers.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn summarize(&self, pmids: &[String]) -> ClientResult<SummaryResponse> {
        let url = format!("{}/api/summarize", self.base_url);
        let body = serde_json::json!({
            "pmids": pmids,
            "language": self.language,
        });
        self.post(&url, &body).await
    }

    /// Ask a question about a set of papers, with conversation history.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn chat(
        &self,
        pmids: &[String],
        message: &str,
        history: &[ChatMessage],
    ) -> ClientResult<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);
        let body = serde_json::json!({
            "pmids": pmids,
            "message": message,
            "history": history,
            "language": self.language,
        });
        self.post(&url, &body).await
    }

    /// Publication trend per year for the filtered result set.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn analyze_trends(&self, filter: &AnalysisFilter) -> ClientResult<Vec<TrendPoint>> {
        let url = format!("{}/api/analyze/trends", self.base_url);
        self.get(&url, &filter.to_query_pairs()).await
    }

    /// Keyword frequencies for the filtered result set.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn analyze_keywords(
        &self,
        filter: &AnalysisFilter,
    ) -> ClientResult<Vec<KeywordCount>> {
        let url = format!("{}/api/analyze/keywords", self.base_url);
        self.get(&url, &filter.to_query_pairs()).await
    }

    /// Author paper counts for the filtered result set.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn analyze_authors(&self, filter: &AnalysisFilter) -> ClientResult<Vec<AuthorCount>> {
        let url = format!("{}/api/analyze/authors", self.base_url);
        self.get(&url, &filter.to_query_pairs()).await
    }

    /// Fetch all three analysis sections concurrently.
    ///
    /// The fetches are independent and order-insensitive; a failed section is
    /// logged and comes back `None` rather than failing the bundle.
    pub async fn load_analysis(&self, filter: &AnalysisFilter) -> AnalysisBundle {
        let (trends, keywords, authors) = futures::join!(
            self.analyze_trends(filter),
            self.analyze_keywords(filter),
            self.analyze_authors(filter),
        );

        AnalysisBundle {
            trends: trends.map_err(|e| tracing::warn!(error = %e, "trend analysis failed")).ok(),
            keywords: keywords
                .map_err(|e| tracing::warn!(error = %e, "keyword analysis failed"))
                .ok(),
            authors: authors
                .map_err(|e| tracing::warn!(error = %e, "author analysis failed"))
                .ok(),
        }
    }

    /// Download search results as CSV (UTF-8 with BOM, server-generated).
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn export_csv(&self, filter: &AnalysisFilter, max_results: u32) -> ClientResult<String> {
        let url = format!("{}/api/export/csv", self.base_url);
        let pairs = filter.to_export_pairs(max_results);

        let response = self.client.get(&url).query(&pairs).send().await?;
        let response = Self::handle_response(response).await?;
        Ok(response.text().await?)
    }

    /// Backend health check.
    ///
    /// # Errors
    ///
    /// Returns error when the backend is unreachable or unhealthy.
    pub async fn health(&self) -> ClientResult<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await?;
        Ok(())
    }

    /// Make a GET request and decode the JSON body.
    async fn get<T>(&self, url: &str, pairs: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(pairs).send().await?;
        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Make a POST request and decode the JSON body.
    async fn post<T>(&self, url: &str, body: &serde_json::Value) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.post(url).json(body).send().await?;
        let response = Self::handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Map non-success responses to typed errors.
    ///
    /// The backend wraps failures as `{"detail": "..."}`; the detail string is
    /// surfaced verbatim when present.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = extract_detail(&text);

        match status.as_u16() {
            404 => Err(ClientError::not_found(detail)),
            code => Err(ClientError::api(code, detail)),
        }
    }
}

/// Pull the `detail` field out of a FastAPI error body, falling back to the
/// raw body, then to a generic message.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown server error".to_string()
            } else {
                body.to_string()
            }
        })
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient").field("base_url", &self.base_url).finish()
    }
}
