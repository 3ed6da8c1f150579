//! Models for the AI endpoints: query generation, summaries and chat.

use serde::{Deserialize, Serialize};

/// A PubMed query derived from a natural-language question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuery {
    /// The user's question as submitted.
    pub original_query: String,

    /// Boolean PubMed query generated from it.
    pub pubmed_query: String,

    /// Human-readable explanation of the generated query.
    pub explanation: String,

    /// Key terms extracted from the question.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Response from the bulk summarize endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Markdown summary of the requested papers.
    pub summary: String,

    /// PMIDs covered by the summary.
    #[serde(default)]
    pub pmids: Vec<String>,
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,

    /// Message text (markdown for assistant turns).
    pub content: String,
}

impl ChatMessage {
    /// Create a user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    /// Create an assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// Response from the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply (markdown).
    pub response: String,

    /// PMIDs the reply was scoped to.
    #[serde(default)]
    pub pmids: Vec<String>,
}
