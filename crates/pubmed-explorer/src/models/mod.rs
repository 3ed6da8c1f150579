//! Data models for backend API entities and locally persisted collections.
//!
//! API models are snake_case to match the backend's wire format; persisted
//! history entries keep the legacy `aiQuery` field name.

mod ai;
mod analysis;
mod inputs;
mod paper;
mod saved;

pub use ai::{ChatMessage, ChatResponse, GeneratedQuery, SummaryResponse};
pub use analysis::{AnalysisBundle, AuthorCount, KeywordCount, TrendPoint};
pub use inputs::{AnalysisFilter, SearchParams, SortBy};
pub use paper::{Paper, SearchResponse};
pub use saved::{BookmarkEntry, HistoryEntry};
