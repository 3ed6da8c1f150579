//! Search state machine.
//!
//! [`SearchSession`] owns the current query parameters, pagination cursor,
//! result page and multi-select set, and exposes explicit transitions. It is
//! fully synchronous and headless: network work happens elsewhere (see
//! [`SearchController`]), which keeps every transition unit-testable.
//!
//! Each outbound search is represented by a [`RequestTicket`] carrying a
//! monotonically increasing generation. Responses are applied through
//! [`SearchSession::complete_ok`] / [`SearchSession::complete_err`], which
//! discard tickets whose generation is no longer current, so a late response
//! to a superseded request can never overwrite newer state.

mod chat;
mod controller;

pub use chat::ChatSession;
pub use controller::SearchController;

use std::collections::BTreeSet;

use crate::config::api;
use crate::error::StateError;
use crate::models::{Paper, SearchParams, SearchResponse, SortBy};

/// Lifecycle phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No search issued yet.
    #[default]
    Idle,
    /// A search request is in flight.
    Loading,
    /// Results are present.
    Loaded,
    /// The last request failed; prior results are retained.
    Error,
}

/// The user-filled search form: query plus optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    /// Search keywords (or a natural-language question in AI mode).
    pub query: String,

    /// Author filter.
    pub author: Option<String>,

    /// Start of the publication date range (YYYY).
    pub start_date: Option<String>,

    /// End of the publication date range (YYYY).
    pub end_date: Option<String>,
}

/// Handle for one outbound search request.
///
/// Holds the parameter snapshot to send and the generation that decides
/// whether the eventual response still applies.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,

    /// Parameters to send to the facade.
    pub params: SearchParams,
}

/// Outcome of applying a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response belonged to the current request and was applied.
    Current,
    /// The response belonged to a superseded request and was discarded.
    Stale,
}

/// Set of PMIDs selected for bulk actions.
///
/// Deliberately a cross-page accumulator: selection survives pagination,
/// sorting, and fresh searches, so a reading list can be built across
/// multiple result sets. [`SelectionSet::clear`] is the only way to empty it.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    pmids: BTreeSet<String>,
}

impl SelectionSet {
    /// Toggle one PMID; returns the resulting selected status.
    pub fn toggle(&mut self, pmid: &str) -> bool {
        if self.pmids.remove(pmid) {
            false
        } else {
            self.pmids.insert(pmid.to_string());
            true
        }
    }

    /// Select or deselect every paper of the given page.
    ///
    /// Deselection removes only that page's PMIDs; selections belonging to
    /// other pages are untouched.
    pub fn set_all(&mut self, papers: &[Paper], selected: bool) {
        for paper in papers {
            if selected {
                self.pmids.insert(paper.pmid.clone());
            } else {
                self.pmids.remove(&paper.pmid);
            }
        }
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, pmid: &str) -> bool {
        self.pmids.contains(pmid)
    }

    /// Number of selected papers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pmids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pmids.is_empty()
    }

    /// Selected PMIDs in stable order, for bulk requests.
    #[must_use]
    pub fn pmids(&self) -> Vec<String> {
        self.pmids.iter().cloned().collect()
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.pmids.clear();
    }
}

/// Search session state machine.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    params: SearchParams,
    phase: SearchPhase,
    total: u64,
    papers: Vec<Paper>,
    selection: SelectionSet,
    generation: u64,
    last_error: Option<String>,
}

impl SearchSession {
    /// Create an idle session with the fixed page size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: SearchParams { page: 1, page_size: api::PAGE_SIZE, ..SearchParams::default() },
            ..Self::default()
        }
    }

    /// Begin a new search from the form.
    ///
    /// Resets the page to 1, keeps the current sort order, and supersedes any
    /// in-flight request.
    pub fn begin_search(&mut self, form: SearchForm) -> RequestTicket {
        self.params.query = form.query;
        self.params.author = form.author;
        self.params.start_date = form.start_date;
        self.params.end_date = form.end_date;
        self.params.page = 1;
        self.issue()
    }

    /// Re-issue the current search with a new sort order, back on page 1.
    pub fn begin_sort(&mut self, sort_by: SortBy) -> RequestTicket {
        self.params.sort_by = sort_by;
        self.params.page = 1;
        self.issue()
    }

    /// Set the sort order without issuing a request, for configuring the
    /// session before its first search.
    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.params.sort_by = sort_by;
    }

    /// Re-issue the current search for another page.
    ///
    /// Filters, sort order and the selection set are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::PageOutOfRange`] unless `1 <= page <= total_pages`.
    pub fn begin_page(&mut self, page: u32) -> Result<RequestTicket, StateError> {
        let total_pages = self.total_pages();
        if page < 1 || page > total_pages {
            return Err(StateError::PageOutOfRange { page, total_pages });
        }

        self.params.page = page;
        Ok(self.issue())
    }

    fn issue(&mut self) -> RequestTicket {
        self.generation += 1;
        self.phase = SearchPhase::Loading;
        RequestTicket { generation: self.generation, params: self.params.clone() }
    }

    /// Apply a successful response.
    ///
    /// Discarded (no state change) when the ticket is stale.
    pub fn complete_ok(&mut self, ticket: RequestTicket, response: SearchResponse) -> Applied {
        if ticket.generation != self.generation {
            return Applied::Stale;
        }

        self.total = response.total;
        self.papers = response.papers;
        self.phase = SearchPhase::Loaded;
        self.last_error = None;
        Applied::Current
    }

    /// Apply a failed response.
    ///
    /// Moves to the error phase and records the message; `total` and `papers`
    /// keep their prior values so the previously rendered result set stays on
    /// screen. Discarded when the ticket is stale.
    pub fn complete_err(&mut self, ticket: RequestTicket, message: impl Into<String>) -> Applied {
        if ticket.generation != self.generation {
            return Applied::Stale;
        }

        self.phase = SearchPhase::Error;
        self.last_error = Some(message.into());
        Applied::Current
    }

    /// Toggle selection of one PMID; the paper need not be on the current page.
    pub fn toggle_selection(&mut self, pmid: &str) -> bool {
        self.selection.toggle(pmid)
    }

    /// Select or deselect every paper on the current page.
    pub fn select_all_on_page(&mut self, selected: bool) {
        let papers = self.papers.clone();
        self.selection.set_all(&papers, selected);
    }

    /// Drop every selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selection set.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Current request parameters.
    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Server-reported total for the current result set.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Papers on the current page.
    #[must_use]
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.params.page
    }

    /// Number of pages for the current result set.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.params.page_size)
    }

    /// Message of the last failed request, if the session is in the error phase.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// `ceil(total / page_size)`.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size)) as u32
}
