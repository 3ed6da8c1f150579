//! Async orchestration around the search session.
//!
//! The controller is the single owner of the session, the HTTP facade and the
//! history store: user intent comes in, a state transition issues a ticket,
//! the facade call runs, and the outcome is applied back through the ticket
//! (which silently drops superseded responses).

use tracing::{debug, warn};

use super::{RequestTicket, SearchForm, SearchSession};
use crate::client::ExplorerClient;
use crate::error::ExplorerError;
use crate::models::{AnalysisBundle, GeneratedQuery, SortBy};
use crate::store::HistoryStore;

/// Controller driving searches, sorting, pagination and analysis.
#[derive(Debug)]
pub struct SearchController {
    client: ExplorerClient,
    session: SearchSession,
    history: HistoryStore,
}

impl SearchController {
    /// Create a controller with an idle session.
    #[must_use]
    pub fn new(client: ExplorerClient, history: HistoryStore) -> Self {
        Self { client, session: SearchSession::new(), history }
    }

    /// Read access to the session for rendering.
    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Mutable access to the session for selection operations.
    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// The history store backing this controller.
    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Submit the search form.
    ///
    /// Records a history entry before the request goes out, then runs the
    /// search. The query is passed through as typed; the backend validates it.
    ///
    /// # Errors
    ///
    /// Returns the facade error on failure; the session keeps its prior
    /// results and records the user-facing message.
    pub async fn submit_search(&mut self, form: SearchForm) -> Result<(), ExplorerError> {
        self.record_history(&form.query, None);
        let ticket = self.session.begin_search(form);
        self.dispatch(ticket).await
    }

    /// Submit a natural-language question: generate a PubMed query, record it
    /// in the history alongside the question, then search with it.
    ///
    /// Returns the generated query so the caller can display the explanation
    /// and keywords.
    ///
    /// # Errors
    ///
    /// Returns the facade error when generation or the search fails.
    pub async fn submit_ai_search(
        &mut self,
        form: SearchForm,
    ) -> Result<GeneratedQuery, ExplorerError> {
        let generated = self.client.generate_query(&form.query).await?;
        debug!(pubmed_query = %generated.pubmed_query, "generated search query");

        self.record_history(&form.query, Some(&generated.pubmed_query));

        let form = SearchForm { query: generated.pubmed_query.clone(), ..form };
        let ticket = self.session.begin_search(form);
        self.dispatch(ticket).await?;

        Ok(generated)
    }

    /// Change the sort order and re-run the current search from page 1.
    ///
    /// Does not record a history entry.
    ///
    /// # Errors
    ///
    /// Returns the facade error on failure.
    pub async fn change_sort(&mut self, sort_by: SortBy) -> Result<(), ExplorerError> {
        let ticket = self.session.begin_sort(sort_by);
        self.dispatch(ticket).await
    }

    /// Fetch another page of the current search.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::StateError::PageOutOfRange`] for invalid pages,
    /// or the facade error on failure.
    pub async fn go_to_page(&mut self, page: u32) -> Result<(), ExplorerError> {
        let ticket = self.session.begin_page(page)?;
        self.dispatch(ticket).await
    }

    /// Fetch the three analysis sections for the current filters.
    ///
    /// Failures are per-section and non-fatal.
    pub async fn load_analysis(&self) -> AnalysisBundle {
        self.client.load_analysis(&self.session.params().analysis_filter()).await
    }

    async fn dispatch(&mut self, ticket: RequestTicket) -> Result<(), ExplorerError> {
        match self.client.search(&ticket.params).await {
            Ok(response) => {
                self.session.complete_ok(ticket, response);
                Ok(())
            }
            Err(e) => {
                self.session.complete_err(ticket, e.user_message());
                Err(e.into())
            }
        }
    }

    /// History persistence must never block a search.
    fn record_history(&self, query: &str, ai_query: Option<&str>) {
        if let Err(e) = self.history.add(query, ai_query) {
            warn!(error = %e, "failed to record search history");
        }
    }
}
