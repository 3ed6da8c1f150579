//! PubMed Explorer client
//!
//! Client library and CLI for a PubMed literature-search backend: search with
//! author/date filters, AI query generation, bulk summaries, paper-scoped
//! chat, and trend/keyword/author analysis, with locally persisted bookmarks
//! and search history.
//!
//! # Architecture
//!
//! - [`client::ExplorerClient`]: typed async facade over the backend API
//! - [`search::SearchSession`]: headless state machine (filters, pagination,
//!   selection) with stale-response protection via generation tickets
//! - [`search::SearchController`]: async glue between the two
//! - [`store`]: JSON-file persistence for bookmarks and history
//! - [`view`]: pure projections from state to renderable view-models
//!
//! # Example
//!
//! ```no_run
//! use pubmed_explorer::{client::ExplorerClient, config::Config};
//! use pubmed_explorer::search::{SearchController, SearchForm};
//! use pubmed_explorer::store::{HistoryStore, JsonStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let store = JsonStore::new(config.data_dir.clone());
//!     let client = ExplorerClient::new(config)?;
//!
//!     let mut controller = SearchController::new(client, HistoryStore::new(store));
//!     controller
//!         .submit_search(SearchForm { query: "lung nodule CT".into(), ..SearchForm::default() })
//!         .await?;
//!
//!     println!("{} results", controller.session().total());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod store;
pub mod view;

pub use client::ExplorerClient;
pub use config::Config;
pub use error::{ClientError, ExplorerError, StateError, StoreError};
