//! PubMed Explorer - command line entry point.

use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pubmed_explorer::export::bookmarks_csv;
use pubmed_explorer::models::{AnalysisFilter, SortBy};
use pubmed_explorer::search::{ChatSession, SearchController, SearchForm};
use pubmed_explorer::store::{BookmarkStore, HistoryStore, JsonStore};
use pubmed_explorer::view;
use pubmed_explorer::{Config, ExplorerClient};

#[derive(Parser, Debug)]
#[command(name = "pubmed-explorer")]
#[command(about = "Search PubMed with AI query generation, summaries and trend analysis")]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "PUBMED_EXPLORER_URL")]
    base_url: Option<String>,

    /// Language for AI summaries and chat (korean or english)
    #[arg(long, env = "PUBMED_EXPLORER_LANG")]
    language: Option<String>,

    /// Directory for bookmarks and search history
    #[arg(long, env = "PUBMED_EXPLORER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::Args)]
struct FilterArgs {
    /// Author filter
    #[arg(long)]
    author: Option<String>,

    /// Start of the publication date range (YYYY)
    #[arg(long = "from")]
    start_date: Option<String>,

    /// End of the publication date range (YYYY)
    #[arg(long = "to")]
    end_date: Option<String>,
}

impl FilterArgs {
    fn into_form(self, query: String) -> SearchForm {
        SearchForm {
            query,
            author: self.author,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for papers
    Search {
        /// Search keywords
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Result ordering
        #[arg(long, default_value = "relevance", value_parser = parse_sort)]
        sort: SortBy,

        /// Also fetch trend/keyword/author analysis
        #[arg(long)]
        analyze: bool,
    },

    /// Ask in natural language; generates a PubMed query, then searches
    Ask {
        /// The question
        question: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show one paper
    Paper {
        /// PubMed ID
        pmid: String,
    },

    /// Summarize a set of papers
    Summarize {
        /// PubMed IDs
        #[arg(required = true)]
        pmids: Vec<String>,
    },

    /// Chat about a set of papers (interactive; empty line quits)
    Chat {
        /// PubMed IDs
        #[arg(required = true)]
        pmids: Vec<String>,
    },

    /// Trend, keyword and author analysis for a query
    Analyze {
        /// Search keywords
        query: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Download search results as CSV (server-side export)
    Export {
        /// Search keywords
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum results to export
        #[arg(long, default_value_t = pubmed_explorer::config::api::EXPORT_MAX_RESULTS)]
        max_results: u32,

        /// Output file
        #[arg(short, long, default_value = "pubmed_results.csv")]
        output: PathBuf,
    },

    /// Manage bookmarked papers
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommand,
    },

    /// Manage search history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkCommand {
    /// List bookmarks
    List,

    /// Bookmark a paper by PMID
    Add {
        /// PubMed ID
        pmid: String,
    },

    /// Remove a bookmark
    Remove {
        /// PubMed ID
        pmid: String,
    },

    /// Remove all bookmarks
    Clear,

    /// Export bookmarks to CSV
    Export {
        /// Output file (defaults to pubmed_bookmarks_<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize all bookmarked papers
    Summarize,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List remembered searches, most recent first
    List,

    /// Remove one entry by its listed index
    Remove {
        /// Index from `history list`
        index: usize,
    },

    /// Remove all entries
    Clear,
}

fn parse_sort(s: &str) -> Result<SortBy, String> {
    s.parse()
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env();
    if let Some(url) = cli.base_url.clone() {
        config.base_url = url;
    }
    if let Some(lang) = cli.language.clone() {
        config.language = lang;
    }
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    let store = JsonStore::new(config.data_dir.clone());
    let bookmarks = BookmarkStore::new(store.clone());
    let history = HistoryStore::new(store);
    let client = ExplorerClient::new(config)?;

    match cli.command {
        Command::Search { query, filters, page, sort, analyze } => {
            let mut controller = SearchController::new(client, history);
            controller.session_mut().set_sort(sort);
            controller.submit_search(filters.into_form(query)).await?;
            if page > 1 {
                controller.go_to_page(page).await?;
            }

            let bookmarked: Vec<String> =
                bookmarks.entries().into_iter().map(|b| b.pmid).collect();
            print!("{}", view::format_results(&view::results_view(controller.session(), &bookmarked)));

            if analyze {
                println!();
                print!("{}", view::format_analysis(&controller.load_analysis().await));
            }
        }

        Command::Ask { question, filters } => {
            let mut controller = SearchController::new(client, history);
            let generated = controller.submit_ai_search(filters.into_form(question)).await?;

            println!("PubMed query: {}", generated.pubmed_query);
            println!("{}", generated.explanation);
            if !generated.keywords.is_empty() {
                println!("keywords: {}", generated.keywords.join(", "));
            }
            println!();

            let bookmarked: Vec<String> =
                bookmarks.entries().into_iter().map(|b| b.pmid).collect();
            print!("{}", view::format_results(&view::results_view(controller.session(), &bookmarked)));
        }

        Command::Paper { pmid } => {
            let paper = client.get_paper(&pmid).await?;
            println!("{} ({})", paper.title, paper.pmid);
            println!("{} | {}", paper.journal, paper.pub_date);
            println!("{}", paper.author_line(usize::MAX));
            if !paper.r#abstract.is_empty() {
                println!("\n{}", paper.r#abstract);
            }
            println!("\n{}", paper.pubmed_url());
            if let Some(pdf) = paper.pmc_pdf_url() {
                println!("free PDF: {pdf}");
            }
        }

        Command::Summarize { pmids } => {
            let summary = client.summarize(&pmids).await?;
            println!("{}", summary.summary);
        }

        Command::Chat { pmids } => {
            run_chat(&client, pmids).await?;
        }

        Command::Analyze { query, filters } => {
            let filter = AnalysisFilter {
                query,
                author: filters.author,
                start_date: filters.start_date,
                end_date: filters.end_date,
            };
            print!("{}", view::format_analysis(&client.load_analysis(&filter).await));
        }

        Command::Export { query, filters, max_results, output } => {
            let filter = AnalysisFilter {
                query,
                author: filters.author,
                start_date: filters.start_date,
                end_date: filters.end_date,
            };
            let csv = client.export_csv(&filter, max_results).await?;
            std::fs::write(&output, csv)?;
            println!("wrote {}", output.display());
        }

        Command::Bookmark { command } => match command {
            BookmarkCommand::List => {
                print!("{}", view::format_bookmarks(&bookmarks.entries()));
            }
            BookmarkCommand::Add { pmid } => {
                let paper = client.get_paper(&pmid).await?;
                bookmarks.upsert(&paper)?;
                println!("bookmarked {} ({})", paper.title, paper.pmid);
            }
            BookmarkCommand::Remove { pmid } => {
                if bookmarks.remove(&pmid)? {
                    println!("removed {pmid}");
                } else {
                    println!("{pmid} was not bookmarked");
                }
            }
            BookmarkCommand::Clear => {
                bookmarks.clear()?;
                println!("bookmarks cleared");
            }
            BookmarkCommand::Export { output } => {
                let entries = bookmarks.entries();
                anyhow::ensure!(!entries.is_empty(), "no bookmarked papers to export");

                let path = output.unwrap_or_else(|| {
                    PathBuf::from(format!(
                        "pubmed_bookmarks_{}.csv",
                        chrono::Utc::now().format("%Y-%m-%d")
                    ))
                });
                std::fs::write(&path, bookmarks_csv(&entries))?;
                println!("wrote {} ({} papers)", path.display(), entries.len());
            }
            BookmarkCommand::Summarize => {
                let entries = bookmarks.entries();
                anyhow::ensure!(!entries.is_empty(), "no bookmarked papers to summarize");

                let pmids: Vec<String> = entries.into_iter().map(|b| b.pmid).collect();
                let summary = client.summarize(&pmids).await?;
                println!("{}", summary.summary);
            }
        },

        Command::History { command } => match command {
            HistoryCommand::List => {
                print!("{}", view::format_history(&history.entries()));
            }
            HistoryCommand::Remove { index } => {
                let removed = history.remove(index)?;
                println!("removed \"{}\"", removed.query);
            }
            HistoryCommand::Clear => {
                history.clear()?;
                println!("history cleared");
            }
        },
    }

    Ok(())
}

/// Interactive chat loop; an empty line or EOF ends the conversation.
async fn run_chat(client: &ExplorerClient, pmids: Vec<String>) -> anyhow::Result<()> {
    let mut session = ChatSession::new(pmids);
    println!("Chatting about {} papers. Empty line quits.", session.pmids().len());

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            break;
        }

        match session.send(client, message).await {
            Ok(reply) => println!("\n{reply}\n"),
            Err(e) => eprintln!("chat failed: {}", e.user_message()),
        }
    }

    Ok(())
}
