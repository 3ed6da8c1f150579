//! View projection.
//!
//! Pure functions from state snapshots to renderable view-models, plus text
//! renderers for the CLI. No business logic lives here: selection math,
//! pagination arithmetic and formatting decisions are all derived from the
//! inputs, so the whole layer is unit-testable without a terminal.

use crate::models::{AnalysisBundle, BookmarkEntry, HistoryEntry, Paper};
use crate::search::{SearchSession, total_pages};

/// How many page buttons the pagination window shows at most.
const WINDOW: u32 = 5;

/// How many authors and keywords a paper card shows before truncating.
const CARD_AUTHORS: usize = 5;
const CARD_KEYWORDS: usize = 5;

/// Pagination controls derived from the current result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// Current 1-based page.
    pub current: u32,

    /// Total number of pages.
    pub total_pages: u32,

    /// Page buttons to display, at most five, centered on the current page
    /// and clipped to `[1, total_pages]`.
    pub window: Vec<u32>,

    /// Show a "previous" control.
    pub has_prev: bool,

    /// Show a "next" control.
    pub has_next: bool,
}

/// Compute the pagination window.
#[must_use]
pub fn paginate(total: u64, page_size: u32, page: u32) -> PaginationView {
    let total_pages = total_pages(total, page_size);
    let half = WINDOW / 2;

    let window = if total_pages == 0 {
        Vec::new()
    } else {
        let start = page.saturating_sub(half).max(1);
        let end = (page + half).min(total_pages);
        (start..=end).collect()
    };

    PaginationView {
        current: page,
        total_pages,
        window,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

/// One paper row ready for rendering.
#[derive(Debug, Clone)]
pub struct PaperCardView {
    /// PubMed ID.
    pub pmid: String,

    /// Title.
    pub title: String,

    /// Journal name or "N/A".
    pub journal: String,

    /// Publication date or "N/A".
    pub pub_date: String,

    /// Citation count, "-" when unknown.
    pub citations: String,

    /// First authors, truncated.
    pub authors: String,

    /// Abstract, with a placeholder when absent.
    pub r#abstract: String,

    /// First keywords.
    pub keywords: Vec<String>,

    /// Keywords beyond the shown ones.
    pub keyword_overflow: usize,

    /// Whether the paper is in the selection set.
    pub selected: bool,

    /// Whether the paper is bookmarked.
    pub bookmarked: bool,

    /// Canonical PubMed link.
    pub pubmed_url: String,

    /// Free full-text PDF link, when available.
    pub pdf_url: Option<String>,
}

fn or_na(value: &str) -> String {
    if value.is_empty() { "N/A".to_string() } else { value.to_string() }
}

fn paper_card(paper: &Paper, selected: bool, bookmarked: bool) -> PaperCardView {
    PaperCardView {
        pmid: paper.pmid.clone(),
        title: paper.title.clone(),
        journal: or_na(&paper.journal),
        pub_date: or_na(&paper.pub_date),
        citations: paper.citations().map_or_else(|| "-".to_string(), |c| c.to_string()),
        authors: paper.author_line(CARD_AUTHORS),
        r#abstract: if paper.r#abstract.is_empty() {
            "No abstract available".to_string()
        } else {
            paper.r#abstract.clone()
        },
        keywords: paper.keywords.iter().take(CARD_KEYWORDS).cloned().collect(),
        keyword_overflow: paper.keywords.len().saturating_sub(CARD_KEYWORDS),
        selected,
        bookmarked,
        pubmed_url: paper.pubmed_url(),
        pdf_url: paper.pmc_pdf_url(),
    }
}

/// The results list plus its pagination controls.
#[derive(Debug, Clone)]
pub struct ResultsView {
    /// Server-reported total result count.
    pub total: u64,

    /// Cards for the current page.
    pub cards: Vec<PaperCardView>,

    /// Pagination controls.
    pub pagination: PaginationView,
}

/// Project the session into a results view.
///
/// `bookmarked` is the set of bookmarked PMIDs, supplied by the caller so the
/// projection stays free of storage access.
#[must_use]
pub fn results_view(session: &SearchSession, bookmarked: &[String]) -> ResultsView {
    let cards = session
        .papers()
        .iter()
        .map(|paper| {
            paper_card(
                paper,
                session.selection().contains(&paper.pmid),
                bookmarked.iter().any(|b| b == &paper.pmid),
            )
        })
        .collect();

    ResultsView {
        total: session.total(),
        cards,
        pagination: paginate(session.total(), session.params().page_size, session.page()),
    }
}

/// State of the bulk-action controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBarView {
    /// Summarize button enabled.
    pub summarize_enabled: bool,

    /// Summarize button label, carrying the selection count.
    pub summarize_label: String,

    /// Chat button enabled.
    pub chat_enabled: bool,

    /// Chat button label, carrying the selection count.
    pub chat_label: String,
}

/// Derive the bulk-action controls from the selection size.
#[must_use]
pub fn action_bar(selection_len: usize) -> ActionBarView {
    let enabled = selection_len > 0;
    ActionBarView {
        summarize_enabled: enabled,
        summarize_label: if enabled {
            format!("Summarize selected ({selection_len})")
        } else {
            "Summarize selected".to_string()
        },
        chat_enabled: enabled,
        chat_label: if enabled {
            format!("Chat with AI ({selection_len})")
        } else {
            "Chat with AI".to_string()
        },
    }
}

/// Render a results view as terminal text.
#[must_use]
pub fn format_results(view: &ResultsView) -> String {
    if view.cards.is_empty() {
        return "No results.\n".to_string();
    }

    let mut output = format!("{} results\n\n", view.total);

    for card in &view.cards {
        let marks = format!(
            "{}{}",
            if card.selected { "[x] " } else { "" },
            if card.bookmarked { "* " } else { "" }
        );
        output.push_str(&format!("{marks}{} ({})\n", card.title, card.pmid));
        output.push_str(&format!(
            "    {} | {} | citations: {}\n",
            card.journal, card.pub_date, card.citations
        ));
        if !card.authors.is_empty() {
            output.push_str(&format!("    {}\n", card.authors));
        }
        if !card.keywords.is_empty() {
            let mut keywords = card.keywords.join(", ");
            if card.keyword_overflow > 0 {
                keywords.push_str(&format!(" (+{})", card.keyword_overflow));
            }
            output.push_str(&format!("    keywords: {keywords}\n"));
        }
        output.push_str(&format!("    {}\n", card.pubmed_url));
        if let Some(pdf) = &card.pdf_url {
            output.push_str(&format!("    free PDF: {pdf}\n"));
        }
        output.push('\n');
    }

    output.push_str(&format_pagination(&view.pagination));
    output
}

/// Render pagination controls as one line, e.g. `< 1 [2] 3 4 5 >`.
#[must_use]
pub fn format_pagination(view: &PaginationView) -> String {
    if view.window.is_empty() {
        return String::new();
    }

    let mut parts = Vec::new();
    if view.has_prev {
        parts.push("<".to_string());
    }
    for page in &view.window {
        if *page == view.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if view.has_next {
        parts.push(">".to_string());
    }

    format!("page {} of {}:  {}\n", view.current, view.total_pages, parts.join(" "))
}

/// Render the three analysis sections.
#[must_use]
pub fn format_analysis(bundle: &AnalysisBundle) -> String {
    let mut output = String::new();

    output.push_str("## Publication trend\n");
    match &bundle.trends {
        Some(rows) if !rows.is_empty() => {
            for row in rows {
                output.push_str(&format!("{}: {}\n", row.year, row.count));
            }
        }
        Some(_) => output.push_str("no data\n"),
        None => output.push_str("unavailable\n"),
    }

    output.push_str("\n## Top keywords\n");
    match &bundle.keywords {
        Some(rows) if !rows.is_empty() => {
            for row in rows.iter().take(10) {
                output.push_str(&format!("{}: {}\n", row.keyword, row.count));
            }
        }
        Some(_) => output.push_str("no data\n"),
        None => output.push_str("unavailable\n"),
    }

    output.push_str("\n## Top authors\n");
    match &bundle.authors {
        Some(rows) if !rows.is_empty() => {
            for row in rows.iter().take(15) {
                output.push_str(&format!("{}: {}\n", row.author, row.count));
            }
        }
        Some(_) => output.push_str("no data\n"),
        None => output.push_str("unavailable\n"),
    }

    output
}

/// Render the search history, most recent first, with positional indices the
/// `history remove` command accepts.
#[must_use]
pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No search history.\n".to_string();
    }

    let mut output = String::new();
    for (i, entry) in entries.iter().enumerate() {
        output.push_str(&format!("{i:>2}. {}  ({})\n", entry.query, entry.date.format("%Y-%m-%d %H:%M")));
        if let Some(ai) = &entry.ai_query {
            output.push_str(&format!("      -> {ai}\n"));
        }
    }
    output
}

/// Render the bookmark list.
#[must_use]
pub fn format_bookmarks(entries: &[BookmarkEntry]) -> String {
    if entries.is_empty() {
        return "No bookmarked papers.\n".to_string();
    }

    let mut output = format!("{} bookmarked papers\n\n", entries.len());
    for entry in entries {
        output.push_str(&format!("{} ({})\n", entry.title, entry.pmid));
        output.push_str(&format!(
            "    {} | {}\n",
            or_na(&entry.journal),
            or_na(&entry.pub_date)
        ));
        if !entry.authors.is_empty() {
            let shown = entry.authors.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
            let suffix = if entry.authors.len() > 3 { ", et al." } else { "" };
            output.push_str(&format!("    {shown}{suffix}\n"));
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SearchResponse, TrendPoint};
    use crate::search::SearchForm;

    #[test]
    fn test_pagination_window_centered() {
        // total=97, page_size=20, page=3: 5 pages, window 1..=5, both controls.
        let view = paginate(97, 20, 3);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.window, vec![1, 2, 3, 4, 5]);
        assert!(view.has_prev);
        assert!(view.has_next);
    }

    #[test]
    fn test_pagination_window_clipped_at_start() {
        let view = paginate(200, 20, 1);
        assert_eq!(view.window, vec![1, 2, 3]);
        assert!(!view.has_prev);
        assert!(view.has_next);
    }

    #[test]
    fn test_pagination_window_clipped_at_end() {
        let view = paginate(200, 20, 10);
        assert_eq!(view.window, vec![8, 9, 10]);
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_pagination_empty_results() {
        let view = paginate(0, 20, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.window.is_empty());
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_pagination_single_page() {
        let view = paginate(7, 20, 1);
        assert_eq!(view.window, vec![1]);
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn test_action_bar_labels() {
        let bar = action_bar(0);
        assert!(!bar.summarize_enabled);
        assert_eq!(bar.summarize_label, "Summarize selected");

        let bar = action_bar(3);
        assert!(bar.chat_enabled);
        assert_eq!(bar.summarize_label, "Summarize selected (3)");
        assert_eq!(bar.chat_label, "Chat with AI (3)");
    }

    #[test]
    fn test_results_view_flags() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search(SearchForm {
            query: "q".to_string(),
            ..SearchForm::default()
        });
        session.complete_ok(
            ticket,
            SearchResponse {
                total: 2,
                page: 1,
                page_size: 20,
                papers: vec![
                    Paper { pmid: "1".to_string(), title: "One".to_string(), ..Paper::default() },
                    Paper { pmid: "2".to_string(), title: "Two".to_string(), ..Paper::default() },
                ],
            },
        );
        session.toggle_selection("2");

        let view = results_view(&session, &["1".to_string()]);
        assert_eq!(view.cards.len(), 2);
        assert!(view.cards[0].bookmarked);
        assert!(!view.cards[0].selected);
        assert!(view.cards[1].selected);
        assert!(!view.cards[1].bookmarked);
        assert_eq!(view.cards[0].citations, "-");
    }

    #[test]
    fn test_format_analysis_sections() {
        let bundle = AnalysisBundle {
            trends: Some(vec![TrendPoint { year: "2024".to_string(), count: 3 }]),
            keywords: Some(Vec::new()),
            authors: None,
        };
        let text = format_analysis(&bundle);
        assert!(text.contains("2024: 3"));
        assert!(text.contains("no data"));
        assert!(text.contains("unavailable"));
    }
}
