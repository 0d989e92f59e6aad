//! Inline search over fixed page content.
//!
//! [`InlineSearchIndex`] holds a small, fixed list of [`SearchRecord`]s and
//! filters them against a live query:
//! - Whitespace-only queries mean "not searching"
//! - Case-insensitive substring match on title or content
//! - Results keep the record order (no ranking)

/// Number of characters shown in a result excerpt before the ellipsis.
pub const EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Anchor id of the section this record lives in
    pub section_id: String,
}

impl SearchRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        section_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            section_id: section_id.into(),
        }
    }

    /// Leading part of the content, always terminated by `...`.
    pub fn excerpt(&self) -> String {
        let head: String = self.content.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchRecord>,
}

/// What the search box should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus<'a> {
    /// No query (or whitespace only): neither results nor "no results"
    Idle,
    /// At least one record matched
    Results(&'a [SearchRecord]),
    /// A real query matched nothing
    NoResults,
}

/// Filter `records` by `query`, preserving order.
///
/// Returns an empty list for empty or whitespace-only queries.
pub fn filter_records(records: &[SearchRecord], query: &str) -> Vec<SearchRecord> {
    let needle = query.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let needle_lower = needle.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle_lower))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct InlineSearchIndex {
    records: Vec<SearchRecord>,
    state: SearchState,
}

impl InlineSearchIndex {
    pub const fn new(records: Vec<SearchRecord>) -> Self {
        Self {
            records,
            state: SearchState {
                query: String::new(),
                results: Vec::new(),
            },
        }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn results(&self) -> &[SearchRecord] {
        &self.state.results
    }

    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Replace the query and recompute results from scratch.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.state.results = filter_records(&self.records, &self.state.query);
        crate::perf::log_event(
            "search.query",
            format!(
                "query={:?} results={}",
                self.state.query,
                self.state.results.len()
            ),
        );
    }

    pub fn status(&self) -> SearchStatus<'_> {
        if self.state.query.trim().is_empty() {
            SearchStatus::Idle
        } else if self.state.results.is_empty() {
            SearchStatus::NoResults
        } else {
            SearchStatus::Results(&self.state.results)
        }
    }

    /// Empty query and results without selecting anything.
    pub fn clear(&mut self) {
        self.state = SearchState::default();
    }

    /// Pick the result at `index`.
    ///
    /// Query and results are cleared together; the caller scrolls to the
    /// returned section id. Out-of-range indices change nothing.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let section_id = self.state.results.get(index)?.section_id.clone();
        self.clear();
        Some(section_id)
    }
}
