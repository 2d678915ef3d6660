use chrono::NaiveDateTime;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::{FitsBackend, SearchResponse, SearchResultItem};
use crate::error::Result;

use super::chips::{self, Chip, ChipKey};
use super::dates::QuickRange;
use super::results::{failure_summary, summary_line, ResultCard};
use super::state::SearchState;

/// Where the search view is in its request cycle. Re-entrant: a new search may
/// start from any phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Rendered,
    Failed(String),
}

/// Search form state plus the location that mirrors it and the last results.
#[derive(Clone, Debug)]
pub struct SearchController {
    state: SearchState,
    location: Url,
    phase: SearchPhase,
    items: Vec<SearchResultItem>,
    total: u64,
}

impl SearchController {
    /// Seed the filters from the location's query string.
    pub fn new(location: Url) -> Self {
        Self {
            state: SearchState::from_url(&location),
            location,
            phase: SearchPhase::Idle,
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Direct access for form edits. Call a search afterwards.
    pub fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn chips(&self) -> Vec<Chip> {
        chips::chips(&self.state)
    }

    /// Clear the filter behind a chip. The caller re-runs the search.
    pub fn remove_chip(&mut self, key: &ChipKey) {
        chips::remove_chip(&mut self.state, key);
    }

    /// Fill the date range from a quick range. Returns the formatted pair for
    /// the manual fields.
    pub fn apply_quick_range(&mut self, range: QuickRange, now: NaiveDateTime) -> (String, String) {
        let (from, to) = range.resolve_strings(now);
        self.state
            .set_date_range(Some(from.clone()), Some(to.clone()));
        (from, to)
    }

    /// Enter `Searching` and return the query string to send. With
    /// `update_location` the location's query is replaced (no navigation).
    pub fn begin_search(&mut self, update_location: bool) -> String {
        let query = self.state.to_query_string();
        if update_location {
            self.location
                .set_query((!query.is_empty()).then_some(query.as_str()));
        }
        debug!(query = %query, "search started");
        self.phase = SearchPhase::Searching;
        query
    }

    /// Record the outcome of the request started by [`begin_search`](Self::begin_search).
    /// A failure clears the list and keeps the message for display.
    pub fn finish_search(&mut self, result: Result<SearchResponse>) {
        match result {
            Ok(response) => {
                info!(total = response.total, shown = response.items.len(), "search finished");
                self.items = response.items;
                self.total = response.total;
                self.phase = SearchPhase::Rendered;
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                self.items.clear();
                self.total = 0;
                self.phase = SearchPhase::Failed(e.user_message());
            }
        }
    }

    /// Serialize, update the location, request and record. Errors end up in
    /// the phase rather than being returned.
    pub fn execute_search<B: FitsBackend>(&mut self, backend: &B, update_location: bool) -> &SearchPhase {
        let query = self.begin_search(update_location);
        let result = backend.search(&query);
        self.finish_search(result);
        &self.phase
    }

    /// Line shown above the results.
    pub fn summary(&self) -> String {
        match &self.phase {
            SearchPhase::Idle => String::new(),
            SearchPhase::Searching => "Searching...".to_string(),
            SearchPhase::Rendered => summary_line(self.total),
            SearchPhase::Failed(_) => failure_summary(),
        }
    }

    pub fn cards(&self, placeholder_thumb: &str) -> Vec<ResultCard> {
        self.items
            .iter()
            .map(|item| ResultCard::new(item, placeholder_thumb))
            .collect()
    }
}
