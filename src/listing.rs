//! Listing query state
//!
//! Pure state machine for the browse view: committed filters, accumulated
//! pages, and a request generation counter. It never performs I/O itself;
//! operations hand back a [`ListingRequest`] describing the query to issue,
//! and responses come back through `apply_success`/`apply_failure` tagged
//! with the generation they were issued under. Results from superseded
//! generations are discarded, so a slow response can never overwrite state
//! belonging to a newer query.

use crate::api::MoviePage;
use crate::models::Movie;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Parametrizes the one listing controller/view pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingConfig {
    pub page_size: u32,
    pub enable_genre_filter: bool,
    pub enable_load_more: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            enable_genre_filter: true,
            enable_load_more: true,
        }
    }
}

/// Everything a fetch needs to issue one query and route its result back.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub generation: u64,
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub genre: Option<String>,
    pub append: bool,
}

pub struct ListingState {
    config: ListingConfig,
    search: String,
    genre: Option<String>,
    movies: Vec<Movie>,
    total_count: u64,
    has_more: bool,
    phase: ListingPhase,
    error: Option<String>,
    // Last page reflected in `movies` (1-based)
    page: u32,
    generation: u64,
    last_request: Option<ListingRequest>,
}

impl ListingState {
    pub fn new(config: ListingConfig) -> Self {
        Self {
            config,
            search: String::new(),
            genre: None,
            movies: Vec::new(),
            total_count: 0,
            has_more: false,
            phase: ListingPhase::Idle,
            error: None,
            page: 1,
            generation: 0,
            last_request: None,
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> ListingPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// First query after startup.
    pub fn initial_load(&mut self) -> ListingRequest {
        self.fresh_query()
    }

    /// Commit a new search term. Resets to page 1 and clears the
    /// accumulation. Returns `None` when the term is unchanged.
    pub fn set_search(&mut self, term: &str) -> Option<ListingRequest> {
        if term == self.search {
            return None;
        }
        self.search = term.to_string();
        Some(self.fresh_query())
    }

    /// Commit a new genre filter (`None` = all genres).
    pub fn set_genre(&mut self, genre: Option<&str>) -> Option<ListingRequest> {
        if genre == self.genre.as_deref() {
            return None;
        }
        self.genre = genre.map(str::to_string);
        Some(self.fresh_query())
    }

    /// Page size is fixed per query; changing it restarts from page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Option<ListingRequest> {
        if page_size == 0 || page_size == self.config.page_size {
            return None;
        }
        self.config.page_size = page_size;
        Some(self.fresh_query())
    }

    /// UI feature toggles; no refetch needed.
    pub fn set_flags(&mut self, enable_genre_filter: bool, enable_load_more: bool) {
        self.config.enable_genre_filter = enable_genre_filter;
        self.config.enable_load_more = enable_load_more;
    }

    /// Start a fresh query from page 1 under a new generation, discarding
    /// any accumulated pages. Used whenever a committed filter changes.
    fn fresh_query(&mut self) -> ListingRequest {
        self.generation += 1;
        self.page = 1;
        self.movies.clear();
        self.total_count = 0;
        self.has_more = false;
        self.phase = ListingPhase::Loading;
        self.error = None;
        let request = ListingRequest {
            generation: self.generation,
            page: 1,
            page_size: self.config.page_size,
            search: self.search.clone(),
            genre: self.genre.clone(),
            append: false,
        };
        self.last_request = Some(request.clone());
        request
    }

    /// Request the next page, appended to the accumulation. Only valid when
    /// more results exist and no query is in flight.
    pub fn load_more(&mut self) -> Option<ListingRequest> {
        if !self.config.enable_load_more || !self.has_more || self.phase == ListingPhase::Loading {
            return None;
        }
        self.generation += 1;
        self.phase = ListingPhase::Loading;
        self.error = None;
        let request = ListingRequest {
            generation: self.generation,
            page: self.page + 1,
            page_size: self.config.page_size,
            search: self.search.clone(),
            genre: self.genre.clone(),
            append: true,
        };
        self.last_request = Some(request.clone());
        Some(request)
    }

    /// Re-issue the last query's parameters under a fresh generation.
    pub fn retry(&mut self) -> Option<ListingRequest> {
        let mut request = self.last_request.clone()?;
        self.generation += 1;
        request.generation = self.generation;
        self.phase = ListingPhase::Loading;
        self.error = None;
        self.last_request = Some(request.clone());
        Some(request)
    }

    /// Apply a successful response. Returns false when the response belongs
    /// to a superseded generation and was discarded.
    pub fn apply_success(&mut self, generation: u64, result: MoviePage) -> bool {
        if generation != self.generation {
            return false;
        }
        let request = match &self.last_request {
            Some(r) => r.clone(),
            None => return false,
        };

        let returned = result.movies.len() as u64;
        if request.append {
            self.movies.extend(result.movies);
        } else {
            self.movies = result.movies;
        }
        self.page = request.page;
        self.total_count = result.total_count;
        // Strict combined check: a full page alone is not enough once the
        // accumulation has caught up with the reported total.
        self.has_more = returned == u64::from(request.page_size)
            && (self.movies.len() as u64) < self.total_count;
        self.phase = ListingPhase::Loaded;
        self.error = None;
        true
    }

    /// Apply a failed response. An append failure keeps the accumulated
    /// rows; a fresh-query failure clears them.
    pub fn apply_failure(&mut self, generation: u64, message: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        let append = self.last_request.as_ref().map_or(false, |r| r.append);
        if !append {
            self.movies.clear();
            self.total_count = 0;
            self.has_more = false;
        }
        self.phase = ListingPhase::Failed;
        self.error = Some(message.to_string());
        true
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod scenario_tests;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_load_request() {
        let mut state = ListingState::new(ListingConfig::default());
        assert_eq!(state.phase(), ListingPhase::Idle);

        let request = state.initial_load();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 20);
        assert!(request.search.is_empty());
        assert_eq!(request.genre, None);
        assert!(!request.append);
        assert_eq!(state.phase(), ListingPhase::Loading);
    }

    #[test]
    fn test_unchanged_filters_issue_nothing() {
        let mut state = ListingState::new(ListingConfig::default());
        state.initial_load();
        assert!(state.set_search("").is_none());
        assert!(state.set_genre(None).is_none());
        assert!(state.set_page_size(20).is_none());
        assert!(state.set_page_size(0).is_none());
    }
}
