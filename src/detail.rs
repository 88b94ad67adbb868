//! Detail view state
//!
//! Single-slot holder for the selected movie's full record. Uses the same
//! generation guard as the listing: a response for a superseded selection
//! never overwrites newer state. On failure the summary-level record from
//! the listing (when present) keeps the page usable.

use crate::models::Movie;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRequest {
    pub generation: u64,
    pub movie_id: i64,
}

#[derive(Default)]
pub struct DetailState {
    movie_id: Option<i64>,
    movie: Option<Movie>,
    summary: Option<Movie>,
    loading: bool,
    error: Option<String>,
    not_found: bool,
    generation: u64,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.movie_id.is_some()
    }

    pub fn movie_id(&self) -> Option<i64> {
        self.movie_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn not_found(&self) -> bool {
        self.not_found
    }

    /// Best record available: the full fetch, else the listing summary.
    pub fn current(&self) -> Option<&Movie> {
        self.movie.as_ref().or(self.summary.as_ref())
    }

    /// True when the fetch failed but a summary record keeps the page up.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some() && self.movie.is_none() && self.summary.is_some()
    }

    /// Open the detail page for a movie and request its full record.
    /// `summary` is the listing-level record, kept as fallback.
    pub fn select(&mut self, movie_id: i64, summary: Option<Movie>) -> DetailRequest {
        self.generation += 1;
        self.movie_id = Some(movie_id);
        self.movie = None;
        self.summary = summary;
        self.loading = true;
        self.error = None;
        self.not_found = false;
        DetailRequest {
            generation: self.generation,
            movie_id,
        }
    }

    /// Re-request the current selection.
    pub fn retry(&mut self) -> Option<DetailRequest> {
        let movie_id = self.movie_id?;
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.not_found = false;
        Some(DetailRequest {
            generation: self.generation,
            movie_id,
        })
    }

    pub fn apply_success(&mut self, generation: u64, movie: Movie) -> bool {
        if generation != self.generation {
            return false;
        }
        self.movie = Some(movie);
        self.loading = false;
        self.error = None;
        self.not_found = false;
        true
    }

    pub fn apply_failure(&mut self, generation: u64, message: &str, not_found: bool) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.error = Some(message.to_string());
        self.not_found = not_found;
        true
    }

    /// Back to the listing.
    pub fn close(&mut self) {
        self.movie_id = None;
        self.movie = None;
        self.summary = None;
        self.loading = false;
        self.error = None;
        self.not_found = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_and_load() {
        let mut state = DetailState::new();
        assert!(!state.is_open());

        let request = state.select(10, Some(movie(10, "Summary")));
        assert!(state.is_open());
        assert!(state.is_loading());
        assert_eq!(state.current().unwrap().title, "Summary");

        assert!(state.apply_success(request.generation, movie(10, "Full")));
        assert!(!state.is_loading());
        assert_eq!(state.current().unwrap().title, "Full");
    }

    #[test]
    fn test_stale_selection_discarded() {
        let mut state = DetailState::new();
        let first = state.select(1, None);
        let second = state.select(2, None);

        // The superseded fetch resolves late
        assert!(!state.apply_success(first.generation, movie(1, "Old")));
        assert_eq!(state.movie_id(), Some(2));
        assert!(state.is_loading());

        assert!(state.apply_success(second.generation, movie(2, "New")));
        assert_eq!(state.current().unwrap().id, 2);
    }

    #[test]
    fn test_failure_retains_summary() {
        let mut state = DetailState::new();
        let request = state.select(5, Some(movie(5, "From listing")));
        assert!(state.apply_failure(request.generation, "HTTP 500", false));

        assert!(state.is_degraded());
        assert_eq!(state.error(), Some("HTTP 500"));
        assert_eq!(state.current().unwrap().title, "From listing");
    }

    #[test]
    fn test_not_found_without_summary() {
        let mut state = DetailState::new();
        let request = state.select(404, None);
        assert!(state.apply_failure(request.generation, "movie not found", true));

        assert!(state.not_found());
        assert!(!state.is_degraded());
        assert!(state.current().is_none());
    }

    #[test]
    fn test_retry_supersedes_inflight() {
        let mut state = DetailState::new();
        let first = state.select(7, None);
        state.apply_failure(first.generation, "timed out", false);

        let retry = state.retry().unwrap();
        assert_eq!(retry.movie_id, 7);
        assert!(retry.generation > first.generation);
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_close_resets() {
        let mut state = DetailState::new();
        let request = state.select(3, Some(movie(3, "x")));
        state.apply_success(request.generation, movie(3, "x"));
        state.close();

        assert!(!state.is_open());
        assert!(state.current().is_none());
    }
}
