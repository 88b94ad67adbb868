//! Tests for the listing state machine

#[cfg(test)]
mod tests {
    use crate::api::MoviePage;
    use crate::listing::*;
    use crate::models::Movie;

    fn config(page_size: u32) -> ListingConfig {
        ListingConfig {
            page_size,
            enable_genre_filter: true,
            enable_load_more: true,
        }
    }

    fn page(start_id: i64, count: usize, total: u64, size: u32, number: u32) -> MoviePage {
        let movies = (0..count)
            .map(|i| Movie {
                id: start_id + i as i64,
                title: format!("Movie {}", start_id + i as i64),
                ..Default::default()
            })
            .collect();
        MoviePage {
            movies,
            total_count: total,
            page_size: size,
            page_number: number,
        }
    }

    #[test]
    fn test_pages_accumulate_in_order() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        assert!(state.apply_success(r1.generation, page(1, 10, 35, 10, 1)));
        assert_eq!(state.movies().len(), 10);
        assert!(state.has_more());

        let r2 = state.load_more().unwrap();
        assert_eq!(r2.page, 2);
        assert!(r2.append);
        assert!(state.apply_success(r2.generation, page(11, 10, 35, 10, 2)));
        assert_eq!(state.movies().len(), 20);
        assert_eq!(state.page(), 2);
        assert_eq!(state.movies()[0].id, 1);
        assert_eq!(state.movies()[19].id, 20);
        assert!(state.movies().len() as u64 <= state.total_count());
    }

    #[test]
    fn test_search_change_resets_pagination() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 10, 100, 10, 1));
        let r2 = state.load_more().unwrap();
        state.apply_success(r2.generation, page(11, 10, 100, 10, 2));
        let r3 = state.load_more().unwrap();
        state.apply_success(r3.generation, page(21, 10, 100, 10, 3));
        assert_eq!(state.page(), 3);
        assert_eq!(state.movies().len(), 30);

        // Accumulation clears before the new page 1 arrives, not after
        let fresh = state.set_search("matrix").unwrap();
        assert_eq!(fresh.page, 1);
        assert!(!fresh.append);
        assert_eq!(state.page(), 1);
        assert!(state.movies().is_empty());
        assert!(state.is_loading());

        assert!(state.apply_success(fresh.generation, page(500, 4, 4, 10, 1)));
        assert_eq!(state.movies().len(), 4);
        assert!(!state.has_more());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = ListingState::new(config(10));
        state.initial_load();
        let action = state.set_genre(Some("Action")).unwrap();
        // Superseded before the Action response lands
        let comedy = state.set_genre(Some("Comedy")).unwrap();
        assert_ne!(action.generation, comedy.generation);

        assert!(!state.apply_success(action.generation, page(1, 10, 50, 10, 1)));
        assert!(state.movies().is_empty());
        assert!(state.is_loading());
        assert_eq!(state.genre(), Some("Comedy"));

        assert!(state.apply_success(comedy.generation, page(100, 10, 50, 10, 1)));
        assert_eq!(state.movies()[0].id, 100);
    }

    #[test]
    fn test_stale_failure_discarded() {
        let mut state = ListingState::new(config(10));
        let old = state.initial_load();
        let fresh = state.set_search("new").unwrap();

        assert!(!state.apply_failure(old.generation, "timed out"));
        assert!(state.is_loading());
        assert!(state.error().is_none());

        assert!(state.apply_success(fresh.generation, page(1, 3, 3, 10, 1)));
        assert_eq!(state.phase(), ListingPhase::Loaded);
    }

    #[test]
    fn test_has_more_false_at_total_despite_full_page() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 10, 20, 10, 1));
        assert!(state.has_more());

        // Last page returns a full 10 items, but the accumulation now
        // equals the reported total
        let r2 = state.load_more().unwrap();
        state.apply_success(r2.generation, page(11, 10, 20, 10, 2));
        assert_eq!(state.movies().len(), 20);
        assert!(!state.has_more());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_has_more_false_on_short_page() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 7, 100, 10, 1));
        assert!(!state.has_more());
    }

    #[test]
    fn test_append_failure_preserves_rows() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 10, 30, 10, 1));

        let r2 = state.load_more().unwrap();
        assert!(state.apply_failure(r2.generation, "connection reset"));
        assert_eq!(state.phase(), ListingPhase::Failed);
        assert_eq!(state.error(), Some("connection reset"));
        assert_eq!(state.movies().len(), 10);

        // Retry re-issues page 2 as an append under a new generation
        let retry = state.retry().unwrap();
        assert_eq!(retry.page, 2);
        assert!(retry.append);
        assert!(retry.generation > r2.generation);
        assert!(state.apply_success(retry.generation, page(11, 10, 30, 10, 2)));
        assert_eq!(state.movies().len(), 20);
    }

    #[test]
    fn test_fresh_failure_clears_rows() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 10, 30, 10, 1));

        let fresh = state.set_search("ghost").unwrap();
        assert!(state.apply_failure(fresh.generation, "HTTP 503"));
        assert!(state.movies().is_empty());
        assert_eq!(state.phase(), ListingPhase::Failed);

        let retry = state.retry().unwrap();
        assert_eq!(retry.page, 1);
        assert_eq!(retry.search, "ghost");
        assert!(!retry.append);
    }

    #[test]
    fn test_load_more_gated() {
        let mut state = ListingState::new(config(10));
        // Nothing loaded yet
        assert!(state.load_more().is_none());

        let r1 = state.initial_load();
        // In flight
        assert!(state.load_more().is_none());
        state.apply_success(r1.generation, page(1, 10, 30, 10, 1));

        let r2 = state.load_more().unwrap();
        // Already loading page 2
        assert!(state.load_more().is_none());
        state.apply_success(r2.generation, page(11, 10, 30, 10, 2));

        // Feature disabled
        state.set_flags(true, false);
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_page_size_change_restarts() {
        let mut state = ListingState::new(config(10));
        let r1 = state.initial_load();
        state.apply_success(r1.generation, page(1, 10, 90, 10, 1));
        let r2 = state.load_more().unwrap();
        state.apply_success(r2.generation, page(11, 10, 90, 10, 2));

        let fresh = state.set_page_size(50).unwrap();
        assert_eq!(fresh.page, 1);
        assert_eq!(fresh.page_size, 50);
        assert!(state.movies().is_empty());
        assert_eq!(state.config().page_size, 50);
    }
}
