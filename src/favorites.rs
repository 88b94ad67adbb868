//! Locally persisted favorites
//!
//! One JSON array of full movie records, rewritten on every mutation.
//! A corrupt or unreadable file degrades to an empty list; callers log
//! write failures and carry on.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::config_dir;
use crate::models::Movie;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize favorites: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write favorites file: {0}")]
    Write(#[from] std::io::Error),
}

pub struct FavoritesStore {
    path: PathBuf,
    movies: Vec<Movie>,
}

impl FavoritesStore {
    /// Open the store at the default location under the config dir.
    pub fn open() -> Self {
        let mut path = config_dir();
        path.push("favorites.json");
        Self::with_path(path)
    }

    /// Open a store backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        let movies = load_list(&path);
        Self { path, movies }
    }

    /// All favorites in insertion order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.movies.iter().any(|m| m.id == movie_id)
    }

    /// Append a favorite. No-op if the id is already present.
    /// Returns whether the list changed.
    pub fn add(&mut self, movie: Movie) -> Result<bool, StorageError> {
        if self.contains(movie.id) {
            return Ok(false);
        }
        self.movies.push(movie);
        self.save()?;
        Ok(true)
    }

    /// Remove a favorite by id. No-op if absent.
    pub fn remove(&mut self, movie_id: i64) -> Result<bool, StorageError> {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != movie_id);
        if self.movies.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Swap in a fresher record for an id already in the list, keeping its
    /// position. No-op if the id is not a favorite.
    pub fn replace(&mut self, movie: Movie) -> Result<bool, StorageError> {
        match self.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => {
                *slot = movie;
                self.save()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove everything.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.movies.clear();
        self.save()
    }

    fn save(&self) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.movies)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn load_list(path: &PathBuf) -> Vec<Movie> {
    if path.exists() {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(movies) = serde_json::from_str(&content) {
                return movies;
            }
        }
    }

    Vec::new()
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

    fn temp_store() -> (tempfile::TempDir, FavoritesStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::with_path(dir.path().join("favorites.json"));
        (dir, store)
    }

    #[test]
    fn test_empty_store() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
        assert!(store.movies().is_empty());
        assert!(!store.contains(42));
    }

    #[test]
    fn test_add_and_round_trip() {
        let (dir, mut store) = temp_store();
        assert!(store.add(movie(42, "The Answer")).unwrap());
        assert!(store.contains(42));

        // Survives a reload from disk
        let reloaded = FavoritesStore::with_path(dir.path().join("favorites.json"));
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.movies()[0].id, 42);
        assert_eq!(reloaded.movies()[0].title, "The Answer");
    }

    #[test]
    fn test_add_is_idempotent() {
        let (_dir, mut store) = temp_store();
        assert!(store.add(movie(1, "First")).unwrap());
        assert!(!store.add(movie(1, "Duplicate")).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.movies()[0].title, "First");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, mut store) = temp_store();
        store.add(movie(1, "First")).unwrap();
        assert!(store.remove(1).unwrap());
        assert!(!store.contains(1));
        assert!(!store.remove(1).unwrap());
        assert!(!store.remove(999).unwrap());
    }

    #[test]
    fn test_insertion_order_kept() {
        let (_dir, mut store) = temp_store();
        store.add(movie(3, "c")).unwrap();
        store.add(movie(1, "a")).unwrap();
        store.add(movie(2, "b")).unwrap();
        let ids: Vec<i64> = store.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let (_dir, mut store) = temp_store();
        store.add(movie(1, "a")).unwrap();
        store.add(movie(2, "b")).unwrap();
        store.add(movie(3, "c")).unwrap();

        assert!(store.replace(movie(2, "b refreshed")).unwrap());
        assert_eq!(store.movies()[1].title, "b refreshed");
        let ids: Vec<i64> = store.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Not a favorite: no-op
        assert!(!store.replace(movie(9, "x")).unwrap());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_clear() {
        let (dir, mut store) = temp_store();
        store.add(movie(1, "a")).unwrap();
        store.add(movie(2, "b")).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());

        let reloaded = FavoritesStore::with_path(dir.path().join("favorites.json"));
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = FavoritesStore::with_path(path.clone());
        assert!(store.is_empty());

        // And the store recovers on the next write
        let mut store = store;
        store.add(movie(42, "Recovered")).unwrap();
        let reloaded = FavoritesStore::with_path(path);
        assert_eq!(reloaded.len(), 1);
    }
}
