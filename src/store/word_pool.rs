//! Word pool: the finite set of candidate keys.
//!
//! Loaded once at startup from a comma-separated file. Keys leave the pool
//! when assigned to an item and come back when the item expires.

use std::collections::HashSet;
use std::path::Path;

use rand::RngExt;

use crate::errors::{Result, SharekeyError};

pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Load the pool from a comma-separated word file.
    ///
    /// Words are trimmed and lowercased; empty entries and duplicates are
    /// dropped. An empty result is a startup error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SharekeyError::word_list(format!(
                "Failed to read word list {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_csv(&raw)
    }

    pub fn from_csv(raw: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut words = Vec::new();

        for word in raw.split(',') {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(SharekeyError::word_list("Word list contains no words"));
        }

        Ok(Self { words })
    }

    /// Draw a random key, removing it from the pool. None when the pool is dry.
    pub fn draw(&mut self) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let idx = rand::rng().random_range(0..self.words.len());
        Some(self.words.swap_remove(idx))
    }

    /// Return an expired item's key to the pool.
    pub fn restore(&mut self, key: String) {
        self.words.push(key);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_trims_lowercases_and_dedups() {
        let pool = WordPool::from_csv("Apple, banana ,apple,,CHERRY\n").unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.contains("apple"));
        assert!(pool.contains("banana"));
        assert!(pool.contains("cherry"));
    }

    #[test]
    fn test_empty_list_is_an_error() {
        assert!(WordPool::from_csv("").is_err());
        assert!(WordPool::from_csv(" , ,,").is_err());
    }

    #[test]
    fn test_draw_until_dry_then_restore() {
        let mut pool = WordPool::from_csv("one,two,three").unwrap();
        let mut drawn = Vec::new();
        while let Some(word) = pool.draw() {
            assert!(!drawn.contains(&word));
            drawn.push(word);
        }
        assert_eq!(drawn.len(), 3);
        assert!(pool.is_empty());
        assert!(pool.draw().is_none());

        pool.restore("two".to_string());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.draw().as_deref(), Some("two"));
    }
}
