//! Memoized board scores.
//!
//! The cache belongs to a single game session and is handed to the
//! [`Scorer`](crate::scorer::Scorer) that owns it, so two sessions never share
//! entries. Keys are full board contents, which makes entries valid forever:
//! any placement changes the key.
//!
//! An optional entry limit keeps long-running sessions bounded. When the limit
//! is reached the table is flushed wholesale.

use std::collections::HashMap;

use tracing::debug;

use crate::board::BoardKey;
use crate::scorer::Score;

/// Hit/miss counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub flushes: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate in percent.
    pub fn hit_rate(&self) -> f64 {
        let probes = self.hits + self.misses;
        if probes == 0 {
            0.0
        } else {
            self.hits as f64 / probes as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    entries: HashMap<BoardKey, Score>,
    limit: Option<usize>,
    hits: u64,
    misses: u64,
    flushes: u64,
}

impl ScoreCache {
    /// An unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache that flushes itself once it holds `limit` entries.
    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        match limit {
            Some(limit) => Self::bounded(limit),
            None => Self::new(),
        }
    }

    pub fn get(&mut self, key: &BoardKey) -> Option<Score> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn insert(&mut self, key: BoardKey, score: Score) {
        if let Some(limit) = self.limit {
            if self.entries.len() >= limit && !self.entries.contains_key(&key) {
                debug!(entries = self.entries.len(), "score cache full, flushing");
                self.entries.clear();
                self.flushes += 1;
            }
        }
        self.entries.insert(key, score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries and counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
        self.flushes = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            flushes: self.flushes,
            entries: self.entries.len(),
        }
    }
}
