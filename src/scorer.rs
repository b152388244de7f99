//! Total board score with memoization.
//!
//! A [`Scorer`] pairs the [`ScoringRules`] of a session with that session's
//! [`ScoreCache`]. Everything that needs a board's total score goes through
//! it, so identical positions reached by different search branches are only
//! evaluated once.

use crate::board::{Board, Position};
use crate::cache::{CacheStats, ScoreCache};
use crate::constants::{EMPTY, PIECE_LEN};
use crate::piece::Piece;
use crate::score::{ScoringRules, potential_score, real_score};

/// Board evaluation. Potential scores come in multiples of 0.5, which `f64`
/// represents exactly.
pub type Score = f64;

#[derive(Debug, Clone, Default)]
pub struct Scorer {
    rules: ScoringRules,
    cache: ScoreCache,
}

impl Scorer {
    pub fn new(rules: ScoringRules) -> Self {
        Self::with_cache(rules, ScoreCache::new())
    }

    pub fn with_cache(rules: ScoringRules, cache: ScoreCache) -> Self {
        Self { rules, cache }
    }

    pub fn rules(&self) -> ScoringRules {
        self.rules
    }

    /// `real_score + potential_score`, served from the cache when possible.
    pub fn score(&mut self, board: &Board) -> Score {
        let key = board.key();
        if let Some(score) = self.cache.get(&key) {
            return score;
        }
        let score = self.evaluate(board);
        self.cache.insert(key, score);
        score
    }

    /// Uncached evaluation.
    pub fn evaluate(&self, board: &Board) -> Score {
        Score::from(real_score(board)) + potential_score(board, self.rules)
    }

    /// Score with `piece` written at `pos`, then restore the empty segment.
    /// The caller guarantees `pos` is a free slot.
    pub(crate) fn probe(&mut self, board: &mut Board, piece: Piece, pos: Position) -> Score {
        board.write_segment(pos, piece.values());
        let score = self.score(board);
        board.write_segment(pos, [EMPTY; PIECE_LEN]);
        score
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every cached score, e.g. when a new game starts.
    pub fn reset(&mut self) {
        self.cache.clear();
    }
}
