//! Alpha-beta minimax over placements and piece supply.
//!
//! The tree alternates two roles:
//!
//! - **Max ply**: the placer drops the given piece. Only placements that raise
//!   the board score are considered; they are ordered by the score they reach
//!   and the best `max_move_breadth` are expanded.
//! - **Min ply**: the adversary picks the next piece from the 64-piece
//!   catalogue. Deep in the tree (remaining depth above
//!   [`MIN_PLY_NARROW_DEPTH`]) the pieces are ranked by the best score the
//!   placer could reach with them, and only the `min_move_breadth` least
//!   helpful pieces are expanded. The board is not changed at a min ply.
//!
//! Leaves are scored with the session [`Scorer`]. A non-zero leaf score is
//! pulled one point towards zero per remaining ply, so that equal outcomes
//! reached at different depths are not chosen by insertion order.
//!
//! # Example
//!
//! ```
//! use tristack::board::{Board, Position};
//! use tristack::piece::Piece;
//! use tristack::scorer::Scorer;
//! use tristack::search::{AlphaBeta, SearchParams};
//!
//! let mut board = Board::new();
//! board.place(Piece::new([9, 9, 7]).unwrap(), Position::new(6, 4)).unwrap();
//!
//! let mut scorer = Scorer::default();
//! let mut engine = AlphaBeta::new(SearchParams::new(1, 27, 64));
//! let result = engine.search(&mut scorer, &board, Piece::new([9, 9, 8]).unwrap());
//! assert!(result.position.is_some());
//! ```

use tracing::debug;

use crate::board::{Board, Position};
use crate::constants::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_MOVE_BREADTH, DEFAULT_MIN_MOVE_BREADTH, INF,
    MIN_PLY_NARROW_DEPTH,
};
use crate::piece::Piece;
use crate::scorer::{Score, Scorer};

/// Depth and breadth limits for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Plies to search; one placement and one piece choice are two plies.
    pub max_depth: u32,
    /// Placements expanded at a max ply.
    pub max_move_breadth: usize,
    /// Pieces expanded at a narrowed min ply.
    pub min_move_breadth: usize,
}

impl SearchParams {
    pub const fn new(max_depth: u32, max_move_breadth: usize, min_move_breadth: usize) -> Self {
        Self {
            max_depth,
            max_move_breadth,
            min_move_breadth,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_DEPTH,
            DEFAULT_MAX_MOVE_BREADTH,
            DEFAULT_MIN_MOVE_BREADTH,
        )
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, leaves included
    pub nodes: u64,
    /// Leaf evaluations
    pub leaves: u64,
    /// Cutoffs at max plies
    pub beta_cutoffs: u64,
    /// Cutoffs at min plies
    pub alpha_cutoffs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Placement chosen at the root; `None` when no placement improves the
    /// board or the search had no depth to spend.
    pub position: Option<Position>,
    /// Minimax value of the root.
    pub score: Score,
    pub stats: SearchStats,
}

/// Whose turn it is at a node.
#[derive(Debug, Clone, Copy)]
enum Ply {
    /// Placer must drop this piece.
    Place(Piece),
    /// Adversary chooses the next piece.
    Supply,
}

#[derive(Debug, Clone, Default)]
pub struct AlphaBeta {
    params: SearchParams,
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::default(),
        }
    }

    pub fn set_params(&mut self, params: SearchParams) {
        self.params = params;
    }

    /// Search for the best placement of `piece` on `board`.
    pub fn search(&mut self, scorer: &mut Scorer, board: &Board, piece: Piece) -> SearchResult {
        self.stats = SearchStats::default();

        let mut root = board.clone();
        let (score, position) = self.alpha_beta(
            scorer,
            &mut root,
            Ply::Place(piece),
            self.params.max_depth,
            -INF,
            INF,
        );

        debug!(
            turn = board.turn(),
            depth = self.params.max_depth,
            max_breadth = self.params.max_move_breadth,
            min_breadth = self.params.min_move_breadth,
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            beta_cutoffs = self.stats.beta_cutoffs,
            alpha_cutoffs = self.stats.alpha_cutoffs,
            score,
            position = ?position,
            "search finished"
        );

        SearchResult {
            position,
            score,
            stats: self.stats,
        }
    }

    fn alpha_beta(
        &mut self,
        scorer: &mut Scorer,
        board: &mut Board,
        ply: Ply,
        depth: u32,
        alpha: Score,
        beta: Score,
    ) -> (Score, Option<Position>) {
        self.stats.nodes += 1;

        if depth == 0 || board.is_finished() {
            self.stats.leaves += 1;
            return (leaf_score(scorer.score(board), depth), None);
        }

        match ply {
            Ply::Place(piece) => self.max_ply(scorer, board, piece, depth, alpha, beta),
            Ply::Supply => (self.min_ply(scorer, board, depth, alpha, beta), None),
        }
    }

    fn max_ply(
        &mut self,
        scorer: &mut Scorer,
        board: &mut Board,
        piece: Piece,
        depth: u32,
        mut alpha: Score,
        beta: Score,
    ) -> (Score, Option<Position>) {
        let candidates = self.rank_placements(scorer, board, piece);

        let mut best_score = -INF;
        let mut best_position = candidates.first().copied();

        for position in candidates {
            let mut child = board.clone();
            child.place_unchecked(piece, position);

            let (score, _) =
                self.alpha_beta(scorer, &mut child, Ply::Supply, depth - 1, alpha, beta);
            if score > best_score {
                best_score = score;
                best_position = Some(position);
            }
            alpha = alpha.max(best_score);

            if beta <= alpha {
                // The candidate that caused the cut is reported, not the
                // running best.
                self.stats.beta_cutoffs += 1;
                return (best_score, Some(position));
            }
        }

        (best_score, best_position)
    }

    fn min_ply(
        &mut self,
        scorer: &mut Scorer,
        board: &mut Board,
        depth: u32,
        alpha: Score,
        mut beta: Score,
    ) -> Score {
        let pieces = if depth > MIN_PLY_NARROW_DEPTH {
            self.rank_pieces(scorer, board)
        } else {
            Piece::all().to_vec()
        };

        let mut worst_score = INF;
        for piece in pieces {
            let (score, _) =
                self.alpha_beta(scorer, board, Ply::Place(piece), depth - 1, alpha, beta);
            worst_score = worst_score.min(score);
            beta = beta.min(worst_score);

            if beta <= alpha {
                self.stats.alpha_cutoffs += 1;
                break;
            }
        }

        worst_score
    }

    /// Placements that strictly improve the board, best first, truncated to
    /// `max_move_breadth`. Ties keep row-major order.
    fn rank_placements(
        &self,
        scorer: &mut Scorer,
        board: &mut Board,
        piece: Piece,
    ) -> Vec<Position> {
        let current = scorer.score(board);

        let mut scored: Vec<(Position, Score)> = board
            .empty_positions()
            .into_iter()
            .map(|pos| (pos, scorer.probe(board, piece, pos)))
            .filter(|&(_, score)| score > current)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(self.params.max_move_breadth)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Pieces ordered by the best score the placer could reach with them,
    /// least helpful first, truncated to `min_move_breadth`. Ties keep
    /// catalogue order.
    fn rank_pieces(&self, scorer: &mut Scorer, board: &mut Board) -> Vec<Piece> {
        let empties = board.empty_positions();

        let mut scored: Vec<(Piece, Score)> = Piece::all()
            .iter()
            .map(|&piece| {
                let best = empties
                    .iter()
                    .map(|&pos| scorer.probe(board, piece, pos))
                    .fold(-INF, Score::max);
                (piece, best)
            })
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        scored
            .into_iter()
            .take(self.params.min_move_breadth)
            .map(|(piece, _)| piece)
            .collect()
    }
}

/// Pull a non-zero leaf score one point towards zero per remaining ply.
fn leaf_score(score: Score, depth: u32) -> Score {
    if score == 0.0 {
        score
    } else {
        score - Score::from(depth) * score.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::ScoringRules;

    fn piece(values: [u8; 3]) -> Piece {
        Piece::new(values).unwrap()
    }

    #[test]
    fn test_leaf_score() {
        assert_eq!(leaf_score(0.0, 5), 0.0);
        assert_eq!(leaf_score(10.0, 0), 10.0);
        assert_eq!(leaf_score(10.0, 3), 7.0);
        assert_eq!(leaf_score(-10.0, 3), -7.0);
    }

    #[test]
    fn test_depth_zero_returns_board_score() {
        let mut board = Board::new();
        board.place(piece([9, 9, 9]), Position::new(0, 0)).unwrap();
        let mut scorer = Scorer::default();
        let expected = scorer.score(&board);

        let mut engine = AlphaBeta::new(SearchParams::new(0, 27, 64));
        let result = engine.search(&mut scorer, &board, piece([7, 7, 7]));
        assert_eq!(result.position, None);
        assert_eq!(result.score, expected);
        assert_eq!(result.stats.nodes, 1);
    }

    #[test]
    fn test_depth_one_matches_greedy() {
        let mut board = Board::new();
        board.place(piece([8, 8, 8]), Position::new(0, 0)).unwrap();
        board.place(piece([8, 8, 8]), Position::new(0, 1)).unwrap();
        let mut scorer = Scorer::default();

        let mut engine = AlphaBeta::new(SearchParams::new(1, 27, 64));
        let result = engine.search(&mut scorer, &board, piece([8, 8, 8]));

        // Completing the 8-runs across rows 0..2 is the best single drop.
        assert_eq!(result.position, Some(Position::new(0, 2)));

        let mut after = board.clone();
        after.place(piece([8, 8, 8]), Position::new(0, 2)).unwrap();
        assert_eq!(result.score, scorer.score(&after));
    }

    #[test]
    fn test_no_improving_move_gives_no_position() {
        let board = Board::new();
        let mut scorer = Scorer::new(ScoringRules {
            legacy_vertical_template: false,
        });
        let mut engine = AlphaBeta::new(SearchParams::new(1, 27, 64));
        // A lone mixed piece on an empty board neither completes nor nearly
        // completes a run, so no placement improves the score.
        let result = engine.search(&mut scorer, &board, piece([7, 8, 9]));
        assert_eq!(result.position, None);
        assert_eq!(result.score, -INF);
    }

    #[test]
    fn test_breadth_limits_expansion() {
        let mut board = Board::new();
        board.place(piece([9, 9, 9]), Position::new(3, 3)).unwrap();
        let mut scorer = Scorer::default();

        let mut wide = AlphaBeta::new(SearchParams::new(1, 27, 64));
        let wide_result = wide.search(&mut scorer, &board, piece([9, 9, 9]));

        let mut narrow = AlphaBeta::new(SearchParams::new(1, 1, 64));
        let narrow_result = narrow.search(&mut scorer, &board, piece([9, 9, 9]));

        assert_eq!(narrow_result.stats.nodes, 2);
        assert!(wide_result.stats.nodes > narrow_result.stats.nodes);
        assert_eq!(narrow_result.position, wide_result.position);
    }

    #[test]
    fn test_min_ply_narrowing_prefers_unhelpful_pieces() {
        let mut board = Board::new();
        board.place(piece([10, 10, 10]), Position::new(0, 0)).unwrap();
        board.place(piece([10, 10, 10]), Position::new(0, 1)).unwrap();
        let mut scorer = Scorer::default();

        let engine = AlphaBeta::new(SearchParams::new(3, 27, 4));
        let ranked = engine.rank_pieces(&mut scorer, &mut board);
        assert_eq!(ranked.len(), 4);
        assert!(!ranked.contains(&piece([10, 10, 10])));
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let mut board = Board::new();
        board.place(piece([7, 7, 8]), Position::new(0, 4)).unwrap();
        board.place(piece([7, 7, 8]), Position::new(0, 5)).unwrap();
        let before = board.clone();

        let mut scorer = Scorer::default();
        let mut engine = AlphaBeta::new(SearchParams::new(3, 3, 4));
        engine.search(&mut scorer, &board, piece([7, 7, 8]));
        assert_eq!(board, before);
    }
}
