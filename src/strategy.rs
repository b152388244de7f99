//! Placement strategies.
//!
//! Every strategy answers the same question: given a board and the piece to
//! drop, which free slot should it go to? Three strengths exist:
//!
//! - [`RandomStrategy`]: a uniformly random free slot.
//! - [`GreedyStrategy`]: the slot with the highest immediate score.
//! - [`SearchStrategy`]: alpha-beta search with turn-dependent parameters,
//!   falling back to a random slot when the search finds no improving move.
//!
//! The turn-0 opening is handled by [`Player`](crate::player::Player) for all
//! of them.

use serde::Deserialize;
use tracing::{debug, info};

use crate::board::{Board, Position};
use crate::config::{EngineConfig, STRATEGY_STREAM};
use crate::piece::Piece;
use crate::player::PlayError;
use crate::schedule::Schedule;
use crate::scorer::{Score, Scorer};
use crate::search::AlphaBeta;

/// Which strategy an engine plays with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Random,
    Greedy,
    #[default]
    Search,
}

impl Strength {
    /// Build the strategy for this strength from an engine configuration.
    pub fn build(self, config: &EngineConfig) -> Box<dyn Strategy> {
        let seed = config.stream_seed(STRATEGY_STREAM);
        match self {
            Strength::Random => Box::new(RandomStrategy::new(seed)),
            Strength::Greedy => Box::new(GreedyStrategy::new(config.scorer())),
            Strength::Search => Box::new(SearchStrategy::new(
                config.scorer(),
                config.schedule.clone(),
                seed,
            )),
        }
    }
}

pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Choose a free slot for `piece`.
    fn choose(&mut self, board: &Board, piece: Piece) -> Result<Position, PlayError>;

    /// Forget per-game state such as cached scores.
    fn new_game(&mut self) {}
}

// =============================================================================
// Random
// =============================================================================

#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: fastrand::Rng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }

    pub(crate) fn pick(&mut self, board: &Board) -> Result<Position, PlayError> {
        let positions = board.empty_positions();
        if positions.is_empty() {
            return Err(PlayError::NoEmptyPositions);
        }
        Ok(positions[self.rng.usize(..positions.len())])
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, board: &Board, _piece: Piece) -> Result<Position, PlayError> {
        self.pick(board)
    }
}

// =============================================================================
// Greedy
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct GreedyStrategy {
    scorer: Scorer,
}

impl GreedyStrategy {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose(&mut self, board: &Board, piece: Piece) -> Result<Position, PlayError> {
        let mut scratch = board.clone();
        let mut best: Option<(Position, Score)> = None;

        for pos in board.empty_positions() {
            let score = self.scorer.probe(&mut scratch, piece, pos);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        best.map(|(pos, _)| pos).ok_or(PlayError::NoEmptyPositions)
    }

    fn new_game(&mut self) {
        self.scorer.reset();
    }
}

// =============================================================================
// Search
// =============================================================================

#[derive(Debug, Clone)]
pub struct SearchStrategy {
    scorer: Scorer,
    engine: AlphaBeta,
    schedule: Schedule,
    fallback: RandomStrategy,
}

impl SearchStrategy {
    pub fn new(scorer: Scorer, schedule: Schedule, seed: Option<u64>) -> Self {
        Self {
            scorer,
            engine: AlphaBeta::default(),
            schedule,
            fallback: RandomStrategy::new(seed),
        }
    }
}

impl Strategy for SearchStrategy {
    fn name(&self) -> &'static str {
        "search"
    }

    fn choose(&mut self, board: &Board, piece: Piece) -> Result<Position, PlayError> {
        self.engine.set_params(self.schedule.params_for(board.turn()));
        let result = self.engine.search(&mut self.scorer, board, piece);

        match result.position {
            Some(pos) => {
                let cache = self.scorer.cache_stats();
                debug!(
                    hits = cache.hits,
                    misses = cache.misses,
                    entries = cache.entries,
                    "score cache"
                );
                Ok(pos)
            }
            None => {
                info!(
                    turn = board.turn(),
                    %piece,
                    "search found no improving move, playing randomly"
                );
                self.fallback.pick(board)
            }
        }
    }

    fn new_game(&mut self) {
        self.scorer.reset();
    }
}
