//! The placer: owns the game board and answers each new piece with a slot.

use thiserror::Error;
use tracing::info;

use crate::board::{Board, BoardError, Position};
use crate::config::{EngineConfig, OPENING_STREAM};
use crate::opening::first_position;
use crate::piece::Piece;
use crate::strategy::Strategy;

/// Reasons a move cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("game is over after {turn} placements")]
    GameFinished { turn: u32 },
    #[error("no empty positions left on the board")]
    NoEmptyPositions,
    #[error(transparent)]
    Board(#[from] BoardError),
}

pub struct Player {
    board: Board,
    strategy: Box<dyn Strategy>,
    rng: fastrand::Rng,
}

impl Player {
    pub fn new(strategy: Box<dyn Strategy>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            board: Board::new(),
            strategy,
            rng,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.strength.build(config),
            config.stream_seed(OPENING_STREAM),
        )
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Choose a slot for `piece`, drop it there, and report the slot.
    ///
    /// The first piece of a game is placed by the opening heuristic; later
    /// pieces are placed by the strategy.
    pub fn respond(&mut self, piece: Piece) -> Result<Position, PlayError> {
        if self.board.is_finished() {
            return Err(PlayError::GameFinished {
                turn: self.board.turn(),
            });
        }

        let pos = if self.board.turn() == 0 {
            first_position(piece, &mut self.rng)
        } else {
            self.strategy.choose(&self.board, piece)?
        };
        self.board.place(piece, pos)?;

        info!(
            turn = self.board.turn(),
            strategy = self.strategy.name(),
            %piece,
            %pos,
            "placed piece"
        );
        Ok(pos)
    }

    /// Start over with an empty board and a fresh strategy state.
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.strategy.new_game();
    }
}
