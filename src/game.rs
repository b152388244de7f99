//! Self-play: feed a player uniformly random pieces until the board is full.

use tracing::info;

use crate::board::Board;
use crate::config::{EngineConfig, SUPPLY_STREAM};
use crate::piece::Piece;
use crate::player::{PlayError, Player};
use crate::score::real_score;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub board: Board,
    pub score: u32,
}

/// Play one full game from an empty board.
pub fn play_game(player: &mut Player, supply: &mut fastrand::Rng) -> Result<GameSummary, PlayError> {
    player.new_game();
    while !player.board().is_finished() {
        player.respond(Piece::random(supply))?;
    }

    let board = player.board().clone();
    let score = real_score(&board);
    info!(score, strategy = player.strategy_name(), "game finished");
    Ok(GameSummary { board, score })
}

/// Play `games` games with one player built from `config`.
pub fn self_play(config: &EngineConfig, games: usize) -> Result<Vec<GameSummary>, PlayError> {
    let mut player = Player::from_config(config);
    let mut supply = match config.stream_seed(SUPPLY_STREAM) {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    (0..games)
        .map(|_| play_game(&mut player, &mut supply))
        .collect()
}

pub fn mean_score(games: &[GameSummary]) -> f64 {
    if games.is_empty() {
        return 0.0;
    }
    games.iter().map(|g| f64::from(g.score)).sum::<f64>() / games.len() as f64
}
