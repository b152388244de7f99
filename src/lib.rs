//! Tristack: a placement engine for a 9×9 tile-stacking puzzle.
//!
//! Each turn the engine receives a vertical piece of three values in `7..=10`
//! and drops it into one of 27 fixed slots. A finished board scores every run
//! of three or more equal values along rows, columns and both diagonals; the
//! engine tries to maximise that score using a potential-aware evaluator and
//! alpha-beta search over its own placements and the unknown next piece.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, value range and search defaults
//! - [`piece`] - Pieces and the fixed catalogue
//! - [`board`] - Board state, slots and placement
//! - [`score`] - Real and potential scoring
//! - [`cache`] - Per-session memo of board scores
//! - [`scorer`] - Cached evaluator used by the strategies
//! - [`search`] - Alpha-beta search
//! - [`schedule`] - Turn-dependent search parameters
//! - [`opening`] - First-move heuristic
//! - [`strategy`] - Random, greedy and search strategies
//! - [`player`] - Game session answering new pieces
//! - [`config`] - TOML engine configuration
//! - [`protocol`] - JSON-lines placement channel
//! - [`game`] - Self-play driver
//!
//! ## Example
//!
//! ```
//! use tristack::config::EngineConfig;
//! use tristack::piece::Piece;
//! use tristack::player::Player;
//! use tristack::strategy::Strength;
//!
//! let config = EngineConfig {
//!     strength: Strength::Greedy,
//!     seed: Some(1),
//!     ..EngineConfig::default()
//! };
//! let mut player = Player::from_config(&config);
//! let pos = player.respond(Piece::new([10, 10, 10]).unwrap()).unwrap();
//! assert_eq!((pos.row, pos.col), (3, 4));
//! ```

pub mod board;
pub mod cache;
pub mod config;
pub mod constants;
pub mod game;
pub mod opening;
pub mod piece;
pub mod player;
pub mod protocol;
pub mod schedule;
pub mod score;
pub mod scorer;
pub mod search;
pub mod strategy;
