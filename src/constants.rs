//! Constants for board geometry, piece values, and search parameters.
//!
//! The board is a fixed 9x9 grid. Pieces are dropped as vertical triplets
//! into one of three row slots per column, so a game always lasts
//! `COLUMNS * ROW_SLOTS.len()` placements.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width (number of columns).
pub const WIDTH: usize = 9;

/// Board height (number of rows).
pub const HEIGHT: usize = 9;

/// Total number of cells.
pub const CELLS: usize = WIDTH * HEIGHT;

/// Height of a piece (cells covered by one drop).
pub const PIECE_LEN: usize = 3;

/// Rows at which a piece may start. Every drop covers `PIECE_LEN` rows.
pub const ROW_SLOTS: [usize; 3] = [0, 3, 6];

/// Number of placements in a full game.
pub const MAX_TURN: u32 = (WIDTH * ROW_SLOTS.len()) as u32;

// =============================================================================
// Cell Values
// =============================================================================

/// Empty cell.
pub const EMPTY: u8 = 0;

/// Smallest value a piece cell may carry.
pub const MIN_VALUE: u8 = 7;

/// Largest value a piece cell may carry.
pub const MAX_VALUE: u8 = 10;

/// Minimum run length that scores.
pub const MIN_RUN: usize = 3;

/// Number of distinct pieces: every ordered triplet over `MIN_VALUE..=MAX_VALUE`.
pub const PIECE_COUNT: usize = 64;

// =============================================================================
// Search Parameters
// =============================================================================

/// Bound used for alpha-beta windows.
pub const INF: f64 = 999_999_999.0;

/// Default search depth before the schedule kicks in.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Default number of placements expanded at a max ply.
pub const DEFAULT_MAX_MOVE_BREADTH: usize = 27;

/// Default number of pieces expanded at a min ply.
pub const DEFAULT_MIN_MOVE_BREADTH: usize = PIECE_COUNT;

/// Remaining depth above which the piece supply is narrowed before expansion.
pub const MIN_PLY_NARROW_DEPTH: u32 = 2;

// =============================================================================
// Transport
// =============================================================================

/// Delay before reporting a chosen placement back to the client.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 500;
