//! The 9x9 grid, drop positions, and placement.
//!
//! Cells hold `0` when empty and a piece value (`7..=10`) otherwise. Pieces are
//! only ever written as whole vertical triplets starting at a row in
//! [`ROW_SLOTS`], so checking the top cell of a slot is enough to know whether
//! the slot is free.

use std::fmt;

use thiserror::Error;

use crate::constants::{CELLS, EMPTY, HEIGHT, MAX_TURN, PIECE_LEN, ROW_SLOTS, WIDTH};
use crate::piece::Piece;
use crate::scorer::{Score, Scorer};

/// Top cell of a three-cell vertical drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// Reasons a placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {0} is off the board")]
    OffGrid(Position),
    #[error("position {0} does not start at a row slot (0, 3 or 6)")]
    MisalignedRow(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
}

/// Canonical cache key: the cell contents, row by row.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardKey([u8; CELLS]);

impl fmt::Debug for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardKey({self})")
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.0 {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u8; WIDTH]; HEIGHT],
    turn: u32,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; WIDTH]; HEIGHT],
            turn: 0,
        }
    }

    /// Build a board from raw cells. The turn counter is the number of
    /// occupied row slots.
    pub fn from_cells(cells: [[u8; WIDTH]; HEIGHT]) -> Self {
        let filled = ROW_SLOTS
            .iter()
            .map(|&r| cells[r].iter().filter(|&&v| v != EMPTY).count())
            .sum::<usize>();
        Self {
            cells,
            turn: filled as u32,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row >= HEIGHT || col >= WIDTH {
            return EMPTY;
        }
        self.cells[row][col]
    }

    /// Signed lookup; `None` when the coordinates fall outside the grid.
    #[inline]
    pub fn at(&self, row: isize, col: isize) -> Option<u8> {
        if row < 0 || col < 0 || row >= HEIGHT as isize || col >= WIDTH as isize {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    pub fn rows(&self) -> &[[u8; WIDTH]; HEIGHT] {
        &self.cells
    }

    /// Placements made so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.turn >= MAX_TURN
    }

    /// Free drop positions: row 0 across all columns, then row 3, then row 6.
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(WIDTH * ROW_SLOTS.len());
        for &row in &ROW_SLOTS {
            for col in 0..WIDTH {
                if self.cells[row][col] == EMPTY {
                    positions.push(Position::new(row, col));
                }
            }
        }
        positions
    }

    /// Check that `pos` addresses a free slot.
    pub fn validate(&self, pos: Position) -> Result<(), BoardError> {
        if pos.row >= HEIGHT || pos.col >= WIDTH {
            return Err(BoardError::OffGrid(pos));
        }
        if !ROW_SLOTS.contains(&pos.row) {
            return Err(BoardError::MisalignedRow(pos));
        }
        if (0..PIECE_LEN).any(|i| self.cells[pos.row + i][pos.col] != EMPTY) {
            return Err(BoardError::Occupied(pos));
        }
        Ok(())
    }

    /// Drop `piece` at `pos` and advance the turn counter.
    pub fn place(&mut self, piece: Piece, pos: Position) -> Result<(), BoardError> {
        self.validate(pos)?;
        self.place_unchecked(piece, pos);
        Ok(())
    }

    /// Score the board as if `piece` were dropped at `pos`, leaving the board
    /// unchanged afterwards.
    pub fn try_score(
        &mut self,
        piece: Piece,
        pos: Position,
        scorer: &mut Scorer,
    ) -> Result<Score, BoardError> {
        self.validate(pos)?;
        Ok(scorer.probe(self, piece, pos))
    }

    pub(crate) fn place_unchecked(&mut self, piece: Piece, pos: Position) {
        self.write_segment(pos, piece.values());
        self.turn += 1;
    }

    /// Write the three cells of a segment without touching the turn counter.
    pub(crate) fn write_segment(&mut self, pos: Position, values: [u8; PIECE_LEN]) {
        for (i, v) in values.into_iter().enumerate() {
            self.cells[pos.row + i][pos.col] = v;
        }
    }

    pub fn key(&self) -> BoardKey {
        let mut key = [EMPTY; CELLS];
        for (r, row) in self.cells.iter().enumerate() {
            key[r * WIDTH..(r + 1) * WIDTH].copy_from_slice(row);
        }
        BoardKey(key)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for v in row {
                write!(f, "{v:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
