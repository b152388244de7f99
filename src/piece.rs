//! Pieces: vertical triplets of values dropped into a column.

use std::fmt;

use thiserror::Error;

use crate::constants::{MAX_VALUE, MIN_VALUE, PIECE_COUNT, PIECE_LEN};

/// Reasons a value triplet cannot be turned into a [`Piece`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("piece must have exactly 3 values, got {0}")]
    WrongLength(usize),
    #[error("piece value {value} at index {index} is outside 7..=10")]
    ValueOutOfRange { index: usize, value: i64 },
}

/// Three stacked values, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece([u8; PIECE_LEN]);

static CATALOGUE: [Piece; PIECE_COUNT] = build_catalogue();

const fn build_catalogue() -> [Piece; PIECE_COUNT] {
    let span = (MAX_VALUE - MIN_VALUE + 1) as usize;
    let mut out = [Piece([MIN_VALUE; PIECE_LEN]); PIECE_COUNT];
    let mut i = 0;
    while i < PIECE_COUNT {
        out[i] = Piece([
            MIN_VALUE + (i / (span * span)) as u8,
            MIN_VALUE + ((i / span) % span) as u8,
            MIN_VALUE + (i % span) as u8,
        ]);
        i += 1;
    }
    out
}

impl Piece {
    /// Build a piece, checking every value against the allowed range.
    pub fn new(values: [u8; PIECE_LEN]) -> Result<Self, PieceError> {
        for (index, &value) in values.iter().enumerate() {
            if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
                return Err(PieceError::ValueOutOfRange {
                    index,
                    value: i64::from(value),
                });
            }
        }
        Ok(Self(values))
    }

    /// Every possible piece, in lexicographic order from `[7,7,7]` to `[10,10,10]`.
    pub fn all() -> &'static [Piece; PIECE_COUNT] {
        &CATALOGUE
    }

    #[inline]
    pub fn values(&self) -> [u8; PIECE_LEN] {
        self.0
    }

    /// Number of cells equal to `value`.
    pub fn count(&self, value: u8) -> usize {
        self.0.iter().filter(|&&v| v == value).count()
    }

    /// Draw a piece uniformly from the catalogue.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        CATALOGUE[rng.usize(..PIECE_COUNT)]
    }
}

impl TryFrom<&[i64]> for Piece {
    type Error = PieceError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        if values.len() != PIECE_LEN {
            return Err(PieceError::WrongLength(values.len()));
        }
        let mut cells = [0u8; PIECE_LEN];
        for (index, &value) in values.iter().enumerate() {
            if value < i64::from(MIN_VALUE) || value > i64::from(MAX_VALUE) {
                return Err(PieceError::ValueOutOfRange { index, value });
            }
            cells[index] = value as u8;
        }
        Ok(Self(cells))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}
