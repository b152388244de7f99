//! Fixed heuristic for the first placement of a game.
//!
//! An empty board gives search almost nothing to rank, so the first piece is
//! placed by its shape instead:
//!
//! - Row: `[a, a, b]` with `b` at least two below `a` goes to the bottom slot;
//!   `[a, b, b]` with `a` at least two below `b` goes to the top slot; anything
//!   else to the middle.
//! - Column: three 10s go dead centre; no 10 at all goes to the outer thirds;
//!   a single 10 goes to the outer thirds but keeps off the very edges; two
//!   10s go to a random non-edge column.

use crate::board::Position;
use crate::constants::{MAX_VALUE, ROW_SLOTS, WIDTH};
use crate::piece::Piece;

/// Opening position for `piece` on an empty board.
pub fn first_position(piece: Piece, rng: &mut fastrand::Rng) -> Position {
    Position::new(first_row(piece), first_col(piece, rng))
}

fn first_row(piece: Piece) -> usize {
    let [top, mid, bottom] = piece.values();
    if top == mid && mid > bottom + 1 {
        ROW_SLOTS[2]
    } else if top + 1 < mid && mid == bottom {
        ROW_SLOTS[0]
    } else {
        ROW_SLOTS[1]
    }
}

fn first_col(piece: Piece, rng: &mut fastrand::Rng) -> usize {
    match piece.count(MAX_VALUE) {
        3 => WIDTH / 2,
        2 => 1 + rng.usize(..WIDTH - 2),
        tens => {
            let cols: Vec<usize> = (0..WIDTH)
                .filter(|&c| tens == 0 || (1..WIDTH - 2).contains(&c))
                .filter(|&c| c < WIDTH / 3 || c >= 2 * WIDTH / 3)
                .collect();
            cols[rng.usize(..cols.len())]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(values: [u8; 3]) -> Piece {
        Piece::new(values).unwrap()
    }

    fn cols_seen(values: [u8; 3]) -> Vec<usize> {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut seen: Vec<usize> = (0..500)
            .map(|_| first_position(piece(values), &mut rng).col)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen
    }

    #[test]
    fn test_rows() {
        assert_eq!(first_row(piece([9, 9, 7])), 6);
        assert_eq!(first_row(piece([10, 10, 7])), 6);
        assert_eq!(first_row(piece([9, 9, 8])), 3);
        assert_eq!(first_row(piece([7, 9, 9])), 0);
        assert_eq!(first_row(piece([8, 10, 10])), 0);
        assert_eq!(first_row(piece([8, 9, 9])), 3);
        assert_eq!(first_row(piece([7, 8, 9])), 3);
    }

    #[test]
    fn test_three_tens_centre() {
        assert_eq!(cols_seen([10, 10, 10]), vec![4]);
    }

    #[test]
    fn test_no_tens_outer_thirds() {
        assert_eq!(cols_seen([7, 8, 9]), vec![0, 1, 2, 6, 7, 8]);
    }

    #[test]
    fn test_one_ten_avoids_edges() {
        assert_eq!(cols_seen([10, 8, 9]), vec![1, 2, 6]);
    }

    #[test]
    fn test_two_tens_middle_columns() {
        assert_eq!(cols_seen([10, 10, 9]), vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
