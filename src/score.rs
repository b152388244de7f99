//! Board evaluation: completed runs and near-complete runs.
//!
//! ## Real score
//! Every row, column, and diagonal (both directions) is scanned for maximal
//! runs of equal values. A run of length `L >= 3` with value `V` is worth
//! `V * L`. Empty cells form runs of value 0 and so never score.
//!
//! ## Potential score
//! For every cell, four local three-cell templates (→, ↓, ↘, ↙) are checked.
//! A template with exactly one empty slot and two equal values is one drop
//! away from a run and earns a bonus: half the sum of the known values, halved
//! again unless that half-sum is exactly 10.

use crate::board::Board;
use crate::constants::{EMPTY, HEIGHT, MIN_RUN, WIDTH};

/// Switches that change how the potential score is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// Sample the cell directly below twice in the vertical template instead
    /// of the two cells below. Matches the scores recorded by existing play.
    pub legacy_vertical_template: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            legacy_vertical_template: true,
        }
    }
}

/// Sum of `value * length` over every run of length >= 3 in `line`.
pub fn line_score<I>(line: I) -> u32
where
    I: IntoIterator<Item = u8>,
{
    let mut score = 0;
    let mut run_value: Option<u8> = None;
    let mut run_len = 0usize;

    for value in line {
        if run_value == Some(value) {
            run_len += 1;
            continue;
        }
        if let Some(v) = run_value {
            score += run_worth(v, run_len);
        }
        run_value = Some(value);
        run_len = 1;
    }
    if let Some(v) = run_value {
        score += run_worth(v, run_len);
    }

    score
}

#[inline]
fn run_worth(value: u8, len: usize) -> u32 {
    if len >= MIN_RUN {
        u32::from(value) * len as u32
    } else {
        0
    }
}

/// Score of all completed runs on the board.
pub fn real_score(board: &Board) -> u32 {
    let mut score = 0;

    // →
    for row in board.rows() {
        score += line_score(row.iter().copied());
    }
    // ↓
    for c in 0..WIDTH {
        score += line_score((0..HEIGHT).map(|r| board.get(r, c)));
    }
    // ↘ and ↗, one line per column offset; cells off the grid read as empty.
    let w = WIDTH as isize;
    let h = HEIGHT as isize;
    for offset in -(w - 1)..w {
        score += line_score((0..h).map(|i| board.at(i, offset + i).unwrap_or(EMPTY)));
        score += line_score((0..h).map(|i| board.at(h - 1 - i, offset + i).unwrap_or(EMPTY)));
    }

    score
}

/// Bonus for a three-cell template that is one drop away from a run.
pub fn potential_line(a: u8, b: u8, c: u8) -> f64 {
    let near_run = (a == EMPTY && b == c) || (b == EMPTY && c == a) || (c == EMPTY && a == b);
    if !near_run {
        return 0.0;
    }
    let half = f64::from(u16::from(a) + u16::from(b) + u16::from(c)) / 2.0;
    if half == 10.0 { half } else { half / 2.0 }
}

/// Evaluate a template given as cell offsets; any off-grid cell voids it.
fn template(board: &Board, cells: [(isize, isize); 3]) -> f64 {
    let [a, b, c] = cells;
    match (board.at(a.0, a.1), board.at(b.0, b.1), board.at(c.0, c.1)) {
        (Some(a), Some(b), Some(c)) => potential_line(a, b, c),
        _ => 0.0,
    }
}

/// Sum of the templates anchored at `(row, col)`.
pub fn potential_at(board: &Board, row: usize, col: usize, rules: ScoringRules) -> f64 {
    let r = row as isize;
    let c = col as isize;

    let mut score = template(board, [(r, c), (r, c + 1), (r, c + 2)]); // →
    if row + 2 < HEIGHT {
        let below = if rules.legacy_vertical_template {
            r + 1
        } else {
            r + 2
        };
        score += template(board, [(r, c), (r + 1, c), (below, c)]); // ↓
        score += template(board, [(r, c), (r + 1, c + 1), (r + 2, c + 2)]); // ↘
        score += template(board, [(r, c), (r + 1, c - 1), (r + 2, c - 2)]); // ↙
    }
    score
}

/// Heuristic bonus for near-complete runs across the whole board.
pub fn potential_score(board: &Board, rules: ScoringRules) -> f64 {
    let mut score = 0.0;
    for r in 0..HEIGHT {
        for c in 0..WIDTH {
            score += potential_at(board, r, c, rules);
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_runs() {
        assert_eq!(line_score([9, 9, 9]), 27);
        assert_eq!(line_score([9, 9]), 0);
        assert_eq!(line_score([7, 7, 7, 7, 0, 8, 8, 8, 0]), 28 + 24);
        assert_eq!(line_score([10, 10, 9, 10, 10]), 0);
        assert_eq!(line_score([0, 0, 0, 0]), 0);
        assert_eq!(line_score(std::iter::empty()), 0);
    }

    #[test]
    fn test_line_score_run_at_end() {
        assert_eq!(line_score([7, 8, 10, 10, 10, 10, 10]), 50);
    }

    #[test]
    fn test_potential_line() {
        assert_eq!(potential_line(0, 9, 9), 4.5);
        assert_eq!(potential_line(9, 0, 9), 4.5);
        assert_eq!(potential_line(9, 9, 0), 4.5);
        assert_eq!(potential_line(0, 10, 10), 10.0);
        assert_eq!(potential_line(7, 0, 7), 3.5);
        // Two empties or none: no bonus.
        assert_eq!(potential_line(0, 0, 9), 0.0);
        assert_eq!(potential_line(9, 9, 9), 0.0);
        assert_eq!(potential_line(0, 9, 8), 0.0);
        assert_eq!(potential_line(0, 0, 0), 0.0);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::new();
        assert_eq!(real_score(&board), 0);
        assert_eq!(potential_score(&board, ScoringRules::default()), 0.0);
    }

    #[test]
    fn test_column_run() {
        let mut cells = [[0u8; WIDTH]; HEIGHT];
        for row in cells.iter_mut().take(6) {
            row[0] = 8;
        }
        let board = Board::from_cells(cells);
        assert_eq!(real_score(&board), 48);
    }

    #[test]
    fn test_short_diagonal_scores() {
        // Anti-diagonal of length 3 in the top-left corner: (2,0), (1,1), (0,2).
        let mut cells = [[0u8; WIDTH]; HEIGHT];
        cells[2][0] = 7;
        cells[1][1] = 7;
        cells[0][2] = 7;
        let board = Board::from_cells(cells);
        assert_eq!(real_score(&board), 21);
    }

    #[test]
    fn test_main_diagonal_scores() {
        let mut cells = [[0u8; WIDTH]; HEIGHT];
        for i in 0..4 {
            cells[i + 5][i] = 9;
        }
        let board = Board::from_cells(cells);
        assert_eq!(real_score(&board), 36);
    }

    #[test]
    fn test_vertical_template_variants() {
        // A lone 9 at (1,4): the cell above it sees [0, 9, 9] with the legacy
        // template but [0, 9, 0] with the corrected one.
        let mut cells = [[0u8; WIDTH]; HEIGHT];
        cells[1][4] = 9;
        let board = Board::from_cells(cells);

        let legacy = potential_at(&board, 0, 4, ScoringRules::default());
        let corrected = potential_at(
            &board,
            0,
            4,
            ScoringRules {
                legacy_vertical_template: false,
            },
        );
        assert_eq!(legacy, 4.5);
        assert_eq!(corrected, 0.0);
    }

    #[test]
    fn test_horizontal_template_at_edge() {
        let mut cells = [[0u8; WIDTH]; HEIGHT];
        cells[8][7] = 10;
        cells[8][8] = 10;
        let board = Board::from_cells(cells);
        let rules = ScoringRules::default();
        // (8,6) sees [0,10,10]; (8,7) and (8,8) run off the grid.
        assert_eq!(potential_at(&board, 8, 6, rules), 10.0);
        assert_eq!(potential_at(&board, 8, 7, rules), 0.0);
        assert_eq!(potential_score(&board, rules), 10.0);
    }
}
