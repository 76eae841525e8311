//! Parity-based solvability oracle and random board generation.
//!
//! A slide never changes the parity of the inversion count on odd grids. On
//! even grids a vertical slide flips it while moving the blank one row, so
//! the sum of inversions and the blank's row counted from the bottom keeps
//! its parity. The goal has zero of both, which gives the rules below.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, BoardError, Move, BLANK};

/// Counts pairs of tiles that appear in the opposite order to the goal.
///
/// The blank is skipped.
pub fn count_inversions(cells: &[u8]) -> usize {
    cells
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label != BLANK)
        .map(|(i, &label)| {
            cells[i + 1..]
                .iter()
                .filter(|&&later| later != BLANK && later < label)
                .count()
        })
        .sum()
}

/// Applies the parity rule for a grid of `size`.
///
/// `blank_row_from_bottom` is 0 when the blank is in the last row.
fn parity_allows(size: usize, inversions: usize, blank_row_from_bottom: usize) -> bool {
    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + blank_row_from_bottom) % 2 == 0
    }
}

/// Whether the flattened labels describe a board reachable from the goal.
///
/// Anything that is not a permutation of `0..size * size` is unreachable
/// and yields `false`.
pub fn is_solvable(cells: &[u8], size: usize) -> bool {
    Board::from_flat(cells, size).is_ok_and(|board| board.is_solvable())
}

impl Board {
    /// Whether this board can reach the goal through legal slides.
    pub fn is_solvable(&self) -> bool {
        let blank_row_from_bottom = self.size() - 1 - self.blank().row;
        parity_allows(
            self.size(),
            count_inversions(self.cells()),
            blank_row_from_bottom,
        )
    }
}

/// Draws uniformly random permutations until one is solvable.
///
/// Half of all permutations pass, so this takes two draws on average.
pub fn shuffle<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board, BoardError> {
    let mut cells = Board::goal(size)?.cells().to_vec();
    loop {
        cells.shuffle(rng);
        let board = Board::from_flat(&cells, size)?;
        if board.is_solvable() {
            return Ok(board);
        }
    }
}

/// Shuffles only the tiles, leaving the blank in its goal corner.
///
/// With the blank fixed in the bottom row, even and odd grids both need an
/// even inversion count, so again half of all draws pass.
pub fn shuffle_tiles<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Board, BoardError> {
    let mut cells = Board::goal(size)?.cells().to_vec();
    let tile_count = cells.len() - 1;
    loop {
        cells[..tile_count].shuffle(rng);
        let board = Board::from_flat(&cells, size)?;
        if board.is_solvable() {
            return Ok(board);
        }
    }
}

/// Scrambles the goal with `moves` random slides.
///
/// A slide that would undo the previous one is never picked, so shallow
/// scrambles stay close to their nominal depth. Useful for producing boards
/// that A* can still solve on large grids.
pub fn scramble<R: Rng + ?Sized>(
    size: usize,
    moves: usize,
    rng: &mut R,
) -> Result<Board, BoardError> {
    let mut board = *Board::goal(size)?;
    let mut previous_blank = None;

    for _ in 0..moves {
        let blank = board.blank();
        let candidates: Vec<(Move, Board)> = board
            .successors()
            .filter(|(mv, _)| Some(mv.from) != previous_blank)
            .collect();

        // every cell has at least two neighbours, so one candidate always survives
        if let Some(&(_, next)) = candidates.choose(rng) {
            previous_blank = Some(blank);
            board = next;
        }
    }

    Ok(board)
}
