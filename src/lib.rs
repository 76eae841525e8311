//! Sliding-Tile Puzzle Solver Library
//!
//! Finds move sequences that take an N×N sliding-tile puzzle to its solved
//! configuration (labels ascending, blank in the bottom-right corner), and
//! decides up front whether a configuration can be solved at all.
//!
//! ```
//! use slidesolve::{solve, Board, Heuristic, Strategy};
//!
//! let board: Board = "1 2 3/4 5 0/7 8 6".parse().unwrap();
//! let path = solve(&board, Strategy::AStar(Heuristic::H2)).unwrap();
//! assert_eq!(path.len(), 1);
//! assert_eq!(board.get(path[0].from), 6);
//! ```

mod astar;
pub mod board;
mod bfs;
pub mod heuristic;
pub mod solvability;
pub mod solver;

pub use board::{Board, BoardError, Move, Path, Position};
pub use heuristic::Heuristic;
pub use solvability::is_solvable;
pub use solver::{
    replay, solve, solve_rows, solve_with_cancel, spawn, CancelToken, SolveError, SolveHandle,
    Strategy,
};

/// The solved configuration for a `size`×`size` grid.
///
/// Built at compile time; every call hands out the same board.
pub fn goal_configuration(size: usize) -> Result<&'static Board, BoardError> {
    Board::goal(size)
}
