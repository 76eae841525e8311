//! Entry point shared by both search strategies.
//!
//! Solves run to completion on the calling thread. The only knob a caller
//! has while a solve is running is the [`CancelToken`], checked every time
//! a node leaves the frontier. [`spawn`] wraps that in a worker thread for
//! callers that must stay responsive.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use thiserror::Error;
use tracing::info;

use crate::board::{Board, BoardError, Move, Path};
use crate::heuristic::Heuristic;
use crate::{astar, bfs};

/// Why a solve returned no path.
///
/// None of these are faults: `Unsolvable` and `Cancelled` are ordinary
/// outcomes the caller reports to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] BoardError),

    #[error("no solution found")]
    Unsolvable,

    #[error("search cancelled")]
    Cancelled,

    #[error("solver worker stopped without a result")]
    Disconnected,
}

/// How to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Breadth-first search. Always shortest, only practical up to 3x3.
    Bfs,
    /// A* with the given estimate. Shortest only when the estimate is admissible.
    AStar(Heuristic),
}

impl Strategy {
    /// Resolves labels like `BFS`, `A*`, `A* H3` or `astar h1`.
    ///
    /// Returns `None` for anything that names neither strategy. The
    /// heuristic part follows [`Heuristic::from_tag`], including its H2
    /// fallback.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("bfs") {
            return Some(Strategy::Bfs);
        }

        let lower = name.to_ascii_lowercase();
        let rest = lower
            .strip_prefix("a*")
            .or_else(|| lower.strip_prefix("astar"))?;
        Some(Strategy::AStar(Heuristic::from_tag(rest)))
    }

    /// Whether the returned path is guaranteed to be a shortest one.
    pub const fn is_optimal(self) -> bool {
        match self {
            Strategy::Bfs => true,
            Strategy::AStar(heuristic) => heuristic.is_admissible(),
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AStar(Heuristic::default())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bfs => f.write_str("BFS"),
            Strategy::AStar(heuristic) => write!(f, "A* {heuristic}"),
        }
    }
}

/// Cooperative cancellation flag shared between a solve and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Solves `board`, returning the moves that bring it to the goal.
///
/// An already solved board yields an empty path.
pub fn solve(board: &Board, strategy: Strategy) -> Result<Path, SolveError> {
    solve_with_cancel(board, strategy, &CancelToken::new())
}

/// Like [`solve`], but gives up with `Cancelled` once `cancel` is set.
pub fn solve_with_cancel(
    board: &Board,
    strategy: Strategy,
    cancel: &CancelToken,
) -> Result<Path, SolveError> {
    info!(%strategy, size = board.size(), "solving");

    let result = match strategy {
        Strategy::Bfs => bfs::search(board, cancel),
        Strategy::AStar(heuristic) => astar::search(board, heuristic, cancel),
    };

    match &result {
        Ok(path) => info!(%strategy, moves = path.len(), "solved"),
        Err(err) => info!(%strategy, %err, "no path"),
    }
    result
}

/// Validates raw rows and solves them.
pub fn solve_rows(rows: &[Vec<u8>], strategy: Strategy) -> Result<Path, SolveError> {
    let board = Board::from_rows(rows)?;
    solve(&board, strategy)
}

/// Applies `path` to `start` one slide at a time.
///
/// Fails on the first move that is not legal where it is played.
pub fn replay(start: &Board, path: &[Move]) -> Result<Board, BoardError> {
    path.iter().try_fold(*start, |board, &mv| board.apply(mv))
}

/// Walks predecessor links back from `end` and returns the moves in play order.
pub(crate) fn reconstruct(
    end: Board,
    parent_of: impl Fn(&Board) -> Option<(Board, Move)>,
) -> Path {
    let mut moves = Vec::new();
    let mut current = end;
    while let Some((parent, mv)) = parent_of(&current) {
        moves.push(mv);
        current = parent;
    }
    moves.reverse();
    moves
}

/// A solve running on a worker thread.
pub struct SolveHandle {
    cancel: CancelToken,
    receiver: Receiver<Result<Path, SolveError>>,
}

/// Starts solving `board` on a new thread.
pub fn spawn(board: Board, strategy: Strategy) -> SolveHandle {
    let cancel = CancelToken::new();
    let token = cancel.clone();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        // the handle may already be gone; nobody is left to tell
        let _ = sender.send(solve_with_cancel(&board, strategy, &token));
    });

    SolveHandle { cancel, receiver }
}

impl SolveHandle {
    /// Asks the worker to stop at its next frontier pop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns the result if the worker has finished, without blocking.
    ///
    /// The result is handed out once; later calls report `Disconnected`.
    pub fn poll(&self) -> Option<Result<Path, SolveError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(SolveError::Disconnected)),
        }
    }

    /// Blocks until the worker finishes.
    pub fn wait(self) -> Result<Path, SolveError> {
        self.receiver
            .recv()
            .unwrap_or(Err(SolveError::Disconnected))
    }
}
