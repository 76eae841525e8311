//! Breadth-first search over blank slides.
//!
//! The state graph is unweighted, so the first time the goal leaves the
//! queue its path is a shortest one. The visited map doubles as the
//! predecessor table used to rebuild that path.
//!
//! Every reachable board may be visited. That is fine for 3x3 (181,440
//! states) but hopeless from 4x4 up; use A* there.

use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::{Board, Move, Path};
use crate::solver::{reconstruct, CancelToken, SolveError};

/// How a board was first reached; `None` for the start.
type Predecessors = FxHashMap<Board, Option<(Board, Move)>>;

pub(crate) fn search(start: &Board, cancel: &CancelToken) -> Result<Path, SolveError> {
    let mut frontier = VecDeque::from([*start]);
    let mut predecessors: Predecessors = FxHashMap::default();
    predecessors.insert(*start, None);
    let mut expanded = 0usize;

    while let Some(board) = frontier.pop_front() {
        if cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }

        if board.is_goal() {
            debug!(expanded, visited = predecessors.len(), "bfs reached the goal");
            return Ok(reconstruct(board, |b| {
                predecessors.get(b).copied().flatten()
            }));
        }

        expanded += 1;
        for (mv, next) in board.successors() {
            if let Entry::Vacant(slot) = predecessors.entry(next) {
                slot.insert(Some((board, mv)));
                frontier.push_back(next);
            }
        }
    }

    debug!(expanded, "bfs exhausted the reachable states");
    Err(SolveError::Unsolvable)
}
