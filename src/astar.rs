//! A* search guided by one of the [`Heuristic`] estimates.
//!
//! Frontier entries are ordered by f = g + h, then by lower g, then by the
//! board's own ordering (row-major cell comparison). The path never takes
//! part in the ordering, so runs are reproducible.
//!
//! A node popped with a g no better than the one it was already expanded
//! with is skipped. Inconsistent estimates (H4, H6) can still reopen a node
//! when a strictly cheaper route to it turns up later.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::{Board, Move, Path};
use crate::heuristic::Heuristic;
use crate::solver::{reconstruct, CancelToken, SolveError};

/// Best known route to a board.
#[derive(Clone, Copy)]
struct Record {
    g: u32,
    parent: Option<(Board, Move)>,
}

/// Min-heap entry: (f, g, board).
type Entry = Reverse<(u32, u32, Board)>;

pub(crate) fn search(
    start: &Board,
    heuristic: Heuristic,
    cancel: &CancelToken,
) -> Result<Path, SolveError> {
    let estimate = heuristic.function();

    let mut frontier: BinaryHeap<Entry> = BinaryHeap::new();
    let mut records: FxHashMap<Board, Record> = FxHashMap::default();
    let mut expanded: FxHashMap<Board, u32> = FxHashMap::default();

    frontier.push(Reverse((estimate(start), 0, *start)));
    records.insert(*start, Record { g: 0, parent: None });

    while let Some(Reverse((_, g, board))) = frontier.pop() {
        if cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }

        if expanded.get(&board).is_some_and(|&seen_g| seen_g <= g) {
            continue;
        }
        expanded.insert(board, g);

        if board.is_goal() {
            debug!(%heuristic, expanded = expanded.len(), g, "a* reached the goal");
            return Ok(reconstruct(board, |b| {
                records.get(b).and_then(|record| record.parent)
            }));
        }

        let next_g = g + 1;
        for (mv, next) in board.successors() {
            let improves = records.get(&next).map_or(true, |record| next_g < record.g);
            if !improves {
                continue;
            }

            records.insert(
                next,
                Record {
                    g: next_g,
                    parent: Some((board, mv)),
                },
            );
            frontier.push(Reverse((next_g + estimate(&next), next_g, next)));
        }
    }

    debug!(%heuristic, expanded = expanded.len(), "a* exhausted the frontier");
    Err(SolveError::Unsolvable)
}
