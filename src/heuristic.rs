//! Cost estimates used to guide A*.
//!
//! | Tag | Estimate                        | Admissible |
//! |-----|---------------------------------|------------|
//! | H1  | misplaced tiles                 | yes        |
//! | H2  | Manhattan distance              | yes        |
//! | H3  | Manhattan + linear conflict     | yes        |
//! | H4  | corner-tile penalty             | no         |
//! | H5  | Chebyshev ("walking") distance  | yes        |
//! | H6  | misplaced tiles + sequence score| no         |
//!
//! A* only guarantees a shortest path with an admissible estimate. H4 and H6
//! are kept for experimentation: their paths are valid but may be longer
//! than necessary.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::board::{Board, Position, BLANK, MAX_SIZE};

/// Signature shared by every estimate.
pub type HeuristicFn = fn(&Board) -> u32;

/// Selects one of the fixed estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl Heuristic {
    pub const ALL: [Heuristic; 6] = [
        Heuristic::H1,
        Heuristic::H2,
        Heuristic::H3,
        Heuristic::H4,
        Heuristic::H5,
        Heuristic::H6,
    ];

    /// Resolves a tag such as `H3`, `h3` or `A* H3`.
    ///
    /// Unknown tags fall back to H2.
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        let bare = trimmed
            .strip_prefix("A*")
            .or_else(|| trimmed.strip_prefix("a*"))
            .unwrap_or(trimmed)
            .trim();

        Self::ALL
            .into_iter()
            .find(|heuristic| heuristic.name().eq_ignore_ascii_case(bare))
            .unwrap_or_else(|| {
                debug!(tag, "unknown heuristic tag, using H2");
                Heuristic::H2
            })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::H1 => "H1",
            Heuristic::H2 => "H2",
            Heuristic::H3 => "H3",
            Heuristic::H4 => "H4",
            Heuristic::H5 => "H5",
            Heuristic::H6 => "H6",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Heuristic::H1 => "misplaced tiles",
            Heuristic::H2 => "Manhattan distance",
            Heuristic::H3 => "Manhattan distance + linear conflict",
            Heuristic::H4 => "corner-tile penalty",
            Heuristic::H5 => "Chebyshev distance",
            Heuristic::H6 => "sequence score",
        }
    }

    /// Whether the estimate never exceeds the true distance to the goal.
    pub const fn is_admissible(self) -> bool {
        !matches!(self, Heuristic::H4 | Heuristic::H6)
    }

    /// The estimate as a plain function, resolved once per solve.
    pub fn function(self) -> HeuristicFn {
        match self {
            Heuristic::H1 => misplaced_tiles,
            Heuristic::H2 => manhattan,
            Heuristic::H3 => linear_conflict,
            Heuristic::H4 => corner_tiles,
            Heuristic::H5 => chebyshev,
            Heuristic::H6 => sequence_score,
        }
    }

    pub fn estimate(self, board: &Board) -> u32 {
        (self.function())(board)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parsing never fails; see [`Heuristic::from_tag`].
impl FromStr for Heuristic {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(tag))
    }
}

/// Non-blank tiles paired with their current positions.
fn tiles(board: &Board) -> impl Iterator<Item = (u8, Position)> + '_ {
    let size = board.size();
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(_, &label)| label != BLANK)
        .map(move |(idx, &label)| (label, Position::new(idx / size, idx % size)))
}

/// H1: tiles not on their goal cell. The blank never counts.
pub fn misplaced_tiles(board: &Board) -> u32 {
    let goal = board.goal_for();
    board
        .cells()
        .iter()
        .zip(goal.cells())
        .filter(|&(&label, &target)| label != BLANK && label != target)
        .count() as u32
}

/// H2: sum of each tile's taxicab distance to its goal cell.
pub fn manhattan(board: &Board) -> u32 {
    tiles(board)
        .map(|(label, pos)| pos.manhattan(board.goal_position(label)) as u32)
        .sum()
}

/// H3: Manhattan distance plus 2 for every tile that has to leave its goal
/// line so the rest of that line can pass each other.
///
/// Two tiles are in conflict when both sit in their goal row (or column) and
/// their order there is reversed. With pairwise disjoint conflicts this is 2
/// per conflicting pair; when one tile blocks several others it only has to
/// step aside once. The tiles that may stay form the longest run already in
/// goal order, so every other tile in the line is charged.
pub fn linear_conflict(board: &Board) -> u32 {
    let size = board.size();
    let mut penalty = 0;

    for line in 0..size {
        let mut row_goals = [0usize; MAX_SIZE];
        let mut row_len = 0;
        let mut col_goals = [0usize; MAX_SIZE];
        let mut col_len = 0;

        for offset in 0..size {
            let in_row = board.get(Position::new(line, offset));
            if in_row != BLANK {
                let target = board.goal_position(in_row);
                if target.row == line {
                    row_goals[row_len] = target.col;
                    row_len += 1;
                }
            }

            let in_col = board.get(Position::new(offset, line));
            if in_col != BLANK {
                let target = board.goal_position(in_col);
                if target.col == line {
                    col_goals[col_len] = target.row;
                    col_len += 1;
                }
            }
        }

        penalty += line_penalty(&row_goals[..row_len]) + line_penalty(&col_goals[..col_len]);
    }

    manhattan(board) + penalty
}

/// Extra moves forced by one line, given the goal coordinates of the tiles
/// that belong to it in their current order.
fn line_penalty(goals: &[usize]) -> u32 {
    2 * (goals.len() - longest_increasing_run(goals)) as u32
}

/// Length of the longest strictly increasing subsequence of `goals`.
fn longest_increasing_run(goals: &[usize]) -> usize {
    // ending_at[i]: longest increasing subsequence that ends with goals[i]
    let mut ending_at = [0usize; MAX_SIZE];
    let mut longest = 0;

    for i in 0..goals.len() {
        ending_at[i] = 1 + (0..i)
            .filter(|&j| goals[j] < goals[i])
            .map(|j| ending_at[j])
            .max()
            .unwrap_or(0);
        longest = longest.max(ending_at[i]);
    }
    longest
}

/// H4: looks only at the four corners.
///
/// A corner holding a foreign tile adds that tile's Manhattan distance, and
/// 2 more when it breaks the corner's ordering rule.
pub fn corner_tiles(board: &Board) -> u32 {
    let size = board.size();
    let last = size - 1;
    let goal = board.goal_for();
    let bottom_left_label = size * (size - 1) + 1;

    let corners = [
        Position::new(0, 0),
        Position::new(0, last),
        Position::new(last, 0),
        Position::new(last, last),
    ];

    let mut total = 0;
    for corner in corners {
        let label = board.get(corner);
        if label == BLANK || label == goal.get(corner) {
            continue;
        }

        total += corner.manhattan(board.goal_position(label)) as u32;

        let value = label as usize;
        let breaks_rule = match (corner.row, corner.col) {
            (0, 0) => value > 1,
            (0, _) => value > size,
            (_, 0) => value > bottom_left_label,
            _ => true,
        };
        if breaks_rule {
            total += 2;
        }
    }
    total
}

/// H5: sum of each tile's king-move distance to its goal cell.
pub fn chebyshev(board: &Board) -> u32 {
    tiles(board)
        .map(|(label, pos)| pos.chebyshev(board.goal_position(label)) as u32)
        .sum()
}

/// H6: misplaced tiles plus 2 for each neighbouring pair whose goal cells are
/// neighbours along the same line but whose labels run backwards.
pub fn sequence_score(board: &Board) -> u32 {
    let size = board.size();
    let mut total = 0;

    for line in 0..size {
        for step in 0..size - 1 {
            let left = board.get(Position::new(line, step));
            let right = board.get(Position::new(line, step + 1));
            if left != BLANK && right != BLANK {
                let (a, b) = (board.goal_position(left), board.goal_position(right));
                if a.row == b.row && a.col.abs_diff(b.col) == 1 && left > right {
                    total += 2;
                }
            }

            let upper = board.get(Position::new(step, line));
            let lower = board.get(Position::new(step + 1, line));
            if upper != BLANK && lower != BLANK {
                let (a, b) = (board.goal_position(upper), board.goal_position(lower));
                if a.col == b.col && a.row.abs_diff(b.row) == 1 && upper > lower {
                    total += 2;
                }
            }
        }
    }

    total + misplaced_tiles(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::solvability::shuffle;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_goal_scores_zero() {
        for size in 2..=6 {
            let goal = Board::goal(size).unwrap();
            for heuristic in Heuristic::ALL {
                assert_eq!(heuristic.estimate(goal), 0, "{heuristic} on {size}x{size} goal");
            }
        }
    }

    #[test]
    fn test_from_tag_falls_back_to_manhattan() {
        assert_eq!(Heuristic::from_tag("H3"), Heuristic::H3);
        assert_eq!(Heuristic::from_tag("h5"), Heuristic::H5);
        assert_eq!(Heuristic::from_tag("A* H1"), Heuristic::H1);
        assert_eq!(Heuristic::from_tag("H9"), Heuristic::H2);
        assert_eq!(Heuristic::from_tag(""), Heuristic::H2);
        assert_eq!("H6".parse::<Heuristic>(), Ok(Heuristic::H6));
    }

    #[test]
    fn test_misplaced_ignores_blank() {
        // tile 6 and the blank swapped: one move away
        assert_eq!(misplaced_tiles(&board("1 2 3/4 5 0/7 8 6")), 1);
        assert_eq!(misplaced_tiles(&board("1 2 3/4 5 6/8 7 0")), 2);
    }

    #[test]
    fn test_manhattan_and_chebyshev() {
        // 5 and 1 are diagonal from home, 8 one column off, 7 two columns off
        let b = board("5 2 3/4 1 6/8 0 7");
        assert_eq!(manhattan(&b), 2 + 2 + 1 + 2);
        assert_eq!(chebyshev(&b), 1 + 1 + 1 + 2);
    }

    #[test]
    fn test_linear_conflict_pairs() {
        // 2 and 1 reversed in their goal row
        let b = board("2 1 3/4 5 6/7 8 0");
        assert_eq!(manhattan(&b), 2);
        assert_eq!(linear_conflict(&b), 4);

        // 4 and 1 reversed in their goal column
        let b = board("4 2 3/1 5 6/7 8 0");
        assert_eq!(linear_conflict(&b), manhattan(&b) + 2);
    }

    #[test]
    fn test_linear_conflict_charges_each_removed_tile_once() {
        // 3 2 1 in the top row: three conflicting pairs, two tiles must leave
        let b = board("3 2 1/4 5 6/7 8 0");
        assert_eq!(linear_conflict(&b), manhattan(&b) + 4);
    }

    #[test]
    fn test_line_penalty_keeps_longest_ordered_run() {
        assert_eq!(line_penalty(&[]), 0);
        assert_eq!(line_penalty(&[0, 1, 2]), 0);
        assert_eq!(line_penalty(&[2, 1, 0]), 4);
        // 1 3 4 can stay put, only 0 and 2 must step aside
        assert_eq!(line_penalty(&[1, 3, 0, 4, 2]), 4);
        assert_eq!(line_penalty(&[7, 6, 5, 4, 3, 2, 1, 0]), 14);
    }

    #[test]
    fn test_linear_conflict_on_long_rows() {
        let b = board("2 4 1 5 3/6 7 8 9 10/11 12 13 14 15/16 17 18 19 20/21 22 23 24 0");
        assert_eq!(manhattan(&b), 8);
        assert_eq!(linear_conflict(&b), 12);
    }

    #[test]
    fn test_corner_penalty() {
        // 9 in the top-left: foreign tile that breaks the rule
        let b = board("9 2 3 4/5 6 7 8/1 10 11 12/13 14 15 0");
        let expected = Position::new(0, 0).manhattan(Position::new(2, 0)) as u32 + 2;
        assert_eq!(corner_tiles(&b), expected);

        // 2 in the top-right of a 4x4: foreign but 2 <= 4, so no penalty
        let b = board("1 4 3 2/5 6 7 8/9 10 11 12/13 14 15 0");
        assert_eq!(corner_tiles(&b), 2);
    }

    #[test]
    fn test_sequence_score() {
        // 2 before 1 in the top row adds a sequence penalty on top of H1
        let b = board("2 1 3/4 5 6/7 8 0");
        assert_eq!(sequence_score(&b), 2 + 2);

        // 4 above 1 in the first column
        let b = board("4 2 3/1 5 6/7 8 0");
        assert_eq!(sequence_score(&b), 2 + 2);
    }

    #[test]
    fn test_admissible_dominance_ordering() {
        let mut rng = StdRng::seed_from_u64(11);
        for size in 2..=5 {
            for _ in 0..200 {
                let b = shuffle(size, &mut rng).unwrap();
                let (h1, h2, h3, h5) = (
                    misplaced_tiles(&b),
                    manhattan(&b),
                    linear_conflict(&b),
                    chebyshev(&b),
                );
                assert!(h1 <= h2, "H1 {h1} > H2 {h2} on {b:?}");
                assert!(h2 <= h3, "H2 {h2} > H3 {h3} on {b:?}");
                assert!(h5 <= h2, "H5 {h5} > H2 {h2} on {b:?}");
            }
        }
    }

    #[test]
    fn test_admissibility_flags() {
        let admissible: Vec<_> = Heuristic::ALL
            .into_iter()
            .filter(|h| h.is_admissible())
            .collect();
        assert_eq!(
            admissible,
            vec![Heuristic::H1, Heuristic::H2, Heuristic::H3, Heuristic::H5]
        );
    }
}
