//! Board representation for N×N sliding-tile puzzles.
//!
//! A board is a flat, fixed-size array of tile labels in row-major order,
//! where 0 marks the blank. Only the first `size * size` cells are used; the
//! rest stay zero so derived equality, hashing and ordering only ever see the
//! board's real content. Boards are `Copy` and never mutated in place, so the
//! solvers use them directly as hash keys.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Smallest supported grid dimension.
pub const MIN_SIZE: usize = 2;

/// Largest supported grid dimension.
pub const MAX_SIZE: usize = 8;

/// Number of cells in the backing array of every board.
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE;

/// Label of the blank cell.
pub const BLANK: u8 = 0;

/// Offsets from the blank to the tile that slides into it: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Ways a board can be malformed, or a move can be illegal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("grid size {0} is outside the supported range {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    UnsupportedSize(usize),

    #[error("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("'{0}' is not a tile label")]
    InvalidLabel(String),

    #[error("label {label} is out of range for a {size}x{size} grid")]
    LabelOutOfRange { label: u8, size: usize },

    #[error("label {0} appears more than once")]
    DuplicateLabel(u8),

    #[error("configuration has no blank cell")]
    MissingBlank,

    #[error("the tile at {0} is not next to the blank")]
    IllegalMove(Position),
}

/// A cell coordinate, counted from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Taxicab distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// King-move distance to `other`.
    #[inline]
    pub fn chebyshev(self, other: Position) -> usize {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Whether `other` shares an edge with this cell.
    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One slide: the tile at `from` moves into the blank.
///
/// After the move the blank sits at `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self {
            from: Position::new(row, col),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.from.fmt(f)
    }
}

/// An ordered list of moves from a start board to the goal.
pub type Path = Vec<Move>;

/// An immutable N×N configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    size: u8,
    cells: [u8; MAX_CELLS],
}

/// Builds the goal board for one grid size: labels ascending, blank last.
const fn build_goal(size: usize) -> Board {
    let mut cells = [BLANK; MAX_CELLS];
    let cell_count = size * size;

    let mut idx = 0;
    while idx + 1 < cell_count {
        cells[idx] = (idx + 1) as u8;
        idx += 1;
    }

    Board {
        size: size as u8,
        cells,
    }
}

/// Builds the goal table at compile time, indexed by grid size.
///
/// Entries below `MIN_SIZE` are placeholders and never handed out.
const fn build_goal_table() -> [Board; MAX_SIZE + 1] {
    let mut table = [Board {
        size: 0,
        cells: [BLANK; MAX_CELLS],
    }; MAX_SIZE + 1];

    let mut size = MIN_SIZE;
    while size <= MAX_SIZE {
        table[size] = build_goal(size);
        size += 1;
    }
    table
}

static GOALS: [Board; MAX_SIZE + 1] = build_goal_table();

fn check_size(size: usize) -> Result<(), BoardError> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::UnsupportedSize(size))
    }
}

impl Board {
    /// The solved configuration for a `size`×`size` grid.
    pub fn goal(size: usize) -> Result<&'static Board, BoardError> {
        check_size(size)?;
        Ok(&GOALS[size])
    }

    /// Builds a board from `size * size` row-major labels.
    ///
    /// The labels must be a permutation of `0..size * size`.
    pub fn from_flat(cells: &[u8], size: usize) -> Result<Self, BoardError> {
        check_size(size)?;
        let cell_count = size * size;
        if cells.len() != cell_count {
            return Err(BoardError::CellCount {
                expected: cell_count,
                found: cells.len(),
            });
        }
        if !cells.contains(&BLANK) {
            return Err(BoardError::MissingBlank);
        }

        let mut seen = [false; MAX_CELLS];
        for &label in cells {
            if label as usize >= cell_count {
                return Err(BoardError::LabelOutOfRange { label, size });
            }
            if seen[label as usize] {
                return Err(BoardError::DuplicateLabel(label));
            }
            seen[label as usize] = true;
        }

        let mut board = Board {
            size: size as u8,
            cells: [BLANK; MAX_CELLS],
        };
        board.cells[..cell_count].copy_from_slice(cells);
        Ok(board)
    }

    /// Builds a board from a square matrix; the row count sets the size.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, BoardError> {
        let size = rows.len();
        check_size(size)?;

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Self::from_flat(&cells, size)
    }

    /// Grid dimension N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// The board's labels in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        let size = self.size();
        &self.cells[..size * size]
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells().chunks(self.size())
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row * self.size() + pos.col
    }

    #[inline]
    fn position_of_index(&self, idx: usize) -> Position {
        Position::new(idx / self.size(), idx % self.size())
    }

    /// Label at `pos`. `pos` must lie on the board.
    #[inline]
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    fn contains(&self, pos: Position) -> bool {
        pos.row < self.size() && pos.col < self.size()
    }

    /// Locates the blank with a linear scan.
    pub fn blank(&self) -> Position {
        let idx = self
            .cells()
            .iter()
            .position(|&label| label == BLANK)
            .unwrap_or(self.cells().len() - 1);
        self.position_of_index(idx)
    }

    /// Where `label` sits in the goal configuration.
    ///
    /// The blank's goal cell is the bottom-right corner.
    #[inline]
    pub fn goal_position(&self, label: u8) -> Position {
        let size = self.size();
        if label == BLANK {
            Position::new(size - 1, size - 1)
        } else {
            let idx = label as usize - 1;
            Position::new(idx / size, idx % size)
        }
    }

    /// The goal board with this board's size.
    #[inline]
    pub fn goal_for(&self) -> &'static Board {
        &GOALS[self.size()]
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self == self.goal_for()
    }

    /// Swaps the blank at `blank` with the tile at `from`.
    fn slide(&self, blank: Position, from: Position) -> Board {
        let mut next = *self;
        let (blank_idx, from_idx) = (self.index(blank), self.index(from));
        next.cells.swap(blank_idx, from_idx);
        next
    }

    /// The legal moves from this board with their resulting boards.
    ///
    /// Tiles are tried above, below, left of and right of the blank, in that order.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> {
        let board = *self;
        let blank = board.blank();
        let size = board.size() as isize;

        DIRECTIONS.into_iter().filter_map(move |(d_row, d_col)| {
            let row = blank.row as isize + d_row;
            let col = blank.col as isize + d_col;
            if !(0..size).contains(&row) || !(0..size).contains(&col) {
                return None;
            }

            let from = Position::new(row as usize, col as usize);
            Some((Move { from }, board.slide(blank, from)))
        })
    }

    /// Slides the tile at `mv.from` into the blank.
    pub fn apply(&self, mv: Move) -> Result<Board, BoardError> {
        let blank = self.blank();
        if !self.contains(mv.from) || !mv.from.is_adjacent(blank) {
            return Err(BoardError::IllegalMove(mv.from));
        }
        Ok(self.slide(blank, mv.from))
    }

    /// Single-line form accepted by `FromStr`, e.g. `1 2 3/4 5 6/7 8 0`.
    pub fn notation(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|label| label.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.notation())
    }
}

/// One row per line with right-aligned labels; the blank prints as '.'.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells().len() - 1).to_string().len();

        for (row_index, row) in self.rows().enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col, &label) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if label == BLANK {
                    write!(f, "{:>width$}", '.')?;
                } else {
                    write!(f, "{:>width$}", label)?;
                }
            }
        }
        Ok(())
    }
}

/// Parses rows separated by '/' or newlines, cells by whitespace or commas.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows = text
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|token| !token.is_empty())
                    .map(|token| {
                        token
                            .parse::<u8>()
                            .map_err(|_| BoardError::InvalidLabel(token.to_string()))
                    })
                    .collect::<Result<Vec<u8>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Board::from_rows(&rows)
    }
}
