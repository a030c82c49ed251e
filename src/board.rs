//! Othello board state and rules.
//!
//! The board is a plain 8x8 grid of [`Cell`]s. It is `Copy`, so a scratch
//! board for evaluation is an ordinary value copy.
//!
//! Moves are validated once, by [`Board::legal_move`], which hands back a
//! [`LegalMove`] token. [`Board::apply_move`] accepts only that token, so an
//! unchecked placement cannot be expressed.
//!
//! Legality and flipping share one directional walk, [`Board::flip_run`].

use std::fmt;

use derive_more::{Display, Error};

use crate::constants::{CELLS, DIRECTIONS, GLYPH_BLACK, GLYPH_EMPTY, GLYPH_WHITE, N};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Moves first.
    Black,
    White,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Side),
}

/// A zero-based `(row, col)` coordinate that is always on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    row: u8,
    col: u8,
}

impl Move {
    /// Returns `None` if either coordinate is outside `0..8`.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < N && col < N).then_some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Build a move from a row-major cell index in `0..64`.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= CELLS {
            return None;
        }
        Self::new(idx / N, idx % N)
    }

    /// The neighbouring coordinate one step along `(dr, dc)`, if on the board.
    #[inline]
    fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row().checked_add_signed(dr)?;
        let col = self.col().checked_add_signed(dc)?;
        Self::new(row, col)
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..CELLS).filter_map(Move::from_index)
    }
}

impl fmt::Display for Move {
    /// Formats as the 1-based `row col` pair a player would type.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row() + 1, self.col() + 1)
    }
}

/// A move that has been checked legal for `side` on some board.
///
/// Only [`Board::legal_move`] (and functions built on it) can produce one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    mv: Move,
    side: Side,
}

impl LegalMove {
    #[inline]
    pub fn mv(self) -> Move {
        self.mv
    }

    #[inline]
    pub fn side(self) -> Side {
        self.side
    }
}

/// Stone counts of a finished (or any) position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub black: usize,
    pub white: usize,
}

impl Outcome {
    /// The side with strictly more stones, or `None` for a tie.
    pub fn winner(self) -> Option<Side> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Side::Black),
            std::cmp::Ordering::Less => Some(Side::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Error from [`Board::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    #[display("row {row} has {len} cells, expected {}", N)]
    RowLength { row: usize, len: usize },
    #[display("unexpected {ch:?} at row {row}, column {col}")]
    BadCell { row: usize, col: usize, ch: char },
}

/// An 8x8 Othello board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position: White on (3,3) and (4,4), Black on
    /// (3,4) and (4,3).
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.cells[3][3] = Cell::Stone(Side::White);
        board.cells[3][4] = Cell::Stone(Side::Black);
        board.cells[4][3] = Cell::Stone(Side::Black);
        board.cells[4][4] = Cell::Stone(Side::White);
        board
    }

    /// A board with no stones at all.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; N]; N],
        }
    }

    /// Build a position from a text diagram.
    ///
    /// `X` is Black, `O` is White, `.` or `-` is empty. Spaces are ignored.
    pub fn from_rows(rows: &[&str; N]) -> Result<Self, BoardParseError> {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != N {
                return Err(BoardParseError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, ch) in chars.into_iter().enumerate() {
                board.cells[row][col] = match ch {
                    'X' | 'x' => Cell::Stone(Side::Black),
                    'O' | 'o' => Cell::Stone(Side::White),
                    '.' | '-' => Cell::Empty,
                    _ => return Err(BoardParseError::BadCell { row, col, ch }),
                };
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row()][mv.col()]
    }

    #[inline]
    fn set(&mut self, mv: Move, cell: Cell) {
        self.cells[mv.row()][mv.col()] = cell;
    }

    /// Length of the opponent run that a `side` stone at `mv` would flip
    /// along `(dr, dc)`.
    ///
    /// Walks outward from `mv` over contiguous opponent stones. The run counts
    /// only if it is closed by a `side` stone; leaving the board or reaching
    /// an empty cell yields 0. The cell at `mv` itself is not inspected.
    pub fn flip_run(&self, mv: Move, (dr, dc): (isize, isize), side: Side) -> usize {
        let opp = side.opponent();
        let mut run = 0;
        let mut cur = mv;
        while let Some(next) = cur.offset(dr, dc) {
            match self.get(next) {
                Cell::Stone(s) if s == opp => {
                    run += 1;
                    cur = next;
                }
                Cell::Stone(_) => return run,
                Cell::Empty => return 0,
            }
        }
        0
    }

    /// True if `mv` is empty and flips at least one stone for `side`.
    pub fn is_legal_move(&self, mv: Move, side: Side) -> bool {
        self.get(mv) == Cell::Empty
            && DIRECTIONS
                .iter()
                .any(|&d| self.flip_run(mv, d, side) > 0)
    }

    /// Validate `mv` for `side`, producing the token [`Board::apply_move`] needs.
    pub fn legal_move(&self, mv: Move, side: Side) -> Option<LegalMove> {
        self.is_legal_move(mv, side).then_some(LegalMove { mv, side })
    }

    /// Place the stone and flip every closed opponent run.
    ///
    /// Returns the number of stones flipped (excluding the placed one).
    pub fn apply_move(&mut self, legal: LegalMove) -> usize {
        let LegalMove { mv, side } = legal;
        let runs = DIRECTIONS.map(|d| self.flip_run(mv, d, side));

        self.set(mv, Cell::Stone(side));
        let mut flipped = 0;
        for (&(dr, dc), &run) in DIRECTIONS.iter().zip(runs.iter()) {
            let mut cur = mv;
            for _ in 0..run {
                let Some(next) = cur.offset(dr, dc) else {
                    break;
                };
                self.set(next, Cell::Stone(side));
                cur = next;
                flipped += 1;
            }
        }
        flipped
    }

    /// Returns `(black, white)` stone counts.
    pub fn count_stones(&self) -> (usize, usize) {
        let mut black = 0;
        let mut white = 0;
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::Stone(Side::Black) => black += 1,
                Cell::Stone(Side::White) => white += 1,
                Cell::Empty => {}
            }
        }
        (black, white)
    }

    pub fn empty_count(&self) -> usize {
        let (black, white) = self.count_stones();
        CELLS - black - white
    }

    /// Stones of `side` minus stones of its opponent.
    pub fn differential(&self, side: Side) -> i32 {
        let (black, white) = self.count_stones();
        let diff = black as i32 - white as i32;
        match side {
            Side::Black => diff,
            Side::White => -diff,
        }
    }

    pub fn has_any_legal_move(&self, side: Side) -> bool {
        Move::all().any(|mv| self.is_legal_move(mv, side))
    }

    /// All legal moves for `side`, in row-major order.
    pub fn legal_moves(&self, side: Side) -> Vec<LegalMove> {
        Move::all()
            .filter_map(|mv| self.legal_move(mv, side))
            .collect()
    }

    /// Neither side can move.
    pub fn is_terminal(&self) -> bool {
        !self.has_any_legal_move(Side::Black) && !self.has_any_legal_move(Side::White)
    }

    pub fn outcome(&self) -> Outcome {
        let (black, white) = self.count_stones();
        Outcome { black, white }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 1..=N {
            write!(f, " {col}")?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", row + 1)?;
            for cell in cells {
                let ch = match cell {
                    Cell::Stone(Side::Black) => GLYPH_BLACK,
                    Cell::Stone(Side::White) => GLYPH_WHITE,
                    Cell::Empty => GLYPH_EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
