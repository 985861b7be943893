//! The 4x4 Quarto board.

use crate::error::QuartoError;
use crate::piece::{PIECE_COUNT, Piece};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rows and columns on the board.
pub const BOARD_SIZE: usize = 4;

/// A (row, col) cell coordinate.
///
/// Coordinates are not range-checked on construction: actors may hand back
/// anything, and the controller decides what an out-of-range value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row, 0 at the top.
    pub row: usize,
    /// Column, 0 at the left.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// All 16 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(row, col)))
    }

    fn check(self) -> Result<Self, QuartoError> {
        if self.in_bounds() {
            Ok(self)
        } else {
            Err(QuartoError::CellOutOfBounds {
                row: self.row,
                col: self.col,
            })
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cell contents of the 4x4 grid.
///
/// Serializes as the cell-code grid of [`Board::encoded`]; deserialization
/// runs [`Board::from_encoded`] and rejects repeated pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "[[u8; BOARD_SIZE]; BOARD_SIZE]",
    into = "[[u8; BOARD_SIZE]; BOARD_SIZE]"
)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from cell codes (0 empty, otherwise index + 1).
    ///
    /// # Errors
    ///
    /// Fails on codes above 16 or when a piece appears twice.
    #[instrument]
    pub fn from_encoded(codes: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, QuartoError> {
        let mut board = Self::new();
        let mut seen = [false; PIECE_COUNT];
        for coord in Coord::all() {
            if let Some(piece) = Piece::from_cell_code(codes[coord.row][coord.col])? {
                if std::mem::replace(&mut seen[piece.index()], true) {
                    return Err(QuartoError::DuplicatePiece(piece));
                }
                board.cells[coord.row][coord.col] = Some(piece);
            }
        }
        Ok(board)
    }

    /// Piece at a cell, `None` when empty or off the board.
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        if coord.in_bounds() {
            self.cells[coord.row][coord.col]
        } else {
            None
        }
    }

    /// Returns true if the cell is on the board and holds no piece.
    pub fn is_empty(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.cells[coord.row][coord.col].is_none()
    }

    /// Writes a piece into an empty cell.
    ///
    /// # Errors
    ///
    /// Fails if the cell is off the board or already occupied.
    #[instrument(skip(self, piece), fields(piece = %piece))]
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Result<(), QuartoError> {
        let coord = coord.check()?;
        let cell = &mut self.cells[coord.row][coord.col];
        if cell.is_some() {
            return Err(QuartoError::CellOccupied {
                row: coord.row,
                col: coord.col,
            });
        }
        *cell = Some(piece);
        Ok(())
    }

    /// Rows of cells.
    pub fn cells(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Placed pieces with their cells, row-major.
    pub fn placed(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|coord| self.get(coord).map(|piece| (coord, piece)))
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.placed().count()
    }

    /// Cell codes for external collaborators (0 empty, otherwise index + 1).
    pub fn encoded(&self) -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
        self.cells
            .map(|row| row.map(|cell| cell.map_or(0, Piece::cell_code)))
    }

    /// Formats the board as a human-readable grid of piece labels.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or_else(|| "....".to_string(), Piece::label))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TryFrom<[[u8; BOARD_SIZE]; BOARD_SIZE]> for Board {
    type Error = QuartoError;

    fn try_from(codes: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, Self::Error> {
        Self::from_encoded(codes)
    }
}

impl From<Board> for [[u8; BOARD_SIZE]; BOARD_SIZE] {
    fn from(board: Board) -> Self {
        board.encoded()
    }
}
