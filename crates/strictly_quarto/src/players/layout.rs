//! Display geometry for translating raw pointer coordinates.
//!
//! Translation is a pure function of (point, phase, layout): the board
//! region is tiled 4x4 into cells, the picker region is tiled into rows of
//! `picker_columns` slots addressing the available pieces in order.

use crate::board::{BOARD_SIZE, Coord};
use crate::turn::Phase;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A raw pointer coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: u32,
    /// Vertical offset from the top edge.
    pub y: u32,
}

impl Point {
    /// Creates a point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Region {
    /// Creates a region.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside the region.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x - self.x < self.width
            && point.y - self.y < self.height
    }

    fn offset(&self, point: Point) -> Option<(u32, u32)> {
        self.contains(point)
            .then(|| (point.x - self.x, point.y - self.y))
    }
}

/// What a pointer coordinate resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTarget {
    /// Position in the available-pieces list.
    Piece(usize),
    /// A board cell.
    Cell(Coord),
}

/// Where the board and the piece picker are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLayout {
    /// Board area, split into 4x4 equal cells.
    pub board: Region,
    /// Picker area below (or beside) the board.
    pub picker: Region,
    /// Slots per picker row.
    pub picker_columns: u32,
    /// Height of one picker row.
    pub picker_row_height: u32,
}

impl InputLayout {
    /// Width of one board cell.
    pub fn cell_width(&self) -> u32 {
        self.board.width / BOARD_SIZE as u32
    }

    /// Height of one board cell.
    pub fn cell_height(&self) -> u32 {
        self.board.height / BOARD_SIZE as u32
    }

    /// Width of one picker slot.
    pub fn picker_slot_width(&self) -> u32 {
        self.picker.width / self.picker_columns.max(1)
    }

    /// Region occupied by a board cell.
    pub fn cell_region(&self, coord: Coord) -> Region {
        Region::new(
            self.board.x + coord.col as u32 * self.cell_width(),
            self.board.y + coord.row as u32 * self.cell_height(),
            self.cell_width(),
            self.cell_height(),
        )
    }

    /// Region occupied by the picker slot at `position`.
    pub fn picker_slot_region(&self, position: usize) -> Region {
        let columns = self.picker_columns.max(1) as usize;
        Region::new(
            self.picker.x + (position % columns) as u32 * self.picker_slot_width(),
            self.picker.y + (position / columns) as u32 * self.picker_row_height,
            self.picker_slot_width(),
            self.picker_row_height,
        )
    }

    /// Resolves a pointer coordinate for the active phase.
    ///
    /// During `SelectPiece` only the picker is live, during `PlacePiece`
    /// only the board. Anything else resolves to `None`. The returned
    /// picker position is not checked against the number of available
    /// pieces.
    #[instrument(skip(self))]
    pub fn translate(&self, point: Point, phase: Phase) -> Option<InputTarget> {
        match phase {
            Phase::SelectPiece => {
                let (dx, dy) = self.picker.offset(point)?;
                let col = dx / self.picker_slot_width().max(1);
                let row = dy / self.picker_row_height.max(1);
                (col < self.picker_columns)
                    .then(|| InputTarget::Piece((row * self.picker_columns + col) as usize))
            }
            Phase::PlacePiece => {
                let (dx, dy) = self.board.offset(point)?;
                let coord = Coord::new(
                    (dy / self.cell_height().max(1)) as usize,
                    (dx / self.cell_width().max(1)) as usize,
                );
                coord.in_bounds().then_some(InputTarget::Cell(coord))
            }
        }
    }
}

impl Default for InputLayout {
    /// A 400x700 window: 100px board cells on top, 50px picker rows below.
    fn default() -> Self {
        Self {
            board: Region::new(0, 0, 400, 400),
            picker: Region::new(0, 400, 400, 300),
            picker_columns: 4,
            picker_row_height: 50,
        }
    }
}
