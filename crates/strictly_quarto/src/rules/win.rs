//! Win detection for Quarto.
//!
//! A group is four cells: one of the 10 lines (4 rows, 4 columns, 2
//! diagonals) or one of the 9 overlapping 2x2 sub-grids. A filled group
//! wins when its four pieces agree on at least one channel. Lines and
//! sub-grids go through the same uniformity test.

use crate::board::{BOARD_SIZE, Board, Coord};
use crate::piece::{Channel, Piece};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Cells in a group.
pub const GROUP_LEN: usize = 4;

/// Identifies one of the 19 four-cell groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Row `0..4`.
    Row(usize),
    /// Column `0..4`.
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
    /// 2x2 window with its top-left corner at (`row`, `col`).
    SubGrid {
        /// Corner row, `0..3`.
        row: usize,
        /// Corner column, `0..3`.
        col: usize,
    },
}

impl GroupKind {
    /// The four cells of this group.
    pub fn cells(self) -> [Coord; GROUP_LEN] {
        match self {
            GroupKind::Row(row) => std::array::from_fn(|i| Coord::new(row, i)),
            GroupKind::Column(col) => std::array::from_fn(|i| Coord::new(i, col)),
            GroupKind::Diagonal => std::array::from_fn(|i| Coord::new(i, i)),
            GroupKind::AntiDiagonal => std::array::from_fn(|i| Coord::new(i, BOARD_SIZE - 1 - i)),
            GroupKind::SubGrid { row, col } => [
                Coord::new(row, col),
                Coord::new(row, col + 1),
                Coord::new(row + 1, col),
                Coord::new(row + 1, col + 1),
            ],
        }
    }

    /// Returns true for rows, columns, and diagonals.
    pub fn is_line(self) -> bool {
        !matches!(self, GroupKind::SubGrid { .. })
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKind::Row(row) => write!(f, "row {}", row + 1),
            GroupKind::Column(col) => write!(f, "column {}", col + 1),
            GroupKind::Diagonal => write!(f, "diagonal"),
            GroupKind::AntiDiagonal => write!(f, "anti-diagonal"),
            GroupKind::SubGrid { row, col } => write!(f, "2x2 at ({}, {})", row + 1, col + 1),
        }
    }
}

/// A group whose pieces share a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningGroup {
    /// Which group won.
    pub kind: GroupKind,
    /// The shared channel.
    pub channel: Channel,
}

impl std::fmt::Display for WinningGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} shares {}", self.kind, self.channel)
    }
}

/// All groups in search order: columns, rows, diagonals, then sub-grids
/// row-major by corner.
pub fn groups() -> impl Iterator<Item = GroupKind> {
    let columns = (0..BOARD_SIZE).map(GroupKind::Column);
    let rows = (0..BOARD_SIZE).map(GroupKind::Row);
    let diagonals = [GroupKind::Diagonal, GroupKind::AntiDiagonal];
    let sub_grids = (0..BOARD_SIZE - 1)
        .flat_map(|row| (0..BOARD_SIZE - 1).map(move |col| GroupKind::SubGrid { row, col }));
    columns.chain(rows).chain(diagonals).chain(sub_grids)
}

/// First channel on which all four pieces agree.
pub fn shared_channel(pieces: &[Piece; GROUP_LEN]) -> Option<Channel> {
    let [first, rest @ ..] = pieces;
    Channel::iter().find(|channel| {
        rest.iter()
            .all(|piece| piece.attribute(*channel) == first.attribute(*channel))
    })
}

/// Pieces of a group, `None` if any cell is empty.
fn filled(board: &Board, kind: GroupKind) -> Option<[Piece; GROUP_LEN]> {
    let [a, b, c, d] = kind.cells().map(|coord| board.get(coord));
    Some([a?, b?, c?, d?])
}

/// Finds the first winning group on the board.
///
/// Groups with an empty cell never win, whatever the filled cells share.
#[instrument(skip(board))]
pub fn winning_group(board: &Board) -> Option<WinningGroup> {
    let found = groups().find_map(|kind| {
        let pieces = filled(board, kind)?;
        shared_channel(&pieces).map(|channel| WinningGroup { kind, channel })
    });
    if let Some(group) = found {
        debug!(%group, "Winning group found");
    }
    found
}

/// Returns true if any line or sub-grid wins.
pub fn has_winner(board: &Board) -> bool {
    winning_group(board).is_some()
}
