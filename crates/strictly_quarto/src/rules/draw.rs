//! Draw detection for Quarto.

use super::win::has_winner;
use crate::board::{Board, Coord};
use tracing::instrument;

/// Checks if the board is full (all 16 cells occupied).
///
/// Only meaningful as a draw once win detection has come back negative.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    Coord::all().all(|coord| !board.is_empty(coord))
}

/// A full board with no winning group.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !has_winner(board)
}
