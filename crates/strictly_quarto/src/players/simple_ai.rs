//! Simple AI player for testing.

use super::{Actor, Decision};
use crate::available::AvailablePieces;
use crate::board::{Board, Coord};
use crate::piece::Piece;
use tracing::{debug, warn};

/// Simple AI that hands over the first available piece and places on the
/// first empty cell, row-major.
#[derive(Debug, Clone)]
pub struct SimpleAgent {
    name: String,
}

impl SimpleAgent {
    /// Creates a new simple AI.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for SimpleAgent {
    fn default() -> Self {
        Self::new("AI")
    }
}

impl Actor for SimpleAgent {
    fn select_piece(&mut self, _board: &Board, available: &AvailablePieces) -> Decision<Piece> {
        let choice = available.get(0);
        match choice {
            Some(piece) => debug!(ai = %self.name, piece = %piece, "AI chose piece"),
            None => warn!(ai = %self.name, "No pieces left to choose from"),
        }
        choice.into()
    }

    fn place_piece(
        &mut self,
        board: &Board,
        _available: &AvailablePieces,
        selected: Piece,
    ) -> Decision<Coord> {
        let choice = Coord::all().find(|coord| board.is_empty(*coord));
        match choice {
            Some(coord) => debug!(ai = %self.name, %coord, piece = %selected, "AI chose cell"),
            None => warn!(ai = %self.name, "No empty cells left"),
        }
        choice.into()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
