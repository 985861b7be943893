//! Piece partition invariant: every piece is in exactly one place.

use super::Invariant;
use crate::controller::TurnController;
use crate::piece::{PIECE_COUNT, PieceCatalog};

/// Invariant: available ∪ placed ∪ {selected} is the whole catalog.
///
/// Each of the 16 pieces is either still available, on the board, or the
/// piece awaiting placement, and never in two of those at once.
pub struct PiecePartitionInvariant;

impl Invariant<TurnController> for PiecePartitionInvariant {
    fn holds(controller: &TurnController) -> bool {
        let mut seen = [0u8; PIECE_COUNT];

        let placed = controller.board().placed().map(|(_, piece)| piece);
        let available = controller.available().iter();
        let selected = controller.selected_piece();

        for piece in placed.chain(available).chain(selected) {
            seen[piece.index()] += 1;
        }

        PieceCatalog::all()
            .iter()
            .all(|piece| seen[piece.index()] == 1)
    }

    fn description() -> &'static str {
        "Available, placed, and selected pieces partition the catalog"
    }
}
