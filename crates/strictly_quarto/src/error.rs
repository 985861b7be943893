//! Error types for the Quarto core.

use crate::piece::Piece;
use crate::turn::Player;

/// Error raised by catalog lookups, board writes, and the turn controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum QuartoError {
    /// The attribute tuple is not one of the 16 canonical pieces.
    #[display("Invalid piece attributes {:?}", _0)]
    InvalidPiece([u8; 4]),

    /// A catalog index or cell code outside 0..16.
    #[display("Piece index {} is outside the catalog", _0)]
    PieceIndexOutOfRange(usize),

    /// The selected piece is not in the available set.
    #[display("Piece {} is not available for selection", _0)]
    InvalidSelection(Piece),

    /// A coordinate outside the 4x4 grid.
    #[display("Cell ({row}, {col}) is outside the board")]
    CellOutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// A write to a cell that already holds a piece.
    #[display("Cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },

    /// The same piece appears twice on a board.
    #[display("Piece {} appears more than once", _0)]
    DuplicatePiece(Piece),

    /// A post-transition invariant failed.
    #[display("Game state corrupted: {}", _0)]
    GameCorrupted(String),
}

impl std::error::Error for QuartoError {}

/// An autonomous agent broke the actor contract.
///
/// Raised by [`TurnController::tick`](crate::TurnController::tick) and
/// sticky until the next restart: continuing would corrupt the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Contract violation by {player}: {error}")]
pub struct ContractViolation {
    /// The player whose actor produced the bad decision.
    pub player: Player,
    /// What was wrong with it.
    pub error: QuartoError,
}

impl ContractViolation {
    /// Creates a new contract violation.
    pub fn new(player: Player, error: QuartoError) -> Self {
        Self { player, error }
    }
}

impl std::error::Error for ContractViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
