//! Serializable game snapshot for render collaborators and logs.

use crate::board::BOARD_SIZE;
use crate::controller::TurnController;
use crate::piece::Piece;
use crate::turn::{Phase, Player};
use derive_getters::Getters;
use serde::Serialize;

/// Read-only view of a game at one instant.
///
/// The board uses the cell encoding (0 empty, piece index + 1 otherwise) and
/// available pieces are listed by catalog index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct GameSnapshot {
    board: [[u8; BOARD_SIZE]; BOARD_SIZE],
    available: Vec<usize>,
    turn: Option<Player>,
    phase: Option<Phase>,
    selected_piece: Option<Piece>,
    game_over: bool,
    winner: Option<Player>,
    halted: bool,
}

impl From<&TurnController> for GameSnapshot {
    fn from(controller: &TurnController) -> Self {
        Self {
            board: controller.board().encoded(),
            available: controller.available().iter().map(|p| p.index()).collect(),
            turn: controller.turn(),
            phase: controller.phase(),
            selected_piece: controller.selected_piece(),
            game_over: controller.is_over(),
            winner: controller.winner(),
            halted: controller.violation().is_some(),
        }
    }
}
