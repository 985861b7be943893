//! Terminal consistency invariant: the game is over exactly when the board
//! says so.

use super::Invariant;
use crate::controller::TurnController;
use crate::rules::{has_winner, is_full};
use crate::turn::TurnState;

/// Invariant: the controller state agrees with the board.
///
/// - in play: no winning group and at least one empty cell
/// - won: the board holds a winning group
/// - drawn: the board is full with no winning group
pub struct TerminalConsistencyInvariant;

impl Invariant<TurnController> for TerminalConsistencyInvariant {
    fn holds(controller: &TurnController) -> bool {
        let board = controller.board();
        match controller.state() {
            TurnState::GameOver { winner: Some(_) } => has_winner(board),
            TurnState::GameOver { winner: None } => is_full(board) && !has_winner(board),
            TurnState::SelectPiece { .. } | TurnState::PlacePiece { .. } => {
                !has_winner(board) && !is_full(board)
            }
        }
    }

    fn description() -> &'static str {
        "Game is over exactly when the board holds a win or is full"
    }
}
