//! Turn and phase types for the two-phase turn protocol.

use crate::piece::Piece;
use serde::{Deserialize, Serialize};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Player {
    /// Player 1 (places first).
    One,
    /// Player 2.
    Two,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Seat index, 0 for Player 1.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Player number as shown to users (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// The half of a turn currently being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// The opponent of the player on turn picks a piece for them.
    SelectPiece,
    /// The player on turn places the piece they were handed.
    PlacePiece,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player completed a winning line or sub-grid.
    Winner(Player),
    /// Board filled with no winning group.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} Wins!", player.number()),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// State of the turn controller.
///
/// `turn` is always the player who will place the next piece; during
/// `SelectPiece` their opponent is the one choosing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for `turn.opponent()` to hand `turn` a piece.
    SelectPiece {
        /// Player who will place the selected piece.
        turn: Player,
    },
    /// Waiting for `turn` to place `piece`.
    PlacePiece {
        /// Player placing.
        turn: Player,
        /// Piece chosen by the opponent, pending placement.
        piece: Piece,
    },
    /// Terminal state. `winner` is `None` for a draw.
    GameOver {
        /// The winning player, if any.
        winner: Option<Player>,
    },
}

impl TurnState {
    /// Initial state of every game.
    pub fn initial() -> Self {
        TurnState::SelectPiece { turn: Player::One }
    }

    /// Player whose piece is being placed, `None` once the game is over.
    pub fn turn(&self) -> Option<Player> {
        match self {
            TurnState::SelectPiece { turn } | TurnState::PlacePiece { turn, .. } => Some(*turn),
            TurnState::GameOver { .. } => None,
        }
    }

    /// Active phase, `None` once the game is over.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TurnState::SelectPiece { .. } => Some(Phase::SelectPiece),
            TurnState::PlacePiece { .. } => Some(Phase::PlacePiece),
            TurnState::GameOver { .. } => None,
        }
    }

    /// Player whose actor is queried in this state.
    ///
    /// Selection is adversarial: the opponent of `turn` picks.
    pub fn actor(&self) -> Option<Player> {
        match self {
            TurnState::SelectPiece { turn } => Some(turn.opponent()),
            TurnState::PlacePiece { turn, .. } => Some(*turn),
            TurnState::GameOver { .. } => None,
        }
    }

    /// The piece awaiting placement.
    pub fn selected_piece(&self) -> Option<Piece> {
        match self {
            TurnState::PlacePiece { piece, .. } => Some(*piece),
            _ => None,
        }
    }

    /// Returns true in the terminal state.
    pub fn is_over(&self) -> bool {
        matches!(self, TurnState::GameOver { .. })
    }

    /// Outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TurnState::GameOver { winner: Some(player) } => Some(Outcome::Winner(*player)),
            TurnState::GameOver { winner: None } => Some(Outcome::Draw),
            _ => None,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::initial()
    }
}
