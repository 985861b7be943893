//! Turn controller: the non-blocking two-phase state machine.
//!
//! Each [`TurnController::tick`] polls exactly one actor, the one the current
//! state designates, and applies at most one transition. Actors that are not
//! ready leave the state untouched, so a human can take as many ticks as they
//! like.

use crate::available::AvailablePieces;
use crate::board::{Board, Coord};
use crate::error::{ContractViolation, QuartoError};
use crate::invariants::{InvariantSet, QuartoInvariants};
use crate::piece::Piece;
use crate::players::{Actor, Decision, HumanInput, Seat};
use crate::rules::{WinningGroup, is_full, winning_group};
use crate::snapshot::GameSnapshot;
use crate::turn::{Outcome, Phase, Player, TurnState};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing was polled.
    Idle,
    /// The polled actor has no decision yet.
    Waiting {
        /// Player whose actor was polled.
        player: Player,
        /// Phase it was polled for.
        phase: Phase,
    },
    /// A piece was handed to the opponent.
    Selected {
        /// Player who chose.
        by: Player,
        /// The chosen piece.
        piece: Piece,
    },
    /// The chosen cell was occupied; the actor gets another chance.
    Rejected {
        /// Player placing.
        player: Player,
        /// The occupied cell.
        coord: Coord,
    },
    /// A piece was placed and play passes to the opponent.
    Placed {
        /// Player who placed.
        player: Player,
        /// Placed piece.
        piece: Piece,
        /// Where.
        coord: Coord,
    },
    /// A placement completed a winning group.
    Won {
        /// The winner.
        player: Player,
        /// Placed piece.
        piece: Piece,
        /// Where.
        coord: Coord,
        /// The group that won.
        group: WinningGroup,
    },
    /// A placement filled the board without a win.
    Drawn {
        /// Player who placed last.
        player: Player,
        /// Placed piece.
        piece: Piece,
        /// Where.
        coord: Coord,
    },
}

impl TickOutcome {
    /// Returns true if the tick changed game state.
    pub fn is_transition(&self) -> bool {
        !matches!(
            self,
            TickOutcome::Idle | TickOutcome::Waiting { .. } | TickOutcome::Rejected { .. }
        )
    }
}

/// Authoritative game state plus the seats that drive it.
#[derive(Debug)]
pub struct TurnController {
    pub(crate) board: Board,
    pub(crate) available: AvailablePieces,
    pub(crate) state: TurnState,
    seats: [Seat; 2],
    elapsed: [Duration; 2],
    violation: Option<ContractViolation>,
}

impl TurnController {
    /// Creates a controller in the initial state: empty board, full
    /// available set, Player 2 to select a piece for Player 1.
    #[instrument(skip_all, fields(player1 = player1.name(), player2 = player2.name()))]
    pub fn new(player1: Seat, player2: Seat) -> Self {
        info!("Creating turn controller");
        Self {
            board: Board::new(),
            available: AvailablePieces::full(),
            state: TurnState::initial(),
            seats: [player1, player2],
            elapsed: [Duration::ZERO; 2],
            violation: None,
        }
    }

    /// Polls the actor designated by the current state and applies its
    /// decision.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractViolation`] when an actor selects a piece that is
    /// not available or places outside the board. The controller is then
    /// halted: every later tick returns the same violation until
    /// [`TurnController::restart`].
    #[instrument(skip(self, input), fields(state = ?self.state))]
    pub fn tick(&mut self, input: &mut HumanInput) -> Result<TickOutcome, ContractViolation> {
        if let Some(violation) = &self.violation {
            return Err(violation.clone());
        }

        match self.state {
            TurnState::GameOver { .. } => Ok(TickOutcome::Idle),
            TurnState::SelectPiece { turn } => self.select_step(turn, input),
            TurnState::PlacePiece { turn, piece } => self.place_step(turn, piece, input),
        }
    }

    /// Discards the game and starts over, flushing both input buffers so a
    /// stale click cannot resolve in the new game.
    #[instrument(skip(self, input))]
    pub fn restart(&mut self, input: &mut HumanInput) {
        info!(state = ?self.state, "Restarting game");
        self.board = Board::new();
        self.available = AvailablePieces::full();
        self.state = TurnState::initial();
        self.elapsed = [Duration::ZERO; 2];
        self.violation = None;
        input.clear_all();
    }

    fn select_step(
        &mut self,
        turn: Player,
        input: &mut HumanInput,
    ) -> Result<TickOutcome, ContractViolation> {
        let selector = turn.opponent();

        let started = Instant::now();
        let decision = seat_actor(&mut self.seats, selector, input)
            .select_piece(&self.board, &self.available);
        let Decision::Ready(piece) = decision else {
            return Ok(TickOutcome::Waiting {
                player: selector,
                phase: Phase::SelectPiece,
            });
        };
        self.elapsed[selector.index()] += started.elapsed();

        if !self.available.remove(piece) {
            return Err(self.halt(selector, QuartoError::InvalidSelection(piece)));
        }

        info!(player = %selector, piece = %piece, "Piece selected");
        self.state = TurnState::PlacePiece { turn, piece };
        self.verify(selector)?;

        Ok(TickOutcome::Selected {
            by: selector,
            piece,
        })
    }

    fn place_step(
        &mut self,
        turn: Player,
        piece: Piece,
        input: &mut HumanInput,
    ) -> Result<TickOutcome, ContractViolation> {
        let started = Instant::now();
        let decision = seat_actor(&mut self.seats, turn, input)
            .place_piece(&self.board, &self.available, piece);
        let Decision::Ready(coord) = decision else {
            return Ok(TickOutcome::Waiting {
                player: turn,
                phase: Phase::PlacePiece,
            });
        };
        self.elapsed[turn.index()] += started.elapsed();

        if !coord.in_bounds() {
            let cause = QuartoError::CellOutOfBounds {
                row: coord.row,
                col: coord.col,
            };
            return Err(self.halt(turn, cause));
        }

        if !self.board.is_empty(coord) {
            if self.seats[turn.index()].is_human() {
                debug!(player = %turn, %coord, "Cell occupied, waiting for another click");
            } else {
                warn!(player = %turn, %coord, "Agent chose an occupied cell, asking again");
            }
            return Ok(TickOutcome::Rejected { player: turn, coord });
        }

        if let Err(cause) = self.board.place(coord, piece) {
            return Err(self.halt(turn, cause));
        }
        input.clear_placement();
        info!(player = %turn, piece = %piece, %coord, "Piece placed");

        let outcome = if let Some(group) = winning_group(&self.board) {
            info!(player = %turn, %group, "Game won");
            self.state = TurnState::GameOver { winner: Some(turn) };
            TickOutcome::Won {
                player: turn,
                piece,
                coord,
                group,
            }
        } else if is_full(&self.board) {
            info!("Board full, game drawn");
            self.state = TurnState::GameOver { winner: None };
            TickOutcome::Drawn {
                player: turn,
                piece,
                coord,
            }
        } else {
            self.state = TurnState::SelectPiece {
                turn: turn.opponent(),
            };
            input.clear_selection();
            TickOutcome::Placed {
                player: turn,
                piece,
                coord,
            }
        };

        self.verify(turn)?;
        Ok(outcome)
    }

    /// Checks invariants after a transition in debug builds.
    fn verify(&mut self, player: Player) -> Result<(), ContractViolation> {
        if !cfg!(debug_assertions) {
            return Ok(());
        }
        QuartoInvariants::check_all(&*self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            self.halt(player, QuartoError::GameCorrupted(descriptions))
        })
    }

    fn halt(&mut self, player: Player, cause: QuartoError) -> ContractViolation {
        let violation = ContractViolation::new(player, cause);
        error!(
            %violation,
            actor = self.seats[player.index()].name(),
            "Actor contract violated, game halted"
        );
        self.violation = Some(violation.clone());
        violation
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces not yet placed or selected.
    pub fn available(&self) -> &AvailablePieces {
        &self.available
    }

    /// Current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Player whose piece is being placed.
    pub fn turn(&self) -> Option<Player> {
        self.state.turn()
    }

    /// Active phase.
    pub fn phase(&self) -> Option<Phase> {
        self.state.phase()
    }

    /// Piece awaiting placement.
    pub fn selected_piece(&self) -> Option<Piece> {
        self.state.selected_piece()
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Winner of a finished game, `None` for a draw or a game in play.
    pub fn winner(&self) -> Option<Player> {
        self.outcome().and_then(|outcome| outcome.winner())
    }

    /// The seat for a player.
    pub fn seat(&self, player: Player) -> &Seat {
        &self.seats[player.index()]
    }

    /// Time spent in a player's decision calls that produced a decision.
    pub fn elapsed(&self, player: Player) -> Duration {
        self.elapsed[player.index()]
    }

    /// The violation that halted the game, if any.
    pub fn violation(&self) -> Option<&ContractViolation> {
        self.violation.as_ref()
    }

    /// Phase to route pointer input to, when a human seat is being polled.
    pub fn human_phase(&self) -> Option<Phase> {
        if self.violation.is_some() {
            return None;
        }
        let actor = self.state.actor()?;
        if self.seats[actor.index()].is_human() {
            self.state.phase()
        } else {
            None
        }
    }

    /// One-line status for display.
    pub fn status_line(&self) -> String {
        if let Some(violation) = &self.violation {
            return format!("Game halted: {}", violation);
        }
        match self.state {
            TurnState::SelectPiece { turn } => format!("{} selecting piece", turn.opponent()),
            TurnState::PlacePiece { turn, .. } => format!("{} placing piece", turn),
            TurnState::GameOver { winner: Some(player) } => Outcome::Winner(player).to_string(),
            TurnState::GameOver { winner: None } => Outcome::Draw.to_string(),
        }
    }

    /// Serializable view for render collaborators.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}

fn seat_actor<'a>(
    seats: &'a mut [Seat; 2],
    player: Player,
    input: &'a mut HumanInput,
) -> &'a mut dyn Actor {
    match &mut seats[player.index()] {
        Seat::Human => input as &mut dyn Actor,
        Seat::Agent(agent) => agent.as_mut(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceCatalog;
    use crate::players::SimpleAgent;

    fn piece(index: usize) -> Piece {
        PieceCatalog::piece_at(index).unwrap()
    }

    /// Agent that always answers with the same decisions.
    struct Fixed {
        piece: Piece,
        coord: Coord,
    }

    impl Actor for Fixed {
        fn select_piece(&mut self, _: &Board, _: &AvailablePieces) -> Decision<Piece> {
            Decision::Ready(self.piece)
        }

        fn place_piece(&mut self, _: &Board, _: &AvailablePieces, _: Piece) -> Decision<Coord> {
            Decision::Ready(self.coord)
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = TurnController::new(Seat::Human, Seat::Human);
        assert_eq!(controller.state(), TurnState::SelectPiece { turn: Player::One });
        assert_eq!(controller.available().len(), 16);
        assert_eq!(controller.board().filled_count(), 0);
        assert_eq!(controller.status_line(), "P2 selecting piece");
    }

    #[test]
    fn test_human_not_ready_keeps_state() {
        let mut controller = TurnController::new(Seat::Human, Seat::Human);
        let mut input = HumanInput::new();
        for _ in 0..5 {
            assert_eq!(
                controller.tick(&mut input),
                Ok(TickOutcome::Waiting {
                    player: Player::Two,
                    phase: Phase::SelectPiece,
                })
            );
        }
        assert_eq!(controller.state(), TurnState::initial());
    }

    #[test]
    fn test_selection_then_placement() {
        let mut controller = TurnController::new(Seat::Human, Seat::agent(SimpleAgent::default()));
        let mut input = HumanInput::new();

        assert_eq!(
            controller.tick(&mut input),
            Ok(TickOutcome::Selected {
                by: Player::Two,
                piece: piece(0),
            })
        );
        assert_eq!(controller.status_line(), "P1 placing piece");
        assert!(!controller.available().contains(piece(0)));
        assert_eq!(controller.human_phase(), Some(Phase::PlacePiece));

        input.push_placement(Coord::new(2, 2));
        assert_eq!(
            controller.tick(&mut input),
            Ok(TickOutcome::Placed {
                player: Player::One,
                piece: piece(0),
                coord: Coord::new(2, 2),
            })
        );
        assert_eq!(controller.board().get(Coord::new(2, 2)), Some(piece(0)));
        assert_eq!(controller.state(), TurnState::SelectPiece { turn: Player::Two });
        assert_eq!(controller.human_phase(), Some(Phase::SelectPiece));
    }

    #[test]
    fn test_unavailable_selection_halts() {
        let fixed = Fixed {
            piece: piece(5),
            coord: Coord::new(0, 0),
        };
        let mut controller = TurnController::new(Seat::Human, Seat::agent(fixed));
        let mut input = HumanInput::new();
        controller.available.remove(piece(5));

        let violation = controller.tick(&mut input).unwrap_err();
        assert_eq!(violation.player, Player::Two);
        assert_eq!(violation.error, QuartoError::InvalidSelection(piece(5)));

        // Sticky until restart.
        assert_eq!(controller.tick(&mut input), Err(violation));
        assert_eq!(controller.human_phase(), None);
        assert!(controller.status_line().starts_with("Game halted"));

        controller.restart(&mut input);
        assert!(controller.violation().is_none());
    }

    #[test]
    fn test_out_of_bounds_placement_halts() {
        let fixed = Fixed {
            piece: piece(1),
            coord: Coord::new(0, 9),
        };
        let mut controller =
            TurnController::new(Seat::agent(fixed), Seat::agent(SimpleAgent::default()));
        let mut input = HumanInput::new();

        controller.tick(&mut input).unwrap();
        let violation = controller.tick(&mut input).unwrap_err();
        assert_eq!(violation.player, Player::One);
        assert_eq!(
            violation.error,
            QuartoError::CellOutOfBounds { row: 0, col: 9 }
        );
        assert_eq!(controller.board().filled_count(), 0);
    }

    #[test]
    fn test_agent_occupied_cell_rejected() {
        let fixed = Fixed {
            piece: piece(1),
            coord: Coord::new(0, 0),
        };
        let mut controller =
            TurnController::new(Seat::agent(fixed), Seat::agent(SimpleAgent::default()));
        let mut input = HumanInput::new();

        controller.tick(&mut input).unwrap();
        controller.tick(&mut input).unwrap();
        assert_eq!(controller.board().get(Coord::new(0, 0)), Some(piece(0)));

        // Player 1 hands over piece 1; Player 2 places at the next empty cell.
        controller.tick(&mut input).unwrap();
        controller.tick(&mut input).unwrap();

        // Player 2 hands over piece 2; Player 1 insists on (0, 0).
        controller.tick(&mut input).unwrap();
        let before = controller.state();
        assert_eq!(
            controller.tick(&mut input),
            Ok(TickOutcome::Rejected {
                player: Player::One,
                coord: Coord::new(0, 0),
            })
        );
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut controller = TurnController::new(
            Seat::agent(SimpleAgent::default()),
            Seat::agent(SimpleAgent::default()),
        );
        let mut input = HumanInput::new();
        while !controller.is_over() {
            controller.tick(&mut input).unwrap();
        }
        assert_eq!(controller.tick(&mut input), Ok(TickOutcome::Idle));
        assert_eq!(controller.human_phase(), None);
    }

    #[test]
    fn test_restart_clears_elapsed() {
        let mut controller = TurnController::new(
            Seat::agent(SimpleAgent::default()),
            Seat::agent(SimpleAgent::default()),
        );
        let mut input = HumanInput::new();
        controller.tick(&mut input).unwrap();
        controller.restart(&mut input);
        assert_eq!(controller.elapsed(Player::One), Duration::ZERO);
        assert_eq!(controller.elapsed(Player::Two), Duration::ZERO);
    }
}
