//! Tests for full games driven through the turn controller.

use std::collections::VecDeque;
use strictly_quarto::invariants::{InvariantSet, QuartoInvariants};
use strictly_quarto::{
    Actor, AvailablePieces, Board, Channel, Coord, Decision, GroupKind, HumanInput, InputLayout,
    Phase, Piece, PieceCatalog, Player, Point, QuartoError, Seat, SimpleAgent, TickOutcome,
    TurnController, TurnState, WinningGroup, is_full,
};

/// Agent that replays a fixed list of decisions.
#[derive(Default)]
struct Scripted {
    picks: VecDeque<Piece>,
    cells: VecDeque<Coord>,
}

impl Actor for Scripted {
    fn select_piece(&mut self, _board: &Board, _available: &AvailablePieces) -> Decision<Piece> {
        self.picks.pop_front().into()
    }

    fn place_piece(&mut self, _board: &Board, _available: &AvailablePieces, _selected: Piece) -> Decision<Coord> {
        self.cells.pop_front().into()
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn piece(index: usize) -> Piece {
    PieceCatalog::piece_at(index).expect("Valid catalog index")
}

/// Splits a placement sequence between two scripted seats.
///
/// Placement `k` is made by Player 1 when `k` is even, and the piece is
/// selected by the other player.
fn scripted_seats(moves: &[(usize, Coord)]) -> (Seat, Seat) {
    let mut one = Scripted::default();
    let mut two = Scripted::default();
    for (k, (index, coord)) in moves.iter().enumerate() {
        let (placer, selector) = if k % 2 == 0 {
            (&mut one, &mut two)
        } else {
            (&mut two, &mut one)
        };
        selector.picks.push_back(piece(*index));
        placer.cells.push_back(*coord);
    }
    (Seat::agent(one), Seat::agent(two))
}

/// Row-major placement of a 4x4 grid of catalog indices.
fn row_major(indices: [[usize; 4]; 4]) -> Vec<(usize, Coord)> {
    Coord::all()
        .map(|coord| (indices[coord.row][coord.col], coord))
        .collect()
}

/// Ticks until the game ends, checking invariants after every tick.
fn play_out(controller: &mut TurnController, input: &mut HumanInput) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..64 {
        if controller.is_over() {
            break;
        }
        let outcome = controller.tick(input).expect("Scripted agents keep the contract");
        assert!(QuartoInvariants::check_all(&*controller).is_ok());
        outcomes.push(outcome);
    }
    assert!(controller.is_over(), "Game should have finished");
    outcomes
}

#[test]
fn test_row_win() {
    let moves = [
        (0, Coord::new(0, 0)),
        (1, Coord::new(0, 1)),
        (2, Coord::new(0, 2)),
        (3, Coord::new(0, 3)),
    ];
    let (one, two) = scripted_seats(&moves);
    let mut controller = TurnController::new(one, two);
    let mut input = HumanInput::new();

    let outcomes = play_out(&mut controller, &mut input);

    assert_eq!(outcomes.len(), 8);
    assert_eq!(
        outcomes.last(),
        Some(&TickOutcome::Won {
            player: Player::Two,
            piece: piece(3),
            coord: Coord::new(0, 3),
            group: WinningGroup {
                kind: GroupKind::Row(0),
                channel: Channel::Energy,
            },
        })
    );
    assert_eq!(controller.state(), TurnState::GameOver { winner: Some(Player::Two) });
    assert_eq!(controller.status_line(), "Player 2 Wins!");
}

#[test]
fn test_sub_grid_win() {
    // Pieces 2, 7, 11 and 14 agree only on the third attribute.
    let moves = [
        (2, Coord::new(0, 0)),
        (7, Coord::new(0, 1)),
        (11, Coord::new(1, 0)),
        (14, Coord::new(1, 1)),
    ];
    let (one, two) = scripted_seats(&moves);
    let mut controller = TurnController::new(one, two);
    let mut input = HumanInput::new();

    let outcomes = play_out(&mut controller, &mut input);

    let Some(TickOutcome::Won { player, group, .. }) = outcomes.last() else {
        panic!("Expected a win, got {:?}", outcomes.last());
    };
    assert_eq!(*player, Player::Two);
    assert_eq!(group.kind, GroupKind::SubGrid { row: 0, col: 0 });
    assert_eq!(group.channel, Channel::Judgment);
    assert_eq!(controller.winner(), Some(Player::Two));
}

#[test]
fn test_full_board_without_win_is_draw() {
    let moves = row_major([[0, 1, 2, 12], [3, 13, 4, 5], [6, 8, 10, 11], [15, 14, 7, 9]]);
    let (one, two) = scripted_seats(&moves);
    let mut controller = TurnController::new(one, two);
    let mut input = HumanInput::new();

    let outcomes = play_out(&mut controller, &mut input);

    assert_eq!(outcomes.len(), 32);
    assert!(matches!(
        outcomes.last(),
        Some(TickOutcome::Drawn { player: Player::Two, .. })
    ));
    assert_eq!(controller.state(), TurnState::GameOver { winner: None });
    assert!(controller.available().is_empty());
    assert_eq!(controller.status_line(), "Draw!");
}

#[test]
fn test_win_on_last_cell_beats_draw() {
    let moves = row_major([[0, 1, 2, 12], [3, 13, 4, 5], [6, 7, 8, 10], [9, 14, 11, 15]]);
    let (one, two) = scripted_seats(&moves);
    let mut controller = TurnController::new(one, two);
    let mut input = HumanInput::new();

    let outcomes = play_out(&mut controller, &mut input);

    assert!(is_full(controller.board()));
    assert_eq!(
        outcomes.last(),
        Some(&TickOutcome::Won {
            player: Player::Two,
            piece: piece(15),
            coord: Coord::new(3, 3),
            group: WinningGroup {
                kind: GroupKind::Row(3),
                channel: Channel::Energy,
            },
        })
    );
    assert_eq!(controller.winner(), Some(Player::Two));
}

#[test]
fn test_human_click_on_occupied_cell_keeps_state() {
    let layout = InputLayout::default();
    let mut controller = TurnController::new(Seat::Human, Seat::Human);
    let mut input = HumanInput::new();

    // P2 clicks the first picker slot, P1 clicks the top-left cell.
    let phase = controller.human_phase().expect("Human is being polled");
    assert!(input.pointer_down(Point::new(10, 410), phase, &layout, controller.available()));
    assert!(matches!(controller.tick(&mut input), Ok(TickOutcome::Selected { by: Player::Two, .. })));

    let phase = controller.human_phase().expect("Human is being polled");
    assert!(input.pointer_down(Point::new(50, 50), phase, &layout, controller.available()));
    assert!(matches!(controller.tick(&mut input), Ok(TickOutcome::Placed { .. })));

    // P1 hands over a piece, P2 clicks the same cell.
    let phase = controller.human_phase().expect("Human is being polled");
    assert!(input.pointer_down(Point::new(110, 410), phase, &layout, controller.available()));
    controller.tick(&mut input).expect("Human input never violates the contract");

    let before = controller.state();
    let phase = controller.human_phase().expect("Human is being polled");
    assert_eq!(phase, Phase::PlacePiece);
    assert!(input.pointer_down(Point::new(60, 70), phase, &layout, controller.available()));
    assert_eq!(
        controller.tick(&mut input),
        Ok(TickOutcome::Rejected {
            player: Player::Two,
            coord: Coord::new(0, 0),
        })
    );
    assert_eq!(controller.state(), before);
    assert_eq!(controller.board().filled_count(), 1);

    // The rejected click was consumed; nothing happens until the next one.
    assert_eq!(
        controller.tick(&mut input),
        Ok(TickOutcome::Waiting {
            player: Player::Two,
            phase: Phase::PlacePiece,
        })
    );
}

#[test]
fn test_restart_flushes_stale_click() {
    let layout = InputLayout::default();
    let mut controller = TurnController::new(Seat::Human, Seat::Human);
    let mut input = HumanInput::new();

    input.push_selection(piece(4));
    controller.tick(&mut input).expect("Human input never violates the contract");
    input.pointer_down(Point::new(350, 350), Phase::PlacePiece, &layout, controller.available());
    assert_eq!(input.pending_placement(), Some(Coord::new(3, 3)));

    controller.restart(&mut input);

    assert_eq!(input, HumanInput::new());
    assert_eq!(controller.state(), TurnState::initial());
    assert_eq!(controller.available().len(), 16);
    for _ in 0..3 {
        assert_eq!(
            controller.tick(&mut input),
            Ok(TickOutcome::Waiting {
                player: Player::Two,
                phase: Phase::SelectPiece,
            })
        );
    }
    assert_eq!(controller.board().filled_count(), 0);
}

#[test]
fn test_human_selection_clicks_ignore_the_board() {
    let layout = InputLayout::default();
    let mut controller = TurnController::new(Seat::Human, Seat::Human);
    let mut input = HumanInput::new();

    assert!(!input.pointer_down(Point::new(50, 50), Phase::SelectPiece, &layout, controller.available()));
    assert_eq!(
        controller.tick(&mut input),
        Ok(TickOutcome::Waiting {
            player: Player::Two,
            phase: Phase::SelectPiece,
        })
    );
}

#[test]
fn test_agent_seat_ignores_pointer_routing() {
    let controller = TurnController::new(Seat::Human, Seat::agent(SimpleAgent::default()));
    // Player 2 selects first and is an agent.
    assert_eq!(controller.human_phase(), None);
}

#[test]
fn test_agent_out_of_bounds_placement_is_contract_violation() {
    let moves = [(0, Coord::new(4, 0))];
    let (one, two) = scripted_seats(&moves);
    let mut controller = TurnController::new(one, two);
    let mut input = HumanInput::new();

    controller.tick(&mut input).expect("Selection is valid");
    let violation = controller.tick(&mut input).expect_err("Cell is off the board");

    assert_eq!(violation.player, Player::One);
    assert_eq!(violation.error, QuartoError::CellOutOfBounds { row: 4, col: 0 });
    assert_eq!(controller.tick(&mut input), Err(violation));
    assert!(*controller.snapshot().halted());
}

#[test]
fn test_agents_play_to_completion() {
    let mut controller = TurnController::new(
        Seat::agent(SimpleAgent::new("North")),
        Seat::agent(SimpleAgent::new("South")),
    );
    let mut input = HumanInput::new();

    let outcomes = play_out(&mut controller, &mut input);

    assert!(outcomes.iter().all(TickOutcome::is_transition));
    assert!(controller.outcome().is_some());
}
