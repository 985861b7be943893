//! Actor trait and implementations.
//!
//! Both halves of a turn are answered through [`Actor`]. Autonomous agents
//! answer every poll; the human adapter answers [`Decision::NotReady`] until
//! a qualifying pointer event has been buffered.

mod human;
mod layout;
mod simple_ai;

pub use human::HumanInput;
pub use layout::{InputLayout, InputTarget, Point, Region};
pub use simple_ai::SimpleAgent;

use crate::available::AvailablePieces;
use crate::board::{Board, Coord};
use crate::piece::Piece;

/// Answer to a poll: a decision, or "not ready yet".
///
/// `NotReady` is not an error. The controller polls again next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<T> {
    /// The actor has decided.
    Ready(T),
    /// No decision yet.
    NotReady,
}

impl<T> Decision<T> {
    /// Returns true if a decision is present.
    pub fn is_ready(&self) -> bool {
        matches!(self, Decision::Ready(_))
    }

    /// Converts into an `Option`.
    pub fn ready(self) -> Option<T> {
        match self {
            Decision::Ready(value) => Some(value),
            Decision::NotReady => None,
        }
    }
}

impl<T> From<Option<T>> for Decision<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Decision::NotReady, Decision::Ready)
    }
}

/// Capability contract for anything that can play a seat.
///
/// Calls must return immediately. An actor that needs time answers
/// `NotReady` and is polled again on a later tick.
pub trait Actor {
    /// Picks a piece from `available` for the opponent to place.
    fn select_piece(&mut self, board: &Board, available: &AvailablePieces) -> Decision<Piece>;

    /// Picks the cell for `selected`.
    fn place_piece(
        &mut self,
        board: &Board,
        available: &AvailablePieces,
        selected: Piece,
    ) -> Decision<Coord>;

    /// Returns the actor's display name.
    fn name(&self) -> &str;
}

/// Who occupies a seat, fixed at game configuration time.
///
/// Human seats are served by the [`HumanInput`] the caller passes to
/// [`TurnController::tick`](crate::TurnController::tick).
pub enum Seat {
    /// Answered from buffered pointer input.
    Human,
    /// Answered by an autonomous agent.
    Agent(Box<dyn Actor>),
}

impl Seat {
    /// Wraps an agent.
    pub fn agent(agent: impl Actor + 'static) -> Self {
        Seat::Agent(Box::new(agent))
    }

    /// Returns true for a human seat.
    pub fn is_human(&self) -> bool {
        matches!(self, Seat::Human)
    }

    /// Display name of the seat's occupant.
    pub fn name(&self) -> &str {
        match self {
            Seat::Human => "Human",
            Seat::Agent(agent) => agent.name(),
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Human => write!(f, "Human"),
            Seat::Agent(agent) => f.debug_tuple("Agent").field(&agent.name()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_from_option() {
        let ready: Decision<u8> = Some(3).into();
        assert!(ready.is_ready());
        assert_eq!(ready.ready(), Some(3));

        let waiting: Decision<u8> = None.into();
        assert!(!waiting.is_ready());
        assert_eq!(waiting, Decision::NotReady);
    }

    #[test]
    fn test_seat_names() {
        assert_eq!(Seat::Human.name(), "Human");
        let seat = Seat::agent(SimpleAgent::new("Bot"));
        assert!(!seat.is_human());
        assert_eq!(seat.name(), "Bot");
        assert_eq!(format!("{:?}", seat), "Agent(\"Bot\")");
    }
}
