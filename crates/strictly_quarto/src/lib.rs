//! Strictly Quarto - type-safe Quarto game logic
//!
//! Two players share sixteen pieces, each a combination of four binary
//! attributes. Every turn one player hands the other a piece, and the other
//! places it on a 4x4 board. A player wins by completing a row, column,
//! diagonal, or any 2x2 block of four pieces that agree on one attribute.
//!
//! # Architecture
//!
//! - **Pieces**: the 16-piece catalog and its attribute channels
//! - **Board**: the grid and its cell encoding
//! - **Rules**: win detection over lines and 2x2 sub-grids, draw detection
//! - **Controller**: a non-blocking turn state machine polled once per tick
//! - **Players**: the actor interface, a buffered human adapter, a simple agent
//! - **Invariants**: properties checked after every transition
//!
//! # Example
//!
//! ```
//! use strictly_quarto::{HumanInput, Seat, SimpleAgent, TurnController};
//!
//! let mut controller = TurnController::new(
//!     Seat::agent(SimpleAgent::new("North")),
//!     Seat::agent(SimpleAgent::new("South")),
//! );
//! let mut input = HumanInput::new();
//! while !controller.is_over() {
//!     controller.tick(&mut input).expect("simple agents keep the contract");
//! }
//! println!("{}", controller.status_line());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod available;
mod board;
mod controller;
mod error;
pub mod invariants;
mod piece;
mod players;
pub mod rules;
mod snapshot;
mod turn;

// Crate-level exports - Pieces
pub use piece::{CHANNEL_COUNT, Channel, PIECE_COUNT, Piece, PieceCatalog};

// Crate-level exports - Board
pub use available::AvailablePieces;
pub use board::{BOARD_SIZE, Board, Coord};

// Crate-level exports - Rules
pub use rules::{GroupKind, WinningGroup, has_winner, is_draw, is_full, shared_channel, winning_group};

// Crate-level exports - Turn structure
pub use controller::{TickOutcome, TurnController};
pub use turn::{Outcome, Phase, Player, TurnState};

// Crate-level exports - Players
pub use players::{
    Actor, Decision, HumanInput, InputLayout, InputTarget, Point, Region, Seat, SimpleAgent,
};

// Crate-level exports - Errors and snapshots
pub use error::{ContractViolation, QuartoError};
pub use snapshot::GameSnapshot;
