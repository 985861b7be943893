//! Game rules for Quarto.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. Rules are kept
//! apart from board storage so the controller and invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{GroupKind, WinningGroup, groups, has_winner, shared_channel, winning_group};
