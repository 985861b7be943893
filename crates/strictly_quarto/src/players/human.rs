//! Human player driven by buffered pointer input.

use super::layout::{InputLayout, InputTarget, Point};
use super::{Actor, Decision};
use crate::available::AvailablePieces;
use crate::board::{Board, Coord};
use crate::piece::Piece;
use crate::turn::Phase;
use tracing::{debug, info, instrument};

/// Human input adapter.
///
/// Holds two single-slot buffers filled by [`HumanInput::pointer_down`] and
/// consumed exactly once by the matching [`Actor`] call. The event loop owns
/// the adapter and lends it to the controller each tick, so capture and
/// consumption never interleave.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanInput {
    pending_piece: Option<Piece>,
    pending_cell: Option<Coord>,
}

impl HumanInput {
    /// Creates an adapter with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates a pointer-down and buffers the result.
    ///
    /// The phase picks which region is live. Coordinates outside it, or past
    /// the end of the available list, are dropped. Returns true if a buffer
    /// was written. A later click overwrites an unconsumed one.
    #[instrument(skip(self, layout, available), fields(available = available.len()))]
    pub fn pointer_down(
        &mut self,
        point: Point,
        phase: Phase,
        layout: &InputLayout,
        available: &AvailablePieces,
    ) -> bool {
        match layout.translate(point, phase) {
            Some(InputTarget::Piece(position)) => match available.get(position) {
                Some(piece) => {
                    debug!(position, piece = %piece, "Buffered piece selection");
                    self.pending_piece = Some(piece);
                    true
                }
                None => {
                    debug!(position, "Picker slot is empty, click dropped");
                    false
                }
            },
            Some(InputTarget::Cell(coord)) => {
                debug!(%coord, "Buffered placement");
                self.pending_cell = Some(coord);
                true
            }
            None => {
                debug!("Click outside the live region, dropped");
                false
            }
        }
    }

    /// Buffers a piece directly, bypassing coordinate translation.
    pub fn push_selection(&mut self, piece: Piece) {
        self.pending_piece = Some(piece);
    }

    /// Buffers a cell directly, bypassing coordinate translation.
    ///
    /// Out-of-range cells are dropped.
    pub fn push_placement(&mut self, coord: Coord) -> bool {
        if coord.in_bounds() {
            self.pending_cell = Some(coord);
        }
        coord.in_bounds()
    }

    /// Piece waiting to be consumed.
    pub fn pending_selection(&self) -> Option<Piece> {
        self.pending_piece
    }

    /// Cell waiting to be consumed.
    pub fn pending_placement(&self) -> Option<Coord> {
        self.pending_cell
    }

    /// Drops a buffered piece selection.
    pub fn clear_selection(&mut self) {
        self.pending_piece = None;
    }

    /// Drops a buffered placement.
    pub fn clear_placement(&mut self) {
        self.pending_cell = None;
    }

    /// Drops both buffers.
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) {
        if self.pending_piece.is_some() || self.pending_cell.is_some() {
            info!(
                pending_piece = ?self.pending_piece,
                pending_cell = ?self.pending_cell,
                "Discarding buffered input"
            );
        }
        self.clear_selection();
        self.clear_placement();
    }
}

impl Actor for HumanInput {
    /// Consumes the selection buffer.
    ///
    /// A piece that is no longer available is discarded rather than
    /// reported: human input never surfaces as an error.
    fn select_piece(&mut self, _board: &Board, available: &AvailablePieces) -> Decision<Piece> {
        let Some(piece) = self.pending_piece.take() else {
            return Decision::NotReady;
        };
        if available.contains(piece) {
            Decision::Ready(piece)
        } else {
            debug!(piece = %piece, "Buffered piece no longer available, dropped");
            Decision::NotReady
        }
    }

    /// Consumes the placement buffer. Occupied cells are the controller's call.
    fn place_piece(
        &mut self,
        _board: &Board,
        _available: &AvailablePieces,
        _selected: Piece,
    ) -> Decision<Coord> {
        self.pending_cell.take().into()
    }

    fn name(&self) -> &str {
        "Human"
    }
}
